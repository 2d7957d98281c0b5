//! End-to-end session flows against an in-memory store double.

use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;
use uuid::Uuid;

use studioboard_lib::BoardSession;
use studioboard_lib::DropTarget;
use studioboard_lib::catalog::Catalogs;
use studioboard_lib::catalog::Tag;
use studioboard_lib::catalog::UserProfile;
use studioboard_lib::error::Error;
use studioboard_lib::error::StoreError;
use studioboard_lib::link::FieldLink;
use studioboard_lib::link::RowIdentity;
use studioboard_lib::model::Board;
use studioboard_lib::model::ChoiceColor;
use studioboard_lib::model::ColumnKind;
use studioboard_lib::model::ParticipantField;
use studioboard_lib::model::Table;
use studioboard_lib::model::TableColumn;
use studioboard_lib::model::TableGroup;
use studioboard_lib::model::UserField;
use studioboard_lib::reorder::ClosestEdge;
use studioboard_lib::reorder::DragPayload;
use studioboard_lib::sort::SortDirection;
use studioboard_lib::store::BoardStore;

/// Records every persistence call; optionally fails all of them.
#[derive(Default)]
struct MemoryStore {
    calls: Mutex<Vec<String>>,
    offline: Mutex<bool>,
    catalogs: Mutex<Catalogs>,
}

impl MemoryStore {
    fn with_catalogs(catalogs: Catalogs) -> Self {
        Self {
            catalogs: Mutex::new(catalogs),
            ..Self::default()
        }
    }

    fn set_offline(&self, offline: bool) {
        *self.offline.lock().unwrap() = offline;
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: impl Into<String>) -> Result<(), StoreError> {
        if *self.offline.lock().unwrap() {
            return Err(StoreError::unavailable("offline"));
        }
        self.calls.lock().unwrap().push(call.into());
        Ok(())
    }
}

#[async_trait]
impl BoardStore for MemoryStore {
    async fn create_group(&self, group: &TableGroup) -> Result<Uuid, StoreError> {
        self.record(format!("create_group {}", group.name))?;
        Ok(Uuid::new_v4())
    }

    async fn delete_group(&self, group_id: Uuid) -> Result<(), StoreError> {
        self.record(format!("delete_group {group_id}"))
    }

    async fn reorder_groups(&self, groups: &[TableGroup]) -> Result<(), StoreError> {
        self.record(format!("reorder_groups {}", groups.len()))
    }

    async fn create_table(&self, table: &Table) -> Result<Uuid, StoreError> {
        self.record(format!("create_table {}", table.name))?;
        Ok(Uuid::new_v4())
    }

    async fn delete_table(&self, table_id: Uuid) -> Result<(), StoreError> {
        self.record(format!("delete_table {table_id}"))
    }

    async fn reorder_tables(&self, group_id: Uuid, tables: &[Table]) -> Result<(), StoreError> {
        self.record(format!("reorder_tables {group_id} {}", tables.len()))
    }

    async fn create_column(&self, column: &TableColumn) -> Result<Uuid, StoreError> {
        self.record(format!("create_column {}", column.header))?;
        Ok(Uuid::new_v4())
    }

    async fn update_column(&self, column: &TableColumn) -> Result<(), StoreError> {
        self.record(format!("update_column {}", column.header))
    }

    async fn delete_column(&self, column_id: Uuid) -> Result<(), StoreError> {
        self.record(format!("delete_column {column_id}"))
    }

    async fn append_row(&self, table_id: Uuid) -> Result<(), StoreError> {
        self.record(format!("append_row {table_id}"))
    }

    async fn delete_row(&self, table_id: Uuid, row: usize) -> Result<(), StoreError> {
        self.record(format!("delete_row {table_id} {row}"))
    }

    async fn create_choice(
        &self,
        _column_id: Uuid,
        value: &str,
        _color: &ChoiceColor,
    ) -> Result<(), StoreError> {
        self.record(format!("create_choice {value}"))
    }

    async fn update_choice(
        &self,
        _column_id: Uuid,
        _color_id: Uuid,
        value: &str,
    ) -> Result<(), StoreError> {
        self.record(format!("update_choice {value}"))
    }

    async fn delete_choice(&self, _column_id: Uuid, color_id: Uuid) -> Result<(), StoreError> {
        self.record(format!("delete_choice {color_id}"))
    }

    async fn link_user(
        &self,
        _table_id: Uuid,
        row: usize,
        email: &str,
        links: &[FieldLink<UserField>],
    ) -> Result<Vec<TableColumn>, StoreError> {
        self.record(format!("link_user {email} row {row} ({} links)", links.len()))?;
        Ok(Vec::new())
    }

    async fn link_participant(
        &self,
        _table_id: Uuid,
        row: usize,
        participant_id: Uuid,
        links: &[FieldLink<ParticipantField>],
    ) -> Result<Vec<TableColumn>, StoreError> {
        self.record(format!(
            "link_participant {participant_id} row {row} ({} links)",
            links.len()
        ))?;
        Ok(Vec::new())
    }

    async fn update_user(&self, user: &UserProfile) -> Result<(), StoreError> {
        self.record(format!("update_user {}", user.email))
    }

    async fn update_participant(
        &self,
        participant: &studioboard_lib::catalog::Participant,
    ) -> Result<(), StoreError> {
        self.record(format!("update_participant {}", participant.id))
    }

    async fn fetch_catalogs(&self) -> Result<Catalogs, StoreError> {
        self.record("fetch_catalogs")?;
        Ok(self.catalogs.lock().unwrap().clone())
    }
}

fn session_with(catalogs: Catalogs) -> (BoardSession, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::with_catalogs(catalogs));
    let session = BoardSession::with_state(store.clone(), Board::new(), Catalogs::new());
    (session, store)
}

#[tokio::test(flavor = "current_thread")]
async fn build_out_a_board_and_link_a_row() {
    let mut catalogs = Catalogs::new();
    catalogs.users.push(UserProfile::new("a@x.com"));
    let (mut session, store) = session_with(catalogs);
    session.refresh_catalogs().await.unwrap();

    let group = session.create_group("Spring Season").await.unwrap();
    let table = session
        .create_table(group, "Sittings")
        .await
        .unwrap()
        .unwrap();
    let first = session
        .create_column(table, "First Name", ColumnKind::Value)
        .await
        .unwrap()
        .unwrap();
    let email = session
        .create_column(table, "Email", ColumnKind::Value)
        .await
        .unwrap()
        .unwrap();
    session.append_row(table).await.unwrap();

    // Confirmed entities are no longer temporary.
    assert!(!session.board().group(group).unwrap().temporary);
    assert!(!session.board().table(table).unwrap().temporary);

    session.edit_cell(table, first, 0, "Jordan").await.unwrap();
    session.edit_cell(table, email, 0, "a@x.com").await.unwrap();

    let identity = session.link_user_row(table, 0).await.unwrap();
    assert_eq!(identity, RowIdentity::Unlinked("a@x.com".to_string()));

    let board = session.board();
    let first_column = board.column(table, first).unwrap();
    let email_column = board.column(table, email).unwrap();
    assert!(first_column.anchor(0).is_some());
    assert!(email_column.anchor(0).is_some());

    let calls = store.calls();
    assert!(calls.iter().any(|c| c.starts_with("link_user a@x.com")));
}

#[tokio::test(flavor = "current_thread")]
async fn linked_edit_writes_through_to_the_user() {
    let mut catalogs = Catalogs::new();
    catalogs.users.push(UserProfile::new("a@x.com"));
    let (mut session, store) = session_with(catalogs);
    session.refresh_catalogs().await.unwrap();

    let group = session.create_group("G").await.unwrap();
    let table = session.create_table(group, "T").await.unwrap().unwrap();
    let first = session
        .create_column(table, "First Name", ColumnKind::Value)
        .await
        .unwrap()
        .unwrap();
    let email = session
        .create_column(table, "Email", ColumnKind::Value)
        .await
        .unwrap()
        .unwrap();
    session.append_row(table).await.unwrap();
    session.edit_cell(table, email, 0, "a@x.com").await.unwrap();
    session.link_user_row(table, 0).await.unwrap();

    session.edit_cell(table, first, 0, "Jordan").await.unwrap();

    assert_eq!(session.catalogs().users[0].first, "Jordan");
    assert!(store.calls().iter().any(|c| c == "update_user a@x.com"));
}

#[tokio::test(flavor = "current_thread")]
async fn linked_edit_against_unknown_user_surfaces_an_error() {
    let mut catalogs = Catalogs::new();
    catalogs.users.push(UserProfile::new("a@x.com"));
    let (mut session, _store) = session_with(catalogs);
    session.refresh_catalogs().await.unwrap();

    let group = session.create_group("G").await.unwrap();
    let table = session.create_table(group, "T").await.unwrap().unwrap();
    let first = session
        .create_column(table, "First Name", ColumnKind::Value)
        .await
        .unwrap()
        .unwrap();
    let email = session
        .create_column(table, "Email", ColumnKind::Value)
        .await
        .unwrap()
        .unwrap();
    session.append_row(table).await.unwrap();
    session.edit_cell(table, email, 0, "a@x.com").await.unwrap();
    session.link_user_row(table, 0).await.unwrap();

    // The user disappears from the catalogs (stale cache).
    let empty = Catalogs::new();
    let mut session = BoardSession::with_state(
        Arc::new(MemoryStore::with_catalogs(empty.clone())),
        session.board().clone(),
        empty,
    );

    let result = session.edit_cell(table, first, 0, "Jordan").await;
    assert!(matches!(result, Err(Error::Link(_))));
    // The failed edit left the cell untouched.
    assert_eq!(session.board().column(table, first).unwrap().value(0), Some(""));
}

#[tokio::test(flavor = "current_thread")]
async fn table_drag_across_groups_renumbers_both_parents() {
    let (mut session, store) = session_with(Catalogs::new());

    let group_a = session.create_group("A").await.unwrap();
    let group_b = session.create_group("B").await.unwrap();
    let moved = session.create_table(group_a, "A0").await.unwrap().unwrap();
    session.create_table(group_a, "A1").await.unwrap().unwrap();
    let target = session.create_table(group_b, "B0").await.unwrap().unwrap();

    let changed = session
        .apply_drag(
            DragPayload::Table { id: moved },
            DropTarget::Table(target),
            ClosestEdge::Bottom,
        )
        .await
        .unwrap();
    assert!(changed);

    let board = session.board();
    let a_tables = &board.group(group_a).unwrap().tables;
    let b_tables = &board.group(group_b).unwrap().tables;
    assert_eq!(a_tables.len(), 1);
    assert_eq!(a_tables[0].order, 0);
    assert_eq!(b_tables.len(), 2);
    assert_eq!(b_tables[1].id, moved);
    assert_eq!(b_tables[1].order, 1);
    assert_eq!(b_tables[1].group_id, group_b);

    // One reorder call per affected parent.
    let reorders = store
        .calls()
        .iter()
        .filter(|c| c.starts_with("reorder_tables"))
        .count();
    assert_eq!(reorders, 2);
}

#[tokio::test(flavor = "current_thread")]
async fn tag_sort_reprojects_every_column_with_blanks_last() {
    let mut catalogs = Catalogs::new();
    let t1 = Tag::new("t1");
    let t2 = Tag::new("t2");
    let (id1, id2) = (t1.id, t2.id);
    catalogs.tags = vec![t1, t2];
    let (mut session, _store) = session_with(catalogs);
    session.refresh_catalogs().await.unwrap();

    let group = session.create_group("G").await.unwrap();
    let table = session.create_table(group, "T").await.unwrap().unwrap();
    let tags = session
        .create_column(table, "Tags", ColumnKind::Tag)
        .await
        .unwrap()
        .unwrap();
    let names = session
        .create_column(table, "Name", ColumnKind::Value)
        .await
        .unwrap()
        .unwrap();
    for _ in 0..3 {
        session.append_row(table).await.unwrap();
    }
    let both = format!("{id1},{id2}");
    session.edit_cell(table, tags, 0, &id1.to_string()).await.unwrap();
    session.edit_cell(table, tags, 1, &both).await.unwrap();
    session.edit_cell(table, names, 0, "one-tag").await.unwrap();
    session.edit_cell(table, names, 1, "two-tags").await.unwrap();
    session.edit_cell(table, names, 2, "blank-tags").await.unwrap();

    let changed = session
        .sort_table(table, tags, SortDirection::Asc)
        .await
        .unwrap();
    assert!(changed);

    let board = session.board();
    let tag_column = board.column(table, tags).unwrap();
    let name_column = board.column(table, names).unwrap();
    // Two tags sort before one; the blank cell lands last, its row intact.
    assert_eq!(tag_column.values, vec![both, id1.to_string(), String::new()]);
    assert_eq!(name_column.values, vec!["two-tags", "one-tag", "blank-tags"]);
}

#[tokio::test(flavor = "current_thread")]
async fn choice_rename_rewrites_cells_through_the_session() {
    let (mut session, store) = session_with(Catalogs::new());

    let group = session.create_group("G").await.unwrap();
    let table = session.create_table(group, "T").await.unwrap().unwrap();
    let status = session
        .create_column(table, "Status", ColumnKind::Choice)
        .await
        .unwrap()
        .unwrap();
    session.add_choice(table, status, "Red", None).await.unwrap();
    session.add_choice(table, status, "Blue", None).await.unwrap();
    for _ in 0..2 {
        session.append_row(table).await.unwrap();
    }
    session.edit_cell(table, status, 0, "Red").await.unwrap();
    session.edit_cell(table, status, 1, "Blue").await.unwrap();

    let color_id = session.board().column(table, status).unwrap().colors[0].id;
    session
        .rename_choice(table, status, color_id, "Scarlet")
        .await
        .unwrap();

    let column = session.board().column(table, status).unwrap();
    assert_eq!(column.values, vec!["Scarlet", "Blue"]);
    assert_eq!(column.choices, vec!["Scarlet", "Blue"]);
    assert!(store.calls().iter().any(|c| c == "update_choice Scarlet"));
}

#[tokio::test(flavor = "current_thread")]
async fn persistence_failure_keeps_the_optimistic_state() {
    let (mut session, store) = session_with(Catalogs::new());

    let group_a = session.create_group("A").await.unwrap();
    let group_b = session.create_group("B").await.unwrap();

    store.set_offline(true);
    let result = session
        .apply_drag(
            DragPayload::Group { id: group_a },
            DropTarget::Group(group_b),
            ClosestEdge::Bottom,
        )
        .await;
    assert!(matches!(result, Err(Error::Store(_))));

    // Best-effort semantics: the local reorder stands even though the
    // store rejected it.
    let names: Vec<&str> = session
        .board()
        .groups
        .iter()
        .map(|g| g.name.as_str())
        .collect();
    assert_eq!(names, vec!["B", "A"]);
}
