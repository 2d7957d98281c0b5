//! Board session orchestration
//!
//! Applies every operation optimistically to the in-memory board, then
//! issues the matching persistence call. A store failure leaves the local
//! state in place (best-effort semantics): it is logged, surfaced to the
//! caller, and left to the surrounding application to reconcile.

use std::sync::Arc;

use log::debug;
use log::warn;
use uuid::Uuid;

use crate::catalog::Catalogs;
use crate::choice;
use crate::error::Error;
use crate::error::LinkError;
use crate::link::EntityUpdate;
use crate::link::FieldResolver;
use crate::link::RowIdentity;
use crate::link::sync_cell;
use crate::link::unlink;
use crate::model::Board;
use crate::model::ColumnKind;
use crate::model::LinkAnchor;
use crate::model::TableColumn;
use crate::model::TableGroup;
use crate::reorder::ClosestEdge;
use crate::reorder::DragPayload;
use crate::reorder::TableDropTarget;
use crate::reorder::reorder_columns;
use crate::reorder::reorder_groups;
use crate::reorder::reorder_rows;
use crate::reorder::reorder_tables;
use crate::sort;
use crate::sort::SortDirection;
use crate::store::BoardStore;

/// What a drag landed on, matched against the payload kind.
///
/// Mismatched payload/target combinations are no-ops.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropTarget {
    /// A group: a sibling for group drags, a container for table drags.
    Group(Uuid),
    /// A sibling table.
    Table(Uuid),
    /// A sibling column.
    Column(Uuid),
    /// A sibling row index.
    Row(usize),
}

/// An editing session over one board.
///
/// Holds the board, the cached entity catalogs, the field resolver, and the
/// persistence collaborator. All mutation goes through collection-level
/// replacement, so reads during a pending store call see a consistent
/// snapshot.
pub struct BoardSession {
    board: Board,
    catalogs: Catalogs,
    resolver: FieldResolver,
    store: Arc<dyn BoardStore>,
}

impl BoardSession {
    /// Creates an empty session over the given store.
    pub fn new(store: Arc<dyn BoardStore>) -> Self {
        Self {
            board: Board::new(),
            catalogs: Catalogs::new(),
            resolver: FieldResolver::new(),
            store,
        }
    }

    /// Creates a session over existing board state and catalogs.
    pub fn with_state(store: Arc<dyn BoardStore>, board: Board, catalogs: Catalogs) -> Self {
        Self {
            board,
            catalogs,
            resolver: FieldResolver::new(),
            store,
        }
    }

    /// Returns the current board snapshot.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the cached entity catalogs.
    pub fn catalogs(&self) -> &Catalogs {
        &self.catalogs
    }

    /// Replaces the resolver's rule set.
    pub fn set_resolver(&mut self, resolver: FieldResolver) {
        self.resolver = resolver;
    }

    /// Refetches the entity catalogs from the store.
    pub async fn refresh_catalogs(&mut self) -> Result<(), Error> {
        self.catalogs = self.store.fetch_catalogs().await?;
        Ok(())
    }

    // =========================================================================
    // Group / table / column lifecycle
    // =========================================================================

    /// Creates a group locally, persists it, and swaps in the permanent id.
    ///
    /// On store failure the group stays in its temporary state.
    pub async fn create_group(&mut self, name: impl Into<String>) -> Result<Uuid, Error> {
        let mut group = TableGroup::new(name);
        group.order = self.board.groups.len() as u32;
        let temp_id = group.id;
        self.board.groups.push(group.clone());
        match self.store.create_group(&group).await {
            Ok(id) => {
                if let Some(group) = self.board.group_mut(temp_id) {
                    group.confirm(id);
                }
                Ok(id)
            }
            Err(err) => {
                warn!("group '{}' not persisted: {err}", group.name);
                Err(err.into())
            }
        }
    }

    /// Deletes a group and every table it owns.
    ///
    /// Returns `false` without a store call when the group is unknown.
    pub async fn delete_group(&mut self, group_id: Uuid) -> Result<bool, Error> {
        if !self.board.remove_group(group_id) {
            return Ok(false);
        }
        if let Err(err) = self.store.delete_group(group_id).await {
            warn!("group delete not persisted: {err}");
            return Err(err.into());
        }
        Ok(true)
    }

    /// Creates a table in a group; `None` when the group is unknown.
    pub async fn create_table(
        &mut self,
        group_id: Uuid,
        name: impl Into<String>,
    ) -> Result<Option<Uuid>, Error> {
        let Some(group) = self.board.group_mut(group_id) else {
            return Ok(None);
        };
        let temp_id = group.push_table(name);
        let table = group.table(temp_id).cloned();
        let Some(table) = table else {
            return Ok(None);
        };
        match self.store.create_table(&table).await {
            Ok(id) => {
                self.board.confirm_table(temp_id, id);
                Ok(Some(id))
            }
            Err(err) => {
                warn!("table '{}' not persisted: {err}", table.name);
                Err(err.into())
            }
        }
    }

    /// Deletes a table; `false` when it is unknown.
    pub async fn delete_table(&mut self, table_id: Uuid) -> Result<bool, Error> {
        let removed = self
            .board
            .groups
            .iter_mut()
            .any(|group| group.remove_table(table_id));
        if !removed {
            return Ok(false);
        }
        if let Err(err) = self.store.delete_table(table_id).await {
            warn!("table delete not persisted: {err}");
            return Err(err.into());
        }
        Ok(true)
    }

    /// Creates a column in a table; `None` when the table is unknown.
    pub async fn create_column(
        &mut self,
        table_id: Uuid,
        header: impl Into<String>,
        kind: ColumnKind,
    ) -> Result<Option<Uuid>, Error> {
        let Some(table) = self.board.table_mut(table_id) else {
            return Ok(None);
        };
        let temp_id = table.push_column(header, kind);
        let column = table.column(temp_id).cloned();
        let Some(column) = column else {
            return Ok(None);
        };
        match self.store.create_column(&column).await {
            Ok(id) => {
                self.board.confirm_column(table_id, temp_id, id);
                Ok(Some(id))
            }
            Err(err) => {
                warn!("column '{}' not persisted: {err}", column.header);
                Err(err.into())
            }
        }
    }

    /// Deletes a column and renumbers its siblings; `false` when unknown.
    pub async fn delete_column(&mut self, table_id: Uuid, column_id: Uuid) -> Result<bool, Error> {
        let removed = self
            .board
            .table_mut(table_id)
            .is_some_and(|table| table.remove_column(column_id));
        if !removed {
            return Ok(false);
        }
        if let Err(err) = self.store.delete_column(column_id).await {
            warn!("column delete not persisted: {err}");
            return Err(err.into());
        }
        Ok(true)
    }

    // =========================================================================
    // Rows
    // =========================================================================

    /// Appends a blank row to every column of a table.
    pub async fn append_row(&mut self, table_id: Uuid) -> Result<bool, Error> {
        let Some(table) = self.board.table_mut(table_id) else {
            return Ok(false);
        };
        table.append_row();
        if let Err(err) = self.store.append_row(table_id).await {
            warn!("row append not persisted: {err}");
            return Err(err.into());
        }
        Ok(true)
    }

    /// Deletes the row at `row` from every column of a table.
    pub async fn delete_row(&mut self, table_id: Uuid, row: usize) -> Result<bool, Error> {
        let Some(table) = self.board.table_mut(table_id) else {
            return Ok(false);
        };
        if row >= table.row_count() {
            return Ok(false);
        }
        table.remove_row(row);
        if let Err(err) = self.store.delete_row(table_id, row).await {
            warn!("row delete not persisted: {err}");
            return Err(err.into());
        }
        Ok(true)
    }

    // =========================================================================
    // Drag reorder
    // =========================================================================

    /// Applies a drag: computes the new ordering, swaps it in, persists the
    /// diff once per affected parent.
    ///
    /// Returns `Ok(false)` for unresolvable drops (self-drop, unknown
    /// target, mismatched payload/target kinds); state is untouched.
    pub async fn apply_drag(
        &mut self,
        payload: DragPayload,
        target: DropTarget,
        edge: ClosestEdge,
    ) -> Result<bool, Error> {
        match (payload, target) {
            (DragPayload::Group { id }, DropTarget::Group(target_id)) => {
                let Some(groups) = reorder_groups(&self.board.groups, id, target_id, edge) else {
                    return Ok(false);
                };
                self.board.set_groups(groups);
                debug!("groups reordered around {target_id}");
                if let Err(err) = self.store.reorder_groups(&self.board.groups).await {
                    warn!("group reorder not persisted: {err}");
                    return Err(err.into());
                }
                Ok(true)
            }
            (DragPayload::Table { id }, DropTarget::Table(target_id)) => {
                self.move_table(id, TableDropTarget::Table(target_id), edge)
                    .await
            }
            (DragPayload::Table { id }, DropTarget::Group(group_id)) => {
                self.move_table(id, TableDropTarget::Group(group_id), edge)
                    .await
            }
            (DragPayload::Column { id, table_id }, DropTarget::Column(target_id)) => {
                let Some(table) = self.board.table(table_id) else {
                    return Ok(false);
                };
                let Some(columns) = reorder_columns(table, id, target_id, edge) else {
                    return Ok(false);
                };
                self.replace_columns(table_id, columns).await
            }
            (DragPayload::Row { table_id, index }, DropTarget::Row(target_index)) => {
                let Some(table) = self.board.table(table_id) else {
                    return Ok(false);
                };
                let Some(columns) = reorder_rows(table, index, target_index, edge) else {
                    return Ok(false);
                };
                self.replace_columns(table_id, columns).await
            }
            _ => Ok(false),
        }
    }

    async fn move_table(
        &mut self,
        source: Uuid,
        target: TableDropTarget,
        edge: ClosestEdge,
    ) -> Result<bool, Error> {
        let Some(moved) = reorder_tables(&self.board, source, target, edge) else {
            return Ok(false);
        };
        if let Some((group_id, tables)) = &moved.source_group {
            self.board.set_tables(*group_id, tables.clone());
        }
        let (target_group, target_tables) = &moved.target_group;
        self.board.set_tables(*target_group, target_tables.clone());
        debug!("table {source} moved into group {target_group}");

        if let Some((group_id, tables)) = &moved.source_group {
            if let Err(err) = self.store.reorder_tables(*group_id, tables).await {
                warn!("table reorder not persisted for source group: {err}");
                return Err(err.into());
            }
        }
        if let Err(err) = self.store.reorder_tables(*target_group, target_tables).await {
            warn!("table reorder not persisted for target group: {err}");
            return Err(err.into());
        }
        Ok(true)
    }

    async fn replace_columns(
        &mut self,
        table_id: Uuid,
        columns: Vec<TableColumn>,
    ) -> Result<bool, Error> {
        self.board.set_columns(table_id, columns.clone());
        for column in &columns {
            if let Err(err) = self.store.update_column(column).await {
                warn!("column '{}' not persisted: {err}", column.header);
                return Err(err.into());
            }
        }
        Ok(true)
    }

    // =========================================================================
    // Sorting
    // =========================================================================

    /// Sorts one column and re-projects every column to the new row order.
    ///
    /// Returns `Ok(false)` when the re-projection reports "no change".
    pub async fn sort_table(
        &mut self,
        table_id: Uuid,
        column_id: Uuid,
        direction: SortDirection,
    ) -> Result<bool, Error> {
        let Some(table) = self.board.table(table_id) else {
            return Ok(false);
        };
        let Some(columns) = sort::sort_table(table, column_id, direction, &self.catalogs) else {
            return Ok(false);
        };
        self.replace_columns(table_id, columns).await
    }

    // =========================================================================
    // Cell edits and linking
    // =========================================================================

    /// Writes a cell, synchronizing the bound entity when the cell is
    /// linked.
    ///
    /// Validation and resolution failures surface before any state change.
    pub async fn edit_cell(
        &mut self,
        table_id: Uuid,
        column_id: Uuid,
        row: usize,
        text: &str,
    ) -> Result<bool, Error> {
        let Some(column) = self.board.column(table_id, column_id) else {
            return Ok(false);
        };
        if row >= column.row_count() {
            return Err(LinkError::RowOutOfRange {
                row,
                rows: column.row_count(),
            }
            .into());
        }
        let update = sync_cell(column, row, text, &self.catalogs)?;

        let mut edited = column.clone();
        edited.values[row] = text.to_string();
        if let Some(slot) = self.board.table_mut(table_id).and_then(|t| t.column_mut(column_id)) {
            *slot = edited.clone();
        }

        match update {
            Some(EntityUpdate::User(user)) => {
                if let Err(err) = self.store.update_user(&user).await {
                    warn!("user '{}' not persisted: {err}", user.email);
                    return Err(err.into());
                }
                self.catalogs.replace_user(user);
            }
            Some(EntityUpdate::Participant(participant)) => {
                if let Err(err) = self.store.update_participant(&participant).await {
                    warn!("participant {} not persisted: {err}", participant.id);
                    return Err(err.into());
                }
                self.catalogs.replace_participant(participant);
            }
            None => {}
        }

        if let Err(err) = self.store.update_column(&edited).await {
            warn!("column '{}' not persisted: {err}", edited.header);
            return Err(err.into());
        }
        Ok(true)
    }

    /// Classifies a row; when it is linkable to a user, proposes bindings,
    /// anchors them locally, and persists the link.
    ///
    /// The store's returned columns replace the local copies.
    pub async fn link_user_row(
        &mut self,
        table_id: Uuid,
        row: usize,
    ) -> Result<RowIdentity, Error> {
        let Some(table) = self.board.table(table_id) else {
            return Ok(RowIdentity::None);
        };
        if row >= table.row_count() {
            return Ok(RowIdentity::None);
        }
        let identity = self.resolver.detect_entity(table, row, &self.catalogs);
        let RowIdentity::Unlinked(email) = &identity else {
            return Ok(identity);
        };
        let email = email.clone();

        let proposed = self.resolver.propose_links(table, row, &identity);
        let mut columns = table.columns.clone();
        for link in &proposed.user {
            if let Some(column) = columns.iter_mut().find(|c| c.id == link.column_id) {
                column.links[row] = Some(LinkAnchor::user(email.clone(), link.field));
            }
        }
        self.board.set_columns(table_id, columns);
        debug!("row {row} linked to user {email}");

        match self
            .store
            .link_user(table_id, row, &email, &proposed.user)
            .await
        {
            Ok(returned) => {
                // An empty returned set keeps the optimistic local columns.
                if !returned.is_empty() {
                    self.board.set_columns(table_id, returned);
                }
                Ok(identity)
            }
            Err(err) => {
                warn!("user link not persisted: {err}");
                Err(err.into())
            }
        }
    }

    /// Proposes participant bindings for a row and links them to the given
    /// participant.
    pub async fn link_participant_row(
        &mut self,
        table_id: Uuid,
        row: usize,
        participant_id: Uuid,
    ) -> Result<bool, Error> {
        if self.catalogs.participant_by_id(participant_id).is_none() {
            return Err(LinkError::UnknownParticipant { id: participant_id }.into());
        }
        let Some(table) = self.board.table(table_id) else {
            return Ok(false);
        };
        if row >= table.row_count() {
            return Ok(false);
        }
        let identity = self.resolver.detect_entity(table, row, &self.catalogs);
        let proposed = self.resolver.propose_links(table, row, &identity);
        if proposed.participant.is_empty() {
            return Ok(false);
        }

        let mut columns = table.columns.clone();
        for link in &proposed.participant {
            if let Some(column) = columns.iter_mut().find(|c| c.id == link.column_id) {
                column.links[row] = Some(LinkAnchor::participant(participant_id, link.field));
            }
        }
        self.board.set_columns(table_id, columns);
        debug!("row {row} linked to participant {participant_id}");

        match self
            .store
            .link_participant(table_id, row, participant_id, &proposed.participant)
            .await
        {
            Ok(returned) => {
                if !returned.is_empty() {
                    self.board.set_columns(table_id, returned);
                }
                Ok(true)
            }
            Err(err) => {
                warn!("participant link not persisted: {err}");
                Err(err.into())
            }
        }
    }

    /// Removes a cell's anchor without altering its displayed value.
    pub async fn unlink_cell(
        &mut self,
        table_id: Uuid,
        column_id: Uuid,
        row: usize,
    ) -> Result<bool, Error> {
        let Some(column) = self.board.column(table_id, column_id) else {
            return Ok(false);
        };
        let Some(updated) = unlink(column, row) else {
            return Ok(false);
        };
        if let Some(slot) = self.board.table_mut(table_id).and_then(|t| t.column_mut(column_id)) {
            *slot = updated.clone();
        }
        if let Err(err) = self.store.update_column(&updated).await {
            warn!("unlink not persisted: {err}");
            return Err(err.into());
        }
        Ok(true)
    }

    // =========================================================================
    // Choices
    // =========================================================================

    /// Adds a choice to a choice column.
    pub async fn add_choice(
        &mut self,
        table_id: Uuid,
        column_id: Uuid,
        value: &str,
        color: Option<(&str, &str)>,
    ) -> Result<bool, Error> {
        let Some(column) = self.board.column(table_id, column_id) else {
            return Ok(false);
        };
        let updated = choice::add_choice(column, value, color)?;
        let created = updated.colors.last().cloned();
        self.swap_column(table_id, column_id, updated);

        if let Some(created) = created {
            if let Err(err) = self.store.create_choice(column_id, value, &created).await {
                warn!("choice '{value}' not persisted: {err}");
                return Err(err.into());
            }
        }
        Ok(true)
    }

    /// Renames a choice, rewriting every matching cell.
    pub async fn rename_choice(
        &mut self,
        table_id: Uuid,
        column_id: Uuid,
        color_id: Uuid,
        new_value: &str,
    ) -> Result<bool, Error> {
        let Some(column) = self.board.column(table_id, column_id) else {
            return Ok(false);
        };
        let updated = choice::rename_choice(column, color_id, new_value)?;
        self.swap_column(table_id, column_id, updated.clone());

        if let Err(err) = self
            .store
            .update_choice(column_id, color_id, new_value)
            .await
        {
            warn!("choice rename not persisted: {err}");
            return Err(err.into());
        }
        if let Err(err) = self.store.update_column(&updated).await {
            warn!("rewritten cells not persisted: {err}");
            return Err(err.into());
        }
        Ok(true)
    }

    /// Deletes a choice, blanking every matching cell.
    pub async fn delete_choice(
        &mut self,
        table_id: Uuid,
        column_id: Uuid,
        color_id: Uuid,
    ) -> Result<bool, Error> {
        let Some(column) = self.board.column(table_id, column_id) else {
            return Ok(false);
        };
        let updated = choice::delete_choice(column, color_id)?;
        self.swap_column(table_id, column_id, updated.clone());

        if let Err(err) = self.store.delete_choice(column_id, color_id).await {
            warn!("choice delete not persisted: {err}");
            return Err(err.into());
        }
        if let Err(err) = self.store.update_column(&updated).await {
            warn!("blanked cells not persisted: {err}");
            return Err(err.into());
        }
        Ok(true)
    }

    fn swap_column(&mut self, table_id: Uuid, column_id: Uuid, column: TableColumn) {
        if let Some(slot) = self.board.table_mut(table_id).and_then(|t| t.column_mut(column_id)) {
            *slot = column;
        }
    }
}

// Session behavior is exercised end to end in tests/board_flow.rs against
// an in-memory store double.
