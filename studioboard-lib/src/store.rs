//! Persistence collaborator contract
//!
//! The engine applies optimistic local updates synchronously and issues
//! these calls afterwards; implementations live outside the core (the
//! managed backend client). Payloads are the in-memory model types.

use async_trait::async_trait;
use uuid::Uuid;

use crate::catalog::Catalogs;
use crate::catalog::Participant;
use crate::catalog::UserProfile;
use crate::error::StoreError;
use crate::link::FieldLink;
use crate::model::ChoiceColor;
use crate::model::ParticipantField;
use crate::model::Table;
use crate::model::TableColumn;
use crate::model::TableGroup;
use crate::model::UserField;

/// Asynchronous persistence operations for board state.
///
/// Reorder payloads are the fully renumbered collections of each affected
/// parent, one call per parent. Create calls return the persisted id that
/// replaces the temporary client-side one.
#[async_trait]
pub trait BoardStore: Send + Sync {
    /// Persists a newly created group, returning its permanent id.
    async fn create_group(&self, group: &TableGroup) -> Result<Uuid, StoreError>;

    /// Deletes a group and every table it owns.
    async fn delete_group(&self, group_id: Uuid) -> Result<(), StoreError>;

    /// Persists the renumbered group ordering.
    async fn reorder_groups(&self, groups: &[TableGroup]) -> Result<(), StoreError>;

    /// Persists a newly created table, returning its permanent id.
    async fn create_table(&self, table: &Table) -> Result<Uuid, StoreError>;

    /// Deletes a table.
    async fn delete_table(&self, table_id: Uuid) -> Result<(), StoreError>;

    /// Persists one group's renumbered table list.
    async fn reorder_tables(&self, group_id: Uuid, tables: &[Table]) -> Result<(), StoreError>;

    /// Persists a newly created column, returning its permanent id.
    async fn create_column(&self, column: &TableColumn) -> Result<Uuid, StoreError>;

    /// Persists a column's current state (values, links, order, choices).
    async fn update_column(&self, column: &TableColumn) -> Result<(), StoreError>;

    /// Deletes a column.
    async fn delete_column(&self, column_id: Uuid) -> Result<(), StoreError>;

    /// Appends a blank row to every column of the table.
    async fn append_row(&self, table_id: Uuid) -> Result<(), StoreError>;

    /// Deletes the row at `row` from every column of the table.
    async fn delete_row(&self, table_id: Uuid, row: usize) -> Result<(), StoreError>;

    /// Persists a new choice and its color entry.
    async fn create_choice(
        &self,
        column_id: Uuid,
        value: &str,
        color: &ChoiceColor,
    ) -> Result<(), StoreError>;

    /// Persists a choice rename (cells are rewritten via `update_column`).
    async fn update_choice(
        &self,
        column_id: Uuid,
        color_id: Uuid,
        value: &str,
    ) -> Result<(), StoreError>;

    /// Persists a choice deletion.
    async fn delete_choice(&self, column_id: Uuid, color_id: Uuid) -> Result<(), StoreError>;

    /// Persists user field links for a row; the returned columns replace
    /// the local copies.
    async fn link_user(
        &self,
        table_id: Uuid,
        row: usize,
        email: &str,
        links: &[FieldLink<UserField>],
    ) -> Result<Vec<TableColumn>, StoreError>;

    /// Persists participant field links for a row; the returned columns
    /// replace the local copies.
    async fn link_participant(
        &self,
        table_id: Uuid,
        row: usize,
        participant_id: Uuid,
        links: &[FieldLink<ParticipantField>],
    ) -> Result<Vec<TableColumn>, StoreError>;

    /// Persists an updated user profile.
    async fn update_user(&self, user: &UserProfile) -> Result<(), StoreError>;

    /// Persists an updated participant.
    async fn update_participant(&self, participant: &Participant) -> Result<(), StoreError>;

    /// Fetches the read-only entity catalogs.
    async fn fetch_catalogs(&self) -> Result<Catalogs, StoreError>;
}
