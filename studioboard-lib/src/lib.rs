//! Dynamic linked-table engine
//!
//! The administrative core behind the studio's table builder: table groups
//! own tables, tables own typed columns, and rows are virtual (the tuple
//! of values at a shared index across a table's columns). On top of the
//! model sit the drag-reorder engine, the type-aware sorter and row
//! re-projector, the heuristic field-linking resolver and synchronizer,
//! and the choice/color registry. Persistence and entity catalogs are
//! external collaborators reached through [`store::BoardStore`].

pub mod catalog;
pub mod choice;
pub mod error;
pub mod link;
pub mod model;
pub mod reorder;
pub mod sort;
pub mod store;

mod session;

pub use session::*;
