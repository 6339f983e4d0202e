//! Edit session controller.
//!
//! Stages draft changes for a single record and commits them atomically into
//! the [`RecordStore`](crate::storage::RecordStore).

pub mod edit;

pub use edit::EditSession;
