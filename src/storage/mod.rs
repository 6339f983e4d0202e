//! Storage layer for the in-memory catalog.
//!
//! Records live in a single keyed store with a revision counter that moves on
//! every mutation; the view layer uses the revision to know when a cached
//! projection is stale.
//!
//! # Modules
//!
//! - `store`: Keyed record store with insert, bulk replace, and partial update

pub mod store;

pub use store::RecordStore;
