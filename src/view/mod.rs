//! View projection engine.
//!
//! Derives the displayed page from the record store and the current
//! [`ViewParams`]. The projection itself is a pure function; [`ProjectionCache`]
//! adds a one-entry memo keyed by store revision and parameters.
//!
//! # Modules
//!
//! - [`params`]: Page and sort parameters with validation
//! - [`projection`]: Paginate-then-sort projection and the row comparator
//! - [`cache`]: Memoized projection invalidated by store mutations

pub mod cache;
pub mod params;
pub mod projection;

pub use cache::ProjectionCache;
pub use params::{SortDirection, SortKey, ViewParams, DEFAULT_PAGE_SIZE, PAGE_SIZE_OPTIONS};
pub use projection::{compare, project, sort_slice, Projection};
