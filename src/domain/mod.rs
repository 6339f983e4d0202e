//! Domain layer for the catalog grid.
//!
//! Core types shared by every component, independent of the HTTP source and of
//! the rendering layer.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`record`]: Record model, columns and partial updates
//!
//! # Examples
//!
//! ```
//! use catalog_grid::domain::{Record, RecordPatch, Result};
//!
//! fn rename(record: &mut Record) -> Result<()> {
//!     let mut patch = RecordPatch::default();
//!     patch.set(catalog_grid::domain::Column::Title, "Renamed")?;
//!     patch.apply_to(record);
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod record;

pub use error::{ErrorKind, GridError, Result};
pub use record::{Column, Record, RecordId, RecordPatch};
