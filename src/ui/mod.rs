//! Rendering boundary.
//!
//! The grid core hands the rendering layer a read model after every state
//! change; rendering is a pure function of that model.
//!
//! ```text
//! GridState → compute_viewmodel → GridViewModel → render_table → text
//! ```
//!
//! # Modules
//!
//! - [`viewmodel`]: Read model types
//! - [`table`]: Plain-text table renderer

pub mod table;
pub mod viewmodel;

pub use table::render_table;
pub use viewmodel::{ColumnHeader, DisplayRow, GridViewModel, HeaderInfo};
