//! Sync adapter: one-shot load of the catalog into the record store.
//!
//! # Modules
//!
//! - [`source`]: [`CatalogSource`] trait, payload schema, static source
//! - [`http`]: `reqwest`-backed source for the remote catalog
//! - [`loader`]: [`load`], fetch-then-replace with error mapping

pub mod http;
pub mod loader;
pub mod source;

pub use http::{HttpCatalogSource, DEFAULT_SOURCE_URL, DEFAULT_TIMEOUT_SECS};
pub use loader::load;
pub use source::{parse_catalog, CatalogSource, StaticCatalogSource};
