//! Catalog source abstraction and payload schema.
//!
//! The grid only needs "give me the records" from the outside world. The
//! [`CatalogSource`] trait captures that so the HTTP implementation can be
//! swapped for an in-memory one in tests or offline runs.

use crate::domain::error::{GridError, Result};
use crate::domain::record::{Record, RecordId};
use async_trait::async_trait;
use serde::Deserialize;

/// Something that can produce the initial record collection.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Fetches the full catalog.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::SourceUnavailable`] if the source cannot be reached
    /// or its response does not match the record schema.
    async fn fetch(&self) -> Result<Vec<Record>>;

    /// Short description used in logs.
    fn describe(&self) -> String;
}

/// Top-level response body: `{ "products": [ ... ] }`.
#[derive(Debug, Deserialize)]
struct CatalogResponse {
    products: Vec<ProductPayload>,
}

/// One product as sent by the source. Fields beyond these five are ignored.
///
/// Some catalog entries carry no brand or category; those are shown blank.
#[derive(Debug, Deserialize)]
struct ProductPayload {
    id: u64,
    title: String,
    price: f64,
    #[serde(default)]
    category: String,
    #[serde(default)]
    brand: String,
}

impl From<ProductPayload> for Record {
    fn from(p: ProductPayload) -> Self {
        Self {
            id: RecordId(p.id),
            title: p.title,
            price: p.price,
            category: p.category,
            brand: p.brand,
        }
    }
}

/// Parses a catalog response body into records, keeping source order.
///
/// # Errors
///
/// Returns [`GridError::SourceUnavailable`] if the body is not valid JSON or
/// does not match the expected shape.
///
/// # Examples
///
/// ```
/// use catalog_grid::sync::parse_catalog;
///
/// let body = br#"{"products":[{"id":1,"title":"Phone","price":9.5,"rating":4.2}],"total":1}"#;
/// let records = parse_catalog(body)?;
/// assert_eq!(records[0].title, "Phone");
/// assert_eq!(records[0].brand, "");
/// # Ok::<(), catalog_grid::GridError>(())
/// ```
pub fn parse_catalog(body: &[u8]) -> Result<Vec<Record>> {
    let response: CatalogResponse = serde_json::from_slice(body)
        .map_err(|e| GridError::SourceUnavailable(format!("malformed catalog response: {e}")))?;

    Ok(response.products.into_iter().map(Record::from).collect())
}

/// Source serving a fixed record list.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalogSource {
    records: Vec<Record>,
}

impl StaticCatalogSource {
    #[must_use]
    pub const fn new(records: Vec<Record>) -> Self {
        Self { records }
    }
}

#[async_trait]
impl CatalogSource for StaticCatalogSource {
    async fn fetch(&self) -> Result<Vec<Record>> {
        Ok(self.records.clone())
    }

    fn describe(&self) -> String {
        format!("static({} records)", self.records.len())
    }
}
