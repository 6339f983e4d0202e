//! One-shot initial load from a catalog source into the store.

use super::source::CatalogSource;
use crate::domain::error::{GridError, Result};
use crate::storage::RecordStore;
use tracing::Instrument;

/// Fetches the catalog from `source` and replaces the store contents with it.
///
/// Returns the number of records loaded.
///
/// # Errors
///
/// Every failure is reported as [`GridError::SourceUnavailable`]: transport
/// errors, schema mismatches, and collections with duplicate ids. The store is
/// left unchanged on failure.
///
/// # Examples
///
/// ```
/// use catalog_grid::domain::Record;
/// use catalog_grid::storage::RecordStore;
/// use catalog_grid::sync::{load, StaticCatalogSource};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> catalog_grid::Result<()> {
/// let source = StaticCatalogSource::new(vec![Record::new(1, "Phone", 10.0, "", "")]);
/// let mut store = RecordStore::new();
///
/// assert_eq!(load(&source, &mut store).await?, 1);
/// # Ok(())
/// # }
/// ```
pub async fn load(source: &dyn CatalogSource, store: &mut RecordStore) -> Result<usize> {
    let span = tracing::debug_span!("catalog_load", source = %source.describe());

    async move {
        let records = source.fetch().await.map_err(|e| {
            tracing::warn!(error = %e, "catalog fetch failed");
            match e {
                GridError::SourceUnavailable(_) => e,
                other => GridError::SourceUnavailable(other.to_string()),
            }
        })?;

        let count = records.len();
        store.replace_all(records).map_err(|e| {
            GridError::SourceUnavailable(format!("catalog rejected: {e}"))
        })?;

        tracing::info!(count, "catalog loaded");
        Ok(count)
    }
    .instrument(span)
    .await
}
