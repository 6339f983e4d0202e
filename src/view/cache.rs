//! Single-entry memo for the current projection.

use super::params::ViewParams;
use super::projection::{project, Projection};
use crate::storage::RecordStore;

/// Remembers the last projection together with the store identity
/// (generation and revision) and view parameters it was computed from.
///
/// Any store mutation bumps the revision and any other store instance has a
/// different generation, so a cached projection is never served for a store
/// state it was not computed against.
#[derive(Debug, Clone, Default)]
pub struct ProjectionCache {
    entry: Option<(StoreStamp, ViewParams, Projection)>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct StoreStamp {
    generation: u64,
    revision: u64,
}

impl ProjectionCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the projection for `store` under `params`, recomputing it if
    /// either changed since the last call.
    pub fn get_or_compute(&mut self, store: &RecordStore, params: &ViewParams) -> &Projection {
        let stamp = StoreStamp {
            generation: store.generation(),
            revision: store.revision(),
        };
        let fresh = matches!(&self.entry, Some((s, p, _)) if *s == stamp && p == params);

        if !fresh {
            self.entry = None;
        }

        let (_, _, projection) = self.entry.get_or_insert_with(|| {
            tracing::trace!(
                generation = stamp.generation,
                revision = stamp.revision,
                "projection cache miss"
            );
            (stamp, *params, project(store.records(), params))
        });
        projection
    }

    /// Drops the cached projection.
    pub fn invalidate(&mut self) {
        self.entry = None;
    }

    #[must_use]
    pub const fn is_cached(&self) -> bool {
        self.entry.is_some()
    }
}
