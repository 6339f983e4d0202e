//! Application state container and read-model computation.
//!
//! [`GridState`] is the single owned state object of a grid session. It holds
//! the record store, the view parameters, the edit session and the status
//! shown to the user. Nothing else mutates the store; components receive it by
//! reference.
//!
//! # State Components
//!
//! - **Store**: authoritative records in canonical order
//! - **Params**: page index, page size, sort key and direction
//! - **Edit**: the at-most-one open draft
//! - **Status**: load progress plus the last recovered error
//!
//! # Example
//!
//! ```rust
//! use catalog_grid::app::GridState;
//! use catalog_grid::domain::Record;
//! use catalog_grid::view::ViewParams;
//!
//! let mut state = GridState::new(ViewParams::default());
//! state.store.replace_all(vec![Record::new(1, "Phone", 10.0, "", "")])?;
//! let vm = state.compute_viewmodel();
//! assert_eq!(vm.total_count, 1);
//! # Ok::<(), catalog_grid::GridError>(())
//! ```

use crate::domain::error::{ErrorKind, GridError};
use crate::domain::record::{Column, RecordId};
use crate::session::EditSession;
use crate::storage::RecordStore;
use crate::ui::viewmodel::{ColumnHeader, DisplayRow, GridViewModel, HeaderInfo};
use crate::view::{Projection, ProjectionCache, SortDirection, ViewParams, PAGE_SIZE_OPTIONS};

/// Progress of the one-shot catalog load.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LoadStatus {
    /// The load has not been requested yet.
    #[default]
    NotStarted,
    /// The fetch is in flight.
    Loading,
    /// The store holds the fetched catalog.
    Ready {
        /// Number of records received.
        count: usize,
    },
    /// The fetch failed; the grid stays empty.
    Failed {
        /// Human-readable reason.
        message: String,
    },
}

/// A recovered error, kept for display until the next successful action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: ErrorKind,
    pub message: String,
}

impl From<&GridError> for Notice {
    fn from(error: &GridError) -> Self {
        Self {
            kind: error.kind(),
            message: error.to_string(),
        }
    }
}

/// Observable status of the session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GridStatus {
    pub load: LoadStatus,

    /// Last error recovered by the event handler.
    pub notice: Option<Notice>,

    /// Record whose draft was dropped because it vanished before commit.
    ///
    /// Cleared when a new edit begins.
    pub dropped_edit: Option<RecordId>,
}

/// Central state of one grid session.
#[derive(Debug, Clone, Default)]
pub struct GridState {
    /// Authoritative record collection.
    pub store: RecordStore,

    /// Current pagination and sort parameters.
    pub params: ViewParams,

    /// Open edit draft, if any.
    pub edit: EditSession,

    /// Load progress and last recovered error.
    pub status: GridStatus,

    cache: ProjectionCache,
}

impl GridState {
    /// Creates an empty session with the given starting parameters.
    #[must_use]
    pub fn new(params: ViewParams) -> Self {
        Self {
            params,
            ..Self::default()
        }
    }

    /// Returns the projection for the current store and parameters.
    ///
    /// Memoized until the store or the parameters change.
    pub fn projection(&mut self) -> &Projection {
        self.cache.get_or_compute(&self.store, &self.params)
    }

    /// Records a recovered error on the status.
    pub fn record_error(&mut self, error: &GridError) {
        tracing::debug!(kind = ?error.kind(), error = %error, "error recovered");
        self.status.notice = Some(Notice::from(error));
    }

    pub fn clear_notice(&mut self) {
        self.status.notice = None;
    }

    /// Computes the read model handed to the rendering layer.
    ///
    /// Contains the displayed rows, the view parameters, the edit session, the
    /// total record count and the status.
    pub fn compute_viewmodel(&mut self) -> GridViewModel {
        let projection = self.projection().clone();
        let editing = self.edit.target_id();
        let draft = self.edit.draft().cloned();

        let rows = projection
            .rows
            .into_iter()
            .map(|record| {
                let is_editing = editing == Some(record.id);
                DisplayRow {
                    draft: if is_editing { draft.clone() } else { None },
                    is_editing,
                    record,
                }
            })
            .collect();

        GridViewModel {
            rows,
            params: self.params,
            page_index: projection.page_index,
            page_count: projection.page_count,
            total_count: projection.total_count,
            page_size_options: PAGE_SIZE_OPTIONS.to_vec(),
            edit: self.edit.clone(),
            status: self.status.clone(),
            header: self.compute_header(),
        }
    }

    fn compute_header(&self) -> HeaderInfo {
        let direction = match self.params.sort_direction() {
            SortDirection::Ascending => "Ascending",
            SortDirection::Descending => "Descending",
        };

        HeaderInfo {
            caption: format!("Current Sort: {direction} by {}", self.params.sort_key()),
            columns: Column::ALL
                .iter()
                .map(|&column| ColumnHeader {
                    column,
                    label: column.label().to_string(),
                    sort: (column == self.params.sort_key()).then_some(self.params.sort_direction()),
                })
                .collect(),
        }
    }
}
