//! Read model handed to the rendering layer.
//!
//! View models are computed from `GridState::compute_viewmodel()` after every
//! state change and carry no behavior, only display-ready data: the displayed
//! rows, the view parameters, the edit session and the total record count.

use crate::app::state::GridStatus;
use crate::domain::record::{Column, Record, RecordPatch};
use crate::session::EditSession;
use crate::view::{SortDirection, ViewParams};

/// Complete read model of the grid.
#[derive(Debug, Clone, PartialEq)]
pub struct GridViewModel {
    /// Displayed rows, already paginated and sorted.
    pub rows: Vec<DisplayRow>,

    /// Parameters as last set by the user.
    pub params: ViewParams,

    /// Page actually shown (clamped against the record count).
    pub page_index: usize,

    /// Number of pages; zero when the store is empty.
    pub page_count: usize,

    /// Number of records in the store.
    pub total_count: usize,

    /// Choices for the rows-per-page selector.
    pub page_size_options: Vec<usize>,

    /// Edit session snapshot.
    pub edit: EditSession,

    /// Load progress and last recovered error.
    pub status: GridStatus,

    /// Column headers and sort caption.
    pub header: HeaderInfo,
}

impl GridViewModel {
    /// Ids of the displayed rows, in display order.
    #[must_use]
    pub fn row_ids(&self) -> Vec<u64> {
        self.rows.iter().map(|r| r.record.id.0).collect()
    }
}

/// One displayed row.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayRow {
    pub record: Record,

    /// Whether this row is the target of the open draft.
    pub is_editing: bool,

    /// Draft values when `is_editing`.
    pub draft: Option<RecordPatch>,
}

/// Header information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderInfo {
    /// Sort description, e.g. "Current Sort: Ascending by title".
    pub caption: String,

    pub columns: Vec<ColumnHeader>,
}

/// One column header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnHeader {
    pub column: Column,
    pub label: String,

    /// Direction indicator when this column is the sort key.
    pub sort: Option<SortDirection>,
}
