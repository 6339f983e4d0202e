//! View parameters controlling pagination and ordering.
//!
//! [`ViewParams`] is only changed through the validating `with_*` builders, so a
//! rejected value never replaces the last valid parameters.

use crate::domain::error::{GridError, Result};
use crate::domain::record::Column;
use std::fmt;
use std::str::FromStr;

/// Page size used when nothing else is configured.
pub const DEFAULT_PAGE_SIZE: usize = 5;

/// Page sizes offered by the rows-per-page selector.
pub const PAGE_SIZE_OPTIONS: [usize; 4] = [5, 6, 10, 25];

/// Column the grid is ordered by.
pub type SortKey = Column;

/// Ordering direction within the displayed page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    #[must_use]
    pub const fn reversed(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ascending => "ascending",
            Self::Descending => "descending",
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortDirection {
    type Err = GridError;

    /// Accepts `ascending`/`asc`/`a-z` and `descending`/`desc`/`z-a`.
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ascending" | "asc" | "a-z" => Ok(Self::Ascending),
            "descending" | "desc" | "z-a" => Ok(Self::Descending),
            other => Err(GridError::InvalidViewParameter(format!(
                "unknown sort direction: {other:?}"
            ))),
        }
    }
}

/// Pagination and sort state of the grid.
///
/// `page_index` is stored as requested; the projection clamps it against the
/// current record count.
///
/// # Examples
///
/// ```
/// use catalog_grid::view::{SortDirection, ViewParams};
/// use catalog_grid::domain::Column;
///
/// let params = ViewParams::default();
/// assert_eq!(params.page_size(), 5);
/// assert_eq!(params.sort_key(), Column::Title);
/// assert_eq!(params.sort_direction(), SortDirection::Ascending);
///
/// assert!(params.with_page_size(0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ViewParams {
    page_index: usize,
    page_size: usize,
    sort_key: SortKey,
    sort_direction: SortDirection,
}

impl Default for ViewParams {
    fn default() -> Self {
        Self {
            page_index: 0,
            page_size: DEFAULT_PAGE_SIZE,
            sort_key: Column::Title,
            sort_direction: SortDirection::Ascending,
        }
    }
}

impl ViewParams {
    /// Creates parameters starting on the first page.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::InvalidViewParameter`] if `page_size` is zero.
    pub fn new(page_size: usize, sort_key: SortKey, sort_direction: SortDirection) -> Result<Self> {
        Self::default()
            .with_page_size(page_size)
            .map(|p| p.with_sort(sort_key, sort_direction))
    }

    #[must_use]
    pub const fn page_index(&self) -> usize {
        self.page_index
    }

    #[must_use]
    pub const fn page_size(&self) -> usize {
        self.page_size
    }

    #[must_use]
    pub const fn sort_key(&self) -> SortKey {
        self.sort_key
    }

    #[must_use]
    pub const fn sort_direction(&self) -> SortDirection {
        self.sort_direction
    }

    #[must_use]
    pub const fn with_page_index(self, page_index: usize) -> Self {
        Self { page_index, ..self }
    }

    /// Returns a copy with a new page size.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::InvalidViewParameter`] if `page_size` is zero.
    pub fn with_page_size(self, page_size: usize) -> Result<Self> {
        if page_size == 0 {
            return Err(GridError::InvalidViewParameter(
                "page size must be positive".to_string(),
            ));
        }
        Ok(Self { page_size, ..self })
    }

    #[must_use]
    pub const fn with_sort(self, sort_key: SortKey, sort_direction: SortDirection) -> Self {
        Self {
            sort_key,
            sort_direction,
            ..self
        }
    }

    /// Header-click behavior: the active key toggles from ascending to
    /// descending, anything else sorts by `key` ascending.
    #[must_use]
    pub fn toggled_sort(self, key: SortKey) -> Self {
        let direction = if self.sort_key == key && self.sort_direction == SortDirection::Ascending {
            SortDirection::Descending
        } else {
            SortDirection::Ascending
        };
        self.with_sort(key, direction)
    }
}
