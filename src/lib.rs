//! catalog-grid: a paginated, sortable, inline-editable product catalog grid.
//!
//! The crate keeps an in-memory catalog of product records and exposes:
//! - A keyed record store with insert and partial update
//! - A pure view projection (paginate, then sort the visible page)
//! - A single-record edit session with draft, commit, and cancel
//! - A one-shot asynchronous catalog load from an HTTP JSON source
//! - A read model published to the rendering layer after every change

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Demo binary (main.rs)                              │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← State owner
//! │  - Event handling                                   │
//! │  - Action execution (GridController)                │
//! │  - Read model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ View (view/)  │   │ Storage       │   │ Sync (sync/)  │
//! │ - Params      │   │ (storage/)    │   │ - HTTP source │
//! │ - Projection  │   │ - RecordStore │   │ - Loader      │
//! │ - Cache       │   │               │   │               │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!         │                    │                    │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain Layer (domain/) + Session (session/)        │
//! │  - Record, Column, RecordPatch                      │
//! │  - Error types                                      │
//! │  - EditSession                                      │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`app`]: Event/action model and the [`GridController`] runtime
//! - [`domain`]: Core domain types (Record, Column, errors)
//! - [`storage`]: Keyed in-memory record store
//! - [`view`]: View parameters and the projection engine
//! - [`session`]: Inline edit state machine
//! - [`sync`]: Catalog sources and the initial load
//! - [`ui`]: Read model and plain-text rendering
//! - [`observability`]: Tracing subscriber setup
//!
//! # Configuration
//!
//! Configuration comes from a TOML file or a string map:
//!
//! ```toml
//! source_url = "https://dummyjson.com/products"
//! page_size = 10
//! sort_key = "price"
//! sort_direction = "desc"
//! request_timeout_secs = 5
//! trace_level = "debug"
//! ```
//!
//! # Example
//!
//! ```rust
//! use catalog_grid::app::{handle_event, Event};
//! use catalog_grid::domain::{Column, Record};
//! use catalog_grid::{initialize, Config};
//!
//! let mut state = initialize(&Config::default());
//! let _ = handle_event(&mut state, &Event::InsertRecord(Record::new(1, "B", 10.0, "", "")));
//! let _ = handle_event(&mut state, &Event::InsertRecord(Record::new(2, "A", 5.0, "", "")));
//!
//! let view = state.compute_viewmodel();
//! assert_eq!(view.row_ids(), vec![2, 1]);
//!
//! let _ = handle_event(&mut state, &Event::RequestSort(Column::Title));
//! assert_eq!(state.compute_viewmodel().row_ids(), vec![1, 2]);
//! ```

pub mod app;
pub mod domain;
pub mod observability;
pub mod session;
pub mod storage;
pub mod sync;
pub mod ui;
pub mod view;

pub use app::{handle_event, Action, Event, GridController, GridState};
pub use domain::{Column, GridError, Record, RecordId, Result};
pub use view::{SortDirection, ViewParams};

use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;
use sync::{HttpCatalogSource, DEFAULT_SOURCE_URL, DEFAULT_TIMEOUT_SECS};
use view::DEFAULT_PAGE_SIZE;

/// Runtime configuration.
///
/// Values are parsed with fallback defaults: a key that is missing or does
/// not parse keeps its default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Catalog endpoint. Default: [`DEFAULT_SOURCE_URL`]
    pub source_url: String,

    /// Rows per page. Must be positive. Default: 5
    pub page_size: usize,

    /// Initial sort column. Default: `title`
    pub sort_key: Column,

    /// Initial sort direction. Default: ascending
    pub sort_direction: SortDirection,

    /// Timeout for the catalog request. Default: 10
    pub request_timeout_secs: u64,

    /// Tracing filter directive.
    ///
    /// Options: `trace`, `debug`, `info`, `warn`, `error`. `RUST_LOG` takes
    /// precedence. Default: `"info"`
    pub trace_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_url: DEFAULT_SOURCE_URL.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            sort_key: Column::Title,
            sort_direction: SortDirection::Ascending,
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
            trace_level: None,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    source_url: Option<String>,
    page_size: Option<usize>,
    sort_key: Option<String>,
    sort_direction: Option<String>,
    request_timeout_secs: Option<u64>,
    trace_level: Option<String>,
}

impl Config {
    /// Parses configuration from a string map.
    ///
    /// # Parsing Rules
    ///
    /// - `source_url`: non-empty string
    /// - `page_size`: positive integer (falls back to 5)
    /// - `sort_key`: `title`, `price`, `category` or `brand`
    /// - `sort_direction`: `asc`/`desc` (also `a-z`/`z-a`)
    /// - `request_timeout_secs`: positive integer (falls back to 10)
    /// - `trace_level`: any filter directive
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use catalog_grid::{Column, Config, SortDirection};
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("page_size".to_string(), "10".to_string());
    /// map.insert("sort_key".to_string(), "price".to_string());
    /// map.insert("sort_direction".to_string(), "z-a".to_string());
    ///
    /// let config = Config::from_map(&map);
    /// assert_eq!(config.page_size, 10);
    /// assert_eq!(config.sort_key, Column::Price);
    /// assert_eq!(config.sort_direction, SortDirection::Descending);
    /// ```
    #[must_use]
    pub fn from_map(config: &BTreeMap<String, String>) -> Self {
        let file = FileConfig {
            source_url: config.get("source_url").cloned(),
            page_size: config.get("page_size").and_then(|s| s.trim().parse().ok()),
            sort_key: config.get("sort_key").cloned(),
            sort_direction: config.get("sort_direction").cloned(),
            request_timeout_secs: config
                .get("request_timeout_secs")
                .and_then(|s| s.trim().parse().ok()),
            trace_level: config.get("trace_level").cloned(),
        };
        Self::resolve(file)
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// - [`GridError::Io`] if the file cannot be read
    /// - [`GridError::Config`] if it is not valid TOML or has unknown keys
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let file: FileConfig = toml::from_str(&contents)
            .map_err(|e| GridError::Config(format!("{}: {e}", path.display())))?;
        Ok(Self::resolve(file))
    }

    fn resolve(file: FileConfig) -> Self {
        let defaults = Self::default();

        let source_url = file
            .source_url
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or(defaults.source_url);

        let page_size = file.page_size.filter(|&n| n > 0).unwrap_or(defaults.page_size);

        let sort_key = file
            .sort_key
            .and_then(|s| {
                s.parse::<Column>()
                    .map_err(|e| tracing::debug!(error = %e, "ignoring sort_key"))
                    .ok()
            })
            .unwrap_or(defaults.sort_key);

        let sort_direction = file
            .sort_direction
            .and_then(|s| {
                s.parse::<SortDirection>()
                    .map_err(|e| tracing::debug!(error = %e, "ignoring sort_direction"))
                    .ok()
            })
            .unwrap_or(defaults.sort_direction);

        let request_timeout_secs = file
            .request_timeout_secs
            .filter(|&n| n > 0)
            .unwrap_or(defaults.request_timeout_secs);

        Self {
            source_url,
            page_size,
            sort_key,
            sort_direction,
            request_timeout_secs,
            trace_level: file.trace_level.filter(|s| !s.trim().is_empty()),
        }
    }

    /// Initial view parameters.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::InvalidViewParameter`] if `page_size` is zero.
    pub fn view_params(&self) -> Result<ViewParams> {
        ViewParams::new(self.page_size, self.sort_key, self.sort_direction)
    }

    /// HTTP catalog source for `source_url`.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::Config`] if the HTTP client cannot be built.
    pub fn source(&self) -> Result<HttpCatalogSource> {
        HttpCatalogSource::new(
            self.source_url.clone(),
            Duration::from_secs(self.request_timeout_secs),
        )
    }
}

/// Creates the initial grid state: empty store, Idle edit session, and the
/// configured view parameters.
///
/// Invalid view parameters fall back to the defaults.
///
/// # Example
///
/// ```rust
/// use catalog_grid::{initialize, Config};
///
/// let config = Config {
///     page_size: 10,
///     ..Default::default()
/// };
///
/// let state = initialize(&config);
/// assert_eq!(state.params.page_size(), 10);
/// assert!(state.store.is_empty());
/// ```
pub fn initialize(config: &Config) -> GridState {
    let _span = tracing::debug_span!("initialize", page_size = config.page_size).entered();

    let params = config.view_params().unwrap_or_else(|e| {
        tracing::debug!(error = %e, "invalid view parameters, using defaults");
        ViewParams::default()
    });

    tracing::debug!(
        sort_key = %params.sort_key(),
        sort_direction = %params.sort_direction(),
        "initializing catalog grid"
    );

    GridState::new(params)
}
