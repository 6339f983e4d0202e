//! Actions representing side effects to be executed by the grid runtime.
//!
//! The event handler never performs I/O itself. When an event needs the
//! outside world it returns an [`Action`], and
//! [`GridController`](crate::app::GridController) executes it and feeds the
//! outcome back in as a new event.
//!
//! # Example
//!
//! ```rust
//! use catalog_grid::app::{handle_event, Action, Event, GridState};
//! use catalog_grid::view::ViewParams;
//!
//! let mut state = GridState::new(ViewParams::default());
//! let (_, actions) = handle_event(&mut state, &Event::Start);
//! assert_eq!(actions, vec![Action::FetchCatalog]);
//! ```

/// Commands produced by the event handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Fetch the catalog from the configured source and load it into the
    /// store. Answered with `CatalogLoaded` or `CatalogFailed`.
    FetchCatalog,
}
