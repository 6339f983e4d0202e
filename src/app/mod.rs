//! Application layer coordinating state, events, and actions.
//!
//! Sits between the caller (a UI shell or the demo binary) and the components.
//! It follows a unidirectional data flow:
//!
//! ```text
//! User gesture → Event → handle_event → State mutation → Actions → Side effects
//!                           ↑                                        ↓
//!                           └────────── CatalogLoaded / Failed ──────┘
//!
//! State mutation → compute_viewmodel → watch channel → renderer
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`controller`]: Runtime owning the state and executing actions
//! - [`handler`]: Event processing and error recovery
//! - [`state`]: Central state container and read-model computation

pub mod actions;
pub mod controller;
pub mod handler;
pub mod state;

pub use actions::Action;
pub use controller::GridController;
pub use handler::{handle_event, Event};
pub use state::{GridState, GridStatus, LoadStatus, Notice};
