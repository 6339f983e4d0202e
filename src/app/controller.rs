//! Grid runtime: owns the state, executes actions, publishes the read model.
//!
//! [`GridController`] is the explicit owner of a [`GridState`]. Events are
//! processed one at a time through [`handle_event`]; actions are executed here
//! and their outcomes re-enter as events. After each event that changed
//! something the read model is recomputed and sent on a `watch` channel, which
//! is how the rendering layer learns about changes.
//!
//! # Lifecycle
//!
//! ```text
//! initialize(config) → GridController::new → start() → dispatch(..)* → shutdown()
//! ```

use crate::app::handler::{handle_event, Event};
use crate::app::state::GridState;
use crate::app::Action;
use crate::sync::{self, CatalogSource};
use crate::ui::viewmodel::GridViewModel;
use std::collections::VecDeque;
use tokio::sync::watch;

/// Owner of one grid session.
///
/// # Example
///
/// ```rust
/// use catalog_grid::app::{GridController, GridState};
/// use catalog_grid::domain::Record;
/// use catalog_grid::sync::StaticCatalogSource;
/// use catalog_grid::view::ViewParams;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let source = StaticCatalogSource::new(vec![
///     Record::new(1, "B", 10.0, "", ""),
///     Record::new(2, "A", 5.0, "", ""),
/// ]);
/// let mut grid = GridController::new(GridState::new(ViewParams::default()), Box::new(source));
/// let view = grid.subscribe();
///
/// grid.start().await;
/// assert_eq!(view.borrow().row_ids(), vec![2, 1]);
/// # }
/// ```
pub struct GridController {
    state: GridState,
    source: Box<dyn CatalogSource>,
    queue: VecDeque<Event>,
    publisher: watch::Sender<GridViewModel>,
}

impl GridController {
    /// Takes ownership of `state` and publishes its initial read model.
    pub fn new(mut state: GridState, source: Box<dyn CatalogSource>) -> Self {
        let (publisher, _) = watch::channel(state.compute_viewmodel());
        tracing::debug!(source = %source.describe(), "grid controller created");
        Self {
            state,
            source,
            queue: VecDeque::new(),
            publisher,
        }
    }

    /// Returns a receiver that always holds the latest read model.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<GridViewModel> {
        self.publisher.subscribe()
    }

    /// Performs the one-shot catalog load.
    ///
    /// Completes once the load succeeded or failed; either outcome is on the
    /// read model's status.
    pub async fn start(&mut self) {
        self.dispatch(Event::Start).await;
    }

    /// Processes `event` and every event produced by its actions.
    ///
    /// Returns `true` if a new read model was published.
    pub async fn dispatch(&mut self, event: Event) -> bool {
        self.queue.push_back(event);
        let mut published = false;

        while let Some(event) = self.queue.pop_front() {
            let (changed, actions) = handle_event(&mut self.state, &event);

            for action in actions {
                self.execute(action).await;
            }

            if changed {
                self.publish();
                published = true;
            }
        }

        published
    }

    /// Current read model.
    pub fn view(&mut self) -> GridViewModel {
        self.state.compute_viewmodel()
    }

    #[must_use]
    pub const fn state(&self) -> &GridState {
        &self.state
    }

    /// Ends the session: discards any open draft and returns the final state.
    ///
    /// Subscribers see the channel close once the controller is dropped.
    pub fn shutdown(mut self) -> GridState {
        if let Some(id) = self.state.edit.cancel() {
            tracing::debug!(id = %id, "discarding open draft on shutdown");
            self.publish();
        }
        tracing::debug!(records = self.state.store.len(), "grid controller shut down");
        self.state
    }

    async fn execute(&mut self, action: Action) {
        match action {
            Action::FetchCatalog => {
                let outcome = sync::load(self.source.as_ref(), &mut self.state.store).await;
                let event = match outcome {
                    Ok(count) => Event::CatalogLoaded { count },
                    Err(e) => Event::CatalogFailed {
                        message: e.to_string(),
                    },
                };
                self.queue.push_back(event);
            }
        }
    }

    fn publish(&mut self) {
        let vm = self.state.compute_viewmodel();
        tracing::trace!(
            rows = vm.rows.len(),
            total = vm.total_count,
            receivers = self.publisher.receiver_count(),
            "publishing read model"
        );
        self.publisher.send_replace(vm);
    }
}
