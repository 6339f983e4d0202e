//! Event handling and state transition logic.
//!
//! [`handle_event`] is the single place where user gestures and load outcomes
//! turn into state changes. Component errors are recovered here: they become a
//! [`Notice`](crate::app::state::Notice) on the status and never reach the
//! rendering layer as failures, and never leave the store or view parameters
//! half-updated.
//!
//! # Event Types
//!
//! - **Lifecycle**: `Start`, `CatalogLoaded`, `CatalogFailed`
//! - **Pagination**: `SetPage`, `NextPage`, `PreviousPage`, `SetPageSize`
//! - **Sorting**: `RequestSort`, `SetSortKey`, `SetSortKeyByName`, `SetSortDirection`
//! - **Editing**: `BeginEdit`, `EditField`, `SaveEdit`, `CancelEdit`
//! - **Records**: `AddRecord`, `InsertRecord`
//!
//! # Example
//!
//! ```rust
//! use catalog_grid::app::{handle_event, Event, GridState};
//! use catalog_grid::view::ViewParams;
//!
//! let mut state = GridState::new(ViewParams::default());
//! let (changed, _) = handle_event(&mut state, &Event::SetPageSize(0));
//! assert!(changed);
//! assert_eq!(state.params.page_size(), 5);
//! assert!(state.status.notice.is_some());
//! ```

use crate::app::state::{GridState, LoadStatus};
use crate::app::Action;
use crate::domain::error::{GridError, Result};
use crate::domain::record::{Column, Record, RecordId};
use crate::view::{SortDirection, SortKey, ViewParams};

/// Events triggered by user gestures or by the outcome of an action.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Session start; requests the one-shot catalog load.
    Start,

    /// The catalog was loaded into the store.
    CatalogLoaded {
        /// Number of records loaded.
        count: usize,
    },

    /// The catalog could not be loaded.
    CatalogFailed {
        /// Reason reported by the sync adapter.
        message: String,
    },

    /// Jumps to a page (clamped by the projection).
    SetPage(usize),
    /// Moves one page forward from the displayed page.
    NextPage,
    /// Moves one page back from the displayed page.
    PreviousPage,
    /// Changes the rows per page; zero is rejected.
    SetPageSize(usize),

    /// Header click: toggles direction on the active key, otherwise sorts
    /// ascending by the clicked key.
    RequestSort(SortKey),
    /// Sets the sort key, keeping the direction.
    SetSortKey(SortKey),
    /// Sets the sort key from its name; unknown names are rejected.
    SetSortKeyByName(String),
    /// Sets the sort direction, keeping the key.
    SetSortDirection(SortDirection),

    /// Opens a draft for a record.
    BeginEdit(RecordId),
    /// Changes one draft field.
    EditField {
        field: Column,
        value: String,
    },
    /// Commits the draft into the store.
    SaveEdit,
    /// Discards the draft.
    CancelEdit,

    /// Appends a placeholder record with a time-based id.
    AddRecord,
    /// Appends a caller-provided record.
    InsertRecord(Record),
}

impl Event {
    /// Whether the event comes from a user gesture rather than a load outcome.
    const fn is_user_gesture(&self) -> bool {
        !matches!(
            self,
            Self::Start | Self::CatalogLoaded { .. } | Self::CatalogFailed { .. }
        )
    }
}

/// Processes an event, mutates state, and returns actions to execute.
///
/// Returns `(changed, actions)`: `changed` tells the runtime whether the read
/// model must be recomputed and republished.
///
/// Errors from the components are recovered here and recorded on
/// `state.status.notice`; a successful user gesture clears the previous notice.
#[must_use]
pub fn handle_event(state: &mut GridState, event: &Event) -> (bool, Vec<Action>) {
    let _span = tracing::debug_span!("handle_event", event_type = ?event).entered();

    match apply(state, event) {
        Ok(outcome) => {
            if event.is_user_gesture() && outcome.0 {
                state.clear_notice();
            }
            outcome
        }
        Err(e) => {
            state.record_error(&e);
            (true, vec![])
        }
    }
}

#[allow(clippy::too_many_lines)]
fn apply(state: &mut GridState, event: &Event) -> Result<(bool, Vec<Action>)> {
    match event {
        Event::Start => {
            if state.status.load != LoadStatus::NotStarted {
                tracing::debug!(load = ?state.status.load, "load already requested, ignoring");
                return Ok((false, vec![]));
            }
            state.status.load = LoadStatus::Loading;
            Ok((true, vec![Action::FetchCatalog]))
        }
        Event::CatalogLoaded { count } => {
            tracing::debug!(count, "catalog ready");
            state.status.load = LoadStatus::Ready { count: *count };
            Ok((true, vec![]))
        }
        Event::CatalogFailed { message } => {
            state.status.load = LoadStatus::Failed {
                message: message.clone(),
            };
            Err(GridError::SourceUnavailable(message.clone()))
        }
        Event::SetPage(page_index) => {
            let params = state.params.with_page_index(*page_index);
            set_params(state, params);
            Ok((true, vec![]))
        }
        Event::NextPage => {
            let projection = state.projection();
            let last = projection.page_count.saturating_sub(1);
            let next = (projection.page_index + 1).min(last);
            let params = state.params.with_page_index(next);
            set_params(state, params);
            Ok((true, vec![]))
        }
        Event::PreviousPage => {
            let previous = state.projection().page_index.saturating_sub(1);
            let params = state.params.with_page_index(previous);
            set_params(state, params);
            Ok((true, vec![]))
        }
        Event::SetPageSize(page_size) => {
            let params = state.params.with_page_size(*page_size)?;
            set_params(state, params);
            Ok((true, vec![]))
        }
        Event::RequestSort(key) => {
            let params = state.params.toggled_sort(*key);
            set_params(state, params);
            Ok((true, vec![]))
        }
        Event::SetSortKey(key) => {
            let params = state.params.with_sort(*key, state.params.sort_direction());
            set_params(state, params);
            Ok((true, vec![]))
        }
        Event::SetSortKeyByName(name) => {
            let key: SortKey = name.parse()?;
            let params = state.params.with_sort(key, state.params.sort_direction());
            set_params(state, params);
            Ok((true, vec![]))
        }
        Event::SetSortDirection(direction) => {
            let params = state.params.with_sort(state.params.sort_key(), *direction);
            set_params(state, params);
            Ok((true, vec![]))
        }
        Event::BeginEdit(id) => {
            let record = state
                .store
                .get(*id)
                .cloned()
                .ok_or(GridError::RecordNotFound(*id))?;
            state.edit.begin_edit(&record)?;
            state.status.dropped_edit = None;
            Ok((true, vec![]))
        }
        Event::EditField { field, value } => {
            state.edit.update_draft_field(*field, value)?;
            Ok((true, vec![]))
        }
        Event::SaveEdit => {
            let target = state.edit.target_id();
            match state.edit.commit(&mut state.store) {
                Ok(record) => {
                    tracing::debug!(id = %record.id, "edit saved");
                    Ok((true, vec![]))
                }
                Err(e @ GridError::RecordNotFound(_)) => {
                    state.status.dropped_edit = target;
                    Err(e)
                }
                Err(e) => Err(e),
            }
        }
        Event::CancelEdit => {
            let cancelled = state.edit.cancel();
            Ok((cancelled.is_some(), vec![]))
        }
        Event::AddRecord => {
            let record = Record::placeholder(time_based_id());
            tracing::debug!(id = %record.id, "adding placeholder record");
            state.store.insert(record)?;
            Ok((true, vec![]))
        }
        Event::InsertRecord(record) => {
            state.store.insert(record.clone())?;
            Ok((true, vec![]))
        }
    }
}

fn set_params(state: &mut GridState, params: ViewParams) {
    tracing::debug!(
        page_index = params.page_index(),
        page_size = params.page_size(),
        sort_key = %params.sort_key(),
        sort_direction = %params.sort_direction(),
        "view parameters changed"
    );
    state.params = params;
}

/// Id for records created in the grid: the current time in milliseconds.
fn time_based_id() -> RecordId {
    let millis = chrono::Utc::now().timestamp_millis();
    RecordId(u64::try_from(millis).unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorKind;

    fn loaded_state(records: Vec<Record>) -> GridState {
        let mut state = GridState::new(ViewParams::default());
        let count = records.len();
        state.store.replace_all(records).unwrap();
        let _ = handle_event(&mut state, &Event::CatalogLoaded { count });
        state
    }

    fn numbered(count: u64) -> Vec<Record> {
        (1..=count)
            .map(|id| Record::new(id, format!("item {id:02}"), id as f64, "", ""))
            .collect()
    }

    #[test]
    fn start_requests_fetch_once() {
        let mut state = GridState::new(ViewParams::default());

        let (changed, actions) = handle_event(&mut state, &Event::Start);
        assert!(changed);
        assert_eq!(actions, vec![Action::FetchCatalog]);
        assert_eq!(state.status.load, LoadStatus::Loading);

        let (changed, actions) = handle_event(&mut state, &Event::Start);
        assert!(!changed);
        assert!(actions.is_empty());
    }

    #[test]
    fn failed_load_is_observable() {
        let mut state = GridState::new(ViewParams::default());
        let _ = handle_event(&mut state, &Event::Start);
        let _ = handle_event(
            &mut state,
            &Event::CatalogFailed {
                message: "dns error".to_string(),
            },
        );

        assert!(matches!(state.status.load, LoadStatus::Failed { .. }));
        assert_eq!(
            state.status.notice.as_ref().map(|n| n.kind),
            Some(ErrorKind::SourceUnavailable)
        );
        assert!(state.store.is_empty());
    }

    #[test]
    fn invalid_page_size_keeps_prior_params() {
        let mut state = loaded_state(numbered(12));
        let _ = handle_event(&mut state, &Event::SetPageSize(10));
        let _ = handle_event(&mut state, &Event::SetPageSize(0));

        assert_eq!(state.params.page_size(), 10);
        assert_eq!(
            state.status.notice.as_ref().map(|n| n.kind),
            Some(ErrorKind::InvalidViewParameter)
        );
    }

    #[test]
    fn unknown_sort_key_keeps_prior_params() {
        let mut state = loaded_state(numbered(3));
        let _ = handle_event(&mut state, &Event::SetSortKey(Column::Brand));
        let _ = handle_event(&mut state, &Event::SetSortKeyByName("rating".to_string()));

        assert_eq!(state.params.sort_key(), Column::Brand);
        assert_eq!(
            state.status.notice.as_ref().map(|n| n.kind),
            Some(ErrorKind::InvalidViewParameter)
        );

        let _ = handle_event(&mut state, &Event::SetSortKeyByName("Price".to_string()));
        assert_eq!(state.params.sort_key(), Column::Price);
        assert!(state.status.notice.is_none());
    }

    #[test]
    fn next_page_stops_at_last_page() {
        let mut state = loaded_state(numbered(12));
        for _ in 0..5 {
            let _ = handle_event(&mut state, &Event::NextPage);
        }
        assert_eq!(state.params.page_index(), 2);
        assert_eq!(state.compute_viewmodel().row_ids(), vec![11, 12]);

        let _ = handle_event(&mut state, &Event::PreviousPage);
        assert_eq!(state.params.page_index(), 1);
    }

    #[test]
    fn previous_page_starts_from_clamped_page() {
        let mut state = loaded_state(numbered(7));
        let _ = handle_event(&mut state, &Event::SetPage(9));
        let _ = handle_event(&mut state, &Event::PreviousPage);
        assert_eq!(state.params.page_index(), 0);
    }

    #[test]
    fn request_sort_toggles_direction() {
        let mut state = loaded_state(numbered(3));
        let _ = handle_event(&mut state, &Event::RequestSort(Column::Title));
        assert_eq!(state.params.sort_direction(), SortDirection::Descending);
        assert_eq!(state.compute_viewmodel().row_ids(), vec![3, 2, 1]);

        let _ = handle_event(&mut state, &Event::RequestSort(Column::Price));
        assert_eq!(state.params.sort_key(), Column::Price);
        assert_eq!(state.params.sort_direction(), SortDirection::Ascending);
    }

    #[test]
    fn edit_flow_commits_draft() {
        let mut state = loaded_state(numbered(2));
        let _ = handle_event(&mut state, &Event::BeginEdit(RecordId(2)));
        let _ = handle_event(
            &mut state,
            &Event::EditField {
                field: Column::Price,
                value: "42".to_string(),
            },
        );
        let (changed, _) = handle_event(&mut state, &Event::SaveEdit);

        assert!(changed);
        assert!(!state.edit.is_editing());
        assert_eq!(state.store.get(RecordId(2)).map(|r| r.price), Some(42.0));
        assert!(state.status.notice.is_none());
    }

    #[test]
    fn begin_edit_while_editing_is_rejected() {
        let mut state = loaded_state(numbered(2));
        let _ = handle_event(&mut state, &Event::BeginEdit(RecordId(1)));
        let _ = handle_event(&mut state, &Event::BeginEdit(RecordId(2)));

        assert_eq!(state.edit.target_id(), Some(RecordId(1)));
        assert_eq!(
            state.status.notice.as_ref().map(|n| n.kind),
            Some(ErrorKind::EditInProgress)
        );
    }

    #[test]
    fn begin_edit_on_missing_record_reports_not_found() {
        let mut state = loaded_state(numbered(1));
        let _ = handle_event(&mut state, &Event::BeginEdit(RecordId(50)));
        assert!(!state.edit.is_editing());
        assert_eq!(
            state.status.notice.as_ref().map(|n| n.kind),
            Some(ErrorKind::RecordNotFound)
        );
    }

    #[test]
    fn save_for_vanished_record_flags_dropped_edit() {
        let mut state = loaded_state(numbered(2));
        let _ = handle_event(&mut state, &Event::BeginEdit(RecordId(2)));
        state.store.replace_all(numbered(1)).unwrap();

        let _ = handle_event(&mut state, &Event::SaveEdit);

        assert!(!state.edit.is_editing());
        assert_eq!(state.status.dropped_edit, Some(RecordId(2)));
        assert_eq!(
            state.status.notice.as_ref().map(|n| n.kind),
            Some(ErrorKind::RecordNotFound)
        );
    }

    #[test]
    fn invalid_draft_price_keeps_session_open() {
        let mut state = loaded_state(numbered(1));
        let _ = handle_event(&mut state, &Event::BeginEdit(RecordId(1)));
        let _ = handle_event(
            &mut state,
            &Event::EditField {
                field: Column::Price,
                value: "free".to_string(),
            },
        );

        assert!(state.edit.is_editing());
        assert_eq!(state.edit.draft().and_then(|d| d.price), Some(1.0));
        assert_eq!(
            state.status.notice.as_ref().map(|n| n.kind),
            Some(ErrorKind::InvalidFieldValue)
        );
    }

    #[test]
    fn cancel_when_idle_changes_nothing() {
        let mut state = loaded_state(numbered(1));
        let (changed, _) = handle_event(&mut state, &Event::CancelEdit);
        assert!(!changed);
    }

    #[test]
    fn duplicate_insert_is_surfaced() {
        let mut state = loaded_state(numbered(2));
        let _ = handle_event(
            &mut state,
            &Event::InsertRecord(Record::new(1, "Clash", 1.0, "", "")),
        );

        assert_eq!(state.store.len(), 2);
        assert_eq!(state.store.get(RecordId(1)).map(|r| r.title.as_str()), Some("item 01"));
        assert_eq!(
            state.status.notice.as_ref().map(|n| n.kind),
            Some(ErrorKind::DuplicateKey)
        );
    }

    #[test]
    fn add_record_appends_placeholder() {
        let mut state = loaded_state(numbered(2));
        let _ = handle_event(&mut state, &Event::AddRecord);

        assert_eq!(state.store.len(), 3);
        let added = &state.store.records()[2];
        assert_eq!(added.title, "New Product");
        assert_eq!(added.price, 100.0);
    }
}
