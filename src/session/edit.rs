//! Edit session state machine.
//!
//! At most one record can be edited at a time. The draft lives here until it is
//! committed into the store or cancelled.
//!
//! # State Machine
//!
//! ```text
//!            begin_edit                 commit / cancel
//!   Idle ─────────────────▶ Editing ─────────────────────▶ Idle
//!                              │ update_draft_field
//!                              └────────┘
//! ```

use crate::domain::error::{GridError, Result};
use crate::domain::record::{Column, Record, RecordId, RecordPatch};
use crate::storage::RecordStore;

/// Current state of the edit session.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum EditSession {
    /// No edit in progress.
    #[default]
    Idle,

    /// A draft is staged for one record.
    Editing {
        /// Record the draft will be merged into.
        target_id: RecordId,
        /// Staged field values, initialized from the record.
        draft: RecordPatch,
    },
}

impl EditSession {
    #[must_use]
    pub const fn is_editing(&self) -> bool {
        matches!(self, Self::Editing { .. })
    }

    /// Id of the record being edited, if any.
    #[must_use]
    pub const fn target_id(&self) -> Option<RecordId> {
        match self {
            Self::Idle => None,
            Self::Editing { target_id, .. } => Some(*target_id),
        }
    }

    #[must_use]
    pub const fn draft(&self) -> Option<&RecordPatch> {
        match self {
            Self::Idle => None,
            Self::Editing { draft, .. } => Some(draft),
        }
    }

    /// Opens a draft for `record`, copying every editable field.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::EditInProgress`] if a draft is already open; the
    /// existing draft is kept.
    pub fn begin_edit(&mut self, record: &Record) -> Result<()> {
        if let Self::Editing { target_id, .. } = self {
            tracing::debug!(current = %target_id, requested = %record.id, "edit already in progress");
            return Err(GridError::EditInProgress(*target_id));
        }

        tracing::debug!(id = %record.id, "edit started");
        *self = Self::Editing {
            target_id: record.id,
            draft: RecordPatch::from_record(record),
        };
        Ok(())
    }

    /// Changes one field of the open draft.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::NoActiveEdit`] when idle, or
    /// [`GridError::InvalidFieldValue`] if the value does not fit the column.
    pub fn update_draft_field(&mut self, field: Column, value: &str) -> Result<()> {
        match self {
            Self::Idle => Err(GridError::NoActiveEdit),
            Self::Editing { draft, .. } => {
                draft.set(field, value)?;
                tracing::trace!(field = %field, value = %value, "draft updated");
                Ok(())
            }
        }
    }

    /// Merges the draft into `store` and returns to idle.
    ///
    /// The session is idle afterwards whatever the outcome.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::NoActiveEdit`] when idle, or
    /// [`GridError::RecordNotFound`] if the target left the store; the draft is
    /// dropped in that case.
    pub fn commit(&mut self, store: &mut RecordStore) -> Result<Record> {
        let Self::Editing { target_id, draft } = std::mem::take(self) else {
            return Err(GridError::NoActiveEdit);
        };

        let _span = tracing::debug_span!("commit_edit", id = %target_id).entered();

        match store.update_by_id(target_id, &draft) {
            Ok(record) => {
                tracing::debug!("edit committed");
                Ok(record.clone())
            }
            Err(e) => {
                tracing::warn!(error = %e, "edit dropped");
                Err(e)
            }
        }
    }

    /// Discards the draft without touching the store.
    ///
    /// Returns the id that was being edited, or `None` if already idle.
    pub fn cancel(&mut self) -> Option<RecordId> {
        let target = self.target_id();
        *self = Self::Idle;
        if let Some(id) = target {
            tracing::debug!(id = %id, "edit cancelled");
        }
        target
    }
}
