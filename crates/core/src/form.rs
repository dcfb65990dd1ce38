//! The entry form state machine.
//!
//! Two phases: **Editing** (accumulating raw field edits) and **Submitting**
//! (request in flight). At most one submission may be in flight; a second
//! submit while Submitting is rejected without touching the draft, which
//! prevents duplicate entry creation from a double-click. A failed validation
//! or a rejected request returns the form to Editing with the draft
//! preserved; only an accepted submission clears it.

use medview_records::{build_entry, EntryDraft, EntryData, EntryType, FieldError, ValidationError};

/// Where the form currently is in its lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormPhase {
    /// Accumulating raw field edits.
    Editing,
    /// A submission is in flight; edits and further submits are rejected.
    Submitting,
}

/// Errors surfaced by form transitions.
#[derive(Debug, thiserror::Error)]
pub enum FormError {
    #[error("a submission is already in flight")]
    SubmissionInFlight,

    #[error(transparent)]
    Field(#[from] FieldError),

    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

/// The new-entry form: a draft plus the submission phase.
#[derive(Clone, Debug, Default)]
pub struct EntryForm {
    draft: EntryDraft,
    submitting: bool,
}

impl EntryForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> FormPhase {
        if self.submitting {
            FormPhase::Submitting
        } else {
            FormPhase::Editing
        }
    }

    /// Read access to the draft, whichever phase the form is in.
    pub fn draft(&self) -> &EntryDraft {
        &self.draft
    }

    /// Merges one field edit into the draft by wire field name.
    ///
    /// # Errors
    ///
    /// Rejected with [`FormError::SubmissionInFlight`] while Submitting, or
    /// with the underlying [`FieldError`] for an unknown field/type value.
    pub fn edit_field(&mut self, name: &str, value: &str) -> Result<(), FormError> {
        if self.submitting {
            return Err(FormError::SubmissionInFlight);
        }
        self.draft.set_field(name, value)?;
        Ok(())
    }

    /// Selects which entry variant is being drafted. Shared fields already
    /// entered are kept.
    pub fn select_type(&mut self, entry_type: EntryType) -> Result<(), FormError> {
        if self.submitting {
            return Err(FormError::SubmissionInFlight);
        }
        self.draft.select_type(entry_type);
        Ok(())
    }

    /// Validates the draft and, on success, moves to Submitting and hands the
    /// payload to send.
    ///
    /// On validation failure the form stays in Editing, the draft untouched,
    /// and the error is surfaced for display. While already Submitting this
    /// is a no-op rejection.
    pub fn begin_submit(&mut self) -> Result<EntryData, FormError> {
        if self.submitting {
            return Err(FormError::SubmissionInFlight);
        }
        let entry = build_entry(&self.draft)?;
        self.submitting = true;
        Ok(entry)
    }

    /// Records the outcome of the in-flight submission.
    ///
    /// Accepted: the draft is cleared for the next entry. Rejected: the draft
    /// is preserved so the user can correct and resubmit. Either way the form
    /// returns to Editing.
    pub fn finish_submit(&mut self, accepted: bool) {
        if accepted {
            self.draft.clear();
        }
        self.submitting = false;
    }
}
