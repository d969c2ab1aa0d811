use std::future::Future;

use folio_models::contact::{ContactDraft, ContactDraftError, ContactField};
use thiserror::Error;

pub trait ContactFeatureService: Send + Sync + 'static {
    /// Replace a single field of the current draft.
    ///
    /// No validation happens here. Editing a submitted form starts a new
    /// message.
    fn update_field(&self, field: ContactField, value: String) -> impl Future<Output = ()> + Send;

    /// Validate the current draft and submit it.
    ///
    /// Returns an error only if nothing was sent: the draft is invalid or
    /// another submission is still in progress. Every dispatched submission
    /// emits exactly one notification and resolves to a
    /// [`SubmissionOutcome`].
    fn submit(
        &self,
    ) -> impl Future<Output = Result<SubmissionOutcome, ContactSubmitError>> + Send;

    /// Clear the draft and return to [`SubmissionState::Editing`].
    fn reset(&self) -> impl Future<Output = ()> + Send;

    /// Return a copy of the current draft.
    fn draft(&self) -> impl Future<Output = ContactDraft> + Send;

    /// Return the current submission state.
    fn state(&self) -> impl Future<Output = SubmissionState> + Send;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SubmissionState {
    /// The user is filling in the form.
    #[default]
    Editing,
    /// A request is in flight. Further submissions are refused.
    Submitting,
    /// The last submission was accepted and the draft was cleared.
    Submitted,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    /// The backend accepted the message.
    Sent { message: String },
    /// The backend refused the message. `message` is the reason it reported,
    /// or the generic failure message.
    Rejected { message: String },
    /// No usable response was received.
    Failed { message: String },
}

impl SubmissionOutcome {
    pub fn is_sent(&self) -> bool {
        matches!(self, Self::Sent { .. })
    }

    /// The text shown in the notification for this outcome.
    pub fn message(&self) -> &str {
        match self {
            Self::Sent { message } | Self::Rejected { message } | Self::Failed { message } => {
                message
            }
        }
    }
}

#[derive(Debug, Error)]
pub enum ContactSubmitError {
    #[error("The contact form is invalid: {0}")]
    Invalid(#[from] ContactDraftError),
    #[error("A submission is already in progress.")]
    AlreadySubmitting,
}
