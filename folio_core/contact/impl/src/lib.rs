use std::sync::Arc;

use folio_core_contact_contracts::{
    ContactFeatureService, ContactSubmitError, SubmissionOutcome, SubmissionState,
};
use folio_di::Build;
use folio_extern_contracts::contact::{ContactApiResponse, ContactApiService};
use folio_models::{
    contact::{ContactDraft, ContactField},
    notification::Notification,
};
use folio_shared_contracts::notification::NotificationService;
use folio_utils::trace_instrument;
use tokio::sync::Mutex;
use tracing::{error, warn};

#[cfg(test)]
mod tests;

#[derive(Debug, Clone, Default, Build)]
pub struct ContactFeatureServiceImpl<ContactApi, Notifications> {
    contact_api: ContactApi,
    notifications: Notifications,
    config: ContactFeatureConfig,
    #[state]
    form: Arc<Mutex<Form>>,
}

#[derive(Debug, Clone)]
pub struct ContactFeatureConfig {
    pub success_title: Arc<str>,
    pub failure_title: Arc<str>,
    /// Used when the backend did not report a reason.
    pub failure_message: Arc<str>,
}

impl Default for ContactFeatureConfig {
    fn default() -> Self {
        Self {
            success_title: "Message Sent!".into(),
            failure_title: "Error".into(),
            failure_message: "Failed to send message. Please try again or use email directly."
                .into(),
        }
    }
}

#[derive(Debug, Default)]
struct Form {
    draft: ContactDraft,
    state: SubmissionState,
}

impl<ContactApi, Notifications> ContactFeatureService
    for ContactFeatureServiceImpl<ContactApi, Notifications>
where
    ContactApi: ContactApiService,
    Notifications: NotificationService,
{
    #[trace_instrument(skip(self, value))]
    async fn update_field(&self, field: ContactField, value: String) {
        let mut form = self.form.lock().await;
        form.draft.set(field, value);
        if form.state == SubmissionState::Submitted {
            form.state = SubmissionState::Editing;
        }
    }

    #[trace_instrument(skip(self))]
    async fn submit(&self) -> Result<SubmissionOutcome, ContactSubmitError> {
        let message = {
            let mut form = self.form.lock().await;
            if form.state == SubmissionState::Submitting {
                return Err(ContactSubmitError::AlreadySubmitting);
            }
            let message = form.draft.validate()?;
            form.state = SubmissionState::Submitting;
            message
        };
        let in_flight = InFlight::new(Arc::clone(&self.form));

        let outcome = match self.contact_api.send_message(message).await {
            Ok(ContactApiResponse::Accepted { message }) => SubmissionOutcome::Sent { message },
            Ok(ContactApiResponse::Rejected { message }) => {
                warn!(reason = ?message, "Contact message was rejected");
                SubmissionOutcome::Rejected {
                    message: message
                        .filter(|x| !x.is_empty())
                        .unwrap_or_else(|| self.config.failure_message.to_string()),
                }
            }
            Err(err) => {
                error!("Failed to send contact message: {err}");
                SubmissionOutcome::Failed {
                    message: self.config.failure_message.to_string(),
                }
            }
        };

        {
            let mut form = self.form.lock().await;
            if outcome.is_sent() {
                form.draft = ContactDraft::default();
                form.state = SubmissionState::Submitted;
            } else {
                form.state = SubmissionState::Editing;
            }
        }
        in_flight.finish();

        let notification = if outcome.is_sent() {
            Notification::success(&*self.config.success_title, outcome.message())
        } else {
            Notification::error(&*self.config.failure_title, outcome.message())
        };
        self.notifications.emit(notification);

        Ok(outcome)
    }

    #[trace_instrument(skip(self))]
    async fn reset(&self) {
        let mut form = self.form.lock().await;
        form.draft = ContactDraft::default();
        // a request in flight still owns the state, see `InFlight`
        if form.state != SubmissionState::Submitting {
            form.state = SubmissionState::Editing;
        }
    }

    async fn draft(&self) -> ContactDraft {
        self.form.lock().await.draft.clone()
    }

    async fn state(&self) -> SubmissionState {
        self.form.lock().await.state
    }
}

/// Marks a dispatched submission. If the `submit` future is dropped before
/// the outcome was recorded, the form returns to [`SubmissionState::Editing`].
struct InFlight {
    form: Option<Arc<Mutex<Form>>>,
}

impl InFlight {
    fn new(form: Arc<Mutex<Form>>) -> Self {
        Self { form: Some(form) }
    }

    fn finish(mut self) {
        self.form = None;
    }
}

impl Drop for InFlight {
    fn drop(&mut self) {
        let Some(form) = self.form.take() else {
            return;
        };
        warn!("Contact submission was abandoned before it completed");

        if let Ok(mut form) = form.try_lock() {
            form.abandon_submission();
            return;
        }
        if let Ok(handle) = tokio::runtime::Handle::try_current() {
            handle.spawn(async move { form.lock().await.abandon_submission() });
        }
    }
}

impl Form {
    fn abandon_submission(&mut self) {
        if self.state == SubmissionState::Submitting {
            self.state = SubmissionState::Editing;
        }
    }
}
