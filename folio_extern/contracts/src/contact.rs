use std::future::Future;

use folio_models::contact::ContactMessage;
use thiserror::Error;

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait ContactApiService: Send + Sync + 'static {
    /// Post the message to the backend contact endpoint.
    ///
    /// Exactly one request is sent per call.
    fn send_message(
        &self,
        message: ContactMessage,
    ) -> impl Future<Output = Result<ContactApiResponse, ContactApiError>> + Send;
}

/// The interpreted answer of the contact endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContactApiResponse {
    /// Success status and `success: true`.
    Accepted { message: String },
    /// `success: false`, or a non-success status. `message` holds the reason
    /// reported by the backend, if one could be read.
    Rejected { message: Option<String> },
}

/// No usable response was received.
#[derive(Debug, Error)]
#[error("Contact request failed: {0:#}")]
pub struct ContactApiError(#[from] pub anyhow::Error);

#[cfg(feature = "mock")]
impl MockContactApiService {
    pub fn with_send_message(
        mut self,
        message: ContactMessage,
        result: Result<ContactApiResponse, ContactApiError>,
    ) -> Self {
        self.expect_send_message()
            .once()
            .with(mockall::predicate::eq(message))
            .return_once(|_| Box::pin(std::future::ready(result)));
        self
    }
}
