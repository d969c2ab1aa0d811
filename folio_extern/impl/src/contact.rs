use std::sync::Arc;

use anyhow::Context;
use folio_di::Build;
use folio_extern_contracts::contact::{ContactApiError, ContactApiResponse, ContactApiService};
use folio_models::contact::ContactMessage;
use folio_utils::trace_instrument;
use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

use crate::http::HttpClient;

const CONTACT_ROUTE: &str = "api/contact";

#[derive(Debug, Clone, Build)]
pub struct ContactApiServiceImpl {
    config: ContactApiServiceConfig,
    #[state]
    http: HttpClient,
}

#[derive(Debug, Clone)]
pub struct ContactApiServiceConfig {
    contact_endpoint: Arc<Url>,
}

impl ContactApiServiceConfig {
    /// Derive the contact endpoint from the backend base url. A path prefix
    /// in the base url is kept.
    pub fn new(backend_url: &Url) -> anyhow::Result<Self> {
        let base = backend_url.as_str().trim_end_matches('/');
        let contact_endpoint = format!("{base}/{CONTACT_ROUTE}")
            .parse::<Url>()
            .with_context(|| format!("Failed to build contact endpoint from {backend_url}"))?;

        Ok(Self {
            contact_endpoint: contact_endpoint.into(),
        })
    }

    pub fn contact_endpoint(&self) -> &Url {
        &self.contact_endpoint
    }
}

impl ContactApiService for ContactApiServiceImpl {
    #[trace_instrument(skip(self))]
    async fn send_message(
        &self,
        message: ContactMessage,
    ) -> Result<ContactApiResponse, ContactApiError> {
        let response = self
            .http
            .post((*self.config.contact_endpoint).clone())
            .json(&ContactRequest {
                name: &message.author.name,
                email: message.author.email.as_str(),
                subject: &message.subject,
                message: &message.content,
            })
            .send()
            .await
            .context("Failed to send contact request")?;

        let status = response.status();
        debug!(%status, "contact endpoint responded");

        if !status.is_success() {
            let message = response
                .json::<ErrorResponse>()
                .await
                .ok()
                .and_then(|x| x.message);
            return Ok(ContactApiResponse::Rejected { message });
        }

        let ContactResponse { success, message } = response
            .json::<ContactResponse>()
            .await
            .context("Failed to deserialize contact response")?;

        Ok(if success {
            ContactApiResponse::Accepted { message }
        } else {
            ContactApiResponse::Rejected {
                message: Some(message),
            }
        })
    }
}

#[derive(Serialize)]
struct ContactRequest<'a> {
    name: &'a str,
    email: &'a str,
    subject: &'a str,
    message: &'a str,
}

#[derive(Deserialize)]
struct ContactResponse {
    success: bool,
    message: String,
}

#[derive(Deserialize)]
struct ErrorResponse {
    message: Option<String>,
}
