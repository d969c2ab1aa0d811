use std::process::ExitCode;

use clap::Args;
use folio_config::Config;
use folio_core_contact_contracts::{ContactFeatureService, ContactSubmitError, SubmissionOutcome};
use folio_di::Provides;
use folio_models::contact::{ContactDraft, ContactField};

use crate::environment::{types::ContactFeature, ConfigProvider, Provider};

/// Exit status for a draft that was refused before sending.
pub const INVALID_DRAFT_EXIT_CODE: u8 = 2;

#[derive(Debug, Args)]
pub struct SendCommand {
    /// Your name
    #[arg(long)]
    name: String,
    /// Your email address
    #[arg(long)]
    email: String,
    #[arg(long)]
    subject: String,
    #[arg(long)]
    message: String,
}

impl SendCommand {
    pub async fn invoke(self, config: Config) -> anyhow::Result<ExitCode> {
        let mut provider = Provider::new(ConfigProvider::new(&config)?);
        let feature: ContactFeature = provider.provide();

        match send(&feature, self.into()).await {
            Ok(outcome) => Ok(exit_code(&outcome)),
            Err(ContactSubmitError::Invalid(err)) => {
                eprintln!("The message was not sent:");
                for violation in &err.violations {
                    eprintln!("  - {violation}");
                }
                Ok(ExitCode::from(INVALID_DRAFT_EXIT_CODE))
            }
            Err(err) => Err(err.into()),
        }
    }
}

impl From<SendCommand> for ContactDraft {
    fn from(value: SendCommand) -> Self {
        Self {
            name: value.name,
            email: value.email,
            subject: value.subject,
            message: value.message,
        }
    }
}

/// Fill the form with `draft` and submit it.
pub async fn send(
    feature: &impl ContactFeatureService,
    draft: ContactDraft,
) -> Result<SubmissionOutcome, ContactSubmitError> {
    for field in ContactField::ALL {
        feature.update_field(field, draft.get(field).into()).await;
    }
    feature.submit().await
}

fn exit_code(outcome: &SubmissionOutcome) -> ExitCode {
    if outcome.is_sent() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
