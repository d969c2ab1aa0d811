use std::process::ExitCode;

use folio_config::Config;
use folio_core_contact_contracts::{ContactFeatureService, ContactSubmitError};
use folio_di::Provides;
use folio_models::contact::{ContactField, FieldViolation};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader, Lines};

use crate::environment::{types::ContactFeature, ConfigProvider, Provider};

const MESSAGE_TERMINATOR: &str = ".";

pub async fn invoke(config: Config) -> anyhow::Result<ExitCode> {
    let mut provider = Provider::new(ConfigProvider::new(&config)?);
    let feature: ContactFeature = provider.provide();

    let sent = compose(
        &feature,
        BufReader::new(tokio::io::stdin()),
        tokio::io::stdout(),
        &config.contact.response_notice,
    )
    .await?;

    Ok(if sent {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// Run the interactive contact form on `input` and `output`.
///
/// Every field is prompted once, then the draft is submitted. Invalid fields
/// are prompted again. After a failed submission the user may retry, edit the
/// draft, clear it or quit. Returns whether a message was sent; the end of
/// `input` counts as quitting.
pub async fn compose<F, R, W>(
    feature: &F,
    input: R,
    output: W,
    response_notice: &str,
) -> anyhow::Result<bool>
where
    F: ContactFeatureService,
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut form = Form {
        feature,
        lines: input.lines(),
        output,
    };

    form.write(&format!("{response_notice}\n\n")).await?;
    if !form.fill(&ContactField::ALL).await? {
        return Ok(false);
    }

    loop {
        match feature.submit().await {
            Ok(outcome) if outcome.is_sent() => return Ok(true),
            Ok(_) => {}
            Err(ContactSubmitError::Invalid(err)) => {
                let fields = form.report(&err.violations).await?;
                if !form.fill(&fields).await? {
                    return Ok(false);
                }
                continue;
            }
            Err(err @ ContactSubmitError::AlreadySubmitting) => return Err(err.into()),
        }

        let Some(action) = form.ask_action().await? else {
            return Ok(false);
        };
        let complete = match action {
            FailureAction::Retry => true,
            FailureAction::Edit => form.fill(&ContactField::ALL).await?,
            FailureAction::Clear => {
                feature.reset().await;
                form.fill(&ContactField::ALL).await?
            }
            FailureAction::Quit => false,
        };
        if !complete {
            return Ok(false);
        }
    }
}

struct Form<'a, F, R, W> {
    feature: &'a F,
    lines: Lines<R>,
    output: W,
}

impl<F, R, W> Form<'_, F, R, W>
where
    F: ContactFeatureService,
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    /// Prompt the given fields. Empty input keeps a field's current value.
    /// Returns `false` if the input ended.
    async fn fill(&mut self, fields: &[ContactField]) -> anyhow::Result<bool> {
        for &field in fields {
            let current = self.feature.draft().await.get(field).to_owned();

            let value = match field {
                ContactField::Message => self.read_message(&current).await?,
                _ => self.read_field(field, &current).await?,
            };
            let Some(value) = value else {
                return Ok(false);
            };

            if !value.is_empty() || current.is_empty() {
                self.feature.update_field(field, value).await;
            }

            if field == ContactField::Message {
                let counter = self.feature.draft().await.message_counter();
                self.write(&format!("({counter})\n")).await?;
            }
        }

        Ok(true)
    }

    async fn read_field(
        &mut self,
        field: ContactField,
        current: &str,
    ) -> anyhow::Result<Option<String>> {
        let label = label(field);
        if current.is_empty() {
            self.write(&format!("{label}: ")).await?;
        } else {
            self.write(&format!("{label} [{current}]: ")).await?;
        }

        Ok(self.lines.next_line().await?)
    }

    async fn read_message(&mut self, current: &str) -> anyhow::Result<Option<String>> {
        self.write(&format!(
            "{} (end with a line containing only \"{MESSAGE_TERMINATOR}\"):\n",
            label(ContactField::Message)
        ))
        .await?;
        if !current.is_empty() {
            self.write("Leave empty to keep the current message.\n").await?;
        }

        let mut message = Vec::new();
        while let Some(line) = self.lines.next_line().await? {
            if line == MESSAGE_TERMINATOR {
                return Ok(Some(message.join("\n")));
            }
            message.push(line);
        }

        Ok(None)
    }

    /// List the violations and return the fields to prompt again.
    async fn report(
        &mut self,
        violations: &[FieldViolation],
    ) -> anyhow::Result<Vec<ContactField>> {
        self.write("Please correct the following:\n").await?;
        for violation in violations {
            self.write(&format!("  - {violation}\n")).await?;
        }

        Ok(violations.iter().map(|x| x.field).collect())
    }

    async fn ask_action(&mut self) -> anyhow::Result<Option<FailureAction>> {
        loop {
            self.write("[r]etry, [e]dit, [c]lear or [q]uit? ").await?;
            let Some(line) = self.lines.next_line().await? else {
                return Ok(None);
            };
            if let Some(action) = FailureAction::parse(&line) {
                return Ok(Some(action));
            }
        }
    }

    async fn write(&mut self, text: &str) -> anyhow::Result<()> {
        self.output.write_all(text.as_bytes()).await?;
        self.output.flush().await?;
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FailureAction {
    Retry,
    Edit,
    Clear,
    Quit,
}

impl FailureAction {
    fn parse(input: &str) -> Option<Self> {
        match input.trim().to_ascii_lowercase().as_str() {
            "r" | "retry" => Some(Self::Retry),
            "e" | "edit" => Some(Self::Edit),
            "c" | "clear" => Some(Self::Clear),
            "q" | "quit" => Some(Self::Quit),
            _ => None,
        }
    }
}

fn label(field: ContactField) -> &'static str {
    match field {
        ContactField::Name => "Name",
        ContactField::Email => "Email",
        ContactField::Subject => "Subject",
        ContactField::Message => "Message",
    }
}
