use std::process::ExitCode;

use anyhow::Context;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use folio::{
    commands::{compose, send::SendCommand},
    environment::ConfigProvider,
};
use folio_utils::folio_version;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};
use url::Url;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    if let Command::Completion { shell } = cli.command {
        clap_complete::generate(
            shell,
            &mut Cli::command(),
            env!("CARGO_BIN_NAME"),
            &mut std::io::stdout(),
        );
        return Ok(ExitCode::SUCCESS);
    }

    init_tracing();

    let mut config = folio_config::load().context("Failed to load config")?;
    if let Some(backend_url) = cli.backend_url {
        config.backend.url = backend_url;
    }
    debug!(backend_url = %config.backend.url, "Loaded config");

    match cli.command {
        Command::Send(command) => command.invoke(config).await,
        Command::Compose => compose::invoke(config).await,
        Command::CheckConfig { verbose } => {
            ConfigProvider::new(&config).context("Invalid config")?;
            verbose.then(|| println!("{config:#?}"));
            Ok(ExitCode::SUCCESS)
        }
        Command::Completion { .. } => unreachable!(),
    }
}

#[derive(Debug, Parser)]
#[command(version = folio_version())]
struct Cli {
    /// Base url of the contact backend, overrides `backend.url` from the config
    #[arg(long, global = true, env = "FOLIO_BACKEND_URL")]
    backend_url: Option<Url>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Send a contact message
    #[command(aliases(["s"]))]
    Send(SendCommand),
    /// Fill in the contact form interactively and send it
    #[command(aliases(["c"]))]
    Compose,
    /// Validate configuration
    CheckConfig {
        /// Print a debug representation of the config
        #[arg(short, long)]
        verbose: bool,
    },
    /// Generate shell completions
    Completion {
        /// The shell to generate completions for
        #[clap(value_enum)]
        shell: Shell,
    },
}

fn init_tracing() {
    let fmt_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    #[cfg(tracing_pretty)]
    let fmt_layer = fmt_layer.pretty();

    tracing_subscriber::registry()
        .with(fmt_layer.with_filter(EnvFilter::from_default_env()))
        .init();
}
