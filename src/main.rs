use std::io::IsTerminal;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tokio::io::BufReader;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use stressless::cli::{launch, Cli, LoopOptions};
use stressless::{CompletionClient, MistralClient};

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::WARN
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    // The transcript goes to stdout, the spinner to stderr.
    let options = LoopOptions {
        clear_screen: std::io::stdout().is_terminal(),
        show_spinner: std::io::stderr().is_terminal(),
    };

    let result = launch(
        |name| std::env::var(name).ok(),
        |settings| -> Arc<dyn CompletionClient> { Arc::new(MistralClient::new(settings)) },
        BufReader::new(tokio::io::stdin()),
        std::io::stdout(),
        options,
    )
    .await;

    match result {
        Ok(_) => Ok(ExitCode::SUCCESS),
        // The warning has already been shown; nothing else to report.
        Err(e) if e.is_configuration() => Ok(ExitCode::FAILURE),
        Err(e) => Err(e.into()),
    }
}
