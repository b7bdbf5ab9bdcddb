//! Terminal front-end: argument parsing and the interaction loop.

mod render;

use std::io::Write;
use std::sync::Arc;

use clap::Parser;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{debug, warn};

use crate::application::{ChatSession, CompletionClient, SubmitOutcome};
use crate::connector::MistralSettings;
use crate::domain::{DomainError, Transcript};

pub use render::*;

#[derive(Parser)]
#[command(name = "stressless")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Log request details to stderr
    #[arg(short, long)]
    pub verbose: bool,
}

/// Presentation switches for the interaction loop.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoopOptions {
    /// Redraw from a cleared screen instead of appending below the last frame.
    pub clear_screen: bool,
    /// Show the "Thinking..." spinner while a completion is pending.
    pub show_spinner: bool,
}

/// Resolve configuration, build the completion client and run one session
/// until `input` is exhausted.
///
/// When the API key is missing the warning is written to `output` and a
/// configuration error is returned before `make_client` is ever called, so no
/// request can leave the process.
pub async fn launch<L, F, R, W>(
    lookup: L,
    make_client: F,
    input: R,
    output: W,
    options: LoopOptions,
) -> Result<Transcript, DomainError>
where
    L: Fn(&str) -> Option<String>,
    F: FnOnce(MistralSettings) -> Arc<dyn CompletionClient>,
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut view = TranscriptView::new(output, options.clear_screen);

    let settings = match MistralSettings::from_lookup(lookup) {
        Ok(settings) => settings,
        Err(e) => {
            warn!("{e}");
            view.warning(&e.to_string())?;
            return Err(e);
        }
    };

    let session = ChatSession::start(make_client(settings));
    run_session(session, input, &mut view, options).await
}

/// Read one line per turn, submit it, and redraw. Returns the final
/// transcript when input ends.
pub async fn run_session<R, W>(
    mut session: ChatSession,
    mut input: R,
    view: &mut TranscriptView<W>,
    options: LoopOptions,
) -> Result<Transcript, DomainError>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    view.render(session.visible_turns())?;

    loop {
        view.prompt()?;
        let Some(line) = read_line(&mut input).await? else {
            break;
        };
        if line.trim().is_empty() {
            debug!("Ignoring blank input");
            continue;
        }

        let spinner = pending_indicator(options.show_spinner);
        let outcome = session.submit(&line).await;
        spinner.finish_and_clear();

        match outcome? {
            SubmitOutcome::Replied(_) => view.render(session.visible_turns())?,
            SubmitOutcome::Failed { .. } => {
                view.render(session.visible_turns())?;
                view.fallback()?;
            }
        }
    }

    Ok(session.end())
}

/// Next line of input without its terminator, or `None` at end of input.
/// Bytes that are not UTF-8 are replaced rather than ending the session.
async fn read_line<R>(input: &mut R) -> Result<Option<String>, DomainError>
where
    R: AsyncBufRead + Unpin,
{
    let mut buf = Vec::new();
    if input.read_until(b'\n', &mut buf).await? == 0 {
        return Ok(None);
    }
    while matches!(buf.last(), Some(b'\n' | b'\r')) {
        buf.pop();
    }

    let line = match String::from_utf8(buf) {
        Ok(line) => line,
        Err(e) => {
            warn!("Input line is not valid UTF-8; replacing invalid bytes");
            String::from_utf8_lossy(e.as_bytes()).into_owned()
        }
    };
    Ok(Some(line))
}
