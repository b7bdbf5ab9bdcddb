use std::io::Write;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use crate::domain::{DomainError, Role, Turn, FALLBACK_MESSAGE};

const TITLE: &str = "✨ StressLess: Your Stress Relief Companion";
const INTRO: &str = "Share what's on your mind, and I'll be here to listen and offer support.";
const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";
const SEPARATOR: &str = "────────────────────────────────────────";

/// Writes the conversation to a terminal (or any writer).
///
/// Every call to [`TranscriptView::render`] draws the whole history from the
/// turns it is given; nothing is diffed against the previous frame.
pub struct TranscriptView<W: Write> {
    out: W,
    clear_screen: bool,
}

impl<W: Write> TranscriptView<W> {
    pub fn new(out: W, clear_screen: bool) -> Self {
        Self { out, clear_screen }
    }

    pub fn render<'a>(&mut self, turns: impl Iterator<Item = &'a Turn>) -> Result<(), DomainError> {
        if self.clear_screen {
            write!(self.out, "{CLEAR_SCREEN}")?;
        } else {
            writeln!(self.out, "{SEPARATOR}")?;
        }
        writeln!(self.out, "{TITLE}")?;
        writeln!(self.out, "{INTRO}\n")?;

        for turn in turns {
            writeln!(self.out, "{}: {}\n", turn.role().label(), turn.content())?;
        }
        self.out.flush()?;
        Ok(())
    }

    pub fn fallback(&mut self) -> Result<(), DomainError> {
        writeln!(self.out, "{}: {FALLBACK_MESSAGE}\n", Role::Assistant.label())?;
        self.out.flush()?;
        Ok(())
    }

    pub fn warning(&mut self, message: &str) -> Result<(), DomainError> {
        writeln!(self.out, "⚠️  {message}")?;
        self.out.flush()?;
        Ok(())
    }

    pub fn prompt(&mut self) -> Result<(), DomainError> {
        write!(self.out, "> ")?;
        self.out.flush()?;
        Ok(())
    }
}

/// Spinner shown on stderr while a completion is in flight. Hidden when
/// `visible` is false, e.g. when stderr is not a terminal.
pub fn pending_indicator(visible: bool) -> ProgressBar {
    if !visible {
        return ProgressBar::hidden();
    }

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message("Thinking...");
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}
