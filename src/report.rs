//! Output sinks for the traversal engine.

use std::io::{self, Write};

use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::engine::RunSummary;

/// Append-only message log consumed by the engine.
///
/// The engine calls `report` once per rename success or failure and
/// `report_summary` once at the end of a run.
pub trait Reporter {
    fn report(&mut self, message: &str);

    fn report_summary(&mut self, folders: usize, files: usize) {
        self.report(&format!(
            "Finished working on {folders} folder(s) and {files} file(s)."
        ));
    }
}

/// Prints each message to stdout, coloring rename outcomes.
pub struct ConsoleReporter {
    stream: StandardStream,
}

impl ConsoleReporter {
    pub fn new(use_color: bool) -> Self {
        let choice = if use_color {
            ColorChoice::Auto
        } else {
            ColorChoice::Never
        };
        Self {
            stream: StandardStream::stdout(choice),
        }
    }

    fn color_for(message: &str) -> Option<Color> {
        if message.starts_with("Renamed:") {
            Some(Color::Green)
        } else if message.starts_with("Error") {
            Some(Color::Red)
        } else {
            None
        }
    }
}

impl Reporter for ConsoleReporter {
    fn report(&mut self, message: &str) {
        // A failed write to stdout should not abort the run mid-rename.
        if let Some(color) = Self::color_for(message) {
            let _ = self.stream.set_color(ColorSpec::new().set_fg(Some(color)));
            let _ = writeln!(self.stream, "{message}");
            let _ = self.stream.reset();
        } else {
            let _ = writeln!(self.stream, "{message}");
        }
    }
}

/// Collects messages in memory, for library consumers and tests.
#[derive(Debug, Default)]
pub struct BufferReporter {
    messages: Vec<String>,
}

impl BufferReporter {
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    pub fn into_messages(self) -> Vec<String> {
        self.messages
    }
}

impl Reporter for BufferReporter {
    fn report(&mut self, message: &str) {
        self.messages.push(message.to_string());
    }
}

/// Discards all messages; used when the structured summary is the output.
pub struct SilentReporter;

impl Reporter for SilentReporter {
    fn report(&mut self, _message: &str) {}
}

/// Print a run summary as pretty-printed JSON to stdout.
pub fn print_json(summary: &RunSummary) -> io::Result<()> {
    let json = serde_json::to_string_pretty(summary).map_err(io::Error::other)?;
    println!("{json}");
    Ok(())
}
