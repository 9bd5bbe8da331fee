//! Speech boundary.
//!
//! Recognition and synthesis are external collaborators; these traits are
//! the seams they plug into. The in-tree implementations are honest
//! stand-ins: a sink that logs, a source that reads stdin lines as if they
//! were transcripts, and a scripted source for tests.

pub mod command;

use std::collections::VecDeque;
use std::io::BufRead;

use anyhow::Result;

pub use command::{match_command, normalize_spoken_email};

/// Text-to-speech output.
pub trait SpeechSink {
    fn say(&mut self, text: &str) -> Result<()>;
}

/// Speech-to-text input. `Ok(None)` means nothing was heard.
pub trait SpeechSource {
    fn listen(&mut self) -> Result<Option<String>>;
}

/// Sink that writes spoken lines to the log.
#[derive(Debug, Default)]
pub struct LogSink;

impl SpeechSink for LogSink {
    fn say(&mut self, text: &str) -> Result<()> {
        log::info!("speak: {}", text);
        Ok(())
    }
}

/// Source that treats stdin lines as transcripts.
#[derive(Debug, Default)]
pub struct StdinSource;

impl SpeechSource for StdinSource {
    fn listen(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        let n = std::io::stdin().lock().read_line(&mut line)?;
        if n == 0 {
            return Ok(None);
        }
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }
        Ok(Some(trimmed.to_string()))
    }
}

/// Scripted source for tests: pops pre-seeded utterances in order, then
/// reports silence.
#[derive(Debug, Default)]
pub struct ScriptedSource {
    utterances: VecDeque<String>,
}

impl ScriptedSource {
    pub fn new<S: Into<String>>(utterances: impl IntoIterator<Item = S>) -> Self {
        Self {
            utterances: utterances.into_iter().map(Into::into).collect(),
        }
    }
}

impl SpeechSource for ScriptedSource {
    fn listen(&mut self) -> Result<Option<String>> {
        Ok(self.utterances.pop_front())
    }
}

/// Sink that records spoken lines for assertions.
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub spoken: Vec<String>,
}

impl SpeechSink for RecordingSink {
    fn say(&mut self, text: &str) -> Result<()> {
        self.spoken.push(text.to_string());
        Ok(())
    }
}
