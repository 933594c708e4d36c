//! Terminal speech adapters
//!
//! The reference capability provider for environments without native
//! speech engines: the "spoken" question is rendered to the terminal and
//! the candidate's answer is read back as one typed line. Real synthesis
//! and recognition engines slot in behind the same port traits.

use crate::error::{AppError, Result};
use crate::ports::{SpeechInputPort, SpeechOutputPort};
use crate::utils::term::LineReader;
use async_trait::async_trait;
use std::io::IsTerminal;
use tokio::io::{self, AsyncWriteExt};

/// Renders utterances to the terminal
pub struct ConsoleSpeechOutput;

impl ConsoleSpeechOutput {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ConsoleSpeechOutput {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SpeechOutputPort for ConsoleSpeechOutput {
    async fn speak(&self, text: &str) -> Result<()> {
        // A terminal write completes before the next one starts, so the
        // one-utterance-at-a-time contract holds without explicit
        // cancellation.
        let mut stdout = io::stdout();
        stdout
            .write_all(format!("\n  [voice] {}\n", text).as_bytes())
            .await?;
        stdout.flush().await?;
        Ok(())
    }

    fn provider_name(&self) -> &str {
        "console"
    }
}

/// Captures one typed line per activation from the shared terminal source
pub struct ConsoleSpeechInput {
    lines: LineReader,
}

impl ConsoleSpeechInput {
    pub fn new(lines: LineReader) -> Self {
        Self { lines }
    }
}

#[async_trait]
impl SpeechInputPort for ConsoleSpeechInput {
    async fn capture_utterance(&self) -> Result<String> {
        match self.lines.next_line().await? {
            Some(text) if !text.trim().is_empty() => Ok(text.trim().to_string()),
            Some(_) => Err(AppError::Recognition("no speech detected".to_string())),
            None => Err(AppError::Recognition("input stream closed".to_string())),
        }
    }

    fn is_available(&self) -> bool {
        std::io::stdin().is_terminal()
    }

    fn provider_name(&self) -> &str {
        "console"
    }
}
