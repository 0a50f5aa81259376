//! Interactive line-input capability.
//!
//! The session loop and the approval gate never read the terminal directly;
//! they go through [`LinePrompt`] so tests can substitute a scripted fake.
//! The terminal implementation owns the process-wide stdin reader: it is
//! acquired once when the prompt is constructed and released exactly once
//! when the prompt is dropped, on every exit path.

use std::io::{self, Write};

use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tokio::sync::Mutex;

/// Ask one question, read one line.
#[async_trait]
pub trait LinePrompt: Send + Sync {
    /// Returns the next input line, or `None` once the input is closed.
    async fn ask(&self, question: &str) -> io::Result<Option<String>>;
}

/// Terminal-backed prompt reading lines from standard input.
pub struct TerminalPrompt {
    lines: Mutex<Lines<BufReader<Stdin>>>,
}

impl TerminalPrompt {
    pub fn new() -> Self {
        Self {
            lines: Mutex::new(BufReader::new(tokio::io::stdin()).lines()),
        }
    }
}

impl Default for TerminalPrompt {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LinePrompt for TerminalPrompt {
    async fn ask(&self, question: &str) -> io::Result<Option<String>> {
        {
            let mut stdout = io::stdout();
            stdout.write_all(question.as_bytes())?;
            stdout.flush()?;
        }
        self.lines.lock().await.next_line().await
    }
}
