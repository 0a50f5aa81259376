//! Shared test fixtures for the approval and session test modules.
//!
//! Keeping the scripted prompt and recording sink here prevents each test
//! module from rebuilding the same fakes.

use std::collections::VecDeque;
use std::io;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::config::{Provider, RuntimeConfig};
use crate::prompt::LinePrompt;
use crate::render::RenderSink;

/// A minimal resolved configuration for gate/session tests.
pub fn test_config() -> RuntimeConfig {
    RuntimeConfig {
        provider: Provider::OpenAi,
        model: "gpt-4o-mini".to_string(),
        api_key: "test-key".to_string(),
        workspace: PathBuf::from("/tmp/workspace"),
        base_url: None,
        zypher_home: None,
        user_id: None,
        image_api_key: None,
        disable_checkpoints: false,
        auto_approve_tools: false,
        max_iterations: None,
        max_tokens: None,
        task_timeout_ms: None,
    }
}

/// Prompt that replays queued answers, then reports closed input.
pub struct ScriptedPrompt {
    answers: Mutex<VecDeque<String>>,
    asked: AtomicUsize,
}

impl ScriptedPrompt {
    pub fn new(answers: &[&str]) -> Self {
        Self {
            answers: Mutex::new(answers.iter().map(|s| s.to_string()).collect()),
            asked: AtomicUsize::new(0),
        }
    }

    /// Number of questions asked so far.
    pub fn questions_asked(&self) -> usize {
        self.asked.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LinePrompt for ScriptedPrompt {
    async fn ask(&self, _question: &str) -> io::Result<Option<String>> {
        self.asked.fetch_add(1, Ordering::SeqCst);
        Ok(self.answers.lock().expect("scripted prompt lock").pop_front())
    }
}

/// Prompt that never answers; used to test cancellation while blocked.
#[derive(Default)]
pub struct PendingPrompt;

#[async_trait]
impl LinePrompt for PendingPrompt {
    async fn ask(&self, _question: &str) -> io::Result<Option<String>> {
        std::future::pending().await
    }
}

/// Sink that records `(kind, detail)` entries instead of printing.
#[derive(Default)]
pub struct RecordingSink {
    entries: Mutex<Vec<(String, String)>>,
}

impl RecordingSink {
    fn record(&self, kind: &str, detail: &str) {
        self.entries
            .lock()
            .expect("recording sink lock")
            .push((kind.to_string(), detail.to_string()));
    }

    /// Whether an entry of `kind` containing `needle` was recorded.
    pub fn saw(&self, kind: &str, needle: &str) -> bool {
        self.entries
            .lock()
            .expect("recording sink lock")
            .iter()
            .any(|(k, detail)| k == kind && detail.contains(needle))
    }

    /// Number of entries of `kind`.
    pub fn count(&self, kind: &str) -> usize {
        self.entries
            .lock()
            .expect("recording sink lock")
            .iter()
            .filter(|(k, _)| k == kind)
            .count()
    }

    /// Recorded kinds, in order.
    pub fn kinds(&self) -> Vec<String> {
        self.entries
            .lock()
            .expect("recording sink lock")
            .iter()
            .map(|(k, _)| k.clone())
            .collect()
    }
}

impl RenderSink for RecordingSink {
    fn banner(&self, provider: &str, model: &str, workspace: &str) {
        self.record("banner", &format!("{provider} {model} {workspace}"));
    }

    fn task_started(&self) {
        self.record("task_started", "");
    }

    fn agent_label(&self) {
        self.record("agent_label", "");
    }

    fn text_fragment(&self, content: &str) {
        self.record("text", content);
    }

    fn line_break(&self) {
        self.record("line_break", "");
    }

    fn message(&self, content: &str) {
        self.record("message", content);
    }

    fn tool_started(&self, name: &str) {
        self.record("tool_started", name);
    }

    fn tool_input_fragment(&self, content: &str) {
        self.record("tool_input", content);
    }

    fn task_cancelled(&self, reason: &str) {
        self.record("task_cancelled", reason);
    }

    fn task_finished(&self, cancelled: bool) {
        self.record("task_finished", if cancelled { "cancelled" } else { "ok" });
    }

    fn stream_error(&self, message: &str) {
        self.record("stream_error", message);
    }

    fn approval_request(&self, name: &str, parameters: &str) {
        self.record("approval_request", &format!("{name} {parameters}"));
    }

    fn goodbye(&self) {
        self.record("goodbye", "");
    }

    fn error(&self, message: &str) {
        self.record("error", message);
    }
}
