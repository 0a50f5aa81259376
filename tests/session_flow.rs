//! End-to-end session flow: flags → resolved configuration → engine with the
//! approval interceptor installed → full interactive transcript.

use std::collections::VecDeque;
use std::io;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::json;

use zypher_cli::approval::PromptApprovalInterceptor;
use zypher_cli::config::{build_runtime_config, parse_cli_args, RuntimeConfig};
use zypher_cli::engine::mock::{MockEngine, MockStep};
use zypher_cli::engine::{AgentEngine, ToolInvocation};
use zypher_cli::prompt::LinePrompt;
use zypher_cli::render::RenderSink;
use zypher_cli::session::run_session;

struct ScriptedPrompt {
    answers: Mutex<VecDeque<String>>,
    asked: AtomicUsize,
}

impl ScriptedPrompt {
    fn new(answers: &[&str]) -> Self {
        Self {
            answers: Mutex::new(answers.iter().map(|s| s.to_string()).collect()),
            asked: AtomicUsize::new(0),
        }
    }

    fn questions_asked(&self) -> usize {
        self.asked.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LinePrompt for ScriptedPrompt {
    async fn ask(&self, _question: &str) -> io::Result<Option<String>> {
        self.asked.fetch_add(1, Ordering::SeqCst);
        Ok(self.answers.lock().unwrap().pop_front())
    }
}

#[derive(Default)]
struct RecordingSink {
    entries: Mutex<Vec<(String, String)>>,
}

impl RecordingSink {
    fn record(&self, kind: &str, detail: &str) {
        self.entries
            .lock()
            .unwrap()
            .push((kind.to_string(), detail.to_string()));
    }

    fn saw(&self, kind: &str, needle: &str) -> bool {
        self.entries
            .lock()
            .unwrap()
            .iter()
            .any(|(k, detail)| k == kind && detail.contains(needle))
    }

    fn kinds(&self) -> Vec<String> {
        self.entries
            .lock()
            .unwrap()
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

fn resolved_config(argv: &[&str]) -> RuntimeConfig {
    let flags = parse_cli_args(argv.iter().copied()).expect("argv should parse");
    build_runtime_config(
        &flags,
        |name| match name {
            "OPENAI_API_KEY" => Some("integration-key".to_string()),
            _ => None,
        },
        Path::new("/srv/checkout"),
    )
    .expect("configuration should resolve")
}

fn shell_step() -> MockStep {
    let parameters = match json!({ "command": "cargo test" }) {
        serde_json::Value::Object(map) => map,
        _ => unreachable!("literal is an object"),
    };
    MockStep::ToolCall {
        invocation: ToolInvocation::new("run_terminal_cmd", parameters),
        input_chunks: vec!["{\"command\":".to_string(), "\"cargo test\"}".to_string()],
    }
}

fn wire(
    config: &RuntimeConfig,
    script: Vec<MockStep>,
    prompt: &Arc<ScriptedPrompt>,
    sink: &Arc<RecordingSink>,
) -> MockEngine {
    let mut engine = MockEngine::with_script(script);
    engine.install_interceptor(Arc::new(PromptApprovalInterceptor::new(
        Arc::new(config.clone()),
        Arc::clone(prompt) as Arc<dyn LinePrompt>,
        Arc::clone(sink) as Arc<dyn RenderSink>,
    )));
    engine
}

#[tokio::test]
async fn approved_shell_task_completes_successfully() {
    let config = resolved_config(&["--workspace", "/srv/agent"]);
    assert_eq!(config.workspace, Path::new("/srv/agent"));

    let prompt = Arc::new(ScriptedPrompt::new(&["run the build", "y", "exit"]));
    let sink = Arc::new(RecordingSink::default());
    let mut engine = wire(
        &config,
        vec![shell_step(), MockStep::Message("build finished".into())],
        &prompt,
        &sink,
    );

    run_session(&mut engine, &config, prompt.as_ref(), sink.as_ref())
        .await
        .unwrap();

    // Task question, approval question, exit question.
    assert_eq!(prompt.questions_asked(), 3);
    assert!(sink.saw("banner", "openai gpt-4o-mini /srv/agent"));
    assert!(sink.saw("approval_request", "run_terminal_cmd"));
    assert!(sink.saw("approval_request", "cargo test"));
    assert!(sink.saw("tool_started", "run_terminal_cmd"));
    assert!(sink.saw("message", "build finished"));
    assert!(sink.saw("task_finished", "ok"));
    assert!(sink.saw("goodbye", ""));

    // The approval request is rendered before the tool invocation is
    // announced.
    let kinds = sink.kinds();
    let approval_at = kinds
        .iter()
        .position(|k| k == "approval_request")
        .expect("approval rendered");
    let tool_at = kinds
        .iter()
        .position(|k| k == "tool_started")
        .expect("tool rendered");
    assert!(approval_at < tool_at);
}

#[tokio::test]
async fn denied_shell_task_is_cancelled_without_success_banner() {
    let config = resolved_config(&[]);
    let prompt = Arc::new(ScriptedPrompt::new(&["run the build", "n", "exit"]));
    let sink = Arc::new(RecordingSink::default());
    let mut engine = wire(&config, vec![shell_step()], &prompt, &sink);

    run_session(&mut engine, &config, prompt.as_ref(), sink.as_ref())
        .await
        .unwrap();

    assert!(sink.saw("task_cancelled", "run_terminal_cmd"));
    assert!(sink.saw("task_finished", "cancelled"));
    assert!(!sink.saw("task_finished", "ok"));
    assert!(!sink.saw("tool_started", "run_terminal_cmd"));
}

#[tokio::test]
async fn auto_approve_flag_suppresses_approval_prompts() {
    let config = resolved_config(&["-y"]);
    assert!(config.auto_approve_tools);

    let prompt = Arc::new(ScriptedPrompt::new(&["run the build", "exit"]));
    let sink = Arc::new(RecordingSink::default());
    let mut engine = wire(&config, vec![shell_step()], &prompt, &sink);

    run_session(&mut engine, &config, prompt.as_ref(), sink.as_ref())
        .await
        .unwrap();

    // Only the task and exit questions; the gate never prompted.
    assert_eq!(prompt.questions_asked(), 2);
    assert!(!sink.saw("approval_request", "run_terminal_cmd"));
    assert!(sink.saw("tool_started", "run_terminal_cmd"));
    assert!(sink.saw("task_finished", "ok"));
}
