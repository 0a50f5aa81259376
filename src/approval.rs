//! Tool approval gate.
//!
//! Potentially dangerous tool invocations block the external runtime until a
//! human confirms them. The decision of *whether* to ask is pure
//! ([`should_prompt_for_approval`]); the confirmation itself is an
//! interactive loop that resolves as denial when the task's cancellation
//! signal fires while waiting.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::config::RuntimeConfig;
use crate::engine::{wait_for_cancellation, CancelSignal, ToolInterceptor, ToolInvocation};
use crate::prompt::LinePrompt;
use crate::render::RenderSink;

/// Tools that always require confirmation unless a per-call marker says
/// otherwise.
pub const SENSITIVE_TOOLS: &[&str] = &["run_terminal_cmd"];

/// Parameter key that overrides the denylist per invocation.
const REQUIRE_APPROVAL_KEY: &str = "requireUserApproval";

const APPROVAL_QUESTION: &str = "Approve tool execution? (y/N): ";

/// Whether an invocation needs human confirmation.
///
/// A `requireUserApproval` entry in the parameters is authoritative
/// regardless of tool name; otherwise the name is checked against
/// [`SENSITIVE_TOOLS`].
pub fn should_prompt_for_approval(
    name: &str,
    parameters: &serde_json::Map<String, Value>,
) -> bool {
    if let Some(marker) = parameters.get(REQUIRE_APPROVAL_KEY) {
        return json_truthy(marker);
    }
    SENSITIVE_TOOLS.contains(&name)
}

fn json_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Concrete answer parsed from the confirmation prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApprovalDecision {
    Approve,
    Deny,
}

/// Parse `y/n` approval input. Empty input denies; anything else re-prompts.
pub fn parse_approval_decision(input: &str) -> Option<ApprovalDecision> {
    let normalized = input.trim().to_ascii_lowercase();
    match normalized.as_str() {
        "y" | "yes" => Some(ApprovalDecision::Approve),
        "" | "n" | "no" => Some(ApprovalDecision::Deny),
        _ => None,
    }
}

/// Run the approval flow for one invocation and return whether it may
/// proceed.
///
/// Auto-approval and non-sensitive invocations resolve `true` without
/// prompting. Otherwise the prompt repeats until a decisive answer arrives or
/// the cancellation signal fires; cancellation (and closed input) resolve as
/// denial, never as an error.
pub async fn handle_tool_approval(
    invocation: &ToolInvocation,
    config: &RuntimeConfig,
    prompt: &dyn LinePrompt,
    sink: &dyn RenderSink,
    cancel: Option<CancelSignal>,
) -> bool {
    if config.auto_approve_tools {
        return true;
    }
    if !should_prompt_for_approval(&invocation.name, &invocation.parameters) {
        return true;
    }

    let dump = serde_json::to_string_pretty(&invocation.parameters)
        .unwrap_or_else(|_| "{}".to_string());
    sink.approval_request(&invocation.name, &dump);

    let mut cancel = cancel;
    loop {
        if let Some(signal) = cancel.as_ref() {
            if *signal.borrow() {
                tracing::debug!(tool = %invocation.name, "approval cancelled before prompt");
                return false;
            }
        }

        let answer = match cancel.as_mut() {
            Some(signal) => {
                tokio::select! {
                    _ = wait_for_cancellation(signal) => {
                        tracing::debug!(tool = %invocation.name, "approval cancelled while waiting");
                        return false;
                    }
                    answer = prompt.ask(APPROVAL_QUESTION) => answer,
                }
            }
            None => prompt.ask(APPROVAL_QUESTION).await,
        };

        let line = match answer {
            Ok(Some(line)) => line,
            // Closed input cannot confirm anything.
            Ok(None) => return false,
            Err(error) => {
                sink.error(&error.to_string());
                return false;
            }
        };

        match parse_approval_decision(&line) {
            Some(ApprovalDecision::Approve) => return true,
            Some(ApprovalDecision::Deny) => return false,
            None => continue,
        }
    }
}

/// Adapter that lets the external runtime block on the approval gate.
pub struct PromptApprovalInterceptor {
    config: Arc<RuntimeConfig>,
    prompt: Arc<dyn LinePrompt>,
    sink: Arc<dyn RenderSink>,
}

impl PromptApprovalInterceptor {
    pub fn new(
        config: Arc<RuntimeConfig>,
        prompt: Arc<dyn LinePrompt>,
        sink: Arc<dyn RenderSink>,
    ) -> Self {
        Self {
            config,
            prompt,
            sink,
        }
    }
}

#[async_trait]
impl ToolInterceptor for PromptApprovalInterceptor {
    async fn authorize(&self, invocation: &ToolInvocation, cancel: CancelSignal) -> bool {
        handle_tool_approval(
            invocation,
            &self.config,
            self.prompt.as_ref(),
            self.sink.as_ref(),
            Some(cancel),
        )
        .await
    }
}
