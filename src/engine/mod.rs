//! Contract types for the external agent runtime.
//!
//! The front-end never looks inside the runtime: it submits one task at a
//! time and drains the typed event stream the runtime produces for it. Tool
//! execution re-enters the front-end through [`ToolInterceptor`], which the
//! runtime must consult before running a gated tool. Everything else about
//! the runtime (model access, tool implementations, checkpointing) stays on
//! the other side of this module.

pub mod mock;

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tokio::sync::{mpsc, watch};

use crate::error::EngineError;

/// Cancellation signal for one task, observed cooperatively at suspension
/// points. The runtime owns the sender; it only ever flips the value to
/// `true`.
pub type CancelSignal = watch::Receiver<bool>;

/// Per-task event sequence: finite, non-restartable, consumed exactly once
/// by the session loop.
pub type TaskEventStream = mpsc::UnboundedReceiver<Result<TaskEvent, EngineError>>;

/// One event in a task's stream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TaskEvent {
    /// Streamed fragment of assistant text.
    Text { content: String },
    /// A complete message, rendered on its own lines.
    Message { message: String },
    /// The runtime started invoking a named tool.
    ToolUse { tool_name: String },
    /// Partial tool input, streamed as raw text.
    ToolUseInput { partial_input: String },
    /// The task was cancelled; no success banner should follow.
    Cancelled { reason: String },
}

/// One tool invocation as presented to the approval gate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolInvocation {
    pub name: String,
    pub parameters: Map<String, Value>,
}

impl ToolInvocation {
    pub fn new(name: impl Into<String>, parameters: Map<String, Value>) -> Self {
        Self {
            name: name.into(),
            parameters,
        }
    }
}

/// Decision callback the runtime consults before executing a tool.
///
/// Returning `false` means the invocation must not proceed. The runtime must
/// block the tool execution until this resolves.
#[async_trait]
pub trait ToolInterceptor: Send + Sync {
    async fn authorize(&self, invocation: &ToolInvocation, cancel: CancelSignal) -> bool;
}

/// The external agent runtime as consumed by the session loop.
pub trait AgentEngine: Send {
    /// Submit one task and receive its event stream. The stream must be
    /// drained (or dropped) before the next task is submitted.
    fn submit_task(&mut self, task: &str, model: &str) -> TaskEventStream;

    /// Install the interceptor consulted before gated tool executions.
    fn install_interceptor(&mut self, interceptor: Arc<dyn ToolInterceptor>);
}

/// Wait until the cancellation signal fires (or return immediately if it
/// already has). A closed channel means the task owner is gone and counts as
/// a fired signal.
pub async fn wait_for_cancellation(cancel: &mut CancelSignal) {
    if *cancel.borrow() {
        return;
    }
    while cancel.changed().await.is_ok() {
        if *cancel.borrow() {
            return;
        }
    }
}
