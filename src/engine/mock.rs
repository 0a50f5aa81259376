//! Deterministic in-process engine.
//!
//! This engine contains no model or tool logic and is intended for local
//! development and contract-level testing of the interactive front-end. Real
//! runtimes attach through the same [`AgentEngine`] trait.

use std::sync::Arc;

use tokio::sync::{mpsc, watch};

use crate::error::EngineError;

use super::{AgentEngine, TaskEvent, TaskEventStream, ToolInterceptor, ToolInvocation};

/// One scripted step replayed per submitted task.
#[derive(Debug, Clone)]
pub enum MockStep {
    /// Emit a streamed text fragment.
    Text(String),
    /// Emit a complete message.
    Message(String),
    /// Consult the installed interceptor, then emit the tool events. Denial
    /// cancels the task instead.
    ToolCall {
        invocation: ToolInvocation,
        input_chunks: Vec<String>,
    },
    /// Cancel the task with a reason and stop the script.
    Cancelled(String),
    /// Fail the stream with an engine error and stop the script.
    Fail(String),
}

/// Scripted engine that replays the same steps for every task.
pub struct MockEngine {
    script: Vec<MockStep>,
    interceptor: Option<Arc<dyn ToolInterceptor>>,
}

impl MockEngine {
    /// Engine that replays the given steps for each task.
    pub fn with_script(script: Vec<MockStep>) -> Self {
        Self {
            script,
            interceptor: None,
        }
    }
}

impl Default for MockEngine {
    /// Short acknowledgement script used by the bundled binary.
    fn default() -> Self {
        Self::with_script(vec![
            MockStep::Text("On it. ".into()),
            MockStep::Text("Reviewing the workspace now.\n".into()),
            MockStep::Message("No external runtime is attached; this is the bundled development engine replaying a fixed transcript.".into()),
        ])
    }
}

impl AgentEngine for MockEngine {
    fn submit_task(&mut self, task: &str, model: &str) -> TaskEventStream {
        let (tx, rx) = mpsc::unbounded_channel();
        let script = self.script.clone();
        let interceptor = self.interceptor.clone();
        let preamble = format!("[{model}] task received: {task}\n");

        tokio::spawn(async move {
            // Keep the sender alive for the task lifetime so interceptors
            // observe a live (unfired) cancellation channel.
            let (_cancel_tx, cancel_rx) = watch::channel(false);

            if tx.send(Ok(TaskEvent::Text { content: preamble })).is_err() {
                return;
            }

            for step in script {
                let keep_going = match step {
                    MockStep::Text(content) => tx.send(Ok(TaskEvent::Text { content })).is_ok(),
                    MockStep::Message(message) => {
                        tx.send(Ok(TaskEvent::Message { message })).is_ok()
                    }
                    MockStep::ToolCall {
                        invocation,
                        input_chunks,
                    } => {
                        let approved = match &interceptor {
                            Some(interceptor) => {
                                interceptor.authorize(&invocation, cancel_rx.clone()).await
                            }
                            None => true,
                        };
                        if !approved {
                            let _ = tx.send(Ok(TaskEvent::Cancelled {
                                reason: format!(
                                    "tool \"{}\" was denied approval",
                                    invocation.name
                                ),
                            }));
                            return;
                        }
                        if tx
                            .send(Ok(TaskEvent::ToolUse {
                                tool_name: invocation.name.clone(),
                            }))
                            .is_err()
                        {
                            return;
                        }
                        input_chunks.into_iter().all(|partial_input| {
                            tx.send(Ok(TaskEvent::ToolUseInput { partial_input })).is_ok()
                        })
                    }
                    MockStep::Cancelled(reason) => {
                        let _ = tx.send(Ok(TaskEvent::Cancelled { reason }));
                        return;
                    }
                    MockStep::Fail(message) => {
                        let _ = tx.send(Err(EngineError::new(message)));
                        return;
                    }
                };
                if !keep_going {
                    return;
                }
            }
        });

        rx
    }

    fn install_interceptor(&mut self, interceptor: Arc<dyn ToolInterceptor>) {
        self.interceptor = Some(interceptor);
    }
}
