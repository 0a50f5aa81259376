//! Interactive session loop.
//!
//! One task runs at a time: the loop reads a line, submits it to the engine,
//! and drains that task's event stream to the render sink before prompting
//! again. Stream failures are reported and the loop keeps running; only
//! `exit` (or closed input) ends the session.

use crate::config::RuntimeConfig;
use crate::engine::{AgentEngine, TaskEvent, TaskEventStream};
use crate::error::{CliError, EngineError};
use crate::prompt::LinePrompt;
use crate::render::RenderSink;

const TASK_QUESTION: &str = "Enter your task (or type exit): ";

/// Run the interactive loop until the user exits.
pub async fn run_session(
    engine: &mut dyn AgentEngine,
    config: &RuntimeConfig,
    prompt: &dyn LinePrompt,
    sink: &dyn RenderSink,
) -> Result<(), CliError> {
    sink.banner(
        config.provider.as_str(),
        &config.model,
        &config.workspace.display().to_string(),
    );

    loop {
        let Some(line) = prompt.ask(TASK_QUESTION).await? else {
            sink.goodbye();
            break;
        };
        let task = line.trim();

        if task.is_empty() {
            continue;
        }
        if task.eq_ignore_ascii_case("exit") {
            sink.goodbye();
            break;
        }

        tracing::debug!(model = %config.model, "submitting task");
        sink.task_started();
        let mut events = engine.submit_task(task, &config.model);
        match drain_task_events(&mut events, sink).await {
            Ok(cancelled) => sink.task_finished(cancelled),
            Err(error) => sink.stream_error(error.message()),
        }
    }

    Ok(())
}

/// Consume one task's event stream in arrival order.
///
/// Returns whether the task was cancelled. The `inline_text` flag tracks
/// whether streamed assistant text is mid-line, deciding when a line break or
/// role label must be emitted before the next event.
async fn drain_task_events(
    events: &mut TaskEventStream,
    sink: &dyn RenderSink,
) -> Result<bool, EngineError> {
    let mut inline_text = true;
    let mut cancelled = false;

    while let Some(item) = events.recv().await {
        let event = item?;

        if inline_text && !matches!(event, TaskEvent::Text { .. }) {
            sink.line_break();
            inline_text = false;
        }

        match event {
            TaskEvent::Text { content } => {
                if !inline_text {
                    sink.agent_label();
                    inline_text = true;
                }
                sink.text_fragment(&content);
            }
            TaskEvent::Message { message } => sink.message(&message),
            TaskEvent::ToolUse { tool_name } => sink.tool_started(&tool_name),
            TaskEvent::ToolUseInput { partial_input } => {
                sink.tool_input_fragment(&partial_input)
            }
            TaskEvent::Cancelled { reason } => {
                cancelled = true;
                sink.task_cancelled(&reason);
            }
        }
    }

    if inline_text {
        sink.line_break();
    }
    Ok(cancelled)
}
