//! Rendering contract and default terminal renderer.
//!
//! `RenderSink` is the output interface consumed by the session loop and the
//! approval gate. `Renderer` is the terminal implementation; tests substitute
//! a recording sink instead of capturing stdout.

use std::io::{self, Write};

use crossterm::style::{Color, Stylize};

/// Injectable rendering interface used by session orchestration code.
pub trait RenderSink: Send + Sync {
    /// Render the session banner with the resolved provider, model, and
    /// workspace.
    fn banner(&self, provider: &str, model: &str, workspace: &str);
    /// Announce that a submitted task started executing.
    fn task_started(&self);
    /// Render the assistant role label ahead of streamed text.
    fn agent_label(&self);
    /// Append one streamed text fragment, without a trailing newline.
    fn text_fragment(&self, content: &str);
    /// Emit one line break.
    fn line_break(&self);
    /// Render a complete message.
    fn message(&self, content: &str);
    /// Announce a tool invocation by name.
    fn tool_started(&self, name: &str);
    /// Append partial tool input, without a trailing newline.
    fn tool_input_fragment(&self, content: &str);
    /// Surface a task cancellation notice with its reason.
    fn task_cancelled(&self, reason: &str);
    /// Close out a drained task; prints the success banner unless cancelled.
    fn task_finished(&self, cancelled: bool);
    /// Report a stream failure and that the session keeps running.
    fn stream_error(&self, message: &str);
    /// Render a tool approval request with pretty-printed parameters.
    fn approval_request(&self, name: &str, parameters: &str);
    /// Render the session farewell.
    fn goodbye(&self);
    /// Render a generic error line.
    fn error(&self, message: &str);
}

/// Default stdout/stderr renderer.
pub struct Renderer {
    color: bool,
}

impl Renderer {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    fn flush_stdout(&self) {
        let _ = io::stdout().flush();
    }
}

impl RenderSink for Renderer {
    fn banner(&self, provider: &str, model: &str, workspace: &str) {
        if self.color {
            println!("{}", "\n+++ Welcome to Zypher Agent CLI +++\n".bold());
        } else {
            println!("\n+++ Welcome to Zypher Agent CLI +++\n");
        }
        println!("Provider:  {provider}");
        println!("Model:     {model}");
        println!("Workspace: {workspace}\n");
    }

    fn task_started(&self) {
        println!("\nStarting task execution...\n");
    }

    fn agent_label(&self) {
        if self.color {
            print!("{}", "Agent: ".with(Color::Blue));
        } else {
            print!("Agent: ");
        }
        self.flush_stdout();
    }

    fn text_fragment(&self, content: &str) {
        print!("{content}");
        self.flush_stdout();
    }

    fn line_break(&self) {
        println!();
    }

    fn message(&self, content: &str) {
        println!("{content}");
        println!();
    }

    fn tool_started(&self, name: &str) {
        let line = format!("\nUsing tool: {name}");
        if self.color {
            println!("{}", line.with(Color::Yellow));
        } else {
            println!("{line}");
        }
    }

    fn tool_input_fragment(&self, content: &str) {
        print!("{content}");
        self.flush_stdout();
    }

    fn task_cancelled(&self, reason: &str) {
        println!("\nTask cancelled: {reason}\n");
    }

    fn task_finished(&self, cancelled: bool) {
        println!();
        if !cancelled {
            if self.color {
                println!("{}", "Task completed successfully!\n".with(Color::Green));
            } else {
                println!("Task completed successfully!\n");
            }
        }
    }

    fn stream_error(&self, message: &str) {
        let line = format!("\nError: {message}");
        if self.color {
            eprintln!("{}", line.with(Color::Red));
        } else {
            eprintln!("{line}");
        }
        println!("\nReady for next task...\n");
    }

    fn approval_request(&self, name: &str, parameters: &str) {
        let block =
            format!("\n++++ Tool \"{name}\" requested approval with parameters:\n{parameters}\n");
        if self.color {
            println!("{}", block.with(Color::Red));
        } else {
            println!("{block}");
        }
    }

    fn goodbye(&self) {
        println!("Goodbye!");
    }

    fn error(&self, message: &str) {
        let line = format!("Error: {message}");
        if self.color {
            eprintln!("{}", line.with(Color::Red));
        } else {
            eprintln!("{line}");
        }
    }
}
