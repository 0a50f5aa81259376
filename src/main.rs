//! CLI entry point for zypher.

use std::io::IsTerminal;
use std::sync::Arc;

use zypher_cli::approval::PromptApprovalInterceptor;
use zypher_cli::config::{build_runtime_config, parse_cli_args, USAGE};
use zypher_cli::engine::mock::MockEngine;
use zypher_cli::engine::AgentEngine;
use zypher_cli::error::CliError;
use zypher_cli::prompt::{LinePrompt, TerminalPrompt};
use zypher_cli::render::{RenderSink, Renderer};
use zypher_cli::session::run_session;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), CliError> {
    let flags = parse_cli_args(std::env::args().skip(1))?;
    if flags.show_help {
        print!("{USAGE}");
        return Ok(());
    }

    init_tracing();

    let cwd = std::env::current_dir()?;
    let config = Arc::new(build_runtime_config(
        &flags,
        |name| std::env::var(name).ok(),
        &cwd,
    )?);
    tracing::debug!(
        provider = %config.provider,
        model = %config.model,
        workspace = %config.workspace.display(),
        "resolved runtime configuration"
    );

    let sink: Arc<dyn RenderSink> = Arc::new(Renderer::new(std::io::stdout().is_terminal()));
    let prompt: Arc<dyn LinePrompt> = Arc::new(TerminalPrompt::new());

    // The bundled binary runs the deterministic development engine; real
    // runtimes embed through the same `AgentEngine` seam.
    let mut engine = MockEngine::default();
    engine.install_interceptor(Arc::new(PromptApprovalInterceptor::new(
        Arc::clone(&config),
        Arc::clone(&prompt),
        Arc::clone(&sink),
    )));

    run_session(&mut engine, &config, prompt.as_ref(), sink.as_ref()).await
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
