//! Zypher Agent CLI, an interactive terminal front-end for the Zypher
//! agent runtime.
//!
//! The crate owns four things: command-line flag parsing, resolution of one
//! immutable runtime configuration from flags/environment/defaults, the tool
//! approval gate, and the interactive session loop that streams a task's
//! typed events to the terminal. The agent runtime itself is an external
//! collaborator behind [`engine::AgentEngine`]; embedders wire their own
//! engine and drive [`session::run_session`] with it.
//!
//! # Quick start
//!
//! ```no_run
//! use std::path::Path;
//! use zypher_cli::config::{build_runtime_config, parse_cli_args};
//!
//! let flags = parse_cli_args(["--provider", "openai"]).unwrap();
//! let config = build_runtime_config(
//!     &flags,
//!     |name| std::env::var(name).ok(),
//!     Path::new("/srv/project"),
//! )
//! .unwrap();
//! println!("{} / {}", config.provider, config.model);
//! ```

pub mod approval;
pub mod config;
pub mod engine;
pub mod error;
pub mod prompt;
pub mod render;
pub mod session;
#[cfg(test)]
pub mod testsupport;
