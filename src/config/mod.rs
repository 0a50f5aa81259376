//! Runtime configuration: CLI flag parsing and precedence resolution.
//!
//! Configuration is assembled from exactly three sources, in strict
//! precedence order per field:
//!
//! 1. explicit command-line flag,
//! 2. environment variable(s),
//! 3. computed default.
//!
//! The resolver never touches the process environment or working directory
//! itself; both are injected by the caller, which keeps resolution a pure
//! function and lets tests drive it with fixture lookups.

pub mod defaults;
mod flags;
mod resolve;
mod types;

pub use flags::{parse_cli_args, USAGE};
pub use resolve::build_runtime_config;
pub use types::{CliFlags, Provider, RuntimeConfig};
