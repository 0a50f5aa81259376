//! Unified error types for the CLI front-end.

use std::fmt;

// ---------------------------------------------------------------------------
// ArgsError
// ---------------------------------------------------------------------------

/// Errors raised while tokenizing command-line arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgsError {
    /// A value-taking flag appeared as the final token.
    MissingValue(String),
    /// A `-`-prefixed token that maps to no known flag.
    UnknownOption(String),
    /// A bare token; the interactive CLI accepts no positional arguments.
    UnexpectedPositional(String),
    /// A numeric flag failed integer or range validation.
    InvalidValue(String),
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingValue(flag) => write!(f, "Missing value for {flag}"),
            Self::UnknownOption(token) => write!(f, "Unknown option: {token}"),
            Self::UnexpectedPositional(token) => write!(
                f,
                "Unexpected positional argument \"{token}\". This CLI is interactive so no positional arguments are supported."
            ),
            Self::InvalidValue(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for ArgsError {}

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// Errors raised while resolving the runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Provider value outside the supported set.
    UnsupportedProvider(String),
    /// No API key reachable for the resolved provider.
    MissingApiKey { provider: String, env_var: String },
    /// A `~/` path needed expansion but no home variable was set.
    HomeNotSet,
    /// Any other validation failure (bad numeric env value, etc).
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedProvider(value) => write!(
                f,
                "Unsupported provider \"{value}\". Supported providers: openai, anthropic."
            ),
            Self::MissingApiKey { provider, env_var } => write!(
                f,
                "Missing API key for provider \"{provider}\". Set {env_var}, ZYPHER_API_KEY, or pass --api-key."
            ),
            Self::HomeNotSet => write!(f, "Cannot resolve '~' because HOME is not set."),
            Self::Invalid(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ---------------------------------------------------------------------------
// EngineError
// ---------------------------------------------------------------------------

/// Error surfaced by the external agent runtime while producing a task's
/// event stream. Opaque to the front-end; reported and recovered locally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineError {
    message: String,
}

impl EngineError {
    /// Creates a new engine error.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Returns the underlying error message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for EngineError {}

impl From<String> for EngineError {
    fn from(message: String) -> Self {
        Self::new(message)
    }
}

impl From<&str> for EngineError {
    fn from(message: &str) -> Self {
        Self::new(message)
    }
}

// ---------------------------------------------------------------------------
// CliError (top-level)
// ---------------------------------------------------------------------------

/// Top-level error type for the binary's fatal exit path.
#[derive(Debug)]
pub enum CliError {
    Args(ArgsError),
    Config(ConfigError),
    Io(std::io::Error),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Args(e) => write!(f, "{e}"),
            Self::Config(e) => write!(f, "{e}"),
            Self::Io(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for CliError {}

impl From<ArgsError> for CliError {
    fn from(e: ArgsError) -> Self {
        Self::Args(e)
    }
}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn args_error_display() {
        assert_eq!(
            ArgsError::MissingValue("--model".into()).to_string(),
            "Missing value for --model"
        );
        assert_eq!(
            ArgsError::UnknownOption("--frobnicate".into()).to_string(),
            "Unknown option: --frobnicate"
        );
        let positional = ArgsError::UnexpectedPositional("do-things".into()).to_string();
        assert!(positional.contains("Unexpected positional argument \"do-things\""));
        assert!(positional.contains("no positional arguments"));
    }

    #[test]
    fn config_error_names_provider_alternatives() {
        let e = ConfigError::MissingApiKey {
            provider: "openai".into(),
            env_var: "OPENAI_API_KEY".into(),
        };
        let msg = e.to_string();
        assert!(msg.contains("Missing API key for provider \"openai\""));
        assert!(msg.contains("OPENAI_API_KEY"));
        assert!(msg.contains("ZYPHER_API_KEY"));
        assert!(msg.contains("--api-key"));
    }

    #[test]
    fn config_error_unsupported_provider_lists_supported_set() {
        let msg = ConfigError::UnsupportedProvider("mistral".into()).to_string();
        assert!(msg.contains("Unsupported provider \"mistral\""));
        assert!(msg.contains("openai, anthropic"));
    }

    #[test]
    fn engine_error_round_trips_message() {
        let e = EngineError::from("stream reset");
        assert_eq!(e.message(), "stream reset");
        assert_eq!(e.to_string(), "stream reset");
    }

    #[test]
    fn cli_error_from_variants() {
        let args = CliError::from(ArgsError::UnknownOption("-x".into()));
        assert!(args.to_string().contains("Unknown option: -x"));
        let config = CliError::from(ConfigError::HomeNotSet);
        assert!(config.to_string().contains("HOME is not set"));
    }
}
