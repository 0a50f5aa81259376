//! Built-in defaults and the environment variable names the resolver consults.

/// Provider assumed when neither flag nor environment selects one.
pub const DEFAULT_PROVIDER: &str = "openai";

/// Default model id for the OpenAI provider.
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4o-mini";

/// Default model id for the Anthropic provider.
pub const DEFAULT_ANTHROPIC_MODEL: &str = "claude-3.5-sonnet-20241022";

pub const ENV_PROVIDER: &str = "ZYPHER_PROVIDER";
pub const ENV_MODEL: &str = "ZYPHER_MODEL";
pub const ENV_WORKDIR: &str = "ZYPHER_WORKDIR";
pub const ENV_HOME: &str = "ZYPHER_HOME";
pub const ENV_USER_ID: &str = "ZYPHER_USER_ID";
pub const ENV_BASE_URL: &str = "ZYPHER_BASE_URL";
pub const ENV_API_KEY: &str = "ZYPHER_API_KEY";
pub const ENV_IMAGE_API_KEY: &str = "ZYPHER_IMAGE_API_KEY";
pub const ENV_DISABLE_CHECKPOINTS: &str = "ZYPHER_DISABLE_CHECKPOINTS";
pub const ENV_AUTO_APPROVE: &str = "ZYPHER_AUTO_APPROVE";
pub const ENV_MAX_ITERATIONS: &str = "ZYPHER_MAX_ITERATIONS";
pub const ENV_MAX_TOKENS: &str = "ZYPHER_MAX_TOKENS";
pub const ENV_TIMEOUT_MS: &str = "ZYPHER_TIMEOUT_MS";

pub const ENV_OPENAI_API_KEY: &str = "OPENAI_API_KEY";
pub const ENV_ANTHROPIC_API_KEY: &str = "ANTHROPIC_API_KEY";
pub const ENV_OPENAI_BASE_URL: &str = "OPENAI_BASE_URL";
pub const ENV_ANTHROPIC_BASE_URL: &str = "ANTHROPIC_BASE_URL";
