//! Flag/environment/default precedence resolution.
//!
//! `build_runtime_config` is a pure function of the flag set, an injected
//! environment lookup, and the caller-supplied working directory. Every field
//! resolves with strict precedence: explicit CLI flag, then environment
//! variable(s), then computed default. Validation fails fast on the first
//! unsatisfiable required field.

use std::path::{Path, PathBuf};

use crate::error::ConfigError;

use super::defaults::{
    DEFAULT_PROVIDER, ENV_API_KEY, ENV_AUTO_APPROVE, ENV_BASE_URL, ENV_DISABLE_CHECKPOINTS,
    ENV_HOME, ENV_IMAGE_API_KEY, ENV_MAX_ITERATIONS, ENV_MAX_TOKENS, ENV_MODEL,
    ENV_OPENAI_API_KEY, ENV_PROVIDER, ENV_TIMEOUT_MS, ENV_USER_ID, ENV_WORKDIR,
};
use super::types::{CliFlags, Provider, RuntimeConfig};

/// Merge a parsed flag set and an environment snapshot into a validated
/// runtime configuration.
pub fn build_runtime_config<FEnv>(
    flags: &CliFlags,
    env_lookup: FEnv,
    cwd: &Path,
) -> Result<RuntimeConfig, ConfigError>
where
    FEnv: Fn(&str) -> Option<String>,
{
    let provider = Provider::parse(
        &flags
            .provider
            .clone()
            .or_else(|| env_lookup(ENV_PROVIDER))
            .unwrap_or_else(|| DEFAULT_PROVIDER.to_string()),
    )?;

    let workspace = resolve_path(
        &flags
            .workspace
            .clone()
            .or_else(|| env_lookup(ENV_WORKDIR))
            .unwrap_or_else(|| cwd.display().to_string()),
        &env_lookup,
        cwd,
    )?;

    let zypher_home = match flags.zypher_home.clone().or_else(|| env_lookup(ENV_HOME)) {
        Some(raw) => Some(resolve_path(&raw, &env_lookup, cwd)?),
        None => None,
    };

    let model = flags
        .model
        .clone()
        .or_else(|| env_lookup(ENV_MODEL))
        .unwrap_or_else(|| provider.default_model().to_string());

    let user_id = flags.user_id.clone().or_else(|| env_lookup(ENV_USER_ID));

    let base_url = flags
        .base_url
        .clone()
        .or_else(|| env_lookup(ENV_BASE_URL))
        .or_else(|| env_lookup(provider.base_url_env()));

    let disable_checkpoints = flags
        .disable_checkpoints
        .or_else(|| parse_bool(env_lookup(ENV_DISABLE_CHECKPOINTS)))
        .unwrap_or(false);
    let auto_approve_tools = flags
        .auto_approve_tools
        .or_else(|| parse_bool(env_lookup(ENV_AUTO_APPROVE)))
        .unwrap_or(false);

    let max_iterations = match flags.max_iterations {
        Some(value) => Some(value),
        None => parse_optional_positive(env_lookup(ENV_MAX_ITERATIONS), ENV_MAX_ITERATIONS)?,
    };
    let max_tokens = match flags.max_tokens {
        Some(value) => Some(value),
        None => parse_optional_positive(env_lookup(ENV_MAX_TOKENS), ENV_MAX_TOKENS)?,
    };
    let task_timeout_ms = match flags.task_timeout_ms {
        Some(value) => Some(value),
        None => parse_optional_non_negative(env_lookup(ENV_TIMEOUT_MS), ENV_TIMEOUT_MS)?,
    };

    let api_key = resolve_api_key(provider, flags, &env_lookup)?;

    let image_api_key = flags
        .image_api_key
        .clone()
        .or_else(|| env_lookup(ENV_IMAGE_API_KEY))
        .or_else(|| match provider {
            Provider::OpenAi => Some(api_key.clone()),
            // Image tools run against OpenAI; the environment wins over a
            // leftover --openai-api-key flag here.
            Provider::Anthropic => {
                env_lookup(ENV_OPENAI_API_KEY).or_else(|| flags.openai_api_key.clone())
            }
        });

    Ok(RuntimeConfig {
        provider,
        model,
        api_key,
        workspace,
        base_url,
        zypher_home,
        user_id,
        image_api_key,
        disable_checkpoints,
        auto_approve_tools,
        max_iterations,
        max_tokens,
        task_timeout_ms,
    })
}

/// Resolve the provider API key: generic flag/env first, then the
/// provider-specific flag and environment variable.
fn resolve_api_key<FEnv>(
    provider: Provider,
    flags: &CliFlags,
    env_lookup: &FEnv,
) -> Result<String, ConfigError>
where
    FEnv: Fn(&str) -> Option<String>,
{
    let general_key = flags.api_key.clone().or_else(|| env_lookup(ENV_API_KEY));

    let key = match provider {
        Provider::OpenAi => general_key
            .or_else(|| flags.openai_api_key.clone())
            .or_else(|| env_lookup(provider.api_key_env())),
        Provider::Anthropic => general_key
            .or_else(|| flags.anthropic_api_key.clone())
            .or_else(|| env_lookup(provider.api_key_env())),
    };

    // An empty key never satisfies resolution.
    match key {
        Some(key) if !key.is_empty() => Ok(key),
        _ => Err(ConfigError::MissingApiKey {
            provider: provider.as_str().to_string(),
            env_var: provider.api_key_env().to_string(),
        }),
    }
}

/// Expand `~/` against HOME (or USERPROFILE) and absolutize relative paths
/// against the supplied working directory.
fn resolve_path<FEnv>(value: &str, env_lookup: &FEnv, cwd: &Path) -> Result<PathBuf, ConfigError>
where
    FEnv: Fn(&str) -> Option<String>,
{
    if let Some(rest) = value.strip_prefix("~/") {
        let home = env_lookup("HOME")
            .or_else(|| env_lookup("USERPROFILE"))
            .ok_or(ConfigError::HomeNotSet)?;
        return Ok(Path::new(&home).join(rest));
    }

    let path = Path::new(value);
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        Ok(cwd.join(path))
    }
}

/// Interpret a boolean environment value. Empty or unset values are
/// "unspecified" and fall through to the next precedence source.
fn parse_bool(value: Option<String>) -> Option<bool> {
    let value = value?;
    let normalized = value.trim().to_ascii_lowercase();
    if normalized.is_empty() {
        return None;
    }
    Some(matches!(
        normalized.as_str(),
        "1" | "true" | "yes" | "y" | "on"
    ))
}

/// Parse a base-10 integer that must be strictly positive.
pub(super) fn parse_positive_integer(raw: &str, label: &str) -> Result<u64, String> {
    match raw.parse::<u64>() {
        Ok(value) if value > 0 => Ok(value),
        _ => Err(format!(
            "Expected {label} to be a positive integer. Got \"{raw}\"."
        )),
    }
}

/// Parse a base-10 integer that must be non-negative.
pub(super) fn parse_non_negative_integer(raw: &str, label: &str) -> Result<u64, String> {
    raw.parse::<u64>().map_err(|_| {
        format!("Expected {label} to be a non-negative integer. Got \"{raw}\".")
    })
}

fn parse_optional_positive(
    value: Option<String>,
    label: &str,
) -> Result<Option<u64>, ConfigError> {
    value
        .map(|raw| parse_positive_integer(&raw, label).map_err(ConfigError::Invalid))
        .transpose()
}

fn parse_optional_non_negative(
    value: Option<String>,
    label: &str,
) -> Result<Option<u64>, ConfigError> {
    value
        .map(|raw| parse_non_negative_integer(&raw, label).map_err(ConfigError::Invalid))
        .transpose()
}
