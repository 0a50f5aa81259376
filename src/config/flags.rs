//! Command-line argument tokenizer.
//!
//! Tokens are processed left to right with no positional arguments: the
//! session is driven interactively, so every token must be a known flag or a
//! value consumed by the preceding flag. Repeated flags are last-write-wins.

use crate::error::ArgsError;

use super::resolve::{parse_non_negative_integer, parse_positive_integer};
use super::types::CliFlags;

/// Usage screen printed for `-h`/`--help`.
pub const USAGE: &str = "\
Zypher Agent CLI

Usage:
  zypher [options]

Options:
  -p, --provider <openai|anthropic>   Choose the LLM provider (default: openai)
  -m, --model <id>                    Override the model id
  -w, --workspace <path>              Directory the agent should operate in
      --base-url <url>                Custom API base URL
      --api-key <key>                 Provider API key (or use provider-specific env)
      --openai-api-key <key>          OpenAI API key override
      --anthropic-api-key <key>       Anthropic API key override
      --image-api-key <key>           API key for image tools (defaults to OpenAI key)
      --zypher-home <path>            Override ~/.zypher directory
      --user-id <id>                  User identifier for telemetry/logging
      --max-iterations <n>            Limit agent loops
      --max-tokens <n>                Override max tokens per task
      --task-timeout <ms>             Override task timeout in milliseconds
      --auto-approve-tools, -y        Skip approval prompts (dangerous)
      --no-checkpoints                Disable git-based checkpoints
  -h, --help                          Show this help message

Environment shortcuts:
  OPENAI_API_KEY / ANTHROPIC_API_KEY  Provider keys
  ZYPHER_PROVIDER, ZYPHER_MODEL, ZYPHER_WORKDIR, ZYPHER_BASE_URL,
  ZYPHER_AUTO_APPROVE, ZYPHER_DISABLE_CHECKPOINTS, ZYPHER_MAX_ITERATIONS,
  ZYPHER_MAX_TOKENS, ZYPHER_TIMEOUT_MS
";

/// Parse an ordered argument list (without the program name) into a flag set.
pub fn parse_cli_args<I>(args: I) -> Result<CliFlags, ArgsError>
where
    I: IntoIterator,
    I::Item: Into<String>,
{
    let mut flags = CliFlags::default();
    let mut tokens = args.into_iter().map(Into::into);

    while let Some(arg) = tokens.next() {
        if arg == "--" {
            break;
        }

        match arg.as_str() {
            "-p" | "--provider" => flags.provider = Some(read_value(&mut tokens, &arg)?),
            "-m" | "--model" => flags.model = Some(read_value(&mut tokens, &arg)?),
            "-w" | "--workspace" => flags.workspace = Some(read_value(&mut tokens, &arg)?),
            "--base-url" => flags.base_url = Some(read_value(&mut tokens, &arg)?),
            "--api-key" => flags.api_key = Some(read_value(&mut tokens, &arg)?),
            "--openai-api-key" => flags.openai_api_key = Some(read_value(&mut tokens, &arg)?),
            "--anthropic-api-key" => {
                flags.anthropic_api_key = Some(read_value(&mut tokens, &arg)?)
            }
            "--image-api-key" => flags.image_api_key = Some(read_value(&mut tokens, &arg)?),
            "--zypher-home" => flags.zypher_home = Some(read_value(&mut tokens, &arg)?),
            "--user-id" => flags.user_id = Some(read_value(&mut tokens, &arg)?),
            "--max-iterations" => {
                let raw = read_value(&mut tokens, &arg)?;
                flags.max_iterations = Some(
                    parse_positive_integer(&raw, "max-iterations").map_err(ArgsError::InvalidValue)?,
                );
            }
            "--max-tokens" => {
                let raw = read_value(&mut tokens, &arg)?;
                flags.max_tokens = Some(
                    parse_positive_integer(&raw, "max-tokens").map_err(ArgsError::InvalidValue)?,
                );
            }
            "--task-timeout" => {
                let raw = read_value(&mut tokens, &arg)?;
                flags.task_timeout_ms = Some(
                    parse_non_negative_integer(&raw, "task-timeout")
                        .map_err(ArgsError::InvalidValue)?,
                );
            }
            "--auto-approve-tools" | "-y" | "--yes" => flags.auto_approve_tools = Some(true),
            "--no-checkpoints" => flags.disable_checkpoints = Some(true),
            "-h" | "--help" => flags.show_help = true,
            _ => {
                if arg.starts_with('-') {
                    return Err(ArgsError::UnknownOption(arg));
                }
                return Err(ArgsError::UnexpectedPositional(arg));
            }
        }
    }

    Ok(flags)
}

/// Consume the next token as the value for `flag`.
fn read_value<I>(tokens: &mut I, flag: &str) -> Result<String, ArgsError>
where
    I: Iterator<Item = String>,
{
    tokens
        .next()
        .ok_or_else(|| ArgsError::MissingValue(flag.to_string()))
}
