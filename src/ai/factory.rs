//! Vendor selection from command-line flags and configuration.

use secrecy::{ExposeSecret, SecretString};

use crate::config::{ANTHROPIC_API_KEY_ENV, Config, OPENAI_API_KEY_ENV};
use crate::error::AiError;

use super::{AiService, ChatGptService, ClaudeService, Vendor};

/// Vendor selector flags and explicit API keys from the command line.
#[derive(Debug, Default, Clone)]
pub struct AiFlags {
    pub chatgpt: bool,
    pub claude: bool,
    pub sonnet: bool,
    pub openai_api_key: Option<String>,
    pub anthropic_api_key: Option<String>,
}

/// A resolved vendor together with the key it will use.
#[derive(Debug)]
pub struct AiSelection {
    pub vendor: Vendor,
    pub api_key: SecretString,
}

impl AiSelection {
    /// Construct the service for this selection. No network I/O happens here.
    pub fn into_service(self) -> Result<Box<dyn AiService>, AiError> {
        Ok(match self.vendor {
            Vendor::ChatGpt => Box::new(ChatGptService::new(self.api_key)?),
            Vendor::Claude => Box::new(ClaudeService::new(self.api_key, false)?),
            Vendor::ClaudeSonnet => Box::new(ClaudeService::new(self.api_key, true)?),
        })
    }
}

/// Resolve exactly one vendor and its API key.
///
/// Keys come from the explicit flag first, then the environment captured in
/// `config`. Conflicting selectors, `--sonnet` without `--claude`, a missing
/// key, or no selector at all are configuration errors.
pub fn resolve_selection(flags: &AiFlags, config: &Config) -> Result<AiSelection, AiError> {
    if flags.chatgpt && (flags.claude || flags.sonnet) {
        return Err(AiError::ConflictingVendors);
    }
    if flags.sonnet && !flags.claude {
        return Err(AiError::SonnetRequiresClaude);
    }

    if flags.chatgpt {
        let api_key = pick_key(flags.openai_api_key.as_deref(), config.openai_api_key.as_ref())
            .ok_or(AiError::MissingApiKey {
                vendor: Vendor::ChatGpt,
                flag: "--openai-api-key",
                env_var: OPENAI_API_KEY_ENV,
            })?;
        return Ok(AiSelection {
            vendor: Vendor::ChatGpt,
            api_key,
        });
    }

    if flags.claude {
        let vendor = if flags.sonnet {
            Vendor::ClaudeSonnet
        } else {
            Vendor::Claude
        };
        let api_key = pick_key(
            flags.anthropic_api_key.as_deref(),
            config.anthropic_api_key.as_ref(),
        )
        .ok_or(AiError::MissingApiKey {
            vendor,
            flag: "--anthropic-api-key",
            env_var: ANTHROPIC_API_KEY_ENV,
        })?;
        return Ok(AiSelection { vendor, api_key });
    }

    Err(AiError::NoVendorSelected)
}

/// Resolve the selection and build its service.
pub fn create_service(flags: &AiFlags, config: &Config) -> Result<Box<dyn AiService>, AiError> {
    resolve_selection(flags, config)?.into_service()
}

fn pick_key(flag: Option<&str>, env: Option<&SecretString>) -> Option<SecretString> {
    match flag.filter(|k| !k.trim().is_empty()) {
        Some(key) => Some(SecretString::from(key.to_string())),
        None => env.map(|k| SecretString::from(k.expose_secret().to_string())),
    }
}
