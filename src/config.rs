//! Environment-derived configuration, resolved once at startup.
//!
//! Everything the core logic would otherwise read ad hoc from the process
//! environment lives here, so handlers receive it explicitly and tests can
//! build one without touching global state.

use std::env;
use std::path::{Path, PathBuf};

use secrecy::SecretString;

/// OpenAI API key for ChatGPT.
pub const OPENAI_API_KEY_ENV: &str = "OPENAI_API_KEY";

/// Anthropic API key for Claude.
pub const ANTHROPIC_API_KEY_ENV: &str = "ANTHROPIC_API_KEY";

/// Base directory for structured clones; overrides `--dir` when set.
pub const BASE_DIR_ENV: &str = "GHW_BASE_DIR";

/// Base directory used when neither `--dir` nor `GHW_BASE_DIR` is given.
pub const DEFAULT_BASE_DIR: &str = "~/gh";

/// Resolved process configuration.
#[derive(Debug, Default)]
pub struct Config {
    pub openai_api_key: Option<SecretString>,
    pub anthropic_api_key: Option<SecretString>,
    pub base_dir_override: Option<PathBuf>,
    pub home_dir: Option<PathBuf>,
}

impl Config {
    /// Read configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// Empty values are treated the same as unset ones.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Self {
            openai_api_key: get(OPENAI_API_KEY_ENV).map(SecretString::from),
            anthropic_api_key: get(ANTHROPIC_API_KEY_ENV).map(SecretString::from),
            base_dir_override: get(BASE_DIR_ENV).map(PathBuf::from),
            home_dir: get("HOME").map(PathBuf::from),
        }
    }

    /// Expand a leading `~` against the configured home directory.
    ///
    /// Paths without a leading `~`, or when no home directory is known, are
    /// returned unchanged.
    pub fn expand_home(&self, path: &Path) -> PathBuf {
        let Some(home) = &self.home_dir else {
            return path.to_path_buf();
        };

        match path.strip_prefix("~") {
            Ok(rest) => home.join(rest),
            Err(_) => path.to_path_buf(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn test_from_env_reads_all_variables() {
        temp_env::with_vars(
            [
                (OPENAI_API_KEY_ENV, Some("sk-openai")),
                (ANTHROPIC_API_KEY_ENV, Some("sk-ant")),
                (BASE_DIR_ENV, Some("/srv/code")),
                ("HOME", Some("/home/octocat")),
            ],
            || {
                let config = Config::from_env();
                assert_eq!(
                    config.openai_api_key.as_ref().map(|k| k.expose_secret()),
                    Some("sk-openai")
                );
                assert_eq!(
                    config.anthropic_api_key.as_ref().map(|k| k.expose_secret()),
                    Some("sk-ant")
                );
                assert_eq!(config.base_dir_override, Some(PathBuf::from("/srv/code")));
                assert_eq!(config.home_dir, Some(PathBuf::from("/home/octocat")));
            },
        );
    }

    #[test]
    fn test_from_env_treats_empty_as_unset() {
        temp_env::with_vars(
            [
                (OPENAI_API_KEY_ENV, Some("")),
                (ANTHROPIC_API_KEY_ENV, Some("   ")),
                (BASE_DIR_ENV, None::<&str>),
            ],
            || {
                let config = Config::from_env();
                assert!(config.openai_api_key.is_none());
                assert!(config.anthropic_api_key.is_none());
                assert!(config.base_dir_override.is_none());
            },
        );
    }

    #[test]
    fn test_debug_output_redacts_keys() {
        let config = Config::from_lookup(|key| {
            (key == OPENAI_API_KEY_ENV).then(|| "sk-very-secret".to_string())
        });
        let debug = format!("{:?}", config);
        assert!(!debug.contains("sk-very-secret"));
    }

    #[test]
    fn test_expand_home_replaces_tilde() {
        let config = Config {
            home_dir: Some(PathBuf::from("/home/octocat")),
            ..Default::default()
        };
        assert_eq!(
            config.expand_home(Path::new("~/gh")),
            PathBuf::from("/home/octocat/gh")
        );
        assert_eq!(config.expand_home(Path::new("~")), PathBuf::from("/home/octocat"));
    }

    #[test]
    fn test_expand_home_leaves_other_paths_alone() {
        let config = Config {
            home_dir: Some(PathBuf::from("/home/octocat")),
            ..Default::default()
        };
        assert_eq!(config.expand_home(Path::new("/tmp/gh")), PathBuf::from("/tmp/gh"));
        assert_eq!(config.expand_home(Path::new("~other/gh")), PathBuf::from("~other/gh"));
    }

    #[test]
    fn test_expand_home_without_home_is_identity() {
        let config = Config::default();
        assert_eq!(config.expand_home(Path::new("~/gh")), PathBuf::from("~/gh"));
    }
}
