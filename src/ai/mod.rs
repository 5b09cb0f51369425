//! Commit message generation through LLM vendor APIs.
//!
//! Every vendor implements [`AiService`]; the [`factory`] picks exactly one
//! from the command-line flags and the resolved [`Config`](crate::config::Config).

pub mod anthropic;
pub mod factory;
pub mod openai;
pub mod prompt;

use std::fmt;

use async_trait::async_trait;

use crate::error::AiError;

pub use anthropic::ClaudeService;
pub use factory::{AiFlags, AiSelection, create_service, resolve_selection};
pub use openai::ChatGptService;

/// Supported commit message vendors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Vendor {
    ChatGpt,
    Claude,
    /// Claude with the Sonnet model and a persistent conversation session.
    ClaudeSonnet,
}

impl Vendor {
    pub fn as_str(&self) -> &'static str {
        match self {
            Vendor::ChatGpt => "ChatGPT",
            Vendor::Claude => "Claude",
            Vendor::ClaudeSonnet => "Claude Sonnet",
        }
    }
}

impl fmt::Display for Vendor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A backend that turns a staged diff into a commit message.
///
/// This abstraction allows mocking the vendor APIs in tests.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AiService: Send {
    /// Which vendor this service talks to.
    fn vendor(&self) -> Vendor;

    /// Generate a commit message for the given diff.
    async fn generate_commit_message(&mut self, diff: &str) -> Result<String, AiError>;
}

/// Shared HTTP client for vendor requests.
pub(crate) fn http_client() -> Result<reqwest::Client, AiError> {
    reqwest::Client::builder()
        .user_agent(concat!("ghw/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(AiError::Client)
}
