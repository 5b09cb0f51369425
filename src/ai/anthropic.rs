//! Claude-backed commit messages via the Anthropic API.
//!
//! In Sonnet mode the service opens a conversation on first use and sends
//! its id with every message request made through the same instance.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::AiError;

use super::prompt::{MAX_COMPLETION_TOKENS, build_commit_prompt, clean_message};
use super::{AiService, Vendor, http_client};

/// Anthropic API base URL.
const ANTHROPIC_API_BASE: &str = "https://api.anthropic.com";

const ANTHROPIC_VERSION: &str = "2023-06-01";

const CLAUDE_MODEL: &str = "claude-3-5-haiku-latest";
const SONNET_MODEL: &str = "claude-sonnet-4-0";

const TEMPERATURE: f32 = 0.7;

pub struct ClaudeService {
    client: reqwest::Client,
    api_key: SecretString,
    base_url: String,
    use_sonnet: bool,
    conversation_id: Option<String>,
}

impl ClaudeService {
    pub fn new(api_key: SecretString, use_sonnet: bool) -> Result<Self, AiError> {
        Ok(Self {
            client: http_client()?,
            api_key,
            base_url: ANTHROPIC_API_BASE.to_string(),
            use_sonnet,
            conversation_id: None,
        })
    }

    /// Point the client at a different API host.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// The active conversation, if one has been opened.
    pub fn conversation_id(&self) -> Option<&str> {
        self.conversation_id.as_deref()
    }

    fn vendor_kind(&self) -> Vendor {
        if self.use_sonnet {
            Vendor::ClaudeSonnet
        } else {
            Vendor::Claude
        }
    }

    fn model(&self) -> &'static str {
        if self.use_sonnet { SONNET_MODEL } else { CLAUDE_MODEL }
    }

    fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.client
            .post(format!("{}{}", self.base_url, path))
            .header("x-api-key", self.api_key.expose_secret())
            .header("anthropic-version", ANTHROPIC_VERSION)
    }

    /// Return the conversation id, opening a conversation on first use.
    async fn ensure_conversation(&mut self) -> Result<String, AiError> {
        if let Some(id) = &self.conversation_id {
            return Ok(id.clone());
        }

        let vendor = self.vendor_kind();
        let response = self
            .post("/v1/conversation")
            .json(&serde_json::json!({}))
            .send()
            .await
            .map_err(|source| AiError::Request { vendor, source })?;

        let parsed: ConversationResponse = read_json(response, vendor).await?;
        let id = parsed.conversation_id.ok_or_else(|| AiError::InvalidResponse {
            vendor,
            detail: "conversation response has no conversation_id".to_string(),
        })?;

        debug!("Opened Claude conversation {}", id);
        self.conversation_id = Some(id.clone());
        Ok(id)
    }
}

#[derive(Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    temperature: f32,
    messages: Vec<Message<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    conversation_id: Option<String>,
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: Option<String>,
}

#[derive(Deserialize)]
struct ConversationResponse {
    conversation_id: Option<String>,
}

/// Check the status and decode a JSON body.
async fn read_json<T: for<'de> Deserialize<'de>>(
    response: reqwest::Response,
    vendor: Vendor,
) -> Result<T, AiError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(AiError::Api {
            vendor,
            status: status.as_u16(),
            body,
        });
    }

    response.json().await.map_err(|e| AiError::InvalidResponse {
        vendor,
        detail: e.to_string(),
    })
}

#[async_trait]
impl AiService for ClaudeService {
    fn vendor(&self) -> Vendor {
        self.vendor_kind()
    }

    async fn generate_commit_message(&mut self, diff: &str) -> Result<String, AiError> {
        let vendor = self.vendor_kind();
        let conversation_id = if self.use_sonnet {
            Some(self.ensure_conversation().await?)
        } else {
            None
        };

        let prompt = build_commit_prompt(diff);
        let body = MessagesRequest {
            model: self.model(),
            max_tokens: MAX_COMPLETION_TOKENS,
            temperature: TEMPERATURE,
            messages: vec![Message {
                role: "user",
                content: &prompt,
            }],
            conversation_id,
        };

        debug!("{} prompt length: {} chars", vendor, prompt.len());

        let response = self
            .post("/v1/messages")
            .json(&body)
            .send()
            .await
            .map_err(|source| AiError::Request { vendor, source })?;

        let parsed: MessagesResponse = read_json(response, vendor).await?;

        let text: String = parsed
            .content
            .into_iter()
            .filter(|block| block.kind == "text")
            .filter_map(|block| block.text)
            .collect::<Vec<_>>()
            .join("");

        let message = clean_message(&text);
        if message.is_empty() {
            return Err(AiError::EmptyResponse(vendor));
        }

        Ok(message)
    }
}
