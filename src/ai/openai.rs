//! ChatGPT-backed commit messages via the OpenAI chat completions API.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::AiError;

use super::prompt::{MAX_COMPLETION_TOKENS, build_commit_prompt, clean_message};
use super::{AiService, Vendor, http_client};

/// OpenAI API base URL.
const OPENAI_API_BASE: &str = "https://api.openai.com";

const CHATGPT_MODEL: &str = "gpt-4-turbo";

/// Stateless ChatGPT client: every call is a single completion request.
pub struct ChatGptService {
    client: reqwest::Client,
    api_key: SecretString,
    base_url: String,
}

impl ChatGptService {
    pub fn new(api_key: SecretString) -> Result<Self, AiError> {
        Ok(Self {
            client: http_client()?,
            api_key,
            base_url: OPENAI_API_BASE.to_string(),
        })
    }

    /// Point the client at a different API host.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[async_trait]
impl AiService for ChatGptService {
    fn vendor(&self) -> Vendor {
        Vendor::ChatGpt
    }

    async fn generate_commit_message(&mut self, diff: &str) -> Result<String, AiError> {
        let prompt = build_commit_prompt(diff);
        let url = format!("{}/v1/chat/completions", self.base_url);

        let body = ChatRequest {
            model: CHATGPT_MODEL,
            messages: vec![ChatMessage {
                role: "user",
                content: &prompt,
            }],
            max_tokens: MAX_COMPLETION_TOKENS,
        };

        debug!("ChatGPT prompt length: {} chars", prompt.len());

        let response = self
            .client
            .post(&url)
            .bearer_auth(self.api_key.expose_secret())
            .json(&body)
            .send()
            .await
            .map_err(|source| AiError::Request {
                vendor: Vendor::ChatGpt,
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AiError::Api {
                vendor: Vendor::ChatGpt,
                status: status.as_u16(),
                body,
            });
        }

        let parsed: ChatResponse = response.json().await.map_err(|e| AiError::InvalidResponse {
            vendor: Vendor::ChatGpt,
            detail: e.to_string(),
        })?;

        let message = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .map(|content| clean_message(&content))
            .unwrap_or_default();

        if message.is_empty() {
            return Err(AiError::EmptyResponse(Vendor::ChatGpt));
        }

        Ok(message)
    }
}
