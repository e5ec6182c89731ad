//! Client for the external text-completion service used to rewrite menu item
//! descriptions. Requests go to an OpenAI-compatible `/chat/completions`
//! endpoint; there is no retry and no caching.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub const SYSTEM_PROMPT: &str = "You improve menu item descriptions.";

const DEFAULT_BRAND_VOICE: &str = "generic";

#[derive(Debug, thiserror::Error)]
pub enum CompletionError {
    #[error("Completion service is not configured (OPENAI_API_KEY is unset)")]
    MissingApiKey,
    #[error("Completion request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Completion service returned {status}: {message}")]
    Status { status: u16, message: String },
    #[error("Completion service returned no text")]
    EmptyResponse,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(&self, messages: Vec<ChatMessage>) -> Result<String, CompletionError>;
}

pub fn description_prompt(name: &str, old_description: &str, brand_voice: Option<&str>) -> String {
    let brand_voice = brand_voice
        .map(str::trim)
        .filter(|voice| !voice.is_empty())
        .unwrap_or(DEFAULT_BRAND_VOICE);

    format!(
        "You are an AI that rewrites menu item descriptions.\n\
         Name: {name}\n\
         Current description: \"{old_description}\"\n\
         Brand voice: \"{brand_voice}\"\n\
         Please return a short, appealing rewrite for this item."
    )
}

/// Asks the completion service for a new description and returns it trimmed.
pub async fn enhance_description(
    client: &dyn CompletionClient,
    name: &str,
    old_description: &str,
    brand_voice: Option<&str>,
) -> Result<String, CompletionError> {
    let messages = vec![
        ChatMessage {
            role: Role::System,
            content: SYSTEM_PROMPT.to_string(),
        },
        ChatMessage {
            role: Role::User,
            content: description_prompt(name, old_description, brand_voice),
        },
    ];

    let text = client.complete(messages).await?;
    let text = text.trim();
    if text.is_empty() {
        return Err(CompletionError::EmptyResponse);
    }
    Ok(text.to_string())
}

pub struct OpenAiClient {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    model: String,
}

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
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

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

impl OpenAiClient {
    pub fn new(base_url: impl Into<String>, api_key: Option<String>, model: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            api_key,
            model: model.into(),
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl CompletionClient for OpenAiClient {
    async fn complete(&self, messages: Vec<ChatMessage>) -> Result<String, CompletionError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(CompletionError::MissingApiKey)?;

        let response = self
            .http
            .post(self.endpoint())
            .bearer_auth(api_key)
            .json(&ChatCompletionRequest {
                model: &self.model,
                messages,
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorEnvelope>(&body)
                .map(|envelope| envelope.error.message)
                .unwrap_or(body);
            return Err(CompletionError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let completion: ChatCompletionResponse = response.json().await?;
        completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or(CompletionError::EmptyResponse)
    }
}
