//! Chat-completions client for OpenAI-compatible endpoints.

use crate::domain::model::{ChatMessage, CompletionRequest, ResponseMode};
use crate::domain::ports::{CompletionClient, ConfigProvider};
use crate::utils::error::{MatchError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::time::Duration;

pub const DOCTOR_SCHEMA_NAME: &str = "doctor";

/// `response_format` payload for the given mode.
pub fn doctor_response_format(mode: ResponseMode) -> serde_json::Value {
    match mode {
        ResponseMode::JsonSchema => json!({
            "type": "json_schema",
            "json_schema": {
                "name": DOCTOR_SCHEMA_NAME,
                "strict": true,
                "schema": {
                    "type": "object",
                    "properties": {
                        "name": { "type": "string" }
                    },
                    "required": ["name"],
                    "additionalProperties": false
                }
            }
        }),
        ResponseMode::JsonObject => json!({ "type": "json_object" }),
    }
}

#[derive(Debug, Serialize)]
struct ChatCompletionBody<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    response_format: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: AssistantMessage,
}

#[derive(Debug, Deserialize)]
struct AssistantMessage {
    content: Option<String>,
    #[serde(default)]
    refusal: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: String,
}

pub struct OpenAiClient {
    client: Client,
    api_base: String,
    api_key: String,
}

impl OpenAiClient {
    pub fn new(api_base: &str, api_key: String, timeout_seconds: Option<u64>) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout_seconds {
            builder = builder.timeout(Duration::from_secs(timeout));
        }

        Ok(Self {
            client: builder.build()?,
            api_base: api_base.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    pub fn from_config<C: ConfigProvider>(config: &C, api_key: String) -> Result<Self> {
        Self::new(config.api_base(), api_key, config.timeout_seconds())
    }

    pub fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.api_base)
    }
}

#[async_trait]
impl CompletionClient for OpenAiClient {
    async fn complete(&self, request: &CompletionRequest) -> Result<String> {
        let url = self.endpoint();
        let body = ChatCompletionBody {
            model: &request.model,
            messages: &request.messages,
            response_format: doctor_response_format(request.mode),
        };

        tracing::debug!(
            "POST {} (model: {}, {} messages, mode: {:?})",
            url,
            request.model,
            request.messages.len(),
            request.mode
        );

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("Completion response status: {}", status);
        let text = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ApiErrorBody>(&text)
                .map(|body| body.error.message)
                .unwrap_or_else(|_| {
                    if text.trim().is_empty() {
                        status.canonical_reason().unwrap_or("unknown error").to_string()
                    } else {
                        text.clone()
                    }
                });
            return Err(MatchError::ApiStatusError {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: ChatCompletionResponse =
            serde_json::from_str(&text).map_err(|e| MatchError::ApiStatusError {
                status: status.as_u16(),
                message: format!("malformed completion body: {}", e),
            })?;

        let message = parsed
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message)
            .ok_or(MatchError::EmptyCompletionError)?;

        if let Some(refusal) = message.refusal {
            return Err(MatchError::RefusalError(refusal));
        }

        message.content.ok_or(MatchError::EmptyCompletionError)
    }
}
