//! Suggestion client: the single point of entry for completion API calls.
//!
//! Talks to an OpenAI-compatible `/chat/completions` endpoint (OpenRouter by
//! default). One attempt per call, no retries.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::{redirect, Client};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::Config;

pub mod prompts;

use prompts::PromptKind;

/// Upper bound on a single upstream call, connect through body.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Debug, Error)]
pub enum SuggestionError {
    #[error("Missing OPENROUTER_API_KEY in environment")]
    MissingApiKey,

    #[error("OpenRouter authentication failed (401): invalid API key")]
    AuthenticationFailed,

    #[error("OpenRouter billing/access issue (402): {message}")]
    BillingOrAccess { message: String },

    #[error(
        "OpenRouter model not found (404) for '{model}'. Set AI_MODEL to an available model \
         for your key (e.g., 'deepseek/deepseek-chat-v3-0324:free' or 'deepseek/deepseek-chat'). \
         See https://openrouter.ai/api/v1/models"
    )]
    ModelNotFound { model: String },

    /// `status` is `None` when no HTTP response was received (connect failure, timeout).
    #[error("OpenRouter API error ({}): {message}", status_label(.status))]
    Upstream { status: Option<u16>, message: String },
}

fn status_label(status: &Option<u16>) -> String {
    status.map_or_else(|| "network".to_string(), |s| s.to_string())
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    pub message: Option<ChoiceMessage>,
}

#[derive(Debug, Deserialize)]
pub struct ChoiceMessage {
    pub content: Option<String>,
}

impl ChatResponse {
    /// Content of the first completion, if the provider sent one.
    pub fn first_content(self) -> Option<String> {
        self.choices
            .into_iter()
            .next()
            .and_then(|c| c.message)
            .and_then(|m| m.content)
    }
}

#[derive(Clone)]
pub struct SuggestionClient {
    client: Client,
    config: Arc<Config>,
}

impl SuggestionClient {
    pub fn new(config: Arc<Config>) -> Result<Self> {
        Self::with_timeout(config, REQUEST_TIMEOUT)
    }

    pub fn with_timeout(config: Arc<Config>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .redirect(redirect::Policy::none())
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self { client, config })
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    /// Sends the rendered prompt upstream and returns the first completion's text.
    ///
    /// `Ok(None)` means the provider answered successfully but without usable
    /// content; the caller decides how to surface that.
    pub async fn generate(
        &self,
        kind: PromptKind,
        resume_text: &str,
        job_description: Option<&str>,
    ) -> Result<Option<String>, SuggestionError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or(SuggestionError::MissingApiKey)?;

        let user_prompt = kind.user_prompt(resume_text, job_description);
        let request_body = ChatRequest {
            model: &self.config.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: kind.system_prompt(),
                },
                ChatMessage {
                    role: "user",
                    content: &user_prompt,
                },
            ],
        };
        let app_title = self
            .config
            .app_title
            .as_deref()
            .unwrap_or(kind.default_app_title());

        let response = self
            .client
            .post(self.config.completions_url())
            .bearer_auth(api_key)
            .header("HTTP-Referer", &self.config.site_url)
            .header("X-Title", app_title)
            .json(&request_body)
            .send()
            .await
            .map_err(network_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("Completion API returned {}: {}", status, body);
            return Err(map_status_error(status.as_u16(), &body, &self.config.model));
        }

        let body = response.text().await.map_err(network_error)?;
        match serde_json::from_str::<ChatResponse>(&body) {
            Ok(parsed) => {
                let content = parsed.first_content();
                debug!(
                    "Completion call succeeded ({} chars of content)",
                    content.as_deref().map_or(0, |c| c.chars().count())
                );
                Ok(content)
            }
            Err(e) => {
                warn!("Completion API returned an unparsable body: {e}");
                Ok(None)
            }
        }
    }
}

fn network_error(e: reqwest::Error) -> SuggestionError {
    SuggestionError::Upstream {
        status: e.status().map(|s| s.as_u16()),
        message: e.to_string(),
    }
}

/// Maps a non-success HTTP status to the matching error kind.
fn map_status_error(status: u16, body: &str, model: &str) -> SuggestionError {
    let provider_message = provider_message(body);
    match status {
        401 => SuggestionError::AuthenticationFailed,
        402 => SuggestionError::BillingOrAccess {
            message: provider_message.unwrap_or_else(|| {
                "insufficient credit or model not accessible".to_string()
            }),
        },
        404 => SuggestionError::ModelNotFound {
            model: model.to_string(),
        },
        _ => SuggestionError::Upstream {
            status: Some(status),
            message: provider_message.unwrap_or_else(|| format!("request failed with status {status}")),
        },
    }
}

/// Pulls `error.message` out of a JSON error body, or returns a non-JSON body as-is.
fn provider_message(body: &str) -> Option<String> {
    match serde_json::from_str::<serde_json::Value>(body) {
        Ok(value) => value
            .get("error")
            .and_then(|e| e.get("message"))
            .and_then(|m| m.as_str())
            .filter(|m| !m.is_empty())
            .map(String::from),
        Err(_) => {
            let trimmed = body.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
    }
}
