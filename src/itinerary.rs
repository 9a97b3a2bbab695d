use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, error, instrument};

use crate::constants;
use crate::languages::{default_prompt, Language};
use crate::session::AnswerMap;

/// Shown in place of an itinerary whenever the completion call fails.
pub const FAILURE_PLACEHOLDER: &str = "Could not generate itinerary at this time.";

/// The one externally-triggerable failure kind. Never propagates past
/// `Generator::generate`; it is reported through the caller's error surface
/// and replaced by [`FAILURE_PLACEHOLDER`].
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("request to completion endpoint failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("completion endpoint returned status {status}: {body}")]
    Status { status: StatusCode, body: String },
    #[error("completion response contained no choices")]
    EmptyCompletion,
}

// Structures matching the OpenAI-compatible /chat/completions endpoint.
#[derive(Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
}

#[derive(Serialize, Deserialize, Debug)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Deserialize, Debug)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize, Debug)]
struct ChatChoice {
    message: ChatMessage,
}

/// Outcome of one generation attempt. `text` is always usable for display;
/// `error` carries the failure message for the inline error surface when the
/// placeholder was substituted.
#[derive(Debug)]
pub struct Generation {
    pub text: String,
    pub error: Option<String>,
}

/// Build the user-role prompt from the recorded answers. Entries that are
/// empty or read "skip" (case-insensitive) count as not answered; when
/// nothing survives the filter the per-language canned prompt is used
/// instead.
pub fn build_prompt(answers: &AnswerMap, language: Language) -> String {
    let lines: Vec<String> = answers
        .iter()
        .filter(|(_, answer)| !answer.is_empty() && answer.to_lowercase() != "skip")
        .map(|(question, answer)| format!("- {}: {}", question, answer))
        .collect();

    if lines.is_empty() {
        return default_prompt(language).to_string();
    }

    format!(
        "Generate a day-by-day itinerary for a trip to Egypt in {} based on the following preferences:\n\n{}\n\nPlease format the output as a clear day-by-day plan.",
        language,
        lines.join("\n")
    )
}

/// Client for the hosted chat-completion service. Process-wide, read-only
/// after construction; tests point `base_url` at a mock server.
pub struct Generator {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl Generator {
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
            api_key: api_key.into(),
            model: model.into(),
        }
    }

    pub fn from_env() -> Self {
        Self::new(
            constants::HF_ROUTER_URL.clone(),
            constants::HF_TOKEN.clone(),
            constants::ITINERARY_MODEL.clone(),
        )
    }

    /// Generate an itinerary for the finalized answer set. Failures are
    /// caught here: the returned text is the completion verbatim on success
    /// or the fixed placeholder on any failure, with the failure message in
    /// `error` for display.
    #[instrument(skip(self, answers))]
    pub async fn generate(&self, answers: &AnswerMap, language: Language) -> Generation {
        let prompt = build_prompt(answers, language);
        debug!(?prompt, "Constructed itinerary prompt");

        match self.request_completion(&prompt).await {
            Ok(text) => Generation { text, error: None },
            Err(e) => {
                error!(error = %e, "Itinerary generation failed");
                Generation {
                    text: FAILURE_PLACEHOLDER.to_string(),
                    error: Some(format!(
                        "An error occurred while generating the itinerary: {}",
                        e
                    )),
                }
            }
        }
    }

    async fn request_completion(&self, prompt: &str) -> Result<String, GenerationError> {
        let url = format!("{}/chat/completions", self.base_url);
        let payload = ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error body".to_string());
            return Err(GenerationError::Status { status, body });
        }

        let completion = response.json::<ChatCompletionResponse>().await?;
        debug!(?completion, "Received completion response");

        completion
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or(GenerationError::EmptyCompletion)
    }
}
