use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{build_prompt, AuditNarrator, NarrativeError};
use crate::config::NarrativeConfig;
use crate::payouts::domain::ScoredRecord;

/// Chat-completions client for the Groq OpenAI-compatible endpoint.
///
/// A client is built per call: audits are on demand for one employee, and the
/// blocking client must not outlive the worker thread that created it.
#[derive(Debug, Clone)]
pub struct GroqNarrator {
    config: NarrativeConfig,
}

impl GroqNarrator {
    pub fn new(config: NarrativeConfig) -> Self {
        Self { config }
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    temperature: f32,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

impl ChatResponse {
    fn into_text(self) -> Result<String, NarrativeError> {
        self.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .map(|content| content.trim().to_string())
            .filter(|content| !content.is_empty())
            .ok_or(NarrativeError::EmptyResponse)
    }
}

impl AuditNarrator for GroqNarrator {
    fn narrate(&self, record: &ScoredRecord, scenario: &str) -> Result<String, NarrativeError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or(NarrativeError::MissingCredentials)?;

        let prompt = build_prompt(record, scenario);
        let request = ChatRequest {
            model: &self.config.model,
            temperature: 0.0,
            messages: vec![ChatMessage {
                role: "user",
                content: &prompt,
            }],
        };

        let client = reqwest::blocking::Client::builder()
            .timeout(self.config.timeout)
            .build()
            .map_err(|err| NarrativeError::Transport(err.to_string()))?;

        debug!(
            employee_id = %record.employee_id(),
            model = %self.config.model,
            "requesting audit narrative"
        );

        let response = client
            .post(self.config.endpoint.as_str())
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .map_err(|err| NarrativeError::Transport(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(NarrativeError::Upstream {
                status: status.as_u16(),
            });
        }

        response
            .json::<ChatResponse>()
            .map_err(|err| NarrativeError::Transport(err.to_string()))?
            .into_text()
    }
}
