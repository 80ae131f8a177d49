//! Model gateway — async capability boundary to the generation service.
//!
//! The trait is the seam the orchestrator depends on; the concrete adapter
//! speaks the Gemini `generateContent` wire shape and consumes exactly
//! `candidates[0].content.parts[0].text`. Any other response shape is
//! treated as "no text produced" (empty string), which the caller maps to
//! a generic fallback reply.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ReviewError;
use crate::history::{Role, Turn};

/// Default model identifier for the generation service.
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

/// The single system instruction shared by the chat and review paths.
pub const SYSTEM_INSTRUCTION: &str = "\
You are a focused coding assistant embedded in an editor. Answer questions \
about programming, code review, debugging, and software engineering. If a \
request is unrelated to coding, politely steer the conversation back to \
coding topics.";

/// Generation capability: one request in, one text payload out.
///
/// Failures are surfaced to the caller as a single user-visible turn —
/// never retried automatically, never cached.
#[async_trait]
pub trait ModelGateway: Send + Sync {
    async fn generate(
        &self,
        system_instruction: &str,
        contents: &[Turn],
    ) -> Result<String, ReviewError>;
}

/// HTTP adapter for the Gemini `generateContent` endpoint.
pub struct GeminiGateway {
    api_key: String,
    model: String,
    client: reqwest::Client,
}

impl GeminiGateway {
    pub fn new(api_key: String, model: impl Into<String>) -> Self {
        Self {
            api_key,
            model: model.into(),
            client: reqwest::Client::builder()
                .timeout(Duration::from_secs(120))
                .build()
                .expect("failed to build HTTP client"),
        }
    }

    fn endpoint(&self) -> String {
        format!(
            "https://generativelanguage.googleapis.com/v1beta/models/{}:generateContent?key={}",
            self.model, self.api_key
        )
    }
}

#[async_trait]
impl ModelGateway for GeminiGateway {
    async fn generate(
        &self,
        system_instruction: &str,
        contents: &[Turn],
    ) -> Result<String, ReviewError> {
        if self.api_key.is_empty() {
            return Err(ReviewError::Authentication);
        }

        let request = GenerateRequest {
            system_instruction: InstructionBlock {
                parts: vec![TextPart {
                    text: system_instruction,
                }],
            },
            contents: contents
                .iter()
                .map(|turn| ContentBlock {
                    role: match turn.role {
                        Role::User => "user",
                        Role::Assistant => "model",
                    },
                    parts: vec![TextPart { text: &turn.text }],
                })
                .collect(),
        };

        let response = self
            .client
            .post(self.endpoint())
            .json(&request)
            .send()
            .await
            .map_err(|e| ReviewError::Upstream(e.to_string()))?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED
            || status == reqwest::StatusCode::FORBIDDEN
        {
            return Err(ReviewError::Authentication);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ReviewError::Upstream(format!("{status}: {body}")));
        }

        let payload: GenerateResponse = response
            .json()
            .await
            .map_err(|e| ReviewError::Upstream(e.to_string()))?;
        let text = extract_text(&payload);
        debug!(model = %self.model, chars = text.len(), "generation completed");
        Ok(text)
    }
}

/// The sole payload consumed: `candidates[0].content.parts[0].text`.
fn extract_text(response: &GenerateResponse) -> String {
    response
        .candidates
        .first()
        .and_then(|c| c.content.parts.first())
        .map(|p| p.text.clone())
        .unwrap_or_default()
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    #[serde(rename = "systemInstruction")]
    system_instruction: InstructionBlock<'a>,
    contents: Vec<ContentBlock<'a>>,
}

#[derive(Debug, Serialize)]
struct InstructionBlock<'a> {
    parts: Vec<TextPart<'a>>,
}

#[derive(Debug, Serialize)]
struct ContentBlock<'a> {
    role: &'static str,
    parts: Vec<TextPart<'a>>,
}

#[derive(Debug, Serialize)]
struct TextPart<'a> {
    text: &'a str,
}

#[derive(Debug, Default, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: CandidateContent,
}

#[derive(Debug, Default, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: String,
}
