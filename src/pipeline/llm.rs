//! Gemini interaction: build the multimodal request and call the endpoint.
//!
//! This module is intentionally thin — all prompt wording lives in
//! [`crate::prompts`] so it can change without touching transport code, and
//! the warning-marker conversion of failures lives in [`crate::generate`]
//! at the dispatch boundary.
//!
//! One request is made per invocation: no retry, no backoff, no pipeline
//! timeout. The client object is constructed explicitly and passed in by
//! the caller; there is no process-wide configured singleton.

use crate::config::GenerationConfig;
use crate::error::ChefgenError;
use crate::pipeline::encode::ImagePayload;
use futures::stream::{self, Stream, StreamExt};
use futures::future;
use serde::{Deserialize, Serialize};
use std::pin::Pin;
use tracing::{debug, warn};

const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// An ordered stream of response text deltas.
pub type ChunkStream = Pin<Box<dyn Stream<Item = Result<String, ChefgenError>> + Send>>;

/// One content part of the request: either prompt text or an inline image.
///
/// Without an image the request carries exactly one (text) part; with an
/// image, exactly two.
#[derive(Debug, Clone, Serialize)]
pub struct Part {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(rename = "inline_data", skip_serializing_if = "Option::is_none")]
    pub inline_data: Option<ImagePayload>,
}

impl Part {
    /// A text part.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            inline_data: None,
        }
    }

    /// An inline image part (canonical PNG payload).
    pub fn image(payload: ImagePayload) -> Self {
        Self {
            text: None,
            inline_data: Some(payload),
        }
    }
}

#[derive(Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: WireGenerationConfig,
}

#[derive(Serialize)]
struct Content {
    role: String,
    parts: Vec<Part>,
}

#[derive(Serialize)]
struct WireGenerationConfig {
    temperature: f32,
    #[serde(rename = "maxOutputTokens")]
    max_output_tokens: u32,
    #[serde(rename = "topP")]
    top_p: f32,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<ResponseContent>,
}

#[derive(Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: Option<String>,
}

/// Client for the Gemini generateContent API.
///
/// Holds the credential and generation parameters; each call builds and
/// discards its own request, so one client can be shared freely.
pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    config: GenerationConfig,
}

impl GeminiClient {
    /// Create a client with an explicit API key.
    pub fn new(api_key: impl Into<String>, config: &GenerationConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key: api_key.into(),
            config: config.clone(),
        }
    }

    /// Create a client from the `GEMINI_API_KEY` environment variable.
    ///
    /// A missing or empty key is a fatal configuration error: the caller
    /// must halt before any pipeline call.
    pub fn from_env(config: &GenerationConfig) -> Result<Self, ChefgenError> {
        match std::env::var("GEMINI_API_KEY") {
            Ok(key) if !key.trim().is_empty() => Ok(Self::new(key, config)),
            _ => Err(ChefgenError::ApiKeyMissing),
        }
    }

    /// The configured model identifier.
    pub fn model(&self) -> &str {
        &self.config.model
    }

    fn endpoint(&self, method: &str, sse: bool) -> String {
        let alt = if sse { "?alt=sse" } else { "" };
        format!("{API_BASE}/{}:{method}{alt}", self.config.model)
    }

    fn build_request(&self, parts: &[Part]) -> GenerateRequest {
        GenerateRequest {
            contents: vec![Content {
                role: "user".to_string(),
                parts: parts.to_vec(),
            }],
            generation_config: WireGenerationConfig {
                temperature: self.config.temperature,
                max_output_tokens: self.config.max_output_tokens,
                top_p: self.config.top_p,
            },
        }
    }

    /// Single blocking call: send the parts, return the full response text.
    pub async fn generate_content(&self, parts: &[Part]) -> Result<String, ChefgenError> {
        let request = self.build_request(parts);
        debug!(
            "Dispatching {} part(s) to {} (blocking)",
            parts.len(),
            self.config.model
        );

        let response = self
            .http
            .post(self.endpoint("generateContent", false))
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| ChefgenError::Transport {
                detail: e.to_string(),
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ChefgenError::Transport {
                detail: format!("HTTP {status}: {body}"),
            });
        }

        let parsed: GenerateResponse =
            response.json().await.map_err(|e| ChefgenError::Transport {
                detail: format!("Failed to parse response: {e}"),
            })?;

        response_text(parsed).ok_or_else(|| ChefgenError::Transport {
            detail: "No text in model response".to_string(),
        })
    }

    /// Streamed call: send the parts, return text deltas in arrival order.
    ///
    /// The stream is finite and consumed once; concatenating its chunks
    /// yields the same text the blocking call would have returned.
    pub async fn stream_generate_content(&self, parts: &[Part]) -> Result<ChunkStream, ChefgenError> {
        let request = self.build_request(parts);
        debug!(
            "Dispatching {} part(s) to {} (streamed)",
            parts.len(),
            self.config.model
        );

        let response = self
            .http
            .post(self.endpoint("streamGenerateContent", true))
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| ChefgenError::Transport {
                detail: e.to_string(),
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ChefgenError::Transport {
                detail: format!("HTTP {status}: {body}"),
            });
        }

        // SSE events arrive as `data: {json}\n` lines; chunk boundaries do
        // not respect line boundaries, so buffer until each newline.
        let stream = response
            .bytes_stream()
            .scan(String::new(), |buf, chunk| {
                let items: Vec<Result<String, ChefgenError>> = match chunk {
                    Ok(bytes) => {
                        buf.push_str(&String::from_utf8_lossy(&bytes));
                        let mut texts = Vec::new();
                        while let Some(pos) = buf.find('\n') {
                            let line: String = buf.drain(..=pos).collect();
                            if let Some(text) = parse_sse_line(line.trim()) {
                                texts.push(Ok(text));
                            }
                        }
                        texts
                    }
                    Err(e) => {
                        warn!("Stream interrupted: {e}");
                        vec![Err(ChefgenError::Transport {
                            detail: e.to_string(),
                        })]
                    }
                };
                future::ready(Some(stream::iter(items)))
            })
            .flatten();

        Ok(Box::pin(stream))
    }
}

/// Parse one SSE line into a text delta, if it carries one.
///
/// Non-`data:` lines (comments, blank keep-alives) and events without text
/// (e.g. the final usage-metadata event) yield `None`.
pub fn parse_sse_line(line: &str) -> Option<String> {
    let payload = line.strip_prefix("data:")?.trim();
    if payload.is_empty() {
        return None;
    }
    let parsed: GenerateResponse = serde_json::from_str(payload).ok()?;
    response_text(parsed)
}

/// Concatenate the text parts of the first candidate, if any.
fn response_text(response: GenerateResponse) -> Option<String> {
    let content = response.candidates.into_iter().next()?.content?;
    let text: String = content
        .parts
        .into_iter()
        .filter_map(|p| p.text)
        .collect();
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}
