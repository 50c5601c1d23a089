//! Network-backed analysis generator speaking the OpenAI-compatible
//! chat-completions protocol (OpenRouter hosting).

use std::io::{BufRead, BufReader, Lines};

use serde::{Deserialize, Serialize};

use crate::config;

use super::{AnalysisBackend, AnalysisError, TextStream, SYSTEM_PROMPT};

/// Seconds to wait for the TCP connection. No overall request timeout —
/// the response is an open-ended token stream.
const CONNECT_TIMEOUT_SECS: u64 = 10;

/// Sampling and length settings sent with every request.
const TEMPERATURE: f64 = 0.7;
const MAX_TOKENS: u32 = 2000;

pub struct OpenRouterBackend {
    client: reqwest::blocking::Client,
    base_url: String,
    model: String,
    api_key: Option<String>,
}

impl OpenRouterBackend {
    pub fn new(base_url: &str, api_key: Option<String>, model: &str) -> Self {
        let client = reqwest::blocking::Client::builder()
            .connect_timeout(std::time::Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
            api_key,
        }
    }

    /// Backend configured from the environment. Missing or malformed
    /// keys leave the backend unavailable rather than failing startup.
    pub fn from_env() -> Self {
        Self::new(
            config::OPENROUTER_BASE_URL,
            std::env::var(config::API_KEY_ENV).ok(),
            config::DEFAULT_MODEL,
        )
    }

    fn valid_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .filter(|k| k.starts_with(config::API_KEY_PREFIX))
    }
}

impl AnalysisBackend for OpenRouterBackend {
    fn is_available(&self) -> bool {
        self.valid_key().is_some()
    }

    fn generate(&self, prompt: &str) -> Result<TextStream, AnalysisError> {
        let key = self.valid_key().ok_or(AnalysisError::Unavailable)?;

        let url = format!("{}/chat/completions", self.base_url);
        let body = ChatRequest {
            model: &self.model,
            messages: vec![
                Message {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                Message {
                    role: "user",
                    content: prompt,
                },
            ],
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
            stream: true,
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(key)
            .json(&body)
            .send()
            .map_err(|e| {
                if e.is_connect() {
                    AnalysisError::Network(format!("cannot reach {}", self.base_url))
                } else if e.is_timeout() {
                    AnalysisError::Network("request timed out".to_string())
                } else {
                    AnalysisError::Api(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(match status.as_u16() {
                401 | 403 => AnalysisError::Authentication(body),
                429 => AnalysisError::RateLimited(body),
                _ => AnalysisError::Api(format!("status {status}: {body}")),
            });
        }

        Ok(Box::new(SseTextStream::new(response)))
    }
}

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<Message<'a>>,
    temperature: f64,
    max_tokens: u32,
    stream: bool,
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatChunk {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    delta: Delta,
}

#[derive(Deserialize)]
struct Delta {
    content: Option<String>,
}

// ---------------------------------------------------------------------------
// SSE fragment stream
// ---------------------------------------------------------------------------

/// Iterator over the `data:` lines of a server-sent-event response,
/// yielding the delta content of each chunk. Finite: ends at `[DONE]`,
/// stream exhaustion, or the first read/parse error.
struct SseTextStream {
    lines: Lines<BufReader<reqwest::blocking::Response>>,
    done: bool,
}

impl SseTextStream {
    fn new(response: reqwest::blocking::Response) -> Self {
        Self {
            lines: BufReader::new(response).lines(),
            done: false,
        }
    }
}

impl Iterator for SseTextStream {
    type Item = Result<String, AnalysisError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        for line in self.lines.by_ref() {
            let line = match line {
                Ok(line) => line,
                Err(e) => {
                    self.done = true;
                    return Some(Err(AnalysisError::Network(e.to_string())));
                }
            };

            // SSE frames: keep-alives and event names are skipped.
            let Some(data) = line.strip_prefix("data: ") else {
                continue;
            };
            if data == "[DONE]" {
                break;
            }

            match serde_json::from_str::<ChatChunk>(data) {
                Ok(chunk) => {
                    let content = chunk
                        .choices
                        .into_iter()
                        .next()
                        .and_then(|c| c.delta.content);
                    match content {
                        Some(text) if !text.is_empty() => return Some(Ok(text)),
                        _ => continue,
                    }
                }
                Err(e) => {
                    self.done = true;
                    return Some(Err(AnalysisError::Api(format!(
                        "malformed stream chunk: {e}"
                    ))));
                }
            }
        }

        self.done = true;
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_key_is_unavailable() {
        let backend = OpenRouterBackend::new("https://example.invalid", None, "test-model");
        assert!(!backend.is_available());
    }

    #[test]
    fn malformed_key_is_unavailable() {
        let backend = OpenRouterBackend::new(
            "https://example.invalid",
            Some("not-a-real-key".into()),
            "test-model",
        );
        assert!(!backend.is_available());
    }

    #[test]
    fn prefixed_key_is_available() {
        let backend = OpenRouterBackend::new(
            "https://example.invalid",
            Some("sk-or-v1-abc123".into()),
            "test-model",
        );
        assert!(backend.is_available());
    }

    #[test]
    fn generate_without_key_reports_unavailable() {
        let backend = OpenRouterBackend::new("https://example.invalid", None, "test-model");
        assert!(matches!(
            backend.generate("prompt"),
            Err(AnalysisError::Unavailable)
        ));
    }

    #[test]
    fn base_url_trailing_slash_trimmed() {
        let backend =
            OpenRouterBackend::new("https://example.invalid/", None, "test-model");
        assert_eq!(backend.base_url, "https://example.invalid");
    }

    #[test]
    fn request_body_serializes_chat_shape() {
        let body = ChatRequest {
            model: "test-model",
            messages: vec![Message {
                role: "user",
                content: "hello",
            }],
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
            stream: true,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["model"], "test-model");
        assert_eq!(json["stream"], true);
        assert_eq!(json["messages"][0]["role"], "user");
    }

    #[test]
    fn chunk_parses_delta_content() {
        let chunk: ChatChunk = serde_json::from_str(
            r#"{"choices":[{"delta":{"content":"Hel"}}]}"#,
        )
        .unwrap();
        assert_eq!(
            chunk.choices.into_iter().next().unwrap().delta.content,
            Some("Hel".to_string())
        );
    }

    #[test]
    fn chunk_tolerates_empty_delta() {
        let chunk: ChatChunk = serde_json::from_str(r#"{"choices":[{"delta":{}}]}"#).unwrap();
        assert_eq!(chunk.choices.into_iter().next().unwrap().delta.content, None);
    }
}
