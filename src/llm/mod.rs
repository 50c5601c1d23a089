//! External text-generation collaborator.
//!
//! The engine treats analysis generation as a plain function: structured
//! record in, a finite sequence of text fragments out. One trait, two
//! implementations — a network-backed generator and a canned mock — with
//! the service falling back to the mock when the network backend is
//! unconfigured or fails.

pub mod mock;
pub mod openrouter;

use thiserror::Error;

use crate::models::UserRecord;

pub use mock::MockBackend;
pub use openrouter::OpenRouterBackend;

/// Finite, non-restartable sequence of response fragments. The consumer
/// may stop pulling at any point; there is no backpressure beyond that.
pub type TextStream = Box<dyn Iterator<Item = Result<String, AnalysisError>> + Send>;

/// Failures from the generation collaborator. All recoverable: callers
/// substitute the rule-based fallback report.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("no analysis backend available")]
    Unavailable,

    #[error("authentication failed: {0}")]
    Authentication(String),

    #[error("rate limit exceeded: {0}")]
    RateLimited(String),

    #[error("network error: {0}")]
    Network(String),

    #[error("analysis request failed: {0}")]
    Api(String),
}

/// One analysis generator.
pub trait AnalysisBackend: Send + Sync {
    /// Whether the backend is configured well enough to try.
    fn is_available(&self) -> bool;

    /// Start generating for a prompt. The stream itself may still yield
    /// fragment-level errors mid-way.
    fn generate(&self, prompt: &str) -> Result<TextStream, AnalysisError>;
}

/// Instruction prefix sent with every generation request.
pub const SYSTEM_PROMPT: &str = "You are a helpful assistant for educational symptom \
     checking. Always include a disclaimer that this is not medical advice.";

/// Format the validated record into the analysis prompt.
pub fn format_analysis_prompt(record: &UserRecord) -> String {
    let data = serde_json::to_string_pretty(record).unwrap_or_else(|_| "{}".to_string());
    format!(
        "Based on the following user data, list the top 3 most likely diseases with \
         confidence percentages and reasoning for each. Also suggest next steps.\n\n\
         User Data: {data}\n\n\
         Provide response in a clear, structured format with disclaimer that this is \
         educational only."
    )
}

/// Backend pair with fallback selection.
pub struct AnalysisService {
    primary: Box<dyn AnalysisBackend>,
    fallback: Box<dyn AnalysisBackend>,
}

impl AnalysisService {
    /// Network-backed primary from the environment, canned fallback.
    pub fn from_env() -> Self {
        Self {
            primary: Box::new(OpenRouterBackend::from_env()),
            fallback: Box::new(MockBackend::new()),
        }
    }

    /// Canned generation only. Used by tests and offline deployments.
    pub fn mock_only() -> Self {
        Self {
            primary: Box::new(MockBackend::new()),
            fallback: Box::new(MockBackend::new()),
        }
    }

    /// Explicit backend pair.
    pub fn new(primary: Box<dyn AnalysisBackend>, fallback: Box<dyn AnalysisBackend>) -> Self {
        Self { primary, fallback }
    }

    /// Generate an analysis for a validated record, preferring the
    /// primary backend and falling back to the canned one on failure.
    pub fn generate_analysis(&self, record: &UserRecord) -> Result<TextStream, AnalysisError> {
        let prompt = format_analysis_prompt(record);

        if self.primary.is_available() {
            match self.primary.generate(&prompt) {
                Ok(stream) => return Ok(stream),
                Err(err) => {
                    tracing::warn!(error = %err, "primary analysis backend failed, trying fallback");
                }
            }
        }

        if self.fallback.is_available() {
            return self.fallback.generate(&prompt);
        }
        Err(AnalysisError::Unavailable)
    }

    /// Run a full generation and collect the fragments into one string.
    pub fn generate_collected(&self, record: &UserRecord) -> Result<String, AnalysisError> {
        let stream = self.generate_analysis(record)?;
        let mut text = String::new();
        for fragment in stream {
            text.push_str(&fragment?);
        }
        Ok(text)
    }
}
