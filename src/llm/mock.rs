//! Canned analysis backend for tests, development, and offline fallback.

use super::{AnalysisBackend, AnalysisError, TextStream};

/// Fragment size used to simulate streaming.
const CHUNK_CHARS: usize = 50;

const CANNED_ANALYSIS: &str = "\
Based on the provided symptoms and test results, here are the top 3 most likely conditions:

1. Viral Fever - 75% confidence
   Reasoning: High fever, fatigue, and headache are classic symptoms of viral infection.

2. Dengue Fever - 60% confidence
   Reasoning: Fever with rash and low platelet count suggests possible dengue.

3. Common Cold - 40% confidence
   Reasoning: Mild respiratory symptoms could indicate a common cold.

**Important Disclaimer:** This analysis is for educational purposes only and should not \
be used as a substitute for professional medical advice. Please consult a qualified \
healthcare provider for proper diagnosis and treatment.

Suggested next steps:
- Monitor your temperature regularly
- Stay hydrated and rest
- Consult a doctor if symptoms worsen
- Consider getting additional blood tests if recommended";

/// Always-available backend that streams a fixed response in small
/// fragments, the way the network backend would.
pub struct MockBackend {
    response: String,
}

impl MockBackend {
    pub fn new() -> Self {
        Self {
            response: CANNED_ANALYSIS.to_string(),
        }
    }

    /// Override the canned text (tests).
    pub fn with_response(response: &str) -> Self {
        Self {
            response: response.to_string(),
        }
    }
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl AnalysisBackend for MockBackend {
    fn is_available(&self) -> bool {
        true
    }

    fn generate(&self, _prompt: &str) -> Result<TextStream, AnalysisError> {
        let chars: Vec<char> = self.response.chars().collect();
        let fragments: Vec<Result<String, AnalysisError>> = chars
            .chunks(CHUNK_CHARS)
            .map(|chunk| Ok(chunk.iter().collect::<String>()))
            .collect();
        Ok(Box::new(fragments.into_iter()))
    }
}
