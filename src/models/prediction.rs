use serde::{Deserialize, Serialize};

/// Fixed disclaimer attached to every analysis the system produces.
pub const DISCLAIMER: &str =
    "This is for educational purposes only. Consult a healthcare professional for medical advice.";

/// One named condition from the rule-based fallback predictor.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DiseasePrediction {
    pub disease: String,
    /// Fixed per-rule confidence, 0–100.
    pub confidence: u8,
    pub reasoning: String,
}

/// Canned analysis assembled without the external text generator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub predictions: Vec<DiseasePrediction>,
    pub suggestions: Vec<String>,
    pub disclaimer: String,
}

impl AnalysisReport {
    pub fn new(predictions: Vec<DiseasePrediction>, suggestions: Vec<String>) -> Self {
        Self {
            predictions,
            suggestions,
            disclaimer: DISCLAIMER.to_string(),
        }
    }
}

/// Outcome of the emergency rule pass. Not an error: a control signal the
/// caller must honor by skipping analysis and surfacing the reasons.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EmergencyAlert {
    pub is_emergency: bool,
    pub reasons: Vec<String>,
    pub message: String,
}

impl EmergencyAlert {
    pub fn none() -> Self {
        Self {
            is_emergency: false,
            reasons: Vec::new(),
            message: String::new(),
        }
    }

    pub fn triggered(reasons: Vec<String>) -> Self {
        Self {
            is_emergency: true,
            reasons,
            message: "Seek immediate medical attention".to_string(),
        }
    }
}
