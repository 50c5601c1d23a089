use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::enums::{CoughType, Gender};

// ---------------------------------------------------------------------------
// RawRecord — the unvalidated questionnaire as submitted
// ---------------------------------------------------------------------------

/// Untyped questionnaire input, exactly as a presentation layer collected
/// it. Field values may be JSON strings, numbers, or booleans; validation
/// turns this into a [`UserRecord`] or a field-level error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawRecord {
    #[serde(default)]
    pub basic_info: Map<String, Value>,
    #[serde(default)]
    pub symptoms: Map<String, Value>,
    #[serde(default)]
    pub test_results: Map<String, Value>,
}

// ---------------------------------------------------------------------------
// Canonical record sections
// ---------------------------------------------------------------------------

/// Demographics and vitals. Every field is optional; absence means the
/// user skipped the question, not a default reading.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct BasicInfo {
    pub age: Option<u32>,
    pub gender: Option<Gender>,
    /// Kilograms.
    pub weight: Option<f64>,
    /// Degrees Celsius.
    pub temperature: Option<f64>,
    /// Short free-form answer such as "3 days" or "2 weeks".
    pub duration: Option<String>,
    #[serde(default)]
    pub chronic_diseases: bool,
}

/// The fixed symptom checklist. Flags default to false when unspecified;
/// the two detail fields stay unknown unless their parent flag was set.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Symptoms {
    #[serde(default)]
    pub fever: bool,
    #[serde(default)]
    pub fatigue: bool,
    #[serde(default)]
    pub cough: bool,
    #[serde(default)]
    pub headache: bool,
    #[serde(default)]
    pub body_pain: bool,
    #[serde(default)]
    pub nausea: bool,
    #[serde(default)]
    pub vomiting: bool,
    #[serde(default)]
    pub diarrhea: bool,
    #[serde(default)]
    pub rash: bool,
    #[serde(default)]
    pub sore_throat: bool,
    #[serde(default)]
    pub shortness_of_breath: bool,
    #[serde(default)]
    pub chest_pain: bool,
    #[serde(default)]
    pub confusion: bool,
    #[serde(default)]
    pub recent_travel: bool,
    #[serde(default)]
    pub medication: bool,
    #[serde(default)]
    pub appetite_change: bool,
    #[serde(default)]
    pub urine_change: bool,
    #[serde(default)]
    pub weight_loss: bool,
    #[serde(default)]
    pub night_sweats: bool,
    #[serde(default)]
    pub exposure: bool,
    /// Days of fever, asked only when `fever` is set.
    pub fever_duration: Option<u32>,
    /// Asked only when `cough` is set.
    pub cough_type: Option<CoughType>,
}

/// Lab values and rapid-test outcomes. Numeric values are non-negative;
/// the three named tests are positive/negative outcomes.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TestResults {
    #[serde(rename = "WBC")]
    pub wbc: Option<f64>,
    #[serde(rename = "Platelets")]
    pub platelets: Option<f64>,
    #[serde(rename = "Hemoglobin")]
    pub hemoglobin: Option<f64>,
    #[serde(rename = "Blood_Sugar")]
    pub blood_sugar: Option<f64>,
    #[serde(rename = "ALT")]
    pub alt: Option<f64>,
    #[serde(rename = "Creatinine")]
    pub creatinine: Option<f64>,
    #[serde(rename = "Malaria")]
    pub malaria: Option<bool>,
    #[serde(rename = "Dengue")]
    pub dengue: Option<bool>,
    #[serde(rename = "Typhoid")]
    pub typhoid: Option<bool>,
}

impl TestResults {
    /// Whether any lab value or test outcome was supplied at all.
    pub fn any_present(&self) -> bool {
        self.wbc.is_some()
            || self.platelets.is_some()
            || self.hemoglobin.is_some()
            || self.blood_sugar.is_some()
            || self.alt.is_some()
            || self.creatinine.is_some()
            || self.malaria.is_some()
            || self.dengue.is_some()
            || self.typhoid.is_some()
    }
}

/// The validated questionnaire: what every engine operation consumes.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct UserRecord {
    pub basic_info: BasicInfo,
    pub symptoms: Symptoms,
    pub test_results: TestResults,
}
