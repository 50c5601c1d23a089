//! Input validation and sanitization.
//!
//! Turns the untyped questionnaire ([`RawRecord`]) into the canonical
//! [`UserRecord`], rejecting out-of-range values, unrecognized tokens, and
//! suspicious string content with a field-level error. Absent or empty
//! input maps to "unknown" for optional fields, never to a default.

use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;
use thiserror::Error;

use crate::config;
use crate::models::{BasicInfo, CoughType, Gender, RawRecord, Symptoms, TestResults, UserRecord};

/// Content patterns that fail validation outright rather than being
/// stripped: HTML tags, script URLs, inline event handlers, and raw
/// control characters.
static SUSPICIOUS_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        Regex::new(r"<[^>]*>").unwrap(),
        Regex::new(r"(?i)javascript:").unwrap(),
        Regex::new(r"(?i)on\w+\s*=").unwrap(),
        Regex::new(r"[\x00-\x1f\x{7f}-\x{9f}]").unwrap(),
    ]
});

/// Duration grammar: a count with an optional time-unit word.
static DURATION_FORMAT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^\d+\s*(days?|weeks?|months?|hours?)?$").unwrap());

/// A field-level validation failure. Carries the offending field name so
/// the presentation layer can point at the exact question.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("{field} must be a valid number")]
    NotANumber { field: &'static str },

    #[error("{field} must be between {min} and {max}{unit}")]
    OutOfRange {
        field: &'static str,
        min: f64,
        max: f64,
        unit: &'static str,
    },

    #[error("{field} must be {allowed}")]
    InvalidChoice {
        field: &'static str,
        allowed: &'static str,
    },

    #[error("{field} must be a valid boolean (y/n, yes/no, true/false, 1/0)")]
    InvalidBool { field: &'static str },

    #[error("{field} must be a number or include time units (days, weeks, etc.)")]
    InvalidDuration { field: &'static str },

    #[error("{field} must be positive/negative")]
    InvalidOutcome { field: &'static str },

    /// Suspicious content. Hard failure, never silently stripped.
    #[error("{field}: invalid input detected")]
    Security { field: &'static str },
}

impl ValidationError {
    /// The field the failure belongs to.
    pub fn field(&self) -> &'static str {
        match self {
            Self::NotANumber { field }
            | Self::OutOfRange { field, .. }
            | Self::InvalidChoice { field, .. }
            | Self::InvalidBool { field }
            | Self::InvalidDuration { field }
            | Self::InvalidOutcome { field }
            | Self::Security { field } => field,
        }
    }
}

/// Absent, JSON null, and the empty string all mean "unknown".
fn is_unknown(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.is_empty(),
        _ => false,
    }
}

/// Read a JSON value as f64, accepting numeric-looking strings.
fn numeric(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

/// Sanitize a free-form string: reject suspicious content, collapse
/// whitespace runs, and truncate to `max_length` characters.
pub fn sanitize_text(
    field: &'static str,
    raw: &str,
    max_length: usize,
) -> Result<String, ValidationError> {
    for pattern in SUSPICIOUS_PATTERNS.iter() {
        if pattern.is_match(raw) {
            return Err(ValidationError::Security { field });
        }
    }

    let collapsed = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    Ok(collapsed.chars().take(max_length).collect())
}

/// Validate a non-negative integer count bounded like an age (0–150).
/// Float input is truncated toward zero, matching how the questionnaire
/// treats "28.7" as 28.
pub fn validate_count(
    field: &'static str,
    value: Option<&Value>,
) -> Result<Option<u32>, ValidationError> {
    if is_unknown(value) {
        return Ok(None);
    }
    let value = value.unwrap_or(&Value::Null);

    let parsed = numeric(value).ok_or(ValidationError::NotANumber { field })?;
    if !parsed.is_finite() {
        return Err(ValidationError::NotANumber { field });
    }

    let truncated = parsed.trunc();
    if truncated < config::MIN_AGE as f64 || truncated > config::MAX_AGE as f64 {
        return Err(ValidationError::OutOfRange {
            field,
            min: config::MIN_AGE as f64,
            max: config::MAX_AGE as f64,
            unit: "",
        });
    }
    Ok(Some(truncated as u32))
}

pub fn validate_age(value: Option<&Value>) -> Result<Option<u32>, ValidationError> {
    validate_count("age", value)
}

pub fn validate_weight(value: Option<&Value>) -> Result<Option<f64>, ValidationError> {
    if is_unknown(value) {
        return Ok(None);
    }
    let field = "weight";
    let parsed =
        numeric(value.unwrap_or(&Value::Null)).ok_or(ValidationError::NotANumber { field })?;

    // The lower bound is exclusive: 1 kg is not a plausible reading.
    if !(parsed > config::MIN_WEIGHT && parsed <= config::MAX_WEIGHT) {
        return Err(ValidationError::OutOfRange {
            field,
            min: config::MIN_WEIGHT,
            max: config::MAX_WEIGHT,
            unit: " kg",
        });
    }
    Ok(Some(parsed))
}

pub fn validate_temperature(value: Option<&Value>) -> Result<Option<f64>, ValidationError> {
    if is_unknown(value) {
        return Ok(None);
    }
    let field = "temperature";
    let parsed =
        numeric(value.unwrap_or(&Value::Null)).ok_or(ValidationError::NotANumber { field })?;

    if !(config::MIN_TEMPERATURE..=config::MAX_TEMPERATURE).contains(&parsed) {
        return Err(ValidationError::OutOfRange {
            field,
            min: config::MIN_TEMPERATURE,
            max: config::MAX_TEMPERATURE,
            unit: "°C",
        });
    }
    Ok(Some(parsed))
}

pub fn validate_gender(value: Option<&Value>) -> Result<Option<Gender>, ValidationError> {
    if is_unknown(value) {
        return Ok(None);
    }
    match value {
        Some(Value::String(s)) => Gender::from_str(&s.trim().to_uppercase()).map(Some),
        _ => Err(ValidationError::InvalidChoice {
            field: "gender",
            allowed: "'M' or 'F'",
        }),
    }
}

pub fn validate_cough_type(value: Option<&Value>) -> Result<Option<CoughType>, ValidationError> {
    if is_unknown(value) {
        return Ok(None);
    }
    match value {
        Some(Value::String(s)) => CoughType::from_str(&s.trim().to_lowercase()).map(Some),
        _ => Err(ValidationError::InvalidChoice {
            field: "cough_type",
            allowed: "'dry' or 'productive'",
        }),
    }
}

/// Validate the symptom-duration answer: digits with an optional
/// day/week/month/hour unit. The string is sanitized first, so embedded
/// markup or control characters fail before the grammar is consulted.
pub fn validate_duration(value: Option<&Value>) -> Result<Option<String>, ValidationError> {
    if is_unknown(value) {
        return Ok(None);
    }
    let field = "duration";
    let text = match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => return Err(ValidationError::InvalidDuration { field }),
    };

    let sanitized = sanitize_text(field, &text, config::MAX_DURATION_LENGTH)?;
    if !DURATION_FORMAT.is_match(&sanitized) {
        return Err(ValidationError::InvalidDuration { field });
    }
    Ok(Some(sanitized))
}

/// Validate a yes/no answer. Missing and null mean "not reported", which
/// for checklist flags is false.
pub fn validate_bool(
    field: &'static str,
    value: Option<&Value>,
) -> Result<bool, ValidationError> {
    match value {
        None | Some(Value::Null) => Ok(false),
        Some(Value::Bool(b)) => Ok(*b),
        Some(Value::String(s)) => match s.trim().to_lowercase().as_str() {
            "y" | "yes" | "true" | "1" => Ok(true),
            "n" | "no" | "false" | "0" => Ok(false),
            _ => Err(ValidationError::InvalidBool { field }),
        },
        _ => Err(ValidationError::InvalidBool { field }),
    }
}

/// Validate a positive/negative test outcome (Malaria, Dengue, Typhoid).
pub fn validate_outcome(
    field: &'static str,
    value: Option<&Value>,
) -> Result<Option<bool>, ValidationError> {
    if is_unknown(value) {
        return Ok(None);
    }
    match value {
        Some(Value::Bool(b)) => Ok(Some(*b)),
        Some(Value::String(s)) => match s.trim().to_lowercase().as_str() {
            "positive" | "true" | "1" | "yes" => Ok(Some(true)),
            "negative" | "false" | "0" | "no" => Ok(Some(false)),
            _ => Err(ValidationError::InvalidOutcome { field }),
        },
        _ => Err(ValidationError::InvalidOutcome { field }),
    }
}

/// Validate a numeric lab value. Labs are concentrations and counts, so
/// negative readings are rejected.
pub fn validate_lab_value(
    field: &'static str,
    value: Option<&Value>,
) -> Result<Option<f64>, ValidationError> {
    if is_unknown(value) {
        return Ok(None);
    }
    let parsed =
        numeric(value.unwrap_or(&Value::Null)).ok_or(ValidationError::NotANumber { field })?;
    if !parsed.is_finite() || parsed < 0.0 {
        return Err(ValidationError::NotANumber { field });
    }
    Ok(Some(parsed))
}

/// Validate the complete questionnaire. Fails fast: the first violating
/// field aborts the composite and is named in the error.
pub fn validate_record(raw: &RawRecord) -> Result<UserRecord, ValidationError> {
    let b = &raw.basic_info;
    let basic_info = BasicInfo {
        age: validate_age(b.get("age"))?,
        gender: validate_gender(b.get("gender"))?,
        weight: validate_weight(b.get("weight"))?,
        temperature: validate_temperature(b.get("temperature"))?,
        duration: validate_duration(b.get("duration"))?,
        chronic_diseases: validate_bool("chronic_diseases", b.get("chronic_diseases"))?,
    };

    let s = &raw.symptoms;
    let symptoms = Symptoms {
        fever: validate_bool("fever", s.get("fever"))?,
        fatigue: validate_bool("fatigue", s.get("fatigue"))?,
        cough: validate_bool("cough", s.get("cough"))?,
        headache: validate_bool("headache", s.get("headache"))?,
        body_pain: validate_bool("body_pain", s.get("body_pain"))?,
        nausea: validate_bool("nausea", s.get("nausea"))?,
        vomiting: validate_bool("vomiting", s.get("vomiting"))?,
        diarrhea: validate_bool("diarrhea", s.get("diarrhea"))?,
        rash: validate_bool("rash", s.get("rash"))?,
        sore_throat: validate_bool("sore_throat", s.get("sore_throat"))?,
        shortness_of_breath: validate_bool(
            "shortness_of_breath",
            s.get("shortness_of_breath"),
        )?,
        chest_pain: validate_bool("chest_pain", s.get("chest_pain"))?,
        confusion: validate_bool("confusion", s.get("confusion"))?,
        recent_travel: validate_bool("recent_travel", s.get("recent_travel"))?,
        medication: validate_bool("medication", s.get("medication"))?,
        appetite_change: validate_bool("appetite_change", s.get("appetite_change"))?,
        urine_change: validate_bool("urine_change", s.get("urine_change"))?,
        weight_loss: validate_bool("weight_loss", s.get("weight_loss"))?,
        night_sweats: validate_bool("night_sweats", s.get("night_sweats"))?,
        exposure: validate_bool("exposure", s.get("exposure"))?,
        fever_duration: validate_count("fever_duration", s.get("fever_duration"))?,
        cough_type: validate_cough_type(s.get("cough_type"))?,
    };

    let t = &raw.test_results;
    let test_results = TestResults {
        wbc: validate_lab_value("WBC", t.get("WBC"))?,
        platelets: validate_lab_value("Platelets", t.get("Platelets"))?,
        hemoglobin: validate_lab_value("Hemoglobin", t.get("Hemoglobin"))?,
        blood_sugar: validate_lab_value("Blood_Sugar", t.get("Blood_Sugar"))?,
        alt: validate_lab_value("ALT", t.get("ALT"))?,
        creatinine: validate_lab_value("Creatinine", t.get("Creatinine"))?,
        malaria: validate_outcome("Malaria", t.get("Malaria"))?,
        dengue: validate_outcome("Dengue", t.get("Dengue"))?,
        typhoid: validate_outcome("Typhoid", t.get("Typhoid"))?,
    };

    Ok(UserRecord {
        basic_info,
        symptoms,
        test_results,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn v(value: Value) -> Option<Value> {
        Some(value)
    }

    #[test]
    fn age_accepts_full_valid_range() {
        for age in [0u32, 1, 28, 99, 150] {
            let out = validate_age(v(json!(age)).as_ref()).unwrap();
            assert_eq!(out, Some(age));
        }
    }

    #[test]
    fn age_rejects_out_of_range() {
        assert!(matches!(
            validate_age(v(json!(-1)).as_ref()),
            Err(ValidationError::OutOfRange { field: "age", .. })
        ));
        assert!(validate_age(v(json!(151)).as_ref()).is_err());
    }

    #[test]
    fn age_accepts_numeric_strings_and_truncates_floats() {
        assert_eq!(validate_age(v(json!("28")).as_ref()).unwrap(), Some(28));
        assert_eq!(validate_age(v(json!(28.7)).as_ref()).unwrap(), Some(28));
        assert!(matches!(
            validate_age(v(json!("twenty")).as_ref()),
            Err(ValidationError::NotANumber { field: "age" })
        ));
    }

    #[test]
    fn age_absent_or_empty_is_unknown() {
        assert_eq!(validate_age(None).unwrap(), None);
        assert_eq!(validate_age(v(json!("")).as_ref()).unwrap(), None);
        assert_eq!(validate_age(v(Value::Null).as_ref()).unwrap(), None);
    }

    #[test]
    fn weight_lower_bound_is_exclusive() {
        assert!(validate_weight(v(json!(1.0)).as_ref()).is_err());
        assert_eq!(
            validate_weight(v(json!(1.1)).as_ref()).unwrap(),
            Some(1.1)
        );
        assert_eq!(
            validate_weight(v(json!(500.0)).as_ref()).unwrap(),
            Some(500.0)
        );
        assert!(validate_weight(v(json!(500.5)).as_ref()).is_err());
    }

    #[test]
    fn temperature_bounds_inclusive() {
        assert_eq!(
            validate_temperature(v(json!(30.0)).as_ref()).unwrap(),
            Some(30.0)
        );
        assert_eq!(
            validate_temperature(v(json!(50)).as_ref()).unwrap(),
            Some(50.0)
        );
        assert!(validate_temperature(v(json!(29.9)).as_ref()).is_err());
        assert!(validate_temperature(v(json!(50.1)).as_ref()).is_err());
    }

    #[test]
    fn gender_case_insensitive_canonicalized() {
        assert_eq!(
            validate_gender(v(json!("m")).as_ref()).unwrap(),
            Some(Gender::Male)
        );
        assert_eq!(
            validate_gender(v(json!(" F ")).as_ref()).unwrap(),
            Some(Gender::Female)
        );
        assert!(validate_gender(v(json!("other")).as_ref()).is_err());
    }

    #[test]
    fn cough_type_case_insensitive() {
        assert_eq!(
            validate_cough_type(v(json!("DRY")).as_ref()).unwrap(),
            Some(CoughType::Dry)
        );
        assert!(validate_cough_type(v(json!("wet")).as_ref()).is_err());
    }

    #[test]
    fn bool_token_sets() {
        for yes in ["y", "Yes", "TRUE", "1"] {
            assert!(validate_bool("fever", v(json!(yes)).as_ref()).unwrap());
        }
        for no in ["n", "No", "false", "0"] {
            assert!(!validate_bool("fever", v(json!(no)).as_ref()).unwrap());
        }
        assert!(validate_bool("fever", v(json!(true)).as_ref()).unwrap());
        assert!(validate_bool("fever", v(json!("maybe")).as_ref()).is_err());
    }

    #[test]
    fn bool_missing_defaults_false() {
        assert!(!validate_bool("fever", None).unwrap());
        assert!(!validate_bool("fever", v(Value::Null).as_ref()).unwrap());
    }

    #[test]
    fn duration_accepts_counts_with_units() {
        for ok in ["3 days", "2 weeks", "5", "1 month", "12 hours", "4days"] {
            assert_eq!(
                validate_duration(v(json!(ok)).as_ref()).unwrap().as_deref(),
                Some(ok),
                "expected {ok:?} to validate"
            );
        }
    }

    #[test]
    fn duration_rejects_spelled_out_numbers() {
        assert!(matches!(
            validate_duration(v(json!("three days")).as_ref()),
            Err(ValidationError::InvalidDuration { .. })
        ));
        assert!(validate_duration(v(json!("days 3")).as_ref()).is_err());
    }

    #[test]
    fn duration_collapses_whitespace() {
        let out = validate_duration(v(json!("3   days")).as_ref()).unwrap();
        assert_eq!(out.as_deref(), Some("3 days"));
    }

    #[test]
    fn sanitize_rejects_markup_and_control_chars() {
        for bad in ["<script>alert(1)</script>", "<b>3 days", "javascript:x", "onload=1", "3\u{0}days"] {
            assert!(matches!(
                sanitize_text("duration", bad, 50),
                Err(ValidationError::Security { field: "duration" })
            ));
        }
    }

    #[test]
    fn sanitize_truncates_to_max_length() {
        let long = "7 ".repeat(100);
        let out = sanitize_text("duration", &long, 10).unwrap();
        assert_eq!(out.chars().count(), 10);
    }

    #[test]
    fn outcome_accepts_positive_negative_tokens() {
        assert_eq!(
            validate_outcome("Dengue", v(json!("positive")).as_ref()).unwrap(),
            Some(true)
        );
        assert_eq!(
            validate_outcome("Dengue", v(json!("Negative")).as_ref()).unwrap(),
            Some(false)
        );
        assert_eq!(
            validate_outcome("Malaria", v(json!(true)).as_ref()).unwrap(),
            Some(true)
        );
        assert!(matches!(
            validate_outcome("Typhoid", v(json!(1200)).as_ref()),
            Err(ValidationError::InvalidOutcome { field: "Typhoid" })
        ));
    }

    #[test]
    fn lab_value_rejects_negative_and_text() {
        assert_eq!(
            validate_lab_value("WBC", v(json!(8000)).as_ref()).unwrap(),
            Some(8000.0)
        );
        assert_eq!(
            validate_lab_value("ALT", v(json!("42.5")).as_ref()).unwrap(),
            Some(42.5)
        );
        assert!(validate_lab_value("WBC", v(json!(-5)).as_ref()).is_err());
        assert!(validate_lab_value("WBC", v(json!("high")).as_ref()).is_err());
    }

    #[test]
    fn composite_builds_canonical_record() {
        let raw: RawRecord = serde_json::from_value(json!({
            "basic_info": {
                "age": "28", "gender": "m", "weight": 75.0,
                "temperature": 38.5, "duration": "4 days", "chronic_diseases": "no"
            },
            "symptoms": {
                "fever": "yes", "fatigue": true, "headache": "y",
                "fever_duration": 3, "cough": false
            },
            "test_results": { "WBC": "8000", "Dengue": "negative" }
        }))
        .unwrap();

        let record = validate_record(&raw).unwrap();
        assert_eq!(record.basic_info.age, Some(28));
        assert_eq!(record.basic_info.gender, Some(Gender::Male));
        assert_eq!(record.basic_info.duration.as_deref(), Some("4 days"));
        assert!(record.symptoms.fever && record.symptoms.fatigue);
        assert!(!record.symptoms.cough);
        assert_eq!(record.symptoms.fever_duration, Some(3));
        assert_eq!(record.test_results.wbc, Some(8000.0));
        assert_eq!(record.test_results.dengue, Some(false));
    }

    #[test]
    fn composite_fails_on_first_bad_field() {
        let raw: RawRecord = serde_json::from_value(json!({
            "basic_info": { "age": 200, "gender": "zzz" },
            "symptoms": {},
            "test_results": {}
        }))
        .unwrap();

        let err = validate_record(&raw).unwrap_err();
        assert_eq!(err.field(), "age");
    }

    #[test]
    fn composite_names_lab_field_on_failure() {
        let raw: RawRecord = serde_json::from_value(json!({
            "basic_info": {},
            "symptoms": {},
            "test_results": { "Platelets": "lots" }
        }))
        .unwrap();

        let err = validate_record(&raw).unwrap_err();
        assert_eq!(err.field(), "Platelets");
    }

    #[test]
    fn error_messages_name_constraints() {
        let err = validate_age(v(json!(400)).as_ref()).unwrap_err();
        assert_eq!(err.to_string(), "age must be between 0 and 150");

        let err = validate_temperature(v(json!(20)).as_ref()).unwrap_err();
        assert_eq!(err.to_string(), "temperature must be between 30 and 50°C");
    }
}
