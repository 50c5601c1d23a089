//! Rule-based fallback prediction.
//!
//! A small, hand-authored rule set independent of the disease catalog.
//! Each rule names a condition with a fixed confidence and canned
//! reasoning; it exists so the system can still answer when no external
//! text generator is reachable. Kept deliberately separate from the
//! emergency rules — they serve different contracts.

use crate::models::{AnalysisReport, DiseasePrediction, UserRecord};

/// Platelet count assumed when the lab value was not supplied. High
/// enough that the low-platelet clause cannot fire on missing data.
const DEFAULT_PLATELETS: f64 = 200_000.0;
/// Below this, the platelet count supports the dengue rule.
const LOW_PLATELETS: f64 = 100_000.0;

/// Predict up to three conditions from fixed conjunctive rules. Rules
/// are not mutually exclusive: all matches are collected, sorted by
/// confidence descending, and the top three kept.
pub fn fallback_predict(record: &UserRecord) -> Vec<DiseasePrediction> {
    let s = &record.symptoms;
    let t = &record.test_results;

    let mut predictions = Vec::new();

    let platelets = t.platelets.unwrap_or(DEFAULT_PLATELETS);
    if s.fever
        && s.rash
        && s.recent_travel
        && t.dengue == Some(true)
        && platelets < LOW_PLATELETS
    {
        predictions.push(prediction(
            "Dengue",
            75,
            "High fever, rash, low platelets, positive dengue test",
        ));
    }

    if s.fever
        && s.fatigue
        && s.headache
        && t.dengue != Some(true)
        && t.malaria != Some(true)
    {
        predictions.push(prediction(
            "Viral Fever",
            60,
            "Common flu-like symptoms with normal test results",
        ));
    }

    if s.fever && s.recent_travel && t.malaria == Some(true) {
        predictions.push(prediction(
            "Malaria",
            70,
            "Fever with travel history and positive malaria test",
        ));
    }

    if s.fever && s.nausea && s.diarrhea && t.typhoid == Some(true) {
        predictions.push(prediction(
            "Typhoid",
            65,
            "Fever with gastrointestinal symptoms and positive test",
        ));
    }

    if predictions.is_empty() {
        predictions.push(prediction(
            "Common Cold",
            40,
            "Mild symptoms, could be various causes",
        ));
    }

    predictions.sort_by(|a, b| b.confidence.cmp(&a.confidence));
    predictions.truncate(3);
    predictions
}

/// Deterministic action lines appended to every fallback analysis.
pub fn suggested_actions(record: &UserRecord) -> Vec<String> {
    let mut actions = Vec::new();

    if record.basic_info.temperature.is_some_and(|t| t > 39.0) {
        actions.push("Monitor temperature closely".to_string());
    }
    if record.symptoms.fever {
        actions.push("Stay hydrated and rest".to_string());
    }
    actions.push("Consult a healthcare professional for proper diagnosis".to_string());
    if record.test_results.any_present() {
        actions.push("Follow up with additional tests if recommended".to_string());
    }
    actions
}

/// Assemble the canned report used when the text generator is down.
pub fn fallback_report(record: &UserRecord) -> AnalysisReport {
    AnalysisReport::new(fallback_predict(record), suggested_actions(record))
}

/// Render a report as the plain text the presentation layers expect.
pub fn render_report(report: &AnalysisReport) -> String {
    let mut out = String::from("Top Possible Conditions:\n");
    for (i, p) in report.predictions.iter().enumerate() {
        out.push_str(&format!("{}. {} – {}%\n", i + 1, p.disease, p.confidence));
        out.push_str(&format!("   Reasoning: {}\n", p.reasoning));
    }

    out.push_str("\nSuggested Actions:\n");
    for action in &report.suggestions {
        out.push_str(&format!("- {action}\n"));
    }
    out
}

fn prediction(disease: &str, confidence: u8, reasoning: &str) -> DiseasePrediction {
    DiseasePrediction {
        disease: disease.to_string(),
        confidence,
        reasoning: reasoning.to_string(),
    }
}
