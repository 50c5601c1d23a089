//! Weighted multi-field matching against the disease catalog.
//!
//! Each profile is scored in three independent passes (symptoms, lab
//! tests, vitals) combined with fixed weights. Reported symptoms carry
//! half the signal, objective labs 30%, and the basic vitals window is a
//! weak tiebreaker.

use std::cmp::Ordering;

use crate::models::UserRecord;

use super::catalog::DiseaseProfile;
use super::types::{equals, Expected, MatchResult, Observed};

const SYMPTOM_WEIGHT: f64 = 0.5;
const TEST_WEIGHT: f64 = 0.3;
const VITALS_WEIGHT: f64 = 0.2;

/// How one profile check resolved.
enum Check {
    Matched,
    Unmatched,
    /// The user value could not be compared (e.g. a duration string that
    /// is not a bare number); the check leaves both counters untouched.
    Skipped,
}

/// Score a record against every profile and rank descending by overall
/// match. The sort is stable, so ties keep catalog declaration order.
/// Every profile is always returned; any top-N cut is the caller's.
pub fn rank_against_catalog(
    record: &UserRecord,
    catalog: &[DiseaseProfile],
) -> Vec<MatchResult> {
    let mut results: Vec<MatchResult> = catalog
        .iter()
        .map(|profile| score_profile(record, profile))
        .collect();

    results.sort_by(|a, b| {
        b.overall_match
            .partial_cmp(&a.overall_match)
            .unwrap_or(Ordering::Equal)
    });
    results
}

fn score_profile(record: &UserRecord, profile: &DiseaseProfile) -> MatchResult {
    let symptom_match = symptom_ratio(record, profile);
    let test_match = test_ratio(record, profile);
    let basic_match = vitals_ratio(record, profile);

    MatchResult {
        disease: profile.name.to_string(),
        overall_match: SYMPTOM_WEIGHT * symptom_match
            + TEST_WEIGHT * test_match
            + VITALS_WEIGHT * basic_match,
        symptom_match,
        test_match,
        basic_match,
    }
}

/// Fraction of profile-defined symptom attributes the record answers
/// identically. Exact equality only — a fever_duration of 4 against an
/// expected 5 is a miss, not a partial credit.
fn symptom_ratio(record: &UserRecord, profile: &DiseaseProfile) -> f64 {
    let mut checked = 0u32;
    let mut matched = 0u32;

    for (key, expected) in &profile.symptoms {
        if let Some(observed) = key.observe(&record.symptoms) {
            checked += 1;
            if equals(&observed, expected) {
                matched += 1;
            }
        }
    }
    ratio(matched, checked)
}

/// Fraction of profile-defined lab expectations the supplied values
/// satisfy: range containment for numeric windows, exact equality for
/// required outcomes.
fn test_ratio(record: &UserRecord, profile: &DiseaseProfile) -> f64 {
    let mut checked = 0u32;
    let mut matched = 0u32;

    for (key, expected) in &profile.tests {
        if let Some(observed) = key.observe(&record.test_results) {
            checked += 1;
            if let Check::Matched = evaluate(&observed, expected) {
                matched += 1;
            }
        }
    }
    ratio(matched, checked)
}

/// Same logic over the vitals windows. A duration answer that is not a
/// bare number cannot be range-compared, so that single check is
/// excluded from both counters instead of failing the computation.
fn vitals_ratio(record: &UserRecord, profile: &DiseaseProfile) -> f64 {
    let mut checked = 0u32;
    let mut matched = 0u32;

    for (key, expected) in &profile.vitals {
        if let Some(observed) = key.observe(&record.basic_info) {
            checked += 1;
            match evaluate(&observed, expected) {
                Check::Matched => matched += 1,
                Check::Unmatched => {}
                Check::Skipped => checked = checked.saturating_sub(1),
            }
        }
    }
    ratio(matched, checked)
}

/// Resolve one observed value against a profile expectation.
fn evaluate(observed: &Observed, expected: &Expected) -> Check {
    match expected {
        Expected::Range(lo, hi) => {
            let value = match observed {
                Observed::Text(s) => match s.trim().parse::<f64>() {
                    Ok(v) => Some(v),
                    Err(_) => None,
                },
                other => other.as_f64(),
            };
            match value {
                Some(v) if (*lo..=*hi).contains(&v) => Check::Matched,
                Some(_) => Check::Unmatched,
                None => Check::Skipped,
            }
        }
        scalar => {
            if equals(observed, scalar) {
                Check::Matched
            } else {
                Check::Unmatched
            }
        }
    }
}

fn ratio(matched: u32, checked: u32) -> f64 {
    if checked == 0 {
        0.0
    } else {
        f64::from(matched) / f64::from(checked)
    }
}
