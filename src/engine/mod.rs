//! The triage engine: emergency detection and catalog scoring.
//!
//! All operations are pure functions over a validated record; the engine
//! struct only carries the process-lifetime configuration (rule list and
//! disease catalog) built once at startup.

pub mod catalog;
pub mod fallback;
pub mod rules;
pub mod scorer;
pub mod types;

use crate::models::{EmergencyAlert, UserRecord};

use catalog::DiseaseProfile;
use rules::EmergencyRule;
use types::MatchResult;

/// What a full triage pass produced. `Emergency` is a control signal,
/// not an error: scoring was deliberately skipped and the caller must
/// surface the reasons immediately.
#[derive(Debug, Clone, PartialEq)]
pub enum TriageOutcome {
    Emergency(EmergencyAlert),
    Ranked(Vec<MatchResult>),
}

/// Stateless engine over fixed rules and catalog.
pub struct TriageEngine {
    rules: Vec<EmergencyRule>,
    catalog: Vec<DiseaseProfile>,
}

impl TriageEngine {
    /// Engine with the shipped rules and catalog.
    pub fn new() -> Self {
        Self {
            rules: rules::default_rules(),
            catalog: catalog::default_catalog(),
        }
    }

    /// Evaluate the emergency rules only.
    pub fn check_emergency(&self, record: &UserRecord) -> EmergencyAlert {
        rules::check_emergency(&self.rules, record)
    }

    /// Rank the record against every catalog profile, best match first.
    pub fn rank_against_catalog(&self, record: &UserRecord) -> Vec<MatchResult> {
        scorer::rank_against_catalog(record, &self.catalog)
    }

    /// Full pass: the emergency gate runs first and short-circuits
    /// scoring entirely when any rule triggers.
    pub fn triage(&self, record: &UserRecord) -> TriageOutcome {
        let alert = self.check_emergency(record);
        if alert.is_emergency {
            return TriageOutcome::Emergency(alert);
        }
        TriageOutcome::Ranked(self.rank_against_catalog(record))
    }
}

impl Default for TriageEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn emergency_short_circuits_scoring() {
        let engine = TriageEngine::new();
        let mut record = UserRecord::default();
        record.basic_info.temperature = Some(41.0);

        match engine.triage(&record) {
            TriageOutcome::Emergency(alert) => {
                assert_eq!(alert.reasons, vec!["High fever (>40°C)".to_string()]);
            }
            TriageOutcome::Ranked(_) => panic!("emergency record must not be scored"),
        }
    }

    #[test]
    fn calm_record_gets_full_ranking() {
        let engine = TriageEngine::new();
        let record = UserRecord::default();

        match engine.triage(&record) {
            TriageOutcome::Ranked(results) => assert_eq!(results.len(), 5),
            TriageOutcome::Emergency(_) => panic!("blank record is not an emergency"),
        }
    }
}
