//! Emergency rule evaluation.
//!
//! A fixed, process-lifetime list of conjunctive safety predicates runs
//! over every validated record before any scoring or analysis. Rules are
//! independent: all of them are evaluated so every matching reason is
//! reported, and a missing field makes an ordering comparison false
//! rather than an error.

use crate::models::{EmergencyAlert, UserRecord};

use super::types::{equals, Cmp, Expected, FieldRef, Observed, SymptomKey, VitalsKey};

/// One (field, operator, value) clause of a rule conjunction.
#[derive(Debug, Clone)]
pub struct Condition {
    pub field: FieldRef,
    pub cmp: Cmp,
    pub expected: Expected,
}

impl Condition {
    fn holds(&self, record: &UserRecord) -> bool {
        check(self.field.observe(record).as_ref(), self.cmp, &self.expected)
    }
}

/// A safety predicate: every condition must hold for the rule to trigger.
#[derive(Debug, Clone)]
pub struct EmergencyRule {
    pub reason: &'static str,
    pub conditions: Vec<Condition>,
}

impl EmergencyRule {
    pub fn triggers(&self, record: &UserRecord) -> bool {
        self.conditions.iter().all(|c| c.holds(record))
    }
}

/// The shipped emergency rules, constructed once at engine startup.
pub fn default_rules() -> Vec<EmergencyRule> {
    vec![
        EmergencyRule {
            reason: "High fever (>40°C)",
            conditions: vec![Condition {
                field: FieldRef::Vitals(VitalsKey::Temperature),
                cmp: Cmp::Gt,
                expected: Expected::Num(40.0),
            }],
        },
        EmergencyRule {
            reason: "Fever with confusion",
            conditions: vec![
                Condition {
                    field: FieldRef::Symptom(SymptomKey::Confusion),
                    cmp: Cmp::Eq,
                    expected: Expected::Bool(true),
                },
                Condition {
                    field: FieldRef::Symptom(SymptomKey::Fever),
                    cmp: Cmp::Eq,
                    expected: Expected::Bool(true),
                },
            ],
        },
        EmergencyRule {
            reason: "Shortness of breath with chest pain",
            conditions: vec![
                Condition {
                    field: FieldRef::Symptom(SymptomKey::ShortnessOfBreath),
                    cmp: Cmp::Eq,
                    expected: Expected::Bool(true),
                },
                Condition {
                    field: FieldRef::Symptom(SymptomKey::ChestPain),
                    cmp: Cmp::Eq,
                    expected: Expected::Bool(true),
                },
            ],
        },
    ]
}

/// Evaluate every rule against a record and collect the triggered
/// reasons. Pure: no logging, no side effects.
pub fn check_emergency(rules: &[EmergencyRule], record: &UserRecord) -> EmergencyAlert {
    let reasons: Vec<String> = rules
        .iter()
        .filter(|rule| rule.triggers(record))
        .map(|rule| rule.reason.to_string())
        .collect();

    if reasons.is_empty() {
        EmergencyAlert::none()
    } else {
        EmergencyAlert::triggered(reasons)
    }
}

/// Evaluate a single condition. Equality treats a missing field as
/// unequal (so `Ne` against a missing field holds); ordering operators
/// on a missing or non-numeric field are false, never an error.
fn check(observed: Option<&Observed>, cmp: Cmp, expected: &Expected) -> bool {
    match cmp {
        Cmp::Eq => observed.is_some_and(|o| equals(o, expected)),
        Cmp::Ne => !observed.is_some_and(|o| equals(o, expected)),
        Cmp::Gt | Cmp::Lt | Cmp::Ge | Cmp::Le => {
            match (observed.and_then(Observed::as_f64), expected.as_f64()) {
                (Some(o), Some(e)) => match cmp {
                    Cmp::Gt => o > e,
                    Cmp::Lt => o < e,
                    Cmp::Ge => o >= e,
                    _ => o <= e,
                },
                _ => false,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UserRecord;

    fn record() -> UserRecord {
        UserRecord::default()
    }

    #[test]
    fn high_temperature_triggers_single_reason() {
        let mut r = record();
        r.basic_info.temperature = Some(41.0);

        let alert = check_emergency(&default_rules(), &r);
        assert!(alert.is_emergency);
        assert_eq!(alert.reasons, vec!["High fever (>40°C)".to_string()]);
    }

    #[test]
    fn boundary_temperature_does_not_trigger() {
        let mut r = record();
        r.basic_info.temperature = Some(40.0);

        let alert = check_emergency(&default_rules(), &r);
        assert!(!alert.is_emergency);
    }

    #[test]
    fn fever_with_confusion_triggers() {
        let mut r = record();
        r.symptoms.confusion = true;
        r.symptoms.fever = true;

        let alert = check_emergency(&default_rules(), &r);
        assert!(alert.is_emergency);
        assert!(alert.reasons.contains(&"Fever with confusion".to_string()));
    }

    #[test]
    fn confusion_alone_does_not_trigger() {
        let mut r = record();
        r.symptoms.confusion = true;

        assert!(!check_emergency(&default_rules(), &r).is_emergency);
    }

    #[test]
    fn breathing_with_chest_pain_triggers() {
        let mut r = record();
        r.symptoms.shortness_of_breath = true;
        r.symptoms.chest_pain = true;

        let alert = check_emergency(&default_rules(), &r);
        assert_eq!(
            alert.reasons,
            vec!["Shortness of breath with chest pain".to_string()]
        );
    }

    #[test]
    fn all_matching_reasons_reported_together() {
        let mut r = record();
        r.basic_info.temperature = Some(41.5);
        r.symptoms.fever = true;
        r.symptoms.confusion = true;
        r.symptoms.shortness_of_breath = true;
        r.symptoms.chest_pain = true;

        let alert = check_emergency(&default_rules(), &r);
        assert_eq!(alert.reasons.len(), 3);
    }

    #[test]
    fn adding_a_trigger_never_removes_another() {
        let mut r = record();
        r.basic_info.temperature = Some(41.0);
        let before = check_emergency(&default_rules(), &r);

        r.symptoms.fever = true;
        r.symptoms.confusion = true;
        let after = check_emergency(&default_rules(), &r);

        for reason in &before.reasons {
            assert!(after.reasons.contains(reason));
        }
    }

    #[test]
    fn missing_temperature_never_errors() {
        let r = record();
        let alert = check_emergency(&default_rules(), &r);
        assert!(!alert.is_emergency);
        assert!(alert.reasons.is_empty());
    }

    #[test]
    fn ordering_against_missing_field_is_false() {
        assert!(!check(None, Cmp::Gt, &Expected::Num(40.0)));
        assert!(!check(None, Cmp::Le, &Expected::Num(40.0)));
    }

    #[test]
    fn inequality_against_missing_field_holds() {
        assert!(check(None, Cmp::Ne, &Expected::Bool(true)));
        assert!(!check(None, Cmp::Eq, &Expected::Bool(true)));
    }
}
