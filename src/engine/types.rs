use serde::{Deserialize, Serialize};

use crate::models::{BasicInfo, Symptoms, TestResults, UserRecord};

// ---------------------------------------------------------------------------
// Field keys — typed references into the canonical record
// ---------------------------------------------------------------------------

/// A symptom-section attribute a rule or profile can reference.
///
/// `LossOfTasteSmell` is referenced by the COVID-19 profile but has no
/// counterpart on the questionnaire, so observing it always yields
/// "unknown" and the check never participates in a ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymptomKey {
    Fever,
    Fatigue,
    Cough,
    Headache,
    BodyPain,
    Nausea,
    Vomiting,
    Diarrhea,
    Rash,
    SoreThroat,
    ShortnessOfBreath,
    ChestPain,
    Confusion,
    RecentTravel,
    Medication,
    AppetiteChange,
    UrineChange,
    WeightLoss,
    NightSweats,
    Exposure,
    FeverDuration,
    CoughType,
    LossOfTasteSmell,
}

impl SymptomKey {
    /// Read this attribute off a record. Checklist flags always answer;
    /// the detail fields answer only when present.
    pub fn observe(&self, s: &Symptoms) -> Option<Observed> {
        match self {
            Self::Fever => Some(Observed::Bool(s.fever)),
            Self::Fatigue => Some(Observed::Bool(s.fatigue)),
            Self::Cough => Some(Observed::Bool(s.cough)),
            Self::Headache => Some(Observed::Bool(s.headache)),
            Self::BodyPain => Some(Observed::Bool(s.body_pain)),
            Self::Nausea => Some(Observed::Bool(s.nausea)),
            Self::Vomiting => Some(Observed::Bool(s.vomiting)),
            Self::Diarrhea => Some(Observed::Bool(s.diarrhea)),
            Self::Rash => Some(Observed::Bool(s.rash)),
            Self::SoreThroat => Some(Observed::Bool(s.sore_throat)),
            Self::ShortnessOfBreath => Some(Observed::Bool(s.shortness_of_breath)),
            Self::ChestPain => Some(Observed::Bool(s.chest_pain)),
            Self::Confusion => Some(Observed::Bool(s.confusion)),
            Self::RecentTravel => Some(Observed::Bool(s.recent_travel)),
            Self::Medication => Some(Observed::Bool(s.medication)),
            Self::AppetiteChange => Some(Observed::Bool(s.appetite_change)),
            Self::UrineChange => Some(Observed::Bool(s.urine_change)),
            Self::WeightLoss => Some(Observed::Bool(s.weight_loss)),
            Self::NightSweats => Some(Observed::Bool(s.night_sweats)),
            Self::Exposure => Some(Observed::Bool(s.exposure)),
            Self::FeverDuration => s.fever_duration.map(Observed::Int),
            Self::CoughType => s
                .cough_type
                .map(|c| Observed::Text(c.as_str().to_string())),
            Self::LossOfTasteSmell => None,
        }
    }
}

/// A lab value or rapid-test outcome a profile can reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabKey {
    Wbc,
    Platelets,
    Hemoglobin,
    BloodSugar,
    Alt,
    Creatinine,
    Malaria,
    Dengue,
    Typhoid,
}

impl LabKey {
    pub fn observe(&self, t: &TestResults) -> Option<Observed> {
        match self {
            Self::Wbc => t.wbc.map(Observed::Num),
            Self::Platelets => t.platelets.map(Observed::Num),
            Self::Hemoglobin => t.hemoglobin.map(Observed::Num),
            Self::BloodSugar => t.blood_sugar.map(Observed::Num),
            Self::Alt => t.alt.map(Observed::Num),
            Self::Creatinine => t.creatinine.map(Observed::Num),
            Self::Malaria => t.malaria.map(Observed::Bool),
            Self::Dengue => t.dengue.map(Observed::Bool),
            Self::Typhoid => t.typhoid.map(Observed::Bool),
        }
    }
}

/// A vitals-section field a rule or profile can reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VitalsKey {
    Age,
    Weight,
    Temperature,
    /// Free-form answer; compared numerically only when it parses.
    Duration,
}

impl VitalsKey {
    pub fn observe(&self, b: &BasicInfo) -> Option<Observed> {
        match self {
            Self::Age => b.age.map(Observed::Int),
            Self::Weight => b.weight.map(Observed::Num),
            Self::Temperature => b.temperature.map(Observed::Num),
            Self::Duration => b.duration.clone().map(Observed::Text),
        }
    }
}

/// Either side of the record a condition can address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldRef {
    Vitals(VitalsKey),
    Symptom(SymptomKey),
}

impl FieldRef {
    pub fn observe(&self, record: &UserRecord) -> Option<Observed> {
        match self {
            Self::Vitals(key) => key.observe(&record.basic_info),
            Self::Symptom(key) => key.observe(&record.symptoms),
        }
    }
}

// ---------------------------------------------------------------------------
// Values
// ---------------------------------------------------------------------------

/// A value actually present on a user record.
#[derive(Debug, Clone, PartialEq)]
pub enum Observed {
    Bool(bool),
    Int(u32),
    Num(f64),
    Text(String),
}

impl Observed {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Int(i) => Some(*i as f64),
            Self::Num(n) => Some(*n),
            _ => None,
        }
    }
}

/// A value a rule or profile expects: a scalar compared for equality, or
/// an inclusive numeric range.
#[derive(Debug, Clone, PartialEq)]
pub enum Expected {
    Bool(bool),
    Int(u32),
    Num(f64),
    Text(&'static str),
    Range(f64, f64),
}

impl Expected {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Int(i) => Some(*i as f64),
            Self::Num(n) => Some(*n),
            _ => None,
        }
    }
}

/// Exact-equality comparison between an observed and an expected scalar.
/// Numeric variants compare by value; mismatched shapes never match.
pub fn equals(observed: &Observed, expected: &Expected) -> bool {
    match (observed, expected) {
        (Observed::Bool(o), Expected::Bool(e)) => o == e,
        (Observed::Text(o), Expected::Text(e)) => o == e,
        _ => match (observed.as_f64(), expected.as_f64()) {
            (Some(o), Some(e)) => o == e,
            _ => false,
        },
    }
}

/// Comparison operator used by emergency rule conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cmp {
    Eq,
    Ne,
    Gt,
    Lt,
    Ge,
    Le,
}

// ---------------------------------------------------------------------------
// MatchResult
// ---------------------------------------------------------------------------

/// Per-profile scoring output. All four scores sit in [0, 1].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MatchResult {
    pub disease: String,
    pub overall_match: f64,
    pub symptom_match: f64,
    pub test_match: f64,
    pub basic_match: f64,
}
