//! Disease reference catalog.
//!
//! Five static profiles of expected symptom values, lab ranges, and
//! vitals windows. These are similarity-scoring patterns, not diagnostic
//! criteria; the values ship with the application and never change at
//! runtime.

use super::types::{Expected, LabKey, SymptomKey, VitalsKey};

/// A named reference pattern the scorer compares records against.
#[derive(Debug, Clone)]
pub struct DiseaseProfile {
    pub name: &'static str,
    /// Expected symptom values, compared by exact equality.
    pub symptoms: Vec<(SymptomKey, Expected)>,
    /// Expected lab values: inclusive ranges or required outcomes.
    pub tests: Vec<(LabKey, Expected)>,
    /// Expected vitals windows.
    pub vitals: Vec<(VitalsKey, Expected)>,
}

/// Build the shipped catalog. Declaration order is the tie-break order
/// for ranking, so it is part of the contract.
pub fn default_catalog() -> Vec<DiseaseProfile> {
    use Expected::{Bool, Int, Range, Text};
    use LabKey as L;
    use SymptomKey as S;
    use VitalsKey as V;

    vec![
        DiseaseProfile {
            name: "Viral Fever",
            symptoms: vec![
                (S::Fever, Bool(true)),
                (S::Fatigue, Bool(true)),
                (S::Headache, Bool(true)),
                (S::BodyPain, Bool(true)),
                (S::SoreThroat, Bool(true)),
                (S::AppetiteChange, Bool(true)),
                (S::FeverDuration, Int(3)),
            ],
            tests: vec![
                (L::Wbc, Range(4000.0, 11000.0)),
                (L::Platelets, Range(150000.0, 450000.0)),
                (L::Hemoglobin, Range(12.0, 16.0)),
                (L::BloodSugar, Range(70.0, 140.0)),
                (L::Alt, Range(7.0, 56.0)),
                (L::Creatinine, Range(0.6, 1.2)),
            ],
            vitals: vec![
                (V::Temperature, Range(37.5, 39.5)),
                (V::Duration, Range(1.0, 7.0)),
            ],
        },
        DiseaseProfile {
            name: "Dengue",
            symptoms: vec![
                (S::Fever, Bool(true)),
                (S::Fatigue, Bool(true)),
                (S::Headache, Bool(true)),
                (S::BodyPain, Bool(true)),
                (S::Nausea, Bool(true)),
                (S::Rash, Bool(true)),
                (S::RecentTravel, Bool(true)),
                (S::FeverDuration, Int(5)),
            ],
            tests: vec![
                // Leukopenia and thrombocytopenia windows
                (L::Wbc, Range(2000.0, 5000.0)),
                (L::Platelets, Range(20000.0, 100000.0)),
                (L::Hemoglobin, Range(10.0, 14.0)),
                (L::BloodSugar, Range(70.0, 140.0)),
                (L::Alt, Range(30.0, 100.0)),
                (L::Creatinine, Range(0.6, 1.2)),
                (L::Dengue, Bool(true)),
            ],
            vitals: vec![
                (V::Temperature, Range(38.0, 40.0)),
                (V::Duration, Range(3.0, 10.0)),
            ],
        },
        DiseaseProfile {
            name: "Typhoid",
            symptoms: vec![
                (S::Fever, Bool(true)),
                (S::Fatigue, Bool(true)),
                (S::Headache, Bool(true)),
                (S::Nausea, Bool(true)),
                (S::Vomiting, Bool(true)),
                (S::Diarrhea, Bool(true)),
                (S::AppetiteChange, Bool(true)),
                (S::FeverDuration, Int(7)),
            ],
            tests: vec![
                (L::Wbc, Range(3000.0, 8000.0)),
                (L::Platelets, Range(100000.0, 300000.0)),
                (L::Hemoglobin, Range(10.0, 14.0)),
                (L::BloodSugar, Range(70.0, 140.0)),
                (L::Alt, Range(20.0, 80.0)),
                (L::Creatinine, Range(0.6, 1.2)),
                (L::Typhoid, Bool(true)),
            ],
            vitals: vec![
                (V::Temperature, Range(38.0, 40.5)),
                (V::Duration, Range(5.0, 14.0)),
            ],
        },
        DiseaseProfile {
            name: "Malaria",
            symptoms: vec![
                (S::Fever, Bool(true)),
                (S::Fatigue, Bool(true)),
                (S::Headache, Bool(true)),
                (S::BodyPain, Bool(true)),
                (S::Nausea, Bool(true)),
                (S::Vomiting, Bool(true)),
                (S::RecentTravel, Bool(true)),
                (S::FeverDuration, Int(4)),
            ],
            tests: vec![
                (L::Wbc, Range(4000.0, 12000.0)),
                (L::Platelets, Range(50000.0, 150000.0)),
                // Anemia window
                (L::Hemoglobin, Range(8.0, 12.0)),
                (L::BloodSugar, Range(70.0, 140.0)),
                (L::Alt, Range(20.0, 60.0)),
                (L::Creatinine, Range(0.6, 1.2)),
                (L::Malaria, Bool(true)),
            ],
            vitals: vec![
                (V::Temperature, Range(38.0, 40.0)),
                (V::Duration, Range(2.0, 10.0)),
            ],
        },
        DiseaseProfile {
            name: "COVID-19",
            symptoms: vec![
                (S::Fever, Bool(true)),
                (S::Cough, Bool(true)),
                (S::Fatigue, Bool(true)),
                (S::ShortnessOfBreath, Bool(true)),
                (S::SoreThroat, Bool(true)),
                (S::Headache, Bool(true)),
                (S::BodyPain, Bool(true)),
                (S::LossOfTasteSmell, Bool(true)),
                (S::FeverDuration, Int(5)),
                (S::CoughType, Text("dry")),
            ],
            tests: vec![
                (L::Wbc, Range(3000.0, 10000.0)),
                (L::Platelets, Range(100000.0, 400000.0)),
                (L::Hemoglobin, Range(11.0, 15.0)),
                (L::BloodSugar, Range(70.0, 140.0)),
                (L::Alt, Range(10.0, 50.0)),
                (L::Creatinine, Range(0.6, 1.2)),
            ],
            vitals: vec![
                (V::Temperature, Range(37.5, 39.0)),
                (V::Duration, Range(3.0, 14.0)),
            ],
        },
    ]
}
