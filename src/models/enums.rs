use serde::{Deserialize, Serialize};

use crate::validation::ValidationError;

/// Biological sex as collected on the questionnaire. Canonical form is
/// the single uppercase letter used by the wire format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    #[serde(rename = "M")]
    Male,
    #[serde(rename = "F")]
    Female,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Male => "M",
            Self::Female => "F",
        }
    }
}

impl std::str::FromStr for Gender {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "M" => Ok(Self::Male),
            "F" => Ok(Self::Female),
            _ => Err(ValidationError::InvalidChoice {
                field: "gender",
                allowed: "'M' or 'F'",
            }),
        }
    }
}

/// Cough character, asked only when the cough flag is set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CoughType {
    Dry,
    Productive,
}

impl CoughType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Dry => "dry",
            Self::Productive => "productive",
        }
    }
}

impl std::str::FromStr for CoughType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dry" => Ok(Self::Dry),
            "productive" => Ok(Self::Productive),
            _ => Err(ValidationError::InvalidChoice {
                field: "cough_type",
                allowed: "'dry' or 'productive'",
            }),
        }
    }
}
