pub mod enums;
pub mod prediction;
pub mod record;

pub use enums::{CoughType, Gender};
pub use prediction::{AnalysisReport, DiseasePrediction, EmergencyAlert, DISCLAIMER};
pub use record::{BasicInfo, RawRecord, Symptoms, TestResults, UserRecord};
