//! Symptom analysis endpoint.
//!
//! Validates the submitted questionnaire, runs the emergency gate, and —
//! only for non-emergency records — ranks the catalog and produces the
//! analysis text, substituting the rule-based report when the text
//! generator is unreachable.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::engine::fallback;
use crate::engine::types::MatchResult;
use crate::llm::AnalysisService;
use crate::models::{EmergencyAlert, RawRecord, UserRecord, DISCLAIMER};
use crate::validation;

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub success: bool,
    pub emergency: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub reasons: Vec<String>,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<AnalysisData>,
}

#[derive(Debug, Serialize)]
pub struct AnalysisData {
    pub analysis: String,
    pub ranked: Vec<MatchResult>,
    pub disclaimer: &'static str,
}

impl AnalyzeResponse {
    fn emergency(alert: EmergencyAlert) -> Self {
        let message = format!(
            "Seek immediate medical attention. Reasons: {}",
            alert.reasons.join(", ")
        );
        Self {
            success: false,
            emergency: true,
            reasons: alert.reasons,
            message,
            data: None,
        }
    }

    fn success(analysis: String, ranked: Vec<MatchResult>) -> Self {
        Self {
            success: true,
            emergency: false,
            reasons: Vec::new(),
            message: "Analysis completed successfully".to_string(),
            data: Some(AnalysisData {
                analysis,
                ranked,
                disclaimer: DISCLAIMER,
            }),
        }
    }
}

/// `POST /api/analyze` — run the full triage flow for one questionnaire.
pub async fn analyze(
    State(ctx): State<ApiContext>,
    Json(raw): Json<RawRecord>,
) -> Result<Json<AnalyzeResponse>, ApiError> {
    let record = validation::validate_record(&raw)?;

    let alert = ctx.engine.check_emergency(&record);
    if alert.is_emergency {
        tracing::warn!(reasons = ?alert.reasons, "emergency symptoms detected");
        return Ok(Json(AnalyzeResponse::emergency(alert)));
    }

    let ranked = ctx.engine.rank_against_catalog(&record);
    let analysis = generate_text(ctx.analysis.clone(), record).await?;

    Ok(Json(AnalyzeResponse::success(analysis, ranked)))
}

/// Collect the analysis text off the async runtime (the generator client
/// is blocking). A dead generator is not an endpoint failure: the
/// rule-based report stands in.
async fn generate_text(
    service: Arc<AnalysisService>,
    record: UserRecord,
) -> Result<String, ApiError> {
    let text = tokio::task::spawn_blocking(move || {
        match service.generate_collected(&record) {
            Ok(text) => text,
            Err(err) => {
                tracing::warn!(error = %err, "analysis unavailable, using rule-based report");
                fallback::render_report(&fallback::fallback_report(&record))
            }
        }
    })
    .await
    .map_err(|e| ApiError::Internal(e.to_string()))?;

    Ok(text)
}
