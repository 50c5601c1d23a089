//! Healthcase — an educational symptom triage engine.
//!
//! The core is four pure components: input validation, an emergency rule
//! engine, a weighted disease-profile match scorer, and a rule-based
//! fallback predictor. Around them sit a text-generation collaborator
//! (network-backed with a canned fallback) and a rate-limited axum API.
//! It is a triage helper for learning purposes, not a diagnostic tool.

pub mod api;
pub mod config;
pub mod engine;
pub mod llm;
pub mod models;
pub mod validation;

use tracing_subscriber::EnvFilter;

/// Initialize tracing for the server binary.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();
}
