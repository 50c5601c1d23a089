/// Application-level constants
pub const APP_NAME: &str = "Healthcase Symptom Checker";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Inclusive age bounds (years).
pub const MIN_AGE: u32 = 0;
pub const MAX_AGE: u32 = 150;

/// Weight bounds in kg. The lower bound is exclusive.
pub const MIN_WEIGHT: f64 = 1.0;
pub const MAX_WEIGHT: f64 = 500.0;

/// Inclusive temperature bounds (°C).
pub const MIN_TEMPERATURE: f64 = 30.0;
pub const MAX_TEMPERATURE: f64 = 50.0;

/// Hard cap on any free-form string field after whitespace collapsing.
pub const MAX_INPUT_LENGTH: usize = 1000;

/// Duration answers are short ("3 days", "2 weeks").
pub const MAX_DURATION_LENGTH: usize = 50;

/// Requests allowed per client within one rate-limit window.
pub const RATE_LIMIT_REQUESTS: u32 = 10;
/// Rate-limit window in seconds.
pub const RATE_LIMIT_WINDOW_SECS: u64 = 60;

/// OpenRouter-compatible chat completions endpoint.
pub const OPENROUTER_BASE_URL: &str = "https://openrouter.ai/api/v1";
/// Model requested from the remote generator.
pub const DEFAULT_MODEL: &str = "deepseek/deepseek-chat-v3.1:free";
/// Env var holding the OpenRouter API key.
pub const API_KEY_ENV: &str = "OPENROUTER_API_KEY";
/// Valid OpenRouter keys carry this prefix.
pub const API_KEY_PREFIX: &str = "sk-or-v1-";

/// Default tracing filter when RUST_LOG is unset.
pub fn default_log_filter() -> String {
    "info,healthcase=debug".to_string()
}

/// Port for the analysis API server (HEALTHCASE_PORT overrides).
pub fn server_port() -> u16 {
    std::env::var("HEALTHCASE_PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(5000)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn age_bounds_span_human_range() {
        assert_eq!(MIN_AGE, 0);
        assert_eq!(MAX_AGE, 150);
    }

    #[test]
    fn app_version_matches_cargo() {
        assert_eq!(APP_VERSION, "1.0.0");
    }

    #[test]
    fn default_port_is_5000() {
        // Only meaningful when the override is absent in the test env.
        if std::env::var("HEALTHCASE_PORT").is_err() {
            assert_eq!(server_port(), 5000);
        }
    }
}
