//! Shared state for the analysis API.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use crate::config;
use crate::engine::TriageEngine;
use crate::llm::AnalysisService;

// ═══════════════════════════════════════════════════════════
// API context — shared state for the router
// ═══════════════════════════════════════════════════════════

/// Shared context for all routes and middleware: the stateless engine,
/// the analysis service, and the one genuinely mutable piece — the rate
/// limiter — behind a mutex.
#[derive(Clone)]
pub struct ApiContext {
    pub engine: Arc<TriageEngine>,
    pub analysis: Arc<AnalysisService>,
    pub rate_limiter: Arc<Mutex<RateLimiter>>,
}

impl ApiContext {
    pub fn new() -> Self {
        Self::with_service(AnalysisService::from_env())
    }

    /// Context with an explicit analysis service (tests, offline runs).
    pub fn with_service(analysis: AnalysisService) -> Self {
        Self {
            engine: Arc::new(TriageEngine::new()),
            analysis: Arc::new(analysis),
            rate_limiter: Arc::new(Mutex::new(RateLimiter::new())),
        }
    }
}

impl Default for ApiContext {
    fn default() -> Self {
        Self::new()
    }
}

// ═══════════════════════════════════════════════════════════
// Rate limiter — per-client sliding window
// ═══════════════════════════════════════════════════════════

/// Per-client sliding-window rate limiter. Timestamps older than the
/// window are pruned before every admission check.
pub struct RateLimiter {
    windows: HashMap<String, Vec<Instant>>,
    max_requests: u32,
    window: Duration,
}

impl RateLimiter {
    pub fn new() -> Self {
        Self {
            windows: HashMap::new(),
            max_requests: config::RATE_LIMIT_REQUESTS,
            window: Duration::from_secs(config::RATE_LIMIT_WINDOW_SECS),
        }
    }

    /// Check if a client may proceed. Returns `Ok(())` or
    /// `Err(retry_after_secs)` if the window is full.
    pub fn check(&mut self, client_id: &str) -> Result<(), u64> {
        self.check_at(client_id, Instant::now())
    }

    // Clock injected for testability.
    fn check_at(&mut self, client_id: &str, now: Instant) -> Result<(), u64> {
        let entries = self.windows.entry(client_id.to_string()).or_default();

        entries.retain(|ts| now.duration_since(*ts) < self.window);

        if entries.len() as u32 >= self.max_requests {
            return Err(self.window.as_secs());
        }

        entries.push(now);
        Ok(())
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new()
    }
}
