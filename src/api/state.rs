//! API server state

use crate::config::{AppConfig, Environment};
use crate::json::JsonDecoder;

/// API server state
#[derive(Debug, Clone)]
pub struct AppState {
    /// Operating environment reported by the health check
    pub env: Environment,

    /// Application version reported by the health check
    pub version: &'static str,

    /// Decoder for request bodies, bounded by the configured body limit
    pub decoder: JsonDecoder,
}

impl AppState {
    pub fn new(env: Environment, max_body_bytes: usize) -> Self {
        Self {
            env,
            version: env!("CARGO_PKG_VERSION"),
            decoder: JsonDecoder::new(max_body_bytes),
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.env, config.limits.max_body_bytes)
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::from_config(&AppConfig::default())
    }
}
