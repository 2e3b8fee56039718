//! Signup client configuration.

use std::env;

use common::{env_or, HttpClientConfig};

/// Signup client configuration.
#[derive(Debug, Clone)]
pub struct SignupClientConfig {
    /// Account-creation endpoint and timeouts
    pub http: HttpClientConfig,
}

impl SignupClientConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default().http;
        Self {
            http: HttpClientConfig {
                endpoint: env::var("SIGNUP_URL").unwrap_or(defaults.endpoint),
                connect_timeout_ms: env_or("SIGNUP_CONNECT_TIMEOUT_MS", defaults.connect_timeout_ms),
                request_timeout_ms: env_or("SIGNUP_REQUEST_TIMEOUT_MS", defaults.request_timeout_ms),
            },
        }
    }
}

impl Default for SignupClientConfig {
    fn default() -> Self {
        Self {
            http: HttpClientConfig {
                endpoint: "http://localhost:8000/api/signup".to_string(),
                ..HttpClientConfig::default()
            },
        }
    }
}
