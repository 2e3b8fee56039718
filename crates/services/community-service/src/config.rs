//! Community service configuration.

use std::env;

use common::{env_or, DatabaseConfig, JwtConfig};

/// Community service configuration.
#[derive(Debug, Clone)]
pub struct CommunityServiceConfig {
    /// Database connection settings
    pub database: DatabaseConfig,
    /// Secret shared with the auth provider for bearer token verification
    pub jwt: JwtConfig,
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
}

impl CommunityServiceConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            database: DatabaseConfig::from_env("COMMUNITY_SERVICE"),
            jwt: JwtConfig::from_env(),
            host: env::var("COMMUNITY_SERVICE_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env_or("COMMUNITY_SERVICE_PORT", 3000),
        }
    }
}

impl Default for CommunityServiceConfig {
    fn default() -> Self {
        Self {
            database: DatabaseConfig::default(),
            jwt: JwtConfig::default(),
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}
