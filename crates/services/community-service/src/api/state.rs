//! Application state for dependency injection.

use std::sync::Arc;

use crate::infra::HealthCheck;
use crate::service::{MembershipService, TokenVerifier};

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub membership_service: Arc<dyn MembershipService>,
    pub token_verifier: Arc<TokenVerifier>,
    pub database: Arc<dyn HealthCheck>,
}

impl AppState {
    /// Create new app state.
    pub fn new(
        membership_service: Arc<dyn MembershipService>,
        token_verifier: Arc<TokenVerifier>,
        database: Arc<dyn HealthCheck>,
    ) -> Self {
        Self {
            membership_service,
            token_verifier,
            database,
        }
    }
}
