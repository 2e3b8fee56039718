//! Service layer - business logic.

mod membership_service;
mod token_verifier;

pub use membership_service::{MembershipManager, MembershipService};
pub use token_verifier::{Claims, TokenVerifier};
