//! Domain layer - Core business entities and value objects.
//!
//! This crate contains pure domain logic with no infrastructure dependencies:
//! communities and memberships for the community service, and the sign-up
//! form rules used by the signup client.

pub mod community;
pub mod constants;
pub mod registration;

pub use community::{Community, JoinOutcome, Membership, MembershipStatus};
pub use constants::*;
pub use registration::{
    validate_password, validate_username, RegistrationError, RegistrationForm,
    RegistrationRequest, SignupSession, UsernameViolation,
};
