//! Domain-level constants.
//!
//! These constants define business rules and validation requirements.

// =============================================================================
// Username
// =============================================================================

/// Minimum username length (inclusive)
pub const MIN_USERNAME_LENGTH: usize = 3;

/// Maximum username length (inclusive)
pub const MAX_USERNAME_LENGTH: usize = 20;

/// Sequences a username may not contain
pub const FORBIDDEN_USERNAME_SEQUENCES: &[&str] = &["..", "__"];

/// Characters a username may not start or end with
pub const USERNAME_EDGE_CHARS: &[char] = &['.', '_'];

// =============================================================================
// Password
// =============================================================================

/// Minimum password length requirement
pub const MIN_PASSWORD_LENGTH: usize = 6;

// =============================================================================
// Registration
// =============================================================================

/// Gender choices offered on the sign-up form
pub const GENDER_CHOICES: &[&str] = &["Male", "Female", "Other"];

// =============================================================================
// Membership messages
// =============================================================================

/// Message returned when a membership was created
pub const MSG_JOINED: &str = "Successfully joined community";

/// Message returned when the membership already existed
pub const MSG_ALREADY_JOINED: &str = "User already in the community";
