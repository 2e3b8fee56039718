//! Registration form validation.
//!
//! Validation is fail-fast: only the first violated rule is reported, so the
//! form can show one message at a time.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{
    FORBIDDEN_USERNAME_SEQUENCES, MAX_USERNAME_LENGTH, MIN_PASSWORD_LENGTH, MIN_USERNAME_LENGTH,
    USERNAME_EDGE_CHARS,
};

static USERNAME_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9._]+$").expect("valid username regex"));

static PASSWORD_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9]+$").expect("valid password regex"));

/// Which username rule was violated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UsernameViolation {
    /// Contains something other than ASCII letters, digits, `.` or `_`
    Characters,
    /// Shorter than 3 or longer than 20 characters
    Length,
    /// Contains `..` or `__`
    Consecutive,
    /// Starts or ends with `.` or `_`
    Edges,
}

impl UsernameViolation {
    pub fn as_str(&self) -> &'static str {
        match self {
            UsernameViolation::Characters => "characters",
            UsernameViolation::Length => "length",
            UsernameViolation::Consecutive => "consecutive",
            UsernameViolation::Edges => "edges",
        }
    }

    /// User-facing explanation of the rule.
    pub fn message(&self) -> &'static str {
        match self {
            UsernameViolation::Characters => {
                "Username must not contain special characters or spaces."
            }
            UsernameViolation::Length => "Username must be between 3 and 20 characters long.",
            UsernameViolation::Consecutive => {
                "Username cannot contain consecutive dots or underscores."
            }
            UsernameViolation::Edges => "Username cannot start or end with a dot or underscore.",
        }
    }
}

impl fmt::Display for UsernameViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Reasons a registration attempt can fail.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistrationError {
    /// At least one of the seven fields is empty
    #[error("Please fill out all the fields.")]
    Incomplete,

    #[error("Invalid username ({0})")]
    InvalidUsername(UsernameViolation),

    #[error("Invalid password")]
    InvalidPassword,

    /// First message of the first field reported by the account service
    #[error("{0}")]
    RemoteField(String),

    /// The account service could not be reached or answered garbage
    #[error("There was an issue signing up. Please try again.")]
    RemoteTransport,
}

impl RegistrationError {
    /// Short heading for the error dialog.
    pub fn title(&self) -> &'static str {
        match self {
            RegistrationError::Incomplete => "Missing Information",
            RegistrationError::InvalidUsername(_) => "Invalid Username",
            RegistrationError::InvalidPassword => "Invalid Password",
            RegistrationError::RemoteField(_) | RegistrationError::RemoteTransport => {
                "Sign Up Error"
            }
        }
    }

    /// Message shown to the user.
    pub fn message(&self) -> String {
        match self {
            RegistrationError::InvalidUsername(violation) => violation.message().to_string(),
            RegistrationError::InvalidPassword => {
                "Password must be at least 6 characters long and include at least one letter and one number."
                    .to_string()
            }
            _ => self.to_string(),
        }
    }
}

/// Check a username against the shape rules, in order.
///
/// Also usable on its own for field-level checks while the form is being
/// filled in.
pub fn validate_username(input: &str) -> Result<(), UsernameViolation> {
    if !USERNAME_CHARS.is_match(input) {
        return Err(UsernameViolation::Characters);
    }

    let length = input.chars().count();
    if !(MIN_USERNAME_LENGTH..=MAX_USERNAME_LENGTH).contains(&length) {
        return Err(UsernameViolation::Length);
    }

    if FORBIDDEN_USERNAME_SEQUENCES
        .iter()
        .any(|seq| input.contains(seq))
    {
        return Err(UsernameViolation::Consecutive);
    }

    if input.starts_with(USERNAME_EDGE_CHARS) || input.ends_with(USERNAME_EDGE_CHARS) {
        return Err(UsernameViolation::Edges);
    }

    Ok(())
}

/// Check a password: at least 6 ASCII letters/digits with at least one of each.
pub fn validate_password(input: &str) -> Result<(), RegistrationError> {
    let valid = input.len() >= MIN_PASSWORD_LENGTH
        && PASSWORD_CHARS.is_match(input)
        && input.chars().any(|c| c.is_ascii_alphabetic())
        && input.chars().any(|c| c.is_ascii_digit());

    if valid {
        Ok(())
    } else {
        Err(RegistrationError::InvalidPassword)
    }
}

/// Raw sign-up form input. Immutable; validation produces a new value.
#[derive(Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RegistrationForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub username: String,
    pub age: String,
    pub gender: String,
    pub password: String,
}

impl RegistrationForm {
    fn is_complete(&self) -> bool {
        [
            &self.first_name,
            &self.last_name,
            &self.email,
            &self.username,
            &self.age,
            &self.gender,
            &self.password,
        ]
        .iter()
        .all(|field| !field.is_empty())
    }

    /// Run every local rule and produce the request to send upstream.
    pub fn validate(&self) -> Result<RegistrationRequest, RegistrationError> {
        if !self.is_complete() {
            return Err(RegistrationError::Incomplete);
        }

        validate_username(&self.username).map_err(RegistrationError::InvalidUsername)?;
        validate_password(&self.password)?;

        Ok(RegistrationRequest {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            username: self.username.clone(),
            email: self.email.clone(),
            password: self.password.clone(),
            age: self.age.clone(),
            gender: self.gender.clone(),
        })
    }
}

impl fmt::Debug for RegistrationForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistrationForm")
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("email", &self.email)
            .field("username", &self.username)
            .field("age", &self.age)
            .field("gender", &self.gender)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Validated registration payload, in the field order the signup endpoint expects.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationRequest {
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub email: String,
    pub password: String,
    pub age: String,
    pub gender: String,
}

impl fmt::Debug for RegistrationRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistrationRequest")
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("age", &self.age)
            .field("gender", &self.gender)
            .finish()
    }
}

/// Session handed back by the account service after a successful sign-up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignupSession {
    pub token: String,
    pub user_id: String,
}
