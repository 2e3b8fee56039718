//! Signup Client Library
//!
//! Client side of account registration: checks the sign-up form against the
//! local rules, then submits it to the remote account-creation endpoint and
//! turns the answer into a session or a single user-facing error.

pub mod client;
pub mod config;
pub mod registrar;

pub use client::{FieldErrors, HttpSignupClient, SignupApi, SignupReply, TransportError};
pub use config::SignupClientConfig;
pub use registrar::Registrar;
