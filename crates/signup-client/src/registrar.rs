//! Sign-up orchestration: validate locally, then submit.

use std::sync::Arc;

use tracing::{info, warn};

use domain::{RegistrationError, RegistrationForm, SignupSession};

use crate::client::{SignupApi, SignupReply};

/// Validates a registration form and relays the account service's verdict.
///
/// Only one error is ever surfaced: the first local rule that fails, or the
/// first message of the first field the account service complains about.
pub struct Registrar {
    api: Arc<dyn SignupApi>,
}

impl Registrar {
    pub fn new(api: Arc<dyn SignupApi>) -> Self {
        Self { api }
    }

    pub async fn register(
        &self,
        form: &RegistrationForm,
    ) -> Result<SignupSession, RegistrationError> {
        // Nothing leaves the device unless every local rule passes
        let request = form.validate()?;

        match self.api.create_account(&request).await {
            Ok(SignupReply::Created(session)) => {
                info!(user_id = %session.user_id, "Account created");
                Ok(session)
            }
            Ok(SignupReply::Rejected(errors)) => match errors.first_message() {
                Some(message) => Err(RegistrationError::RemoteField(message.to_string())),
                None => {
                    warn!("Account service rejected the form without a message");
                    Err(RegistrationError::RemoteTransport)
                }
            },
            Err(e) => {
                warn!(error = %e, "Signup request failed");
                Err(RegistrationError::RemoteTransport)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{FieldErrors, MockSignupApi, TransportError};
    use domain::UsernameViolation;

    fn form() -> RegistrationForm {
        RegistrationForm {
            first_name: "Grace".to_string(),
            last_name: "Hopper".to_string(),
            email: "grace@example.com".to_string(),
            username: "grace_h".to_string(),
            age: "85".to_string(),
            gender: "Female".to_string(),
            password: "cobol1959".to_string(),
        }
    }

    fn registrar(api: MockSignupApi) -> Registrar {
        Registrar::new(Arc::new(api))
    }

    #[tokio::test]
    async fn test_success_returns_session() {
        let mut api = MockSignupApi::new();
        api.expect_create_account()
            .withf(|req| req.username == "grace_h" && req.password == "cobol1959")
            .times(1)
            .returning(|_| {
                Ok(SignupReply::Created(SignupSession {
                    token: "token-123".to_string(),
                    user_id: "17".to_string(),
                }))
            });

        let session = registrar(api).register(&form()).await.unwrap();
        assert_eq!(session.token, "token-123");
        assert_eq!(session.user_id, "17");
    }

    #[tokio::test]
    async fn test_missing_field_never_calls_remote() {
        let mut api = MockSignupApi::new();
        api.expect_create_account().never();

        let incomplete = RegistrationForm {
            age: String::new(),
            ..form()
        };
        let err = registrar(api).register(&incomplete).await.unwrap_err();
        assert_eq!(err, RegistrationError::Incomplete);
    }

    #[tokio::test]
    async fn test_bad_username_never_calls_remote() {
        let mut api = MockSignupApi::new();
        api.expect_create_account().never();

        let bad = RegistrationForm {
            username: "grace..h".to_string(),
            ..form()
        };
        let err = registrar(api).register(&bad).await.unwrap_err();
        assert_eq!(
            err,
            RegistrationError::InvalidUsername(UsernameViolation::Consecutive)
        );
    }

    #[tokio::test]
    async fn test_bad_password_never_calls_remote() {
        let mut api = MockSignupApi::new();
        api.expect_create_account().never();

        let bad = RegistrationForm {
            password: "abcdef".to_string(),
            ..form()
        };
        let err = registrar(api).register(&bad).await.unwrap_err();
        assert_eq!(err, RegistrationError::InvalidPassword);
    }

    #[tokio::test]
    async fn test_relays_first_message_of_first_field() {
        let mut api = MockSignupApi::new();
        api.expect_create_account().returning(|_| {
            Ok(SignupReply::Rejected(FieldErrors::new(vec![
                (
                    "username".to_string(),
                    vec![
                        "The username has already been taken.".to_string(),
                        "ignored".to_string(),
                    ],
                ),
                (
                    "email".to_string(),
                    vec!["The email has already been taken.".to_string()],
                ),
            ])))
        });

        let err = registrar(api).register(&form()).await.unwrap_err();
        assert_eq!(
            err,
            RegistrationError::RemoteField("The username has already been taken.".to_string())
        );
        assert_eq!(err.title(), "Sign Up Error");
    }

    #[tokio::test]
    async fn test_transport_failure_is_generic() {
        let mut api = MockSignupApi::new();
        api.expect_create_account()
            .returning(|_| Err(TransportError::Malformed("expected value".to_string())));

        let err = registrar(api).register(&form()).await.unwrap_err();
        assert_eq!(err, RegistrationError::RemoteTransport);
        assert_eq!(
            err.message(),
            "There was an issue signing up. Please try again."
        );
    }

    #[tokio::test]
    async fn test_empty_rejection_is_generic() {
        let mut api = MockSignupApi::new();
        api.expect_create_account()
            .returning(|_| Ok(SignupReply::Rejected(FieldErrors::default())));

        let err = registrar(api).register(&form()).await.unwrap_err();
        assert_eq!(err, RegistrationError::RemoteTransport);
    }
}
