//! HTTP client for the remote account-creation endpoint.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::debug;

use common::HttpClientConfig;
use domain::{RegistrationRequest, SignupSession};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Failure to get a usable answer from the account service.
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unrecognized response: {0}")]
    Malformed(String),
}

/// Field-level errors reported by the account service, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(Vec<(String, Vec<String>)>);

impl FieldErrors {
    pub fn new(errors: Vec<(String, Vec<String>)>) -> Self {
        Self(errors)
    }

    /// First message of the first field.
    pub fn first_message(&self) -> Option<&str> {
        self.0
            .first()
            .and_then(|(_, messages)| messages.first())
            .map(String::as_str)
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(field, _)| field.as_str())
    }
}

impl From<Map<String, Value>> for FieldErrors {
    fn from(map: Map<String, Value>) -> Self {
        let errors = map
            .into_iter()
            .map(|(field, value)| {
                // A non-string entry ends the list so the first message is never skipped
                let messages = match value {
                    Value::Array(items) => items
                        .into_iter()
                        .map_while(|item| match item {
                            Value::String(s) => Some(s),
                            _ => None,
                        })
                        .collect(),
                    Value::String(s) => vec![s],
                    _ => Vec::new(),
                };
                (field, messages)
            })
            .collect();
        Self(errors)
    }
}

/// What the account service answered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignupReply {
    Created(SignupSession),
    Rejected(FieldErrors),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawReply {
    Rejected { errors: Map<String, Value> },
    Created { token: String, user: RawUser },
}

#[derive(Deserialize)]
struct RawUser {
    id: OpaqueId,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OpaqueId {
    Number(serde_json::Number),
    Text(String),
}

impl OpaqueId {
    fn into_string(self) -> String {
        match self {
            OpaqueId::Number(n) => n.to_string(),
            OpaqueId::Text(s) => s,
        }
    }
}

impl SignupReply {
    /// Interpret a response body. The HTTP status is not consulted; the body
    /// shape alone decides the outcome.
    pub fn from_body(body: &[u8]) -> Result<Self, TransportError> {
        let raw: RawReply = serde_json::from_slice(body)
            .map_err(|e| TransportError::Malformed(e.to_string()))?;

        Ok(match raw {
            RawReply::Rejected { errors } => SignupReply::Rejected(FieldErrors::from(errors)),
            RawReply::Created { token, user } => SignupReply::Created(SignupSession {
                token,
                user_id: user.id.into_string(),
            }),
        })
    }
}

/// Remote account creation.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait SignupApi: Send + Sync {
    async fn create_account(
        &self,
        request: &RegistrationRequest,
    ) -> Result<SignupReply, TransportError>;
}

/// reqwest-backed SignupApi.
pub struct HttpSignupClient {
    client: Client,
    endpoint: String,
}

impl HttpSignupClient {
    /// Build a client with the configured connect and request timeouts.
    pub fn new(config: &HttpClientConfig) -> Result<Self, TransportError> {
        let client = Client::builder()
            .connect_timeout(config.connect_timeout())
            .timeout(config.request_timeout())
            .build()?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
        })
    }
}

#[async_trait]
impl SignupApi for HttpSignupClient {
    async fn create_account(
        &self,
        request: &RegistrationRequest,
    ) -> Result<SignupReply, TransportError> {
        debug!(endpoint = %self.endpoint, username = %request.username, "Submitting signup");

        let response = self
            .client
            .post(&self.endpoint)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        let body = response.bytes().await?;
        debug!(%status, bytes = body.len(), "Signup response received");

        SignupReply::from_body(&body)
    }
}
