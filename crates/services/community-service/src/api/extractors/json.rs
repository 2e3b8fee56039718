//! JSON extractor with uniform error bodies.

use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;
use tracing::debug;

use common::AppError;

/// JSON extractor that reports malformed bodies as `AppError::BadRequest`.
///
/// The deserializer's own message is logged, not returned.
pub struct AppJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for AppJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| {
                debug!(status = %e.status(), error = %e.body_text(), "Rejected JSON body");
                AppError::bad_request("Request body must be a JSON object")
            })?;

        Ok(AppJson(value))
    }
}
