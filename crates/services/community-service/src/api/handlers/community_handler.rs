//! Community handlers.

use axum::{
    extract::{Extension, State},
    response::Json,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;
use utoipa::ToSchema;
use uuid::Uuid;

use common::{AppError, AppResult};
use domain::{Community, JoinOutcome, MembershipStatus};

use crate::api::extractors::AppJson;
use crate::api::middleware::CurrentUser;
use crate::api::state::AppState;

/// Join request
///
/// The id is accepted as any JSON value; anything that is not a UUID string
/// cannot name a community and is answered with 404.
#[derive(Debug, Deserialize, ToSchema)]
pub struct JoinRequest {
    /// Community to join
    #[serde(default)]
    #[schema(value_type = String, format = Uuid)]
    pub community_id: Option<Value>,
}

impl JoinRequest {
    /// The requested community, if the id is a well-formed UUID.
    pub fn target(&self) -> Option<Uuid> {
        match self.community_id.as_ref()? {
            Value::String(raw) => Uuid::parse_str(raw).ok(),
            _ => None,
        }
    }
}

/// Join response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct JoinResponse {
    /// Whether a membership was created or already existed
    pub status: JoinOutcome,
    /// Human readable outcome
    pub message: String,
}

impl From<JoinOutcome> for JoinResponse {
    fn from(outcome: JoinOutcome) -> Self {
        Self {
            status: outcome,
            message: outcome.message().to_string(),
        }
    }
}

/// Public community routes
pub fn community_routes() -> Router<AppState> {
    Router::new().route("/", get(list_communities))
}

/// Routes acting on the current user's memberships (auth required)
pub fn membership_routes() -> Router<AppState> {
    Router::new()
        .route("/join", post(join_community))
        .route("/membership", get(membership_status))
}

/// List all communities
#[utoipa::path(
    get,
    path = "/communities",
    tag = "Communities",
    responses(
        (status = 200, description = "All communities", body = Vec<Community>)
    )
)]
pub async fn list_communities(State(state): State<AppState>) -> AppResult<Json<Vec<Community>>> {
    let communities = state.membership_service.list_communities().await?;
    Ok(Json(communities))
}

/// Join a community
#[utoipa::path(
    post,
    path = "/communities/join",
    tag = "Communities",
    security(("bearer_auth" = [])),
    request_body = JoinRequest,
    responses(
        (status = 200, description = "Joined, or already a member", body = JoinResponse),
        (status = 400, description = "Malformed request body"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Community not found or id malformed"),
        (status = 500, description = "Unexpected service error")
    )
)]
pub async fn join_community(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    AppJson(payload): AppJson<JoinRequest>,
) -> AppResult<Json<JoinResponse>> {
    let community_id = payload.target().ok_or_else(|| {
        debug!(raw = ?payload.community_id, "Join request without a usable community id");
        AppError::not_found("Community")
    })?;

    let outcome = state
        .membership_service
        .join(current_user.id, community_id)
        .await?;

    Ok(Json(JoinResponse::from(outcome)))
}

/// Membership flag for every community
#[utoipa::path(
    get,
    path = "/communities/membership",
    tag = "Communities",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Community id to membership flag", body = std::collections::HashMap<String, bool>),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn membership_status(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
) -> AppResult<Json<MembershipStatus>> {
    let status = state
        .membership_service
        .membership_status(current_user.id)
        .await?;

    Ok(Json(status))
}
