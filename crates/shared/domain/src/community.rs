//! Community and membership domain types.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::{MSG_ALREADY_JOINED, MSG_JOINED};

/// Community domain entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Community {
    /// Unique community identifier
    pub id: Uuid,
    /// Display name
    pub name: String,
    /// Optional description shown on the community card
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl Community {
    /// Create a new community
    pub fn new(id: Uuid, name: String, description: Option<String>) -> Self {
        Self {
            id,
            name,
            description,
            created_at: Utc::now(),
        }
    }
}

/// A user's membership in a community. Existence is the whole fact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Membership {
    pub user_id: Uuid,
    pub community_id: Uuid,
}

impl Membership {
    pub fn new(user_id: Uuid, community_id: Uuid) -> Self {
        Self {
            user_id,
            community_id,
        }
    }
}

/// Result of a join request.
///
/// Joining a community the user already belongs to is a successful no-op,
/// reported as `AlreadyJoined` rather than an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum JoinOutcome {
    Joined,
    AlreadyJoined,
}

impl JoinOutcome {
    /// User-facing message for this outcome
    pub fn message(&self) -> &'static str {
        match self {
            JoinOutcome::Joined => MSG_JOINED,
            JoinOutcome::AlreadyJoined => MSG_ALREADY_JOINED,
        }
    }
}

/// Membership flag for every known community, keyed by community id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MembershipStatus(BTreeMap<Uuid, bool>);

impl MembershipStatus {
    /// Build the status map from all communities and the ids the user belongs to.
    ///
    /// Every community gets an entry; member ids that do not match a known
    /// community are ignored.
    pub fn from_memberships<'a>(
        communities: impl IntoIterator<Item = &'a Community>,
        member_of: &[Uuid],
    ) -> Self {
        Self(
            communities
                .into_iter()
                .map(|c| (c.id, member_of.contains(&c.id)))
                .collect(),
        )
    }

    /// Check whether the user is a member of the given community.
    ///
    /// Returns `None` for unknown communities.
    pub fn is_member(&self, community_id: &Uuid) -> Option<bool> {
        self.0.get(community_id).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
