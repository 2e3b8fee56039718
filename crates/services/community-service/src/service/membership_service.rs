//! Membership service - community listing, joining and membership lookups.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

use common::{AppResult, OptionExt};
use domain::{Community, JoinOutcome, Membership, MembershipStatus};

use crate::repository::CommunityRepository;

/// Membership service trait for dependency injection.
#[async_trait]
pub trait MembershipService: Send + Sync {
    /// List all communities
    async fn list_communities(&self) -> AppResult<Vec<Community>>;

    /// Add the user to a community. Joining twice is a no-op.
    async fn join(&self, user_id: Uuid, community_id: Uuid) -> AppResult<JoinOutcome>;

    /// Membership flag for every community
    async fn membership_status(&self, user_id: Uuid) -> AppResult<MembershipStatus>;
}

/// Concrete implementation of MembershipService using repository.
pub struct MembershipManager {
    repo: Arc<dyn CommunityRepository>,
}

impl MembershipManager {
    /// Create new membership service instance with repository
    pub fn new(repo: Arc<dyn CommunityRepository>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl MembershipService for MembershipManager {
    async fn list_communities(&self) -> AppResult<Vec<Community>> {
        self.repo.list().await
    }

    async fn join(&self, user_id: Uuid, community_id: Uuid) -> AppResult<JoinOutcome> {
        let community = self
            .repo
            .find_by_id(community_id)
            .await?
            .ok_or_not_found("Community")?;

        if self.repo.membership_exists(user_id, community.id).await? {
            return Ok(JoinOutcome::AlreadyJoined);
        }

        // A concurrent join may still win between the check and the insert;
        // the conflict-ignoring insert reports that as zero rows.
        let inserted = self
            .repo
            .attach(Membership::new(user_id, community.id))
            .await?;

        if inserted {
            info!(%user_id, community_id = %community.id, "User joined community");
            Ok(JoinOutcome::Joined)
        } else {
            debug!(%user_id, community_id = %community.id, "Lost join race, membership exists");
            Ok(JoinOutcome::AlreadyJoined)
        }
    }

    async fn membership_status(&self, user_id: Uuid) -> AppResult<MembershipStatus> {
        let communities = self.repo.list().await?;
        let member_of = self.repo.community_ids_for_user(user_id).await?;

        Ok(MembershipStatus::from_memberships(&communities, &member_of))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockCommunityRepository;
    use common::AppError;
    use mockall::predicate::eq;
    use tokio_test::{assert_err, assert_ok};

    fn test_community(id: Uuid) -> Community {
        Community::new(id, "Gardening".to_string(), None)
    }

    #[tokio::test]
    async fn test_join_creates_membership() {
        let user_id = Uuid::new_v4();
        let community_id = Uuid::new_v4();

        let mut repo = MockCommunityRepository::new();
        repo.expect_find_by_id()
            .with(eq(community_id))
            .returning(|id| Ok(Some(test_community(id))));
        repo.expect_membership_exists()
            .with(eq(user_id), eq(community_id))
            .returning(|_, _| Ok(false));
        repo.expect_attach()
            .with(eq(Membership::new(user_id, community_id)))
            .times(1)
            .returning(|_| Ok(true));

        let service = MembershipManager::new(Arc::new(repo));
        let outcome = assert_ok!(service.join(user_id, community_id).await);

        assert_eq!(outcome, JoinOutcome::Joined);
    }

    #[tokio::test]
    async fn test_join_existing_member_is_noop() {
        let mut repo = MockCommunityRepository::new();
        repo.expect_find_by_id()
            .returning(|id| Ok(Some(test_community(id))));
        repo.expect_membership_exists().returning(|_, _| Ok(true));
        repo.expect_attach().never();

        let service = MembershipManager::new(Arc::new(repo));
        let outcome = assert_ok!(service.join(Uuid::new_v4(), Uuid::new_v4()).await);

        assert_eq!(outcome, JoinOutcome::AlreadyJoined);
    }

    #[tokio::test]
    async fn test_join_twice_yields_joined_then_already_joined() {
        use std::sync::Mutex;

        let members: Arc<Mutex<Vec<Membership>>> = Arc::default();

        let mut repo = MockCommunityRepository::new();
        repo.expect_find_by_id()
            .returning(|id| Ok(Some(test_community(id))));
        let seen = members.clone();
        repo.expect_membership_exists().returning(move |u, c| {
            Ok(seen.lock().unwrap().contains(&Membership::new(u, c)))
        });
        let store = members.clone();
        repo.expect_attach().returning(move |m| {
            let mut rows = store.lock().unwrap();
            if rows.contains(&m) {
                return Ok(false);
            }
            rows.push(m);
            Ok(true)
        });

        let service = MembershipManager::new(Arc::new(repo));
        let user_id = Uuid::new_v4();
        let community_id = Uuid::new_v4();

        assert_eq!(
            service.join(user_id, community_id).await.unwrap(),
            JoinOutcome::Joined
        );
        assert_eq!(
            service.join(user_id, community_id).await.unwrap(),
            JoinOutcome::AlreadyJoined
        );
        assert_eq!(members.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_join_lost_race_reports_already_joined() {
        let mut repo = MockCommunityRepository::new();
        repo.expect_find_by_id()
            .returning(|id| Ok(Some(test_community(id))));
        repo.expect_membership_exists().returning(|_, _| Ok(false));
        repo.expect_attach().returning(|_| Ok(false));

        let service = MembershipManager::new(Arc::new(repo));
        let outcome = assert_ok!(service.join(Uuid::new_v4(), Uuid::new_v4()).await);

        assert_eq!(outcome, JoinOutcome::AlreadyJoined);
    }

    #[tokio::test]
    async fn test_join_unknown_community() {
        let mut repo = MockCommunityRepository::new();
        repo.expect_find_by_id().returning(|_| Ok(None));
        repo.expect_membership_exists().never();
        repo.expect_attach().never();

        let service = MembershipManager::new(Arc::new(repo));
        let err = assert_err!(service.join(Uuid::new_v4(), Uuid::new_v4()).await);

        assert!(matches!(err, AppError::NotFound(ref entity) if entity == "Community"));
    }

    #[tokio::test]
    async fn test_join_persistence_failure_is_internal() {
        let mut repo = MockCommunityRepository::new();
        repo.expect_find_by_id()
            .returning(|id| Ok(Some(test_community(id))));
        repo.expect_membership_exists().returning(|_, _| Ok(false));
        repo.expect_attach()
            .returning(|_| Err(AppError::internal("insert failed")));

        let service = MembershipManager::new(Arc::new(repo));
        let err = assert_err!(service.join(Uuid::new_v4(), Uuid::new_v4()).await);

        assert!(err.status().is_server_error());
        assert_eq!(err.user_message(), "An internal error occurred");
    }

    #[tokio::test]
    async fn test_list_communities_passes_through() {
        let mut repo = MockCommunityRepository::new();
        repo.expect_list().returning(|| {
            Ok(vec![
                test_community(Uuid::new_v4()),
                test_community(Uuid::new_v4()),
            ])
        });

        let service = MembershipManager::new(Arc::new(repo));
        let communities = assert_ok!(service.list_communities().await);

        assert_eq!(communities.len(), 2);
    }

    #[tokio::test]
    async fn test_membership_status_flags_every_community() {
        let user_id = Uuid::new_v4();
        let joined = Uuid::new_v4();
        let other = Uuid::new_v4();

        let mut repo = MockCommunityRepository::new();
        repo.expect_list()
            .returning(move || Ok(vec![test_community(joined), test_community(other)]));
        repo.expect_community_ids_for_user()
            .with(eq(user_id))
            .returning(move |_| Ok(vec![joined]));

        let service = MembershipManager::new(Arc::new(repo));
        let status = assert_ok!(service.membership_status(user_id).await);

        assert_eq!(status.len(), 2);
        assert_eq!(status.is_member(&joined), Some(true));
        assert_eq!(status.is_member(&other), Some(false));
    }

    #[tokio::test]
    async fn test_membership_status_without_communities() {
        let mut repo = MockCommunityRepository::new();
        repo.expect_list().returning(|| Ok(vec![]));
        repo.expect_community_ids_for_user().returning(|_| Ok(vec![]));

        let service = MembershipManager::new(Arc::new(repo));
        let status = assert_ok!(service.membership_status(Uuid::new_v4()).await);

        assert!(status.is_empty());
    }
}
