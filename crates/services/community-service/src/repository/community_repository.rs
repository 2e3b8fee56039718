//! Community and membership repository.

use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::{
    sea_query::OnConflict, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};
use uuid::Uuid;

use super::entities::community::{self, Entity as CommunityEntity};
use super::entities::community_user::{self, Entity as CommunityUserEntity};
use common::{AppError, AppResult};
use domain::{Community, Membership};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Community repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait CommunityRepository: Send + Sync {
    /// List every community, oldest first
    async fn list(&self) -> AppResult<Vec<Community>>;

    /// Find community by ID
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Community>>;

    /// Check whether a membership row exists for the pair
    async fn membership_exists(&self, user_id: Uuid, community_id: Uuid) -> AppResult<bool>;

    /// Insert a membership, ignoring a conflicting existing row.
    ///
    /// Returns `false` when the row already existed.
    async fn attach(&self, membership: Membership) -> AppResult<bool>;

    /// IDs of all communities the user belongs to
    async fn community_ids_for_user(&self, user_id: Uuid) -> AppResult<Vec<Uuid>>;
}

/// Concrete implementation of CommunityRepository over SeaORM
pub struct CommunityStore {
    db: Arc<DatabaseConnection>,
}

impl CommunityStore {
    /// Create new repository instance
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CommunityRepository for CommunityStore {
    async fn list(&self) -> AppResult<Vec<Community>> {
        let models = CommunityEntity::find()
            .order_by_asc(community::Column::CreatedAt)
            .all(self.db.as_ref())
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(Community::from).collect())
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Community>> {
        let result = CommunityEntity::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Community::from))
    }

    async fn membership_exists(&self, user_id: Uuid, community_id: Uuid) -> AppResult<bool> {
        let result = CommunityUserEntity::find_by_id((user_id, community_id))
            .one(self.db.as_ref())
            .await
            .map_err(AppError::from)?;

        Ok(result.is_some())
    }

    async fn attach(&self, membership: Membership) -> AppResult<bool> {
        let active_model = community_user::ActiveModel {
            user_id: Set(membership.user_id),
            community_id: Set(membership.community_id),
        };

        let rows = CommunityUserEntity::insert(active_model)
            .on_conflict(
                OnConflict::columns([
                    community_user::Column::UserId,
                    community_user::Column::CommunityId,
                ])
                .do_nothing()
                .to_owned(),
            )
            .exec_without_returning(self.db.as_ref())
            .await
            .map_err(AppError::from)?;

        Ok(rows > 0)
    }

    async fn community_ids_for_user(&self, user_id: Uuid) -> AppResult<Vec<Uuid>> {
        let ids = CommunityUserEntity::find()
            .select_only()
            .column(community_user::Column::CommunityId)
            .filter(community_user::Column::UserId.eq(user_id))
            .into_tuple::<Uuid>()
            .all(self.db.as_ref())
            .await
            .map_err(AppError::from)?;

        Ok(ids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    fn community_model(name: &str) -> community::Model {
        community::Model {
            id: Uuid::new_v4(),
            name: name.to_string(),
            description: Some(format!("All about {}", name)),
            created_at: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_list_maps_models() {
        let garden = community_model("Gardening");
        let chess = community_model("Chess");
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![garden.clone(), chess.clone()]])
            .into_connection();

        let store = CommunityStore::new(Arc::new(db));
        let communities = store.list().await.unwrap();

        assert_eq!(communities.len(), 2);
        assert_eq!(communities[0].id, garden.id);
        assert_eq!(communities[1].name, "Chess");
    }

    #[tokio::test]
    async fn test_find_by_id_missing() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<community::Model>::new()])
            .into_connection();

        let store = CommunityStore::new(Arc::new(db));
        assert!(store.find_by_id(Uuid::new_v4()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_membership_exists() {
        let user_id = Uuid::new_v4();
        let community_id = Uuid::new_v4();
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([
                vec![community_user::Model {
                    user_id,
                    community_id,
                }],
                vec![],
            ])
            .into_connection();

        let store = CommunityStore::new(Arc::new(db));
        assert!(store.membership_exists(user_id, community_id).await.unwrap());
        assert!(!store.membership_exists(user_id, community_id).await.unwrap());
    }

    #[tokio::test]
    async fn test_attach_reports_whether_row_was_inserted() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([
                MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                },
                MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 0,
                },
            ])
            .into_connection();

        let store = CommunityStore::new(Arc::new(db));
        let membership = Membership::new(Uuid::new_v4(), Uuid::new_v4());

        assert!(store.attach(membership).await.unwrap());
        assert!(!store.attach(membership).await.unwrap());
    }

    #[tokio::test]
    async fn test_database_error_is_wrapped() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_errors([sea_orm::DbErr::Custom("connection lost".to_string())])
            .into_connection();

        let store = CommunityStore::new(Arc::new(db));
        let err = store.list().await.unwrap_err();
        assert!(matches!(err, AppError::Database(_)));
    }
}
