//! Migration: Create the community_user membership table.
//!
//! The composite primary key is what guarantees a single membership per
//! (user, community) pair under concurrent joins.

use sea_orm_migration::prelude::*;

use super::m20240101_000001_create_communities_table::Communities;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CommunityUser::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(CommunityUser::UserId).uuid().not_null())
                    .col(ColumnDef::new(CommunityUser::CommunityId).uuid().not_null())
                    .primary_key(
                        Index::create()
                            .col(CommunityUser::UserId)
                            .col(CommunityUser::CommunityId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_community_user_community")
                            .from(CommunityUser::Table, CommunityUser::CommunityId)
                            .to(Communities::Table, Communities::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // The primary key already covers lookups by user
        manager
            .create_index(
                Index::create()
                    .name("idx_community_user_community_id")
                    .table(CommunityUser::Table)
                    .col(CommunityUser::CommunityId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CommunityUser::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum CommunityUser {
    Table,
    UserId,
    CommunityId,
}
