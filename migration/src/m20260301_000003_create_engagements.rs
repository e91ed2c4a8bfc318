use sea_orm_migration::prelude::*;

use super::m20260301_000001_create_scrape_jobs::ScrapeJobs;
use super::m20260301_000002_create_posts::Posts;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Engagements::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Engagements::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Engagements::PostId).uuid().not_null())
                    .col(ColumnDef::new(Engagements::JobId).uuid().not_null())
                    .col(ColumnDef::new(Engagements::UserId).uuid().not_null())
                    .col(ColumnDef::new(Engagements::Name).string().not_null())
                    .col(
                        ColumnDef::new(Engagements::ProfileUrl)
                            .string()
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(Engagements::Headline)
                            .string()
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(Engagements::ProfileImageUrl)
                            .string()
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(Engagements::ReactionType)
                            .string()
                            .not_null()
                            .default("like"),
                    )
                    .col(ColumnDef::new(Engagements::IcpScore).integer())
                    .col(ColumnDef::new(Engagements::IcpFit).string())
                    .col(
                        ColumnDef::new(Engagements::Contacted)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Engagements::Hidden)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Engagements::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Engagements::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_engagements_post_id")
                            .from(Engagements::Table, Engagements::PostId)
                            .to(Posts::Table, Posts::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_engagements_job_id")
                            .from(Engagements::Table, Engagements::JobId)
                            .to(ScrapeJobs::Table, ScrapeJobs::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_engagements_post_id")
                    .table(Engagements::Table)
                    .col(Engagements::PostId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_engagements_job_id")
                    .table(Engagements::Table)
                    .col(Engagements::JobId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_engagements_user_id")
                    .table(Engagements::Table)
                    .col(Engagements::UserId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Engagements::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Engagements {
    Table,
    Id,
    PostId,
    JobId,
    UserId,
    Name,
    ProfileUrl,
    Headline,
    ProfileImageUrl,
    ReactionType,
    IcpScore,
    IcpFit,
    Contacted,
    Hidden,
    CreatedAt,
    UpdatedAt,
}
