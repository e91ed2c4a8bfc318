use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ScrapeJobs::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ScrapeJobs::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ScrapeJobs::UserId).uuid().not_null())
                    .col(ColumnDef::new(ScrapeJobs::PostUrl).string().not_null())
                    .col(
                        ColumnDef::new(ScrapeJobs::Status)
                            .string()
                            .not_null()
                            .default("pending"),
                    )
                    .col(ColumnDef::new(ScrapeJobs::ExternalRunId).string())
                    .col(ColumnDef::new(ScrapeJobs::ErrorMessage).text())
                    .col(
                        ColumnDef::new(ScrapeJobs::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(ScrapeJobs::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(ScrapeJobs::CompletedAt).timestamp_with_time_zone())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_scrape_jobs_user_id")
                    .table(ScrapeJobs::Table)
                    .col(ScrapeJobs::UserId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ScrapeJobs::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum ScrapeJobs {
    Table,
    Id,
    UserId,
    PostUrl,
    Status,
    ExternalRunId,
    ErrorMessage,
    CreatedAt,
    UpdatedAt,
    CompletedAt,
}
