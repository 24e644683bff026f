use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(IdeathonRegistrations::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(IdeathonRegistrations::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(IdeathonRegistrations::IdeathonId)
                            .uuid()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(IdeathonRegistrations::OwnerId)
                            .uuid()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(IdeathonRegistrations::TeamName)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(IdeathonRegistrations::ProjectTitle)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(IdeathonRegistrations::ProgressStatus)
                            .string()
                            .not_null()
                            .default("Registered"),
                    )
                    .col(
                        ColumnDef::new(IdeathonRegistrations::CurrentProgress)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(IdeathonRegistrations::FinalSubmission).json_binary())
                    .col(
                        ColumnDef::new(IdeathonRegistrations::SubmittedAt)
                            .timestamp_with_time_zone(),
                    )
                    .col(
                        ColumnDef::new(IdeathonRegistrations::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(IdeathonRegistrations::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_ideathon_registrations_ideathon_id")
                    .table(IdeathonRegistrations::Table)
                    .col(IdeathonRegistrations::IdeathonId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_ideathon_registrations_owner_id")
                    .table(IdeathonRegistrations::Table)
                    .col(IdeathonRegistrations::OwnerId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(IdeathonRegistrations::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum IdeathonRegistrations {
    Table,
    Id,
    IdeathonId,
    OwnerId,
    TeamName,
    ProjectTitle,
    ProgressStatus,
    CurrentProgress,
    FinalSubmission,
    SubmittedAt,
    CreatedAt,
    UpdatedAt,
}
