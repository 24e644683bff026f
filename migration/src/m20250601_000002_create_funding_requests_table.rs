use sea_orm_migration::prelude::*;

use crate::m20250601_000001_create_ideas_table::Ideas;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(FundingRequests::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(FundingRequests::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(FundingRequests::IdeaId).uuid().not_null())
                    .col(ColumnDef::new(FundingRequests::OwnerId).uuid().not_null())
                    .col(ColumnDef::new(FundingRequests::Amount).double().not_null())
                    .col(ColumnDef::new(FundingRequests::Equity).double().not_null())
                    .col(
                        ColumnDef::new(FundingRequests::FundingStage)
                            .string_len(16)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(FundingRequests::InvestmentType)
                            .string_len(24)
                            .not_null(),
                    )
                    .col(ColumnDef::new(FundingRequests::BusinessPlan).text())
                    .col(ColumnDef::new(FundingRequests::TargetMarket).text())
                    .col(ColumnDef::new(FundingRequests::UseOfFunds).text())
                    .col(ColumnDef::new(FundingRequests::ContactEmail).string())
                    .col(
                        ColumnDef::new(FundingRequests::Status)
                            .string_len(16)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(FundingRequests::Version)
                            .integer()
                            .not_null()
                            .default(1),
                    )
                    .col(
                        ColumnDef::new(FundingRequests::ResponseDeadline)
                            .timestamp_with_time_zone(),
                    )
                    .col(
                        ColumnDef::new(FundingRequests::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(FundingRequests::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_funding_requests_idea_id")
                            .from(FundingRequests::Table, FundingRequests::IdeaId)
                            .to(Ideas::Table, Ideas::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_funding_requests_idea_id")
                    .table(FundingRequests::Table)
                    .col(FundingRequests::IdeaId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_funding_requests_owner_id")
                    .table(FundingRequests::Table)
                    .col(FundingRequests::OwnerId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(FundingRequests::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum FundingRequests {
    Table,
    Id,
    IdeaId,
    OwnerId,
    Amount,
    Equity,
    FundingStage,
    InvestmentType,
    BusinessPlan,
    TargetMarket,
    UseOfFunds,
    ContactEmail,
    Status,
    Version,
    ResponseDeadline,
    CreatedAt,
    UpdatedAt,
}
