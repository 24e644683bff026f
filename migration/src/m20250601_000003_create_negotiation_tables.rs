use sea_orm_migration::prelude::*;

use crate::m20250601_000002_create_funding_requests_table::FundingRequests;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(NegotiationEntries::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(NegotiationEntries::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(NegotiationEntries::RequestId)
                            .uuid()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(NegotiationEntries::AuthorId)
                            .uuid()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(NegotiationEntries::AuthorRole)
                            .string_len(16)
                            .not_null(),
                    )
                    .col(ColumnDef::new(NegotiationEntries::Message).text())
                    .col(ColumnDef::new(NegotiationEntries::ProposedAmount).double())
                    .col(ColumnDef::new(NegotiationEntries::ProposedEquity).double())
                    .col(
                        ColumnDef::new(NegotiationEntries::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_negotiation_entries_request_id")
                            .from(NegotiationEntries::Table, NegotiationEntries::RequestId)
                            .to(FundingRequests::Table, FundingRequests::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_negotiation_entries_request_id")
                    .table(NegotiationEntries::Table)
                    .col(NegotiationEntries::RequestId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(RequestViews::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(RequestViews::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(RequestViews::RequestId).uuid().not_null())
                    .col(ColumnDef::new(RequestViews::InvestorId).uuid().not_null())
                    .col(
                        ColumnDef::new(RequestViews::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_request_views_request_id")
                            .from(RequestViews::Table, RequestViews::RequestId)
                            .to(FundingRequests::Table, FundingRequests::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // One view row per investor per request; inserts use ON CONFLICT DO NOTHING
        manager
            .create_index(
                Index::create()
                    .name("uq_request_views_request_investor")
                    .table(RequestViews::Table)
                    .col(RequestViews::RequestId)
                    .col(RequestViews::InvestorId)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(RequestViews::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(NegotiationEntries::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum NegotiationEntries {
    Table,
    Id,
    RequestId,
    AuthorId,
    AuthorRole,
    Message,
    ProposedAmount,
    ProposedEquity,
    CreatedAt,
}

#[derive(DeriveIden)]
enum RequestViews {
    Table,
    Id,
    RequestId,
    InvestorId,
    CreatedAt,
}
