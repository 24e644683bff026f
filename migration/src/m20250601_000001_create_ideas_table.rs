use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Ideas::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Ideas::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Ideas::OwnerId).uuid().not_null())
                    .col(ColumnDef::new(Ideas::Title).string().not_null())
                    .col(ColumnDef::new(Ideas::Description).text().not_null())
                    .col(ColumnDef::new(Ideas::Category).string())
                    .col(
                        ColumnDef::new(Ideas::CreatedAt)
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
                    .name("idx_ideas_owner_id")
                    .table(Ideas::Table)
                    .col(Ideas::OwnerId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Ideas::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Ideas {
    Table,
    Id,
    OwnerId,
    Title,
    Description,
    Category,
    CreatedAt,
}
