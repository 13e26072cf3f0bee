use sea_orm_migration::prelude::*;

use super::m20250101_000001_create_users_table::Users;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Listings::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Listings::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Listings::Title).string_len(100).not_null())
                    .col(ColumnDef::new(Listings::Description).string_len(500).not_null())
                    .col(ColumnDef::new(Listings::Price).double().not_null())
                    .col(ColumnDef::new(Listings::Condition).string_len(16).not_null())
                    .col(ColumnDef::new(Listings::Category).string_len(32).not_null())
                    .col(
                        ColumnDef::new(Listings::Status)
                            .string_len(16)
                            .not_null()
                            .default("available"),
                    )
                    .col(ColumnDef::new(Listings::Pictures).json().not_null())
                    .col(ColumnDef::new(Listings::OwnerId).uuid().not_null())
                    .col(
                        ColumnDef::new(Listings::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Listings::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_listings_owner")
                            .from(Listings::Table, Listings::OwnerId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_listings_owner_id")
                    .table(Listings::Table)
                    .col(Listings::OwnerId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_listings_created_at")
                    .table(Listings::Table)
                    .col(Listings::CreatedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Listings::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Listings {
    Table,
    Id,
    Title,
    Description,
    Price,
    Condition,
    Category,
    Status,
    Pictures,
    OwnerId,
    CreatedAt,
    UpdatedAt,
}
