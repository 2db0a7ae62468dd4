//! Create `parcels` table with FK to the owning customer in `users`.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Parcels::Table)
                    .if_not_exists()
                    .col(uuid(Parcels::Id).primary_key())
                    .col(uuid(Parcels::CustomerId).not_null())
                    .col(double(Parcels::Weight).not_null())
                    .col(string_len(Parcels::Source, 255).not_null())
                    .col(string_len(Parcels::Destination, 255).not_null())
                    .col(string_len(Parcels::Type, 16).not_null())
                    .col(boolean(Parcels::Insurance).not_null().default(false))
                    .col(boolean(Parcels::Priority).not_null().default(false))
                    .col(text_null(Parcels::Description))
                    .col(string_len(Parcels::Status, 16).not_null())
                    .col(string_len(Parcels::Location, 255).not_null())
                    .col(timestamp_with_time_zone_null(Parcels::Eta))
                    .col(json_binary(Parcels::Updates).not_null())
                    .col(timestamp_with_time_zone(Parcels::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Parcels::UpdatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_parcels_customer")
                            .from(Parcels::Table, Parcels::CustomerId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Parcels::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Parcels {
    Table,
    Id,
    CustomerId,
    Weight,
    Source,
    Destination,
    Type,
    Insurance,
    Priority,
    Description,
    Status,
    Location,
    Eta,
    Updates,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Users { Table, Id }
