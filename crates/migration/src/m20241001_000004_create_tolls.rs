//! Create `tolls` table.
//!
//! `truck_id` is a plain reference without a foreign key: removing a truck
//! keeps its toll ledger, and reads show the truck as missing.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Tolls::Table)
                    .if_not_exists()
                    .col(uuid(Tolls::Id).primary_key())
                    .col(uuid(Tolls::TruckId).not_null())
                    .col(timestamp_with_time_zone(Tolls::Date).not_null())
                    .col(string_len(Tolls::Location, 255).not_null())
                    .col(double(Tolls::Amount).not_null())
                    .col(timestamp_with_time_zone(Tolls::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Tolls::UpdatedAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Tolls::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Tolls { Table, Id, TruckId, Date, Location, Amount, CreatedAt, UpdatedAt }
