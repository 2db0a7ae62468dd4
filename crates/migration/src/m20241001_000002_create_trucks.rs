//! Create `trucks` table.
//! `parcel_ids` and `toll_history` are embedded JSONB arrays.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Trucks::Table)
                    .if_not_exists()
                    .col(uuid(Trucks::Id).primary_key())
                    .col(string_len(Trucks::Driver, 128).not_null())
                    .col(string_len(Trucks::Route, 255).not_null())
                    .col(string_len(Trucks::Status, 16).not_null())
                    .col(json_binary(Trucks::ParcelIds).not_null())
                    .col(string_len(Trucks::Location, 255).not_null())
                    .col(double(Trucks::FuelLevel).not_null())
                    .col(string_len(Trucks::NextStop, 255).not_null())
                    .col(timestamp_with_time_zone_null(Trucks::EstimatedArrival))
                    .col(double_null(Trucks::Temperature))
                    .col(double_null(Trucks::Humidity))
                    .col(double(Trucks::TollsPaid).not_null().default(0.0))
                    .col(double_null(Trucks::FuelEfficiency))
                    .col(double_null(Trucks::TotalDistance))
                    .col(double_null(Trucks::FuelConsumed))
                    .col(json_binary(Trucks::TollHistory).not_null())
                    .col(timestamp_with_time_zone(Trucks::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Trucks::UpdatedAt).not_null())
                    .check(Expr::col(Trucks::FuelLevel).between(0.0, 100.0))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Trucks::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Trucks {
    Table,
    Id,
    Driver,
    Route,
    Status,
    ParcelIds,
    Location,
    FuelLevel,
    NextStop,
    EstimatedArrival,
    Temperature,
    Humidity,
    TollsPaid,
    FuelEfficiency,
    TotalDistance,
    FuelConsumed,
    TollHistory,
    CreatedAt,
    UpdatedAt,
}
