use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Parcels: customer-scoped listing
        manager
            .create_index(
                Index::create()
                    .name("idx_parcels_customer")
                    .table(Parcels::Table)
                    .col(Parcels::CustomerId)
                    .to_owned(),
            )
            .await?;

        // Tolls: per-truck ledger
        manager
            .create_index(
                Index::create()
                    .name("idx_tolls_truck")
                    .table(Tolls::Table)
                    .col(Tolls::TruckId)
                    .col(Tolls::Date)
                    .to_owned(),
            )
            .await?;

        // Trucks: dashboard filters by status
        manager
            .create_index(
                Index::create()
                    .name("idx_trucks_status")
                    .table(Trucks::Table)
                    .col(Trucks::Status)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_index(Index::drop().name("idx_trucks_status").table(Trucks::Table).to_owned()).await?;
        manager.drop_index(Index::drop().name("idx_tolls_truck").table(Tolls::Table).to_owned()).await?;
        manager.drop_index(Index::drop().name("idx_parcels_customer").table(Parcels::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Parcels { Table, CustomerId }

#[derive(DeriveIden)]
enum Tolls { Table, TruckId, Date }

#[derive(DeriveIden)]
enum Trucks { Table, Status }
