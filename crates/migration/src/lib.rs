//! Migrator registering the LogiTrack collections in dependency order.
//! Indexes are applied last.
pub use sea_orm_migration::prelude::*;

mod m20241001_000001_create_users;
mod m20241001_000002_create_trucks;
mod m20241001_000003_create_parcels;
mod m20241001_000004_create_tolls;
mod m20241001_000005_add_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20241001_000001_create_users::Migration),
            Box::new(m20241001_000002_create_trucks::Migration),
            Box::new(m20241001_000003_create_parcels::Migration),
            Box::new(m20241001_000004_create_tolls::Migration),
            // Indexes should always be applied last
            Box::new(m20241001_000005_add_indexes::Migration),
        ]
    }
}
