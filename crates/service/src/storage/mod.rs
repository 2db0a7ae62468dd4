//! Repository wiring.
//!
//! `Repositories::seaorm` backs every service with PostgreSQL;
//! `Repositories::in_memory` shares one `MemoryStore` for tests and demos.

pub mod memory;

use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::auth::repo::seaorm::SeaOrmAuthRepository;
use crate::auth::repository::AuthRepository;
use crate::parcel::repository::{ParcelRepository, SeaOrmParcelRepository};
use crate::toll::repository::{SeaOrmTollRepository, TollRepository};
use crate::truck::repository::{SeaOrmTruckRepository, TruckRepository};
use memory::MemoryStore;

#[derive(Clone)]
pub struct Repositories {
    pub users: Arc<dyn AuthRepository>,
    pub trucks: Arc<dyn TruckRepository>,
    pub parcels: Arc<dyn ParcelRepository>,
    pub tolls: Arc<dyn TollRepository>,
}

impl Repositories {
    pub fn seaorm(db: DatabaseConnection) -> Self {
        Self {
            users: Arc::new(SeaOrmAuthRepository { db: db.clone() }),
            trucks: Arc::new(SeaOrmTruckRepository::new(db.clone())),
            parcels: Arc::new(SeaOrmParcelRepository::new(db.clone())),
            tolls: Arc::new(SeaOrmTollRepository::new(db)),
        }
    }

    pub fn in_memory(store: MemoryStore) -> Self {
        let store = Arc::new(store);
        Self { users: store.clone(), trucks: store.clone(), parcels: store.clone(), tolls: store }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{admin, customer, get_db, parcel_input, toll_input, truck_input};
    use crate::Services;
    use crate::auth::AuthConfig;
    use crate::auth::domain::RegisterInput;
    use models::user::Role;

    #[tokio::test]
    async fn seaorm_round_trip() -> Result<(), anyhow::Error> {
        let Some(db) = get_db().await? else { return Ok(()) };
        let svc = Services::new(Repositories::seaorm(db), AuthConfig::new("test-secret", 1));
        let boss = admin();

        let truck = svc.trucks.create(&boss, truck_input()).await?;
        svc.tolls.create(&boss, toll_input(truck.id, 500.0)).await?;
        svc.tolls.create(&boss, toll_input(truck.id, 250.0)).await?;
        let stored = svc.trucks.get(&boss, &truck.id.to_string()).await?.truck;
        assert_eq!(stored.tolls_paid, 750.0);
        assert_eq!(stored.toll_history.0.len(), 2);
        assert_eq!(svc.tolls.list_by_truck(&boss, &truck.id.to_string()).await?.len(), 2);

        let patch: crate::truck::domain::TruckPatch = serde_json::from_value(serde_json::json!({"location": "Udaipur"}))?;
        let moved = svc.trucks.update(&boss, &truck.id.to_string(), patch).await?;
        assert_eq!((moved.location.as_str(), moved.tolls_paid), ("Udaipur", 750.0));

        // Parcels reference a real user row.
        let email = format!("seaorm_{}@example.com", uuid::Uuid::new_v4());
        let session = svc
            .auth
            .register(RegisterInput { email, password: "password123".into(), role: Some(Role::Customer) })
            .await?;
        let me = session.user.principal();
        let parcel = svc.parcels.create(&me, parcel_input()).await?;
        let rec = svc.parcels.get(&boss, &parcel.id.to_string()).await?;
        assert_eq!(rec.customer.map(|c| c.id), Some(me.id));
        assert!(svc.parcels.list(&me).await?.iter().all(|r| r.parcel.customer_id == me.id));
        assert!(svc.parcels.get(&customer(), &parcel.id.to_string()).await.is_err());

        svc.parcels.delete(&boss, &parcel.id.to_string()).await?;
        svc.trucks.delete(&boss, &truck.id.to_string()).await?;
        Ok(())
    }
}
