#![cfg(test)]
use chrono::Utc;
use migration::MigratorTrait;
use models::{parcel, truck, user};
use models::user::Role;
use sea_orm::DatabaseConnection;
use tokio::sync::OnceCell;
use uuid::Uuid;

use crate::auth::repository::AuthRepository;
use crate::parcel::domain::ParcelInput;
use crate::parcel::repository::ParcelRepository;
use crate::policy::Principal;
use crate::storage::memory::MemoryStore;
use crate::toll::domain::TollInput;
use crate::truck::domain::TruckInput;
use crate::truck::repository::TruckRepository;

// Ensure migrations run only once across the entire test process
static MIGRATED: OnceCell<()> = OnceCell::const_new();

/// `None` when database tests are disabled or no database is configured.
pub async fn get_db() -> Result<Option<DatabaseConnection>, anyhow::Error> {
    if std::env::var("SKIP_DB_TESTS").is_ok() {
        return Ok(None);
    }
    let _ = dotenvy::dotenv();
    let Ok(url) = std::env::var("DATABASE_URL") else { return Ok(None) };
    let cfg = configs::DatabaseConfig { url, max_connections: 20, acquire_timeout_secs: 10, ..Default::default() };

    MIGRATED
        .get_or_init(|| async {
            let db = models::db::connect_with_config(&cfg).await.expect("connect db for migration");
            migration::Migrator::up(&db, None).await.expect("migrate up");
        })
        .await;

    Ok(Some(models::db::connect_with_config(&cfg).await?))
}

pub fn admin() -> Principal { Principal::new(Uuid::new_v4(), Role::Admin) }
pub fn driver() -> Principal { Principal::new(Uuid::new_v4(), Role::Driver) }
pub fn customer() -> Principal { Principal::new(Uuid::new_v4(), Role::Customer) }

pub fn truck_input() -> TruckInput {
    TruckInput {
        driver: Some("Ravi".into()),
        route: Some("Mumbai-Delhi".into()),
        fuel_level: Some(75.0),
        location: Some("Ahmedabad".into()),
        next_stop: Some("Jaipur".into()),
        status: None,
    }
}

pub fn parcel_input() -> ParcelInput {
    ParcelInput {
        weight: Some(5.0),
        source: Some("Mumbai".into()),
        destination: Some("Delhi".into()),
        ..Default::default()
    }
}

pub fn toll_input(truck_id: Uuid, amount: f64) -> TollInput {
    TollInput {
        truck_id: Some(truck_id.to_string()),
        date: Some(Utc::now()),
        location: Some("Vadodara".into()),
        amount: Some(amount),
    }
}

pub async fn sample_truck(store: &MemoryStore) -> truck::Model {
    let model = truck::new_model(truck_input().into_new_truck().unwrap()).unwrap();
    TruckRepository::insert(store, model).await.unwrap()
}

pub async fn sample_parcel(store: &MemoryStore, customer_id: Uuid) -> parcel::Model {
    let model = parcel::new_model(parcel_input().into_new_parcel(customer_id).unwrap()).unwrap();
    ParcelRepository::insert(store, model).await.unwrap()
}

/// Store a user directly (no password hashing) and return its principal.
pub async fn register(store: &MemoryStore, email: &str, role: Role) -> Principal {
    let u = user::new_model(email, String::new(), role).unwrap();
    let created = store.create_user(u).await.unwrap();
    Principal::new(created.id, created.role)
}
