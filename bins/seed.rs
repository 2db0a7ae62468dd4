//! Demo data loader.
//!
//! `seed` wipes the tables and loads a small fleet: one account per role
//! (password `password123`), two trucks with toll receipts and two parcels
//! owned by the customer, each assigned to a truck. `seed --destroy` only
//! wipes.

use std::process::ExitCode;

use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, TimeZone, Utc};
use clap::Parser;
use dotenvy::dotenv;
use migration::MigratorTrait;
use models::parcel::{self, NewParcel, ParcelKind, ParcelStatus, TrackingUpdate, TrackingUpdates};
use models::truck::{self, NewTruck, ParcelIds, TruckStatus};
use models::{toll, user::Role};
use sea_orm::{DatabaseConnection, EntityTrait, TransactionTrait};
use service::auth::domain::RegisterInput;
use service::auth::AuthConfig;
use service::storage::Repositories;
use service::Services;
use tracing::{error, info};

const DEMO_PASSWORD: &str = "password123";

#[derive(Parser, Debug)]
#[command(name = "seed", about = "Load or remove LogiTrack demo data")]
struct Cli {
    /// Remove all users, trucks, parcels and tolls instead of importing.
    #[arg(short = 'd', long = "destroy")]
    destroy: bool,
}

fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> Result<DateTime<Utc>> {
    Utc.with_ymd_and_hms(y, mo, d, h, mi, 0)
        .single()
        .ok_or_else(|| anyhow!("invalid fixture date {y}-{mo}-{d}"))
}

async fn clear(db: &DatabaseConnection) -> Result<()> {
    let txn = db.begin().await?;
    let tolls = toll::Entity::delete_many().exec(&txn).await?.rows_affected;
    let trucks = truck::Entity::delete_many().exec(&txn).await?.rows_affected;
    let parcels = parcel::Entity::delete_many().exec(&txn).await?.rows_affected;
    let users = models::user::Entity::delete_many().exec(&txn).await?.rows_affected;
    txn.commit().await?;
    info!(tolls, trucks, parcels, users, "tables_cleared");
    Ok(())
}

struct DemoTruck {
    truck: NewTruck,
    eta: DateTime<Utc>,
    temperature: f64,
    humidity: f64,
    fuel_efficiency: f64,
    total_distance: f64,
    fuel_consumed: f64,
    tolls: Vec<(DateTime<Utc>, &'static str, f64)>,
}

struct DemoParcel {
    weight: f64,
    kind: ParcelKind,
    insurance: bool,
    priority: bool,
    description: &'static str,
    status: ParcelStatus,
    location: &'static str,
    eta: DateTime<Utc>,
    updates: Vec<(DateTime<Utc>, &'static str)>,
}

fn demo_trucks() -> Result<Vec<DemoTruck>> {
    Ok(vec![
        DemoTruck {
            truck: NewTruck {
                driver: "Ravi Kumar".into(),
                route: "Mumbai to Delhi".into(),
                fuel_level: 75.0,
                location: "Ahmedabad, Gujarat".into(),
                next_stop: "Jaipur, Rajasthan".into(),
                status: Some(TruckStatus::InTransit),
            },
            eta: at(2024, 10, 8, 14, 30)?,
            temperature: 23.0,
            humidity: 45.0,
            fuel_efficiency: 8.5,
            total_distance: 1200.0,
            fuel_consumed: 141.0,
            tolls: vec![(at(2024, 10, 1, 0, 0)?, "Vadodara", 500.0), (at(2024, 10, 2, 0, 0)?, "Udaipur", 450.0)],
        },
        DemoTruck {
            truck: NewTruck {
                driver: "Amit Sharma".into(),
                route: "Kolkata to Bengaluru".into(),
                fuel_level: 90.0,
                location: "Kolkata, West Bengal".into(),
                next_stop: "Bhubaneswar, Odisha".into(),
                status: Some(TruckStatus::Loading),
            },
            eta: at(2024, 10, 9, 10, 0)?,
            temperature: 25.0,
            humidity: 60.0,
            fuel_efficiency: 9.2,
            total_distance: 800.0,
            fuel_consumed: 87.0,
            tolls: vec![(at(2024, 10, 1, 0, 0)?, "Kharagpur", 350.0), (at(2024, 10, 2, 0, 0)?, "Bhubaneswar", 400.0)],
        },
    ])
}

fn demo_parcels() -> Result<Vec<DemoParcel>> {
    Ok(vec![
        DemoParcel {
            weight: 5.0,
            kind: ParcelKind::Regular,
            insurance: true,
            priority: false,
            description: "Books and stationery",
            status: ParcelStatus::InTransit,
            location: "Mumbai",
            eta: at(2024, 10, 8, 0, 0)?,
            updates: vec![
                (at(2024, 10, 6, 9, 0)?, "Package picked up"),
                (at(2024, 10, 7, 14, 30)?, "In transit to sorting facility"),
            ],
        },
        DemoParcel {
            weight: 2.0,
            kind: ParcelKind::Express,
            insurance: false,
            priority: true,
            description: "Electronic gadgets",
            status: ParcelStatus::Delivered,
            location: "Delhi",
            eta: at(2024, 10, 5, 0, 0)?,
            updates: vec![
                (at(2024, 10, 4, 10, 0)?, "Out for delivery"),
                (at(2024, 10, 5, 15, 45)?, "Delivered successfully"),
            ],
        },
    ])
}

async fn import(db: DatabaseConnection, auth: AuthConfig) -> Result<()> {
    clear(&db).await?;
    let repos = Repositories::seaorm(db);
    let services = Services::new(repos.clone(), auth);

    let mut customer_id = None;
    for (email, role) in [
        ("admin@logitrack.com", Role::Admin),
        ("driver@logitrack.com", Role::Driver),
        ("customer@logitrack.com", Role::Customer),
    ] {
        let session = services
            .auth
            .register(RegisterInput { email: email.into(), password: DEMO_PASSWORD.into(), role: Some(role) })
            .await
            .with_context(|| format!("creating {email}"))?;
        if role == Role::Customer {
            customer_id = Some(session.user.id);
        }
    }
    let customer_id = customer_id.ok_or_else(|| anyhow!("customer account missing"))?;

    let mut parcel_ids = Vec::new();
    for p in demo_parcels()? {
        let mut model = parcel::new_model(NewParcel {
            customer_id,
            weight: p.weight,
            source: "Mumbai".into(),
            destination: "Delhi".into(),
            kind: Some(p.kind),
            insurance: Some(p.insurance),
            priority: Some(p.priority),
            description: Some(p.description.into()),
        })?;
        model.status = p.status;
        model.location = p.location.into();
        model.eta = Some(p.eta.into());
        model.updates = TrackingUpdates(
            p.updates.into_iter().map(|(time, message)| TrackingUpdate { time, message: message.into() }).collect(),
        );
        parcel_ids.push(repos.parcels.insert(model).await?.id);
    }

    for (demo, parcel_id) in demo_trucks()?.into_iter().zip(parcel_ids) {
        let mut model = truck::new_model(demo.truck)?;
        model.estimated_arrival = Some(demo.eta.into());
        model.temperature = Some(demo.temperature);
        model.humidity = Some(demo.humidity);
        model.fuel_efficiency = Some(demo.fuel_efficiency);
        model.total_distance = Some(demo.total_distance);
        model.fuel_consumed = Some(demo.fuel_consumed);
        model.parcel_ids = ParcelIds(vec![parcel_id.to_string()]);
        let stored = repos.trucks.insert(model).await?;

        // Receipts go through the toll ledger so tollsPaid matches the history.
        for (date, location, amount) in demo.tolls {
            repos.tolls.record(toll::new_model(stored.id, date, location.into(), amount)?).await?;
        }
        info!(truck_id = %stored.id, driver = %stored.driver, "demo_truck_loaded");
    }

    info!("demo data imported");
    Ok(())
}

async fn run(cli: Cli) -> Result<()> {
    let cfg = configs::AppConfig::load_or_env()?;
    let db = models::db::connect_with_config(&cfg.database).await?;
    migration::Migrator::up(&db, None).await.context("running migrations")?;

    if cli.destroy {
        clear(&db).await?;
        info!("demo data destroyed");
        return Ok(());
    }
    import(db, AuthConfig::new(cfg.auth.jwt_secret, cfg.auth.token_ttl_hours)).await
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenv().ok();
    common::utils::logging::init_logging_from_env();
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "seed failed");
            ExitCode::FAILURE
        }
    }
}
