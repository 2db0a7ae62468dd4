use anyhow::Result;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, EntityTrait, ModelTrait};
use uuid::Uuid;

use super::test_db;
use crate::parcel::{self, NewParcel, ParcelStatus};
use crate::truck::{self, NewTruck, TruckStatus};
use crate::user::{self, Role};
use crate::toll;

fn customer() -> Result<user::Model> {
    Ok(user::new_model(&format!("crud_{}@example.com", Uuid::new_v4()), "hash".into(), Role::Customer)?)
}

#[tokio::test]
async fn test_truck_json_columns_round_trip() -> Result<()> {
    let Some(db) = test_db().await? else { return Ok(()) };

    let mut t = truck::new_model(NewTruck {
        driver: "Ravi".into(),
        route: "Mumbai-Delhi".into(),
        fuel_level: 75.0,
        location: "Ahmedabad".into(),
        next_stop: "Jaipur".into(),
        status: Some(TruckStatus::InTransit),
    })?;
    t.parcel_ids = truck::ParcelIds(vec!["not-a-uuid".into()]);
    t.charge_toll(truck::TollEntry { date: Utc::now(), location: "Vadodara".into(), amount: 500.0 });
    let stored = t.clone().into_active().insert(&db).await?;

    let found = truck::Entity::find_by_id(stored.id).one(&db).await?.expect("truck stored");
    assert_eq!(found.status, TruckStatus::InTransit);
    assert_eq!(found.parcel_ids, t.parcel_ids);
    assert_eq!(found.toll_history.0.len(), 1);
    assert_eq!(found.tolls_paid, 500.0);

    truck::Entity::delete_by_id(found.id).exec(&db).await?;
    Ok(())
}

#[tokio::test]
async fn test_parcel_owner_relation_and_cascade() -> Result<()> {
    let Some(db) = test_db().await? else { return Ok(()) };

    let owner = customer()?.into_active().insert(&db).await?;
    let p = parcel::new_model(NewParcel {
        customer_id: owner.id,
        weight: 5.0,
        source: "Mumbai".into(),
        destination: "Delhi".into(),
        kind: None,
        insurance: None,
        priority: None,
        description: None,
    })?
    .into_active()
    .insert(&db)
    .await?;
    assert_eq!(p.status, ParcelStatus::Processing);

    let (_, found_owner) = parcel::Entity::find_by_id(p.id).find_also_related(user::Entity).one(&db).await?.expect("parcel");
    assert_eq!(found_owner.map(|u| u.id), Some(owner.id));
    assert_eq!(owner.find_related(parcel::Entity).all(&db).await?.len(), 1);

    user::Entity::delete_by_id(owner.id).exec(&db).await?;
    assert!(parcel::Entity::find_by_id(p.id).one(&db).await?.is_none());
    Ok(())
}

#[tokio::test]
async fn test_toll_survives_truck_removal() -> Result<()> {
    let Some(db) = test_db().await? else { return Ok(()) };

    let t = truck::new_model(NewTruck {
        driver: "Amit".into(),
        route: "Kolkata-Bengaluru".into(),
        fuel_level: 90.0,
        location: "Kolkata".into(),
        next_stop: "Bhubaneswar".into(),
        status: None,
    })?
    .into_active()
    .insert(&db)
    .await?;
    let receipt = toll::new_model(t.id, Utc::now(), "Kharagpur".into(), 350.0)?.into_active().insert(&db).await?;

    truck::Entity::delete_by_id(t.id).exec(&db).await?;
    let (kept, truck) = toll::Entity::find_by_id(receipt.id).find_also_related(truck::Entity).one(&db).await?.expect("toll");
    assert_eq!(kept.amount, 350.0);
    assert!(truck.is_none());

    toll::Entity::delete_by_id(receipt.id).exec(&db).await?;
    Ok(())
}
