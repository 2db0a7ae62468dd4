use chrono::{DateTime, Utc};
use sea_orm::{entity::prelude::*, FromJsonQueryResult, Set};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::ModelError;
use crate::toll;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum TruckStatus {
    #[default]
    #[sea_orm(string_value = "Ready")]
    Ready,
    #[sea_orm(string_value = "In Transit")]
    #[serde(rename = "In Transit", alias = "InTransit")]
    InTransit,
    #[sea_orm(string_value = "Loading")]
    Loading,
    #[sea_orm(string_value = "Maintenance")]
    Maintenance,
}

/// One line of a truck's embedded toll ledger.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TollEntry {
    pub date: DateTime<Utc>,
    pub location: String,
    pub amount: f64,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, FromJsonQueryResult)]
#[serde(transparent)]
pub struct TollHistory(pub Vec<TollEntry>);

/// Parcel references carried by a truck, kept as raw strings.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, FromJsonQueryResult)]
#[serde(transparent)]
pub struct ParcelIds(pub Vec<String>);

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "trucks")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub driver: String,
    pub route: String,
    pub status: TruckStatus,
    #[sea_orm(column_type = "JsonBinary")]
    pub parcel_ids: ParcelIds,
    pub location: String,
    pub fuel_level: f64,
    pub next_stop: String,
    pub estimated_arrival: Option<DateTimeWithTimeZone>,
    /// Celsius
    pub temperature: Option<f64>,
    /// Percent
    pub humidity: Option<f64>,
    pub tolls_paid: f64,
    /// km/L
    pub fuel_efficiency: Option<f64>,
    /// km
    pub total_distance: Option<f64>,
    /// litres
    pub fuel_consumed: Option<f64>,
    #[sea_orm(column_type = "JsonBinary")]
    pub toll_history: TollHistory,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Tolls,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self { Relation::Tolls => Entity::has_many(toll::Entity).into() }
    }
}

impl Related<toll::Entity> for Entity {
    fn to() -> RelationDef { Relation::Tolls.def() }
}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_fuel_level(level: f64) -> Result<f64, ModelError> {
    if !(0.0..=100.0).contains(&level) {
        return Err(ModelError::validation("fuelLevel must be between 0 and 100"));
    }
    Ok(level)
}

/// Fields an admin supplies when registering a truck; everything else starts
/// at its default (status `Ready`, no tolls, empty history).
#[derive(Clone, Debug)]
pub struct NewTruck {
    pub driver: String,
    pub route: String,
    pub fuel_level: f64,
    pub location: String,
    pub next_stop: String,
    pub status: Option<TruckStatus>,
}

pub fn new_model(input: NewTruck) -> Result<Model, ModelError> {
    let fuel_level = validate_fuel_level(input.fuel_level)?;
    let now = Utc::now().into();
    Ok(Model {
        id: Uuid::new_v4(),
        driver: input.driver,
        route: input.route,
        status: input.status.unwrap_or_default(),
        parcel_ids: ParcelIds::default(),
        location: input.location,
        fuel_level,
        next_stop: input.next_stop,
        estimated_arrival: None,
        temperature: None,
        humidity: None,
        tolls_paid: 0.0,
        fuel_efficiency: None,
        total_distance: None,
        fuel_consumed: None,
        toll_history: TollHistory::default(),
        created_at: now,
        updated_at: now,
    })
}

impl Model {
    /// Add a toll to the running total and append it to the ledger.
    pub fn charge_toll(&mut self, entry: TollEntry) {
        self.tolls_paid += entry.amount;
        self.toll_history.0.push(entry);
        self.touch();
    }

    /// Referenced parcel ids that parse as UUIDs; anything else is skipped.
    pub fn parcel_uuids(&self) -> Vec<Uuid> {
        self.parcel_ids.0.iter().filter_map(|s| Uuid::parse_str(s).ok()).collect()
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now().into();
    }

    pub fn into_active(self) -> ActiveModel {
        ActiveModel {
            id: Set(self.id),
            driver: Set(self.driver),
            route: Set(self.route),
            status: Set(self.status),
            parcel_ids: Set(self.parcel_ids),
            location: Set(self.location),
            fuel_level: Set(self.fuel_level),
            next_stop: Set(self.next_stop),
            estimated_arrival: Set(self.estimated_arrival),
            temperature: Set(self.temperature),
            humidity: Set(self.humidity),
            tolls_paid: Set(self.tolls_paid),
            fuel_efficiency: Set(self.fuel_efficiency),
            total_distance: Set(self.total_distance),
            fuel_consumed: Set(self.fuel_consumed),
            toll_history: Set(self.toll_history),
            created_at: Set(self.created_at),
            updated_at: Set(self.updated_at),
        }
    }
}
