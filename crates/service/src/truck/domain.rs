use chrono::{DateTime, Utc};
use models::truck::{self, NewTruck, TruckStatus};
use models::parcel;
use serde::{Deserialize, Serialize};

use crate::errors::ServiceError;
use crate::input::{blank_as_none, lenient_datetime, lenient_f64, non_blank, nullable_f64, required, required_text};

/// Body of a truck registration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TruckInput {
    #[serde(default)]
    pub driver: Option<String>,
    #[serde(default)]
    pub route: Option<String>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub fuel_level: Option<f64>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub next_stop: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub status: Option<TruckStatus>,
}

impl TruckInput {
    pub fn into_new_truck(self) -> Result<NewTruck, ServiceError> {
        Ok(NewTruck {
            driver: required_text(self.driver, "Please add a driver name")?,
            route: required_text(self.route, "Please add a route")?,
            fuel_level: required(self.fuel_level, "Please add fuel level")?,
            location: required_text(self.location, "Please add current location")?,
            next_stop: required_text(self.next_stop, "Please add next stop")?,
            status: self.status,
        })
    }
}

/// Partial update. Text fields and `status`/`estimatedArrival` keep the
/// stored value when blank; numeric fields apply whenever present, zero
/// included. The nullable readings can be cleared with an explicit `null`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TruckPatch {
    #[serde(default)]
    pub driver: Option<String>,
    #[serde(default)]
    pub route: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub next_stop: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub status: Option<TruckStatus>,
    #[serde(default, deserialize_with = "lenient_datetime")]
    pub estimated_arrival: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub fuel_level: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub tolls_paid: Option<f64>,
    #[serde(default, deserialize_with = "nullable_f64")]
    pub temperature: Option<Option<f64>>,
    #[serde(default, deserialize_with = "nullable_f64")]
    pub humidity: Option<Option<f64>>,
    #[serde(default, deserialize_with = "nullable_f64")]
    pub fuel_efficiency: Option<Option<f64>>,
    #[serde(default, deserialize_with = "nullable_f64")]
    pub total_distance: Option<Option<f64>>,
    #[serde(default, deserialize_with = "nullable_f64")]
    pub fuel_consumed: Option<Option<f64>>,
    #[serde(default)]
    pub parcel_ids: Option<Vec<String>>,
}

impl TruckPatch {
    /// Merge into `truck`. Nothing is written if validation fails.
    pub fn apply(self, truck: &mut truck::Model) -> Result<(), ServiceError> {
        if let Some(level) = self.fuel_level {
            truck.fuel_level = truck::validate_fuel_level(level)?;
        }
        if let Some(v) = non_blank(self.driver) { truck.driver = v; }
        if let Some(v) = non_blank(self.route) { truck.route = v; }
        if let Some(v) = non_blank(self.location) { truck.location = v; }
        if let Some(v) = non_blank(self.next_stop) { truck.next_stop = v; }
        if let Some(v) = self.status { truck.status = v; }
        if let Some(v) = self.estimated_arrival { truck.estimated_arrival = Some(v.into()); }
        if let Some(v) = self.tolls_paid { truck.tolls_paid = v; }
        if let Some(v) = self.temperature { truck.temperature = v; }
        if let Some(v) = self.humidity { truck.humidity = v; }
        if let Some(v) = self.fuel_efficiency { truck.fuel_efficiency = v; }
        if let Some(v) = self.total_distance { truck.total_distance = v; }
        if let Some(v) = self.fuel_consumed { truck.fuel_consumed = v; }
        if let Some(ids) = self.parcel_ids { truck.parcel_ids = truck::ParcelIds(ids); }
        truck.touch();
        Ok(())
    }
}

/// A truck with the parcels its `parcelIds` resolve to.
#[derive(Debug, Clone, Serialize)]
pub struct TruckRecord {
    #[serde(flatten)]
    pub truck: truck::Model,
    pub parcels: Vec<parcel::Model>,
}
