use chrono::{DateTime, Utc};
use sea_orm::{entity::prelude::*, FromJsonQueryResult, Set};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::ModelError;
use crate::user;

/// First tracking line written for every new parcel.
pub const ORDER_PLACED: &str = "Order placed successfully";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "lowercase")]
pub enum ParcelKind {
    #[default]
    #[sea_orm(string_value = "regular")]
    Regular,
    #[sea_orm(string_value = "express")]
    Express,
}

/// Intended order is Processing, In Transit, Delivered; transitions are not
/// restricted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum ParcelStatus {
    #[default]
    #[sea_orm(string_value = "Processing")]
    Processing,
    #[sea_orm(string_value = "In Transit")]
    #[serde(rename = "In Transit", alias = "InTransit")]
    InTransit,
    #[sea_orm(string_value = "Delivered")]
    Delivered,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrackingUpdate {
    pub time: DateTime<Utc>,
    pub message: String,
}

/// Append-only tracking log, in insertion order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, FromJsonQueryResult)]
#[serde(transparent)]
pub struct TrackingUpdates(pub Vec<TrackingUpdate>);

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "parcels")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub customer_id: Uuid,
    pub weight: f64,
    pub source: String,
    pub destination: String,
    #[sea_orm(column_name = "type")]
    #[serde(rename = "type")]
    pub kind: ParcelKind,
    pub insurance: bool,
    pub priority: bool,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub status: ParcelStatus,
    pub location: String,
    pub eta: Option<DateTimeWithTimeZone>,
    #[sea_orm(column_type = "JsonBinary")]
    pub updates: TrackingUpdates,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Customer,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Customer => Entity::belongs_to(user::Entity)
                .from(Column::CustomerId)
                .to(user::Column::Id)
                .into(),
        }
    }
}

impl Related<user::Entity> for Entity {
    fn to() -> RelationDef { Relation::Customer.def() }
}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_weight(weight: f64) -> Result<f64, ModelError> {
    if !(weight.is_finite() && weight > 0.0) {
        return Err(ModelError::validation("weight must be greater than 0"));
    }
    Ok(weight)
}

#[derive(Clone, Debug)]
pub struct NewParcel {
    pub customer_id: Uuid,
    pub weight: f64,
    pub source: String,
    pub destination: String,
    pub kind: Option<ParcelKind>,
    pub insurance: Option<bool>,
    pub priority: Option<bool>,
    pub description: Option<String>,
}

/// A fresh parcel sits at its source with a single "order placed" update.
pub fn new_model(input: NewParcel) -> Result<Model, ModelError> {
    let weight = validate_weight(input.weight)?;
    let now = Utc::now();
    Ok(Model {
        id: Uuid::new_v4(),
        customer_id: input.customer_id,
        weight,
        location: input.source.clone(),
        source: input.source,
        destination: input.destination,
        kind: input.kind.unwrap_or_default(),
        insurance: input.insurance.unwrap_or(false),
        priority: input.priority.unwrap_or(false),
        description: input.description,
        status: ParcelStatus::Processing,
        eta: None,
        updates: TrackingUpdates(vec![TrackingUpdate { time: now, message: ORDER_PLACED.to_string() }]),
        created_at: now.into(),
        updated_at: now.into(),
    })
}

impl Model {
    pub fn record_update(&mut self, message: impl Into<String>) {
        self.updates.0.push(TrackingUpdate { time: Utc::now(), message: message.into() });
    }

    pub fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.customer_id == user_id
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now().into();
    }

    pub fn into_active(self) -> ActiveModel {
        ActiveModel {
            id: Set(self.id),
            customer_id: Set(self.customer_id),
            weight: Set(self.weight),
            source: Set(self.source),
            destination: Set(self.destination),
            kind: Set(self.kind),
            insurance: Set(self.insurance),
            priority: Set(self.priority),
            description: Set(self.description),
            status: Set(self.status),
            location: Set(self.location),
            eta: Set(self.eta),
            updates: Set(self.updates),
            created_at: Set(self.created_at),
            updated_at: Set(self.updated_at),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input() -> NewParcel {
        NewParcel {
            customer_id: Uuid::new_v4(),
            weight: 5.0,
            source: "Mumbai".into(),
            destination: "Delhi".into(),
            kind: None,
            insurance: None,
            priority: None,
            description: None,
        }
    }

    #[test]
    fn new_parcel_starts_at_source_with_one_update() {
        let p = new_model(input()).unwrap();
        assert_eq!(p.location, "Mumbai");
        assert_eq!(p.status, ParcelStatus::Processing);
        assert_eq!(p.kind, ParcelKind::Regular);
        assert!(!p.insurance && !p.priority);
        assert_eq!(p.updates.0.len(), 1);
        assert_eq!(p.updates.0[0].message, ORDER_PLACED);
    }

    #[test]
    fn weight_must_be_positive() {
        for w in [0.0, -1.0, f64::INFINITY, f64::NAN] {
            let mut i = input();
            i.weight = w;
            assert!(new_model(i).is_err(), "weight {w} accepted");
        }
    }

    #[test]
    fn updates_append_in_order() {
        let mut p = new_model(input()).unwrap();
        p.record_update("Picked up");
        p.record_update("At hub");
        let msgs: Vec<_> = p.updates.0.iter().map(|u| u.message.as_str()).collect();
        assert_eq!(msgs, vec![ORDER_PLACED, "Picked up", "At hub"]);
        assert!(p.updates.0.windows(2).all(|w| w[0].time <= w[1].time));
    }

    #[test]
    fn serializes_type_and_status_like_the_api() {
        let mut p = new_model(input()).unwrap();
        p.kind = ParcelKind::Express;
        p.status = ParcelStatus::InTransit;
        let json = serde_json::to_value(&p).unwrap();
        assert_eq!(json["type"], "express");
        assert_eq!(json["status"], "In Transit");
        assert_eq!(json["customerId"], p.customer_id.to_string());
    }
}
