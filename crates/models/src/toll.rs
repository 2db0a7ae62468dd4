use chrono::{DateTime, Utc};
use sea_orm::{entity::prelude::*, Set};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::ModelError;
use crate::truck::{self, TollEntry};

/// Toll receipts are write-once; nothing updates or deletes them.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "tolls")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub truck_id: Uuid,
    pub date: DateTimeWithTimeZone,
    pub location: String,
    pub amount: f64,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Truck,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Truck => Entity::belongs_to(truck::Entity)
                .from(Column::TruckId)
                .to(truck::Column::Id)
                .into(),
        }
    }
}

impl Related<truck::Entity> for Entity {
    fn to() -> RelationDef { Relation::Truck.def() }
}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_amount(amount: f64) -> Result<f64, ModelError> {
    if !(amount.is_finite() && amount > 0.0) {
        return Err(ModelError::validation("amount must be greater than 0"));
    }
    Ok(amount)
}

pub fn new_model(truck_id: Uuid, date: DateTime<Utc>, location: String, amount: f64) -> Result<Model, ModelError> {
    let amount = validate_amount(amount)?;
    if location.trim().is_empty() {
        return Err(ModelError::validation("Please add location"));
    }
    let now = Utc::now().into();
    Ok(Model {
        id: Uuid::new_v4(),
        truck_id,
        date: date.into(),
        location,
        amount,
        created_at: now,
        updated_at: now,
    })
}

impl Model {
    /// The line this toll contributes to its truck's embedded history.
    pub fn ledger_entry(&self) -> TollEntry {
        TollEntry { date: self.date.with_timezone(&Utc), location: self.location.clone(), amount: self.amount }
    }

    pub fn into_active(self) -> ActiveModel {
        ActiveModel {
            id: Set(self.id),
            truck_id: Set(self.truck_id),
            date: Set(self.date),
            location: Set(self.location),
            amount: Set(self.amount),
            created_at: Set(self.created_at),
            updated_at: Set(self.updated_at),
        }
    }
}
