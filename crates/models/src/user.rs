use sea_orm::{entity::prelude::*, Set};
use uuid::Uuid;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;
use crate::parcel;

/// Role assigned at registration. There is no operation that changes it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[sea_orm(string_value = "admin")]
    Admin,
    #[sea_orm(string_value = "driver")]
    Driver,
    #[default]
    #[sea_orm(string_value = "customer")]
    Customer,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Driver => "driver",
            Role::Customer => "customer",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Role::Admin),
            "driver" => Ok(Role::Driver),
            "customer" => Ok(Role::Customer),
            other => Err(ModelError::validation(format!("unknown role: {other}"))),
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub email: String,
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub role: Role,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Parcels,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self { Relation::Parcels => Entity::has_many(parcel::Entity).into() }
    }
}

impl Related<parcel::Entity> for Entity {
    fn to() -> RelationDef { Relation::Parcels.def() }
}

impl ActiveModelBehavior for ActiveModel {}

/// Lower-cased, trimmed form used for storage and lookups.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

pub fn validate_email(email: &str) -> Result<(), ModelError> {
    let email = email.trim();
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(()),
        _ => Err(ModelError::validation("Please add a valid email")),
    }
}

/// Build a new user record; the caller supplies an already hashed password.
pub fn new_model(email: &str, password_hash: String, role: Role) -> Result<Model, ModelError> {
    validate_email(email)?;
    let now = Utc::now().into();
    Ok(Model {
        id: Uuid::new_v4(),
        email: normalize_email(email),
        password_hash,
        role,
        created_at: now,
        updated_at: now,
    })
}

impl Model {
    pub fn into_active(self) -> ActiveModel {
        ActiveModel {
            id: Set(self.id),
            email: Set(self.email),
            password_hash: Set(self.password_hash),
            role: Set(self.role),
            created_at: Set(self.created_at),
            updated_at: Set(self.updated_at),
        }
    }
}
