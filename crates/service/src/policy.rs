//! Role gate for every resource operation.
//!
//! The table below is the single place that says which role may perform
//! which operation. Ownership rules (a customer only sees their own parcels)
//! are applied by the parcel service after the gate passes.

use serde::Serialize;
use tracing::warn;
use uuid::Uuid;

pub use models::user::Role;

use crate::errors::ServiceError;

/// The authenticated actor behind a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Principal {
    pub id: Uuid,
    pub role: Role,
}

impl Principal {
    pub fn new(id: Uuid, role: Role) -> Self { Self { id, role } }

    pub fn is_admin(&self) -> bool { self.role == Role::Admin }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    ListTrucks,
    CreateTruck,
    ViewTruck,
    UpdateTruck,
    DeleteTruck,
    ViewFleetSummary,
    ListParcels,
    CreateParcel,
    ViewParcel,
    UpdateParcel,
    DeleteParcel,
    ListTolls,
    CreateToll,
    ListTruckTolls,
}

struct Rule {
    action: Action,
    allowed: &'static [Role],
    denial: &'static str,
}

const ADMIN_ONLY: &[Role] = &[Role::Admin];
const NOT_ADMIN: &str = "Not authorized as an admin";

static POLICY: &[Rule] = &[
    Rule { action: Action::ListTrucks, allowed: ADMIN_ONLY, denial: NOT_ADMIN },
    Rule { action: Action::CreateTruck, allowed: ADMIN_ONLY, denial: NOT_ADMIN },
    Rule { action: Action::ViewTruck, allowed: ADMIN_ONLY, denial: NOT_ADMIN },
    Rule { action: Action::UpdateTruck, allowed: ADMIN_ONLY, denial: NOT_ADMIN },
    Rule { action: Action::DeleteTruck, allowed: ADMIN_ONLY, denial: NOT_ADMIN },
    Rule { action: Action::ViewFleetSummary, allowed: ADMIN_ONLY, denial: NOT_ADMIN },
    // No driver-scoped parcel view exists yet.
    Rule { action: Action::ListParcels, allowed: &[Role::Admin, Role::Customer], denial: "Not authorized to view parcels" },
    Rule { action: Action::CreateParcel, allowed: &[Role::Customer], denial: "Only customers can create parcels" },
    Rule { action: Action::ViewParcel, allowed: &[Role::Admin, Role::Customer], denial: "Not authorized to view this parcel" },
    Rule { action: Action::UpdateParcel, allowed: &[Role::Admin, Role::Driver], denial: "Not authorized to update this parcel" },
    Rule { action: Action::DeleteParcel, allowed: ADMIN_ONLY, denial: "Not authorized to delete this parcel" },
    Rule { action: Action::ListTolls, allowed: ADMIN_ONLY, denial: NOT_ADMIN },
    Rule { action: Action::CreateToll, allowed: ADMIN_ONLY, denial: NOT_ADMIN },
    Rule { action: Action::ListTruckTolls, allowed: ADMIN_ONLY, denial: NOT_ADMIN },
];

fn rule(action: Action) -> Option<&'static Rule> {
    POLICY.iter().find(|r| r.action == action)
}

/// Whether `role` passes the gate for `action`. Actions missing from the
/// table are denied.
pub fn is_allowed(role: Role, action: Action) -> bool {
    rule(action).is_some_and(|r| r.allowed.contains(&role))
}

pub fn authorize(principal: &Principal, action: Action) -> Result<(), ServiceError> {
    if is_allowed(principal.role, action) {
        return Ok(());
    }
    let denial = rule(action).map_or("Not authorized", |r| r.denial);
    warn!(user_id = %principal.id, role = %principal.role, ?action, "authorization_denied");
    Err(ServiceError::Forbidden(denial.to_string()))
}
