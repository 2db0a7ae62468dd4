use std::collections::HashMap;
use std::sync::Arc;

use models::{parcel, truck};
use tracing::{info, instrument};
use uuid::Uuid;

use super::domain::{TruckInput, TruckPatch, TruckRecord};
use super::repository::TruckRepository;
use crate::errors::ServiceError;
use crate::fleet::{self, FleetSummary};
use crate::input::parse_id;
use crate::parcel::repository::ParcelRepository;
use crate::policy::{authorize, Action, Principal};

#[derive(Clone)]
pub struct TruckService {
    trucks: Arc<dyn TruckRepository>,
    parcels: Arc<dyn ParcelRepository>,
}

impl TruckService {
    pub fn new(trucks: Arc<dyn TruckRepository>, parcels: Arc<dyn ParcelRepository>) -> Self {
        Self { trucks, parcels }
    }

    #[instrument(skip(self), fields(user_id = %principal.id))]
    pub async fn list(&self, principal: &Principal) -> Result<Vec<TruckRecord>, ServiceError> {
        authorize(principal, Action::ListTrucks)?;
        let trucks = self.trucks.list().await?;
        self.populate(trucks).await
    }

    #[instrument(skip(self, input), fields(user_id = %principal.id))]
    pub async fn create(&self, principal: &Principal, input: TruckInput) -> Result<truck::Model, ServiceError> {
        authorize(principal, Action::CreateTruck)?;
        let model = truck::new_model(input.into_new_truck()?)?;
        let created = self.trucks.insert(model).await?;
        info!(truck_id = %created.id, driver = %created.driver, "truck_created");
        Ok(created)
    }

    #[instrument(skip(self), fields(user_id = %principal.id))]
    pub async fn get(&self, principal: &Principal, id: &str) -> Result<TruckRecord, ServiceError> {
        authorize(principal, Action::ViewTruck)?;
        let truck = self.find(id).await?;
        let mut records = self.populate(vec![truck]).await?;
        records.pop().ok_or_else(|| ServiceError::not_found("Truck"))
    }

    #[instrument(skip(self, patch), fields(user_id = %principal.id))]
    pub async fn update(&self, principal: &Principal, id: &str, patch: TruckPatch) -> Result<truck::Model, ServiceError> {
        authorize(principal, Action::UpdateTruck)?;
        let id = parse_id(id, "Truck")?;
        let updated = self.trucks.modify(id, Box::new(move |truck| patch.apply(truck))).await?;
        info!(truck_id = %updated.id, status = ?updated.status, "truck_updated");
        Ok(updated)
    }

    #[instrument(skip(self), fields(user_id = %principal.id))]
    pub async fn delete(&self, principal: &Principal, id: &str) -> Result<(), ServiceError> {
        authorize(principal, Action::DeleteTruck)?;
        let id = parse_id(id, "Truck")?;
        if !self.trucks.delete(id).await? {
            return Err(ServiceError::not_found("Truck"));
        }
        info!(truck_id = %id, "truck_deleted");
        Ok(())
    }

    pub async fn fleet_summary(&self, principal: &Principal) -> Result<FleetSummary, ServiceError> {
        authorize(principal, Action::ViewFleetSummary)?;
        let trucks = self.trucks.list().await?;
        Ok(fleet::summarize(&trucks))
    }

    async fn find(&self, id: &str) -> Result<truck::Model, ServiceError> {
        let id = parse_id(id, "Truck")?;
        self.trucks.get(id).await?.ok_or_else(|| ServiceError::not_found("Truck"))
    }

    /// Resolve every referenced parcel with one lookup; dangling ids are skipped.
    async fn populate(&self, trucks: Vec<truck::Model>) -> Result<Vec<TruckRecord>, ServiceError> {
        let mut wanted: Vec<Uuid> = trucks.iter().flat_map(|t| t.parcel_uuids()).collect();
        wanted.sort_unstable();
        wanted.dedup();
        let found: HashMap<Uuid, parcel::Model> = if wanted.is_empty() {
            HashMap::new()
        } else {
            self.parcels.find_many(&wanted).await?.into_iter().map(|p| (p.id, p)).collect()
        };

        Ok(trucks
            .into_iter()
            .map(|truck| {
                let parcels = truck.parcel_uuids().iter().filter_map(|id| found.get(id).cloned()).collect();
                TruckRecord { truck, parcels }
            })
            .collect())
    }
}
