use std::sync::Arc;

use models::toll;
use tracing::{info, instrument};
use uuid::Uuid;

use super::domain::{TollInput, TollRecord};
use super::repository::TollRepository;
use crate::errors::ServiceError;
use crate::input::{parse_id, required, required_text};
use crate::policy::{authorize, Action, Principal};
use crate::truck::repository::TruckRepository;

#[derive(Clone)]
pub struct TollService {
    tolls: Arc<dyn TollRepository>,
    trucks: Arc<dyn TruckRepository>,
}

impl TollService {
    pub fn new(tolls: Arc<dyn TollRepository>, trucks: Arc<dyn TruckRepository>) -> Self { Self { tolls, trucks } }

    #[instrument(skip(self), fields(user_id = %principal.id))]
    pub async fn list(&self, principal: &Principal) -> Result<Vec<TollRecord>, ServiceError> {
        authorize(principal, Action::ListTolls)?;
        let rows = self.tolls.list_with_truck().await?;
        Ok(rows.into_iter().map(|(toll, truck)| TollRecord { toll, truck }).collect())
    }

    /// Tolls charged to one truck. An id that matches nothing yields an
    /// empty list.
    #[instrument(skip(self), fields(user_id = %principal.id))]
    pub async fn list_by_truck(&self, principal: &Principal, truck_id: &str) -> Result<Vec<toll::Model>, ServiceError> {
        authorize(principal, Action::ListTruckTolls)?;
        match Uuid::parse_str(truck_id.trim()) {
            Ok(id) => self.tolls.list_by_truck(id).await,
            Err(_) => Ok(Vec::new()),
        }
    }

    /// Record a toll and add it to the truck's total and history.
    ///
    /// The truck is checked first, so an unknown truck fails `NotFound`
    /// without writing anything.
    #[instrument(skip(self, input), fields(user_id = %principal.id))]
    pub async fn create(&self, principal: &Principal, input: TollInput) -> Result<toll::Model, ServiceError> {
        authorize(principal, Action::CreateToll)?;
        let truck_id = parse_id(input.truck_id.as_deref().unwrap_or_default(), "Truck")?;
        if self.trucks.get(truck_id).await?.is_none() {
            return Err(ServiceError::not_found("Truck"));
        }

        let date = required(input.date, "Please add a date")?;
        let location = required_text(input.location, "Please add location")?;
        let amount = required(input.amount, "Please add amount")?;
        let model = toll::new_model(truck_id, date, location, amount)?;

        let created = self.tolls.record(model).await?;
        info!(toll_id = %created.id, truck_id = %truck_id, amount = created.amount, "toll_recorded");
        Ok(created)
    }
}
