use std::sync::Arc;

use async_trait::async_trait;
use models::{parcel, toll, truck, user};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::auth::errors::AuthError;
use crate::auth::repository::AuthRepository;
use crate::errors::ServiceError;
use crate::parcel::repository::{ParcelRepository, ParcelWithOwner};
use crate::toll::repository::TollRepository;
use crate::truck::repository::{TruckEdit, TruckRepository};

#[derive(Default)]
struct Tables {
    users: Vec<user::Model>,
    trucks: Vec<truck::Model>,
    parcels: Vec<parcel::Model>,
    tolls: Vec<toll::Model>,
}

impl Tables {
    fn user(&self, id: Uuid) -> Option<user::Model> {
        self.users.iter().find(|u| u.id == id).cloned()
    }

    fn with_owner(&self, p: &parcel::Model) -> ParcelWithOwner {
        (p.clone(), self.user(p.customer_id))
    }
}

/// Process-local store implementing every repository trait.
///
/// Rows are kept in insertion order, matching the `created_at` ordering of
/// the SeaORM repositories. Clones share the same tables.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<RwLock<Tables>>,
}

impl MemoryStore {
    #[cfg(test)]
    pub(crate) async fn truck(&self, id: Uuid) -> Option<truck::Model> {
        self.inner.read().await.trucks.iter().find(|t| t.id == id).cloned()
    }
}

fn replace<T, F>(rows: &mut [T], row: T, same: F) -> bool
where
    F: Fn(&T, &T) -> bool,
{
    match rows.iter_mut().find(|r| same(r, &row)) {
        Some(slot) => {
            *slot = row;
            true
        }
        None => false,
    }
}

#[async_trait]
impl AuthRepository for MemoryStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<user::Model>, AuthError> {
        Ok(self.inner.read().await.users.iter().find(|u| u.email == email).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<user::Model>, AuthError> {
        Ok(self.inner.read().await.user(id))
    }

    async fn create_user(&self, user: user::Model) -> Result<user::Model, AuthError> {
        let mut t = self.inner.write().await;
        if t.users.iter().any(|u| u.email == user.email) {
            return Err(AuthError::Conflict);
        }
        t.users.push(user.clone());
        Ok(user)
    }
}

#[async_trait]
impl TruckRepository for MemoryStore {
    async fn list(&self) -> Result<Vec<truck::Model>, ServiceError> {
        Ok(self.inner.read().await.trucks.clone())
    }

    async fn get(&self, id: Uuid) -> Result<Option<truck::Model>, ServiceError> {
        Ok(self.inner.read().await.trucks.iter().find(|t| t.id == id).cloned())
    }

    async fn insert(&self, truck: truck::Model) -> Result<truck::Model, ServiceError> {
        self.inner.write().await.trucks.push(truck.clone());
        Ok(truck)
    }

    async fn modify(&self, id: Uuid, edit: TruckEdit) -> Result<truck::Model, ServiceError> {
        let mut t = self.inner.write().await;
        let slot = t.trucks.iter_mut().find(|x| x.id == id).ok_or_else(|| ServiceError::not_found("Truck"))?;
        let mut next = slot.clone();
        edit(&mut next)?;
        *slot = next.clone();
        Ok(next)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, ServiceError> {
        let mut t = self.inner.write().await;
        let before = t.trucks.len();
        t.trucks.retain(|x| x.id != id);
        Ok(t.trucks.len() != before)
    }
}

#[async_trait]
impl ParcelRepository for MemoryStore {
    async fn list_with_owner(&self) -> Result<Vec<ParcelWithOwner>, ServiceError> {
        let t = self.inner.read().await;
        Ok(t.parcels.iter().map(|p| t.with_owner(p)).collect())
    }

    async fn list_by_customer(&self, customer_id: Uuid) -> Result<Vec<parcel::Model>, ServiceError> {
        let t = self.inner.read().await;
        Ok(t.parcels.iter().filter(|p| p.customer_id == customer_id).cloned().collect())
    }

    async fn get(&self, id: Uuid) -> Result<Option<parcel::Model>, ServiceError> {
        Ok(self.inner.read().await.parcels.iter().find(|p| p.id == id).cloned())
    }

    async fn get_with_owner(&self, id: Uuid) -> Result<Option<ParcelWithOwner>, ServiceError> {
        let t = self.inner.read().await;
        Ok(t.parcels.iter().find(|p| p.id == id).map(|p| t.with_owner(p)))
    }

    async fn find_many(&self, ids: &[Uuid]) -> Result<Vec<parcel::Model>, ServiceError> {
        let t = self.inner.read().await;
        Ok(t.parcels.iter().filter(|p| ids.contains(&p.id)).cloned().collect())
    }

    async fn insert(&self, parcel: parcel::Model) -> Result<parcel::Model, ServiceError> {
        self.inner.write().await.parcels.push(parcel.clone());
        Ok(parcel)
    }

    async fn update(&self, parcel: parcel::Model) -> Result<parcel::Model, ServiceError> {
        let mut t = self.inner.write().await;
        if replace(&mut t.parcels, parcel.clone(), |a, b| a.id == b.id) {
            Ok(parcel)
        } else {
            Err(ServiceError::not_found("Parcel"))
        }
    }

    async fn delete(&self, id: Uuid) -> Result<bool, ServiceError> {
        let mut t = self.inner.write().await;
        let before = t.parcels.len();
        t.parcels.retain(|x| x.id != id);
        Ok(t.parcels.len() != before)
    }
}

#[async_trait]
impl TollRepository for MemoryStore {
    async fn list_with_truck(&self) -> Result<Vec<(toll::Model, Option<truck::Model>)>, ServiceError> {
        let t = self.inner.read().await;
        Ok(t.tolls
            .iter()
            .map(|toll| (toll.clone(), t.trucks.iter().find(|tr| tr.id == toll.truck_id).cloned()))
            .collect())
    }

    async fn list_by_truck(&self, truck_id: Uuid) -> Result<Vec<toll::Model>, ServiceError> {
        let t = self.inner.read().await;
        Ok(t.tolls.iter().filter(|x| x.truck_id == truck_id).cloned().collect())
    }

    async fn record(&self, toll: toll::Model) -> Result<toll::Model, ServiceError> {
        let mut t = self.inner.write().await;
        let truck = t
            .trucks
            .iter_mut()
            .find(|tr| tr.id == toll.truck_id)
            .ok_or_else(|| ServiceError::not_found("Truck"))?;
        truck.charge_toll(toll.ledger_entry());
        t.tolls.push(toll.clone());
        Ok(toll)
    }
}
