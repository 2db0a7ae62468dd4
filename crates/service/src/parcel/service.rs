use std::sync::Arc;

use models::parcel;
use tracing::{info, instrument, warn};

use super::domain::{ParcelInput, ParcelPatch, ParcelRecord};
use super::repository::{ParcelRepository, ParcelWithOwner};
use crate::auth::domain::AuthUser;
use crate::errors::ServiceError;
use crate::input::parse_id;
use crate::policy::{authorize, Action, Principal, Role};

#[derive(Clone)]
pub struct ParcelService {
    parcels: Arc<dyn ParcelRepository>,
}

fn with_owner((parcel, owner): ParcelWithOwner) -> ParcelRecord {
    ParcelRecord { parcel, customer: owner.map(AuthUser::from) }
}

impl ParcelService {
    pub fn new(parcels: Arc<dyn ParcelRepository>) -> Self { Self { parcels } }

    /// Admins see every parcel with its owner; customers see their own.
    #[instrument(skip(self), fields(user_id = %principal.id))]
    pub async fn list(&self, principal: &Principal) -> Result<Vec<ParcelRecord>, ServiceError> {
        authorize(principal, Action::ListParcels)?;
        match principal.role {
            Role::Admin => Ok(self.parcels.list_with_owner().await?.into_iter().map(with_owner).collect()),
            _ => Ok(self
                .parcels
                .list_by_customer(principal.id)
                .await?
                .into_iter()
                .map(ParcelRecord::bare)
                .collect()),
        }
    }

    /// The caller becomes the owner.
    #[instrument(skip(self, input), fields(user_id = %principal.id))]
    pub async fn create(&self, principal: &Principal, input: ParcelInput) -> Result<parcel::Model, ServiceError> {
        authorize(principal, Action::CreateParcel)?;
        let model = parcel::new_model(input.into_new_parcel(principal.id)?)?;
        let created = self.parcels.insert(model).await?;
        info!(parcel_id = %created.id, customer_id = %created.customer_id, "parcel_created");
        Ok(created)
    }

    #[instrument(skip(self), fields(user_id = %principal.id))]
    pub async fn get(&self, principal: &Principal, id: &str) -> Result<ParcelRecord, ServiceError> {
        authorize(principal, Action::ViewParcel)?;
        let id = parse_id(id, "Parcel")?;
        let found = self.parcels.get_with_owner(id).await?.ok_or_else(|| ServiceError::not_found("Parcel"))?;
        if !principal.is_admin() && !found.0.is_owned_by(principal.id) {
            warn!(parcel_id = %id, "parcel_read_denied");
            return Err(ServiceError::Forbidden("Not authorized to view this parcel".into()));
        }
        Ok(with_owner(found))
    }

    #[instrument(skip(self, patch), fields(user_id = %principal.id))]
    pub async fn update(&self, principal: &Principal, id: &str, patch: ParcelPatch) -> Result<parcel::Model, ServiceError> {
        authorize(principal, Action::UpdateParcel)?;
        let id = parse_id(id, "Parcel")?;
        let mut parcel = self.parcels.get(id).await?.ok_or_else(|| ServiceError::not_found("Parcel"))?;
        patch.apply(&mut parcel);
        let updated = self.parcels.update(parcel).await?;
        info!(parcel_id = %updated.id, status = ?updated.status, updates = updated.updates.0.len(), "parcel_updated");
        Ok(updated)
    }

    #[instrument(skip(self), fields(user_id = %principal.id))]
    pub async fn delete(&self, principal: &Principal, id: &str) -> Result<(), ServiceError> {
        authorize(principal, Action::DeleteParcel)?;
        let id = parse_id(id, "Parcel")?;
        if !self.parcels.delete(id).await? {
            return Err(ServiceError::not_found("Parcel"));
        }
        info!(parcel_id = %id, "parcel_deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::memory::MemoryStore;
    use crate::test_support::{admin, customer, driver, parcel_input, register};
    use models::parcel::{ParcelStatus, ORDER_PLACED};
    use models::user::Role;
    use uuid::Uuid;

    fn svc(store: &MemoryStore) -> ParcelService {
        ParcelService::new(Arc::new(store.clone()))
    }

    #[tokio::test]
    async fn customer_creates_parcel_at_source() {
        let store = MemoryStore::default();
        let me = customer();
        let p = svc(&store).create(&me, parcel_input()).await.unwrap();
        assert_eq!(p.customer_id, me.id);
        assert_eq!(p.status, ParcelStatus::Processing);
        assert_eq!(p.location, p.source);
        assert_eq!(p.updates.0.len(), 1);
        assert_eq!(p.updates.0[0].message, ORDER_PLACED);
    }

    #[tokio::test]
    async fn only_customers_create() {
        let store = MemoryStore::default();
        let svc = svc(&store);
        for who in [admin(), driver()] {
            match svc.create(&who, parcel_input()).await {
                Err(ServiceError::Forbidden(msg)) => assert_eq!(msg, "Only customers can create parcels"),
                other => panic!("unexpected: {other:?}"),
            }
        }
    }

    #[tokio::test]
    async fn customer_list_is_scoped_to_owner() {
        let store = MemoryStore::default();
        let svc = svc(&store);
        let (a, b) = (customer(), customer());
        svc.create(&a, parcel_input()).await.unwrap();
        svc.create(&a, parcel_input()).await.unwrap();
        svc.create(&b, parcel_input()).await.unwrap();

        let mine = svc.list(&a).await.unwrap();
        assert_eq!(mine.len(), 2);
        assert!(mine.iter().all(|r| r.parcel.customer_id == a.id && r.customer.is_none()));
        assert_eq!(svc.list(&admin()).await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn driver_cannot_list() {
        let store = MemoryStore::default();
        match svc(&store).list(&driver()).await {
            Err(ServiceError::Forbidden(msg)) => assert_eq!(msg, "Not authorized to view parcels"),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[tokio::test]
    async fn admin_views_populate_owner() {
        let store = MemoryStore::default();
        let owner = register(&store, "owner@example.com", Role::Customer).await;
        let svc = svc(&store);
        let p = svc.create(&owner, parcel_input()).await.unwrap();

        let rec = svc.get(&admin(), &p.id.to_string()).await.unwrap();
        assert_eq!(rec.customer.as_ref().map(|c| c.email.as_str()), Some("owner@example.com"));
        let all = svc.list(&admin()).await.unwrap();
        assert_eq!(all[0].customer.as_ref().map(|c| c.id), Some(owner.id));
    }

    #[tokio::test]
    async fn foreign_customer_forbidden_owner_allowed() {
        let store = MemoryStore::default();
        let svc = svc(&store);
        let (a, b) = (customer(), customer());
        let p = svc.create(&a, parcel_input()).await.unwrap();

        assert!(svc.get(&a, &p.id.to_string()).await.is_ok());
        match svc.get(&b, &p.id.to_string()).await {
            Err(ServiceError::Forbidden(msg)) => assert_eq!(msg, "Not authorized to view this parcel"),
            other => panic!("unexpected: {other:?}"),
        }
        assert!(matches!(svc.get(&driver(), &p.id.to_string()).await, Err(ServiceError::Forbidden(_))));
    }

    #[tokio::test]
    async fn missing_parcel_is_not_found_before_ownership() {
        let store = MemoryStore::default();
        match svc(&store).get(&customer(), &Uuid::new_v4().to_string()).await {
            Err(ServiceError::NotFound(msg)) => assert_eq!(msg, "Parcel not found"),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[tokio::test]
    async fn driver_update_appends_message() {
        let store = MemoryStore::default();
        let svc = svc(&store);
        let p = svc.create(&customer(), parcel_input()).await.unwrap();
        let patch: ParcelPatch =
            serde_json::from_value(serde_json::json!({"status": "In Transit", "updateMessage": "Picked up"})).unwrap();
        let updated = svc.update(&driver(), &p.id.to_string(), patch).await.unwrap();
        assert_eq!(updated.status, ParcelStatus::InTransit);
        assert_eq!(updated.updates.0.len(), 2);
        assert_eq!(updated.updates.0[1].message, "Picked up");
    }

    #[tokio::test]
    async fn customer_cannot_update_even_own_parcel() {
        let store = MemoryStore::default();
        let svc = svc(&store);
        let me = customer();
        let p = svc.create(&me, parcel_input()).await.unwrap();
        let err = svc.update(&me, &p.id.to_string(), ParcelPatch::default()).await.unwrap_err();
        assert_eq!(err.to_string(), "Not authorized to update this parcel");
    }

    #[tokio::test]
    async fn delete_admin_only() {
        let store = MemoryStore::default();
        let svc = svc(&store);
        let me = customer();
        let p = svc.create(&me, parcel_input()).await.unwrap();
        assert!(matches!(svc.delete(&driver(), &p.id.to_string()).await, Err(ServiceError::Forbidden(_))));
        assert!(matches!(svc.delete(&me, &p.id.to_string()).await, Err(ServiceError::Forbidden(_))));
        svc.delete(&admin(), &p.id.to_string()).await.unwrap();
        assert!(matches!(svc.delete(&admin(), &p.id.to_string()).await, Err(ServiceError::NotFound(_))));
        assert!(svc.list(&me).await.unwrap().is_empty());
    }
}
