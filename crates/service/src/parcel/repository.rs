use async_trait::async_trait;
use models::{parcel, user};
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder};
use uuid::Uuid;

use crate::errors::ServiceError;

/// A parcel joined with its owning user, if that user still exists.
pub type ParcelWithOwner = (parcel::Model, Option<user::Model>);

#[async_trait]
pub trait ParcelRepository: Send + Sync {
    async fn list_with_owner(&self) -> Result<Vec<ParcelWithOwner>, ServiceError>;
    async fn list_by_customer(&self, customer_id: Uuid) -> Result<Vec<parcel::Model>, ServiceError>;
    async fn get(&self, id: Uuid) -> Result<Option<parcel::Model>, ServiceError>;
    async fn get_with_owner(&self, id: Uuid) -> Result<Option<ParcelWithOwner>, ServiceError>;
    /// Parcels whose id is in `ids`; missing ids are ignored.
    async fn find_many(&self, ids: &[Uuid]) -> Result<Vec<parcel::Model>, ServiceError>;
    async fn insert(&self, parcel: parcel::Model) -> Result<parcel::Model, ServiceError>;
    async fn update(&self, parcel: parcel::Model) -> Result<parcel::Model, ServiceError>;
    async fn delete(&self, id: Uuid) -> Result<bool, ServiceError>;
}

pub struct SeaOrmParcelRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmParcelRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

#[async_trait]
impl ParcelRepository for SeaOrmParcelRepository {
    async fn list_with_owner(&self) -> Result<Vec<ParcelWithOwner>, ServiceError> {
        Ok(parcel::Entity::find()
            .find_also_related(user::Entity)
            .order_by_asc(parcel::Column::CreatedAt)
            .all(&self.db)
            .await?)
    }

    async fn list_by_customer(&self, customer_id: Uuid) -> Result<Vec<parcel::Model>, ServiceError> {
        Ok(parcel::Entity::find()
            .filter(parcel::Column::CustomerId.eq(customer_id))
            .order_by_asc(parcel::Column::CreatedAt)
            .all(&self.db)
            .await?)
    }

    async fn get(&self, id: Uuid) -> Result<Option<parcel::Model>, ServiceError> {
        Ok(parcel::Entity::find_by_id(id).one(&self.db).await?)
    }

    async fn get_with_owner(&self, id: Uuid) -> Result<Option<ParcelWithOwner>, ServiceError> {
        Ok(parcel::Entity::find_by_id(id).find_also_related(user::Entity).one(&self.db).await?)
    }

    async fn find_many(&self, ids: &[Uuid]) -> Result<Vec<parcel::Model>, ServiceError> {
        Ok(parcel::Entity::find()
            .filter(parcel::Column::Id.is_in(ids.to_vec()))
            .all(&self.db)
            .await?)
    }

    async fn insert(&self, parcel: parcel::Model) -> Result<parcel::Model, ServiceError> {
        Ok(parcel.into_active().insert(&self.db).await?)
    }

    async fn update(&self, parcel: parcel::Model) -> Result<parcel::Model, ServiceError> {
        match parcel.into_active().update(&self.db).await {
            Ok(p) => Ok(p),
            Err(DbErr::RecordNotUpdated) => Err(ServiceError::not_found("Parcel")),
            Err(e) => Err(e.into()),
        }
    }

    async fn delete(&self, id: Uuid) -> Result<bool, ServiceError> {
        let res = parcel::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(res.rows_affected > 0)
    }
}
