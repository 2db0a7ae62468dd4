use async_trait::async_trait;
use models::truck;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, QuerySelect, TransactionTrait};
use uuid::Uuid;

use crate::errors::ServiceError;

/// In-place change applied to a stored truck while it is locked.
pub type TruckEdit = Box<dyn FnOnce(&mut truck::Model) -> Result<(), ServiceError> + Send>;

#[async_trait]
pub trait TruckRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<truck::Model>, ServiceError>;
    async fn get(&self, id: Uuid) -> Result<Option<truck::Model>, ServiceError>;
    async fn insert(&self, truck: truck::Model) -> Result<truck::Model, ServiceError>;
    /// Read, edit and write back one truck with no toll recording in between,
    /// so `tollsPaid` and `tollHistory` are never rolled back. Nothing is
    /// written when `edit` fails.
    async fn modify(&self, id: Uuid, edit: TruckEdit) -> Result<truck::Model, ServiceError>;
    /// Returns whether a row was removed.
    async fn delete(&self, id: Uuid) -> Result<bool, ServiceError>;
}

pub struct SeaOrmTruckRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmTruckRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

#[async_trait]
impl TruckRepository for SeaOrmTruckRepository {
    async fn list(&self) -> Result<Vec<truck::Model>, ServiceError> {
        Ok(truck::Entity::find().order_by_asc(truck::Column::CreatedAt).all(&self.db).await?)
    }

    async fn get(&self, id: Uuid) -> Result<Option<truck::Model>, ServiceError> {
        Ok(truck::Entity::find_by_id(id).one(&self.db).await?)
    }

    async fn insert(&self, truck: truck::Model) -> Result<truck::Model, ServiceError> {
        Ok(truck.into_active().insert(&self.db).await?)
    }

    async fn modify(&self, id: Uuid, edit: TruckEdit) -> Result<truck::Model, ServiceError> {
        let txn = self.db.begin().await?;
        // Same row lock as toll recording.
        let mut truck = truck::Entity::find_by_id(id)
            .lock_exclusive()
            .one(&txn)
            .await?
            .ok_or_else(|| ServiceError::not_found("Truck"))?;
        edit(&mut truck)?;
        let updated = truck.into_active().update(&txn).await?;
        txn.commit().await?;
        Ok(updated)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, ServiceError> {
        let res = truck::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(res.rows_affected > 0)
    }
}
