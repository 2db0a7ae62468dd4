use async_trait::async_trait;
use models::{toll, truck};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, QuerySelect, TransactionTrait,
};
use tracing::debug;
use uuid::Uuid;

use crate::errors::ServiceError;

#[async_trait]
pub trait TollRepository: Send + Sync {
    async fn list_with_truck(&self) -> Result<Vec<(toll::Model, Option<truck::Model>)>, ServiceError>;
    async fn list_by_truck(&self, truck_id: Uuid) -> Result<Vec<toll::Model>, ServiceError>;
    /// Store the receipt and charge it to its truck as one unit: either both
    /// the toll row and the truck's total/history change, or neither does.
    async fn record(&self, toll: toll::Model) -> Result<toll::Model, ServiceError>;
}

pub struct SeaOrmTollRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmTollRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

#[async_trait]
impl TollRepository for SeaOrmTollRepository {
    async fn list_with_truck(&self) -> Result<Vec<(toll::Model, Option<truck::Model>)>, ServiceError> {
        Ok(toll::Entity::find()
            .find_also_related(truck::Entity)
            .order_by_asc(toll::Column::Date)
            .all(&self.db)
            .await?)
    }

    async fn list_by_truck(&self, truck_id: Uuid) -> Result<Vec<toll::Model>, ServiceError> {
        Ok(toll::Entity::find()
            .filter(toll::Column::TruckId.eq(truck_id))
            .order_by_asc(toll::Column::Date)
            .all(&self.db)
            .await?)
    }

    async fn record(&self, toll: toll::Model) -> Result<toll::Model, ServiceError> {
        let txn = self.db.begin().await?;
        // Row lock so concurrent tolls on one truck serialize their total update.
        let mut truck = truck::Entity::find_by_id(toll.truck_id)
            .lock_exclusive()
            .one(&txn)
            .await?
            .ok_or_else(|| ServiceError::not_found("Truck"))?;

        let created = toll.into_active().insert(&txn).await?;
        truck.charge_toll(created.ledger_entry());
        truck.into_active().update(&txn).await?;
        txn.commit().await?;
        debug!(toll_id = %created.id, "toll_committed");
        Ok(created)
    }
}
