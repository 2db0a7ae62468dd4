use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, SqlErr};
use uuid::Uuid;

use models::user;

use crate::auth::errors::AuthError;
use crate::auth::repository::AuthRepository;

pub struct SeaOrmAuthRepository {
    pub db: DatabaseConnection,
}

#[async_trait::async_trait]
impl AuthRepository for SeaOrmAuthRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<user::Model>, AuthError> {
        let res = user::Entity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await?;
        Ok(res)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<user::Model>, AuthError> {
        Ok(user::Entity::find_by_id(id).one(&self.db).await?)
    }

    async fn create_user(&self, user: user::Model) -> Result<user::Model, AuthError> {
        match user.into_active().insert(&self.db).await {
            Ok(created) => Ok(created),
            Err(e) if is_unique_violation(&e) => Err(AuthError::Conflict),
            Err(e) => Err(e.into()),
        }
    }
}

fn is_unique_violation(e: &DbErr) -> bool {
    matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}
