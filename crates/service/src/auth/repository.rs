use async_trait::async_trait;
use models::user;
use uuid::Uuid;

use super::errors::AuthError;

/// Persistence seam for user accounts.
#[async_trait]
pub trait AuthRepository: Send + Sync {
    /// `email` is already normalized.
    async fn find_by_email(&self, email: &str) -> Result<Option<user::Model>, AuthError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<user::Model>, AuthError>;
    /// Fails with `Conflict` when the email is taken.
    async fn create_user(&self, user: user::Model) -> Result<user::Model, AuthError>;
}
