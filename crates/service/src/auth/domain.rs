use models::user::{self, Role};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::policy::Principal;

/// Registration input. `role` defaults to `customer`.
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterInput {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub role: Option<Role>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

/// Public view of an account; never carries the password hash.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: Uuid,
    pub email: String,
    pub role: Role,
}

impl AuthUser {
    pub fn principal(&self) -> Principal { Principal::new(self.id, self.role) }
}

impl From<user::Model> for AuthUser {
    fn from(u: user::Model) -> Self { Self { id: u.id, email: u.email, role: u.role } }
}

/// Result of a successful register or login.
#[derive(Debug, Clone, Serialize)]
pub struct AuthSession {
    #[serde(flatten)]
    pub user: AuthUser,
    pub token: String,
}

/// JWT payload. `sub` is the user id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub role: Role,
    pub iat: i64,
    pub exp: i64,
}
