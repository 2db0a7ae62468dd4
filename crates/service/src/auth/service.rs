use std::sync::Arc;

use argon2::{Argon2, password_hash::{PasswordHasher, PasswordVerifier, SaltString}, PasswordHash};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header as JwtHeader, Validation};
use models::user;
use rand::rngs::OsRng;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use super::domain::{AuthSession, AuthUser, Claims, LoginInput, RegisterInput};
use super::errors::AuthError;
use super::repository::AuthRepository;

pub const MIN_PASSWORD_LEN: usize = 8;

/// Auth service configuration
#[derive(Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub token_ttl: Duration,
}

impl AuthConfig {
    pub fn new(jwt_secret: impl Into<String>, token_ttl_hours: i64) -> Self {
        Self { jwt_secret: jwt_secret.into(), token_ttl: Duration::hours(token_ttl_hours) }
    }
}

/// Auth business service independent of web framework
#[derive(Clone)]
pub struct AuthService {
    repo: Arc<dyn AuthRepository>,
    cfg: AuthConfig,
}

impl AuthService {
    pub fn new(repo: Arc<dyn AuthRepository>, cfg: AuthConfig) -> Self { Self { repo, cfg } }

    /// Register a new account and hand back a token for it.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use service::auth::{AuthConfig, AuthService, domain::RegisterInput};
    /// use service::storage::memory::MemoryStore;
    /// let svc = AuthService::new(Arc::new(MemoryStore::default()), AuthConfig::new("secret", 1));
    /// let input = RegisterInput { email: "User@Example.com".into(), password: "password123".into(), role: None };
    /// let session = tokio_test::block_on(svc.register(input)).unwrap();
    /// assert_eq!(session.user.email, "user@example.com");
    /// assert_eq!(session.user.role.as_str(), "customer");
    /// ```
    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn register(&self, input: RegisterInput) -> Result<AuthSession, AuthError> {
        user::validate_email(&input.email).map_err(|e| AuthError::Validation(e.to_string()))?;
        if input.password.len() < MIN_PASSWORD_LEN {
            return Err(AuthError::Validation(format!("Password must be at least {MIN_PASSWORD_LEN} characters")));
        }
        let email = user::normalize_email(&input.email);
        if let Some(existing) = self.repo.find_by_email(&email).await? {
            debug!("user exists: {}", existing.email);
            return Err(AuthError::Conflict);
        }

        let hash = hash_password(input.password).await?;
        let model = user::new_model(&email, hash, input.role.unwrap_or_default())
            .map_err(|e| AuthError::Validation(e.to_string()))?;
        let created = self.repo.create_user(model).await?;
        info!(user_id = %created.id, role = %created.role, "user_registered");

        let user = AuthUser::from(created);
        let token = self.issue_token(&user)?;
        Ok(AuthSession { user, token })
    }

    /// Check credentials and issue a token.
    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn login(&self, input: LoginInput) -> Result<AuthSession, AuthError> {
        let email = user::normalize_email(&input.email);
        let found = self.repo.find_by_email(&email).await?.ok_or(AuthError::Unauthorized)?;

        if !verify_password(input.password, found.password_hash.clone()).await? {
            warn!(user_id = %found.id, "login_rejected");
            return Err(AuthError::Unauthorized);
        }

        let user = AuthUser::from(found);
        let token = self.issue_token(&user)?;
        info!(user_id = %user.id, "user_logged_in");
        Ok(AuthSession { user, token })
    }

    pub fn issue_token(&self, user: &AuthUser) -> Result<String, AuthError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user.id.to_string(),
            role: user.role,
            iat: now.timestamp(),
            exp: (now + self.cfg.token_ttl).timestamp(),
        };
        encode(&JwtHeader::default(), &claims, &EncodingKey::from_secret(self.cfg.jwt_secret.as_bytes()))
            .map_err(|e| AuthError::TokenError(e.to_string()))
    }

    pub fn verify_token(&self, token: &str) -> Result<Claims, AuthError> {
        decode::<Claims>(token, &DecodingKey::from_secret(self.cfg.jwt_secret.as_bytes()), &Validation::default())
            .map(|data| data.claims)
            .map_err(|e| AuthError::TokenError(e.to_string()))
    }

    /// Verify a token and load the account it names. The role comes from the
    /// stored user, not from the claims.
    pub async fn resolve(&self, token: &str) -> Result<AuthUser, AuthError> {
        let claims = self.verify_token(token)?;
        let id = Uuid::parse_str(&claims.sub).map_err(|e| AuthError::TokenError(e.to_string()))?;
        let user = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AuthError::TokenError("user no longer exists".into()))?;
        Ok(AuthUser::from(user))
    }
}

async fn hash_password(password: String) -> Result<String, AuthError> {
    tokio::task::spawn_blocking(move || {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|h| h.to_string())
            .map_err(|e| AuthError::HashError(e.to_string()))
    })
    .await
    .map_err(|e| AuthError::HashError(e.to_string()))?
}

async fn verify_password(password: String, stored: String) -> Result<bool, AuthError> {
    tokio::task::spawn_blocking(move || {
        let parsed = PasswordHash::new(&stored).map_err(|e| AuthError::HashError(e.to_string()))?;
        Ok(Argon2::default().verify_password(password.as_bytes(), &parsed).is_ok())
    })
    .await
    .map_err(|e| AuthError::HashError(e.to_string()))?
}
