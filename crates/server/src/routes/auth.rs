use axum::{
    extract::{Request, State},
    http::{header, StatusCode},
    middleware::Next,
    response::Response,
    Extension, Json,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use tracing::warn;

use service::auth::domain::{AuthSession, AuthUser, LoginInput, RegisterInput};

use crate::errors::{ApiError, AppJson, NO_TOKEN};
use crate::state::ServerState;

pub const AUTH_COOKIE: &str = "auth_token";

fn session_cookie(token: String) -> Cookie<'static> {
    let mut cookie = Cookie::new(AUTH_COOKIE, token);
    cookie.set_path("/");
    cookie.set_http_only(true);
    cookie.set_secure(false);
    cookie.set_same_site(SameSite::Lax);
    cookie
}

#[utoipa::path(post, path = "/api/auth/register", tag = "auth", request_body = crate::openapi::RegisterRequest, responses((status = 201, description = "Registered", body = crate::openapi::SessionDoc), (status = 400, description = "Invalid input or email taken")))]
pub async fn register(
    State(state): State<ServerState>,
    AppJson(input): AppJson<RegisterInput>,
) -> Result<(StatusCode, Json<AuthSession>), ApiError> {
    let session = state.services.auth.register(input).await?;
    Ok((StatusCode::CREATED, Json(session)))
}

#[utoipa::path(post, path = "/api/auth/login", tag = "auth", request_body = crate::openapi::LoginRequest, responses((status = 200, description = "Logged in; also sets the auth_token cookie", body = crate::openapi::SessionDoc), (status = 401, description = "Invalid email or password")))]
pub async fn login(
    State(state): State<ServerState>,
    jar: CookieJar,
    AppJson(input): AppJson<LoginInput>,
) -> Result<(CookieJar, Json<AuthSession>), ApiError> {
    let session = state.services.auth.login(input).await?;
    let jar = jar.add(session_cookie(session.token.clone()));
    Ok((jar, Json(session)))
}

#[utoipa::path(post, path = "/api/auth/logout", tag = "auth", responses((status = 204, description = "Cookie cleared")))]
pub async fn logout(jar: CookieJar) -> (CookieJar, StatusCode) {
    let mut cookie = Cookie::from(AUTH_COOKIE);
    cookie.set_path("/");
    (jar.remove(cookie), StatusCode::NO_CONTENT)
}

#[utoipa::path(get, path = "/api/auth/me", tag = "auth", responses((status = 200, description = "Current account", body = crate::openapi::UserDoc), (status = 401, description = "Not authorized")), security(("bearer" = [])))]
pub async fn me(Extension(user): Extension<AuthUser>) -> Json<AuthUser> {
    Json(user)
}

fn bearer_token(req: &Request) -> Option<String> {
    let value = req.headers().get(header::AUTHORIZATION)?.to_str().ok()?;
    value.strip_prefix("Bearer ").map(|t| t.trim().to_string()).filter(|t| !t.is_empty())
}

/// Resolve the caller from `Authorization: Bearer <token>`, falling back to
/// the `auth_token` cookie, and attach the account and its `Principal` to
/// the request.
pub async fn require_bearer_token_state(
    State(state): State<ServerState>,
    jar: CookieJar,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = bearer_token(&req)
        .or_else(|| jar.get(AUTH_COOKIE).map(|c| c.value().to_string()).filter(|t| !t.is_empty()));
    let Some(token) = token else {
        warn!(path = %req.uri().path(), "missing bearer token and auth_token cookie");
        return Err(ApiError::unauthorized(NO_TOKEN));
    };

    let user = state.services.auth.resolve(&token).await.map_err(|e| {
        warn!(path = %req.uri().path(), err = %e, "token validation failed");
        ApiError::from(e)
    })?;

    req.extensions_mut().insert(user.principal());
    req.extensions_mut().insert(user);
    Ok(next.run(req).await)
}
