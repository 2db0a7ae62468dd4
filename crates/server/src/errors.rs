use axum::extract::rejection::JsonRejection;
use axum::extract::FromRequest;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use models::errors::ModelError;
use service::auth::errors::AuthError;
use service::errors::ServiceError;
use thiserror::Error;
use tracing::{error, warn};

pub const NO_TOKEN: &str = "Not authorized, no token";
pub const TOKEN_FAILED: &str = "Not authorized, token failed";

/// Error response rendered as `{"message": "..."}`.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self { status, message: message.into() }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self { Self::new(StatusCode::UNAUTHORIZED, message) }

    pub fn not_found(message: impl Into<String>) -> Self { Self::new(StatusCode::NOT_FOUND, message) }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            error!(status = %self.status, message = %self.message, "request_failed");
        } else {
            warn!(status = %self.status, message = %self.message, "request_rejected");
        }
        (self.status, Json(serde_json::json!({ "message": self.message }))).into_response()
    }
}

impl From<ServiceError> for ApiError {
    fn from(e: ServiceError) -> Self {
        let status = match &e {
            ServiceError::Validation(_) | ServiceError::Model(ModelError::Validation(_)) => StatusCode::BAD_REQUEST,
            ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
            ServiceError::Forbidden(_) => StatusCode::FORBIDDEN,
            ServiceError::Db(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self::new(status, e.to_string())
    }
}

impl From<AuthError> for ApiError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::Validation(_) | AuthError::Conflict => Self::new(StatusCode::BAD_REQUEST, e.to_string()),
            AuthError::Unauthorized => Self::unauthorized(e.to_string()),
            AuthError::TokenError(_) => Self::unauthorized(TOKEN_FAILED),
            AuthError::HashError(_) | AuthError::Repository(_) => {
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self { Self::new(StatusCode::BAD_REQUEST, rejection.body_text()) }
}

/// `Json` extractor whose rejections use the `{"message"}` error shape.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct AppJson<T>(pub T);

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("database unavailable: {0}")]
    Database(String),
    #[error(transparent)]
    Any(#[from] anyhow::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_errors_map_to_status() {
        let cases = [
            (ServiceError::validation("Please add a route"), StatusCode::BAD_REQUEST),
            (ServiceError::Model(ModelError::validation("bad")), StatusCode::BAD_REQUEST),
            (ServiceError::not_found("Truck"), StatusCode::NOT_FOUND),
            (ServiceError::Forbidden("Not authorized as an admin".into()), StatusCode::FORBIDDEN),
            (ServiceError::Db("connection reset".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, status) in cases {
            assert_eq!(ApiError::from(err).status, status);
        }
    }

    #[test]
    fn messages_are_relayed_verbatim() {
        let e = ApiError::from(ServiceError::not_found("Truck"));
        assert_eq!(e.message, "Truck not found");
        let e = ApiError::from(AuthError::Conflict);
        assert_eq!((e.status, e.message.as_str()), (StatusCode::BAD_REQUEST, "User already exists"));
    }

    #[test]
    fn token_problems_share_one_message() {
        let e = ApiError::from(AuthError::TokenError("ExpiredSignature".into()));
        assert_eq!(e.status, StatusCode::UNAUTHORIZED);
        assert_eq!(e.message, TOKEN_FAILED);
    }
}
