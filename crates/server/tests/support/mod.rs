#![allow(dead_code)]
use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

use models::user::{self, Role};
use service::auth::domain::AuthUser;
use service::auth::repository::AuthRepository;
use service::auth::AuthConfig;
use service::storage::{memory::MemoryStore, Repositories};
use service::Services;

pub struct TestApp {
    pub app: Router,
    pub services: Services,
    pub store: MemoryStore,
}

pub fn test_app() -> TestApp {
    let store = MemoryStore::default();
    let services = Services::new(Repositories::in_memory(store.clone()), AuthConfig::new("test-secret", 1));
    TestApp { app: server::app(services.clone()), services, store }
}

pub struct Caller {
    pub user: AuthUser,
    pub token: String,
}

impl TestApp {
    /// Store an account directly and mint a token for it, skipping password hashing.
    pub async fn caller(&self, role: Role) -> Caller {
        let email = format!("{}_{}@example.com", role, Uuid::new_v4());
        let model = user::new_model(&email, String::new(), role).unwrap();
        let created = self.store.create_user(model).await.unwrap();
        let user = AuthUser::from(created);
        let token = self.services.auth.issue_token(&user).unwrap();
        Caller { user, token }
    }

    pub async fn send(&self, method: &str, uri: &str, token: Option<&str>, body: Option<Value>) -> (StatusCode, Value) {
        let mut req = Request::builder().method(method).uri(uri);
        if let Some(t) = token {
            req = req.header(header::AUTHORIZATION, format!("Bearer {t}"));
        }
        let req = match body {
            Some(json) => req
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(serde_json::to_vec(&json).unwrap()))
                .unwrap(),
            None => req.body(Body::empty()).unwrap(),
        };
        let resp = self.app.clone().oneshot(req).await.unwrap();
        let status = resp.status();
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
        };
        (status, value)
    }

    pub async fn get(&self, uri: &str, token: &str) -> (StatusCode, Value) {
        self.send("GET", uri, Some(token), None).await
    }

    pub async fn post(&self, uri: &str, token: &str, body: Value) -> (StatusCode, Value) {
        self.send("POST", uri, Some(token), Some(body)).await
    }

    pub async fn put(&self, uri: &str, token: &str, body: Value) -> (StatusCode, Value) {
        self.send("PUT", uri, Some(token), Some(body)).await
    }

    pub async fn delete(&self, uri: &str, token: &str) -> (StatusCode, Value) {
        self.send("DELETE", uri, Some(token), None).await
    }
}

pub fn truck_body() -> Value {
    serde_json::json!({
        "driver": "Ravi",
        "route": "Mumbai-Delhi",
        "fuelLevel": 75,
        "location": "Ahmedabad",
        "nextStop": "Jaipur"
    })
}

pub fn parcel_body() -> Value {
    serde_json::json!({ "weight": 5, "source": "Mumbai", "destination": "Delhi" })
}
