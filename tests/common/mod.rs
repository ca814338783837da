#![allow(dead_code)]

use axum::{
    Router,
    body::Body,
    http::{Request, Response, header},
};
use chrono::Utc;
use hotel_admin::{
    AppConfig, AppState, InMemoryRepository, MockStorageService, create_router,
    auth::{Claims, DEV_USER_HEADER},
    models::{BusinessUnit, BusinessUnitId, Role, User},
    storage::StorageState,
};
use jsonwebtoken::{EncodingKey, Header, encode};
use serde::de::DeserializeOwned;
use std::{
    sync::Arc,
    time::{SystemTime, UNIX_EPOCH},
};
use tower::util::ServiceExt;
use uuid::Uuid;

/// A router over a fresh in-memory store, plus handles to seed it.
pub struct TestApp {
    pub router: Router,
    pub repo: Arc<InMemoryRepository>,
    pub config: AppConfig,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_storage(Arc::new(MockStorageService::new()))
    }

    pub fn with_storage(storage: StorageState) -> Self {
        let repo = Arc::new(InMemoryRepository::new());
        let config = AppConfig::default();
        let router = create_router(AppState {
            repo: repo.clone(),
            storage,
            config: config.clone(),
        });
        Self { router, repo, config }
    }

    /// Seeds a user assigned to `units` in the given order and returns their id.
    pub async fn user_with(&self, units: &[(&str, Role)]) -> Uuid {
        let id = Uuid::new_v4();
        let assignments = units.iter().map(|(bu, role)| (unit(bu), *role)).collect();
        self.repo
            .seed_user(
                User {
                    id,
                    email: format!("{id}@hotel.test"),
                },
                assignments,
            )
            .await;
        id
    }

    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible")
    }
}

pub fn unit(id: &str) -> BusinessUnit {
    BusinessUnit {
        id: BusinessUnitId::from(id),
        name: format!("Hotel {id}"),
        created_at: Utc::now(),
    }
}

/// A request authenticated through the local `x-user-id` header, or anonymous for `None`.
pub fn request(method: &str, path: &str, user: Option<Uuid>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(path);
    if let Some(user) = user {
        builder = builder.header(DEV_USER_HEADER, user.to_string());
    }
    builder.body(Body::empty()).unwrap()
}

pub fn json_request(method: &str, path: &str, user: Option<Uuid>, body: serde_json::Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(path)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(user) = user {
        builder = builder.header(DEV_USER_HEADER, user.to_string());
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub async fn body_json<T: DeserializeOwned>(response: Response<Body>) -> T {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

pub fn location(response: &Response<Body>) -> Option<&str> {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|value| value.to_str().ok())
}

fn now() -> usize {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs() as usize
}

/// An identity-provider token for `user_id`, valid for an hour.
pub fn token_for(user_id: Uuid, email: Option<&str>, config: &AppConfig) -> String {
    sign(user_id, email, now() + 3600, config)
}

pub fn expired_token_for(user_id: Uuid, config: &AppConfig) -> String {
    // Well past the default validation leeway.
    sign(user_id, None, now() - 3600, config)
}

fn sign(user_id: Uuid, email: Option<&str>, exp: usize, config: &AppConfig) -> String {
    let claims = Claims {
        sub: user_id,
        email: email.map(str::to_string),
        exp,
        iat: now(),
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret.as_bytes()),
    )
    .unwrap()
}
