#![allow(dead_code)]

use axum::{Router, routing::get};
use axum_test::TestServer;
use serde_json::{Value, json};
use std::sync::Arc;
use url_masker::api::handlers::health_handler;
use url_masker::api::routes::link_routes;
use url_masker::infrastructure::persistence::InMemoryLinkRepository;
use url_masker::infrastructure::security::Argon2PasswordHasher;
use url_masker::state::AppState;

pub const MASK_PREFIX: &str = "https://mask.ly/";

pub fn create_test_state() -> AppState {
    AppState::new(
        Arc::new(InMemoryLinkRepository::new()),
        Arc::new(Argon2PasswordHasher::new()),
        MASK_PREFIX.to_string(),
    )
}

pub fn test_app(state: AppState) -> Router {
    Router::new()
        .nest("/links", link_routes())
        .route("/health", get(health_handler))
        .with_state(state)
}

pub fn test_server() -> TestServer {
    TestServer::new(test_app(create_test_state())).unwrap()
}

/// Creates a link through the API and returns the response body.
pub async fn create_link(server: &TestServer, url: &str, password: Option<&str>) -> Value {
    let mut body = json!({ "url": url });
    if let Some(password) = password {
        body["password"] = json!(password);
    }

    let response = server.post("/links").json(&body).await;
    response.assert_status(axum::http::StatusCode::CREATED);
    response.json::<Value>()
}
