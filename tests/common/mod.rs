#![allow(dead_code)]

use axum::ServiceExt;
use axum::extract::Request;
use axum_test::TestServer;
use crud_api::infrastructure::Storage;
use crud_api::routes::{RouterOptions, api_router, app_router};
use crud_api::state::AppState;
use std::net::SocketAddr;

pub const TEST_NAME: &str = "Admin";
pub const TEST_EMAIL: &str = "admin@example.com";
pub const TEST_PASSWORD: &str = "correct horse battery staple";

/// State over fresh in-memory storage with one registered user.
pub async fn create_test_state() -> AppState {
    let state = AppState::from_storage(Storage::memory(), "test-signing-secret".to_string());

    state
        .auth_service
        .register_user(TEST_NAME, TEST_EMAIL, TEST_PASSWORD)
        .await
        .unwrap();

    state
}

/// Full router without rate limiting (the test transport has no peer address).
pub async fn create_test_server() -> TestServer {
    let state = create_test_state().await;
    TestServer::new(api_router(state, &RouterOptions::default())).unwrap()
}

/// Application router served over a real socket, as `server::run` does,
/// so rate limiting sees peer addresses.
pub async fn create_app_server(options: RouterOptions) -> TestServer {
    let state = create_test_state().await;
    let app = app_router(state, &options);

    TestServer::new(ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app))
        .unwrap()
}

/// Logs the test user in and returns the bearer token.
pub async fn login(server: &TestServer) -> String {
    let response = server
        .post("/auth/login")
        .json(&serde_json::json!({ "email": TEST_EMAIL, "password": TEST_PASSWORD }))
        .await;

    response.assert_status_ok();

    response.json::<serde_json::Value>()["token"]
        .as_str()
        .unwrap()
        .to_string()
}
