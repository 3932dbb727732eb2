mod common;

use axum::http::{Method, StatusCode};
use axum_test::TestServer;
use crud_api::routes::RouterOptions;
use serde_json::{Value, json};

const ALLOWED_ORIGIN: &str = "https://admin.example.com";

async fn app_server() -> TestServer {
    common::create_app_server(RouterOptions {
        rate_limit: true,
        cors_origins: vec![ALLOWED_ORIGIN.to_string()],
    })
    .await
}

#[tokio::test]
async fn test_trailing_slash_reaches_same_handler() {
    let server = app_server().await;

    let login = server
        .post("/auth/login/")
        .json(&json!({ "email": common::TEST_EMAIL, "password": common::TEST_PASSWORD }))
        .await;
    login.assert_status_ok();
    let token = login.json::<Value>()["token"].as_str().unwrap().to_string();

    server
        .post("/crud/pays/")
        .authorization_bearer(&token)
        .json(&json!({ "name": "France", "image": "fr.png" }))
        .await
        .assert_status(StatusCode::CREATED);

    let list = server.get("/crud/pays/").authorization_bearer(&token).await;
    list.assert_status_ok();
    assert_eq!(list.json::<Value>()["data"][0]["name"], "France");

    let show = server.get("/crud/pays/1/").authorization_bearer(&token).await;
    show.assert_status_ok();
    assert_eq!(show.json::<Value>()["data"]["id"], 1);
}

#[tokio::test]
async fn test_protected_route_still_requires_token() {
    let server = app_server().await;

    server
        .get("/crud/membres/")
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_preflight_from_allowed_origin() {
    let server = app_server().await;

    let response = server
        .method(Method::OPTIONS, "/crud/pays")
        .add_header("origin", ALLOWED_ORIGIN)
        .add_header("access-control-request-method", "POST")
        .add_header("access-control-request-headers", "authorization,content-type")
        .await;

    response.assert_status_ok();
    assert_eq!(response.header("access-control-allow-origin"), ALLOWED_ORIGIN);
    assert!(response.maybe_header("access-control-allow-methods").is_some());
}

#[tokio::test]
async fn test_preflight_from_other_origin_gets_no_grant() {
    let server = app_server().await;

    let response = server
        .method(Method::OPTIONS, "/crud/pays")
        .add_header("origin", "https://elsewhere.example.org")
        .add_header("access-control-request-method", "POST")
        .await;

    assert!(response.maybe_header("access-control-allow-origin").is_none());
}

#[tokio::test]
async fn test_health_carries_allowed_origin() {
    let server = app_server().await;

    let response = server
        .get("/health")
        .add_header("origin", ALLOWED_ORIGIN)
        .await;

    response.assert_status_ok();
    assert_eq!(response.header("access-control-allow-origin"), ALLOWED_ORIGIN);
}
