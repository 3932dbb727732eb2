mod common;

#[tokio::test]
async fn test_health_endpoint_success() {
    let server = common::create_test_server().await;

    let response = server.get("/health").await;

    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["checks"]["storage"]["status"], "ok");
    assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_health_endpoint_is_public() {
    let server = common::create_test_server().await;

    let response = server.get("/health").await;

    response.assert_status_ok();
}
