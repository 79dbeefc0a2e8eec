mod common;

use axum_test::TestServer;
use qrlink::routes::router;
use serde_json::Value;

#[tokio::test]
async fn test_health_ok() {
    let dir = tempfile::tempdir().unwrap();
    let ctx = common::create_test_state(dir.path());
    let server = TestServer::new(router(ctx.state.clone())).unwrap();

    let response = server.get("/health").await;

    assert_eq!(response.status_code(), 200);

    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    assert_eq!(body["checks"]["database"]["status"], "ok");
    assert_eq!(body["checks"]["content_dir"]["status"], "ok");
}

#[tokio::test]
async fn test_health_database_unavailable() {
    let dir = tempfile::tempdir().unwrap();
    let ctx = common::create_test_state(dir.path());
    ctx.links.set_unreachable(true);
    let server = TestServer::new(router(ctx.state.clone())).unwrap();

    let response = server.get("/health").await;

    assert_eq!(response.status_code(), 503);

    let body: Value = response.json();
    assert_eq!(body["status"], "degraded");
    assert_eq!(body["checks"]["database"]["status"], "error");
    assert_eq!(body["checks"]["content_dir"]["status"], "ok");
}

#[tokio::test]
async fn test_health_content_dir_missing() {
    let dir = tempfile::tempdir().unwrap();
    let ctx = common::create_test_state(&dir.path().join("missing"));
    let server = TestServer::new(router(ctx.state.clone())).unwrap();

    let response = server.get("/health").await;

    assert_eq!(response.status_code(), 503);

    let body: Value = response.json();
    assert_eq!(body["checks"]["database"]["status"], "ok");
    assert_eq!(body["checks"]["content_dir"]["status"], "error");
}
