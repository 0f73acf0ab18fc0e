//! Router tests that run without a database.
//!
//! The pool behind these routers is lazy, so only requests rejected before
//! any query is issued are exercised here.

mod common;

use axum::http::StatusCode;
use axum_test::TestServer;

use common::lazy_router;

#[tokio::test]
async fn test_health_check() {
    let server = TestServer::new(lazy_router()).unwrap();

    let response = server.get("/health").await;

    response.assert_status_ok();
    response.assert_text("OK");
}

#[tokio::test]
async fn test_protected_routes_require_auth() {
    let server = TestServer::new(lazy_router()).unwrap();

    for path in [
        "/api/guardian/status",
        "/api/learners",
        "/api/study/queue?level=tier1&learner_id=00000000-0000-0000-0000-000000000000",
        "/api/words/custom",
        "/api/words/counts",
        "/api/settings",
    ] {
        let response = server.get(path).await;
        response.assert_status(StatusCode::UNAUTHORIZED);
        let body: serde_json::Value = response.json();
        assert_eq!(body["error"], "unauthorized");
    }
}

#[tokio::test]
async fn test_malformed_authorization_header() {
    let server = TestServer::new(lazy_router()).unwrap();

    let response = server
        .get("/api/settings")
        .add_header(
            axum::http::header::AUTHORIZATION,
            axum::http::HeaderValue::from_static("Token abc"),
        )
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
    let body: serde_json::Value = response.json();
    assert_eq!(body["message"], "Unauthorized: Invalid Authorization format");
}
