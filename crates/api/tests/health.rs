mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use common::{body_json, get};
use sqlx::PgPool;
use tower::ServiceExt;

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_health_reports_db_and_languages(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/health").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key("x-request-id"));

    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["db_healthy"], true);
    assert_eq!(json["languages"], serde_json::json!(["en", "ka", "ru"]));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_languages_endpoint(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/languages").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["default_language"], "en");
    assert_eq!(json["data"]["supported"], serde_json::json!(["en", "ka", "ru"]));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_unknown_route_returns_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/nope").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_request_id_is_propagated(pool: PgPool) {
    let app = common::build_test_app(pool);
    let request = Request::get("/api/v1/languages")
        .header("x-request-id", "sync-run-7")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["x-request-id"], "sync-run-7");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_cors_preflight_allows_configured_origin(pool: PgPool) {
    let app = common::build_test_app(pool);
    let request = Request::options("/api/v1/partners/1/translations/en")
        .header("origin", "http://localhost:5173")
        .header("access-control-request-method", "PUT")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    let headers = response.headers();
    assert_eq!(
        headers["access-control-allow-origin"],
        "http://localhost:5173"
    );
    let methods = headers["access-control-allow-methods"].to_str().unwrap();
    assert!(methods.contains("PUT"));
    assert!(!methods.contains("PATCH"));
}
