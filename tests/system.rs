mod common;

use axum::http::{header, StatusCode};
use common::*;
use tower::ServiceExt;

const CRASH_MESSAGE: &str = "Expected: controller used to showcase what happens when an exception is thrown";

#[tokio::test]
async fn welcome_page() {
    let resp = seeded_app().oneshot(get("/")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert!(body_text(resp).await.contains("<h2>Welcome</h2>"));
}

#[tokio::test]
async fn oups_as_json() {
    let resp = seeded_app().oneshot(get("/oups")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(resp).await;
    assert_eq!(body["status"], 500);
    assert_eq!(body["error"], "Internal Server Error");
    assert_eq!(body["message"], CRASH_MESSAGE);
    assert_eq!(body["path"], "/oups");
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn oups_as_html() {
    let resp = seeded_app()
        .oneshot(get_with("/oups", header::ACCEPT, "text/html,application/xhtml+xml"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let html = body_text(resp).await;
    assert!(html.contains("<h2>Something happened...</h2>"));
    assert!(html.contains(CRASH_MESSAGE));
}

#[tokio::test]
async fn unknown_path_is_not_found() {
    let resp = seeded_app().oneshot(get("/nowhere")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(resp).await["path"], "/nowhere");
}

#[tokio::test]
async fn health_ready_version() {
    let app = seeded_app();
    for uri in ["/health", "/ready"] {
        let resp = app.clone().oneshot(get(uri)).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK, "{}", uri);
        assert_eq!(body_json(resp).await["status"], "ok");
    }
    let resp = app.oneshot(get("/version")).await.unwrap();
    assert_eq!(body_json(resp).await["name"], "petclinic");
}

// --- rejected requests are negotiated like any other error ---

#[tokio::test]
async fn malformed_owner_id_as_html() {
    let resp = seeded_app()
        .oneshot(get_with("/owners/abc", header::ACCEPT, "text/html"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert!(resp.headers()[header::CONTENT_TYPE]
        .to_str()
        .unwrap()
        .starts_with("text/html"));
    let html = body_text(resp).await;
    assert!(html.contains("<h2>Something happened...</h2>"));
    assert!(html.contains("Cannot parse"));
}

#[tokio::test]
async fn malformed_owner_id_as_json() {
    let resp = seeded_app()
        .oneshot(get_with("/owners/abc", header::ACCEPT, "application/json"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = body_json(resp).await;
    assert_eq!(body["status"], 400);
    assert_eq!(body["error"], "Bad Request");
    assert_eq!(body["path"], "/owners/abc");
    assert!(body["message"].as_str().unwrap().contains("Cannot parse"));
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn malformed_page_number_is_negotiated() {
    let resp = seeded_app()
        .oneshot(get_with("/owners?page=abc", header::ACCEPT, "application/json"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = body_json(resp).await;
    assert_eq!(body["path"], "/owners");
    assert!(body["message"].as_str().unwrap().contains("query string"));
}

#[tokio::test]
async fn duplicate_form_field_is_negotiated() {
    let resp = seeded_app()
        .oneshot(form_request("/owners/1/pets/new", "name=a&name=b"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_json(resp).await;
    assert_eq!(body["status"], 422);
    assert_eq!(body["path"], "/owners/1/pets/new");
}

#[tokio::test]
async fn oversized_body_is_negotiated() {
    let payload = format!("lastName={}", "x".repeat(70 * 1024));
    let request = axum::http::Request::builder()
        .method("POST")
        .uri("/owners/new")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .header(header::CONTENT_LENGTH, payload.len())
        .body(payload)
        .unwrap();
    let resp = seeded_app().oneshot(request).await.unwrap();

    assert_eq!(resp.status(), StatusCode::PAYLOAD_TOO_LARGE);
    let body = body_json(resp).await;
    assert_eq!(body["status"], 413);
    assert_eq!(body["path"], "/owners/new");
}
