#![allow(dead_code)]

use axum::http::{self, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use petclinic::{app, AppState, MemoryStore, Settings};

/// Router over the seeded in-memory clinic.
pub fn seeded_app() -> Router {
    app(AppState::new(MemoryStore::seeded(), Settings::default()))
}

pub fn get(uri: &str) -> Request<String> {
    Request::builder().uri(uri).body(String::new()).unwrap()
}

pub fn get_with(uri: &str, header: http::header::HeaderName, value: &str) -> Request<String> {
    Request::builder()
        .uri(uri)
        .header(header, value)
        .body(String::new())
        .unwrap()
}

pub fn form_request(uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(body.to_string())
        .unwrap()
}

pub async fn body_text(response: Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub fn location(response: &Response) -> &str {
    response.headers()[http::header::LOCATION].to_str().unwrap()
}
