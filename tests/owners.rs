mod common;

use axum::http::{header, StatusCode};
use common::*;
use tower::ServiceExt;

const NEW_OWNER: &str = "firstName=Joe&lastName=Bloggs&address=123+Caramel+Street&city=London&telephone=1316761638";

// --- create ---

#[tokio::test]
async fn creation_form_is_empty() {
    let resp = seeded_app().oneshot(get("/owners/new")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let html = body_text(resp).await;
    assert!(html.contains("id=\"add-owner-form\""));
    assert!(html.contains("Add Owner"));
    assert!(!html.contains("has-error"));
}

#[tokio::test]
async fn create_owner_redirects_to_details() {
    let app = seeded_app();
    let resp = app.clone().oneshot(form_request("/owners/new", NEW_OWNER)).await.unwrap();

    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(location(&resp), "/owners/11");

    let resp = app.oneshot(get("/owners/11")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let html = body_text(resp).await;
    assert!(html.contains("Joe Bloggs"));
    assert!(html.contains("123 Caramel Street"));
}

#[tokio::test]
async fn create_owner_without_first_name_is_accepted() {
    let resp = seeded_app()
        .oneshot(form_request(
            "/owners/new",
            "lastName=Bloggs&address=123+Caramel+Street&city=London&telephone=1316761638",
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::FOUND);
}

#[tokio::test]
async fn create_owner_with_missing_fields_reshows_form() {
    let resp = seeded_app()
        .oneshot(form_request("/owners/new", "firstName=Joe&lastName=Bloggs&city=London"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let html = body_text(resp).await;
    assert_eq!(html.matches("form-group has-error").count(), 2);
    assert!(html.contains("must not be blank"));
    assert!(html.contains("value=\"Bloggs\""));
}

#[tokio::test]
async fn create_owner_with_short_telephone_is_rejected() {
    let resp = seeded_app()
        .oneshot(form_request(
            "/owners/new",
            "firstName=Joe&lastName=Bloggs&address=1+Street&city=London&telephone=12345",
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert!(body_text(resp).await.contains("Telephone must be a 10-digit number"));
}

// --- find ---

#[tokio::test]
async fn find_form() {
    let resp = seeded_app().oneshot(get("/owners/find")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let html = body_text(resp).await;
    assert!(html.contains("<h2>Find Owners</h2>"));
    assert!(html.contains("maxlength=\"80\""));
}

#[tokio::test]
async fn empty_search_lists_first_page() {
    let resp = seeded_app().oneshot(get("/owners?page=1")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let html = body_text(resp).await;
    assert!(html.contains("<h2>Owners</h2>"));
    assert!(html.contains("George Franklin"));
    assert!(!html.contains("Jean Coleman"));
    assert!(html.contains("href=\"/owners?page=2\""));
    assert!(html.contains("Page 1 of 2"));
}

#[tokio::test]
async fn second_page_of_owners() {
    let resp = seeded_app().oneshot(get("/owners?page=2")).await.unwrap();

    let html = body_text(resp).await;
    assert!(html.contains("Jean Coleman"));
    assert!(html.contains("Max, Samantha"));
    assert!(!html.contains("George Franklin"));
}

#[tokio::test]
async fn single_match_redirects_to_owner() {
    let resp = seeded_app().oneshot(get("/owners?lastName=Franklin")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(location(&resp), "/owners/1");
}

#[tokio::test]
async fn prefix_search_lists_matches() {
    let resp = seeded_app().oneshot(get("/owners?lastName=Dav")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let html = body_text(resp).await;
    assert!(html.contains("Betty Davis"));
    assert!(html.contains("Harold Davis"));
    assert!(!html.contains("George Franklin"));
}

#[tokio::test]
async fn unknown_surname_reshows_search() {
    let resp = seeded_app()
        .oneshot(get("/owners?lastName=Unknown+Surname"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let html = body_text(resp).await;
    assert!(html.contains("<h2>Find Owners</h2>"));
    assert!(html.contains("has not been found"));
    assert!(html.contains("value=\"Unknown Surname\""));
}

#[tokio::test]
async fn unknown_surname_message_follows_accept_language() {
    let resp = seeded_app()
        .oneshot(get_with("/owners?lastName=Unknown+Surname", header::ACCEPT_LANGUAGE, "de"))
        .await
        .unwrap();

    let html = body_text(resp).await;
    assert!(html.contains("wurde nicht gefunden"));
}

// --- show ---

#[tokio::test]
async fn show_owner_with_pets_and_visits() {
    let resp = seeded_app().oneshot(get("/owners/6")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let html = body_text(resp).await;
    assert!(html.contains("Jean Coleman"));
    assert!(html.contains("105 N. Lake St."));
    // pets by name
    let max = html.find("<dd>Max</dd>").unwrap();
    let samantha = html.find("<dd>Samantha</dd>").unwrap();
    assert!(max < samantha);
    assert!(html.contains("2013-01-03"));
    assert!(html.contains("neutered"));
}

#[tokio::test]
async fn unknown_owner_is_not_found() {
    let resp = seeded_app().oneshot(get("/owners/999")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body = body_json(resp).await;
    assert_eq!(body["status"], 404);
    assert_eq!(body["message"], "Owner not found with id: 999");
    assert_eq!(body["path"], "/owners/999");
}

#[tokio::test]
async fn unknown_owner_page_for_browsers() {
    let resp = seeded_app()
        .oneshot(get_with("/owners/999", header::ACCEPT, "text/html"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let html = body_text(resp).await;
    assert!(html.contains("Something happened..."));
    assert!(html.contains("Owner not found with id: 999"));
}

// --- update ---

#[tokio::test]
async fn update_form_is_prefilled() {
    let resp = seeded_app().oneshot(get("/owners/1/edit")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let html = body_text(resp).await;
    assert!(html.contains("value=\"Franklin\""));
    assert!(html.contains("value=\"6085551023\""));
    assert!(html.contains("Update Owner"));
}

#[tokio::test]
async fn update_owner_redirects_and_persists() {
    let app = seeded_app();
    let resp = app
        .clone()
        .oneshot(form_request(
            "/owners/1/edit",
            "firstName=Joe&lastName=Bloggs&address=123+Caramel+Street&city=London&telephone=1616291589",
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(location(&resp), "/owners/1");

    let html = body_text(app.oneshot(get("/owners/1")).await.unwrap()).await;
    assert!(html.contains("Joe Bloggs"));
    // pets survive an owner update
    assert!(html.contains("<dd>Leo</dd>"));
}

#[tokio::test]
async fn empty_update_keeps_owner() {
    let app = seeded_app();
    let resp = app.clone().oneshot(form_request("/owners/1/edit", "")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(location(&resp), "/owners/1");
    let html = body_text(app.oneshot(get("/owners/1")).await.unwrap()).await;
    assert!(html.contains("George Franklin"));
}

#[tokio::test]
async fn update_with_blank_fields_reshows_form() {
    let resp = seeded_app()
        .oneshot(form_request(
            "/owners/1/edit",
            "firstName=Joe&lastName=Bloggs&address=&telephone=",
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let html = body_text(resp).await;
    assert_eq!(html.matches("form-group has-error").count(), 2);
    assert!(html.contains("Update Owner"));
}

#[tokio::test]
async fn update_with_mismatched_id_is_rejected() {
    let app = seeded_app();
    let resp = app
        .clone()
        .oneshot(form_request("/owners/1/edit", "id=2&lastName=Bloggs"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let html = body_text(resp).await;
    assert!(html.contains("The owner ID in the form does not match the URL."));

    let html = body_text(app.oneshot(get("/owners/1")).await.unwrap()).await;
    assert!(html.contains("George Franklin"));
}

#[tokio::test]
async fn update_unknown_owner_is_not_found() {
    let resp = seeded_app()
        .oneshot(form_request("/owners/999/edit", "lastName=Bloggs"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
