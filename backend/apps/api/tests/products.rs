mod common;

use axum::http::StatusCode;
use serde_json::{Value, json};

use common::{TestApp, app, login, register, request, send};

async fn session(app: &TestApp, email: &str) -> String {
    register(app, email, "password1").await.session_cookie()
}

async fn create_widget(app: &TestApp, cookie: &str) -> Value {
    let response = send(
        app,
        request(
            "POST",
            "/api/v1/products",
            Some(json!({ "name": "Widget", "price": "9.99", "stock": 3 })),
            Some(cookie),
        ),
    )
    .await;
    assert_eq!(response.status, StatusCode::CREATED);
    response.body["data"].clone()
}

#[tokio::test]
async fn test_end_to_end_scenario() {
    let app = app();

    let registered = register(&app, "a@x.com", "password1").await;
    assert_eq!(registered.status, StatusCode::CREATED);

    let logged_in = login(&app, "a@x.com", "password1").await;
    assert_eq!(logged_in.status, StatusCode::OK);
    let alice = logged_in.session_cookie();

    let widget = create_widget(&app, &alice).await;
    assert!(widget["id"].as_str().is_some());
    assert_eq!(widget["name"], "Widget");
    assert_eq!(widget["price"], "9.99");
    assert_eq!(widget["stock"], 3);
    assert!(widget["description"].is_null());

    let uri = format!("/api/v1/products/{}", widget["id"].as_str().unwrap());
    let bob = session(&app, "b@x.com").await;

    let foreign = send(&app, request("GET", &uri, None, Some(&bob))).await;
    assert_eq!(foreign.status, StatusCode::NOT_FOUND);
    assert_eq!(foreign.body, json!({ "error": "product not found" }));

    let own = send(&app, request("GET", &uri, None, Some(&alice))).await;
    assert_eq!(own.status, StatusCode::OK);
    assert_eq!(own.body["data"], widget);
}

#[tokio::test]
async fn test_cross_user_writes_are_not_found() {
    let app = app();
    let alice = session(&app, "a@x.com").await;
    let bob = session(&app, "b@x.com").await;
    let widget = create_widget(&app, &alice).await;
    let uri = format!("/api/v1/products/{}", widget["id"].as_str().unwrap());

    let update = send(
        &app,
        request(
            "PUT",
            &uri,
            Some(json!({ "name": "Stolen", "price": "0" })),
            Some(&bob),
        ),
    )
    .await;
    assert_eq!(update.status, StatusCode::NOT_FOUND);

    let delete = send(&app, request("DELETE", &uri, None, Some(&bob))).await;
    assert_eq!(delete.status, StatusCode::NOT_FOUND);

    let listed = send(&app, request("GET", "/api/v1/products", None, Some(&bob))).await;
    assert_eq!(listed.body, json!({ "data": [] }));

    let own = send(&app, request("GET", &uri, None, Some(&alice))).await;
    assert_eq!(own.body["data"]["name"], "Widget");
    assert_eq!(app.products.len(), 1);
}

#[tokio::test]
async fn test_update_and_delete() {
    let app = app();
    let alice = session(&app, "a@x.com").await;
    let widget = create_widget(&app, &alice).await;
    let uri = format!("/api/v1/products/{}", widget["id"].as_str().unwrap());

    let updated = send(
        &app,
        request(
            "PUT",
            &uri,
            Some(json!({ "name": "Gadget", "description": "shiny", "price": 12.5, "stock": 7 })),
            Some(&alice),
        ),
    )
    .await;
    assert_eq!(updated.status, StatusCode::OK);
    assert_eq!(updated.body["data"]["name"], "Gadget");
    assert_eq!(updated.body["data"]["description"], "shiny");
    assert_eq!(updated.body["data"]["price"], "12.50");
    assert_eq!(updated.body["data"]["created_at"], widget["created_at"]);

    let deleted = send(&app, request("DELETE", &uri, None, Some(&alice))).await;
    assert_eq!(deleted.status, StatusCode::NO_CONTENT);
    assert!(deleted.text.is_empty());

    let again = send(&app, request("DELETE", &uri, None, Some(&alice))).await;
    assert_eq!(again.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_product_routes_require_session() {
    let app = app();

    let missing = send(&app, request("GET", "/api/v1/products", None, None)).await;
    assert_eq!(missing.status, StatusCode::UNAUTHORIZED);
    assert_eq!(missing.body, json!({ "error": "unauthorized" }));

    let forged = send(
        &app,
        request(
            "POST",
            "/api/v1/products",
            Some(json!({ "name": "Widget", "price": "1" })),
            Some("auth_token=eyJhbGciOiJub25lIn0.e30."),
        ),
    )
    .await;
    assert_eq!(forged.status, StatusCode::UNAUTHORIZED);
    assert!(app.products.is_empty());
}

#[tokio::test]
async fn test_invalid_product_is_unprocessable() {
    let app = app();
    let alice = session(&app, "a@x.com").await;

    let response = send(
        &app,
        request(
            "POST",
            "/api/v1/products",
            Some(json!({ "name": "Widget", "price": "9.999", "stock": -1 })),
            Some(&alice),
        ),
    )
    .await;

    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        response.body["fields"],
        json!([
            { "field": "price", "message": "must have at most 2 decimal places" },
            { "field": "stock", "message": "must be at least 0" },
        ])
    );
    assert!(app.products.is_empty());
}
