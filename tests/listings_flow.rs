mod common;

use axum::http::StatusCode;
use common::{create_listing, desk, register, send};
use serde_json::json;
use uuid::Uuid;

#[tokio::test]
async fn owner_edits_and_stranger_is_forbidden() {
    let app = common::test_app().await;
    let (alice, alice_id) = register(&app, "Alice", "alice@example.com").await;
    let (bob, _) = register(&app, "Bob", "bob@example.com").await;

    let listing = create_listing(&app, &alice, desk()).await;
    assert_eq!(listing["owner_id"], alice_id.as_str());
    assert_eq!(listing["status"], "available");
    let uri = format!("/api/v1/listings/{}", listing["id"].as_str().unwrap());

    let (status, body) = send(
        &app,
        "PATCH",
        &uri,
        Some(&bob),
        Some(json!({ "status": "unavailable" })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["success"], false);
    assert!(body["data"].is_null());

    let (_, unchanged) = send(&app, "GET", &uri, Some(&alice), None).await;
    assert_eq!(unchanged["data"]["status"], "available");

    let (status, body) = send(
        &app,
        "PATCH",
        &uri,
        Some(&alice),
        Some(json!({ "status": "unavailable" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let updated = &body["data"];
    assert_eq!(updated["status"], "unavailable");
    for field in ["title", "description", "price", "condition", "category", "owner_id"] {
        assert_eq!(updated[field], listing[field], "{field} changed");
    }
}

#[tokio::test]
async fn owner_field_in_payload_is_ignored() {
    let app = common::test_app().await;
    let (alice, alice_id) = register(&app, "Alice", "alice@example.com").await;

    let mut payload = desk();
    payload["owner_id"] = json!(Uuid::new_v4());
    let listing = create_listing(&app, &alice, payload).await;

    assert_eq!(listing["owner_id"], alice_id.as_str());
}

#[tokio::test]
async fn create_then_get_round_trips_supplied_fields() {
    let app = common::test_app().await;
    let (alice, _) = register(&app, "Alice", "alice@example.com").await;

    let payload = json!({
        "title": "Camera",
        "description": "Mirrorless body, two lenses",
        "price": 499.5,
        "condition": "new",
        "category": "Electronics",
        "status": "available",
        "pictures": ["https://img.example.com/1.jpg", "https://img.example.com/2.jpg"],
    });
    let created = create_listing(&app, &alice, payload.clone()).await;

    let uri = format!("/api/v1/listings/{}", created["id"].as_str().unwrap());
    let (status, body) = send(&app, "GET", &uri, Some(&alice), None).await;
    assert_eq!(status, StatusCode::OK);
    for (field, value) in payload.as_object().unwrap() {
        assert_eq!(&body["data"][field], value, "{field} differs");
    }
}

#[tokio::test]
async fn non_owner_delete_is_forbidden_and_owner_delete_succeeds() {
    let app = common::test_app().await;
    let (alice, _) = register(&app, "Alice", "alice@example.com").await;
    let (bob, _) = register(&app, "Bob", "bob@example.com").await;
    let listing = create_listing(&app, &alice, desk()).await;
    let id = listing["id"].as_str().unwrap();
    let uri = format!("/api/v1/listings/{id}");

    let (status, _) = send(&app, "DELETE", &uri, Some(&bob), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    let (status, _) = send(&app, "GET", &uri, Some(&alice), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&app, "DELETE", &uri, Some(&alice), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["id"], id);

    let (status, _) = send(&app, "GET", &uri, Some(&alice), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn get_by_id_distinguishes_missing_and_malformed() {
    let app = common::test_app().await;
    let (alice, _) = register(&app, "Alice", "alice@example.com").await;

    let missing = format!("/api/v1/listings/{}", Uuid::new_v4());
    let (status, body) = send(&app, "GET", &missing, Some(&alice), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Listing not found");
    assert!(body["data"].is_null());

    let (status, body) = send(&app, "GET", "/api/v1/listings/not-an-id", Some(&alice), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);

    let (status, _) = send(
        &app,
        "PATCH",
        &missing,
        Some(&alice),
        Some(json!({ "price": 1 })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn empty_store_lists_empty_sequence() {
    let app = common::test_app().await;
    let (status, body) = send(&app, "GET", "/api/v1/listings", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"], json!([]));
    assert!(body["errors"].is_null());
}

#[tokio::test]
async fn create_rejects_invalid_payloads() {
    let app = common::test_app().await;
    let (alice, _) = register(&app, "Alice", "alice@example.com").await;

    let mut long_title = desk();
    long_title["title"] = json!("x".repeat(101));
    let (status, body) = send(&app, "POST", "/api/v1/listings", Some(&alice), Some(long_title)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert!(body["errors"]["title"].is_array());

    let mut negative = desk();
    negative["price"] = json!(-1);
    let (status, body) = send(&app, "POST", "/api/v1/listings", Some(&alice), Some(negative)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["errors"]["price"].is_array());

    let mut bad_category = desk();
    bad_category["category"] = json!("Spaceships");
    let (status, _) = send(&app, "POST", "/api/v1/listings", Some(&alice), Some(bad_category)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(
        &app,
        "POST",
        "/api/v1/listings",
        Some(&alice),
        Some(json!({ "title": "Desk" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["data"].is_null());

    let (status, body) = send(
        &app,
        "PATCH",
        &format!(
            "/api/v1/listings/{}",
            create_listing(&app, &alice, desk()).await["id"].as_str().unwrap()
        ),
        Some(&alice),
        Some(json!({ "description": "" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["errors"]["description"].is_array());
}

#[tokio::test]
async fn writes_require_a_token_but_listing_does_not() {
    let app = common::test_app().await;
    let (alice, _) = register(&app, "Alice", "alice@example.com").await;
    create_listing(&app, &alice, desk()).await;

    let (status, body) = send(&app, "POST", "/api/v1/listings", None, Some(desk())).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "No token provided");

    let (status, body) = send(&app, "GET", "/api/v1/listings", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn list_applies_filters() {
    let app = common::test_app().await;
    let (alice, alice_id) = register(&app, "Alice", "alice@example.com").await;
    let (bob, _) = register(&app, "Bob", "bob@example.com").await;

    create_listing(&app, &alice, desk()).await;
    create_listing(
        &app,
        &bob,
        json!({
            "title": "Road bike",
            "description": "54cm frame",
            "price": 320,
            "condition": "used",
            "category": "Sports",
        }),
    )
    .await;

    let (_, body) = send(&app, "GET", "/api/v1/listings?category=Sports", None, None).await;
    let items = body["data"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["title"], "Road bike");

    let uri = format!("/api/v1/listings?owner_id={alice_id}");
    let (_, body) = send(&app, "GET", &uri, None, None).await;
    let items = body["data"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["title"], "Desk");

    let (_, body) = send(&app, "GET", "/api/v1/listings?max_price=100", None, None).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    let (_, body) = send(&app, "GET", "/api/v1/listings?q=bike", None, None).await;
    assert_eq!(body["data"][0]["title"], "Road bike");

    let (status, body) = send(
        &app,
        "GET",
        "/api/v1/listings?min_price=10&max_price=5",
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn blank_text_is_rejected_and_padding_is_trimmed() {
    let app = common::test_app().await;
    let (alice, _) = register(&app, "Alice", "alice@example.com").await;

    let mut blank = desk();
    blank["title"] = json!("   ");
    let (status, body) = send(&app, "POST", "/api/v1/listings", Some(&alice), Some(blank)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["errors"]["title"].is_array());

    let mut padded = desk();
    padded["title"] = json!("  Desk  ");
    let listing = create_listing(&app, &alice, padded).await;
    assert_eq!(listing["title"], "Desk");

    let uri = format!("/api/v1/listings/{}", listing["id"].as_str().unwrap());
    let (status, body) = send(
        &app,
        "PATCH",
        &uri,
        Some(&alice),
        Some(json!({ "description": "   " })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["errors"]["description"].is_array());

    let (_, body) = send(&app, "GET", &uri, Some(&alice), None).await;
    assert_eq!(body["data"]["description"], "Wood desk");
}
