mod common;

use marketplace_api::{
    client::{ClientError, MarketplaceClient},
    dto::{
        account::UpdateAccountRequest,
        auth::{LoginRequest, RegisterRequest},
        listings::{CreateListingRequest, ListingQuery, UpdateListingRequest},
    },
    entity::enums::{Category, ItemCondition, ListingStatus},
};
use reqwest::StatusCode;
use uuid::Uuid;

async fn spawn_server() -> String {
    let app = common::test_app().await;
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

fn registration(email: &str) -> RegisterRequest {
    RegisterRequest {
        first_name: "Ada".into(),
        last_name: "Tester".into(),
        email: email.into(),
        password: "password123".into(),
    }
}

fn lamp() -> CreateListingRequest {
    CreateListingRequest {
        title: "Lamp".into(),
        description: "Brass desk lamp".into(),
        price: 25.0,
        condition: ItemCondition::Used,
        category: Category::Home,
        status: None,
        pictures: vec!["https://img.example.com/lamp.jpg".into()],
    }
}

#[tokio::test]
async fn client_drives_a_full_session() {
    let base = spawn_server().await;
    let mut client = MarketplaceClient::new(&base).unwrap();

    let auth = client.register(&registration("ada@example.com")).await.unwrap();
    assert_eq!(client.token(), Some(auth.token.as_str()));

    let me = client.account().await.unwrap();
    assert_eq!(me.id, auth.user.id);

    let renamed = client
        .update_account(&UpdateAccountRequest {
            first_name: Some("Augusta".into()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(renamed.first_name, "Augusta");

    let listing = client.create_listing(&lamp()).await.unwrap();
    assert_eq!(listing.owner_id, me.id);
    assert_eq!(listing.status, ListingStatus::Available);

    let fetched = client.listing(listing.id).await.unwrap();
    assert_eq!(fetched.id, listing.id);
    assert_eq!(fetched.pictures, listing.pictures);

    let updated = client
        .update_listing(
            listing.id,
            &UpdateListingRequest {
                price: Some(20.0),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.price, 20.0);
    assert_eq!(updated.title, "Lamp");

    let found = client
        .listings(&ListingQuery {
            category: Some(Category::Home),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(found.len(), 1);
    assert!(
        client
            .listings(&ListingQuery {
                category: Some(Category::Toys),
                ..Default::default()
            })
            .await
            .unwrap()
            .is_empty()
    );

    let favorite = client.add_favorite(listing.id).await.unwrap();
    let favorites = client.favorites().await.unwrap();
    assert_eq!(favorites.len(), 1);
    assert_eq!(favorites[0].favorite, favorite);
    assert_eq!(favorites[0].listing.as_ref().map(|l| l.id), Some(listing.id));

    let detail = client.favorite(favorite.id).await.unwrap();
    assert_eq!(detail.favorite.id, favorite.id);

    assert_eq!(client.remove_favorite(favorite.id).await.unwrap().id, favorite.id);
    assert_eq!(client.my_listings().await.unwrap().len(), 1);
    assert_eq!(client.delete_listing(listing.id).await.unwrap().id, listing.id);

    client.logout();
    let again = client
        .login(&LoginRequest {
            email: "ada@example.com".into(),
            password: "password123".into(),
        })
        .await
        .unwrap();
    assert_eq!(again.user.id, me.id);

    let deleted = client.delete_account().await.unwrap();
    assert_eq!(deleted.id, me.id);
    assert!(client.token().is_none());
}

#[tokio::test]
async fn failures_surface_the_envelope_message() {
    let base = spawn_server().await;
    let mut client = MarketplaceClient::new(format!("{base}/")).unwrap();

    let err = client.account().await.unwrap_err();
    assert_eq!(err.status(), Some(StatusCode::UNAUTHORIZED));
    assert_eq!(err.to_string(), "No token provided");

    let err = client
        .login(&LoginRequest {
            email: "ghost@example.com".into(),
            password: "password123".into(),
        })
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Invalid email or password");
    assert!(client.token().is_none());

    client.register(&registration("ada@example.com")).await.unwrap();
    let err = client.listing(Uuid::new_v4()).await.unwrap_err();
    assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));

    let mut bad = lamp();
    bad.title = String::new();
    match client.create_listing(&bad).await.unwrap_err() {
        ClientError::Api {
            status, errors, ..
        } => {
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert!(errors.unwrap()["title"].is_array());
        }
        other => panic!("unexpected error: {other}"),
    }
}
