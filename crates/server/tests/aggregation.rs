use std::sync::Arc;
use std::time::Duration;

use server::auth::token::TokenIssuer;
use server::auth::AccountManager;
use server::error::Error;
use server::models::Account;
use server::store;
use server::trips::TripStore;
use tempfile::{tempdir, TempDir};

async fn setup() -> (TempDir, AccountManager, TripStore) {
    let dir = tempdir().unwrap();
    let pool = store::connect(&dir.path().join("test.sqlite"))
        .await
        .unwrap();
    let tokens = Arc::new(TokenIssuer::new("wayfarer-test-secret"));
    let auth = AccountManager::new(pool.clone(), tokens);
    let trips = TripStore::new(pool);
    (dir, auth, trips)
}

async fn register(auth: &AccountManager, name: &str, email: &str) -> Account {
    let (account, _) = auth
        .register(name.to_string(), email.to_string(), "secret123".to_string())
        .await
        .unwrap();
    account
}

#[tokio::test]
async fn test_aggregate_zero_trips() {
    let (_dir, auth, trips) = setup().await;
    let alice = register(&auth, "Alice", "alice@example.com").await;

    let document = trips.aggregate(&alice.id).await.unwrap();
    assert!(document.trips.is_empty());
    assert!(document.postcards.is_empty());
    assert_eq!(document.user.id, alice.id);
    assert_eq!(document.user.display_name, "Alice");
}

#[tokio::test]
async fn test_aggregate_projection_excludes_password_hash() {
    let (_dir, auth, trips) = setup().await;
    let alice = register(&auth, "Alice", "alice@example.com").await;

    let document = trips.aggregate(&alice.id).await.unwrap();
    let user = serde_json::to_value(&document.user).unwrap();
    assert!(user.get("passwordHash").is_none());
    assert!(user.get("password_hash").is_none());
}

#[tokio::test]
async fn test_aggregate_one_trip_two_postcards() {
    let (_dir, auth, trips) = setup().await;
    let alice = register(&auth, "Alice", "alice@example.com").await;

    let trip = trips
        .create_trip(&alice.id, "Norway", "Fjords and ferries")
        .await
        .unwrap();
    trips
        .create_postcard(
            &trip.id,
            "Bergen",
            "Rainy but beautiful",
            60.39,
            5.32,
            vec!["https://pics.example.com/bergen.jpg".to_string()],
            vec![],
        )
        .await
        .unwrap();
    trips
        .create_postcard(
            &trip.id,
            "Oslo",
            "Museums all day",
            59.91,
            10.75,
            vec![],
            vec![],
        )
        .await
        .unwrap();

    let document = trips.aggregate(&alice.id).await.unwrap();
    assert_eq!(document.trips.len(), 1);
    assert_eq!(document.postcards.len(), 2);

    let trip_view = document.trips.get(&trip.id).unwrap();
    assert_eq!(trip_view.traveller_name, "Alice");
    assert_eq!(trip_view.traveller_id, alice.id);

    for postcard in document.postcards.values() {
        assert_eq!(postcard.traveller_id, alice.id);
        assert_eq!(postcard.trip_id, trip.id);
    }
}

#[tokio::test]
async fn test_aggregate_unknown_account() {
    let (_dir, _auth, trips) = setup().await;

    let result = trips.aggregate("missing-id").await;
    assert!(matches!(result, Err(Error::AccountNotFound)));
}

#[tokio::test]
async fn test_trips_ordered_newest_first() {
    let (_dir, auth, trips) = setup().await;
    let alice = register(&auth, "Alice", "alice@example.com").await;

    let first = trips
        .create_trip(&alice.id, "Norway", "Fjords")
        .await
        .unwrap();
    tokio::time::sleep(Duration::from_millis(50)).await;
    let second = trips
        .create_trip(&alice.id, "Japan", "Trains")
        .await
        .unwrap();

    let listed = trips.trips_for_traveller(&alice.id).await.unwrap();
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].id, second.id);
    assert_eq!(listed[1].id, first.id);
}

#[tokio::test]
async fn test_postcards_ordered_newest_first() {
    let (_dir, auth, trips) = setup().await;
    let alice = register(&auth, "Alice", "alice@example.com").await;
    let trip = trips
        .create_trip(&alice.id, "Norway", "Fjords")
        .await
        .unwrap();

    let first = trips
        .create_postcard(&trip.id, "Bergen", "Rainy", 60.39, 5.32, vec![], vec![])
        .await
        .unwrap();
    tokio::time::sleep(Duration::from_millis(50)).await;
    let second = trips
        .create_postcard(&trip.id, "Oslo", "Sunny", 59.91, 10.75, vec![], vec![])
        .await
        .unwrap();

    let listed = trips.postcards_for_trip(&trip.id).await.unwrap();
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].id, second.id);
    assert_eq!(listed[1].id, first.id);
}

#[tokio::test]
async fn test_postcard_photos_round_trip() {
    let (_dir, auth, trips) = setup().await;
    let alice = register(&auth, "Alice", "alice@example.com").await;
    let trip = trips
        .create_trip(&alice.id, "Norway", "Fjords")
        .await
        .unwrap();

    let photos = vec![
        "https://pics.example.com/a.jpg".to_string(),
        "https://pics.example.com/b.jpg".to_string(),
    ];
    let thumbnails = vec!["https://pics.example.com/a-thumb.jpg".to_string()];
    trips
        .create_postcard(&trip.id, "Bergen", "Rainy", 60.39, 5.32, photos.clone(), thumbnails.clone())
        .await
        .unwrap();

    let listed = trips.postcards_for_trip(&trip.id).await.unwrap();
    assert_eq!(listed[0].photos, photos);
    assert_eq!(listed[0].thumbnails, thumbnails);
}
