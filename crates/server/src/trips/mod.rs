//! Trip storage and the aggregated read document.
//!
//! The aggregator joins three collections (account, trips, postcards)
//! into two flat id-keyed lookup tables plus the account's public
//! projection; callers reconstruct the tree client-side through the
//! shared identifiers. Fetches are one round-trip per trip, no batching.

use std::collections::HashMap;

use chrono::Utc;
use serde::Serialize;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::models::{AccountPublicView, Postcard, PostcardView, Trip, TripView};
use crate::store::accounts;

/// Aggregated travel content for one traveller.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateDocument {
    pub user: AccountPublicView,
    pub trips: HashMap<String, TripView>,
    pub postcards: HashMap<String, PostcardView>,
}

/// Raw trip row: id, traveller_id, title, description, created_at,
/// updated_at, revision.
type TripRow = (String, String, String, String, String, String, i64);

/// Raw postcard row: id, trip_id, title, body, lat, lng, photos,
/// thumbnails, created_at, updated_at, revision.
type PostcardRow = (
    String,
    String,
    String,
    String,
    f64,
    f64,
    String,
    String,
    String,
    String,
    i64,
);

fn trip_from_row(row: TripRow) -> Trip {
    let (id, traveller_id, title, description, created_at, updated_at, revision) = row;
    Trip {
        id,
        traveller_id,
        title,
        description,
        created_at: created_at.parse().unwrap_or_else(|_| Utc::now()),
        updated_at: updated_at.parse().unwrap_or_else(|_| Utc::now()),
        revision,
    }
}

fn postcard_from_row(row: PostcardRow) -> Postcard {
    let (id, trip_id, title, body, lat, lng, photos, thumbnails, created_at, updated_at, revision) =
        row;
    Postcard {
        id,
        trip_id,
        title,
        body,
        lat,
        lng,
        photos: serde_json::from_str(&photos).unwrap_or_default(),
        thumbnails: serde_json::from_str(&thumbnails).unwrap_or_default(),
        created_at: created_at.parse().unwrap_or_else(|_| Utc::now()),
        updated_at: updated_at.parse().unwrap_or_else(|_| Utc::now()),
        revision,
    }
}

/// Trip and postcard collections, plus the read-side aggregation.
pub struct TripStore {
    pool: SqlitePool,
}

impl TripStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create_trip(
        &self,
        traveller_id: &str,
        title: &str,
        description: &str,
    ) -> Result<Trip> {
        let now = Utc::now();
        let trip = Trip {
            id: Uuid::new_v4().to_string(),
            traveller_id: traveller_id.to_string(),
            title: title.to_string(),
            description: description.to_string(),
            created_at: now,
            updated_at: now,
            revision: 0,
        };

        sqlx::query(
            "INSERT INTO trips (id, traveller_id, title, description, created_at, updated_at, revision) \
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&trip.id)
        .bind(&trip.traveller_id)
        .bind(&trip.title)
        .bind(&trip.description)
        .bind(trip.created_at.to_rfc3339())
        .bind(trip.updated_at.to_rfc3339())
        .bind(trip.revision)
        .execute(&self.pool)
        .await?;

        Ok(trip)
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn create_postcard(
        &self,
        trip_id: &str,
        title: &str,
        body: &str,
        lat: f64,
        lng: f64,
        photos: Vec<String>,
        thumbnails: Vec<String>,
    ) -> Result<Postcard> {
        let now = Utc::now();
        let postcard = Postcard {
            id: Uuid::new_v4().to_string(),
            trip_id: trip_id.to_string(),
            title: title.to_string(),
            body: body.to_string(),
            lat,
            lng,
            photos,
            thumbnails,
            created_at: now,
            updated_at: now,
            revision: 0,
        };

        sqlx::query(
            "INSERT INTO postcards (id, trip_id, title, body, lat, lng, photos, thumbnails, created_at, updated_at, revision) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&postcard.id)
        .bind(&postcard.trip_id)
        .bind(&postcard.title)
        .bind(&postcard.body)
        .bind(postcard.lat)
        .bind(postcard.lng)
        .bind(serde_json::to_string(&postcard.photos).unwrap_or_else(|_| "[]".to_string()))
        .bind(serde_json::to_string(&postcard.thumbnails).unwrap_or_else(|_| "[]".to_string()))
        .bind(postcard.created_at.to_rfc3339())
        .bind(postcard.updated_at.to_rfc3339())
        .bind(postcard.revision)
        .execute(&self.pool)
        .await?;

        Ok(postcard)
    }

    /// Trips owned by the traveller, newest first.
    pub async fn trips_for_traveller(&self, traveller_id: &str) -> Result<Vec<Trip>> {
        let rows: Vec<TripRow> = sqlx::query_as(
            "SELECT id, traveller_id, title, description, created_at, updated_at, revision \
             FROM trips WHERE traveller_id = ? ORDER BY created_at DESC",
        )
        .bind(traveller_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(trip_from_row).collect())
    }

    /// Postcards within a trip, newest first.
    pub async fn postcards_for_trip(&self, trip_id: &str) -> Result<Vec<Postcard>> {
        let rows: Vec<PostcardRow> = sqlx::query_as(
            "SELECT id, trip_id, title, body, lat, lng, photos, thumbnails, created_at, updated_at, revision \
             FROM postcards WHERE trip_id = ? ORDER BY created_at DESC",
        )
        .bind(trip_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(postcard_from_row).collect())
    }

    /// Assemble the denormalized read document for one traveller.
    ///
    /// A traveller with zero trips (or trips with zero postcards) yields
    /// empty mappings, not an error.
    pub async fn aggregate(&self, traveller_id: &str) -> Result<AggregateDocument> {
        let account = accounts::fetch_account(&self.pool, traveller_id)
            .await?
            .ok_or(Error::AccountNotFound)?;

        let mut trip_views = HashMap::new();
        let mut postcard_views = HashMap::new();

        for trip in self.trips_for_traveller(traveller_id).await? {
            for postcard in self.postcards_for_trip(&trip.id).await? {
                postcard_views.insert(postcard.id.clone(), PostcardView::new(postcard, &account.id));
            }
            trip_views.insert(trip.id.clone(), TripView::new(trip, &account.display_name));
        }

        Ok(AggregateDocument {
            user: account.into(),
            trips: trip_views,
            postcards: postcard_views,
        })
    }
}
