//! Data model for accounts, trips, and postcards.
//!
//! Wire JSON is camelCase to match the client contract. Response-only
//! projections are explicit structs with constructors rather than ad-hoc
//! JSON maps.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Account record stored in the database
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: String,
    pub display_name: String,
    pub email: String,
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub profile_pic: Option<String>,
    /// Identifiers of accounts this account follows. Never contains
    /// duplicates; the storage layer enforces that.
    pub following: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Public account projection (no password hash)
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountPublicView {
    pub id: String,
    pub display_name: String,
    pub email: String,
    pub following: Vec<String>,
    pub profile_pic: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Account> for AccountPublicView {
    fn from(account: Account) -> Self {
        Self {
            id: account.id,
            display_name: account.display_name,
            email: account.email,
            following: account.following,
            profile_pic: account.profile_pic,
            created_at: account.created_at,
            updated_at: account.updated_at,
        }
    }
}

/// Trip record owned by one traveller
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trip {
    pub id: String,
    pub traveller_id: String,
    pub title: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub revision: i64,
}

/// Trip projection for the aggregated read document, denormalized with
/// the traveller's display name
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TripView {
    pub id: String,
    pub title: String,
    pub description: String,
    pub traveller_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub revision: i64,
    pub traveller_name: String,
}

impl TripView {
    pub fn new(trip: Trip, traveller_name: &str) -> Self {
        Self {
            id: trip.id,
            title: trip.title,
            description: trip.description,
            traveller_id: trip.traveller_id,
            created_at: trip.created_at,
            updated_at: trip.updated_at,
            revision: trip.revision,
            traveller_name: traveller_name.to_string(),
        }
    }
}

/// Postcard record within a trip
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Postcard {
    pub id: String,
    pub trip_id: String,
    pub title: String,
    pub body: String,
    pub lat: f64,
    pub lng: f64,
    pub photos: Vec<String>,
    pub thumbnails: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub revision: i64,
}

/// Postcard projection for the aggregated read document, denormalized
/// with the owning traveller's identifier
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostcardView {
    pub id: String,
    pub title: String,
    pub body: String,
    pub trip_id: String,
    pub lat: f64,
    pub lng: f64,
    pub photos: Vec<String>,
    pub thumbnails: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub revision: i64,
    pub traveller_id: String,
}

impl PostcardView {
    pub fn new(postcard: Postcard, traveller_id: &str) -> Self {
        Self {
            id: postcard.id,
            title: postcard.title,
            body: postcard.body,
            trip_id: postcard.trip_id,
            lat: postcard.lat,
            lng: postcard.lng,
            photos: postcard.photos,
            thumbnails: postcard.thumbnails,
            created_at: postcard.created_at,
            updated_at: postcard.updated_at,
            revision: postcard.revision,
            traveller_id: traveller_id.to_string(),
        }
    }
}
