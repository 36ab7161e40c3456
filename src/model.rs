//! Domain types: listings, actions, search filters.

use serde::Serialize;
use sqlx::FromRow;

/// Physical row shape of a per-city listing table. `agent_id` is internal-only
/// and deliberately absent: the select column list never includes it, so it
/// cannot reach a client.
#[derive(Debug, Clone, FromRow)]
pub struct ListingRow {
    pub baths_full: Option<i32>,
    pub beds: Option<i32>,
    pub facts: Option<String>,
    pub hashtags: Option<Vec<String>>,
    pub id: i32,
    pub idx_open_houses: Option<String>,
    pub idx_virtual_tours: Option<String>,
    pub listing_id: String,
    pub pictures: Option<Vec<String>>,
    pub price: Option<i64>,
    pub remarks: Option<String>,
    pub sort_id: Option<String>,
    pub sqft: Option<i32>,
    pub status: Option<String>,
    pub street_name: Option<String>,
    pub street_no: Option<String>,
    pub videos: Option<Vec<String>>,
    pub zip: Option<String>,
}

/// Client-facing listing shape.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    pub baths: Option<i32>,
    pub beds: Option<i32>,
    pub facts: Option<String>,
    pub hashtags: Option<Vec<String>>,
    pub id: i32,
    pub idx_open_houses: Option<String>,
    pub idx_virtual_tours: Option<String>,
    pub listing_id: String,
    pub pictures: Option<Vec<String>>,
    pub price: Option<i64>,
    pub remarks: Option<String>,
    pub sort_id: Option<String>,
    pub sqft: Option<i32>,
    pub status: Option<String>,
    pub street_name: Option<String>,
    pub street_no: Option<String>,
    pub videos: Option<Vec<String>>,
    pub zip: Option<String>,
}

impl From<ListingRow> for Listing {
    fn from(row: ListingRow) -> Self {
        Listing {
            baths: row.baths_full,
            beds: row.beds,
            facts: row.facts,
            hashtags: row.hashtags,
            id: row.id,
            idx_open_houses: row.idx_open_houses,
            idx_virtual_tours: row.idx_virtual_tours,
            listing_id: row.listing_id,
            pictures: row.pictures,
            price: row.price,
            remarks: row.remarks,
            sort_id: row.sort_id,
            sqft: row.sqft,
            status: row.status,
            street_name: row.street_name,
            street_no: row.street_no,
            videos: row.videos,
            zip: row.zip,
        }
    }
}

/// User-triggered event tied to a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    Book,
    Heart,
    Mail,
    Text,
}

impl ActionKind {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "book" => Some(ActionKind::Book),
            "heart" => Some(ActionKind::Heart),
            "mail" => Some(ActionKind::Mail),
            "text" => Some(ActionKind::Text),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ActionKind::Book => "book",
            ActionKind::Heart => "heart",
            ActionKind::Mail => "mail",
            ActionKind::Text => "text",
        }
    }
}

/// Validated `/action` payload. Phone is already normalized to 10 digits.
#[derive(Debug, Clone)]
pub struct ActionRecord {
    pub action: ActionKind,
    pub email: String,
    pub listing_id: String,
    pub name: String,
    pub notes: Option<String>,
    pub phone: String,
}

/// Validated `/search` criteria for one city. Fields at their zero value
/// (0, empty, None) produce no predicate.
#[derive(Debug, Clone, Default)]
pub struct SearchFilter {
    pub baths: u32,
    pub beds: u32,
    pub city_id: String,
    pub hashtags: Vec<String>,
    pub last_id: Option<String>,
    pub max_price: Option<i64>,
    pub min_price: Option<i64>,
    pub max_sqft: Option<i64>,
    pub min_sqft: Option<i64>,
    pub types: Vec<String>,
    pub zip: Option<String>,
}

/// Validated `/update` payload: an agent attaching a video tour.
#[derive(Debug, Clone)]
pub struct VideoUpdate {
    pub agent_id: String,
    pub city_id: String,
    pub listing_id: String,
    /// Stored with the leading `~` marker the player expects.
    pub video: String,
}
