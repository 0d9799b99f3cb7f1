use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use crate::movie::MovieDetails;

/// A rated title in the session's watched list
///
/// Entries are created once the user has committed a non-zero rating and
/// are never modified afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WatchedEntry {
    pub imdb_id: String,
    pub title: String,
    pub year: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub poster_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider_rating: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub runtime_minutes: Option<u32>,
    pub user_rating: u8,
    pub added_at: DateTime<Utc>,
}

impl WatchedEntry {
    /// Build an entry from fetched details and the user's committed rating
    pub fn from_details(details: &MovieDetails, user_rating: u8) -> Self {
        Self {
            imdb_id: details.imdb_id.clone(),
            title: details.title.clone(),
            year: details.year.clone(),
            poster_url: details.poster_url.clone(),
            provider_rating: details.provider_rating,
            runtime_minutes: details.runtime_minutes,
            user_rating,
            added_at: Utc::now(),
        }
    }
}

/// Aggregate statistics over the watched list
///
/// Every average is 0.0 for an empty list. Unknown provider ratings and
/// runtimes are left out of their own averages.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct WatchedSummary {
    pub count: usize,
    pub avg_provider_rating: f64,
    pub avg_user_rating: f64,
    pub avg_runtime_minutes: f64,
}
