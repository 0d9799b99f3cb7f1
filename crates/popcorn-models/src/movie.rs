use serde::{Deserialize, Serialize};

/// Extended metadata for a single title, fetched when a search result is selected.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovieDetails {
    pub imdb_id: String,
    pub title: String,
    pub year: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub poster_url: Option<String>,
    /// Runtime as reported by the provider (e.g. "148 min")
    pub runtime: String,
    /// Leading integer of `runtime`, None when the provider has no runtime
    #[serde(skip_serializing_if = "Option::is_none")]
    pub runtime_minutes: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider_rating: Option<f64>,
    pub plot: String,
    pub released: String,
    pub actors: String,
    pub director: String,
    pub genre: String,
}

/// Parse the leading integer of a provider runtime string ("148 min" -> 148)
///
/// Leading whitespace is skipped. Returns None when the text does not start
/// with a digit ("N/A") or the number does not fit in a u32.
pub fn parse_runtime_minutes(runtime: &str) -> Option<u32> {
    let trimmed = runtime.trim_start();
    let end = trimmed
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(trimmed.len());
    if end == 0 {
        return None;
    }
    trimmed[..end].parse().ok()
}
