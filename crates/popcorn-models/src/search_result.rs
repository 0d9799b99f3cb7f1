use serde::{Deserialize, Serialize};

/// One row of a provider title search. Replaced wholesale on every new query.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SearchResult {
    pub imdb_id: String,
    pub title: String,
    pub year: String, // Provider text, may be a range such as "2014–2016"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub poster_url: Option<String>, // None when the provider reports "N/A"
}
