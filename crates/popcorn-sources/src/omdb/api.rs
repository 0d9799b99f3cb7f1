use crate::error::{ProviderError, NOT_FOUND_MESSAGE};
use popcorn_models::{parse_runtime_minutes, MovieDetails, SearchResult};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

/// OMDb uses this marker for every missing field
const NOT_AVAILABLE: &str = "N/A";

#[derive(Debug, Deserialize)]
struct OmdbSearchResponse {
    #[serde(rename = "Response")]
    response: String,
    #[serde(rename = "Search", default)]
    search: Vec<OmdbSearchItem>,
    #[serde(rename = "Error")]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OmdbSearchItem {
    #[serde(rename = "Title")]
    title: String,
    #[serde(rename = "Year", default)]
    year: String,
    #[serde(rename = "Poster", default)]
    poster: String,
    #[serde(rename = "imdbID")]
    imdb_id: String,
}

// A "False" response carries only Response and Error, so every field defaults
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct OmdbTitle {
    #[serde(rename = "Response")]
    response: String,
    #[serde(rename = "Error")]
    error: Option<String>,
    #[serde(rename = "Title")]
    title: String,
    #[serde(rename = "Year")]
    year: String,
    #[serde(rename = "Poster")]
    poster: String,
    #[serde(rename = "Runtime")]
    runtime: String,
    #[serde(rename = "imdbRating")]
    imdb_rating: String,
    #[serde(rename = "Plot")]
    plot: String,
    #[serde(rename = "Released")]
    released: String,
    #[serde(rename = "Actors")]
    actors: String,
    #[serde(rename = "Director")]
    director: String,
    #[serde(rename = "Genre")]
    genre: String,
    #[serde(rename = "imdbID")]
    imdb_id: String,
}

fn available(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() || trimmed == NOT_AVAILABLE {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn is_true(response: &str) -> bool {
    response.eq_ignore_ascii_case("true")
}

fn not_found(error: Option<String>) -> ProviderError {
    ProviderError::NotFound {
        message: error
            .filter(|e| !e.trim().is_empty())
            .unwrap_or_else(|| NOT_FOUND_MESSAGE.to_string()),
    }
}

/// Decode a search body into results, preserving the provider's order
pub fn parse_search_response(body: &str) -> Result<Vec<SearchResult>, ProviderError> {
    let parsed: OmdbSearchResponse = serde_json::from_str(body)
        .map_err(|e| ProviderError::InvalidResponse(format!("search response: {}", e)))?;

    if !is_true(&parsed.response) {
        return Err(not_found(parsed.error));
    }

    Ok(parsed
        .search
        .into_iter()
        .map(|item| SearchResult {
            imdb_id: item.imdb_id,
            title: item.title,
            year: item.year,
            poster_url: available(&item.poster),
        })
        .collect())
}

/// Decode a fetch-by-id body
///
/// The requested id is used when the body omits `imdbID`.
pub fn parse_details_response(body: &str, requested_id: &str) -> Result<MovieDetails, ProviderError> {
    let parsed: OmdbTitle = serde_json::from_str(body)
        .map_err(|e| ProviderError::InvalidResponse(format!("details response: {}", e)))?;

    // Older responses omit Response on success; only an explicit "False" is a miss
    if parsed.response.eq_ignore_ascii_case("false") {
        return Err(not_found(parsed.error));
    }

    let provider_rating = available(&parsed.imdb_rating).and_then(|r| r.parse::<f64>().ok());
    let runtime_minutes = parse_runtime_minutes(&parsed.runtime);

    Ok(MovieDetails {
        imdb_id: available(&parsed.imdb_id).unwrap_or_else(|| requested_id.to_string()),
        title: parsed.title,
        year: parsed.year,
        poster_url: available(&parsed.poster),
        runtime: parsed.runtime,
        runtime_minutes,
        provider_rating,
        plot: parsed.plot,
        released: parsed.released,
        actors: parsed.actors,
        director: parsed.director,
        genre: parsed.genre,
    })
}

async fn get_body(client: &Client, base_url: &str, params: &[(&str, &str)]) -> Result<String, ProviderError> {
    let response = client
        .get(base_url)
        .query(params)
        .header("Accept", "application/json")
        .send()
        .await?;

    if !response.status().is_success() {
        let status = response.status();
        let error_text = response.text().await.unwrap_or_default();
        warn!(status = %status, "OMDb request failed");
        return Err(ProviderError::Network {
            message: format!("HTTP {} - {}", status, error_text),
        });
    }

    Ok(response.text().await?)
}

/// Search titles (`?s=<query>`)
pub async fn search_titles(
    client: &Client,
    base_url: &str,
    api_key: &str,
    query: &str,
) -> Result<Vec<SearchResult>, ProviderError> {
    debug!(query = %query, "Searching OMDb");
    let body = get_body(client, base_url, &[("apikey", api_key), ("s", query)]).await?;
    let results = parse_search_response(&body)?;
    debug!(query = %query, count = results.len(), "OMDb search returned");
    Ok(results)
}

/// Fetch one title by IMDb id (`?i=<id>`)
pub async fn get_title(
    client: &Client,
    base_url: &str,
    api_key: &str,
    imdb_id: &str,
) -> Result<MovieDetails, ProviderError> {
    debug!(imdb_id = %imdb_id, "Fetching OMDb title");
    let body = get_body(client, base_url, &[("apikey", api_key), ("i", imdb_id)]).await?;
    parse_details_response(&body, imdb_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEARCH_OK: &str = r#"{
        "Search": [
            {"Title": "Interstellar", "Year": "2014", "imdbID": "tt0816692", "Type": "movie", "Poster": "https://m.media-amazon.com/images/M/interstellar.jpg"},
            {"Title": "Interstellar Wars", "Year": "2016", "imdbID": "tt5083736", "Type": "movie", "Poster": "N/A"}
        ],
        "totalResults": "2",
        "Response": "True"
    }"#;

    const DETAILS_OK: &str = r#"{
        "Title": "Interstellar",
        "Year": "2014",
        "Rated": "PG-13",
        "Released": "07 Nov 2014",
        "Runtime": "169 min",
        "Genre": "Adventure, Drama, Sci-Fi",
        "Director": "Christopher Nolan",
        "Actors": "Matthew McConaughey, Anne Hathaway, Jessica Chastain",
        "Plot": "A team of explorers travel through a wormhole in space.",
        "Poster": "https://m.media-amazon.com/images/M/interstellar.jpg",
        "imdbRating": "8.7",
        "imdbID": "tt0816692",
        "Type": "movie",
        "Response": "True"
    }"#;

    #[test]
    fn test_parse_search_preserves_order() {
        let results = parse_search_response(SEARCH_OK).unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].imdb_id, "tt0816692");
        assert_eq!(results[0].title, "Interstellar");
        assert_eq!(results[1].imdb_id, "tt5083736");
        assert!(results[0].poster_url.is_some());
        assert!(results[1].poster_url.is_none());
    }

    #[test]
    fn test_parse_search_not_found_uses_provider_message() {
        let err = parse_search_response(r#"{"Response":"False","Error":"Movie not found!"}"#).unwrap_err();
        match err {
            ProviderError::NotFound { message } => assert_eq!(message, "Movie not found!"),
            other => panic!("Expected NotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_search_not_found_without_error_text() {
        let err = parse_search_response(r#"{"Response":"False"}"#).unwrap_err();
        assert_eq!(err.user_message(), NOT_FOUND_MESSAGE);
    }

    #[test]
    fn test_parse_search_malformed_body() {
        let err = parse_search_response("<html>").unwrap_err();
        assert!(matches!(err, ProviderError::InvalidResponse(_)));
    }

    #[test]
    fn test_parse_details() {
        let details = parse_details_response(DETAILS_OK, "tt0816692").unwrap();
        assert_eq!(details.title, "Interstellar");
        assert_eq!(details.runtime, "169 min");
        assert_eq!(details.runtime_minutes, Some(169));
        assert_eq!(details.provider_rating, Some(8.7));
        assert_eq!(details.director, "Christopher Nolan");
        assert_eq!(details.released, "07 Nov 2014");
    }

    #[test]
    fn test_parse_details_with_missing_values() {
        let body = r#"{"Title":"Obscure","Year":"1999","Runtime":"N/A","imdbRating":"N/A","Poster":"N/A","Response":"True"}"#;
        let details = parse_details_response(body, "tt0000001").unwrap();
        assert_eq!(details.imdb_id, "tt0000001");
        assert!(details.runtime_minutes.is_none());
        assert!(details.provider_rating.is_none());
        assert!(details.poster_url.is_none());
        assert_eq!(details.plot, "");
    }

    #[test]
    fn test_parse_details_incorrect_id() {
        let err = parse_details_response(r#"{"Response":"False","Error":"Incorrect IMDb ID."}"#, "bogus").unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(err.user_message(), "Incorrect IMDb ID.");
    }
}
