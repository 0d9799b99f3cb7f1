use crate::error::ProviderError;
use crate::omdb::api;
use crate::traits::MovieProvider;
use async_trait::async_trait;
use popcorn_models::{MovieDetails, SearchResult};
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;

/// Connection settings for an OMDb-compatible endpoint
#[derive(Debug, Clone)]
pub struct OmdbSettings {
    pub base_url: String,
    pub api_key: String,
    pub timeout: Option<Duration>,
}

impl OmdbSettings {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

fn create_omdb_client(timeout: Option<Duration>) -> Result<Client, ProviderError> {
    let mut builder = Client::builder().user_agent(concat!("popcorn/", env!("CARGO_PKG_VERSION")));
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    builder
        .build()
        .map_err(|e| ProviderError::Configuration(format!("Failed to build HTTP client: {}", e)))
}

#[derive(Clone)]
pub struct OmdbClient {
    client: Arc<Client>,
    base_url: String,
    api_key: String,
}

impl OmdbClient {
    pub fn new(settings: OmdbSettings) -> Result<Self, ProviderError> {
        let api_key = settings.api_key.trim().to_string();
        if api_key.is_empty() {
            return Err(ProviderError::Configuration("OMDb API key is not set".to_string()));
        }

        let base_url = settings.base_url.trim().to_string();
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(ProviderError::Configuration(format!(
                "OMDb base URL must start with http:// or https://, got '{}'",
                base_url
            )));
        }

        Ok(Self {
            client: Arc::new(create_omdb_client(settings.timeout)?),
            base_url,
            api_key,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl MovieProvider for OmdbClient {
    fn provider_name(&self) -> &str {
        "omdb"
    }

    async fn search(&self, query: &str) -> Result<Vec<SearchResult>, ProviderError> {
        api::search_titles(&self.client, &self.base_url, &self.api_key, query).await
    }

    async fn get_details(&self, imdb_id: &str) -> Result<MovieDetails, ProviderError> {
        api::get_title(&self.client, &self.base_url, &self.api_key, imdb_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_api_key_rejected() {
        let result = OmdbClient::new(OmdbSettings::new("https://www.omdbapi.com/", "  "));
        assert!(matches!(result, Err(ProviderError::Configuration(_))));
    }

    #[test]
    fn test_base_url_scheme_required() {
        let result = OmdbClient::new(OmdbSettings::new("www.omdbapi.com", "key"));
        assert!(matches!(result, Err(ProviderError::Configuration(_))));
    }

    #[test]
    fn test_valid_settings() {
        let client = OmdbClient::new(
            OmdbSettings::new("http://localhost:1234/", "key").with_timeout(Duration::from_secs(3)),
        )
        .unwrap();
        assert_eq!(client.base_url(), "http://localhost:1234/");
        assert_eq!(client.provider_name(), "omdb");
    }
}
