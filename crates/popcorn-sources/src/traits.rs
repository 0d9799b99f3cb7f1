use async_trait::async_trait;
use popcorn_models::{MovieDetails, SearchResult};
use crate::error::ProviderError;

/// A remote movie-metadata service reachable over HTTP
#[async_trait]
pub trait MovieProvider: Send + Sync {
    fn provider_name(&self) -> &str;

    /// Search titles by free text. Results keep the provider's order.
    async fn search(&self, query: &str) -> Result<Vec<SearchResult>, ProviderError>;

    /// Fetch extended metadata for a single title
    async fn get_details(&self, imdb_id: &str) -> Result<MovieDetails, ProviderError>;
}
