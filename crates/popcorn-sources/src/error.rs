use thiserror::Error;

/// Message shown in place of results when a request fails in transit
pub const FETCH_FAILED_MESSAGE: &str = "Something went wrong with fetching movies";

/// Used when the provider signals "no match" without an error text
pub const NOT_FOUND_MESSAGE: &str = "Movie not found!";

#[derive(Debug, Error)]
pub enum ProviderError {
    /// The provider answered but reported no match
    #[error("{message}")]
    NotFound { message: String },

    /// Non-success HTTP status or transport failure
    #[error("Network error: {message}")]
    Network { message: String },

    /// The body could not be decoded
    #[error("Invalid provider response: {0}")]
    InvalidResponse(String),

    #[error("Provider configuration error: {0}")]
    Configuration(String),
}

impl ProviderError {
    /// Text rendered in place of the result list
    pub fn user_message(&self) -> String {
        match self {
            ProviderError::NotFound { message } => message.clone(),
            ProviderError::Network { .. } | ProviderError::InvalidResponse(_) => {
                FETCH_FAILED_MESSAGE.to_string()
            }
            ProviderError::Configuration(msg) => msg.clone(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ProviderError::NotFound { .. })
    }

    pub fn is_network(&self) -> bool {
        matches!(self, ProviderError::Network { .. })
    }
}

impl From<reqwest::Error> for ProviderError {
    fn from(e: reqwest::Error) -> Self {
        ProviderError::Network {
            message: e.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message() {
        let not_found = ProviderError::NotFound {
            message: "Movie not found!".to_string(),
        };
        assert_eq!(not_found.user_message(), "Movie not found!");
        assert!(not_found.is_not_found());

        let network = ProviderError::Network {
            message: "HTTP 500".to_string(),
        };
        assert_eq!(network.user_message(), FETCH_FAILED_MESSAGE);
        assert!(network.is_network());
        assert_eq!(network.to_string(), "Network error: HTTP 500");
    }
}
