pub mod config;
pub mod credentials;
pub mod paths;

pub use config::{Config, ProviderConfig, RatingConfig, SessionConfig, DEFAULT_OMDB_URL, parse_hex_color};
pub use credentials::{ApiKeySource, CredentialStore, API_KEY_ENV};
pub use paths::{PathManager, home_override};
