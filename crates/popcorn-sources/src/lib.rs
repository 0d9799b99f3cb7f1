pub mod traits;
pub mod omdb;
pub mod error;

pub use traits::MovieProvider;
pub use error::{ProviderError, FETCH_FAILED_MESSAGE, NOT_FOUND_MESSAGE};
pub use omdb::{OmdbClient, OmdbSettings};
