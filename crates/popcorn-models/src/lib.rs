pub mod movie;
pub mod search_result;
pub mod watched;

pub use movie::{MovieDetails, parse_runtime_minutes};
pub use search_result::SearchResult;
pub use watched::{WatchedEntry, WatchedSummary};
