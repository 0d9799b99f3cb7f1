use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RatingError {
    #[error("Invalid rating configuration: {0}")]
    Configuration(String),

    #[error("Rating index {index} is out of range for {max} stars")]
    IndexOutOfRange { index: usize, max: u8 },
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WatchedError {
    #[error("A rating above zero is required before adding to the watched list")]
    Unrated,

    #[error("{imdb_id} is already on the watched list")]
    AlreadyWatched { imdb_id: String },
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FlowError {
    #[error("No movie is open in the detail view")]
    NoSelection,

    #[error("Rate the movie before adding it to the watched list")]
    Unrated,

    #[error(transparent)]
    Rating(#[from] RatingError),

    #[error(transparent)]
    Watched(#[from] WatchedError),
}
