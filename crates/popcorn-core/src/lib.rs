pub mod error;
pub mod rating;
pub mod watched;
pub mod flow;

pub use error::{FlowError, RatingError, WatchedError};
pub use rating::{Icon, StarRating, StarRatingConfig};
pub use watched::WatchedList;
pub use flow::{
    DetailPanel, DetailView, DetailsOutcome, PendingDetails, PendingSearch, ResultsView, SearchFlow,
    SearchOutcome,
};
