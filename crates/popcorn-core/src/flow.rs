//! Search and detail view state for one session.
//!
//! Requests leave the flow as `PendingSearch` / `PendingDetails` values so
//! the caller decides how to run them. Each carries a sequence number, and
//! an outcome only changes visible state when its number is the latest one
//! issued for that kind of request. Superseded responses are dropped on
//! arrival.

use crate::error::{FlowError, RatingError};
use crate::rating::{StarRating, StarRatingConfig};
use crate::watched::WatchedList;
use popcorn_models::{MovieDetails, SearchResult, WatchedEntry, WatchedSummary};
use popcorn_sources::{MovieProvider, ProviderError};
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, PartialEq)]
pub enum ResultsView {
    Loading { query: String },
    Results(Vec<SearchResult>),
    /// User-facing message rendered in place of the list
    Error(String),
}

#[derive(Debug)]
pub enum DetailView {
    /// Watched summary is shown instead
    Closed,
    Loading { imdb_id: String },
    Open(DetailPanel),
    Error { imdb_id: String, message: String },
}

/// An open detail view with its own rating widget
#[derive(Debug)]
pub struct DetailPanel {
    details: MovieDetails,
    rating: StarRating,
    user_rating: Arc<AtomicU8>,
}

impl DetailPanel {
    fn open(details: MovieDetails, config: &StarRatingConfig) -> Result<Self, RatingError> {
        let rating = StarRating::new(config.clone())?;
        let user_rating = Arc::new(AtomicU8::new(rating.committed()));
        let sink = Arc::clone(&user_rating);
        let rating = rating.with_on_change(move |value| sink.store(value, Ordering::Relaxed));

        Ok(Self {
            details,
            rating,
            user_rating,
        })
    }

    pub fn details(&self) -> &MovieDetails {
        &self.details
    }

    pub fn rating(&self) -> &StarRating {
        &self.rating
    }

    pub fn rating_mut(&mut self) -> &mut StarRating {
        &mut self.rating
    }

    /// Last value the widget committed, 0 until the user rates
    pub fn user_rating(&self) -> u8 {
        self.user_rating.load(Ordering::Relaxed)
    }

    pub fn can_add(&self) -> bool {
        self.user_rating() > 0
    }
}

#[derive(Debug, Default)]
struct RequestSequence {
    latest: u64,
}

impl RequestSequence {
    fn issue(&mut self) -> u64 {
        self.latest += 1;
        self.latest
    }

    fn is_current(&self, seq: u64) -> bool {
        seq == self.latest
    }
}

pub struct PendingSearch {
    seq: u64,
    query: String,
    provider: Arc<dyn MovieProvider>,
}

pub struct SearchOutcome {
    pub seq: u64,
    pub query: String,
    pub result: Result<Vec<SearchResult>, ProviderError>,
}

impl PendingSearch {
    pub fn seq(&self) -> u64 {
        self.seq
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub async fn run(self) -> SearchOutcome {
        let result = self.provider.search(&self.query).await;
        SearchOutcome {
            seq: self.seq,
            query: self.query,
            result,
        }
    }
}

pub struct PendingDetails {
    seq: u64,
    imdb_id: String,
    provider: Arc<dyn MovieProvider>,
}

pub struct DetailsOutcome {
    pub seq: u64,
    pub imdb_id: String,
    pub result: Result<MovieDetails, ProviderError>,
}

impl PendingDetails {
    pub fn seq(&self) -> u64 {
        self.seq
    }

    pub fn imdb_id(&self) -> &str {
        &self.imdb_id
    }

    pub async fn run(self) -> DetailsOutcome {
        let result = self.provider.get_details(&self.imdb_id).await;
        DetailsOutcome {
            seq: self.seq,
            imdb_id: self.imdb_id,
            result,
        }
    }
}

pub struct SearchFlow {
    provider: Arc<dyn MovieProvider>,
    rating_config: StarRatingConfig,
    query: String,
    results: ResultsView,
    search_seq: RequestSequence,
    selected_id: Option<String>,
    details: DetailView,
    details_seq: RequestSequence,
    watched: WatchedList,
}

impl SearchFlow {
    /// The rating settings are validated here so every detail view can build its widget
    pub fn new(provider: Arc<dyn MovieProvider>, rating_config: StarRatingConfig) -> Result<Self, FlowError> {
        StarRating::new(rating_config.clone())?;

        Ok(Self {
            provider,
            rating_config,
            query: String::new(),
            results: ResultsView::Results(Vec::new()),
            search_seq: RequestSequence::default(),
            selected_id: None,
            details: DetailView::Closed,
            details_seq: RequestSequence::default(),
            watched: WatchedList::new(),
        })
    }

    /// Start a search for `query`
    ///
    /// An empty query clears the results without issuing a request and
    /// returns None. Either way any search still in flight becomes stale.
    pub fn search(&mut self, query: &str) -> Option<PendingSearch> {
        let query = query.trim();
        self.query = query.to_string();
        let seq = self.search_seq.issue();

        if query.is_empty() {
            debug!(seq, "Empty query, clearing results");
            self.results = ResultsView::Results(Vec::new());
            return None;
        }

        debug!(seq, query = %query, "Issuing search");
        self.results = ResultsView::Loading {
            query: query.to_string(),
        };

        Some(PendingSearch {
            seq,
            query: query.to_string(),
            provider: Arc::clone(&self.provider),
        })
    }

    /// Apply a finished search. Returns false when the outcome was stale.
    pub fn apply_search(&mut self, outcome: SearchOutcome) -> bool {
        if !self.search_seq.is_current(outcome.seq) {
            debug!(seq = outcome.seq, query = %outcome.query, "Discarding stale search response");
            return false;
        }

        self.results = match outcome.result {
            Ok(results) => {
                info!(query = %outcome.query, count = results.len(), "Search results received");
                ResultsView::Results(results)
            }
            Err(e) => {
                warn!(query = %outcome.query, error = %e, "Search failed");
                ResultsView::Error(e.user_message())
            }
        };
        true
    }

    pub async fn search_now(&mut self, query: &str) -> &ResultsView {
        if let Some(pending) = self.search(query) {
            let outcome = pending.run().await;
            self.apply_search(outcome);
        }
        &self.results
    }

    /// Select a search result
    ///
    /// Selecting the item that is already selected closes the detail view
    /// instead of fetching it again, and returns None.
    pub fn select(&mut self, imdb_id: &str) -> Option<PendingDetails> {
        if self.selected_id.as_deref() == Some(imdb_id) {
            debug!(imdb_id = %imdb_id, "Same item selected again, closing details");
            self.close_details();
            return None;
        }

        let seq = self.details_seq.issue();
        debug!(seq, imdb_id = %imdb_id, "Issuing details request");
        self.selected_id = Some(imdb_id.to_string());
        self.details = DetailView::Loading {
            imdb_id: imdb_id.to_string(),
        };

        Some(PendingDetails {
            seq,
            imdb_id: imdb_id.to_string(),
            provider: Arc::clone(&self.provider),
        })
    }

    /// Apply a finished details request. Returns false when the outcome was stale.
    pub fn apply_details(&mut self, outcome: DetailsOutcome) -> bool {
        let selected = self.selected_id.as_deref() == Some(outcome.imdb_id.as_str());
        if !self.details_seq.is_current(outcome.seq) || !selected {
            debug!(seq = outcome.seq, imdb_id = %outcome.imdb_id, "Discarding stale details response");
            return false;
        }

        self.details = match outcome.result {
            Ok(details) => match DetailPanel::open(details, &self.rating_config) {
                Ok(panel) => {
                    info!(imdb_id = %outcome.imdb_id, title = %panel.details().title, "Details received");
                    DetailView::Open(panel)
                }
                Err(e) => DetailView::Error {
                    imdb_id: outcome.imdb_id,
                    message: e.to_string(),
                },
            },
            Err(e) => {
                warn!(imdb_id = %outcome.imdb_id, error = %e, "Details request failed");
                DetailView::Error {
                    imdb_id: outcome.imdb_id,
                    message: e.user_message(),
                }
            }
        };
        true
    }

    pub async fn select_now(&mut self, imdb_id: &str) -> &DetailView {
        if let Some(pending) = self.select(imdb_id) {
            let outcome = pending.run().await;
            self.apply_details(outcome);
        }
        &self.details
    }

    /// Back to the watched summary. Any details request in flight becomes stale.
    pub fn close_details(&mut self) {
        self.details_seq.issue();
        self.selected_id = None;
        self.details = DetailView::Closed;
    }

    fn panel_mut(&mut self) -> Result<&mut DetailPanel, FlowError> {
        match &mut self.details {
            DetailView::Open(panel) => Ok(panel),
            _ => Err(FlowError::NoSelection),
        }
    }

    pub fn hover(&mut self, index: usize) -> Result<(), FlowError> {
        self.panel_mut()?.rating_mut().set_hover(index)?;
        Ok(())
    }

    pub fn leave(&mut self) -> Result<(), FlowError> {
        self.panel_mut()?.rating_mut().clear_hover();
        Ok(())
    }

    /// Commit a rating on the open detail view
    pub fn rate(&mut self, index: usize) -> Result<u8, FlowError> {
        Ok(self.panel_mut()?.rating_mut().commit(index)?)
    }

    /// Add the open title with its committed rating to the watched list, then close the view
    pub fn add_watched(&mut self) -> Result<WatchedEntry, FlowError> {
        let panel = self.panel_mut()?;
        let user_rating = panel.user_rating();
        if user_rating == 0 {
            return Err(FlowError::Unrated);
        }

        let entry = WatchedEntry::from_details(panel.details(), user_rating);
        self.watched.add(entry.clone())?;
        info!(imdb_id = %entry.imdb_id, user_rating, "Movie added to watched list");
        self.close_details();
        Ok(entry)
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn results(&self) -> &ResultsView {
        &self.results
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.selected_id.as_deref()
    }

    pub fn details(&self) -> &DetailView {
        &self.details
    }

    pub fn details_mut(&mut self) -> &mut DetailView {
        &mut self.details
    }

    pub fn watched(&self) -> &WatchedList {
        &self.watched
    }

    pub fn summary(&self) -> WatchedSummary {
        self.watched.summary()
    }

    /// Rating already recorded for the open title, if it was added earlier
    pub fn open_watched_rating(&self) -> Option<u8> {
        match &self.details {
            DetailView::Open(panel) => self.watched.rating_for(&panel.details().imdb_id),
            _ => None,
        }
    }

    pub fn provider_name(&self) -> &str {
        self.provider.provider_name()
    }
}
