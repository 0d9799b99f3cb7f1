use crate::error::WatchedError;
use popcorn_models::{WatchedEntry, WatchedSummary};

/// Session-local list of rated titles
#[derive(Debug, Clone, Default)]
pub struct WatchedList {
    entries: Vec<WatchedEntry>,
}

/// Arithmetic mean, 0.0 when there is nothing to average
fn average(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

impl WatchedList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, entry: WatchedEntry) -> Result<(), WatchedError> {
        if entry.user_rating == 0 {
            return Err(WatchedError::Unrated);
        }
        if self.contains(&entry.imdb_id) {
            return Err(WatchedError::AlreadyWatched {
                imdb_id: entry.imdb_id,
            });
        }
        tracing::debug!(imdb_id = %entry.imdb_id, user_rating = entry.user_rating, "Added to watched list");
        self.entries.push(entry);
        Ok(())
    }

    pub fn entries(&self) -> &[WatchedEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, imdb_id: &str) -> bool {
        self.rating_for(imdb_id).is_some()
    }

    /// The rating given when the title was added
    pub fn rating_for(&self, imdb_id: &str) -> Option<u8> {
        self.entries
            .iter()
            .find(|e| e.imdb_id == imdb_id)
            .map(|e| e.user_rating)
    }

    pub fn summary(&self) -> WatchedSummary {
        WatchedSummary {
            count: self.entries.len(),
            avg_provider_rating: average(self.entries.iter().filter_map(|e| e.provider_rating)),
            avg_user_rating: average(self.entries.iter().map(|e| e.user_rating as f64)),
            avg_runtime_minutes: average(
                self.entries.iter().filter_map(|e| e.runtime_minutes.map(|m| m as f64)),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn create_entry(imdb_id: &str, user_rating: u8, provider_rating: Option<f64>, runtime: Option<u32>) -> WatchedEntry {
        WatchedEntry {
            imdb_id: imdb_id.to_string(),
            title: format!("Movie {}", imdb_id),
            year: "2014".to_string(),
            poster_url: None,
            provider_rating,
            runtime_minutes: runtime,
            user_rating,
            added_at: Utc::now(),
        }
    }

    #[test]
    fn test_empty_summary_is_zero() {
        let list = WatchedList::new();
        assert_eq!(list.summary(), WatchedSummary::default());
        assert!(list.is_empty());
    }

    #[test]
    fn test_average_user_rating() {
        let mut list = WatchedList::new();
        list.add(create_entry("tt001", 8, Some(8.7), Some(169))).unwrap();
        assert_eq!(list.summary().avg_user_rating, 8.0);

        list.add(create_entry("tt002", 4, Some(7.5), Some(148))).unwrap();
        let summary = list.summary();
        assert_eq!(summary.count, 2);
        assert_eq!(summary.avg_user_rating, 6.0);
        assert!((summary.avg_provider_rating - 8.1).abs() < 1e-9);
        assert_eq!(summary.avg_runtime_minutes, 158.5);
    }

    #[test]
    fn test_unknown_values_excluded_from_averages() {
        let mut list = WatchedList::new();
        list.add(create_entry("tt001", 6, None, None)).unwrap();
        list.add(create_entry("tt002", 10, Some(9.0), Some(120))).unwrap();

        let summary = list.summary();
        assert_eq!(summary.avg_user_rating, 8.0);
        assert_eq!(summary.avg_provider_rating, 9.0);
        assert_eq!(summary.avg_runtime_minutes, 120.0);
    }

    #[test]
    fn test_unrated_entry_rejected() {
        let mut list = WatchedList::new();
        assert_eq!(list.add(create_entry("tt001", 0, None, None)), Err(WatchedError::Unrated));
        assert!(list.is_empty());
    }

    #[test]
    fn test_entries_keep_insertion_order() {
        let mut list = WatchedList::new();
        list.add(create_entry("tt003", 5, None, None)).unwrap();
        list.add(create_entry("tt001", 7, None, None)).unwrap();
        let ids: Vec<&str> = list.entries().iter().map(|e| e.imdb_id.as_str()).collect();
        assert_eq!(ids, vec!["tt003", "tt001"]);
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn test_same_title_added_once() {
        let mut list = WatchedList::new();
        list.add(create_entry("tt001", 7, None, None)).unwrap();

        assert_eq!(
            list.add(create_entry("tt001", 9, None, None)),
            Err(WatchedError::AlreadyWatched {
                imdb_id: "tt001".to_string()
            })
        );
        assert_eq!(list.len(), 1);
        assert_eq!(list.rating_for("tt001"), Some(7));
        assert_eq!(list.rating_for("tt002"), None);
    }
}
