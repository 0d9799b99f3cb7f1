//! Star rating input.
//!
//! The widget keeps two pieces of state: the committed value, which is the
//! only thing reported to the owner, and an optional hover preview. What is
//! displayed is the preview when present and the committed value otherwise,
//! so previewing never touches the committed value.

use crate::error::RatingError;
use owo_colors::OwoColorize;
use popcorn_config::{parse_hex_color, RatingConfig};
use std::fmt;

const FILLED_GLYPH: &str = "★";
const EMPTY_GLYPH: &str = "☆";

/// Icon size one glyph column corresponds to
const GLYPH_UNIT: u16 = 24;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StarRatingConfig {
    pub max_rating: u8,
    pub icon_size: u16,
    pub active_color: String,
    pub inactive_color: String,
    pub initial_value: u8,
}

impl Default for StarRatingConfig {
    fn default() -> Self {
        Self {
            max_rating: 5,
            icon_size: 48,
            active_color: "#fcc419".to_string(),
            inactive_color: "#495057".to_string(),
            initial_value: 0,
        }
    }
}

impl From<&RatingConfig> for StarRatingConfig {
    fn from(config: &RatingConfig) -> Self {
        Self {
            max_rating: config.max_rating,
            icon_size: config.icon_size,
            active_color: config.active_color.clone(),
            inactive_color: config.inactive_color.clone(),
            initial_value: 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Icon {
    Filled,
    Empty,
}

type ChangeCallback = Box<dyn FnMut(u8) + Send>;

pub struct StarRating {
    max_rating: u8,
    icon_size: u16,
    active_color: (u8, u8, u8),
    inactive_color: (u8, u8, u8),
    committed: u8,
    hover: Option<u8>,
    on_change: Option<ChangeCallback>,
}

fn color(value: &str, field: &str) -> Result<(u8, u8, u8), RatingError> {
    parse_hex_color(value).ok_or_else(|| {
        RatingError::Configuration(format!("{} must be a #rrggbb colour, got '{}'", field, value))
    })
}

impl StarRating {
    pub fn new(config: StarRatingConfig) -> Result<Self, RatingError> {
        if config.max_rating == 0 {
            return Err(RatingError::Configuration(
                "max_rating must be at least 1".to_string(),
            ));
        }
        if config.initial_value > config.max_rating {
            return Err(RatingError::Configuration(format!(
                "initial_value {} exceeds max_rating {}",
                config.initial_value, config.max_rating
            )));
        }

        Ok(Self {
            max_rating: config.max_rating,
            icon_size: config.icon_size,
            active_color: color(&config.active_color, "active_color")?,
            inactive_color: color(&config.inactive_color, "inactive_color")?,
            committed: config.initial_value,
            hover: None,
            on_change: None,
        })
    }

    /// Register the owner's callback, replacing any previous one
    pub fn on_change<F>(&mut self, callback: F)
    where
        F: FnMut(u8) + Send + 'static,
    {
        self.on_change = Some(Box::new(callback));
    }

    /// Builder form of [`StarRating::on_change`]
    pub fn with_on_change<F>(mut self, callback: F) -> Self
    where
        F: FnMut(u8) + Send + 'static,
    {
        self.on_change(callback);
        self
    }

    fn check_index(&self, index: usize) -> Result<u8, RatingError> {
        if index >= self.max_rating as usize {
            return Err(RatingError::IndexOutOfRange {
                index,
                max: self.max_rating,
            });
        }
        Ok(index as u8 + 1)
    }

    /// Preview the value the icon at `index` would commit
    pub fn set_hover(&mut self, index: usize) -> Result<(), RatingError> {
        let value = self.check_index(index)?;
        self.hover = Some(value);
        Ok(())
    }

    /// Pointer left the control: drop the preview
    pub fn clear_hover(&mut self) {
        self.hover = None;
    }

    /// Commit the value of the icon at `index` and notify the owner
    pub fn commit(&mut self, index: usize) -> Result<u8, RatingError> {
        let value = self.check_index(index)?;
        self.committed = value;
        if let Some(callback) = self.on_change.as_mut() {
            callback(value);
        }
        Ok(value)
    }

    /// Move the preview by `delta` icons from what is currently displayed
    ///
    /// The result is clamped to `[1, max_rating]` so keyboard navigation
    /// always lands on a committable icon.
    pub fn hover_step(&mut self, delta: i32) -> u8 {
        let target = i32::from(self.displayed()).saturating_add(delta).clamp(1, self.max_rating as i32) as u8;
        self.hover = Some(target);
        target
    }

    pub fn max_rating(&self) -> u8 {
        self.max_rating
    }

    pub fn icon_size(&self) -> u16 {
        self.icon_size
    }

    pub fn committed(&self) -> u8 {
        self.committed
    }

    pub fn hover(&self) -> Option<u8> {
        self.hover
    }

    pub fn displayed(&self) -> u8 {
        self.hover.unwrap_or(self.committed)
    }

    pub fn icon(&self, index: usize) -> Icon {
        if self.displayed() as usize > index {
            Icon::Filled
        } else {
            Icon::Empty
        }
    }

    pub fn icons(&self) -> Vec<Icon> {
        (0..self.max_rating as usize).map(|i| self.icon(i)).collect()
    }

    /// Number shown next to the stars, empty while nothing is displayed
    pub fn label(&self) -> String {
        match self.displayed() {
            0 => String::new(),
            n => n.to_string(),
        }
    }

    /// Coloured terminal rendering of the icons followed by the label
    pub fn render(&self) -> String {
        let gap = " ".repeat((self.icon_size / GLYPH_UNIT).max(1) as usize);
        let (ar, ag, ab) = self.active_color;
        let (ir, ig, ib) = self.inactive_color;

        let stars: Vec<String> = self
            .icons()
            .into_iter()
            .map(|icon| match icon {
                Icon::Filled => FILLED_GLYPH.truecolor(ar, ag, ab).to_string(),
                Icon::Empty => EMPTY_GLYPH.truecolor(ir, ig, ib).to_string(),
            })
            .collect();

        let label = self.label();
        if label.is_empty() {
            stars.join(&gap)
        } else {
            format!("{}{}{}", stars.join(&gap), gap, label.truecolor(ar, ag, ab))
        }
    }
}

impl fmt::Debug for StarRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StarRating")
            .field("max_rating", &self.max_rating)
            .field("icon_size", &self.icon_size)
            .field("committed", &self.committed)
            .field("hover", &self.hover)
            .field("has_on_change", &self.on_change.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    fn widget(max_rating: u8) -> StarRating {
        StarRating::new(StarRatingConfig {
            max_rating,
            ..StarRatingConfig::default()
        })
        .unwrap()
    }

    fn recording(max_rating: u8) -> (StarRating, Arc<Mutex<Vec<u8>>>) {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&calls);
        let rating = widget(max_rating).with_on_change(move |v| sink.lock().unwrap().push(v));
        (rating, calls)
    }

    #[test]
    fn test_zero_max_rating_rejected() {
        let result = StarRating::new(StarRatingConfig {
            max_rating: 0,
            ..StarRatingConfig::default()
        });
        assert!(matches!(result, Err(RatingError::Configuration(_))));
    }

    #[test]
    fn test_initial_value_above_max_rejected() {
        let result = StarRating::new(StarRatingConfig {
            max_rating: 5,
            initial_value: 6,
            ..StarRatingConfig::default()
        });
        assert!(matches!(result, Err(RatingError::Configuration(_))));
    }

    #[test]
    fn test_bad_colour_rejected() {
        let result = StarRating::new(StarRatingConfig {
            active_color: "yellow".to_string(),
            ..StarRatingConfig::default()
        });
        assert!(matches!(result, Err(RatingError::Configuration(_))));
    }

    #[test]
    fn test_initial_value_is_committed() {
        let rating = StarRating::new(StarRatingConfig {
            initial_value: 3,
            ..StarRatingConfig::default()
        })
        .unwrap();
        assert_eq!(rating.committed(), 3);
        assert_eq!(rating.displayed(), 3);
        assert!(rating.hover().is_none());
    }

    #[test]
    fn test_commit_sets_value_and_notifies_once() {
        for max in 1..=10u8 {
            for index in 0..max as usize {
                let (mut rating, calls) = recording(max);
                let value = rating.commit(index).unwrap();
                assert_eq!(value as usize, index + 1);
                assert_eq!(rating.committed() as usize, index + 1);
                assert_eq!(*calls.lock().unwrap(), vec![index as u8 + 1]);
            }
        }
    }

    #[test]
    fn test_hover_never_commits_or_notifies() {
        let (mut rating, calls) = recording(10);
        rating.commit(2).unwrap();

        for index in [0, 9, 4, 7] {
            rating.set_hover(index).unwrap();
            assert_eq!(rating.displayed() as usize, index + 1);
        }

        assert_eq!(rating.committed(), 3);
        assert_eq!(calls.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_leave_restores_committed_display() {
        let mut rating = widget(5);
        rating.commit(1).unwrap();
        let before = rating.icons();

        rating.set_hover(4).unwrap();
        assert_eq!(rating.icons(), vec![Icon::Filled; 5]);

        rating.clear_hover();
        assert_eq!(rating.hover(), None);
        assert_eq!(rating.displayed(), 2);
        assert_eq!(rating.icons(), before);
    }

    #[test]
    fn test_display_rule() {
        let mut rating = widget(5);
        assert_eq!(rating.icons(), vec![Icon::Empty; 5]);

        rating.commit(2).unwrap();
        assert_eq!(
            rating.icons(),
            vec![Icon::Filled, Icon::Filled, Icon::Filled, Icon::Empty, Icon::Empty]
        );

        rating.set_hover(0).unwrap();
        assert_eq!(rating.icon(0), Icon::Filled);
        assert_eq!(rating.icon(1), Icon::Empty);
    }

    #[test]
    fn test_out_of_range_is_rejected_without_side_effects() {
        let (mut rating, calls) = recording(5);
        rating.commit(1).unwrap();

        assert_eq!(
            rating.commit(5),
            Err(RatingError::IndexOutOfRange { index: 5, max: 5 })
        );
        assert!(rating.set_hover(17).is_err());

        assert_eq!(rating.committed(), 2);
        assert_eq!(rating.hover(), None);
        assert_eq!(calls.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_instances_are_independent() {
        let (mut first, first_calls) = recording(5);
        let (mut second, second_calls) = recording(5);

        first.commit(4).unwrap();
        second.set_hover(1).unwrap();

        assert_eq!(first.committed(), 5);
        assert_eq!(second.committed(), 0);
        assert_eq!(second.displayed(), 2);
        assert_eq!(first_calls.lock().unwrap().len(), 1);
        assert!(second_calls.lock().unwrap().is_empty());
    }

    #[test]
    fn test_hover_step_clamps() {
        let mut rating = widget(5);
        assert_eq!(rating.hover_step(-1), 1);
        assert_eq!(rating.hover_step(3), 4);
        assert_eq!(rating.hover_step(10), 5);
        assert_eq!(rating.committed(), 0);
    }

    #[test]
    fn test_hover_step_extreme_deltas() {
        let mut rating = widget(5);
        assert_eq!(rating.hover_step(i32::MAX), 5);
        assert_eq!(rating.hover_step(i32::MIN), 1);
        assert_eq!(rating.hover(), Some(1));
    }

    #[test]
    fn test_label() {
        let mut rating = widget(10);
        assert_eq!(rating.label(), "");
        rating.set_hover(6).unwrap();
        assert_eq!(rating.label(), "7");
        rating.clear_hover();
        assert_eq!(rating.label(), "");
    }

    #[test]
    fn test_render_contains_one_glyph_per_icon() {
        let mut rating = widget(4);
        rating.commit(1).unwrap();
        let rendered = rating.render();
        assert_eq!(rendered.matches(FILLED_GLYPH).count(), 2);
        assert_eq!(rendered.matches(EMPTY_GLYPH).count(), 2);
    }

    #[test]
    fn test_from_rating_config() {
        let config = StarRatingConfig::from(&RatingConfig::default());
        assert_eq!(config.max_rating, 10);
        assert_eq!(config.icon_size, 24);
        assert_eq!(config.initial_value, 0);
    }
}
