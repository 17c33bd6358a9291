//! Search criteria normalization.
//!
//! Raw query-string parameters arrive as untrusted strings. Normalization is
//! the only path into [`SearchCriteria`]: each recognized field is trimmed and
//! coerced into its domain, and anything malformed is dropped so the search
//! degrades to "no filter on this field" instead of failing hard.

use serde::Deserialize;

use crate::defaults::MAX_FREE_TEXT_LEN;
use crate::models::{Intensity, MatchMode, SortKey, WorkoutType};

/// Raw string-keyed search parameters as they arrive from the query string.
///
/// Covers both the interactive search form (`q`, `mode`) and the public API
/// listing (`search`, `minDuration`, `maxDuration`).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchParams {
    #[serde(default, alias = "search")]
    pub q: Option<String>,
    #[serde(default, rename = "type")]
    pub workout_type: Option<String>,
    #[serde(default)]
    pub intensity: Option<String>,
    #[serde(default, rename = "minDuration")]
    pub min_duration: Option<String>,
    #[serde(default, rename = "maxDuration")]
    pub max_duration: Option<String>,
    #[serde(default)]
    pub mode: Option<String>,
    #[serde(default)]
    pub sort: Option<String>,
}

/// Validated, immutable search criteria.
///
/// Every populated field has passed its domain check; the query builder never
/// sees unvalidated input.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchCriteria {
    pub free_text: Option<String>,
    pub workout_type: Option<WorkoutType>,
    pub intensity: Option<Intensity>,
    pub min_duration: Option<i64>,
    pub max_duration: Option<i64>,
    pub match_mode: MatchMode,
    pub sort: SortKey,
}

fn clean_text(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(trimmed.chars().take(MAX_FREE_TEXT_LEN).collect())
}

fn parse_duration(raw: &str) -> Option<i64> {
    raw.trim().parse::<i64>().ok().filter(|v| *v >= 0)
}

impl SearchCriteria {
    /// Create empty criteria (matches everything, newest first).
    pub fn new() -> Self {
        Self::default()
    }

    /// Normalize raw parameters into validated criteria. Pure.
    pub fn from_params(params: &SearchParams) -> Self {
        Self {
            free_text: params.q.as_deref().and_then(clean_text),
            workout_type: params
                .workout_type
                .as_deref()
                .and_then(|s| s.trim().parse().ok()),
            intensity: params
                .intensity
                .as_deref()
                .and_then(|s| s.trim().parse().ok()),
            min_duration: params.min_duration.as_deref().and_then(parse_duration),
            max_duration: params.max_duration.as_deref().and_then(parse_duration),
            match_mode: params
                .mode
                .as_deref()
                .and_then(|s| s.trim().parse().ok())
                .unwrap_or_default(),
            sort: params
                .sort
                .as_deref()
                .and_then(|s| s.trim().parse().ok())
                .unwrap_or_default(),
        }
    }

    /// Set the free-text criterion.
    pub fn with_free_text(mut self, text: impl Into<String>) -> Self {
        self.free_text = clean_text(&text.into());
        self
    }

    /// Filter by workout type.
    pub fn with_type(mut self, workout_type: WorkoutType) -> Self {
        self.workout_type = Some(workout_type);
        self
    }

    /// Filter by intensity.
    pub fn with_intensity(mut self, intensity: Intensity) -> Self {
        self.intensity = Some(intensity);
        self
    }

    /// Require a minimum duration in minutes.
    pub fn with_min_duration(mut self, minutes: i64) -> Self {
        self.min_duration = Some(minutes);
        self
    }

    /// Require a maximum duration in minutes.
    pub fn with_max_duration(mut self, minutes: i64) -> Self {
        self.max_duration = Some(minutes);
        self
    }

    /// Set the free-text matching behavior.
    pub fn with_match_mode(mut self, mode: MatchMode) -> Self {
        self.match_mode = mode;
        self
    }

    /// Set the sort key.
    pub fn with_sort(mut self, sort: SortKey) -> Self {
        self.sort = sort;
        self
    }

    /// Check whether any filter dimension is populated.
    pub fn is_empty(&self) -> bool {
        self.free_text.is_none()
            && self.workout_type.is_none()
            && self.intensity.is_none()
            && self.min_duration.is_none()
            && self.max_duration.is_none()
    }
}
