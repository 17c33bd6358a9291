//! Centralized default constants for pulselog.
//!
//! **This module is the single source of truth** for shared default values.
//! All crates reference these constants instead of defining their own magic
//! numbers.

// =============================================================================
// PAGINATION
// =============================================================================

/// Rows per page for the authenticated history listing.
pub const PAGE_SIZE: i64 = 20;

// =============================================================================
// QUERY ROW CAPS
// =============================================================================

/// Row cap for the interactive search endpoint.
pub const SEARCH_RESULT_LIMIT: i64 = 100;

/// Row cap for the public filtered API listing.
pub const API_RESULT_LIMIT: i64 = 200;

/// Longest free-text criterion accepted by the normalizer (chars).
pub const MAX_FREE_TEXT_LEN: usize = 200;

// =============================================================================
// SUGGESTIONS
// =============================================================================

/// Default exercise-suggestion provider endpoint.
pub const EXERCISE_API_BASE: &str = "https://api.api-ninjas.com/v1";

/// Hard deadline for one suggestion request (seconds).
pub const SUGGEST_TIMEOUT_SECS: u64 = 5;

/// Maximum suggestions returned per request.
pub const SUGGEST_LIMIT: usize = 3;

// =============================================================================
// TEXT NORMALIZATION
// =============================================================================

/// Normalized text below this many chars is unusable and becomes empty.
pub const NORMALIZED_MIN_LEN: usize = 5;

/// Normalized text above this many chars is truncated with an ellipsis marker.
pub const NORMALIZED_MAX_LEN: usize = 100;

// =============================================================================
// RATE LIMITING
// =============================================================================

/// Public API rate limit: requests allowed per window.
pub const API_RATE_LIMIT_REQUESTS: u32 = 60;

/// Public API rate limit window (seconds).
pub const API_RATE_LIMIT_PERIOD_SECS: u64 = 60;
