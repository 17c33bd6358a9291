//! # pulselog-suggest
//!
//! Resilient exercise-suggestion retrieval for pulselog.
//!
//! The [`ExerciseSuggester`] makes a single bounded-time call to the external
//! exercise API and guarantees a usable result: on any failure (no key,
//! timeout, non-2xx, malformed body, empty payload) it serves the immutable
//! [`catalog`] instead. Callers can treat suggestions as infallible.

pub mod catalog;
pub mod suggester;

pub use catalog::fallback_exercises;
pub use suggester::ExerciseSuggester;
