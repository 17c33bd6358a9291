//! Workout filter query builder.
//!
//! Converts validated [`SearchCriteria`] into a parameterized WHERE/ORDER BY
//! pair. Ordering fragments come only from the closed whitelist below, and
//! user text reaches the database exclusively as bound parameters, so no
//! caller input can alter the query shape.

use pulselog_core::{MatchMode, SearchCriteria, SortKey};

/// Type-safe parameter binding for workout queries.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryParam {
    /// String parameter.
    Str(String),
    /// Integer parameter.
    Int(i64),
}

/// Parameterized query parts produced by [`WorkoutQueryBuilder`].
///
/// Invariant: the number of `?` placeholders across `clauses` equals
/// `params.len()`, position-aligned.
#[derive(Debug, Clone)]
pub struct QuerySpec {
    /// AND-combined clause fragments, each with its own placeholders.
    pub clauses: Vec<String>,
    /// Bound values in placeholder order.
    pub params: Vec<QueryParam>,
    /// Ordering fragment, always drawn from the whitelist.
    pub order_by: &'static str,
    /// Fixed row cap, chosen by the call site, never by the caller's input.
    pub limit: i64,
}

impl QuerySpec {
    /// WHERE clause including the leading keyword, or empty when unfiltered.
    pub fn where_sql(&self) -> String {
        if self.clauses.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", self.clauses.join(" AND "))
        }
    }

    /// Number of `?` placeholders across all clause fragments.
    pub fn placeholder_count(&self) -> usize {
        self.clauses.iter().map(|c| c.matches('?').count()).sum()
    }
}

/// Escape LIKE wildcard characters (`%`, `_`, `\`) in user input.
pub fn escape_like(input: &str) -> String {
    input
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

/// Closed ordering whitelist. The enum is the whole table: there is no path
/// from raw input to an ordering fragment except through `SortKey` parsing,
/// which falls back to `Date`.
fn order_by_clause(sort: SortKey) -> &'static str {
    match sort {
        SortKey::Date => "w.date DESC",
        SortKey::Duration => "w.duration_minutes DESC",
        SortKey::Intensity => "FIELD(w.intensity,'high','medium','low') ASC",
    }
}

/// Accumulates `(fragment, parameter)` pairs for a workout search.
pub struct WorkoutQueryBuilder<'a> {
    criteria: &'a SearchCriteria,
    limit: i64,
}

impl<'a> WorkoutQueryBuilder<'a> {
    /// Create a builder over validated criteria with a fixed row cap.
    pub fn new(criteria: &'a SearchCriteria, limit: i64) -> Self {
        Self { criteria, limit }
    }

    /// Assemble the query parts. Cannot fail: the criteria were validated by
    /// the normalizer upstream.
    pub fn build(&self) -> QuerySpec {
        let mut clauses = Vec::new();
        let mut params = Vec::new();

        if let Some(text) = &self.criteria.free_text {
            match self.criteria.match_mode {
                MatchMode::Exact => {
                    clauses.push("(w.type = ? OR w.notes = ?)".to_string());
                    params.push(QueryParam::Str(text.clone()));
                    params.push(QueryParam::Str(text.clone()));
                }
                MatchMode::Partial => {
                    let pattern = format!("%{}%", escape_like(text));
                    clauses.push("(w.type LIKE ? OR w.notes LIKE ?)".to_string());
                    params.push(QueryParam::Str(pattern.clone()));
                    params.push(QueryParam::Str(pattern));
                }
            }
        }

        if let Some(workout_type) = self.criteria.workout_type {
            clauses.push("w.type = ?".to_string());
            params.push(QueryParam::Str(workout_type.as_str().to_string()));
        }

        if let Some(intensity) = self.criteria.intensity {
            clauses.push("w.intensity = ?".to_string());
            params.push(QueryParam::Str(intensity.as_str().to_string()));
        }

        if let Some(min) = self.criteria.min_duration {
            clauses.push("w.duration_minutes >= ?".to_string());
            params.push(QueryParam::Int(min));
        }

        if let Some(max) = self.criteria.max_duration {
            clauses.push("w.duration_minutes <= ?".to_string());
            params.push(QueryParam::Int(max));
        }

        QuerySpec {
            clauses,
            params,
            order_by: order_by_clause(self.criteria.sort),
            limit: self.limit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pulselog_core::defaults::SEARCH_RESULT_LIMIT;
    use pulselog_core::{Intensity, SearchParams, WorkoutType};

    fn build(criteria: &SearchCriteria) -> QuerySpec {
        WorkoutQueryBuilder::new(criteria, SEARCH_RESULT_LIMIT).build()
    }

    #[test]
    fn test_empty_criteria_produce_no_clauses() {
        let spec = build(&SearchCriteria::new());
        assert!(spec.clauses.is_empty());
        assert!(spec.params.is_empty());
        assert_eq!(spec.where_sql(), "");
        assert_eq!(spec.order_by, "w.date DESC");
        assert_eq!(spec.limit, SEARCH_RESULT_LIMIT);
    }

    #[test]
    fn test_placeholder_count_matches_params_for_all_combinations() {
        // Every subset of filter dimensions keeps placeholders and bound
        // values position-aligned.
        let free_texts = [None, Some("rowing".to_string())];
        let modes = [MatchMode::Exact, MatchMode::Partial];
        let types = [None, Some(WorkoutType::Cardio)];
        let intensities = [None, Some(Intensity::High)];
        let mins = [None, Some(10)];
        let maxes = [None, Some(90)];

        for free_text in &free_texts {
            for mode in modes {
                for workout_type in types {
                    for intensity in intensities {
                        for min in mins {
                            for max in maxes {
                                let criteria = SearchCriteria {
                                    free_text: free_text.clone(),
                                    workout_type,
                                    intensity,
                                    min_duration: min,
                                    max_duration: max,
                                    match_mode: mode,
                                    sort: SortKey::Date,
                                };
                                let spec = build(&criteria);
                                assert_eq!(
                                    spec.placeholder_count(),
                                    spec.params.len(),
                                    "mismatch for {criteria:?}"
                                );
                            }
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn test_exact_mode_binds_literal_twice() {
        let criteria = SearchCriteria::new()
            .with_free_text("morning run")
            .with_match_mode(MatchMode::Exact);
        let spec = build(&criteria);
        assert_eq!(spec.clauses, vec!["(w.type = ? OR w.notes = ?)"]);
        assert_eq!(
            spec.params,
            vec![
                QueryParam::Str("morning run".to_string()),
                QueryParam::Str("morning run".to_string()),
            ]
        );
    }

    #[test]
    fn test_partial_mode_wraps_in_wildcards() {
        let criteria = SearchCriteria::new().with_free_text("run");
        let spec = build(&criteria);
        assert_eq!(spec.clauses, vec!["(w.type LIKE ? OR w.notes LIKE ?)"]);
        assert_eq!(
            spec.params,
            vec![
                QueryParam::Str("%run%".to_string()),
                QueryParam::Str("%run%".to_string()),
            ]
        );
    }

    #[test]
    fn test_partial_mode_escapes_like_wildcards() {
        let criteria = SearchCriteria::new().with_free_text("100%_effort");
        let spec = build(&criteria);
        assert_eq!(
            spec.params[0],
            QueryParam::Str("%100\\%\\_effort%".to_string())
        );
    }

    #[test]
    fn test_injection_text_stays_in_params() {
        let hostile = "'; DROP TABLE workouts; --";
        let criteria = SearchCriteria::new()
            .with_free_text(hostile)
            .with_match_mode(MatchMode::Exact);
        let spec = build(&criteria);
        // The hostile text appears only as a bound value, never in the
        // clause text itself.
        assert!(!spec.where_sql().contains("DROP"));
        assert_eq!(spec.params[0], QueryParam::Str(hostile.to_string()));
    }

    #[test]
    fn test_all_filters_and_combined() {
        let criteria = SearchCriteria::new()
            .with_free_text("intervals")
            .with_type(WorkoutType::Cardio)
            .with_intensity(Intensity::High)
            .with_min_duration(20)
            .with_max_duration(60);
        let spec = build(&criteria);
        assert_eq!(spec.clauses.len(), 5);
        assert_eq!(spec.params.len(), 6);
        let where_sql = spec.where_sql();
        assert!(where_sql.starts_with("WHERE "));
        assert_eq!(where_sql.matches(" AND ").count(), 4);
    }

    #[test]
    fn test_duration_bounds_emit_range_clauses() {
        let criteria = SearchCriteria::new()
            .with_min_duration(15)
            .with_max_duration(45);
        let spec = build(&criteria);
        assert_eq!(
            spec.clauses,
            vec!["w.duration_minutes >= ?", "w.duration_minutes <= ?"]
        );
        assert_eq!(
            spec.params,
            vec![QueryParam::Int(15), QueryParam::Int(45)]
        );
    }

    #[test]
    fn test_order_by_whitelist() {
        let date = build(&SearchCriteria::new().with_sort(SortKey::Date));
        assert_eq!(date.order_by, "w.date DESC");

        let duration = build(&SearchCriteria::new().with_sort(SortKey::Duration));
        assert_eq!(duration.order_by, "w.duration_minutes DESC");

        let intensity = build(&SearchCriteria::new().with_sort(SortKey::Intensity));
        assert_eq!(
            intensity.order_by,
            "FIELD(w.intensity,'high','medium','low') ASC"
        );
    }

    #[test]
    fn test_out_of_set_sort_resolves_to_date_ordering() {
        // Unknown sort keys are dropped at normalization, so the builder
        // only ever sees the date fallback.
        let criteria = SearchCriteria::from_params(&SearchParams {
            sort: Some("1; DELETE FROM workouts".to_string()),
            ..SearchParams::default()
        });
        let spec = build(&criteria);
        assert_eq!(spec.order_by, "w.date DESC");
    }

    #[test]
    fn test_limit_is_fixed_by_call_site() {
        let spec = WorkoutQueryBuilder::new(&SearchCriteria::new(), 200).build();
        assert_eq!(spec.limit, 200);
    }
}
