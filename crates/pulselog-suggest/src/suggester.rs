//! Resilient exercise suggestion retrieval.
//!
//! One outbound GET per request, bounded by a runtime-enforced deadline.
//! Every failure branch converges on the fallback catalog; callers never see
//! an error and never wait past the deadline. No retry: a rate-limited or
//! down provider must not cascade into added latency.

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use pulselog_core::defaults::{EXERCISE_API_BASE, SUGGEST_LIMIT, SUGGEST_TIMEOUT_SECS};
use pulselog_core::{textnorm, Error, Exercise, Result, WorkoutType};

use crate::catalog::fallback_exercises;

const DEFAULT_NAME: &str = "Exercise";
const DEFAULT_DESCRIPTION: &str = "A great exercise to include in your workout routine";
const DEFAULT_EQUIPMENT: &str = "None";
const DEFAULT_DIFFICULTY: &str = "intermediate";
const DEFAULT_MUSCLE: &str = "various";

/// Raw provider record; every field optional so malformed entries still parse.
#[derive(Debug, Deserialize)]
struct ProviderExercise {
    name: Option<String>,
    instructions: Option<String>,
    equipment: Option<String>,
    difficulty: Option<String>,
    muscle: Option<String>,
}

/// Map workout types onto the provider's category vocabulary.
fn provider_category(workout_type: WorkoutType) -> &'static str {
    match workout_type {
        WorkoutType::Cardio => "cardio",
        WorkoutType::Strength => "strength",
        WorkoutType::Flexibility => "stretching",
        WorkoutType::Balance => "stability",
        WorkoutType::Sport => "cardio",
        WorkoutType::Other => "cardio",
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Defensive mapping: missing fields get usable defaults, free text is
/// cleaned through the text normalizer.
fn map_provider_exercise(record: ProviderExercise) -> Exercise {
    let description = match non_blank(record.instructions) {
        Some(raw) => {
            let cleaned = textnorm::normalize(&raw);
            if cleaned.is_empty() {
                DEFAULT_DESCRIPTION.to_string()
            } else {
                cleaned
            }
        }
        None => DEFAULT_DESCRIPTION.to_string(),
    };

    Exercise {
        name: non_blank(record.name).unwrap_or_else(|| DEFAULT_NAME.to_string()),
        description,
        equipment: non_blank(record.equipment).unwrap_or_else(|| DEFAULT_EQUIPMENT.to_string()),
        difficulty: Some(
            non_blank(record.difficulty).unwrap_or_else(|| DEFAULT_DIFFICULTY.to_string()),
        ),
        muscle: Some(non_blank(record.muscle).unwrap_or_else(|| DEFAULT_MUSCLE.to_string())),
    }
}

/// Exercise suggestion client with fallback.
pub struct ExerciseSuggester {
    client: Client,
    base_url: String,
    api_key: Option<String>,
    timeout: Duration,
}

impl ExerciseSuggester {
    /// Create a suggester against a provider base URL. `api_key = None`
    /// disables the network path entirely.
    pub fn new(base_url: String, api_key: Option<String>) -> Self {
        let timeout = Duration::from_secs(SUGGEST_TIMEOUT_SECS);
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url,
            api_key,
            timeout,
        }
    }

    /// Create from environment variables (`EXERCISE_API_BASE`,
    /// `EXERCISE_API_KEY`). An empty key counts as unconfigured.
    pub fn from_env() -> Self {
        let base_url =
            std::env::var("EXERCISE_API_BASE").unwrap_or_else(|_| EXERCISE_API_BASE.to_string());
        let api_key = std::env::var("EXERCISE_API_KEY")
            .ok()
            .filter(|key| !key.is_empty());
        Self::new(base_url, api_key)
    }

    /// Override the request deadline.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Fetch at most three suggestions for `raw_type`.
    ///
    /// Never fails and never blocks past the deadline: unknown types map to
    /// cardio, and any provider problem serves the fallback catalog instead.
    pub async fn suggest(&self, raw_type: &str) -> Vec<Exercise> {
        let workout_type = raw_type
            .trim()
            .parse::<WorkoutType>()
            .unwrap_or(WorkoutType::Cardio);

        let Some(api_key) = self.api_key.as_deref() else {
            debug!(
                subsystem = "suggest",
                op = "suggest",
                workout_type = %workout_type,
                "No API key configured, serving fallback catalog"
            );
            return fallback_exercises(workout_type).to_vec();
        };

        match tokio::time::timeout(self.timeout, self.fetch(workout_type, api_key)).await {
            Ok(Ok(exercises)) => exercises,
            Ok(Err(e)) => {
                warn!(
                    subsystem = "suggest",
                    op = "suggest",
                    workout_type = %workout_type,
                    error = %e,
                    "Provider request failed, serving fallback catalog"
                );
                fallback_exercises(workout_type).to_vec()
            }
            Err(_) => {
                warn!(
                    subsystem = "suggest",
                    op = "suggest",
                    workout_type = %workout_type,
                    timeout_secs = self.timeout.as_secs(),
                    "Provider request timed out, serving fallback catalog"
                );
                fallback_exercises(workout_type).to_vec()
            }
        }
    }

    async fn fetch(&self, workout_type: WorkoutType, api_key: &str) -> Result<Vec<Exercise>> {
        let url = format!(
            "{}/exercises?type={}&offset=0",
            self.base_url,
            provider_category(workout_type)
        );

        let response = self
            .client
            .get(&url)
            .header("X-Api-Key", api_key)
            .header("Accept", "application/json")
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Error::Suggestion(format!(
                "provider returned {}",
                response.status()
            )));
        }

        let records: Vec<ProviderExercise> = response
            .json()
            .await
            .map_err(|e| Error::Suggestion(format!("failed to parse response: {e}")))?;

        if records.is_empty() {
            return Err(Error::Suggestion("empty result payload".to_string()));
        }

        debug!(
            subsystem = "suggest",
            op = "fetch",
            workout_type = %workout_type,
            result_count = records.len(),
            "Provider returned exercises"
        );

        Ok(records
            .into_iter()
            .take(SUGGEST_LIMIT)
            .map(map_provider_exercise)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn suggester(server: &MockServer, api_key: Option<&str>) -> ExerciseSuggester {
        ExerciseSuggester::new(server.uri(), api_key.map(String::from))
    }

    #[test]
    fn test_provider_vocabulary_mapping() {
        assert_eq!(provider_category(WorkoutType::Cardio), "cardio");
        assert_eq!(provider_category(WorkoutType::Strength), "strength");
        assert_eq!(provider_category(WorkoutType::Flexibility), "stretching");
        assert_eq!(provider_category(WorkoutType::Balance), "stability");
        assert_eq!(provider_category(WorkoutType::Sport), "cardio");
        assert_eq!(provider_category(WorkoutType::Other), "cardio");
    }

    #[tokio::test]
    async fn test_no_key_serves_fallback_without_network() {
        let server = MockServer::start().await;
        // Any request reaching the server would fail the expectation.
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let suggester = suggester(&server, None);
        let first = suggester.suggest("flexibility").await;
        let second = suggester.suggest("flexibility").await;

        assert_eq!(first, fallback_exercises(WorkoutType::Flexibility));
        assert_eq!(first, second, "fallback must be deterministic");
        assert!(first.len() <= 3);
    }

    #[tokio::test]
    async fn test_unknown_type_maps_to_cardio_fallback() {
        let server = MockServer::start().await;
        let suggester = suggester(&server, None);

        let result = suggester.suggest("underwater-basket-weaving").await;
        assert_eq!(result, fallback_exercises(WorkoutType::Cardio));
    }

    #[tokio::test]
    async fn test_success_maps_first_three_records() {
        let server = MockServer::start().await;
        let body = serde_json::json!([
            {
                "name": "Burpees",
                "instructions": "<p>Drop, push up, jump &amp; repeat without pause</p>",
                "equipment": "body_only",
                "difficulty": "expert",
                "muscle": "quadriceps"
            },
            { "name": "Mountain Climbers" },
            { "instructions": "Hold a steady plank position for thirty seconds" },
            { "name": "Fourth Exercise Should Be Dropped" }
        ]);
        Mock::given(method("GET"))
            .and(path("/exercises"))
            .and(query_param("type", "cardio"))
            .and(query_param("offset", "0"))
            .and(header("X-Api-Key", "test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(&body))
            .expect(1)
            .mount(&server)
            .await;

        let suggester = suggester(&server, Some("test-key"));
        let result = suggester.suggest("cardio").await;

        assert_eq!(result.len(), 3);
        assert_eq!(result[0].name, "Burpees");
        assert_eq!(
            result[0].description,
            "Drop, push up, jump & repeat without pause"
        );
        assert_eq!(result[0].difficulty.as_deref(), Some("expert"));
        assert_eq!(result[0].muscle.as_deref(), Some("quadriceps"));

        // Missing fields pick up the defensive defaults.
        assert_eq!(result[1].description, DEFAULT_DESCRIPTION);
        assert_eq!(result[1].equipment, DEFAULT_EQUIPMENT);
        assert_eq!(result[1].difficulty.as_deref(), Some(DEFAULT_DIFFICULTY));
        assert_eq!(result[2].name, DEFAULT_NAME);
    }

    #[tokio::test]
    async fn test_flexibility_translates_to_stretching() {
        let server = MockServer::start().await;
        let body = serde_json::json!([{ "name": "Lunge Stretch" }]);
        Mock::given(method("GET"))
            .and(path("/exercises"))
            .and(query_param("type", "stretching"))
            .respond_with(ResponseTemplate::new(200).set_body_json(&body))
            .expect(1)
            .mount(&server)
            .await;

        let suggester = suggester(&server, Some("test-key"));
        let result = suggester.suggest("flexibility").await;
        assert_eq!(result[0].name, "Lunge Stretch");
    }

    #[tokio::test]
    async fn test_non_success_status_serves_fallback() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(429))
            .mount(&server)
            .await;

        let suggester = suggester(&server, Some("test-key"));
        let result = suggester.suggest("strength").await;
        assert_eq!(result, fallback_exercises(WorkoutType::Strength));
    }

    #[tokio::test]
    async fn test_malformed_body_serves_fallback() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let suggester = suggester(&server, Some("test-key"));
        let result = suggester.suggest("balance").await;
        assert_eq!(result, fallback_exercises(WorkoutType::Balance));
    }

    #[tokio::test]
    async fn test_empty_payload_serves_fallback() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .mount(&server)
            .await;

        let suggester = suggester(&server, Some("test-key"));
        let result = suggester.suggest("sport").await;
        assert_eq!(result, fallback_exercises(WorkoutType::Sport));
    }

    #[tokio::test]
    async fn test_timeout_serves_fallback_within_deadline() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!([{ "name": "Too Late" }]))
                    .set_delay(Duration::from_secs(5)),
            )
            .mount(&server)
            .await;

        let suggester =
            suggester(&server, Some("test-key")).with_timeout(Duration::from_millis(100));

        let start = Instant::now();
        let result = suggester.suggest("cardio").await;
        let elapsed = start.elapsed();

        assert_eq!(result, fallback_exercises(WorkoutType::Cardio));
        assert!(
            elapsed < Duration::from_secs(2),
            "fallback must arrive near the deadline, took {elapsed:?}"
        );
    }

    #[tokio::test]
    async fn test_connection_error_serves_fallback() {
        // Point at a server that is already gone.
        let server = MockServer::start().await;
        let uri = server.uri();
        drop(server);

        let suggester = ExerciseSuggester::new(uri, Some("test-key".to_string()));
        let result = suggester.suggest("other").await;
        assert_eq!(result, fallback_exercises(WorkoutType::Other));
    }

    #[test]
    fn test_mapping_cleans_mojibake_descriptions() {
        let record = ProviderExercise {
            name: Some("Split Squat".to_string()),
            instructions: Some("Donâ€™t let the front knee drift forward".to_string()),
            equipment: None,
            difficulty: None,
            muscle: None,
        };
        let exercise = map_provider_exercise(record);
        assert_eq!(
            exercise.description,
            "Don't let the front knee drift forward"
        );
    }

    #[test]
    fn test_mapping_defaults_unusably_short_description() {
        let record = ProviderExercise {
            name: Some("Dips".to_string()),
            instructions: Some("<b>Dip</b>".to_string()),
            equipment: None,
            difficulty: None,
            muscle: None,
        };
        let exercise = map_provider_exercise(record);
        assert_eq!(exercise.description, DEFAULT_DESCRIPTION);
    }
}
