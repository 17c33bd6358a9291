//! Static fallback catalog.
//!
//! Served whenever the suggestion provider is unconfigured, unreachable,
//! rate-limited, or returns garbage. Initialized once at first use and
//! shared by read-only reference; safe for unsynchronized concurrent reads.

use std::collections::HashMap;

use once_cell::sync::Lazy;

use pulselog_core::{Exercise, WorkoutType};

fn entry(name: &str, description: &str, equipment: &str) -> Exercise {
    Exercise {
        name: name.to_string(),
        description: description.to_string(),
        equipment: equipment.to_string(),
        difficulty: None,
        muscle: None,
    }
}

static FALLBACKS: Lazy<HashMap<WorkoutType, Vec<Exercise>>> = Lazy::new(|| {
    HashMap::from([
        (
            WorkoutType::Cardio,
            vec![
                entry(
                    "Running",
                    "Excellent cardiovascular exercise that builds endurance and burns calories",
                    "Running shoes",
                ),
                entry(
                    "Jump Rope",
                    "High-intensity cardio workout that improves coordination and burns fat quickly",
                    "Jump rope",
                ),
                entry(
                    "Cycling",
                    "Low-impact cardio exercise suitable for all fitness levels, great for leg strength",
                    "Bicycle or stationary bike",
                ),
            ],
        ),
        (
            WorkoutType::Strength,
            vec![
                entry(
                    "Push-ups",
                    "Classic bodyweight exercise targeting chest, shoulders, and triceps. Great for upper body strength",
                    "None (bodyweight)",
                ),
                entry(
                    "Squats",
                    "Fundamental lower body exercise that builds leg strength, targets quads, glutes, and hamstrings",
                    "None (can add weights)",
                ),
                entry(
                    "Deadlifts",
                    "Compound exercise that works entire posterior chain, excellent for building overall strength",
                    "Barbell or dumbbells",
                ),
            ],
        ),
        (
            WorkoutType::Flexibility,
            vec![
                entry(
                    "Hamstring Stretch",
                    "Stretches the back of your thighs, important for lower back health and mobility",
                    "Yoga mat (optional)",
                ),
                entry(
                    "Cat-Cow Stretch",
                    "Dynamic spine stretch that improves flexibility and relieves back tension",
                    "Yoga mat",
                ),
                entry(
                    "Shoulder Rolls",
                    "Loosens tight shoulders and improves upper body mobility and posture",
                    "None",
                ),
            ],
        ),
        (
            WorkoutType::Balance,
            vec![
                entry(
                    "Single Leg Stand",
                    "Improves balance and ankle stability, great for injury prevention",
                    "None",
                ),
                entry(
                    "Tree Pose",
                    "Yoga balance pose that strengthens legs and improves focus and stability",
                    "Yoga mat (optional)",
                ),
                entry(
                    "Bosu Ball Exercises",
                    "Various balance exercises that challenge core stability and coordination",
                    "Bosu ball",
                ),
            ],
        ),
        (
            WorkoutType::Sport,
            vec![
                entry(
                    "Basketball Drills",
                    "Improves agility, coordination, and cardiovascular fitness through sport-specific movements",
                    "Basketball and court",
                ),
                entry(
                    "Tennis Practice",
                    "Develops hand-eye coordination, speed, and endurance through racket sports",
                    "Tennis racket and court",
                ),
                entry(
                    "Swimming Laps",
                    "Full-body workout that builds endurance while being easy on joints",
                    "Swimming pool and goggles",
                ),
            ],
        ),
        (
            WorkoutType::Other,
            vec![
                entry(
                    "Walking",
                    "Simple low-impact exercise perfect for beginners or active recovery days",
                    "Comfortable shoes",
                ),
                entry(
                    "Yoga Flow",
                    "Combines strength, flexibility, and mindfulness in one complete practice",
                    "Yoga mat",
                ),
                entry(
                    "Dancing",
                    "Fun way to improve cardiovascular fitness, coordination, and mood",
                    "Music and open space",
                ),
            ],
        ),
    ])
});

/// Curated fallback entries for a workout type. Every type has an entry;
/// anything missing resolves to the cardio set.
pub fn fallback_exercises(workout_type: WorkoutType) -> &'static [Exercise] {
    FALLBACKS
        .get(&workout_type)
        .or_else(|| FALLBACKS.get(&WorkoutType::Cardio))
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_type_has_at_most_three_entries() {
        for workout_type in WorkoutType::ALL {
            let entries = fallback_exercises(workout_type);
            assert!(!entries.is_empty());
            assert!(entries.len() <= 3);
        }
    }

    #[test]
    fn test_entries_are_deterministic_and_order_preserving() {
        let first = fallback_exercises(WorkoutType::Flexibility);
        let second = fallback_exercises(WorkoutType::Flexibility);
        assert_eq!(first, second);
        assert_eq!(first[0].name, "Hamstring Stretch");
        assert_eq!(first[2].name, "Shoulder Rolls");
    }

    #[test]
    fn test_catalog_entries_leave_provider_fields_unset() {
        for exercise in fallback_exercises(WorkoutType::Strength) {
            assert!(exercise.difficulty.is_none());
            assert!(exercise.muscle.is_none());
        }
    }
}
