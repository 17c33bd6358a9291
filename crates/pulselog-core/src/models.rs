//! Domain models for pulselog.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::Error;

// =============================================================================
// CLOSED VOCABULARIES
// =============================================================================

/// Workout categories accepted on the write path and in search filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkoutType {
    Cardio,
    Strength,
    Flexibility,
    Balance,
    Sport,
    Other,
}

impl WorkoutType {
    /// All accepted categories, in canonical order.
    pub const ALL: [WorkoutType; 6] = [
        WorkoutType::Cardio,
        WorkoutType::Strength,
        WorkoutType::Flexibility,
        WorkoutType::Balance,
        WorkoutType::Sport,
        WorkoutType::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            WorkoutType::Cardio => "cardio",
            WorkoutType::Strength => "strength",
            WorkoutType::Flexibility => "flexibility",
            WorkoutType::Balance => "balance",
            WorkoutType::Sport => "sport",
            WorkoutType::Other => "other",
        }
    }
}

impl fmt::Display for WorkoutType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WorkoutType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cardio" => Ok(WorkoutType::Cardio),
            "strength" => Ok(WorkoutType::Strength),
            "flexibility" => Ok(WorkoutType::Flexibility),
            "balance" => Ok(WorkoutType::Balance),
            "sport" => Ok(WorkoutType::Sport),
            "other" => Ok(WorkoutType::Other),
            other => Err(Error::Validation(format!("unknown workout type: {other}"))),
        }
    }
}

/// Workout intensity with an explicit severity ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Intensity {
    Low,
    Medium,
    High,
}

impl Intensity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Intensity::Low => "low",
            Intensity::Medium => "medium",
            Intensity::High => "high",
        }
    }

    /// Severity rank: high > medium > low.
    pub fn rank(&self) -> u8 {
        match self {
            Intensity::High => 3,
            Intensity::Medium => 2,
            Intensity::Low => 1,
        }
    }
}

impl fmt::Display for Intensity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Intensity {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(Intensity::Low),
            "medium" => Ok(Intensity::Medium),
            "high" => Ok(Intensity::High),
            other => Err(Error::Validation(format!("unknown intensity: {other}"))),
        }
    }
}

/// Free-text matching behavior for search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    Exact,
    #[default]
    Partial,
}

impl FromStr for MatchMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "exact" => Ok(MatchMode::Exact),
            "partial" => Ok(MatchMode::Partial),
            other => Err(Error::Validation(format!("unknown match mode: {other}"))),
        }
    }
}

/// Logical sort keys resolvable through the ordering whitelist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    #[default]
    Date,
    Duration,
    Intensity,
}

impl FromStr for SortKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "date" => Ok(SortKey::Date),
            "duration" => Ok(SortKey::Duration),
            "intensity" => Ok(SortKey::Intensity),
            other => Err(Error::Validation(format!("unknown sort key: {other}"))),
        }
    }
}

// =============================================================================
// PERSISTED RECORDS
// =============================================================================

/// A workout row as read back for rendering, joined with its owner's username.
///
/// Type and intensity stay as raw strings on the read path; the validated
/// write model ([`NewWorkout`]) carries the typed enums.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Workout {
    pub id: i64,
    pub user_id: i64,
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub workout_type: String,
    pub duration_minutes: i32,
    pub intensity: String,
    pub notes: Option<String>,
    pub username: String,
}

/// A validated workout ready for insertion.
#[derive(Debug, Clone)]
pub struct NewWorkout {
    pub user_id: i64,
    pub date: NaiveDate,
    pub workout_type: WorkoutType,
    pub duration_minutes: i32,
    pub intensity: Intensity,
    pub notes: Option<String>,
}

/// A registered user. The hash never leaves the process boundary.
#[derive(Debug, Clone, Serialize)]
pub struct User {
    pub user_id: i64,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub hashed_password: String,
    pub first_name: String,
    pub last_name: String,
}

/// A validated registration ready for insertion.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub hashed_password: String,
    pub first_name: String,
    pub last_name: String,
}

/// One audit-log event.
#[derive(Debug, Clone)]
pub struct AuditEntry {
    pub username: String,
    pub action: String,
    pub status: String,
    pub ip: String,
    pub user_agent: String,
    pub details: Option<String>,
}

// =============================================================================
// SUGGESTIONS
// =============================================================================

/// One exercise suggestion, from the provider or the fallback catalog.
///
/// `difficulty` and `muscle` are only known for live provider results; the
/// curated catalog leaves them unset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exercise {
    pub name: String,
    pub description: String,
    pub equipment: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub muscle: Option<String>,
}
