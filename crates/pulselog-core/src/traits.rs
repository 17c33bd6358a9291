//! Repository traits for pulselog abstractions.
//!
//! These traits define the persistence interfaces the database layer
//! implements, keeping handlers testable against alternative backends.

use async_trait::async_trait;
use serde::Serialize;

use crate::criteria::SearchCriteria;
use crate::error::Result;
use crate::models::{AuditEntry, NewUser, NewWorkout, User, Workout};
use crate::pagination::PageDescriptor;

/// One page of a user's workout history together with its resolved bounds.
#[derive(Debug, Clone, Serialize)]
pub struct WorkoutPage {
    pub items: Vec<Workout>,
    #[serde(flatten)]
    pub page: PageDescriptor,
}

/// Repository for workout reads and the single insert shape.
#[async_trait]
pub trait WorkoutRepository: Send + Sync {
    /// Filtered search across all users' workouts, capped at `limit` rows.
    async fn search(&self, criteria: &SearchCriteria, limit: i64) -> Result<Vec<Workout>>;

    /// One page of a user's history, newest first. A page past the end
    /// returns empty items, not an error.
    async fn list_page(&self, user_id: i64, page_raw: Option<&str>) -> Result<WorkoutPage>;

    /// Insert a validated workout, returning its id.
    async fn insert(&self, workout: NewWorkout) -> Result<i64>;
}

/// Repository for user registration and credential lookup.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new user, returning their id.
    async fn insert(&self, user: NewUser) -> Result<i64>;

    /// Look up a user by exact username.
    async fn find_by_username(&self, username: &str) -> Result<Option<User>>;

    /// Check whether a username is already taken.
    async fn username_exists(&self, username: &str) -> Result<bool>;

    /// Check whether an email is already registered.
    async fn email_exists(&self, email: &str) -> Result<bool>;
}

/// Repository for audit-log writes.
#[async_trait]
pub trait AuditRepository: Send + Sync {
    /// Record an audit event. Must never fail the surrounding operation;
    /// implementations swallow and log their own errors.
    async fn record(&self, entry: AuditEntry);
}
