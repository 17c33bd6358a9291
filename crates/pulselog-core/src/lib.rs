//! # pulselog-core
//!
//! Core types and pure logic for pulselog: search criteria normalization,
//! pagination bounds, free-text cleanup, and the repository traits the
//! persistence layer implements.
//!
//! Everything here is side-effect free; the database and HTTP layers live in
//! `pulselog-db`, `pulselog-suggest`, and `pulselog-api`.

pub mod criteria;
pub mod defaults;
pub mod error;
pub mod models;
pub mod pagination;
pub mod textnorm;
pub mod traits;

pub use criteria::{SearchCriteria, SearchParams};
pub use error::{Error, Result};
pub use models::{
    AuditEntry, Exercise, Intensity, MatchMode, NewUser, NewWorkout, SortKey, User, Workout,
    WorkoutType,
};
pub use pagination::{paginate, PageDescriptor};
pub use traits::{AuditRepository, UserRepository, WorkoutPage, WorkoutRepository};
