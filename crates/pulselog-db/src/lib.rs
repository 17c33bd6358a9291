//! # pulselog-db
//!
//! MySQL persistence layer for pulselog.
//!
//! This crate provides:
//! - Connection pool management
//! - The workout filter query builder (parameterized, whitelist-ordered)
//! - Repository implementations for workouts, users, and the audit log
//!
//! ## Example
//!
//! ```rust,ignore
//! use pulselog_core::{SearchCriteria, WorkoutRepository};
//! use pulselog_db::Database;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let db = Database::connect("mysql://localhost/pulselog").await?;
//!     let rows = db.workouts.search(&SearchCriteria::new(), 100).await?;
//!     println!("{} workouts", rows.len());
//!     Ok(())
//! }
//! ```

pub mod audit;
pub mod filter;
pub mod pool;
pub mod users;
pub mod workouts;

// Re-export core types
pub use pulselog_core::*;

// Re-export repository implementations
pub use audit::MySqlAuditRepository;
pub use filter::{escape_like, QueryParam, QuerySpec, WorkoutQueryBuilder};
pub use pool::{create_pool, create_pool_with_config, PoolConfig};
pub use users::MySqlUserRepository;
pub use workouts::MySqlWorkoutRepository;

use sqlx::MySqlPool;

/// Aggregate handle bundling all repositories over one shared pool.
#[derive(Clone)]
pub struct Database {
    pub pool: MySqlPool,
    pub workouts: MySqlWorkoutRepository,
    pub users: MySqlUserRepository,
    pub audit: MySqlAuditRepository,
}

impl Database {
    /// Connect and build all repositories over a shared pool.
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = pool::create_pool(database_url).await?;
        Ok(Self::from_pool(pool))
    }

    /// Build repositories over an existing pool (tests, custom pool config).
    pub fn from_pool(pool: MySqlPool) -> Self {
        Self {
            workouts: MySqlWorkoutRepository::new(pool.clone()),
            users: MySqlUserRepository::new(pool.clone()),
            audit: MySqlAuditRepository::new(pool.clone()),
            pool,
        }
    }

    /// Liveness probe used by the health endpoint.
    pub async fn ping(&self) -> Result<()> {
        sqlx::query_scalar::<_, i64>("SELECT 1")
            .fetch_one(&self.pool)
            .await?;
        Ok(())
    }
}
