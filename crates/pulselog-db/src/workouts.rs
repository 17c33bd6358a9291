//! Workout repository implementation.

use async_trait::async_trait;
use sqlx::mysql::{MySqlArguments, MySqlRow};
use sqlx::{MySqlPool, Row};
use tracing::debug;

use pulselog_core::{
    paginate, NewWorkout, Result, SearchCriteria, Workout, WorkoutPage, WorkoutRepository,
};

use crate::filter::{QueryParam, WorkoutQueryBuilder};

/// Columns shared by every workout read, joined with the owner's username.
const SELECT_WORKOUTS: &str = "SELECT w.id, w.user_id, w.date, w.type, w.duration_minutes, \
     w.intensity, w.notes, u.username \
     FROM workouts w JOIN users u ON w.user_id = u.user_id";

/// MySQL implementation of WorkoutRepository.
#[derive(Clone)]
pub struct MySqlWorkoutRepository {
    pool: MySqlPool,
}

impl MySqlWorkoutRepository {
    /// Create a new MySqlWorkoutRepository with the given connection pool.
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

fn map_row_to_workout(row: MySqlRow) -> Workout {
    Workout {
        id: row.get("id"),
        user_id: row.get("user_id"),
        date: row.get("date"),
        workout_type: row.get("type"),
        duration_minutes: row.get("duration_minutes"),
        intensity: row.get("intensity"),
        notes: row.get("notes"),
        username: row.get("username"),
    }
}

fn bind_params<'q>(
    mut query: sqlx::query::Query<'q, sqlx::MySql, MySqlArguments>,
    params: &'q [QueryParam],
) -> sqlx::query::Query<'q, sqlx::MySql, MySqlArguments> {
    for param in params {
        query = match param {
            QueryParam::Str(v) => query.bind(v),
            QueryParam::Int(v) => query.bind(v),
        };
    }
    query
}

#[async_trait]
impl WorkoutRepository for MySqlWorkoutRepository {
    async fn search(&self, criteria: &SearchCriteria, limit: i64) -> Result<Vec<Workout>> {
        let spec = WorkoutQueryBuilder::new(criteria, limit).build();
        let sql = format!(
            "{} {} ORDER BY {} LIMIT {}",
            SELECT_WORKOUTS,
            spec.where_sql(),
            spec.order_by,
            spec.limit
        );

        debug!(
            subsystem = "db",
            component = "workouts",
            op = "search",
            clause_count = spec.clauses.len(),
            "Executing workout search"
        );

        let rows = bind_params(sqlx::query(&sql), &spec.params)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(map_row_to_workout).collect())
    }

    async fn list_page(&self, user_id: i64, page_raw: Option<&str>) -> Result<WorkoutPage> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM workouts WHERE user_id = ?")
            .bind(user_id)
            .fetch_one(&self.pool)
            .await?;

        let page = paginate(page_raw, total);

        let sql = format!(
            "{} WHERE w.user_id = ? ORDER BY w.date DESC LIMIT ? OFFSET ?",
            SELECT_WORKOUTS
        );
        let rows = sqlx::query(&sql)
            .bind(user_id)
            .bind(page.page_size)
            .bind(page.offset)
            .fetch_all(&self.pool)
            .await?;

        debug!(
            subsystem = "db",
            component = "workouts",
            op = "list_page",
            user_id,
            page = page.page,
            result_count = rows.len(),
            "Fetched workout history page"
        );

        Ok(WorkoutPage {
            items: rows.into_iter().map(map_row_to_workout).collect(),
            page,
        })
    }

    async fn insert(&self, workout: NewWorkout) -> Result<i64> {
        let result = sqlx::query(
            "INSERT INTO workouts (user_id, date, type, duration_minutes, intensity, notes) \
             VALUES (?,?,?,?,?,?)",
        )
        .bind(workout.user_id)
        .bind(workout.date)
        .bind(workout.workout_type.as_str())
        .bind(workout.duration_minutes)
        .bind(workout.intensity.as_str())
        .bind(&workout.notes)
        .execute(&self.pool)
        .await?;

        Ok(result.last_insert_id() as i64)
    }
}
