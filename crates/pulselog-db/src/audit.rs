//! Audit-log writes.

use async_trait::async_trait;
use sqlx::MySqlPool;
use tracing::warn;

use pulselog_core::{AuditEntry, AuditRepository};

/// MySQL implementation of AuditRepository.
///
/// Write failures are logged and swallowed: an unavailable audit table must
/// never fail a login.
#[derive(Clone)]
pub struct MySqlAuditRepository {
    pool: MySqlPool,
}

impl MySqlAuditRepository {
    /// Create a new MySqlAuditRepository with the given connection pool.
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AuditRepository for MySqlAuditRepository {
    async fn record(&self, entry: AuditEntry) {
        let result = sqlx::query(
            "INSERT INTO audit_log (username, action, status, ip, user_agent, details) \
             VALUES (?,?,?,?,?,?)",
        )
        .bind(&entry.username)
        .bind(&entry.action)
        .bind(&entry.status)
        .bind(&entry.ip)
        .bind(&entry.user_agent)
        .bind(&entry.details)
        .execute(&self.pool)
        .await;

        if let Err(e) = result {
            warn!(
                subsystem = "db",
                component = "audit",
                action = %entry.action,
                error = %e,
                "Failed to write audit entry"
            );
        }
    }
}
