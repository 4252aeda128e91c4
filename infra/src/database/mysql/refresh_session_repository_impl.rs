//! MySQL implementation of the refresh session store.
//!
//! Rotation is a conditional `UPDATE ... WHERE id = ? AND version = ?` inside a
//! transaction; the affected-row count tells the caller whether it won.

use async_trait::async_trait;
use sqlx::{mysql::MySqlRow, MySqlPool, Row};
use uuid::Uuid;

use gk_core::domain::entities::RefreshSession;
use gk_core::errors::DomainError;
use gk_core::repositories::RefreshSessionRepository;

use super::{db_error, is_duplicate};

const SESSION_COLUMNS: &str =
    "id, uuid, created_at, jti, subject, hash, last_refreshed_at, version";

pub struct MySqlRefreshSessionRepository {
    pool: MySqlPool,
}

impl MySqlRefreshSessionRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_session(row: &MySqlRow) -> Result<RefreshSession, DomainError> {
        let uuid: String = row
            .try_get("uuid")
            .map_err(|e| db_error("Failed to get uuid", e))?;

        Ok(RefreshSession {
            id: row.try_get("id").map_err(|e| db_error("Failed to get id", e))?,
            uuid: Uuid::parse_str(&uuid).map_err(|e| DomainError::Internal {
                message: format!("Invalid session UUID: {}", e),
            })?,
            created_at: row
                .try_get("created_at")
                .map_err(|e| db_error("Failed to get created_at", e))?,
            jti: row.try_get("jti").map_err(|e| db_error("Failed to get jti", e))?,
            subject: row
                .try_get("subject")
                .map_err(|e| db_error("Failed to get subject", e))?,
            hash: row.try_get("hash").map_err(|e| db_error("Failed to get hash", e))?,
            last_refreshed_at: row
                .try_get("last_refreshed_at")
                .map_err(|e| db_error("Failed to get last_refreshed_at", e))?,
            version: row
                .try_get("version")
                .map_err(|e| db_error("Failed to get version", e))?,
        })
    }

    async fn find_one(&self, column: &str, value: &str) -> Result<Option<RefreshSession>, DomainError> {
        let query = format!(
            "SELECT {} FROM refresh_sessions WHERE {} = ? LIMIT 1",
            SESSION_COLUMNS, column
        );

        let row = sqlx::query(&query)
            .bind(value)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("Failed to find refresh session", e))?;

        row.as_ref().map(Self::row_to_session).transpose()
    }
}

#[async_trait]
impl RefreshSessionRepository for MySqlRefreshSessionRepository {
    async fn find_by_hash(&self, hash: &str) -> Result<Option<RefreshSession>, DomainError> {
        self.find_one("hash", hash).await
    }

    async fn find_by_jti(&self, jti: &str) -> Result<Option<RefreshSession>, DomainError> {
        self.find_one("jti", jti).await
    }

    async fn find_by_subject(&self, subject: &str) -> Result<Option<RefreshSession>, DomainError> {
        let query = format!(
            "SELECT {} FROM refresh_sessions WHERE subject = ? ORDER BY created_at DESC, id DESC LIMIT 1",
            SESSION_COLUMNS
        );

        let row = sqlx::query(&query)
            .bind(subject)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("Failed to find refresh session by subject", e))?;

        row.as_ref().map(Self::row_to_session).transpose()
    }

    async fn save(&self, session: RefreshSession) -> Result<RefreshSession, DomainError> {
        let query = r#"
            INSERT INTO refresh_sessions (
                uuid, created_at, jti, subject, hash, last_refreshed_at, version
            ) VALUES (?, ?, ?, ?, ?, ?, ?)
        "#;

        let result = sqlx::query(query)
            .bind(session.uuid.to_string())
            .bind(session.created_at)
            .bind(&session.jti)
            .bind(&session.subject)
            .bind(&session.hash)
            .bind(session.last_refreshed_at)
            .bind(session.version)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                if is_duplicate(&e) {
                    DomainError::internal("refresh session jti or hash already exists")
                } else {
                    db_error("Failed to save refresh session", e)
                }
            })?;

        Ok(RefreshSession {
            id: result.last_insert_id() as i64,
            ..session
        })
    }

    async fn rotate(&self, session: &RefreshSession, expected_version: i64) -> Result<bool, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| db_error("Failed to begin rotation", e))?;

        let query = r#"
            UPDATE refresh_sessions
            SET jti = ?, hash = ?, last_refreshed_at = ?, version = ?
            WHERE id = ? AND version = ?
        "#;

        // dropping `tx` on any early return rolls the update back
        let result = sqlx::query(query)
            .bind(&session.jti)
            .bind(&session.hash)
            .bind(session.last_refreshed_at)
            .bind(session.version)
            .bind(session.id)
            .bind(expected_version)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                if is_duplicate(&e) {
                    DomainError::internal("rotated jti or hash collides with another session")
                } else {
                    db_error("Failed to rotate refresh session", e)
                }
            })?;

        let won = result.rows_affected() == 1;
        if !won {
            tracing::debug!(session_id = session.id, expected_version, "rotation lost version check");
        }

        tx.commit()
            .await
            .map_err(|e| db_error("Failed to commit rotation", e))?;

        Ok(won)
    }

    async fn remove(&self, session: &RefreshSession) -> Result<(), DomainError> {
        sqlx::query("DELETE FROM refresh_sessions WHERE id = ?")
            .bind(session.id)
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("Failed to remove refresh session", e))?;
        Ok(())
    }

    async fn remove_by_subject(&self, subject: &str) -> Result<u64, DomainError> {
        let result = sqlx::query("DELETE FROM refresh_sessions WHERE subject = ?")
            .bind(subject)
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("Failed to remove refresh sessions by subject", e))?;
        Ok(result.rows_affected())
    }
}
