use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::{PgPool, Row};

use crate::domain::repositories::{RosterRepository, StoreError};
use crate::domain::roster::{RosterRow, Status};

/// Stored-date format for the reset checkpoint
const DATE_FORMAT: &str = "%Y-%m-%d";

/// PostgreSQL implementation of RosterRepository
///
/// The configured sheet name addresses the table the roster lives in, with
/// a sibling `<sheet>_meta` table holding the single reset checkpoint.
/// Queries are assembled at runtime around the sheet name, which must
/// already be validated as a plain identifier.
///
/// `save` is a transactional whole-table rewrite: the store is treated as
/// one sheet that the last writer replaces in full.
pub struct PostgresRosterRepository {
    pool: PgPool,
    sheet: String,
}

impl PostgresRosterRepository {
    /// Creates a repository over the given pool and sheet name
    pub fn new(pool: PgPool, sheet: impl Into<String>) -> Self {
        Self {
            pool,
            sheet: sheet.into(),
        }
    }

    /// Creates the sheet and checkpoint tables if absent, and adds any
    /// missing columns with empty defaults
    ///
    /// The column additions run unconditionally so a pre-existing sheet
    /// that lacks some of the expected columns is healed as well.
    pub async fn ensure_schema(&self) -> Result<(), StoreError> {
        let statements = [
            format!(
                "CREATE TABLE IF NOT EXISTS {} (row_index BIGINT PRIMARY KEY)",
                self.sheet
            ),
            format!(
                "ALTER TABLE {} ADD COLUMN IF NOT EXISTS name TEXT NOT NULL DEFAULT ''",
                self.sheet
            ),
            format!(
                "ALTER TABLE {} ADD COLUMN IF NOT EXISTS team TEXT NOT NULL DEFAULT ''",
                self.sheet
            ),
            format!(
                "ALTER TABLE {} ADD COLUMN IF NOT EXISTS status TEXT NOT NULL DEFAULT ''",
                self.sheet
            ),
            format!(
                "ALTER TABLE {} ADD COLUMN IF NOT EXISTS comment TEXT NOT NULL DEFAULT ''",
                self.sheet
            ),
            format!(
                "ALTER TABLE {} ADD COLUMN IF NOT EXISTS last_updated TEXT NOT NULL DEFAULT ''",
                self.sheet
            ),
            format!(
                "ALTER TABLE {} ADD COLUMN IF NOT EXISTS is_long_term BOOLEAN NOT NULL DEFAULT FALSE",
                self.sheet
            ),
            format!(
                "CREATE TABLE IF NOT EXISTS {}_meta (id SMALLINT PRIMARY KEY, last_reset_date TEXT NOT NULL DEFAULT '')",
                self.sheet
            ),
        ];

        for sql in &statements {
            sqlx::query(sql)
                .execute(&self.pool)
                .await
                .map_err(|e| StoreError::Unavailable(format!("schema setup failed: {}", e)))?;
        }

        Ok(())
    }
}

#[async_trait]
impl RosterRepository for PostgresRosterRepository {
    async fn load(&self) -> Result<Vec<RosterRow>, StoreError> {
        let sql = format!(
            "SELECT name, team, status, comment, last_updated, is_long_term \
             FROM {} ORDER BY row_index",
            self.sheet
        );

        let rows = sqlx::query(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| StoreError::Unavailable(format!("failed to read sheet: {}", e)))?;

        // NULL cells normalize to empty defaults, unknown status text to
        // NotUpdated; a malformed row is repaired, never rejected
        Ok(rows
            .into_iter()
            .map(|row| RosterRow {
                name: row.try_get::<Option<String>, _>("name").ok().flatten().unwrap_or_default(),
                team: row.try_get::<Option<String>, _>("team").ok().flatten().unwrap_or_default(),
                status: Status::parse(
                    &row.try_get::<Option<String>, _>("status").ok().flatten().unwrap_or_default(),
                ),
                comment: row
                    .try_get::<Option<String>, _>("comment")
                    .ok()
                    .flatten()
                    .unwrap_or_default(),
                last_updated: row
                    .try_get::<Option<String>, _>("last_updated")
                    .ok()
                    .flatten()
                    .unwrap_or_default(),
                is_long_term: row
                    .try_get::<Option<bool>, _>("is_long_term")
                    .ok()
                    .flatten()
                    .unwrap_or(false),
            })
            .collect())
    }

    async fn save(&self, rows: &[RosterRow]) -> Result<(), StoreError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| StoreError::Unavailable(format!("failed to open transaction: {}", e)))?;

        let delete = format!("DELETE FROM {}", self.sheet);
        sqlx::query(&delete)
            .execute(&mut *tx)
            .await
            .map_err(|e| StoreError::Unavailable(format!("failed to clear sheet: {}", e)))?;

        let insert = format!(
            "INSERT INTO {} (row_index, name, team, status, comment, last_updated, is_long_term) \
             VALUES ($1, $2, $3, $4, $5, $6, $7)",
            self.sheet
        );
        for (index, row) in rows.iter().enumerate() {
            sqlx::query(&insert)
                .bind(index as i64)
                .bind(&row.name)
                .bind(&row.team)
                .bind(row.status.as_str())
                .bind(&row.comment)
                .bind(&row.last_updated)
                .bind(row.is_long_term)
                .execute(&mut *tx)
                .await
                .map_err(|e| StoreError::Unavailable(format!("failed to write sheet: {}", e)))?;
        }

        tx.commit()
            .await
            .map_err(|e| StoreError::Unavailable(format!("failed to commit sheet: {}", e)))
    }

    async fn last_reset_date(&self) -> Result<Option<NaiveDate>, StoreError> {
        let sql = format!("SELECT last_reset_date FROM {}_meta WHERE id = 1", self.sheet);

        let row = sqlx::query(&sql)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| StoreError::Unavailable(format!("failed to read checkpoint: {}", e)))?;

        // Unparseable checkpoint text normalizes to "never reset"
        Ok(row
            .and_then(|r| r.try_get::<Option<String>, _>("last_reset_date").ok().flatten())
            .and_then(|raw| NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT).ok()))
    }

    async fn set_last_reset_date(&self, date: NaiveDate) -> Result<(), StoreError> {
        let sql = format!(
            "INSERT INTO {}_meta (id, last_reset_date) VALUES (1, $1) \
             ON CONFLICT (id) DO UPDATE SET last_reset_date = EXCLUDED.last_reset_date",
            self.sheet
        );

        sqlx::query(&sql)
            .bind(date.format(DATE_FORMAT).to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::Unavailable(format!("failed to write checkpoint: {}", e)))?;

        Ok(())
    }
}
