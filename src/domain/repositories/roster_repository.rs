use async_trait::async_trait;
use chrono::NaiveDate;
use thiserror::Error;

use crate::domain::roster::RosterRow;

/// Errors surfaced by a roster store
///
/// Malformed data never errors; it is normalized on read. The only failure
/// mode the domain sees is the store being unreachable or refusing the
/// operation.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Repository trait for the roster store
///
/// The store is a whole-table affair: `load` reads every row in store
/// order, `save` replaces the full row set (last writer wins). The reset
/// checkpoint is one global date per store.
#[async_trait]
pub trait RosterRepository: Send + Sync {
    /// Read all rows, in store order
    async fn load(&self) -> Result<Vec<RosterRow>, StoreError>;

    /// Replace the full row set
    async fn save(&self, rows: &[RosterRow]) -> Result<(), StoreError>;

    /// Date of the last full-board reset, if any
    async fn last_reset_date(&self) -> Result<Option<NaiveDate>, StoreError>;

    /// Record a full-board reset for the given date
    async fn set_last_reset_date(&self, date: NaiveDate) -> Result<(), StoreError>;
}
