use std::sync::Mutex;

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::repositories::{RosterRepository, StoreError};
use crate::domain::roster::RosterRow;

/// In-process implementation of RosterRepository
///
/// Keeps the whole board behind a mutex. The integration suite runs the
/// full HTTP stack against this adapter; it also works as a throwaway dev
/// backend.
#[derive(Default)]
pub struct MemoryRosterRepository {
    rows: Mutex<Vec<RosterRow>>,
    last_reset: Mutex<Option<NaiveDate>>,
}

impl MemoryRosterRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with the given rows
    pub fn with_rows(rows: Vec<RosterRow>) -> Self {
        Self {
            rows: Mutex::new(rows),
            last_reset: Mutex::new(None),
        }
    }
}

#[async_trait]
impl RosterRepository for MemoryRosterRepository {
    async fn load(&self) -> Result<Vec<RosterRow>, StoreError> {
        let rows = self
            .rows
            .lock()
            .map_err(|_| StoreError::Unavailable("poisoned store lock".to_string()))?;
        Ok(rows.clone())
    }

    async fn save(&self, new_rows: &[RosterRow]) -> Result<(), StoreError> {
        let mut rows = self
            .rows
            .lock()
            .map_err(|_| StoreError::Unavailable("poisoned store lock".to_string()))?;
        *rows = new_rows.to_vec();
        Ok(())
    }

    async fn last_reset_date(&self) -> Result<Option<NaiveDate>, StoreError> {
        let last_reset = self
            .last_reset
            .lock()
            .map_err(|_| StoreError::Unavailable("poisoned checkpoint lock".to_string()))?;
        Ok(*last_reset)
    }

    async fn set_last_reset_date(&self, date: NaiveDate) -> Result<(), StoreError> {
        let mut last_reset = self
            .last_reset
            .lock()
            .map_err(|_| StoreError::Unavailable("poisoned checkpoint lock".to_string()))?;
        *last_reset = Some(date);
        Ok(())
    }
}
