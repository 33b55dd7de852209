//! In-memory sink for tests and dry runs.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::Mutex;

use crate::error::{EtlError, Result};
use crate::traits::sink::PropertySink;
use crate::types::CleanedRecord;

#[derive(Default)]
pub struct MemorySink {
    rows: Mutex<Vec<CleanedRecord>>,
    fail_appends: AtomicBool,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make subsequent appends fail, as if the database were down.
    pub fn fail_appends(&self, fail: bool) {
        self.fail_appends.store(fail, Ordering::SeqCst);
    }

    pub async fn rows(&self) -> Vec<CleanedRecord> {
        self.rows.lock().await.clone()
    }
}

#[async_trait]
impl PropertySink for MemorySink {
    async fn ensure_table(&self) -> Result<()> {
        Ok(())
    }

    async fn append(&self, records: &[CleanedRecord]) -> Result<usize> {
        if self.fail_appends.load(Ordering::SeqCst) {
            return Err(EtlError::Database(sqlx::Error::PoolTimedOut));
        }
        self.rows.lock().await.extend_from_slice(records);
        Ok(records.len())
    }
}
