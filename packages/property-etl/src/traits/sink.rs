use async_trait::async_trait;

use crate::error::Result;
use crate::types::CleanedRecord;

/// Append-only destination for cleaned listings.
#[async_trait]
pub trait PropertySink: Send + Sync {
    /// Create the destination table if it does not exist yet.
    async fn ensure_table(&self) -> Result<()>;

    /// Append rows, returning how many were written. No upsert.
    async fn append(&self, records: &[CleanedRecord]) -> Result<usize>;
}
