//! Load stage: append the cleaned dataset to the destination table.

pub mod memory;
pub mod postgres;

use serde::Serialize;
use std::sync::Arc;
use tracing::info;

pub use crate::traits::sink::PropertySink;
pub use memory::MemorySink;
pub use postgres::PostgresSink;

use crate::codec;
use crate::error::Result;
use crate::staging::{layout, StagingArea, StagingLayout};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoadOutcome {
    pub source_key: String,
    pub archive_key: String,
    pub rows: usize,
}

pub struct Loader {
    staging: StagingArea,
    sink: Arc<dyn PropertySink>,
}

impl Loader {
    pub fn new(staging: StagingArea, sink: Arc<dyn PropertySink>) -> Self {
        Self { staging, sink }
    }

    /// Load one transformed artifact, if any is staged.
    ///
    /// Pure append: rows already loaded by an earlier run are not detected.
    /// The artifact is archived and removed only after the append succeeded.
    pub async fn run(&self) -> Result<Option<LoadOutcome>> {
        let Some(mut artifact) = self
            .staging
            .find_artifact(layout::TRANSFORMED_TO_PROCESS, layout::ARTIFACT_SUFFIX)
            .await?
        else {
            info!("No transformed file found to load");
            return Ok(None);
        };

        let source_key = artifact.key().to_string();
        let content = self.staging.claim(&mut artifact).await?;
        let records = codec::decode_cleaned(&content)?;

        self.sink.ensure_table().await?;
        let rows = self.sink.append(&records).await?;
        info!(key = %source_key, rows, "Appended rows to database");

        let archive_key = StagingLayout::transformed_archive_key(&source_key);
        self.staging
            .archive(&mut artifact, &archive_key, content)
            .await?;

        Ok(Some(LoadOutcome {
            source_key,
            archive_key,
            rows,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::staging::layout::{TRANSFORMED_ARCHIVE, TRANSFORMED_TO_PROCESS};
    use crate::stores::MemoryObjectStore;
    use crate::traits::store::ObjectStore;
    use crate::types::{CleanedRecord, Region};

    const KEY: &str = "transformed_data/to_process/transformed_properties_2024_05_01_080000.csv";

    fn record(link: &str) -> CleanedRecord {
        CleanedRecord {
            purpose: "Pronajem bytu 2+kk".to_string(),
            address: "Korunni".to_string(),
            region: Region::Praha,
            size_m2: 50,
            design: Some("2+kk".to_string()),
            price_czk: 25_000,
            price_per_m2: Some(500),
            link: link.to_string(),
            dump_date: "2024-05-01".to_string(),
            file_name: "raw_properties_2024_05_01_080000.csv".to_string(),
        }
    }

    async fn setup() -> (Arc<MemoryObjectStore>, Arc<MemorySink>, Loader) {
        let store = Arc::new(MemoryObjectStore::new());
        let sink = Arc::new(MemorySink::new());
        let loader = Loader::new(StagingArea::new(store.clone()), sink.clone());
        (store, sink, loader)
    }

    #[tokio::test]
    async fn nothing_staged_is_a_no_op() {
        let (_store, sink, loader) = setup().await;
        assert_eq!(loader.run().await.unwrap(), None);
        assert!(sink.rows().await.is_empty());
    }

    #[tokio::test]
    async fn appends_rows_and_archives() {
        let (store, sink, loader) = setup().await;
        let body = codec::encode_cleaned(&[record("/a"), record("/b")]).unwrap();
        store.put(KEY, body.into_bytes()).await.unwrap();

        let outcome = loader.run().await.unwrap().unwrap();
        assert_eq!(outcome.rows, 2);
        assert_eq!(
            outcome.archive_key,
            "transformed_data/archive/transformed_properties_2024_05_01_080000.csv"
        );

        assert_eq!(sink.rows().await, vec![record("/a"), record("/b")]);
        assert!(store.list(TRANSFORMED_TO_PROCESS).await.unwrap().is_empty());
        assert_eq!(store.list(TRANSFORMED_ARCHIVE).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn failed_append_leaves_artifact_staged() {
        let (store, sink, loader) = setup().await;
        let body = codec::encode_cleaned(&[record("/a")]).unwrap();
        store.put(KEY, body.into_bytes()).await.unwrap();
        sink.fail_appends(true);

        assert!(loader.run().await.is_err());
        assert!(store.exists(KEY).await.unwrap());
        assert!(store.list(TRANSFORMED_ARCHIVE).await.unwrap().is_empty());
    }
}
