//! Transform stage.

pub mod clean;
pub mod parse;

use chrono::Utc;
use serde::Serialize;
use tracing::info;

pub use clean::{clean_and_transform, dedupe_by_link, dump_date_at, transform, TransformedDataset};

use crate::codec;
use crate::error::Result;
use crate::staging::{layout, StagingArea, StagingLayout};

/// What a transform run did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransformOutcome {
    pub source_key: String,
    pub transformed_key: String,
    pub archive_key: String,
    pub raw_rows: usize,
    pub cleaned_rows: usize,
}

/// Consumes the staged raw dataset and publishes the cleaned one.
pub struct Transformer {
    staging: StagingArea,
}

impl Transformer {
    pub fn new(staging: StagingArea) -> Self {
        Self { staging }
    }

    /// Process one raw artifact, if any is staged.
    ///
    /// Order of side effects: publish the cleaned dataset, write the raw
    /// archive copy, delete the raw original.
    pub async fn run(&self) -> Result<Option<TransformOutcome>> {
        let Some(mut artifact) = self
            .staging
            .find_artifact(layout::RAW_TO_PROCESS, layout::ARTIFACT_SUFFIX)
            .await?
        else {
            info!("No raw CSV file to transform");
            return Ok(None);
        };

        let source_key = artifact.key().to_string();
        info!(key = %source_key, "Transforming raw dataset");

        let content = self.staging.claim(&mut artifact).await?;
        let raw = codec::decode_raw(&content)?;
        let raw_rows = raw.len();

        let dataset = transform(raw, &source_key, &dump_date_at(Utc::now()))?;
        let cleaned_body = codec::encode_cleaned(&dataset.cleaned)?;
        let archive_body = codec::encode_raw(&dataset.archived)?;

        let transformed_key = StagingLayout::transformed_key(&source_key);
        let archive_key = StagingLayout::raw_archive_key(&source_key);

        self.staging.publish(&transformed_key, cleaned_body).await?;
        self.staging
            .archive(&mut artifact, &archive_key, archive_body)
            .await?;

        let outcome = TransformOutcome {
            source_key,
            transformed_key,
            archive_key,
            raw_rows,
            cleaned_rows: dataset.cleaned.len(),
        };
        info!(
            raw_rows = outcome.raw_rows,
            cleaned_rows = outcome.cleaned_rows,
            "Transform complete"
        );
        Ok(Some(outcome))
    }
}
