//! The daily ETL workflow: extract, sense, transform, sense, load.
//!
//! Each step is also exposed on its own so the CLI can run a single stage.

use chrono::Utc;
use serde::Serialize;
use tracing::info;

use crate::config::SensorConfig;
use crate::error::Result;
use crate::extract::Extractor;
use crate::load::{LoadOutcome, Loader};
use crate::staging::{layout, KeySensor, StagingArea, StagingLayout};
use crate::transform::{TransformOutcome, Transformer};

/// Result of one full workflow run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub raw_key: String,
    pub transform: Option<TransformOutcome>,
    pub load: Option<LoadOutcome>,
}

pub struct EtlPipeline {
    extractor: Extractor,
    staging: StagingArea,
    transformer: Transformer,
    loader: Loader,
    sensors: SensorConfig,
}

impl EtlPipeline {
    pub fn new(
        extractor: Extractor,
        staging: StagingArea,
        loader: Loader,
        sensors: SensorConfig,
    ) -> Self {
        Self {
            extractor,
            transformer: Transformer::new(staging.clone()),
            staging,
            loader,
            sensors,
        }
    }

    /// Scrape all pages and publish the raw dataset under a timestamped key.
    pub async fn extract_and_stage(&self) -> Result<String> {
        let body = self.extractor.extract().await?;
        let key = StagingLayout::raw_key(Utc::now());
        self.staging.publish(&key, body).await?;
        Ok(key)
    }

    pub async fn sense_raw(&self) -> Result<String> {
        let sensor = KeySensor::new(self.sensors.poke_interval, self.sensors.raw_timeout);
        self.staging.wait_for(&sensor, layout::RAW_PATTERN).await
    }

    pub async fn transform(&self) -> Result<Option<TransformOutcome>> {
        self.transformer.run().await
    }

    pub async fn sense_transformed(&self) -> Result<String> {
        let sensor = KeySensor::new(
            self.sensors.poke_interval,
            self.sensors.transformed_timeout,
        );
        self.staging
            .wait_for(&sensor, layout::TRANSFORMED_PATTERN)
            .await
    }

    pub async fn load(&self) -> Result<Option<LoadOutcome>> {
        self.loader.run().await
    }

    /// Run every step in order. The first failure stops the run; later steps
    /// are not attempted.
    pub async fn run(&self) -> Result<RunSummary> {
        let started = std::time::Instant::now();
        info!("Starting ETL run");

        let raw_key = self.extract_and_stage().await?;
        self.sense_raw().await?;
        let transform = self.transform().await?;
        self.sense_transformed().await?;
        let load = self.load().await?;

        info!(
            raw_key = %raw_key,
            rows = load.as_ref().map(|l| l.rows).unwrap_or(0),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "ETL run complete"
        );

        Ok(RunSummary {
            raw_key,
            transform,
            load,
        })
    }
}
