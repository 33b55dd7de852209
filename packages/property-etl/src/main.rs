//! Property ETL command line
//!
//! Runs a single stage, the whole workflow once, or the daily scheduler.
//! Stage outcomes are printed as JSON on stdout.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use property_etl::config::{Config, StorageBackend};
use property_etl::{
    EtlPipeline, Extractor, HttpPageFetcher, LocalObjectStore, Loader, ObjectStore, PostgresSink,
    PropertySink, S3ObjectStore, StagingArea,
};

#[derive(Parser)]
#[command(name = "property-etl")]
#[command(about = "Scrape, stage, clean and load real-estate listings")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scrape listing pages and stage the raw dataset
    Extract,

    /// Clean the staged raw dataset
    Transform,

    /// Append the staged transformed dataset to the database
    Load,

    /// Wait for an upstream artifact to appear
    Sense {
        #[arg(long, value_enum)]
        stage: SenseStage,
    },

    /// Run the whole workflow once
    Run,

    /// Run the workflow on the configured cron schedule until interrupted
    Schedule,
}

#[derive(Clone, Copy, ValueEnum)]
enum SenseStage {
    Raw,
    Transformed,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,property_etl=debug,sqlx=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();

    let cli = Cli::parse();
    let config = Config::from_env().context("Failed to load configuration")?;

    let store = build_store(&config).await;
    let staging = StagingArea::new(store);

    match cli.command {
        Commands::Extract => {
            let pipeline = build_pipeline(&config, staging, None)?;
            let key = pipeline.extract_and_stage().await?;
            print_json(&key)?;
        }
        Commands::Transform => {
            let pipeline = build_pipeline(&config, staging, None)?;
            print_json(&pipeline.transform().await?)?;
        }
        Commands::Load => {
            let sink = connect_sink(&config).await?;
            let pipeline = build_pipeline(&config, staging, Some(sink))?;
            print_json(&pipeline.load().await?)?;
        }
        Commands::Sense { stage } => {
            let pipeline = build_pipeline(&config, staging, None)?;
            let key = match stage {
                SenseStage::Raw => pipeline.sense_raw().await?,
                SenseStage::Transformed => pipeline.sense_transformed().await?,
            };
            print_json(&key)?;
        }
        Commands::Run => {
            let sink = connect_sink(&config).await?;
            let pipeline = build_pipeline(&config, staging, Some(sink))?;
            print_json(&pipeline.run().await?)?;
        }
        Commands::Schedule => {
            let sink = connect_sink(&config).await?;
            let pipeline = Arc::new(build_pipeline(&config, staging, Some(sink))?);
            let mut scheduler =
                property_etl::scheduler::start_scheduler(pipeline, &config.schedule.cron).await?;

            tokio::signal::ctrl_c()
                .await
                .context("Failed to listen for shutdown signal")?;
            tracing::info!("Shutting down scheduler");
            scheduler.shutdown().await?;
        }
    }

    Ok(())
}

async fn build_store(config: &Config) -> Arc<dyn ObjectStore> {
    match &config.storage.backend {
        StorageBackend::S3 { bucket } => {
            tracing::info!(bucket = %bucket, "Using S3 staging store");
            Arc::new(S3ObjectStore::from_env(bucket.clone()).await)
        }
        StorageBackend::Local { root } => {
            tracing::info!(root = %root.display(), "Using local staging store");
            Arc::new(LocalObjectStore::new(root.clone()))
        }
    }
}

async fn connect_sink(config: &Config) -> Result<Arc<dyn PropertySink>> {
    let url = config.database.require_url()?;
    let sink = PostgresSink::connect(url, config.database.table.clone())
        .await
        .context("Failed to connect to database")?;
    Ok(Arc::new(sink))
}

/// Stages that never touch the database get a sink that refuses to be used.
fn build_pipeline(
    config: &Config,
    staging: StagingArea,
    sink: Option<Arc<dyn PropertySink>>,
) -> Result<EtlPipeline> {
    let fetcher = HttpPageFetcher::new(&config.extract.source_url)
        .context("Failed to build HTTP client")?;
    let extractor = Extractor::new(Arc::new(fetcher), config.extract.clone());
    let sink = sink.unwrap_or_else(|| Arc::new(NoDatabase));
    let loader = Loader::new(staging.clone(), sink);
    Ok(EtlPipeline::new(
        extractor,
        staging,
        loader,
        config.sensor.clone(),
    ))
}

struct NoDatabase;

#[async_trait::async_trait]
impl PropertySink for NoDatabase {
    async fn ensure_table(&self) -> property_etl::Result<()> {
        Err(property_etl::EtlError::Config(
            "no database configured for this command".to_string(),
        ))
    }

    async fn append(
        &self,
        _records: &[property_etl::CleanedRecord],
    ) -> property_etl::Result<usize> {
        Err(property_etl::EtlError::Config(
            "no database configured for this command".to_string(),
        ))
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
