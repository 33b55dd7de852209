//! Real-estate listing ETL
//!
//! Scrapes listing pages, stages the raw dataset in an object store, cleans
//! and normalizes it, and appends the result to a relational table.
//!
//! # Stages
//!
//! ```text
//! Extractor ──► raw_data/to_process/ ──► Transformer ──► transformed_data/to_process/ ──► Loader ──► properties_data
//!                     │                                         │
//!                     └─► raw_data/archive/                     └─► transformed_data/archive/
//! ```
//!
//! Each arrow is a polling handoff through the [`staging`] area: a stage picks
//! up the artifact its predecessor published, processes it, archives it and
//! only then deletes the original.
//!
//! # Modules
//!
//! - [`config`] - Environment-driven configuration, one section per component
//! - [`types`] - Raw/cleaned records, regions and the listing taxonomy
//! - [`codec`] - Tab-delimited dataset format
//! - [`stores`] - Object store backends (memory, local filesystem, S3)
//! - [`staging`] - Handoff protocol, artifact lifecycle and key sensors
//! - [`extract`] - Listing page fetching and parsing
//! - [`transform`] - Cleaning/normalization engine
//! - [`load`] - Database sinks and the loader stage
//! - [`pipeline`] - The orchestration units wired together
//! - [`scheduler`] - Daily cron trigger
//! - [`testing`] - Page builders and mocks for tests

pub mod codec;
pub mod config;
pub mod error;
pub mod extract;
pub mod load;
pub mod pipeline;
pub mod scheduler;
pub mod staging;
pub mod stores;
pub mod testing;
pub mod traits;
pub mod transform;
pub mod types;

pub use config::Config;
pub use error::{EtlError, Result};
pub use extract::{Extractor, HttpPageFetcher, PageFetcher};
pub use load::{LoadOutcome, Loader, MemorySink, PostgresSink, PropertySink};
pub use pipeline::{EtlPipeline, RunSummary};
pub use staging::{ArtifactState, StagedArtifact, StagingArea, StagingLayout};
pub use stores::{LocalObjectStore, MemoryObjectStore, ObjectStore, S3ObjectStore};
pub use transform::{clean_and_transform, TransformOutcome, TransformedDataset, Transformer};
pub use types::{CleanedRecord, ListingCategory, RawRecord, Region};
