use anyhow::{bail, Context, Result};
use dotenvy::dotenv;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_BUCKET: &str = "properties-etl";
pub const DEFAULT_TABLE: &str = "properties_data";
pub const DEFAULT_SOURCE_URL: &str = "https://www.bezrealitky.cz/vyhledat";
pub const DEFAULT_SCHEDULE: &str = "0 0 8 * * *";

/// Where staged artifacts live
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageBackend {
    S3 { bucket: String },
    Local { root: PathBuf },
}

#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub backend: StorageBackend,
}

/// Listing extraction settings
#[derive(Debug, Clone)]
pub struct ExtractConfig {
    pub source_url: String,
    pub start_page: u32,
    pub end_page: u32,
    pub page_delay: Duration,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            source_url: DEFAULT_SOURCE_URL.to_string(),
            start_page: 1,
            end_page: 149,
            page_delay: Duration::from_secs(2),
        }
    }
}

/// Key sensor polling settings
#[derive(Debug, Clone)]
pub struct SensorConfig {
    pub poke_interval: Duration,
    pub raw_timeout: Duration,
    pub transformed_timeout: Duration,
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self {
            poke_interval: Duration::from_secs(60),
            raw_timeout: Duration::from_secs(30 * 60),
            transformed_timeout: Duration::from_secs(60 * 60),
        }
    }
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Only the load stage needs a database
    pub url: Option<String>,
    pub table: String,
}

impl DatabaseConfig {
    pub fn require_url(&self) -> Result<&str> {
        self.url
            .as_deref()
            .context("DATABASE_URL must be set for the load stage")
    }
}

#[derive(Debug, Clone)]
pub struct ScheduleConfig {
    pub cron: String,
}

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub storage: StorageConfig,
    pub extract: ExtractConfig,
    pub sensor: SensorConfig,
    pub database: DatabaseConfig,
    pub schedule: ScheduleConfig,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        let backend = match env::var("ETL_STORAGE_BACKEND")
            .unwrap_or_else(|_| "s3".to_string())
            .to_ascii_lowercase()
            .as_str()
        {
            "s3" => StorageBackend::S3 {
                bucket: env::var("ETL_BUCKET").unwrap_or_else(|_| DEFAULT_BUCKET.to_string()),
            },
            "local" => StorageBackend::Local {
                root: env::var("ETL_LOCAL_ROOT")
                    .unwrap_or_else(|_| "./etl-data".to_string())
                    .into(),
            },
            other => bail!("ETL_STORAGE_BACKEND must be 's3' or 'local', got '{}'", other),
        };

        let defaults = ExtractConfig::default();
        let extract = ExtractConfig {
            source_url: env::var("ETL_SOURCE_URL").unwrap_or(defaults.source_url),
            start_page: parse_or("ETL_START_PAGE", defaults.start_page)?,
            end_page: parse_or("ETL_END_PAGE", defaults.end_page)?,
            page_delay: Duration::from_millis(parse_or("ETL_PAGE_DELAY_MS", 2000u64)?),
        };
        if extract.start_page > extract.end_page {
            bail!(
                "ETL_START_PAGE ({}) must not exceed ETL_END_PAGE ({})",
                extract.start_page,
                extract.end_page
            );
        }

        let sensor = SensorConfig {
            poke_interval: Duration::from_secs(parse_or("ETL_SENSOR_POKE_SECS", 60u64)?),
            raw_timeout: Duration::from_secs(parse_or("ETL_RAW_SENSOR_TIMEOUT_SECS", 1800u64)?),
            transformed_timeout: Duration::from_secs(parse_or(
                "ETL_TRANSFORMED_SENSOR_TIMEOUT_SECS",
                3600u64,
            )?),
        };

        Ok(Self {
            storage: StorageConfig { backend },
            extract,
            sensor,
            database: DatabaseConfig {
                url: env::var("DATABASE_URL").ok(),
                table: env::var("ETL_TABLE").unwrap_or_else(|_| DEFAULT_TABLE.to_string()),
            },
            schedule: ScheduleConfig {
                cron: env::var("ETL_SCHEDULE").unwrap_or_else(|_| DEFAULT_SCHEDULE.to_string()),
            },
        })
    }
}

fn parse_or<T>(name: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{} must be a valid number", name)),
        Err(_) => Ok(default),
    }
}
