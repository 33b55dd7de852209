//! Staging key layout.
//!
//! These prefixes are shared with other consumers of the bucket and must not
//! change:
//!
//! ```text
//! raw_data/to_process/raw_properties_<ts>.csv
//! raw_data/archive/processed_raw_properties_<ts>.csv
//! transformed_data/to_process/transformed_properties_<ts>.csv
//! transformed_data/archive/transformed_properties_<ts>.csv
//! ```

use chrono::{DateTime, Utc};
use chrono_tz::Europe::Prague;

pub const RAW_TO_PROCESS: &str = "raw_data/to_process/";
pub const RAW_ARCHIVE: &str = "raw_data/archive/";
pub const TRANSFORMED_TO_PROCESS: &str = "transformed_data/to_process/";
pub const TRANSFORMED_ARCHIVE: &str = "transformed_data/archive/";

/// Name prefixes the key sensors wait for.
pub const RAW_PATTERN: &str = "raw_data/to_process/raw_properties_";
pub const TRANSFORMED_PATTERN: &str = "transformed_data/to_process/transformed_";

pub const ARTIFACT_SUFFIX: &str = ".csv";
pub const TIMESTAMP_FORMAT: &str = "%Y_%m_%d_%H%M%S";

#[derive(Debug, Clone, Copy, Default)]
pub struct StagingLayout;

impl StagingLayout {
    /// Key for a freshly extracted dataset, stamped in Prague local time.
    pub fn raw_key(at: DateTime<Utc>) -> String {
        format!(
            "{}raw_properties_{}{}",
            RAW_TO_PROCESS,
            at.with_timezone(&Prague).format(TIMESTAMP_FORMAT),
            ARTIFACT_SUFFIX
        )
    }

    pub fn raw_archive_key(raw_key: &str) -> String {
        format!("{}processed_{}", RAW_ARCHIVE, basename(raw_key))
    }

    /// `raw_properties_<ts>.csv` becomes `transformed_properties_<ts>.csv`.
    pub fn transformed_key(raw_key: &str) -> String {
        let name = basename(raw_key);
        let stem = name.split("raw_").nth(1).unwrap_or(name);
        format!("{}transformed_{}", TRANSFORMED_TO_PROCESS, stem)
    }

    pub fn transformed_archive_key(transformed_key: &str) -> String {
        format!("{}{}", TRANSFORMED_ARCHIVE, basename(transformed_key))
    }
}

/// Last `/`-separated segment of a key.
pub fn basename(key: &str) -> &str {
    key.rsplit('/').next().unwrap_or(key)
}
