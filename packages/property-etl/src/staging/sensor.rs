//! Key sensor: polls the store until an upstream artifact shows up.

use std::time::Duration;
use tokio::time::{sleep, Instant};
use tracing::{debug, info};

use crate::error::{EtlError, Result};
use crate::traits::store::ObjectStore;

/// Bounded polling for a key starting with a pattern prefix
/// (`raw_data/to_process/raw_properties_*` style wildcards).
#[derive(Debug, Clone, Copy)]
pub struct KeySensor {
    pub poke_interval: Duration,
    pub timeout: Duration,
}

impl KeySensor {
    pub fn new(poke_interval: Duration, timeout: Duration) -> Self {
        Self {
            poke_interval,
            timeout,
        }
    }

    /// Wait until some key matches `pattern`, returning the first match.
    ///
    /// Expiry is fatal for the run; there is no retry here.
    pub async fn wait(&self, store: &dyn ObjectStore, pattern: &str) -> Result<String> {
        let prefix = pattern.trim_end_matches('*');
        let started = Instant::now();
        let mut pokes = 0u32;

        loop {
            pokes += 1;
            if let Some(key) = store.list(prefix).await?.into_iter().next() {
                info!(pattern, key = %key, pokes, "Sensor found artifact");
                return Ok(key);
            }

            let waited = started.elapsed();
            if waited >= self.timeout {
                return Err(EtlError::SensorTimeout {
                    pattern: pattern.to_string(),
                    waited,
                });
            }

            debug!(pattern, pokes, ?waited, "Artifact not present yet");
            sleep(self.poke_interval.min(self.timeout - waited)).await;
        }
    }
}
