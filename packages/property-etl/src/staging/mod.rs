//! Staging area: the object store used as a single-slot queue between stages.
//!
//! Producers publish under a `to_process` prefix. A consumer finds a matching
//! artifact, claims it, processes it, then archives it: the archive copy is
//! written first and the original is deleted only after that write succeeded.
//! A crash in between leaves both copies behind, never neither.

pub mod artifact;
pub mod layout;
pub mod sensor;

use std::sync::Arc;
use tracing::{debug, info};

pub use artifact::{ArtifactState, StagedArtifact};
pub use layout::{basename, StagingLayout};
pub use sensor::KeySensor;

use crate::error::{EtlError, Result};
use crate::traits::store::ObjectStore;

#[derive(Clone)]
pub struct StagingArea {
    store: Arc<dyn ObjectStore>,
}

impl StagingArea {
    pub fn new(store: Arc<dyn ObjectStore>) -> Self {
        Self { store }
    }

    /// First key under `prefix` ending with `suffix`.
    ///
    /// This is "a" matching artifact, not necessarily the oldest. `None`
    /// means there is nothing to do.
    pub async fn find_first_matching(
        &self,
        prefix: &str,
        suffix: &str,
    ) -> Result<Option<String>> {
        let keys = self.store.list(prefix).await?;
        Ok(keys.into_iter().find(|k| k.ends_with(suffix)))
    }

    /// Like [`find_first_matching`](Self::find_first_matching) but returns a
    /// lifecycle handle.
    pub async fn find_artifact(
        &self,
        prefix: &str,
        suffix: &str,
    ) -> Result<Option<StagedArtifact>> {
        Ok(self
            .find_first_matching(prefix, suffix)
            .await?
            .map(StagedArtifact::staged))
    }

    pub async fn publish(&self, key: &str, content: impl Into<Vec<u8>>) -> Result<StagedArtifact> {
        let mut artifact = StagedArtifact::absent(key);
        let body = content.into();
        let bytes = body.len();
        self.store.put(key, body).await?;
        artifact.advance(ArtifactState::Staged)?;
        info!(key, bytes, "Published artifact");
        Ok(artifact)
    }

    /// Read a staged artifact and mark it as being processed.
    pub async fn claim(&self, artifact: &mut StagedArtifact) -> Result<Vec<u8>> {
        artifact.advance(ArtifactState::Processing)?;
        let content = self.store.get(artifact.key()).await?;
        debug!(key = artifact.key(), bytes = content.len(), "Claimed artifact");
        Ok(content)
    }

    /// Write `content` to `dst_key`, then delete the artifact's original key.
    pub async fn archive(
        &self,
        artifact: &mut StagedArtifact,
        dst_key: &str,
        content: impl Into<Vec<u8>>,
    ) -> Result<()> {
        if !artifact.state().can_transition_to(ArtifactState::Archived) {
            return Err(EtlError::InvalidTransition {
                key: artifact.key().to_string(),
                from: artifact.state(),
                to: ArtifactState::Archived,
            });
        }

        self.store.put(dst_key, content.into()).await?;
        self.remove(artifact.key()).await?;
        artifact.advance(ArtifactState::Archived)?;
        info!(from = artifact.key(), to = dst_key, "Archived artifact");
        Ok(())
    }

    pub async fn remove(&self, key: &str) -> Result<()> {
        self.store.delete(key).await?;
        debug!(key, "Removed artifact");
        Ok(())
    }

    /// Block until an artifact matching `pattern` exists.
    pub async fn wait_for(&self, sensor: &KeySensor, pattern: &str) -> Result<String> {
        sensor.wait(self.store.as_ref(), pattern).await
    }
}
