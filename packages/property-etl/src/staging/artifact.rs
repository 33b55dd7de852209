//! Lifecycle of a staged artifact.
//!
//! ```text
//! Absent ──publish──► Staged ──claim──► Processing ──archive──► Archived
//! ```
//!
//! No other transitions are legal. `Archived` is terminal: the original key
//! has been removed and a copy lives under an archive prefix.

use crate::error::{EtlError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtifactState {
    Absent,
    Staged,
    Processing,
    Archived,
}

impl ArtifactState {
    pub fn can_transition_to(self, next: ArtifactState) -> bool {
        matches!(
            (self, next),
            (ArtifactState::Absent, ArtifactState::Staged)
                | (ArtifactState::Staged, ArtifactState::Processing)
                | (ArtifactState::Processing, ArtifactState::Archived)
        )
    }
}

/// A key in the staging area together with where it is in its lifecycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedArtifact {
    key: String,
    state: ArtifactState,
}

impl StagedArtifact {
    pub fn absent(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            state: ArtifactState::Absent,
        }
    }

    /// An artifact discovered in the store.
    pub fn staged(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            state: ArtifactState::Staged,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn state(&self) -> ArtifactState {
        self.state
    }

    pub fn advance(&mut self, next: ArtifactState) -> Result<()> {
        if !self.state.can_transition_to(next) {
            return Err(EtlError::InvalidTransition {
                key: self.key.clone(),
                from: self.state,
                to: next,
            });
        }
        self.state = next;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn happy_path() {
        let mut artifact = StagedArtifact::absent("raw_data/to_process/a.csv");
        artifact.advance(ArtifactState::Staged).unwrap();
        artifact.advance(ArtifactState::Processing).unwrap();
        artifact.advance(ArtifactState::Archived).unwrap();
        assert_eq!(artifact.state(), ArtifactState::Archived);
    }

    #[test]
    fn rejects_skipping_states() {
        let mut artifact = StagedArtifact::absent("k");
        let err = artifact.advance(ArtifactState::Archived).unwrap_err();
        assert!(matches!(
            err,
            EtlError::InvalidTransition {
                from: ArtifactState::Absent,
                to: ArtifactState::Archived,
                ..
            }
        ));
        assert_eq!(artifact.state(), ArtifactState::Absent);
    }

    #[test]
    fn archived_is_terminal() {
        let mut artifact = StagedArtifact::staged("k");
        artifact.advance(ArtifactState::Processing).unwrap();
        artifact.advance(ArtifactState::Archived).unwrap();
        for next in [
            ArtifactState::Absent,
            ArtifactState::Staged,
            ArtifactState::Processing,
            ArtifactState::Archived,
        ] {
            assert!(!artifact.state().can_transition_to(next));
        }
    }
}
