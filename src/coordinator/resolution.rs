//! Per-challenge resolution state.

use tracing::{debug, warn};
use uuid::Uuid;

use crate::challenge::ChallengeOrigin;
use crate::types::BridgeError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolutionState {
    Idle,
    Resolving,
    Responded,
    Failed(BridgeError),
}

/// Tracks one challenge from receipt to outcome.
///
/// Each challenge gets its own instance; nothing here is shared between
/// challenges.
#[derive(Debug)]
pub struct ChallengeResolution {
    id: Uuid,
    origin: ChallengeOrigin,
    state: ResolutionState,
}

impl ChallengeResolution {
    pub fn new(origin: ChallengeOrigin) -> Self {
        Self {
            id: Uuid::new_v4(),
            origin,
            state: ResolutionState::Idle,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn state(&self) -> &ResolutionState {
        &self.state
    }

    pub fn begin(&mut self) {
        if self.state == ResolutionState::Idle {
            debug!(challenge_id = %self.id, origin = ?self.origin, "Resolving challenge");
            self.state = ResolutionState::Resolving;
        }
    }

    pub fn respond(&mut self) {
        if self.state == ResolutionState::Resolving {
            debug!(challenge_id = %self.id, "Challenge answered");
            self.state = ResolutionState::Responded;
        }
    }

    pub fn fail(&mut self, err: BridgeError) {
        if self.state == ResolutionState::Resolving {
            warn!(challenge_id = %self.id, error = %err, "Failed to handle auth challenge");
            self.state = ResolutionState::Failed(err);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_happy_path() {
        let mut r = ChallengeResolution::new(ChallengeOrigin::Form);
        assert_eq!(r.state(), &ResolutionState::Idle);
        r.begin();
        assert_eq!(r.state(), &ResolutionState::Resolving);
        r.respond();
        assert_eq!(r.state(), &ResolutionState::Responded);
        // outcome is final
        r.fail(BridgeError::NoKeyConfigured);
        assert_eq!(r.state(), &ResolutionState::Responded);
    }

    #[test]
    fn test_cannot_respond_without_resolving() {
        let mut r = ChallengeResolution::new(ChallengeOrigin::DomElement);
        r.respond();
        assert_eq!(r.state(), &ResolutionState::Idle);
        r.begin();
        r.fail(BridgeError::UnparseableChallenge);
        assert_eq!(
            r.state(),
            &ResolutionState::Failed(BridgeError::UnparseableChallenge)
        );
    }

    #[test]
    fn test_ids_are_unique() {
        let a = ChallengeResolution::new(ChallengeOrigin::Form);
        let b = ChallengeResolution::new(ChallengeOrigin::Form);
        assert_ne!(a.id(), b.id());
    }
}
