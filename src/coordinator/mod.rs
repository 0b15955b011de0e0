//! Auth Coordinator
//!
//! The protocol brain on the coordinator side. For each challenge:
//!
//! 1. wait for readiness (`failed` short-circuits, no retry)
//! 2. fetch signing material from the Key Store (`NoKeyConfigured` if none)
//! 3. re-derive the challenge descriptor (`UnparseableChallenge`)
//! 4. call the external signer (`SigningFailed`, `Timeout`)
//!
//! The steps run strictly in order. Every failure is logged and collapses
//! to `None` at [`AuthCoordinator::handle_challenge`]; the page context only
//! ever learns "no response".

pub mod readiness;
pub mod resolution;
pub mod service;

pub use readiness::{Readiness, ReadinessState};
pub use resolution::{ChallengeResolution, ResolutionState};
pub use service::{AuthCoordinator, CoordinatorConfig};
