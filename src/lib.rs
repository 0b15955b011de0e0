//! SSH Auth Bridge
//!
//! Answers web-page authentication challenges with a locally held SSH key
//! instead of a password.
//!
//! ## Architecture
//!
//! ```text
//! page context                         coordinator context
//! ┌──────────────────────┐             ┌──────────────────────────────┐
//! │ PageAgent            │  Request    │ ServiceHost (resurrectable)  │
//! │  ├─ ChallengeDetector│ ──────────► │  └─ ServiceContext           │
//! │  └─ form interception│ ◄────────── │      ├─ Readiness gate       │
//! └──────────────────────┘   Reply     │      ├─ AuthCoordinator      │
//!                                      │      └─ KeyStore ──► storage │
//!                                      └──────────────┬───────────────┘
//!                                                     ▼
//!                                             ChallengeSigner
//! ```
//!
//! - [`detector`]: pure heuristics deciding whether an element carries a challenge
//! - [`keys`]: the single active credential reference and its persistence
//! - [`coordinator`]: readiness and challenge resolution
//! - [`bridge`]: envelopes, dispatch, lifecycle and native messaging
//! - [`page`]: the page-observing side

pub mod bridge;
pub mod challenge;
pub mod config;
pub mod coordinator;
pub mod detector;
pub mod keys;
pub mod page;
pub mod signing;
pub mod types;

pub use bridge::{BridgeClient, BridgeConfig, Collaborators, Reply, Request, ServiceHost, WakeTrigger};
pub use challenge::{Algorithm, AuthResponse, Challenge, ChallengeDescriptor};
pub use coordinator::{AuthCoordinator, Readiness, ReadinessState};
pub use detector::{ChallengeDetector, Element};
pub use keys::{CredentialReference, KeyHandle, KeySource, KeyStore};
pub use page::{PageAgent, SubmitOutcome};
pub use signing::{ChallengeSigner, SshKeySigner, MockSigner};
pub use types::{BridgeError, Result};
