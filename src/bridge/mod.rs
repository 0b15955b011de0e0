//! Message Bridge and session lifecycle
//!
//! Request/response correlation between the page context and the
//! coordinator context. The coordinator context may be suspended at any
//! time; [`ServiceHost`] resurrects it on demand and makes sure concurrent
//! wake-ups converge on a single live instance.
//!
//! ```text
//! PageAgent ──► BridgeClient ──► ServiceHost (guarded singleton)
//!                                   │ spawns / resurrects
//!                                   ▼
//!                             service loop ──► ServiceContext::dispatch
//!                                                 ├─ PING (answered before readiness)
//!                                                 ├─ GET_STATUS
//!                                                 ├─ CONFIGURE_KEY ──► KeyStore
//!                                                 └─ AUTH_CHALLENGE ──► AuthCoordinator
//! ```
//!
//! Browsers reach the same dispatch through [`native`], the
//! native-messaging stdio transport.

pub mod client;
pub mod host;
pub mod messages;
pub mod native;
pub mod service;

pub use client::BridgeClient;
pub use host::{Collaborators, ServiceHost, WakeTrigger};
pub use messages::{ConfigureKey, Reply, Request, ServiceStatus, KNOWN_MESSAGE_TYPES};
pub use service::{BridgeConfig, ServiceContext};
