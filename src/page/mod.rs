//! Page-observing context
//!
//! Watches a page's element tree for challenges, intercepts login form
//! submissions, and relays both to the coordinator over the bridge.

pub mod agent;
pub mod notices;

pub use agent::{DomInjection, PageAgent, PageMessageOutcome, SubmitOutcome, RESPONSE_FIELD};
pub use notices::{NoticeKind, PageNotice};
