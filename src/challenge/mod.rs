//! Challenge data model and parsing
//!
//! A [`Challenge`] is what the page context hands across the bridge. It is
//! never mutated; the coordinator re-derives a [`ChallengeDescriptor`] from
//! it using the same rules the detector uses on the page side.

pub mod parse;
pub mod types;

pub use parse::{descriptor_for, parse_challenge_str, parse_structured, DEFAULT_CHALLENGE_TYPE};
pub use types::{
    Algorithm, AuthResponse, Challenge, ChallengeDescriptor, ChallengeOrigin, ChallengePayload,
    FormField,
};
