//! Challenge detection in page content
//!
//! Pure heuristics over a DOM-like element tree. Runs in the page context;
//! nothing here performs I/O or keeps state between calls.
//!
//! Detection is a disjunction of three independent checks:
//! - element text matches a challenge pattern
//! - a marker attribute carries a value matching a challenge pattern
//! - a form contains a recognised challenge field, or a field whose value
//!   matches a challenge pattern

pub mod dom;
pub mod heuristics;
pub mod patterns;

pub use dom::Element;
pub use heuristics::ChallengeDetector;
pub use patterns::{
    is_challenge_field, matches_challenge_pattern, CHALLENGE_ATTRIBUTES, CHALLENGE_FIELDS,
    CHALLENGE_PATTERNS,
};
