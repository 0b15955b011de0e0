//! Fixed vocabulary used to recognise challenges.

use regex::Regex;
use std::sync::OnceLock;

/// Case-insensitive text patterns associated with SSH/auth challenges.
pub const CHALLENGE_PATTERNS: &[&str] = &[
    r"(?i)ssh.*challenge",
    r"(?i)authentication.*challenge",
    r"(?i)ssh.*auth",
    r"(?i)publickey.*challenge",
    r"(?i)ssh-rsa.*challenge",
    r"(?i)ecdsa.*challenge",
    r"(?i)ed25519.*challenge",
];

/// Marker attributes that may carry a challenge.
pub const CHALLENGE_ATTRIBUTES: &[&str] = &[
    "data-ssh-challenge",
    "data-auth-challenge",
    "data-challenge",
    "ssh-challenge",
    "auth-challenge",
];

/// Form field names that carry a challenge (compared lowercased).
pub const CHALLENGE_FIELDS: &[&str] = &[
    "ssh_challenge",
    "auth_challenge",
    "challenge",
    "ssh_auth_challenge",
];

static COMPILED: OnceLock<Vec<Regex>> = OnceLock::new();

fn compiled() -> &'static [Regex] {
    COMPILED.get_or_init(|| {
        CHALLENGE_PATTERNS
            .iter()
            .filter_map(|p| Regex::new(p).ok())
            .collect()
    })
}

/// True if any challenge pattern matches `text`.
pub fn matches_challenge_pattern(text: &str) -> bool {
    compiled().iter().any(|re| re.is_match(text))
}

/// True if `name` is a recognised challenge field name (case-insensitive).
pub fn is_challenge_field(name: &str) -> bool {
    let name = name.to_lowercase();
    CHALLENGE_FIELDS.contains(&name.as_str())
}
