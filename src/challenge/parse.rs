//! Raw challenge parsing.
//!
//! Structured (JSON) decoding is tried first; anything that does not decode
//! to an object carrying `challenge` or `data` is treated as a plain
//! challenge string. Parsing is pure and never fails loudly: unusable input
//! yields `None`.

use serde_json::Value;
use tracing::debug;

use super::types::{Algorithm, Challenge, ChallengeDescriptor, ChallengePayload, FormField};
use crate::detector::patterns::is_challenge_field;

/// Type tag given to descriptors that do not declare one.
pub const DEFAULT_CHALLENGE_TYPE: &str = "ssh";

/// Parse result plus whether the algorithm was declared explicitly.
struct Parsed {
    descriptor: ChallengeDescriptor,
    explicit_algorithm: bool,
}

/// Parse a raw challenge string into a descriptor.
pub fn parse_challenge_str(raw: &str) -> Option<ChallengeDescriptor> {
    parse_raw(raw).map(|p| p.descriptor)
}

/// Build a descriptor from an already-decoded JSON object.
pub fn parse_structured(value: &Value) -> Option<ChallengeDescriptor> {
    structured(value).map(|p| p.descriptor)
}

/// Re-derive the descriptor for a challenge received over the bridge.
///
/// Challenge-level hints fill in what the payload leaves open: a declared
/// payload algorithm beats `algorithm_hint`, which beats inference.
pub fn descriptor_for(challenge: &Challenge) -> Option<ChallengeDescriptor> {
    let parsed = match &challenge.payload {
        ChallengePayload::Text(raw) => parse_raw(raw),
        ChallengePayload::Structured(Value::String(raw)) => parse_raw(raw),
        ChallengePayload::Structured(value) => structured(value),
        ChallengePayload::Fields(fields) => from_fields(fields),
    }?;

    let Parsed {
        mut descriptor,
        explicit_algorithm,
    } = parsed;

    if !explicit_algorithm {
        if let Some(hint) = challenge.algorithm_hint.as_deref() {
            descriptor.algorithm = Algorithm::resolve(hint);
        }
    }
    if descriptor.public_key.is_none() {
        descriptor.public_key = challenge.public_key_hint.clone();
    }

    Some(descriptor)
}

fn parse_raw(raw: &str) -> Option<Parsed> {
    debug!("Parsing challenge string: {}...", preview(raw));

    if let Ok(value) = serde_json::from_str::<Value>(raw) {
        if let Some(parsed) = structured(&value) {
            return Some(parsed);
        }
    }

    let challenge = raw.trim();
    if challenge.is_empty() {
        return None;
    }

    Some(Parsed {
        descriptor: ChallengeDescriptor {
            kind: DEFAULT_CHALLENGE_TYPE.to_string(),
            challenge: challenge.to_string(),
            algorithm: Algorithm::infer(raw),
            public_key: None,
        },
        explicit_algorithm: false,
    })
}

fn structured(value: &Value) -> Option<Parsed> {
    let object = value.as_object()?;

    let challenge = non_empty_str(object.get("challenge"))
        .or_else(|| non_empty_str(object.get("data")))?;

    let kind = non_empty_str(object.get("type")).unwrap_or(DEFAULT_CHALLENGE_TYPE);
    let declared = non_empty_str(object.get("algorithm"));

    Some(Parsed {
        descriptor: ChallengeDescriptor {
            kind: kind.to_string(),
            challenge: challenge.to_string(),
            algorithm: declared.map(Algorithm::resolve).unwrap_or_default(),
            public_key: non_empty_str(object.get("publicKey")).map(str::to_string),
        },
        explicit_algorithm: declared.is_some(),
    })
}

fn from_fields(fields: &[FormField]) -> Option<Parsed> {
    fields
        .iter()
        .filter(|f| is_challenge_field(&f.name) && !f.value.is_empty())
        .find_map(|f| parse_raw(&f.value))
}

fn non_empty_str(value: Option<&Value>) -> Option<&str> {
    value.and_then(Value::as_str).filter(|s| !s.is_empty())
}

fn preview(raw: &str) -> String {
    raw.chars().take(50).collect()
}
