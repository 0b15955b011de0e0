//! Challenge, descriptor and response types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Signature algorithms the coordinator can answer with.
///
/// Resolution is always total: anything unrecognised lands on
/// [`Algorithm::SshRsa`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Algorithm {
    #[default]
    #[serde(rename = "ssh-rsa")]
    SshRsa,
    #[serde(rename = "ecdsa-sha2-nistp256")]
    EcdsaSha2Nistp256,
    #[serde(rename = "ssh-ed25519")]
    SshEd25519,
}

impl Algorithm {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SshRsa => "ssh-rsa",
            Self::EcdsaSha2Nistp256 => "ecdsa-sha2-nistp256",
            Self::SshEd25519 => "ssh-ed25519",
        }
    }

    /// Exact wire-name lookup.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "ssh-rsa" => Some(Self::SshRsa),
            "ecdsa-sha2-nistp256" => Some(Self::EcdsaSha2Nistp256),
            "ssh-ed25519" => Some(Self::SshEd25519),
            _ => None,
        }
    }

    /// Infer from free text by case-sensitive substring search.
    ///
    /// `ecdsa` is checked before `ed25519`; neither means `ssh-rsa`.
    pub fn infer(text: &str) -> Self {
        if text.contains("ecdsa") {
            Self::EcdsaSha2Nistp256
        } else if text.contains("ed25519") {
            Self::SshEd25519
        } else {
            Self::SshRsa
        }
    }

    /// Resolve a declared algorithm name, falling back to inference.
    pub fn resolve(name: &str) -> Self {
        Self::from_name(name).unwrap_or_else(|| Self::infer(name))
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where in the page a challenge was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChallengeOrigin {
    #[serde(rename = "form")]
    Form,
    #[serde(rename = "dom-element", alias = "dom")]
    DomElement,
}

/// A submitted form field as seen by the page context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormField {
    pub name: String,
    #[serde(rename = "type", default)]
    pub field_type: String,
    #[serde(default)]
    pub value: String,
}

impl FormField {
    pub fn new(
        name: impl Into<String>,
        field_type: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            field_type: field_type.into(),
            value: value.into(),
        }
    }
}

/// Raw challenge payload, kept in a re-parseable form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ChallengePayload {
    /// Raw string pulled out of a marker attribute, text, or field
    Text(String),
    /// Fields of an intercepted form submission
    Fields(Vec<FormField>),
    /// Already-structured JSON payload
    Structured(serde_json::Value),
}

/// Page-supplied request for proof of key possession.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Challenge {
    #[serde(rename = "type")]
    pub origin: ChallengeOrigin,
    pub url: String,
    pub payload: ChallengePayload,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub algorithm_hint: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_key_hint: Option<String>,
}

impl Challenge {
    /// Challenge found in a DOM element, carrying the extracted raw string.
    pub fn from_element(url: impl Into<String>, raw: impl Into<String>) -> Self {
        Self {
            origin: ChallengeOrigin::DomElement,
            url: url.into(),
            payload: ChallengePayload::Text(raw.into()),
            algorithm_hint: None,
            public_key_hint: None,
        }
    }

    /// Challenge raised by an intercepted form submission.
    pub fn from_form(url: impl Into<String>, fields: Vec<FormField>) -> Self {
        Self {
            origin: ChallengeOrigin::Form,
            url: url.into(),
            payload: ChallengePayload::Fields(fields),
            algorithm_hint: None,
            public_key_hint: None,
        }
    }

    pub fn with_algorithm_hint(mut self, hint: impl Into<String>) -> Self {
        self.algorithm_hint = Some(hint.into());
        self
    }

    pub fn with_public_key_hint(mut self, hint: impl Into<String>) -> Self {
        self.public_key_hint = Some(hint.into());
        self
    }
}

/// Normalised challenge, ready for signing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChallengeDescriptor {
    #[serde(rename = "type")]
    pub kind: String,
    pub challenge: String,
    pub algorithm: Algorithm,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_key: Option<String>,
}

/// Signed answer to a challenge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub signature: String,
    pub public_key: String,
    pub algorithm: Algorithm,
}
