//! Credential Reference.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Where the key material lives.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum KeyHandle {
    /// Key file on disk, read on every signing request
    Path { path: PathBuf },
    /// Key content uploaded directly (no file to re-read)
    #[serde(rename_all = "camelCase")]
    Inline {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        file_name: Option<String>,
        content: String,
    },
}

impl KeyHandle {
    /// Human-readable label for logs and status output.
    pub fn label(&self) -> String {
        match self {
            Self::Path { path } => path.display().to_string(),
            Self::Inline { file_name, .. } => file_name
                .clone()
                .unwrap_or_else(|| "<uploaded key>".to_string()),
        }
    }
}

impl fmt::Debug for KeyHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Path { path } => f.debug_struct("Path").field("path", path).finish(),
            Self::Inline { file_name, .. } => f
                .debug_struct("Inline")
                .field("file_name", file_name)
                .field("content", &"[REDACTED]")
                .finish(),
        }
    }
}

/// The configured credential. Immutable once built; replaced wholesale.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialReference {
    pub key_handle: KeyHandle,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub passphrase: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_key: Option<String>,
    pub configured_at: DateTime<Utc>,
}

impl fmt::Debug for CredentialReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialReference")
            .field("key_handle", &self.key_handle)
            .field("has_passphrase", &self.passphrase.is_some())
            .field("public_key", &self.public_key)
            .field("configured_at", &self.configured_at)
            .finish()
    }
}
