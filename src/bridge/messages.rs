//! Message envelopes crossing the bridge.
//!
//! Requests are `{type, ...payload}`; replies are `{success, ...payload}` or
//! `{success:false, error}`.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::path::PathBuf;

use crate::challenge::{AuthResponse, Challenge};
use crate::keys::KeySource;
use crate::types::{BridgeError, Result};

/// Message types the coordinator understands.
pub const KNOWN_MESSAGE_TYPES: &[&str] = &["GET_STATUS", "CONFIGURE_KEY", "AUTH_CHALLENGE", "PING"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Request {
    GetStatus,
    ConfigureKey(ConfigureKey),
    AuthChallenge { challenge: Challenge },
    /// Liveness probe; answered without waiting for readiness
    Ping,
}

impl Request {
    /// Wire name of this request's type.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::GetStatus => "GET_STATUS",
            Self::ConfigureKey(_) => "CONFIGURE_KEY",
            Self::AuthChallenge { .. } => "AUTH_CHALLENGE",
            Self::Ping => "PING",
        }
    }

    pub fn is_probe(&self) -> bool {
        matches!(self, Self::Ping)
    }

    /// Decode a request, rejecting unrecognised types explicitly.
    pub fn from_value(value: Value) -> Result<Self> {
        let kind = value
            .get("type")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();

        if !KNOWN_MESSAGE_TYPES.contains(&kind.as_str()) {
            return Err(BridgeError::UnknownMessageType(kind));
        }

        serde_json::from_value(value)
            .map_err(|e| BridgeError::MalformedMessage(format!("{}: {}", kind, e)))
    }
}

/// `CONFIGURE_KEY` payload. `keyContent` wins over `keyPath`.
#[derive(Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigureKey {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub passphrase: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_file_name: Option<String>,
}

impl ConfigureKey {
    pub fn from_path(path: impl Into<String>, passphrase: Option<String>) -> Self {
        Self {
            key_path: Some(path.into()),
            passphrase,
            ..Default::default()
        }
    }

    pub fn from_content(
        content: impl Into<String>,
        file_name: Option<String>,
        passphrase: Option<String>,
    ) -> Self {
        Self {
            key_content: Some(content.into()),
            key_file_name: file_name,
            passphrase,
            ..Default::default()
        }
    }

    /// Passphrase with empty strings treated as absent.
    pub fn passphrase(&self) -> Option<String> {
        self.passphrase.clone().filter(|p| !p.is_empty())
    }

    pub fn key_source(&self) -> Result<KeySource> {
        if let Some(content) = self.key_content.as_ref().filter(|c| !c.is_empty()) {
            return Ok(KeySource::Inline {
                content: content.clone(),
                file_name: self.key_file_name.clone(),
            });
        }
        match self.key_path.as_deref().map(str::trim) {
            Some(path) if !path.is_empty() => Ok(KeySource::Path(PathBuf::from(path))),
            _ => Err(BridgeError::Configuration("No SSH key provided".into())),
        }
    }
}

impl fmt::Debug for ConfigureKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigureKey")
            .field("has_key_content", &self.key_content.is_some())
            .field("key_path", &self.key_path)
            .field("has_passphrase", &self.passphrase.is_some())
            .field("key_file_name", &self.key_file_name)
            .finish()
    }
}

/// `GET_STATUS` payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceStatus {
    pub initialized: bool,
    pub key_configured: bool,
    pub version: String,
}

/// Reply envelope.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Reply {
    Status { success: bool, status: ServiceStatus },
    Auth {
        success: bool,
        response: Option<AuthResponse>,
    },
    Alive { success: bool, status: String },
    Ack { success: bool },
    Failure { success: bool, error: String },
}

impl Reply {
    pub fn status(status: ServiceStatus) -> Self {
        Self::Status {
            success: true,
            status,
        }
    }

    pub fn auth(response: Option<AuthResponse>) -> Self {
        Self::Auth {
            success: true,
            response,
        }
    }

    pub fn alive() -> Self {
        Self::Alive {
            success: true,
            status: "alive".to_string(),
        }
    }

    pub fn ack() -> Self {
        Self::Ack { success: true }
    }

    pub fn failure(err: &BridgeError) -> Self {
        Self::Failure {
            success: false,
            error: err.to_envelope_message(),
        }
    }

    pub fn is_success(&self) -> bool {
        match self {
            Self::Status { success, .. }
            | Self::Auth { success, .. }
            | Self::Alive { success, .. }
            | Self::Ack { success }
            | Self::Failure { success, .. } => *success,
        }
    }

    /// The signed response, if this is a successful auth reply carrying one.
    pub fn auth_response(&self) -> Option<&AuthResponse> {
        match self {
            Self::Auth {
                success: true,
                response,
            } => response.as_ref(),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failure { error, .. } => Some(error),
            _ => None,
        }
    }
}

impl From<BridgeError> for Reply {
    fn from(err: BridgeError) -> Self {
        Reply::failure(&err)
    }
}
