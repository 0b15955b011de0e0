//! Error types for the SSH auth bridge
//!
//! Every failure that can happen between the page context and the
//! coordinator maps onto one of these variants. None of them cross the
//! process boundary as a fault: the coordinator converts them into
//! `None` (challenge resolution) or a `{success:false, error}` envelope.

/// Error string placed in the envelope for unrecognised message types.
pub const UNKNOWN_MESSAGE_TYPE: &str = "Unknown message type";

/// Main error type for bridge operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BridgeError {
    /// Key material could not be read, or the configure request was incomplete
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Invalid SSH key format")]
    InvalidKeyFormat,

    #[error("No SSH key configured")]
    NoKeyConfigured,

    #[error("Unable to parse authentication challenge")]
    UnparseableChallenge,

    #[error("Signing failed: {0}")]
    SigningFailed(String),

    #[error("Persistence error: {0}")]
    Persistence(String),

    #[error("Unknown message type: {0}")]
    UnknownMessageType(String),

    /// A known message type whose payload did not decode
    #[error("Invalid message: {0}")]
    MalformedMessage(String),

    #[error("Timed out: {0}")]
    Timeout(String),

    /// Readiness reached `failed`; requests are refused without retry
    #[error("Coordinator failed to initialize: {0}")]
    CoordinatorFailed(String),

    #[error("Bridge channel closed")]
    ChannelClosed,

    /// Native-messaging framing error
    #[error("Frame error: {0}")]
    Frame(String),
}

impl BridgeError {
    /// String carried in the `error` field of a failure envelope.
    pub fn to_envelope_message(&self) -> String {
        match self {
            Self::UnknownMessageType(_) => UNKNOWN_MESSAGE_TYPE.to_string(),
            Self::Configuration(reason) => reason.clone(),
            other => other.to_string(),
        }
    }
}

impl From<std::io::Error> for BridgeError {
    fn from(err: std::io::Error) -> Self {
        Self::Persistence(err.to_string())
    }
}

impl From<serde_json::Error> for BridgeError {
    fn from(err: serde_json::Error) -> Self {
        Self::MalformedMessage(format!("JSON error: {}", err))
    }
}

/// Result type alias for bridge operations
pub type Result<T> = std::result::Result<T, BridgeError>;
