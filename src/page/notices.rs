//! Notices the webapp can push into the page context.

use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeKind {
    Success,
    Error,
    Info,
}

/// A user-facing toast, with an optional navigation target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageNotice {
    pub kind: NoticeKind,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect: Option<String>,
}

impl PageNotice {
    /// Map `AUTH_SUCCESS`, `AUTH_FAILED` and `CHALLENGE_READY`; `None` for
    /// anything else.
    pub fn from_message(message: &Value) -> Option<Self> {
        let (kind, text) = match message.get("type").and_then(Value::as_str)? {
            "AUTH_SUCCESS" => (NoticeKind::Success, "Authentication successful!"),
            "AUTH_FAILED" => (NoticeKind::Error, "Authentication failed"),
            "CHALLENGE_READY" => (NoticeKind::Info, "Challenge ready for extension"),
            _ => return None,
        };

        let redirect = match kind {
            NoticeKind::Success => message
                .get("redirect")
                .and_then(Value::as_str)
                .filter(|r| !r.is_empty())
                .map(str::to_string),
            _ => None,
        };

        Some(Self {
            kind,
            text: text.to_string(),
            redirect,
        })
    }
}
