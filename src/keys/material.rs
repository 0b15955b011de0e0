//! Signing material handed to signers.

use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Raw private key text plus optional passphrase. Zeroized on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SigningMaterial {
    key_text: String,
    passphrase: Option<String>,
}

impl SigningMaterial {
    pub fn new(key_text: String, passphrase: Option<String>) -> Self {
        Self {
            key_text,
            passphrase,
        }
    }

    pub fn key_text(&self) -> &str {
        &self.key_text
    }

    pub fn passphrase(&self) -> Option<&str> {
        self.passphrase.as_deref()
    }
}

impl fmt::Debug for SigningMaterial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SigningMaterial")
            .field("key_text", &"[REDACTED]")
            .field("has_passphrase", &self.passphrase.is_some())
            .finish()
    }
}
