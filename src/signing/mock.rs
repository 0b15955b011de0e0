//! Mock signer for testing.

use async_trait::async_trait;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use super::traits::{ChallengeSigner, PublicKeyDeriver, SignerError};
use crate::challenge::{AuthResponse, ChallengeDescriptor};
use crate::keys::SigningMaterial;

/// Mock signer for testing.
///
/// By default echoes the descriptor's algorithm with a fixed signature and
/// public key.
pub struct MockSigner {
    response: Option<AuthResponse>,
    public_key: String,
    failure: Option<String>,
    delay: Option<Duration>,
    call_count: AtomicU32,
}

impl MockSigner {
    pub fn new() -> Self {
        Self {
            response: None,
            public_key: "mock-public-key".to_string(),
            failure: None,
            delay: None,
            call_count: AtomicU32::new(0),
        }
    }

    /// Always answer with this response.
    pub fn with_response(mut self, response: AuthResponse) -> Self {
        self.response = Some(response);
        self
    }

    /// Set the derived public key.
    pub fn with_public_key(mut self, public_key: impl Into<String>) -> Self {
        self.public_key = public_key.into();
        self
    }

    /// Fail every call with this message.
    pub fn failing(mut self, message: impl Into<String>) -> Self {
        self.failure = Some(message.into());
        self
    }

    /// Sleep before answering.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Number of times `sign` was called.
    pub fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::SeqCst)
    }
}

impl Default for MockSigner {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ChallengeSigner for MockSigner {
    fn id(&self) -> &str {
        "mock"
    }

    async fn sign(
        &self,
        descriptor: &ChallengeDescriptor,
        _material: &SigningMaterial,
    ) -> Result<AuthResponse, SignerError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if let Some(message) = &self.failure {
            return Err(SignerError::Failed(message.clone()));
        }

        Ok(self.response.clone().unwrap_or_else(|| AuthResponse {
            signature: "mock-signature".to_string(),
            public_key: self.public_key.clone(),
            algorithm: descriptor.algorithm,
        }))
    }
}

#[async_trait]
impl PublicKeyDeriver for MockSigner {
    async fn public_key(&self, _material: &SigningMaterial) -> Result<String, SignerError> {
        match &self.failure {
            Some(message) => Err(SignerError::Failed(message.clone())),
            None => Ok(self.public_key.clone()),
        }
    }
}
