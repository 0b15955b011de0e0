//! Signer traits.

use async_trait::async_trait;

use crate::challenge::{Algorithm, AuthResponse, ChallengeDescriptor};
use crate::keys::SigningMaterial;
use crate::types::BridgeError;

/// Errors reported by signing collaborators.
#[derive(Debug, thiserror::Error)]
pub enum SignerError {
    /// Key material is not something this signer can use
    #[error("Unsupported key: {0}")]
    UnsupportedKey(String),

    #[error("Unsupported algorithm: {0}")]
    UnsupportedAlgorithm(Algorithm),

    #[error("{0}")]
    Failed(String),
}

impl From<SignerError> for BridgeError {
    fn from(err: SignerError) -> Self {
        Self::SigningFailed(err.to_string())
    }
}

/// Produces a signed [`AuthResponse`] for a challenge.
#[async_trait]
pub trait ChallengeSigner: Send + Sync {
    /// Identifier used in logs.
    fn id(&self) -> &str;

    /// Sign the descriptor's challenge with the given material.
    async fn sign(
        &self,
        descriptor: &ChallengeDescriptor,
        material: &SigningMaterial,
    ) -> Result<AuthResponse, SignerError>;
}

/// Derives the public half of configured key material.
#[async_trait]
pub trait PublicKeyDeriver: Send + Sync {
    async fn public_key(&self, material: &SigningMaterial) -> Result<String, SignerError>;
}
