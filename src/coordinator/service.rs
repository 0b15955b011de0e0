//! AuthCoordinator - resolves challenges against the Key Store.

use std::sync::Arc;
use std::time::Duration;
use tracing::{info, info_span, Instrument};

use super::readiness::Readiness;
use super::resolution::ChallengeResolution;
use crate::challenge::{descriptor_for, AuthResponse, Challenge};
use crate::keys::KeyStore;
use crate::signing::ChallengeSigner;
use crate::types::{bounded, BridgeError, Result};

/// Configuration for the AuthCoordinator.
#[derive(Debug, Clone)]
pub struct CoordinatorConfig {
    /// Upper bound on one signing call
    pub sign_timeout: Duration,
    /// How long a challenge may wait for readiness
    pub ready_timeout: Duration,
}

impl Default for CoordinatorConfig {
    fn default() -> Self {
        Self {
            sign_timeout: Duration::from_secs(10),
            ready_timeout: Duration::from_secs(30),
        }
    }
}

/// Resolves challenges into signed responses.
///
/// Reads the Key Store, never writes it.
pub struct AuthCoordinator {
    config: CoordinatorConfig,
    key_store: Arc<KeyStore>,
    signer: Arc<dyn ChallengeSigner>,
    readiness: Arc<Readiness>,
}

impl AuthCoordinator {
    pub fn new(key_store: Arc<KeyStore>, signer: Arc<dyn ChallengeSigner>) -> Self {
        Self {
            config: CoordinatorConfig::default(),
            key_store,
            signer,
            readiness: Arc::new(Readiness::new()),
        }
    }

    pub fn with_config(mut self, config: CoordinatorConfig) -> Self {
        self.config = config;
        self
    }

    pub fn readiness(&self) -> &Arc<Readiness> {
        &self.readiness
    }

    pub fn key_store(&self) -> &Arc<KeyStore> {
        &self.key_store
    }

    /// Replay persisted state and settle readiness.
    ///
    /// Only the first call does anything; later calls return immediately.
    pub async fn initialize(&self) {
        if !self.readiness.begin() {
            return;
        }
        info!(signer = %self.signer.id(), "Initializing auth coordinator");

        match self.key_store.initialize().await {
            Ok(()) => self.readiness.mark_ready(),
            Err(e) => self.readiness.mark_failed(e.to_string()),
        }
    }

    /// Boundary-facing entry point: a response, or `None` on any failure.
    pub async fn handle_challenge(&self, challenge: &Challenge) -> Option<AuthResponse> {
        let mut resolution = ChallengeResolution::new(challenge.origin);
        let span = info_span!("challenge", id = %resolution.id(), url = %challenge.url);

        info!(parent: &span, origin = ?challenge.origin, "Handling authentication challenge");
        resolution.begin();

        match self.resolve(challenge).instrument(span.clone()).await {
            Ok(response) => {
                info!(parent: &span, "Authentication response generated successfully");
                resolution.respond();
                Some(response)
            }
            Err(e) => {
                let _entered = span.enter();
                resolution.fail(e);
                None
            }
        }
    }

    /// Run the four resolution steps, surfacing the failure reason.
    pub async fn resolve(&self, challenge: &Challenge) -> Result<AuthResponse> {
        self.readiness.wait_ready(self.config.ready_timeout).await?;

        let material = self
            .key_store
            .signing_material()
            .await?
            .ok_or(BridgeError::NoKeyConfigured)?;

        let descriptor = descriptor_for(challenge).ok_or(BridgeError::UnparseableChallenge)?;

        let response = bounded(self.config.sign_timeout, "signing", async {
            self.signer
                .sign(&descriptor, &material)
                .await
                .map_err(BridgeError::from)
        })
        .await?;

        if response.algorithm != descriptor.algorithm {
            return Err(BridgeError::SigningFailed(format!(
                "signer answered with {} for a {} challenge",
                response.algorithm, descriptor.algorithm
            )));
        }

        Ok(response)
    }
}
