//! ServiceHost - owns the coordinator context's lifecycle.
//!
//! The coordinator context can be suspended at any moment and must be
//! brought back on the next wake trigger (startup, install, an incoming
//! message or a probe). Creation is guarded by a single async mutex so that
//! any number of concurrent triggers converge on one live incarnation.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, Mutex};
use tracing::{debug, info};

use super::client::BridgeClient;
use super::service::{BridgeConfig, Envelope, ServiceContext, ServiceHandle};
use crate::keys::{CredentialStore, KeyMaterialReader};
use crate::signing::{ChallengeSigner, PublicKeyDeriver};

/// Long-lived collaborators every incarnation is built from.
///
/// Persistence outlives incarnations; in-memory state does not.
#[derive(Clone)]
pub struct Collaborators {
    pub persistence: Arc<dyn CredentialStore>,
    pub reader: Arc<dyn KeyMaterialReader>,
    pub signer: Arc<dyn ChallengeSigner>,
    pub deriver: Option<Arc<dyn PublicKeyDeriver>>,
}

impl fmt::Debug for Collaborators {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Collaborators")
            .field("signer", &self.signer.id())
            .field("has_deriver", &self.deriver.is_some())
            .finish()
    }
}

/// Why the host was asked to (re)start the coordinator context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WakeTrigger {
    Startup,
    Install,
    Message,
    Probe,
}

impl fmt::Display for WakeTrigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Startup => "startup",
            Self::Install => "install",
            Self::Message => "message",
            Self::Probe => "probe",
        };
        f.write_str(name)
    }
}

pub struct ServiceHost {
    collaborators: Collaborators,
    config: BridgeConfig,
    slot: Mutex<Option<ServiceHandle>>,
    generation: AtomicU64,
}

impl ServiceHost {
    pub fn new(collaborators: Collaborators, config: BridgeConfig) -> Self {
        Self {
            collaborators,
            config,
            slot: Mutex::new(None),
            generation: AtomicU64::new(0),
        }
    }

    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    /// Number of incarnations created so far.
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    pub async fn is_running(&self) -> bool {
        self.slot
            .lock()
            .await
            .as_ref()
            .is_some_and(ServiceHandle::is_alive)
    }

    /// Ensure an incarnation is running, creating one if needed.
    pub async fn wake(&self, trigger: WakeTrigger) {
        let _ = self.inbox(trigger).await;
    }

    /// Context of the live incarnation, waking one if needed.
    pub async fn context(&self) -> Arc<ServiceContext> {
        let mut slot = self.slot.lock().await;
        self.ensure_running(&mut slot, WakeTrigger::Message)
            .context
            .clone()
    }

    /// Inbox of the live incarnation, waking one if needed.
    pub(crate) async fn inbox(&self, trigger: WakeTrigger) -> mpsc::Sender<Envelope> {
        let mut slot = self.slot.lock().await;
        self.ensure_running(&mut slot, trigger).inbox.clone()
    }

    fn ensure_running<'a>(
        &self,
        slot: &'a mut Option<ServiceHandle>,
        trigger: WakeTrigger,
    ) -> &'a ServiceHandle {
        if let Some(handle) = slot.take() {
            if handle.is_alive() {
                debug!(%trigger, generation = handle.generation, "Coordinator context already running");
                return slot.insert(handle);
            }
            handle.stop();
        }

        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        info!(%trigger, generation, "Waking coordinator context");
        let context = ServiceContext::build(&self.collaborators, &self.config);
        slot.insert(ServiceHandle::spawn(context, generation))
    }

    /// Tear down the live incarnation, dropping all in-memory state.
    ///
    /// Persisted state survives and is replayed by the next incarnation.
    pub async fn suspend(&self) {
        if let Some(handle) = self.slot.lock().await.take() {
            handle.stop();
        }
    }

    /// A client bound to this host, using the configured request timeout.
    pub fn client(self: &Arc<Self>) -> BridgeClient {
        BridgeClient::new(Arc::clone(self), self.config.request_timeout)
    }

    pub fn client_with_timeout(self: &Arc<Self>, timeout: Duration) -> BridgeClient {
        BridgeClient::new(Arc::clone(self), timeout)
    }
}
