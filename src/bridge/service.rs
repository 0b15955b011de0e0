//! Coordinator-context service: readiness gate and message dispatch.

use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};
use tokio::task::{JoinHandle, JoinSet};
use tracing::{debug, info, warn};

use super::host::Collaborators;
use super::messages::{ConfigureKey, Reply, Request, ServiceStatus};
use crate::coordinator::{AuthCoordinator, CoordinatorConfig};
use crate::keys::{KeyStore, DEFAULT_STORAGE_TIMEOUT};

/// Bridge-level tunables shared by every incarnation of the service.
#[derive(Debug, Clone)]
pub struct BridgeConfig {
    /// Reported in `GET_STATUS`
    pub version: String,
    /// Upper bound on one request/response round trip
    pub request_timeout: Duration,
    /// Upper bound on one signing call
    pub sign_timeout: Duration,
    /// Upper bound on one storage operation
    pub storage_timeout: Duration,
    /// Depth of the service inbox
    pub inbox_capacity: usize,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            request_timeout: Duration::from_secs(30),
            sign_timeout: Duration::from_secs(10),
            storage_timeout: DEFAULT_STORAGE_TIMEOUT,
            inbox_capacity: 64,
        }
    }
}

/// State owned by one incarnation of the coordinator context.
///
/// Everything in here is rebuilt from persistent storage when the
/// context is resurrected.
pub struct ServiceContext {
    coordinator: Arc<AuthCoordinator>,
    key_store: Arc<KeyStore>,
    config: BridgeConfig,
}

impl ServiceContext {
    pub fn build(collaborators: &Collaborators, config: &BridgeConfig) -> Self {
        let mut key_store = KeyStore::new(
            collaborators.persistence.clone(),
            collaborators.reader.clone(),
        )
        .with_timeout(config.storage_timeout);
        if let Some(deriver) = &collaborators.deriver {
            key_store = key_store.with_public_key_deriver(deriver.clone());
        }
        let key_store = Arc::new(key_store);

        let coordinator = AuthCoordinator::new(key_store.clone(), collaborators.signer.clone())
            .with_config(CoordinatorConfig {
                sign_timeout: config.sign_timeout,
                ready_timeout: config.request_timeout,
            });

        Self {
            coordinator: Arc::new(coordinator),
            key_store,
            config: config.clone(),
        }
    }

    pub fn coordinator(&self) -> &Arc<AuthCoordinator> {
        &self.coordinator
    }

    pub fn key_store(&self) -> &Arc<KeyStore> {
        &self.key_store
    }

    pub async fn status(&self) -> ServiceStatus {
        ServiceStatus {
            initialized: self.coordinator.readiness().is_ready(),
            key_configured: self.key_store.is_configured().await,
            version: self.config.version.clone(),
        }
    }

    /// Decode and dispatch a raw envelope.
    pub async fn dispatch_value(&self, payload: Value) -> Reply {
        match Request::from_value(payload) {
            Ok(request) => self.dispatch(request).await,
            Err(e) => {
                warn!(error = %e, "Rejected message");
                Reply::failure(&e)
            }
        }
    }

    /// Dispatch one request. Everything except PING waits for readiness.
    pub async fn dispatch(&self, request: Request) -> Reply {
        debug!(kind = request.kind(), "Dispatching message");

        if request.is_probe() {
            return Reply::alive();
        }

        if let Err(e) = self
            .coordinator
            .readiness()
            .wait_ready(self.config.request_timeout)
            .await
        {
            warn!(kind = request.kind(), error = %e, "Coordinator not ready");
            return Reply::failure(&e);
        }

        match request {
            Request::GetStatus => Reply::status(self.status().await),
            Request::ConfigureKey(payload) => self.configure(payload).await,
            Request::AuthChallenge { challenge } => {
                Reply::auth(self.coordinator.handle_challenge(&challenge).await)
            }
            Request::Ping => Reply::alive(),
        }
    }

    async fn configure(&self, payload: ConfigureKey) -> Reply {
        let result = match payload.key_source() {
            Ok(source) => self.key_store.configure(source, payload.passphrase()).await,
            Err(e) => Err(e),
        };
        match result {
            Ok(()) => Reply::ack(),
            Err(e) => {
                warn!(error = %e, "Key configuration failed");
                Reply::failure(&e)
            }
        }
    }
}

/// One queued request and where its reply goes.
pub(crate) struct Envelope {
    pub payload: Value,
    pub reply: oneshot::Sender<Reply>,
}

/// A running incarnation: its inbox and its tasks.
pub(crate) struct ServiceHandle {
    pub generation: u64,
    pub inbox: mpsc::Sender<Envelope>,
    pub context: Arc<ServiceContext>,
    worker: JoinHandle<()>,
    init: JoinHandle<()>,
}

impl ServiceHandle {
    /// Start the inbox loop and kick off initialization in parallel.
    pub fn spawn(context: ServiceContext, generation: u64) -> Self {
        let context = Arc::new(context);
        let (inbox, rx) = mpsc::channel(context.config.inbox_capacity.max(1));

        let coordinator = context.coordinator.clone();
        let init = tokio::spawn(async move {
            coordinator.initialize().await;
        });
        let worker = tokio::spawn(run(context.clone(), rx));

        info!(generation, "Coordinator context started");
        Self {
            generation,
            inbox,
            context,
            worker,
            init,
        }
    }

    pub fn is_alive(&self) -> bool {
        !self.worker.is_finished() && !self.inbox.is_closed()
    }

    /// Tear the incarnation down. In-flight requests are dropped.
    pub fn stop(self) {
        self.init.abort();
        self.worker.abort();
        info!(generation = self.generation, "Coordinator context suspended");
    }
}

async fn run(context: Arc<ServiceContext>, mut rx: mpsc::Receiver<Envelope>) {
    let mut inflight = JoinSet::new();

    loop {
        tokio::select! {
            envelope = rx.recv() => {
                let Some(Envelope { payload, reply }) = envelope else {
                    break;
                };
                let ctx = context.clone();
                inflight.spawn(async move {
                    let response = ctx.dispatch_value(payload).await;
                    if reply.send(response).is_err() {
                        debug!("Requester went away before the reply");
                    }
                });
            }
            Some(joined) = inflight.join_next(), if !inflight.is_empty() => {
                if let Err(e) = joined {
                    if e.is_panic() {
                        warn!(error = %e, "Request handler panicked");
                    }
                }
            }
        }
    }

    while inflight.join_next().await.is_some() {}
    debug!("Coordinator inbox closed");
}
