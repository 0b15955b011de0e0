//! Coordinator readiness lifecycle.
//!
//! `Uninitialized -> Initializing -> Ready`, with `Failed` reachable from
//! `Initializing`. `Ready` and `Failed` are terminal for an instance.

use std::time::Duration;
use tokio::sync::watch;
use tracing::{error, info};

use crate::types::{BridgeError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadinessState {
    Uninitialized,
    Initializing,
    Ready,
    Failed(String),
}

impl ReadinessState {
    pub fn is_settled(&self) -> bool {
        matches!(self, Self::Ready | Self::Failed(_))
    }
}

/// Shared readiness cell. Waiters are woken on every transition.
#[derive(Debug)]
pub struct Readiness {
    tx: watch::Sender<ReadinessState>,
}

impl Readiness {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(ReadinessState::Uninitialized);
        Self { tx }
    }

    pub fn state(&self) -> ReadinessState {
        self.tx.borrow().clone()
    }

    pub fn is_ready(&self) -> bool {
        *self.tx.borrow() == ReadinessState::Ready
    }

    /// Move to `Initializing`. Returns false if initialization already began.
    pub fn begin(&self) -> bool {
        self.tx.send_if_modified(|state| {
            if *state == ReadinessState::Uninitialized {
                *state = ReadinessState::Initializing;
                true
            } else {
                false
            }
        })
    }

    pub fn mark_ready(&self) {
        if self.settle(ReadinessState::Ready) {
            info!("Coordinator ready");
        }
    }

    pub fn mark_failed(&self, reason: impl Into<String>) {
        let reason = reason.into();
        if self.settle(ReadinessState::Failed(reason.clone())) {
            error!(%reason, "Coordinator initialization failed");
        }
    }

    fn settle(&self, next: ReadinessState) -> bool {
        self.tx.send_if_modified(|state| {
            if *state == ReadinessState::Initializing {
                *state = next;
                true
            } else {
                false
            }
        })
    }

    /// Wait until `Ready` (Ok) or `Failed` (Err), bounded by `limit`.
    pub async fn wait_ready(&self, limit: Duration) -> Result<()> {
        let mut rx = self.tx.subscribe();
        let settled = tokio::time::timeout(limit, rx.wait_for(ReadinessState::is_settled))
            .await
            .map_err(|_| {
                BridgeError::Timeout(format!(
                    "coordinator not ready after {}ms",
                    limit.as_millis()
                ))
            })?
            .map_err(|_| BridgeError::ChannelClosed)?
            .clone();

        match settled {
            ReadinessState::Failed(reason) => Err(BridgeError::CoordinatorFailed(reason)),
            _ => Ok(()),
        }
    }
}

impl Default for Readiness {
    fn default() -> Self {
        Self::new()
    }
}
