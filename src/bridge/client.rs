//! BridgeClient - request/response correlation over the host.

use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::oneshot;
use tracing::{debug, warn};

use super::host::{ServiceHost, WakeTrigger};
use super::messages::{Reply, Request};
use super::service::Envelope;
use crate::types::{BridgeError, Result};

/// Sends envelopes to the coordinator context and awaits the correlated reply.
///
/// Every send wakes the coordinator context if it is suspended.
#[derive(Clone)]
pub struct BridgeClient {
    host: Arc<ServiceHost>,
    timeout: Duration,
}

impl BridgeClient {
    pub fn new(host: Arc<ServiceHost>, timeout: Duration) -> Self {
        Self { host, timeout }
    }

    pub fn host(&self) -> &Arc<ServiceHost> {
        &self.host
    }

    pub async fn send(&self, request: &Request) -> Result<Reply> {
        let payload = serde_json::to_value(request)?;
        let trigger = if request.is_probe() {
            WakeTrigger::Probe
        } else {
            WakeTrigger::Message
        };
        self.deliver(payload, trigger).await
    }

    /// Send an undecoded envelope, as received from an external transport.
    pub async fn send_value(&self, payload: Value) -> Result<Reply> {
        self.deliver(payload, WakeTrigger::Message).await
    }

    pub async fn ping(&self) -> Result<Reply> {
        self.send(&Request::Ping).await
    }

    async fn deliver(&self, payload: Value, trigger: WakeTrigger) -> Result<Reply> {
        let inbox = self.host.inbox(trigger).await;
        let (reply_tx, reply_rx) = oneshot::channel();

        inbox
            .send(Envelope {
                payload,
                reply: reply_tx,
            })
            .await
            .map_err(|_| BridgeError::ChannelClosed)?;

        match tokio::time::timeout(self.timeout, reply_rx).await {
            Ok(Ok(reply)) => {
                debug!(success = reply.is_success(), "Received reply");
                Ok(reply)
            }
            Ok(Err(_)) => {
                warn!("Coordinator context dropped the request");
                Err(BridgeError::ChannelClosed)
            }
            Err(_) => Err(BridgeError::Timeout(format!(
                "no reply within {}ms",
                self.timeout.as_millis()
            ))),
        }
    }
}
