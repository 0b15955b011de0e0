//! Shared types for the bridge

pub mod error;

pub use error::{BridgeError, Result, UNKNOWN_MESSAGE_TYPE};

use std::future::Future;
use std::time::Duration;

/// Run `fut` with an upper bound, mapping expiry to [`BridgeError::Timeout`].
pub async fn bounded<F, T>(limit: Duration, what: &str, fut: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    match tokio::time::timeout(limit, fut).await {
        Ok(result) => result,
        Err(_) => Err(BridgeError::Timeout(format!(
            "{} exceeded {}ms",
            what,
            limit.as_millis()
        ))),
    }
}
