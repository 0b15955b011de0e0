//! Native-messaging transport
//!
//! Browsers talk to native hosts over stdio: each message is a 32-bit
//! length in native byte order followed by that many bytes of UTF-8 JSON.
//!
//! ```text
//! ┌──────────────┬────────────────────────┐
//! │ len: u32 (ne)│ JSON payload (len B)   │
//! └──────────────┴────────────────────────┘
//! ```

use serde_json::Value;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, info, warn};

use super::client::BridgeClient;
use super::messages::Reply;
use crate::types::{BridgeError, Result};

/// Maximum message size (1MB)
pub const MAX_MESSAGE_SIZE: usize = 1024 * 1024;

/// Read one frame. `Ok(None)` means the peer closed the stream cleanly.
pub async fn read_frame<R>(reader: &mut R) -> Result<Option<Vec<u8>>>
where
    R: AsyncRead + Unpin,
{
    let mut header = [0u8; 4];
    let mut filled = 0;
    while filled < header.len() {
        let n = reader
            .read(&mut header[filled..])
            .await
            .map_err(|e| BridgeError::Frame(e.to_string()))?;
        if n == 0 {
            if filled == 0 {
                return Ok(None);
            }
            return Err(BridgeError::Frame("truncated length prefix".into()));
        }
        filled += n;
    }

    let len = u32::from_ne_bytes(header) as usize;
    if len > MAX_MESSAGE_SIZE {
        return Err(BridgeError::Frame(format!(
            "message of {} bytes exceeds limit of {}",
            len, MAX_MESSAGE_SIZE
        )));
    }

    let mut data = vec![0u8; len];
    reader
        .read_exact(&mut data)
        .await
        .map_err(|e| BridgeError::Frame(format!("truncated message: {}", e)))?;
    Ok(Some(data))
}

/// Write one frame and flush.
pub async fn write_frame<W>(writer: &mut W, payload: &[u8]) -> Result<()>
where
    W: AsyncWrite + Unpin,
{
    if payload.len() > MAX_MESSAGE_SIZE {
        return Err(BridgeError::Frame(format!(
            "reply of {} bytes exceeds limit of {}",
            payload.len(),
            MAX_MESSAGE_SIZE
        )));
    }

    let io = |e: std::io::Error| BridgeError::Frame(e.to_string());
    writer
        .write_all(&(payload.len() as u32).to_ne_bytes())
        .await
        .map_err(io)?;
    writer.write_all(payload).await.map_err(io)?;
    writer.flush().await.map_err(io)
}

pub async fn write_reply<W>(writer: &mut W, reply: &Reply) -> Result<()>
where
    W: AsyncWrite + Unpin,
{
    let bytes = serde_json::to_vec(reply).map_err(|e| BridgeError::Frame(e.to_string()))?;
    write_frame(writer, &bytes).await
}

/// Serve framed requests until the peer closes the stream.
///
/// Requests are answered in arrival order, one reply per request. Bad JSON
/// gets a failure reply; a broken frame ends the session.
pub async fn serve<R, W>(client: &BridgeClient, mut reader: R, mut writer: W) -> Result<()>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    info!("Native messaging session started");
    let mut handled = 0u64;

    while let Some(frame) = read_frame(&mut reader).await? {
        let reply = match serde_json::from_slice::<Value>(&frame) {
            Ok(payload) => {
                debug!(payload = %preview(&payload), "Received native message");
                client
                    .send_value(payload)
                    .await
                    .unwrap_or_else(Reply::from)
            }
            Err(e) => {
                warn!(error = %e, "Unparseable native message");
                Reply::failure(&BridgeError::MalformedMessage(e.to_string()))
            }
        };
        write_reply(&mut writer, &reply).await?;
        handled += 1;
    }

    info!(handled, "Native messaging session closed");
    Ok(())
}

/// Payload fields that never reach the logs.
const SECRET_FIELDS: &[&str] = &["passphrase", "keyContent"];

/// First 50 characters of a payload with secrets masked, for logs.
fn preview(payload: &Value) -> String {
    let text = match payload.as_object() {
        Some(object) => {
            let mut masked = object.clone();
            for field in SECRET_FIELDS {
                if let Some(value) = masked.get_mut(*field) {
                    *value = Value::String("[REDACTED]".into());
                }
            }
            Value::Object(masked).to_string()
        }
        None => payload.to_string(),
    };
    match text.char_indices().nth(50) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text,
    }
}
