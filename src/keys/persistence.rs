//! Durable storage for the Credential Reference.
//!
//! The stored document is a single JSON object keyed by [`STORAGE_KEY`],
//! mirroring the browser's local key-value storage.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::Mutex;
use tracing::debug;

use super::reference::CredentialReference;
use crate::types::{BridgeError, Result};

/// Key under which the reference is stored.
pub const STORAGE_KEY: &str = "sshKeyConfig";

/// Durable key-value persistence for the Credential Reference.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Load the last saved reference. `None` when nothing was saved.
    async fn load(&self) -> Result<Option<CredentialReference>>;

    /// Replace the saved reference.
    async fn save(&self, reference: &CredentialReference) -> Result<()>;
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct StoredDocument {
    #[serde(rename = "sshKeyConfig", default, skip_serializing_if = "Option::is_none")]
    ssh_key_config: Option<CredentialReference>,
}

/// JSON file store.
///
/// Writes go to a sibling temp file that is renamed over the target, so a
/// crash mid-write leaves the previous document intact.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at `<data_dir>/credential.json`.
    pub fn in_dir(data_dir: &Path) -> Self {
        Self::new(data_dir.join("credential.json"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl CredentialStore for JsonFileStore {
    async fn load(&self) -> Result<Option<CredentialReference>> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "No stored credential document");
                return Ok(None);
            }
            Err(e) => return Err(BridgeError::Persistence(e.to_string())),
        };

        let document: StoredDocument = serde_json::from_str(&content).map_err(|e| {
            BridgeError::Persistence(format!(
                "Corrupt credential document {}: {}",
                self.path.display(),
                e
            ))
        })?;
        Ok(document.ssh_key_config)
    }

    async fn save(&self, reference: &CredentialReference) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let document = StoredDocument {
            ssh_key_config: Some(reference.clone()),
        };
        let json = serde_json::to_vec_pretty(&document)
            .map_err(|e| BridgeError::Persistence(e.to_string()))?;

        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, json).await?;
        restrict_permissions(&tmp).await?;
        tokio::fs::rename(&tmp, &self.path).await?;

        debug!(path = %self.path.display(), "Saved credential document");
        Ok(())
    }
}

#[cfg(unix)]
async fn restrict_permissions(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    tokio::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600)).await?;
    Ok(())
}

#[cfg(not(unix))]
async fn restrict_permissions(_path: &Path) -> Result<()> {
    Ok(())
}

/// In-memory store with failure injection, for tests.
#[derive(Default)]
pub struct MemoryCredentialStore {
    slot: Mutex<Option<CredentialReference>>,
    fail_loads: AtomicBool,
    fail_saves: AtomicBool,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with a reference already saved.
    pub fn with_reference(reference: CredentialReference) -> Self {
        Self {
            slot: Mutex::new(Some(reference)),
            ..Default::default()
        }
    }

    pub fn set_fail_loads(&self, fail: bool) {
        self.fail_loads.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_saves(&self, fail: bool) {
        self.fail_saves.store(fail, Ordering::SeqCst);
    }

    /// Currently saved reference.
    pub async fn saved(&self) -> Option<CredentialReference> {
        self.slot.lock().await.clone()
    }
}

#[async_trait]
impl CredentialStore for MemoryCredentialStore {
    async fn load(&self) -> Result<Option<CredentialReference>> {
        if self.fail_loads.load(Ordering::SeqCst) {
            return Err(BridgeError::Persistence("storage unavailable".into()));
        }
        Ok(self.slot.lock().await.clone())
    }

    async fn save(&self, reference: &CredentialReference) -> Result<()> {
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(BridgeError::Persistence("storage unavailable".into()));
        }
        *self.slot.lock().await = Some(reference.clone());
        Ok(())
    }
}
