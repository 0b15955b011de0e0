//! Configuration for the native-messaging host
//!
//! CLI arguments and environment variable handling using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;

use crate::bridge::BridgeConfig;

/// Default data directory name, created under `$HOME`.
pub const DATA_DIR_NAME: &str = ".ssh-auth-bridge";

/// ssh-auth-host - answers browser authentication challenges with a local SSH key
#[derive(Parser, Debug, Clone)]
#[command(name = "ssh-auth-host")]
#[command(about = "Native-messaging host that signs web authentication challenges with an SSH key")]
pub struct Args {
    /// Directory holding the saved key configuration
    #[arg(long, env = "SSH_AUTH_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// Emit logs as JSON lines
    #[arg(long, env = "LOG_JSON", default_value = "false")]
    pub log_json: bool,

    /// Upper bound on one signing call in milliseconds
    #[arg(long, env = "SIGN_TIMEOUT_MS", default_value = "10000")]
    pub sign_timeout_ms: u64,

    /// Upper bound on one storage operation in milliseconds
    #[arg(long, env = "STORAGE_TIMEOUT_MS", default_value = "5000")]
    pub storage_timeout_ms: u64,

    /// Request timeout in milliseconds
    #[arg(long, env = "REQUEST_TIMEOUT_MS", default_value = "30000")]
    pub request_timeout_ms: u64,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Serve native-messaging requests on stdin/stdout (default)
    Host,

    /// Point the bridge at a private key file
    Configure {
        /// Path to the private key
        key_path: PathBuf,

        /// Passphrase for an encrypted key
        #[arg(long, env = "SSH_KEY_PASSPHRASE")]
        passphrase: Option<String>,
    },

    /// Show coordinator status
    Status,

    /// Check that the coordinator answers
    Ping,
}

impl Args {
    pub fn command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Host)
    }

    /// Effective data directory
    pub fn data_dir(&self) -> PathBuf {
        if let Some(dir) = &self.data_dir {
            return dir.clone();
        }
        match std::env::var_os("HOME") {
            Some(home) if !home.is_empty() => PathBuf::from(home).join(DATA_DIR_NAME),
            _ => PathBuf::from(DATA_DIR_NAME),
        }
    }

    pub fn bridge_config(&self) -> BridgeConfig {
        BridgeConfig {
            request_timeout: Duration::from_millis(self.request_timeout_ms),
            sign_timeout: Duration::from_millis(self.sign_timeout_ms),
            storage_timeout: Duration::from_millis(self.storage_timeout_ms),
            ..Default::default()
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        let timeouts = [
            ("SIGN_TIMEOUT_MS", self.sign_timeout_ms),
            ("STORAGE_TIMEOUT_MS", self.storage_timeout_ms),
            ("REQUEST_TIMEOUT_MS", self.request_timeout_ms),
        ];
        if let Some((name, _)) = timeouts.iter().find(|(_, ms)| *ms == 0) {
            return Err(format!("{} must be greater than zero", name));
        }
        Ok(())
    }
}
