//! ssh-auth-host - native-messaging host for the SSH auth bridge

use clap::Parser;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ssh_auth_bridge::{
    bridge::{native, BridgeClient, Collaborators, ConfigureKey, Reply, Request, ServiceHost, WakeTrigger},
    config::{Args, Command},
    keys::{FsKeyReader, JsonFileStore},
    signing::SshKeySigner,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file if present
    let _ = dotenvy::dotenv();

    let args = Args::parse();
    init_tracing(&args);

    if let Err(e) = args.validate() {
        error!("Configuration error: {}", e);
        std::process::exit(1);
    }

    let data_dir = args.data_dir();
    let config = args.bridge_config();

    info!("======================================");
    info!("  SSH Auth Bridge host v{}", config.version);
    info!("======================================");
    info!("Data dir: {}", data_dir.display());
    info!("Sign timeout: {}ms", args.sign_timeout_ms);
    info!("Storage timeout: {}ms", args.storage_timeout_ms);
    info!("Request timeout: {}ms", args.request_timeout_ms);
    info!("======================================");

    let signer = Arc::new(SshKeySigner::new());
    let collaborators = Collaborators {
        persistence: Arc::new(JsonFileStore::in_dir(&data_dir)),
        reader: Arc::new(FsKeyReader),
        signer: signer.clone(),
        deriver: Some(signer),
    };

    let host = Arc::new(ServiceHost::new(collaborators, config));
    host.wake(WakeTrigger::Startup).await;
    let client = host.client();

    let outcome = match args.command() {
        Command::Host => native::serve(&client, tokio::io::stdin(), tokio::io::stdout())
            .await
            .map(|_| true)
            .map_err(anyhow::Error::from),
        Command::Configure {
            key_path,
            passphrase,
        } => {
            let key_path = tokio::fs::canonicalize(&key_path).await.unwrap_or(key_path);
            let request = Request::ConfigureKey(ConfigureKey::from_path(
                key_path.to_string_lossy(),
                passphrase,
            ));
            run_once(&client, &request).await
        }
        Command::Status => run_once(&client, &Request::GetStatus).await,
        Command::Ping => run_once(&client, &Request::Ping).await,
    };

    host.suspend().await;

    match outcome {
        Ok(true) => Ok(()),
        Ok(false) => std::process::exit(1),
        Err(e) => {
            error!("Host failed: {}", e);
            Err(e)
        }
    }
}

/// Send one request and print the reply. `Ok(false)` for a failure reply.
async fn run_once(client: &BridgeClient, request: &Request) -> anyhow::Result<bool> {
    let reply: Reply = client.send(request).await?;
    println!("{}", serde_json::to_string_pretty(&reply)?);
    Ok(reply.is_success())
}

/// Logs go to stderr; stdout carries native-messaging frames.
fn init_tracing(args: &Args) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!(
            "ssh_auth_bridge={level},ssh_auth_host={level},info",
            level = args.log_level
        )
        .into()
    });

    let registry = tracing_subscriber::registry().with(filter);
    if args.log_json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}
