use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use contactd::store::{ContactStore, MemoryStore, Snapshot};
use contactd::{drain, populate, ContactHandler, HandlerConfig};
use contactd_http::{app, open_snapshot, AppState, Args};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.log.as_deref());

    let store = Arc::new(MemoryStore::new());

    let snapshot: Option<Box<dyn Snapshot>> = match args.snapshot_target() {
        Some((path, format)) => {
            let snapshot = open_snapshot(path, format)
                .with_context(|| format!("failed to open snapshot {}", path.display()))?;
            info!(path = %path.display(), ?format, "using snapshot");
            Some(snapshot)
        }
        None => {
            info!("no snapshot configured, directory will not be persisted");
            None
        }
    };

    if let Some(snapshot) = &snapshot {
        populate(&*store, &**snapshot)
            .await
            .context("failed to load snapshot")?;
    }

    let shared: Arc<dyn ContactStore> = store.clone();
    let handler = ContactHandler::new(shared, HandlerConfig::default());

    let listener = tokio::net::TcpListener::bind(args.bind)
        .await
        .with_context(|| format!("failed to bind {}", args.bind))?;
    info!(addr = %listener.local_addr()?, "contactd listening");

    axum::serve(listener, app(AppState::new(handler)))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    if let Some(snapshot) = &snapshot {
        drain(&*store, &**snapshot)
            .await
            .context("failed to write snapshot")?;
    }

    info!("contactd stopped");
    Ok(())
}

/// `--log` wins over `RUST_LOG`; with neither, log at `info`.
fn init_tracing(log: Option<&str>) {
    let filter = match log {
        Some(directives) => EnvFilter::try_new(directives).unwrap_or_else(|e| {
            eprintln!("invalid --log filter {directives:?}: {e}, using info");
            EnvFilter::new("info")
        }),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("shutdown requested, draining in-flight requests"),
        Err(e) => {
            warn!(error = %e, "cannot listen for ctrl-c, running until killed");
            std::future::pending::<()>().await;
        }
    }
}
