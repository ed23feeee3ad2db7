//! Process lifecycle: build the store, bind, serve, shut down on Ctrl-C.

use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use todo_core::{MemoryStore, Store};

use crate::config::Config;

pub async fn run(config: Config) -> Result<()> {
    let store: Arc<dyn Store> = Arc::new(MemoryStore::new());
    let app = crate::router(store, config.request_timeout());

    let listener = TcpListener::bind(config.listen)
        .await
        .with_context(|| format!("binding {}", config.listen))?;
    tracing::info!("REST server listening on {}", listener.local_addr()?);
    tracing::info!(
        "request timeout {:?}, shutdown timeout {:?}",
        config.request_timeout(),
        config.shutdown_timeout()
    );

    let shutdown = CancellationToken::new();
    let mut server = tokio::spawn(crate::serve(listener, app, shutdown.clone()));

    tokio::select! {
        signal = tokio::signal::ctrl_c() => {
            signal.context("listening for Ctrl-C")?;
            tracing::info!("Ctrl-C received, shutting down");
        }
        joined = &mut server => {
            joined.context("server task panicked")?.context("server failed")?;
            anyhow::bail!("server exited unexpectedly");
        }
    }

    shutdown.cancel();
    match tokio::time::timeout(config.shutdown_timeout(), &mut server).await {
        Ok(joined) => joined.context("server task panicked")?.context("server failed")?,
        Err(_) => {
            tracing::warn!(
                "in-flight requests still running after {:?}, aborting",
                config.shutdown_timeout()
            );
            server.abort();
        }
    }

    tracing::info!("server stopped");
    Ok(())
}
