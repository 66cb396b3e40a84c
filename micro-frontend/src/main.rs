//! Entry point for the `micro-posts` command.
//!
//! Reads `MICRO_ADDRESS` / `MICRO_NAMESPACE` / `MICRO_TIMEOUT_MS`, loads the
//! post list once and prints it.

use std::sync::Arc;

use micro_client::{MicroConfig, MicroService};
use micro_frontend::{PostListView, ViewState};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let config = match MicroConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            tracing::error!(error = %e, "invalid configuration");
            std::process::exit(2);
        }
    };

    info!(address = %config.address, namespace = %config.namespace, "micro-posts starting");

    let gateway = match MicroService::connect(config) {
        Ok(g) => Arc::new(g),
        Err(e) => {
            tracing::error!(error = %e, "failed to build http client");
            std::process::exit(2);
        }
    };

    let view = PostListView::new(gateway);
    let load = match view.on_init() {
        Ok(l) => l,
        Err(e) => {
            tracing::error!(error = %e, "view initialization failed");
            std::process::exit(1);
        }
    };

    let finished = load.finished();
    tokio::pin!(finished);

    let state = tokio::select! {
        state = &mut finished => state,
        _ = tokio::signal::ctrl_c() => {
            info!("interrupted, tearing down view");
            view.on_destroy();
            finished.await
        }
    };

    print!("{}", view.render());

    if !matches!(state, ViewState::Loaded) {
        std::process::exit(1);
    }
}
