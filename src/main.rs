mod cli;

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;

use crapi_client::api::ApiClient;
use crapi_client::config::Config;
use crapi_client::effects::Dispatcher;
use crapi_client::logging;
use crapi_client::store::{FilePersistence, Store};

#[tokio::main]
async fn main() -> Result<()> {
    logging::init_tracing();
    let args = cli::Args::parse();

    let config = match &args.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
    .context("Failed to load configuration")?;

    let mut store = Store::builder();
    if config.persistence.enabled {
        let path = config.persistence.resolved_path();
        tracing::debug!(path = %path.display(), "Using persisted session");
        store = store.persistence(Arc::new(FilePersistence::new(path)));
    }
    let store = store.build();

    let api = ApiClient::new(&config).context("Failed to build HTTP client")?;
    let dispatcher = Dispatcher::new(api, store);

    cli::run(&dispatcher, args.command).await
}
