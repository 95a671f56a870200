mod api;
mod app;
mod flows;
mod format;
mod models;
mod storage;
mod utils;
mod views;

use clap::Parser;
use colored::Colorize;
use eyre::Result;
use log::{debug, info};

use crate::api::client::ApiClient;
use crate::app::{App, parse_view};
use crate::storage::FileStorage;
use crate::utils::cli::Args;
use crate::utils::config::{Config, config};
use crate::utils::log::Logger;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    Logger::init(args.verbosity);

    info!(
        "starting jobmatch {}",
        format!("v{}", env!("CARGO_PKG_VERSION")).magenta()
    );

    let config: Config = config(args.config.clone())?;

    let base_url = resolve_base_url(&args, &config);
    info!("using backend at {}", base_url);

    let api = ApiClient::new(base_url);
    let storage = FileStorage::new(&config.storage.dir)?;

    let start = parse_view(&args.view, args.refresh);
    debug!("start route: {:?}", start);

    App::new(api, storage).run(start).await
}

/// CLI flag wins over the environment, which wins over the config file.
/// Trailing slashes are stripped so endpoint paths can be appended as-is.
fn resolve_base_url(args: &Args, config: &Config) -> String {
    if let Some(ref url) = args.base_url {
        return url.trim_end_matches('/').to_string();
    }
    if let Ok(url) = std::env::var("JOBMATCH_BASE_URL")
        && !url.is_empty()
    {
        return url.trim_end_matches('/').to_string();
    }
    config.backend.base_url.trim_end_matches('/').to_string()
}
