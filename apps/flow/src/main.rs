use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use prep_flow::client::HttpApi;
use prep_flow::config::FlowConfig;
use prep_flow::storage::FileStore;
use prep_flow::views::{FlowContext, Step};
use prep_flow::walkthrough::Walkthrough;

#[tokio::main]
async fn main() -> Result<()> {
    let config = FlowConfig::from_env()?;

    // Logs to stderr; stdout carries the prompts
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let api = HttpApi::new(config.api_base_url.clone()).context("Failed to build HTTP client")?;
    let store = FileStore::open(&config.store_path)?;
    info!(
        "Using API at {} with session file {}",
        config.api_base_url,
        store.path().display()
    );

    let ctx = FlowContext::new(Arc::new(api), Arc::new(store));
    let start = Step::resume_point(ctx.store.as_ref());

    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    Walkthrough::new(ctx, stdin, std::io::stdout())
        .run(start)
        .await?;

    Ok(())
}
