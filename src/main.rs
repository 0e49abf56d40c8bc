//! Gemini Agent - HTTP server entry point.
//!
//! Serves the chat page and the chat API.

use std::path::Path;

use gemini_agent::{api, config, Config};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gemini_agent=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    config::load_env_file(Path::new(".env"))?;
    let config = Config::from_env()?;
    info!("Loaded configuration: model={}", config.model);

    api::serve(config).await?;

    Ok(())
}
