use anyhow::Context;
use clap::Parser;
use kanjigraph_api::{AppState, Server};
use kanjigraph_core::ConfigManager;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "kanjigraph-api", about = "Serve kanji graphs and dictionary search as JSON", version)]
struct Args {
    /// Interface to bind; overrides server.host
    host: Option<String>,

    /// Port to bind; overrides server.port
    port: Option<u16>,

    /// Directory holding default.toml, {env}.toml and local.toml
    #[arg(long, env = "KANJIGRAPH_CONFIG_DIR")]
    config_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = match args.config_dir {
        Some(dir) => ConfigManager::from_dir(dir, None),
        None => ConfigManager::new(),
    }
    .context("failed to load configuration")?;

    let level = &config.settings().logging.level;
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("{},tower_http=debug", level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
    tracing::info!(
        "Configuration loaded from {:?} (env {})",
        config.config_dir(),
        config.env()
    );
    let mut settings = config.into_settings();

    if let Some(host) = args.host {
        settings.server.host = host;
    }
    if let Some(port) = args.port {
        settings.server.port = port;
    }
    settings.validate().context("invalid configuration")?;

    let addr = Server::bind_addr(&settings.server)
        .await
        .context("failed to resolve listen address")?;
    let state = AppState::load(settings).context("failed to load kanji data")?;
    Server::new(addr, state).run().await?;
    Ok(())
}
