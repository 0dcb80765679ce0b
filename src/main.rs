use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;

use rinkside::config::Config;
use rinkside::{api, CsvSource, DatasetCache, QueryEngine};

#[derive(Parser)]
#[command(name = "rinkside", about = "Serve hockey play-by-play data as JSON")]
struct Cli {
    /// TOML config file layered over the built-in defaults.
    #[arg(long, short)]
    config: Option<PathBuf>,

    /// Play-by-play CSV (overrides `[data] path`).
    #[arg(long)]
    data: Option<PathBuf>,

    /// Listen port (overrides `[server] port`).
    #[arg(long, short)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let mut cfg = Config::load(cli.config.as_deref()).context("loading configuration")?;
    if let Some(path) = cli.data {
        cfg.data.path = path;
    }
    if let Some(port) = cli.port {
        cfg.server.port = port;
    }

    let engine = QueryEngine::new(Arc::new(DatasetCache::new(CsvSource::new(&cfg.data.path))));

    // A bad source is fatal at startup rather than on the first request.
    let table = engine
        .canonical_table()
        .with_context(|| format!("loading {}", cfg.data.path.display()))?;
    log::info!("serving {} events", table.len());

    let addr = cfg.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    log::info!("listening on http://{addr}");

    axum::serve(listener, api::router(engine))
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            log::info!("shutting down");
        })
        .await?;
    Ok(())
}
