//! Configuration types for rinkside.
//!
//! [`Config::load`] layers, lowest to highest priority: the embedded
//! defaults, an optional TOML file, and `RINKSIDE_*` environment variables
//! (`RINKSIDE_SERVER__PORT=9000`). [`Config::defaults`] returns the embedded
//! defaults alone.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use serde::Deserialize;

// ---------------------------------------------------------------------------
// Embedded defaults
// ---------------------------------------------------------------------------

const DEFAULT_CONFIG: &str = r#"
[data]
path = "data/sample.csv"

[server]
host = "127.0.0.1"
port = 5000
"#;

/// `RINKSIDE_<SECTION>__<KEY>` overrides, e.g. `RINKSIDE_SERVER__PORT`.
fn environment() -> config::Environment {
    config::Environment::with_prefix("RINKSIDE")
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}

// ---------------------------------------------------------------------------
// Public config types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub data: DataConfig,
    pub server: ServerConfig,
}

/// `[data]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct DataConfig {
    /// Play-by-play CSV to serve.
    pub path: PathBuf,
}

/// `[server]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        let addr = format!("{}:{}", self.host, self.port);
        addr.parse()
            .map_err(|e| anyhow::anyhow!("invalid listen address {addr}: {e}"))
    }
}

impl Config {
    /// Load the layered configuration. A missing `file` is not an error.
    pub fn load(file: Option<&Path>) -> anyhow::Result<Self> {
        Self::load_with_env(file, environment())
    }

    fn load_with_env(file: Option<&Path>, env: config::Environment) -> anyhow::Result<Self> {
        let mut builder = config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml));
        if let Some(path) = file {
            builder = builder.add_source(config::File::from(path).required(false));
        }
        builder
            .add_source(env)
            .build()?
            .try_deserialize()
            .map_err(Into::into)
    }

    /// Return the built-in defaults without touching the filesystem.
    pub fn defaults() -> Self {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .build()
            .expect("built-in default config must be valid TOML")
            .try_deserialize()
            .expect("built-in default config must deserialize correctly")
    }
}
