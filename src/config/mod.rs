//! Service configuration.
//!
//! Layering, highest precedence first: CLI flags, environment variables
//! (handled by clap's `env` feature), optional TOML config file, built-in
//! defaults.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use serde::Deserialize;
use tracing::warn;

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_SEED_PATH: &str = "seed/tasks.json";
const DEFAULT_LOG: &str = "info";

fn default_bind_address() -> String {
    "127.0.0.1".to_string()
}

/// Optional `taskd.toml` contents. Every key may be omitted.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub port: Option<u16>,
    pub bind_address: Option<String>,
    pub seed_path: Option<PathBuf>,
    pub log: Option<String>,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        toml::from_str(&raw).with_context(|| format!("parsing config file {}", path.display()))
    }
}

/// Resolved runtime configuration.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub port: u16,
    pub bind_address: String,
    pub seed_path: PathBuf,
    pub log: String,
}

impl ServiceConfig {
    /// Merge CLI/env overrides over the file layer over defaults.
    pub fn new(
        port: Option<u16>,
        bind_address: Option<String>,
        seed_path: Option<PathBuf>,
        log: Option<String>,
        file: FileConfig,
    ) -> Self {
        let config = Self {
            port: port.or(file.port).unwrap_or(DEFAULT_PORT),
            bind_address: bind_address
                .or(file.bind_address)
                .unwrap_or_else(default_bind_address),
            seed_path: seed_path
                .or(file.seed_path)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_SEED_PATH)),
            log: log.or(file.log).unwrap_or_else(|| DEFAULT_LOG.to_string()),
        };
        if config.bind_address == "0.0.0.0" {
            warn!("binding 0.0.0.0 exposes the task API to the network");
        }
        config
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self::new(None, None, None, None, FileConfig::default())
    }
}
