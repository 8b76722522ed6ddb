use std::env;
use std::path::{Path, PathBuf};
use strum::{AsRefStr, EnumString};

/// Environment variable names - single source of truth
pub mod env_vars {
    pub const PORT: &str = "PORT";
    pub const BIND_HOST: &str = "BIND_HOST";
    /// Directory holding the three JSON tables. Created at startup.
    pub const DATA_DIR: &str = "DATA_DIR";
    /// "file" (default) or "memory". Memory keeps nothing across restarts.
    pub const STORE_BACKEND: &str = "STORE_BACKEND";
}

/// Default values
pub mod defaults {
    pub const PORT: u16 = 8000;
    pub const BIND_HOST: &str = "0.0.0.0";
    pub const DATA_DIR: &str = "data";
}

/// Returns the absolute path to the notify-backend directory.
/// Uses CARGO_MANIFEST_DIR at compile time, so it resolves the same way
/// regardless of the working directory at runtime.
pub fn backend_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
}

/// Returns the absolute path to the repo root (parent of notify-backend/).
pub fn repo_root() -> PathBuf {
    let backend = backend_dir();
    backend
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or(backend)
}

/// Default data directory: `<repo root>/data`
pub fn default_data_dir() -> PathBuf {
    repo_root().join(defaults::DATA_DIR)
}

/// Parse a port value, falling back to the default on missing or bad input
fn parse_port(raw: Option<String>) -> u16 {
    match raw {
        Some(value) => value.trim().parse().unwrap_or_else(|_| {
            log::warn!(
                "{} '{}' is not a valid port, using {}",
                env_vars::PORT,
                value,
                defaults::PORT
            );
            defaults::PORT
        }),
        None => defaults::PORT,
    }
}

/// Where table records live
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, EnumString, AsRefStr)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum StoreBackend {
    /// One JSON file per table under the data directory
    #[default]
    File,
    /// Process memory only
    Memory,
}

fn parse_store_backend(raw: Option<String>) -> StoreBackend {
    match raw {
        Some(value) => value.trim().parse().unwrap_or_else(|_| {
            log::warn!(
                "{} '{}' is not a known backend, using file",
                env_vars::STORE_BACKEND,
                value
            );
            StoreBackend::File
        }),
        None => StoreBackend::File,
    }
}

#[derive(Clone, Debug)]
pub struct Config {
    pub port: u16,
    pub bind_host: String,
    pub data_dir: PathBuf,
    pub store_backend: StoreBackend,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            port: parse_port(env::var(env_vars::PORT).ok()),
            bind_host: env::var(env_vars::BIND_HOST)
                .unwrap_or_else(|_| defaults::BIND_HOST.to_string()),
            data_dir: env::var(env_vars::DATA_DIR)
                .map(PathBuf::from)
                .unwrap_or_else(|_| default_data_dir()),
            store_backend: parse_store_backend(env::var(env_vars::STORE_BACKEND).ok()),
        }
    }
}

/// Create the data directory if it doesn't exist.
/// Table files themselves are created on first write.
pub fn initialize_data_dir(data_dir: &Path) -> std::io::Result<()> {
    std::fs::create_dir_all(data_dir)?;
    log::info!("Data directory: {:?}", data_dir);
    Ok(())
}
