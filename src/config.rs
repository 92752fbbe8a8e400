use std::path::PathBuf;

use serde::Deserialize;

/// Runtime configuration, loaded from a YAML file.
///
/// Every field has a default so the server can start with no file at all.
/// The file path is taken from the `HEARTH_CONFIG` environment variable,
/// falling back to `./config.yaml` when that exists.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

#[derive(Clone, Debug, Deserialize)]
pub struct ServerConfig {
    /// Address the listener binds to.
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,
    /// The "host:port" identity this server answers to. Requests whose
    /// Host header differs are rejected with 400.
    #[serde(default = "default_host")]
    pub host: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct StorageConfig {
    /// Base directory all request targets are resolved against.
    #[serde(default = "default_root")]
    pub root: PathBuf,
}

fn default_listen_addr() -> String {
    "127.0.0.1:9999".to_string()
}

fn default_host() -> String {
    "localhost:9999".to_string()
}

fn default_root() -> PathBuf {
    PathBuf::from("webroot")
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
            host: default_host(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
        }
    }
}

impl Config {
    /// Loads configuration from `HEARTH_CONFIG`, then `./config.yaml`,
    /// then built-in defaults.
    pub fn load() -> anyhow::Result<Self> {
        let path = std::env::var("HEARTH_CONFIG")
            .map(PathBuf::from)
            .ok()
            .or_else(|| {
                let fallback = PathBuf::from("config.yaml");
                fallback.exists().then_some(fallback)
            });

        match path {
            Some(path) => {
                let raw = std::fs::read_to_string(&path)?;
                Self::from_yaml(&raw)
            }
            None => Ok(Self::default()),
        }
    }

    pub fn from_yaml(raw: &str) -> anyhow::Result<Self> {
        Ok(serde_yaml::from_str(raw)?)
    }
}
