use figment::{
    Figment,
    providers::{Env, Format, Toml},
};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,

    /// HMAC secret for bearer tokens. No default; startup fails without it.
    pub token_secret: String,
    #[serde(default = "default_token_ttl_secs")]
    pub token_ttl_secs: u64,

    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    #[serde(default)]
    pub storage: StorageConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    #[serde(default = "default_backend")]
    pub backend: String, // "memory", "sqlite"
    pub sqlite_path: Option<String>,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            sqlite_path: None,
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".into()
}
fn default_port() -> u16 {
    5000
}
fn default_token_ttl_secs() -> u64 {
    86_400
} // 24 hours
fn default_request_timeout_secs() -> u64 {
    10
}
fn default_backend() -> String {
    "memory".into()
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        let config: Config = Figment::new()
            .merge(Toml::file("stockpile.toml"))
            .merge(Env::prefixed("STOCKPILE_"))
            .extract()?;
        Ok(config)
    }
}
