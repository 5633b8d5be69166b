use std::{
    net::IpAddr,
    path::{Path, PathBuf},
};

use anyhow::Context;
use config::{Environment, File, FileFormat};
use quickform_models::emailjs::EmailJsCredentials;
use serde::Deserialize;
use url::Url;

pub use duration::Duration;

mod duration;

pub const DEFAULT_CONFIG_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../config.toml");

/// Prefix of environment variables overriding single settings, e.g.
/// `QUICKFORM__EMAILJS__PUBLIC_KEY`.
pub const ENV_PREFIX: &str = "QUICKFORM";
const ENV_SEPARATOR: &str = "__";

/// Environment variable holding additional config files, separated like
/// `PATH` entries.
pub const CONFIG_PATHS_VAR: &str = "QUICKFORM_CONFIG";

/// The default config file followed by every file listed in
/// `QUICKFORM_CONFIG`.
pub fn config_paths() -> Vec<PathBuf> {
    let extra = std::env::var_os(CONFIG_PATHS_VAR).unwrap_or_default();
    std::iter::once(PathBuf::from(DEFAULT_CONFIG_PATH))
        .chain(std::env::split_paths(&extra).filter(|path| !path.as_os_str().is_empty()))
        .collect()
}

/// Load the config files in order, later files overriding earlier ones, and
/// apply the `QUICKFORM__*` environment variables on top.
pub fn load(paths: &[impl AsRef<Path>]) -> anyhow::Result<Config> {
    load_with_environment(paths, None)
}

fn load_with_environment(
    paths: &[impl AsRef<Path>],
    environment: Option<config::Map<String, String>>,
) -> anyhow::Result<Config> {
    paths
        .iter()
        .try_fold(config::Config::builder(), |builder, path| {
            let path = path.as_ref();
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file at {}", path.display()))?;
            let source = File::from_str(&content, FileFormat::Toml);
            anyhow::Ok(builder.add_source(source))
        })?
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator(ENV_SEPARATOR)
                .separator(ENV_SEPARATOR)
                .source(environment),
        )
        .build()?
        .try_deserialize()
        .context("Failed to load config")
}

#[derive(Debug, Deserialize)]
pub struct Config {
    pub http: HttpConfig,
    pub persistence: PersistenceConfig,
    #[serde(default)]
    pub emailjs: EmailJsConfig,
    pub health: HealthConfig,
}

#[derive(Debug, Deserialize)]
pub struct HttpConfig {
    pub host: IpAddr,
    pub port: u16,
}

/// Supabase project holding the submissions table.
#[derive(Debug, Deserialize)]
pub struct PersistenceConfig {
    pub url: Url,
    pub api_key: String,
    pub table: String,
    pub schema: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct EmailJsConfig {
    pub service_id: Option<String>,
    pub template_id: Option<String>,
    pub public_key: Option<String>,
    pub endpoint_override: Option<Url>,
}

impl EmailJsConfig {
    /// `None` unless all three settings are present and not blank.
    pub fn credentials(&self) -> Option<EmailJsCredentials> {
        EmailJsCredentials::from_parts(
            self.service_id.clone(),
            self.template_id.clone(),
            self.public_key.clone(),
        )
    }
}

#[derive(Debug, Deserialize)]
pub struct HealthConfig {
    pub cache_ttl: Duration,
}
