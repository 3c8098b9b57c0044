use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::debug;

const DEFAULT_CONFIG_FILES: &[&str] = &[
    "parley.toml",
    "config/parley.toml",
    "crates/config/parley.toml",
    "../parley.toml",
    "../config/parley.toml",
];

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub users: ServiceConfig,
    #[serde(default)]
    pub chats: ServiceConfig,
}

/// Per-service settings: where to listen and which database to use.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            http: HttpConfig::default(),
            database: DatabaseConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    pub address: String,
    pub port: u16,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            address: "127.0.0.1".to_string(),
            port: 8081,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://parley.db".to_string(),
            max_connections: 10,
        }
    }
}

/// Load the application configuration by combining defaults, an optional
/// configuration file, and environment overrides.
///
/// The file is taken from `PARLEY_CONFIG` when set, otherwise the first
/// existing candidate in [`DEFAULT_CONFIG_FILES`]. Environment variables use
/// the `PARLEY` prefix with `__` as the section separator, e.g.
/// `PARLEY__USERS__HTTP__PORT=9000`.
pub fn load() -> anyhow::Result<AppConfig> {
    let defaults = AppConfig::default();

    let mut builder = config::Config::builder();
    builder = builder
        .set_default("users.http.address", defaults.users.http.address.clone())
        .unwrap()
        .set_default("users.http.port", i64::from(defaults.users.http.port))
        .unwrap()
        .set_default("users.database.url", "sqlite://users.db")
        .unwrap()
        .set_default(
            "users.database.max_connections",
            i64::from(defaults.users.database.max_connections),
        )
        .unwrap()
        .set_default("chats.http.address", defaults.chats.http.address.clone())
        .unwrap()
        .set_default("chats.http.port", 8082_i64)
        .unwrap()
        .set_default("chats.database.url", "sqlite://chats.db")
        .unwrap()
        .set_default(
            "chats.database.max_connections",
            i64::from(defaults.chats.database.max_connections),
        )
        .unwrap();

    let environment_overrides = config::Environment::with_prefix("PARLEY").separator("__");

    let mut config_file_attached = false;

    if let Ok(path) = std::env::var("PARLEY_CONFIG") {
        builder = builder.add_source(config::File::from(PathBuf::from(&path)));
        config_file_attached = true;
        debug!(path, "loading configuration via PARLEY_CONFIG");
    } else if let Ok(cwd) = std::env::current_dir() {
        let fallback = DEFAULT_CONFIG_FILES
            .iter()
            .map(|candidate| cwd.join(candidate))
            .find(|path| path.exists());

        if let Some(path) = fallback {
            debug!(path = %path.display(), "loading configuration file");
            builder = builder.add_source(config::File::from(path));
            config_file_attached = true;
        }
    }

    if !config_file_attached {
        debug!("no configuration file found, relying on defaults and environment overrides");
    }

    builder = builder.add_source(environment_overrides);

    let cfg = builder.build().context("unable to build configuration")?;

    let config = cfg
        .try_deserialize::<AppConfig>()
        .context("invalid configuration")?;

    debug!(?config, "loaded configuration");
    Ok(config)
}
