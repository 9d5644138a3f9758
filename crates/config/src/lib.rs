use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::debug;

const DEFAULT_CONFIG_FILES: &[&str] = &[
    "orderhub.toml",
    "config/orderhub.toml",
    "crates/config/orderhub.toml",
    "../orderhub.toml",
    "../config/orderhub.toml",
    "../crates/config/orderhub.toml",
];

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub docs: DocsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    pub address: String,
    pub port: u16,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            address: "0.0.0.0".to_string(),
            port: 3333,
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
            url: "sqlite://orderhub.db".to_string(),
            max_connections: 10,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    #[serde(default = "AuthConfig::default_jwt_secret")]
    pub jwt_secret: String,
    #[serde(default = "AuthConfig::default_token_ttl")]
    pub token_ttl_seconds: u64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: Self::default_jwt_secret(),
            token_ttl_seconds: Self::default_token_ttl(),
        }
    }
}

impl AuthConfig {
    fn default_jwt_secret() -> String {
        // Development fallback only; deployments override via
        // ORDERHUB__AUTH__JWT_SECRET or the config file.
        "orderhub-dev-secret".to_string()
    }

    const fn default_token_ttl() -> u64 {
        86_400
    }
}

/// Settings that feed the generated OpenAPI document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocsConfig {
    #[serde(default)]
    pub prod_server_url: Option<String>,
}

/// Load the application configuration by combining defaults, an optional
/// TOML file, and environment overrides.
///
/// File discovery honors `ORDERHUB_CONFIG` first, then a set of well-known
/// relative paths. `ORDERHUB__`-prefixed variables override individual keys
/// (for example `ORDERHUB__HTTP__PORT=8080`). The plain `PORT` and
/// `PROD_SERVER_URL` variables are also honored for compatibility with
/// container platforms.
pub fn load() -> anyhow::Result<AppConfig> {
    let defaults = AppConfig::default();

    let mut builder = config::Config::builder();
    builder = builder
        .set_default("http.address", defaults.http.address.clone())
        .unwrap()
        .set_default("http.port", i64::from(defaults.http.port))
        .unwrap()
        .set_default("database.url", defaults.database.url.clone())
        .unwrap()
        .set_default(
            "database.max_connections",
            i64::from(defaults.database.max_connections),
        )
        .unwrap()
        .set_default("auth.jwt_secret", defaults.auth.jwt_secret.clone())
        .unwrap()
        .set_default(
            "auth.token_ttl_seconds",
            i64::try_from(defaults.auth.token_ttl_seconds).unwrap_or(i64::MAX),
        )
        .unwrap();

    let mut config_file_attached = false;

    if let Ok(path) = std::env::var("ORDERHUB_CONFIG") {
        builder = builder.add_source(config::File::from(PathBuf::from(&path)));
        config_file_attached = true;
        debug!(path, "loading configuration via ORDERHUB_CONFIG");
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

    builder = builder.add_source(config::Environment::with_prefix("ORDERHUB").separator("__"));

    let cfg = builder.build().context("unable to build configuration")?;

    let mut config = cfg
        .try_deserialize::<AppConfig>()
        .context("invalid configuration")?;

    if let Ok(port) = std::env::var("PORT") {
        config.http.port = port
            .parse()
            .with_context(|| format!("invalid PORT value {port}"))?;
    }

    if let Ok(url) = std::env::var("PROD_SERVER_URL") {
        if !url.is_empty() {
            config.docs.prod_server_url = Some(url);
        }
    }

    debug!(?config, "loaded backend configuration");
    Ok(config)
}
