use std::path::PathBuf;

use anyhow::{anyhow, Context};
use serde::Deserialize;

const DEFAULT_ENV: &str = "local";
const ENV_VAR_NAME: &str = "BOOKCLUB_ENV";
const CONFIG_DIR_ENV: &str = "BOOKCLUB_CONFIG_DIR";
const ENV_PREFIX: &str = "BOOKCLUB";
/// Plain `PORT`, as set by most hosting platforms
const PORT_ENV: &str = "PORT";

/// Deployment environment the application is running in.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Local,
    Staging,
    Production,
}

impl Environment {
    fn parse(raw: &str) -> anyhow::Result<Self> {
        match raw {
            "local" => Ok(Self::Local),
            "staging" => Ok(Self::Staging),
            "production" => Ok(Self::Production),
            other => Err(anyhow!(
                "unsupported environment '{}'; expected local/staging/production",
                other
            )),
        }
    }
}

/// Top-level configuration structure loaded from layered sources.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Settings {
    #[serde(default)]
    pub environment: Environment,
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub database: DatabaseSettings,
    #[serde(default)]
    pub catalog: CatalogSettings,
    #[serde(default)]
    pub telemetry: TelemetrySettings,
    #[serde(default)]
    pub client: ClientSettings,
}

impl Settings {
    /// Load configuration by layering `.env`, base file, environment overlay,
    /// and `BOOKCLUB_*` variables (`__` separates nested keys).
    pub fn load() -> anyhow::Result<Self> {
        // Allow missing `.env` files without failing.
        let _ = dotenvy::dotenv();

        let environment = std::env::var(ENV_VAR_NAME).unwrap_or_else(|_| DEFAULT_ENV.to_string());
        let config_dir = std::env::var(CONFIG_DIR_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("config"));

        let base_path = config_dir.join("base.toml");
        let environment_path = config_dir.join(format!("{}.toml", environment));

        let builder = config::Config::builder()
            .add_source(config::File::from(base_path).required(false))
            .add_source(config::File::from(environment_path).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__"),
            );

        let cfg = builder
            .build()
            .with_context(|| "failed to build configuration")?;

        let mut settings: Settings = cfg
            .try_deserialize()
            .with_context(|| "failed to deserialize configuration")?;

        // Override environment field with parsed enum variant.
        settings.environment = Environment::parse(&environment)?;

        if let Ok(port) = std::env::var(PORT_ENV) {
            settings.server.port = port
                .parse()
                .with_context(|| format!("invalid {PORT_ENV} value '{port}'"))?;
        }

        Ok(settings)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "ServerSettings::default_host")]
    pub host: String,
    #[serde(default = "ServerSettings::default_port")]
    pub port: u16,
    #[serde(default = "ServerSettings::default_request_timeout_ms")]
    pub request_timeout_ms: u64,
}

impl ServerSettings {
    fn default_host() -> String {
        "0.0.0.0".to_string()
    }

    fn default_port() -> u16 {
        5000
    }

    fn default_request_timeout_ms() -> u64 {
        15000
    }
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: Self::default_host(),
            port: Self::default_port(),
            request_timeout_ms: Self::default_request_timeout_ms(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    #[serde(default = "DatabaseSettings::default_name")]
    pub name: String,
    #[serde(default = "DatabaseSettings::default_collection")]
    pub collection: String,
    /// JSON array used to populate an empty collection at startup
    #[serde(default)]
    pub seed_path: Option<PathBuf>,
}

impl DatabaseSettings {
    fn default_name() -> String {
        "book_management".to_string()
    }

    fn default_collection() -> String {
        "books".to_string()
    }
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            name: Self::default_name(),
            collection: Self::default_collection(),
            seed_path: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CatalogSettings {
    /// Page size used when a listing request carries no valid `limit`
    #[serde(default = "CatalogSettings::default_page_size")]
    pub default_page_size: u64,
}

impl CatalogSettings {
    fn default_page_size() -> u64 {
        10
    }
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            default_page_size: Self::default_page_size(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct TelemetrySettings {
    /// `EnvFilter` directives; `RUST_LOG` takes precedence
    #[serde(default = "TelemetrySettings::default_filter")]
    pub filter: String,
    #[serde(default)]
    pub log_format: LogFormat,
}

impl TelemetrySettings {
    fn default_filter() -> String {
        "info".to_string()
    }
}

impl Default for TelemetrySettings {
    fn default() -> Self {
        Self {
            filter: Self::default_filter(),
            log_format: LogFormat::Pretty,
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ClientSettings {
    #[serde(default = "ClientSettings::default_base_url")]
    pub base_url: String,
}

impl ClientSettings {
    fn default_base_url() -> String {
        "http://localhost:5000".to_string()
    }
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: Self::default_base_url(),
        }
    }
}
