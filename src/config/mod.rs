pub mod database_config;
pub mod defaults;
pub mod search_config;
pub mod security_config;

use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::Deserialize;
use thiserror::Error;

pub use database_config::DatabaseConfig;
pub use search_config::SearchConfig;
pub use security_config::SecurityConfig;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("database configuration is invalid: {0}")]
    Database(String),
    #[error("search configuration is invalid: {0}")]
    Search(String),
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    #[serde(default)]
    pub app: ServerConfig,
    pub database: DatabaseConfig,
    #[serde(default)]
    pub security: SecurityConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub search: SearchConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "defaults::default_host")]
    pub host: String,
    #[serde(default = "defaults::default_port")]
    pub port: u16,
    #[serde(default = "defaults::default_environment")]
    pub environment: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: defaults::default_host(),
            port: defaults::default_port(),
            environment: defaults::default_environment(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "defaults::default_logging_level")]
    pub level: String,
    #[serde(default = "defaults::default_logging_json_format")]
    pub json_format: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: defaults::default_logging_level(),
            json_format: defaults::default_logging_json_format(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, Box<figment::Error>> {
        Self::figment().extract().map_err(Box::new)
    }

    pub fn figment() -> Figment {
        Figment::new()
            .merge(Toml::file("config/default.toml"))
            .merge(Toml::file("config/development.toml"))
            .merge(Env::prefixed("APP_").split("__"))
            .merge(
                Env::raw()
                    .only(&["DATABASE_URL", "PORT"])
                    .map(|key| match key.as_str() {
                        "DATABASE_URL" => "database.url".into(),
                        "PORT" => "app.port".into(),
                        _ => key.into(),
                    }),
            )
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.database.validate()?;
        self.search.validate()
    }
}
