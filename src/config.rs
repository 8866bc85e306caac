use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use serde_aux::field_attributes::deserialize_number_from_string;
use sqlx::postgres::{PgConnectOptions, PgSslMode};

#[derive(Deserialize, Clone)]
pub struct Config {
    pub application: ApplicationConfig,
    pub database: DatabaseConfig,
    pub storage: StorageConfig,
    pub bot: BotConfig,
    pub save: SaveConfig,
}

#[derive(Deserialize, Clone)]
pub struct ApplicationConfig {
    pub host: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub port: u16,
    pub debug_mode: String,
}

#[derive(Deserialize, Clone)]
pub struct DatabaseConfig {
    pub username: String,
    pub password: Secret<String>,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub port: u16,
    pub host: String,
    pub database_name: String,
    pub require_ssl: bool,
}

impl DatabaseConfig {
    pub fn get_connect_options(&self) -> PgConnectOptions {
        let ssl_mode = if self.require_ssl {
            PgSslMode::Require
        } else {
            PgSslMode::Prefer
        };

        PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.username)
            .password(self.password.expose_secret())
            .database(&self.database_name)
            .ssl_mode(ssl_mode)
    }
}

#[derive(Deserialize, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Postgres,
    Memory,
}

#[derive(Deserialize, Clone)]
pub struct StorageConfig {
    pub backend: StorageBackend,
}

#[derive(Deserialize, Clone)]
pub struct BotConfig {
    pub token: Secret<String>,
}

#[derive(Deserialize, Clone)]
pub struct SaveConfig {
    pub max_payload_bytes: usize,
}

impl Config {
    /// Loads `config/base.yaml` and applies `APP_*` environment
    /// overrides (e.g. `APP_BOT__TOKEN`). Missing required values,
    /// such as the bot token, fail here before the server starts.
    pub fn load() -> Result<Self, config::ConfigError> {
        let base_path =
            std::env::current_dir().map_err(|e| config::ConfigError::Message(e.to_string()))?;

        let settings = config::Config::builder()
            .add_source(config::File::from(base_path.join("config").join("base.yaml")))
            .add_source(
                config::Environment::with_prefix("APP")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        settings.try_deserialize::<Config>()
    }
}
