use chrono_tz::Tz;
use config::{Config, ConfigError, Environment};
use serde::{Deserialize, Serialize};

use crate::timezone::resolve_timezone;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Settings {
    pub database_url: String,
    pub max_connections: u32,
    /// Zone every stored class date-time is assumed to be in.
    pub canonical_timezone: String,
    /// Zone used by `/classes` when the caller does not pass one.
    pub default_timezone: String,
    pub debug: bool,
    pub enable_swagger: bool,
    pub port: u16,
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();

        let config = Config::builder()
            // APP_DATABASE_URL, APP_CANONICAL_TIMEZONE, ...
            .add_source(
                Environment::with_prefix("APP")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .set_default("database_url", "sqlite://fitness.db?mode=rwc")?
            .set_default("max_connections", 5)?
            .set_default("canonical_timezone", "Asia/Kolkata")?
            .set_default("default_timezone", "Asia/Kolkata")?
            .set_default("debug", false)?
            .set_default("enable_swagger", true)?
            .set_default("port", 8080)?
            .build()?;

        let settings: Settings = config.try_deserialize()?;
        settings.canonical_tz()?;
        resolve_timezone(&settings.default_timezone)
            .map_err(|err| ConfigError::Message(err.to_string()))?;
        Ok(settings)
    }

    pub fn canonical_tz(&self) -> Result<Tz, ConfigError> {
        resolve_timezone(&self.canonical_timezone)
            .map_err(|err| ConfigError::Message(err.to_string()))
    }
}
