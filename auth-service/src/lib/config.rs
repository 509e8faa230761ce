use std::env;

use auth::KeyError;
use auth::TokenSettings;
use chrono::Duration;
use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: Option<DatabaseConfig>,
    pub server: ServerConfig,
    pub jwt: JwtConfig,
    pub seed: Option<SeedConfig>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
}

#[derive(Deserialize, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub expiration_hours: i64,
    #[serde(default)]
    pub leeway_seconds: i64,
}

/// Account inserted at startup when absent.
#[derive(Deserialize, Clone)]
pub struct SeedConfig {
    pub email: String,
    pub password: String,
    pub role: String,
}

fn default_max_connections() -> u32 {
    5
}

impl JwtConfig {
    /// Token lifetime and leeway as validated settings.
    ///
    /// # Errors
    /// * `DurationOutOfRange` - A value does not fit in a `Duration`
    /// * `NonPositiveLifetime` - `expiration_hours` is zero or negative
    /// * `NegativeLeeway` - `leeway_seconds` is negative
    pub fn token_settings(&self) -> Result<TokenSettings, KeyError> {
        let lifetime = Duration::try_hours(self.expiration_hours)
            .ok_or(KeyError::DurationOutOfRange("jwt.expiration_hours"))?;
        let leeway = Duration::try_seconds(self.leeway_seconds)
            .ok_or(KeyError::DurationOutOfRange("jwt.leeway_seconds"))?;

        TokenSettings::new(lifetime, leeway)
    }
}

// Secrets stay out of `Debug` output so configuration can be logged.
impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"<redacted>")
            .field("expiration_hours", &self.expiration_hours)
            .field("leeway_seconds", &self.leeway_seconds)
            .finish()
    }
}

impl std::fmt::Debug for SeedConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SeedConfig")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("role", &self.role)
            .finish()
    }
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (DATABASE__URL, JWT__SECRET, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Example: JWT__SECRET=... overrides jwt.secret
            .add_source(Environment::default().separator("__"))
            .build()?;

        let config: Config = configuration.try_deserialize()?;

        Ok(config)
    }
}
