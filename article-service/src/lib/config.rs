use std::env;

use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

/// Built-in signing secret for local development only.
///
/// Production deployments must provide a real secret through `JWT_SECRET`;
/// `Config::load` refuses to start otherwise.
pub const DEV_JWT_SECRET: &str = "dev-only-jwt-secret-change-me-0123456789";

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub jwt: JwtConfig,
    pub run_mode: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub path: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub cors_origin: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub expiration_hours: i64,
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Canonical environment variables (PORT, DATABASE_PATH, JWT_SECRET)
    /// 2. Nested environment variables (SERVER__PORT, JWT__SECRET, etc.)
    /// 3. Environment-specific config file (config/{RUN_MODE}.toml)
    /// 4. Default config file (config/default.toml)
    /// 5. Built-in defaults
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            // Built-in defaults keep the service bootable with no config files
            .set_default("server.port", 3000)?
            .set_default("database.path", "articles.db")?
            .set_default("jwt.secret", DEV_JWT_SECRET)?
            .set_default("jwt.expiration_hours", 168)?
            // Start with default configuration
            .add_source(File::with_name("config/default").required(false))
            // Layer on environment-specific configuration
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Layer on environment variables (with __ as separator)
            // Example: SERVER__PORT=8080 overrides server.port
            .add_source(Environment::default().separator("__"))
            // Canonical environment names win over everything else
            .set_override_option("server.port", env::var("PORT").ok())?
            .set_override_option("database.path", env::var("DATABASE_PATH").ok())?
            .set_override_option("jwt.secret", env::var("JWT_SECRET").ok())?
            // The run mode is an environment switch, never a file setting
            .set_override("run_mode", run_mode.as_str())?
            .build()?;

        let config: Config = configuration.try_deserialize()?;
        config.validate()?;

        Ok(config)
    }

    pub fn is_production(&self) -> bool {
        self.run_mode == "production"
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.is_production() && (self.jwt.secret.is_empty() || self.jwt.secret == DEV_JWT_SECRET)
        {
            return Err(ConfigError::Message(
                "JWT_SECRET must be set to a real secret when RUN_MODE=production".to_string(),
            ));
        }

        Ok(())
    }
}
