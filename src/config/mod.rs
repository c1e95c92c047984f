use serde::Deserialize;
use config::{Config, ConfigError, Environment, File};
use sqlx::postgres::PgConnectOptions;

use crate::error::DbError;

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    #[serde(default)]
    pub registry: RegistryConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    Postgres,
    Sqlite,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub backend: Backend,
    // Postgres connection, fed from DB_HOST, DB_PORT, DB_USER, DB_PASSWORD, DB_NAME.
    pub host: Option<String>,
    pub port: Option<String>,
    pub user: Option<String>,
    pub password: Option<String>,
    pub name: Option<String>,
    pub sqlite_path: String,
    pub max_connections: u32,
    pub max_retries: u32,
    pub retry_wait_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RegistryConfig {
    /// Listing an empty registry answers 404 instead of `[]`. Kept on by
    /// default because the admin UI relies on it.
    pub empty_list_is_error: bool,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            empty_list_is_error: true,
        }
    }
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        Self::load(|key| std::env::var(key).ok())
    }

    /// Builds settings with `lookup` standing in for the process environment
    /// when reading the `DB_*` variables.
    pub fn load<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config = Config::builder()
            // Start with default values
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8000)?
            .set_default("database.backend", "postgres")?
            .set_default("database.sqlite_path", "./data.db")?
            .set_default("database.max_connections", 10)?
            .set_default("database.max_retries", 5)?
            .set_default("database.retry_wait_secs", 2)?
            .set_default("registry.empty_list_is_error", true)?

            // Add config file if it exists
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))

            // Add environment variables (with REGISTRY__ prefix, double underscore separates levels)
            .add_source(Environment::with_prefix("REGISTRY").separator("__"))

            // Connection variables shared with the rest of the deployment
            .set_override_option("database.backend", lookup("DB_BACKEND"))?
            .set_override_option("database.host", lookup("DB_HOST"))?
            .set_override_option("database.port", lookup("DB_PORT"))?
            .set_override_option("database.user", lookup("DB_USER"))?
            .set_override_option("database.password", lookup("DB_PASSWORD"))?
            .set_override_option("database.name", lookup("DB_NAME"))?
            .set_override_option("database.sqlite_path", lookup("SQLITE_PATH"))?

            .build()?;

        config.try_deserialize()
    }
}

impl DatabaseConfig {
    /// Every connection variable is required; all missing ones are reported
    /// together.
    pub fn postgres_options(&self) -> Result<PgConnectOptions, DbError> {
        let mut missing = Vec::new();
        let host = required(&self.host, "DB_HOST", &mut missing);
        let port = required(&self.port, "DB_PORT", &mut missing);
        let user = required(&self.user, "DB_USER", &mut missing);
        let password = required(&self.password, "DB_PASSWORD", &mut missing);
        let name = required(&self.name, "DB_NAME", &mut missing);

        if !missing.is_empty() {
            return Err(DbError::MissingConfig(missing));
        }

        let port: u16 = port.trim().parse().map_err(|_| {
            DbError::InvalidConfig(format!("DB_PORT must be a port number, got '{}'", port))
        })?;

        Ok(PgConnectOptions::new()
            .host(host)
            .port(port)
            .username(user)
            .password(password)
            .database(name))
    }
}

fn required<'a>(value: &'a Option<String>, var: &'static str, missing: &mut Vec<&'static str>) -> &'a str {
    match value.as_deref() {
        Some(v) if !v.trim().is_empty() => v,
        _ => {
            missing.push(var);
            ""
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8000,
            },
            database: DatabaseConfig {
                backend: Backend::Postgres,
                host: None,
                port: None,
                user: None,
                password: None,
                name: None,
                sqlite_path: "./data.db".to_string(),
                max_connections: 10,
                max_retries: 5,
                retry_wait_secs: 2,
            },
            registry: RegistryConfig::default(),
        }
    }
}
