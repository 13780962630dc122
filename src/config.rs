use std::env;
use std::fmt;
use std::str::FromStr;

/// Which persistence backend the server runs against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    Postgres,
    Memory,
}

impl FromStr for StorageBackend {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(StorageBackend::Postgres),
            "memory" => Ok(StorageBackend::Memory),
            other => Err(ConfigError::Invalid("STORAGE_BACKEND", other.to_string())),
        }
    }
}

/// Token signing settings.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
    pub ttl_minutes: i64,
}

pub struct Config {
    pub database_url: Option<String>,
    pub database_max_connections: u32,
    pub storage_backend: StorageBackend,
    pub server_port: u16,
    pub server_host: String,
    pub jwt: JwtConfig,
    /// Require a bearer token on the todo endpoints.
    pub require_auth: bool,
}

#[derive(Debug)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid(&'static str, String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ConfigError::Missing(var) => write!(f, "{} must be set", var),
            ConfigError::Invalid(var, value) => write!(f, "{} has an invalid value: {}", var, value),
        }
    }
}

impl std::error::Error for ConfigError {}

fn var_or(name: &'static str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

fn parse_var<T: FromStr>(name: &'static str, default: &str) -> Result<T, ConfigError> {
    let raw = var_or(name, default);
    raw.parse().map_err(|_| ConfigError::Invalid(name, raw))
}

/// Longest accepted token lifetime: one week.
pub const MAX_TTL_MINUTES: i64 = 7 * 24 * 60;

fn jwt_secret() -> Result<String, ConfigError> {
    let secret = env::var("JWT_SECRET").map_err(|_| ConfigError::Missing("JWT_SECRET"))?;
    if secret.trim().is_empty() {
        return Err(ConfigError::Invalid("JWT_SECRET", "<blank>".to_string()));
    }
    Ok(secret)
}

fn ttl_minutes() -> Result<i64, ConfigError> {
    let ttl: i64 = parse_var("JWT_TTL_MINUTES", "30")?;
    if !(1..=MAX_TTL_MINUTES).contains(&ttl) {
        return Err(ConfigError::Invalid("JWT_TTL_MINUTES", ttl.to_string()));
    }
    Ok(ttl)
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let storage_backend: StorageBackend = var_or("STORAGE_BACKEND", "postgres").parse()?;
        let database_url = env::var("DATABASE_URL").ok();
        if storage_backend == StorageBackend::Postgres && database_url.is_none() {
            return Err(ConfigError::Missing("DATABASE_URL"));
        }

        Ok(Self {
            database_url,
            database_max_connections: parse_var("DATABASE_MAX_CONNECTIONS", "10")?,
            storage_backend,
            server_port: parse_var("SERVER_PORT", "8080")?,
            server_host: var_or("SERVER_HOST", "127.0.0.1"),
            jwt: JwtConfig {
                secret: jwt_secret()?,
                issuer: var_or("JWT_ISSUER", "todo-api"),
                audience: var_or("JWT_AUDIENCE", "todo-api-clients"),
                ttl_minutes: ttl_minutes()?,
            },
            require_auth: parse_var("REQUIRE_AUTH", "false")?,
        })
    }

    pub fn server_url(&self) -> String {
        format!("http://{}:{}", self.server_host, self.server_port)
    }
}
