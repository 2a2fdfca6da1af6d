use dotenv::dotenv;
use std::env;
use thiserror::Error;
use tracing::{info, warn};

pub const DEFAULT_JWT_SECRET: &str = "warbler-development-secret";

/// Costo bcrypt minimo, usato nei test per non rallentare gli hash
pub const TEST_BCRYPT_COST: u32 = 4;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("DATABASE_URL must be set (environment or .env file)")]
    MissingDatabaseUrl,

    #[error("invalid {name}: {reason}")]
    Invalid { name: &'static str, reason: &'static str },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub server_host: String,
    pub server_port: u16,
    pub max_connections: u32,
    pub bcrypt_cost: u32,
    pub app_env: String,
}

impl Config {
    /// Carica la configurazione dalle variabili d'ambiente
    /// Chiama dotenv() automaticamente
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Configurazione per i test: la connection string viene iniettata, l'ambiente
    /// del processo non viene né letto né modificato.
    pub fn for_tests(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            jwt_secret: "warbler-test-secret".to_string(),
            server_host: "127.0.0.1".to_string(),
            server_port: 0,
            max_connections: 1,
            bcrypt_cost: TEST_BCRYPT_COST,
            app_env: "test".to_string(),
        }
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let database_url = lookup("DATABASE_URL").ok_or(ConfigError::MissingDatabaseUrl)?;

        let jwt_secret = lookup("JWT_SECRET").unwrap_or_else(|| {
            warn!("JWT_SECRET not set, using default (not secure for production!)");
            DEFAULT_JWT_SECRET.to_string()
        });

        let server_host = lookup("SERVER_HOST").unwrap_or_else(|| "127.0.0.1".to_string());

        let server_port = parse_or(&lookup, "SERVER_PORT", 3000u16, "must be a number between 0-65535")?;

        let max_connections = parse_or(&lookup, "MAX_DB_CONNECTIONS", 5u32, "must be a positive number")?;
        if max_connections == 0 {
            return Err(ConfigError::Invalid {
                name: "MAX_DB_CONNECTIONS",
                reason: "must be a positive number",
            });
        }

        let bcrypt_cost = parse_or(&lookup, "BCRYPT_COST", bcrypt::DEFAULT_COST, "must be a number between 4-31")?;
        if !(4..=31).contains(&bcrypt_cost) {
            return Err(ConfigError::Invalid {
                name: "BCRYPT_COST",
                reason: "must be a number between 4-31",
            });
        }

        let app_env = lookup("APP_ENV").unwrap_or_else(|| "development".to_string());

        Ok(Config {
            database_url,
            jwt_secret,
            server_host,
            server_port,
            max_connections,
            bcrypt_cost,
            app_env,
        })
    }

    /// Logga la configurazione (nascondendo i segreti)
    pub fn log_info(&self) {
        info!(
            environment = %self.app_env,
            address = %format!("{}:{}", self.server_host, self.server_port),
            database = %Self::mask_url(&self.database_url),
            max_connections = self.max_connections,
            bcrypt_cost = self.bcrypt_cost,
            "Server configuration"
        );
        if self.jwt_secret == DEFAULT_JWT_SECRET {
            warn!("JWT secret: USING DEFAULT (INSECURE!)");
        }
    }

    /// Maschera le credenziali nell'URL del database per il logging
    fn mask_url(url: &str) -> String {
        match (url.find("://"), url.find('@')) {
            (Some(scheme_end), Some(at_pos)) if at_pos > scheme_end => {
                format!("{}***{}", &url[..scheme_end + 3], &url[at_pos..])
            }
            (_, None) => url.to_string(),
            _ => "***".to_string(),
        }
    }
}

fn parse_or<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
    default: T,
    reason: &'static str,
) -> Result<T, ConfigError> {
    match lookup(name) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|_| ConfigError::Invalid { name, reason }),
        None => Ok(default),
    }
}
