use dotenvy::dotenv;
use sqlx::postgres::PgConnectOptions;
use std::env;

use crate::error::AppError;

#[derive(Clone)]
pub struct Config {
    pub server_addr: String,
    pub log_level: String,
    /// Shared secret for the manager dashboard. When unset the dashboard
    /// can never be unlocked; startup logs a warning and continues.
    pub manager_password: Option<String>,
    pub database: DatabaseConfig,
}

#[derive(Clone)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub name: String,
    pub user: String,
    pub password: String,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        dotenv().ok();

        Ok(Self {
            server_addr: env::var("SERVER_ADDR").unwrap_or_else(|_| "127.0.0.1:8080".to_string()),
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            manager_password: env::var("MANAGER_PASSWORD").ok(),
            database: DatabaseConfig::from_env()?,
        })
    }
}

impl DatabaseConfig {
    /// The database parameters are required; a missing one is fatal at
    /// startup, before the server binds.
    pub fn from_env() -> Result<Self, AppError> {
        let required = |var: &str| {
            env::var(var).map_err(|_| AppError::Config(format!("{var} must be set")))
        };

        Ok(Self {
            host: required("DATABASE_HOST")?,
            name: required("DATABASE_NAME")?,
            user: required("DATABASE_USER")?,
            password: required("DATABASE_PASSWORD")?,
            port: env::var("DATABASE_PORT")
                .unwrap_or_else(|_| "5432".to_string())
                .parse()
                .map_err(|_| AppError::Config("DATABASE_PORT must be a port number".into()))?,
        })
    }

    pub fn connect_options(&self) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .password(&self.password)
            .database(&self.name)
    }
}
