use app_log::LogLevel;
use dotenv::dotenv;
use log::*;
use serde::{Deserialize, Serialize};
use std::{
    env, fs,
    path::{Path, PathBuf},
};
use thiserror::Error;

pub const CONFIG_ENV: &str = "APP_CONFIG";
pub const DATABASE_URL_ENV: &str = "DATABASE_URL";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Cannot locate config file; please set {0} env variable!")]
    MissingEnv(&'static str),
    #[error("Cannot read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Cannot parse config json: {0}")]
    Parse(#[from] serde_json::Error),
}

fn default_password_hash_cost() -> u32 {
    12
}

fn default_pg_connection() -> u32 {
    5
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub backend_bind: String, // 0.0.0.0:8000
    pub log_level: LogLevel,  // Off, Error, Warn, Info, Debug, Trace
    #[serde(default = "default_pg_connection")]
    pub pg_connection: u32,
    pub jwt_access_key: String,
    pub jwt_access_session_minutes: i64,
    #[serde(default = "default_password_hash_cost")]
    pub password_hash_cost: u32, // bcrypt cost, 4..=31
    pub bootstrap_admin_username: String,
    pub bootstrap_admin_password: String,
}

impl AppConfig {
    /// Loads `.env`, then reads the JSON file named by `APP_CONFIG`.
    pub fn new() -> Result<Self, ConfigError> {
        dotenv().ok();
        let path = env::var(CONFIG_ENV).map_err(|e| {
            debug!("{}", &e);
            ConfigError::MissingEnv(CONFIG_ENV)
        })?;
        Self::from_file(path)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let file = fs::File::open(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(serde_json::from_reader(file)?)
    }

    pub fn database_url() -> Result<String, ConfigError> {
        env::var(DATABASE_URL_ENV).map_err(|e| {
            debug!("{}", &e);
            ConfigError::MissingEnv(DATABASE_URL_ENV)
        })
    }
}
