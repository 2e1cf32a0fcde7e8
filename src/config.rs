use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

use thiserror::Error;

use crate::models::kategori::CategorySet;

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";
pub const DEFAULT_SHEET_PATH: &str = "data/cashflow.csv";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("CASHFLOW_STORE must be one of sheet, postgres, memory (got '{0}')")]
    UnknownStore(String),

    #[error("DATABASE_URL tidak ditemukan, wajib untuk CASHFLOW_STORE=postgres")]
    MissingDatabaseUrl,

    #[error("{name} is invalid: '{value}'")]
    Invalid { name: &'static str, value: String },

    #[error("CASHFLOW_CATEGORIES must name at least one category")]
    NoCategories,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreBackend {
    Sheet { path: PathBuf },
    Postgres { url: String, max_connections: u32 },
    Memory,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub store: StoreBackend,
    pub bind_addr: SocketAddr,
    pub static_dir: Option<PathBuf>,
    pub categories: CategorySet,
}

impl Config {
    /// Reads the process environment. Call `dotenvy::dotenv()` first to pick up `.env`.
    pub fn from_env() -> Result<Config, ConfigError> {
        Config::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Config, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let store = match var("CASHFLOW_STORE").as_deref().unwrap_or("sheet") {
            "sheet" => StoreBackend::Sheet {
                path: var("SHEET_PATH")
                    .unwrap_or_else(|| DEFAULT_SHEET_PATH.to_string())
                    .into(),
            },
            "postgres" => StoreBackend::Postgres {
                url: var("DATABASE_URL").ok_or(ConfigError::MissingDatabaseUrl)?,
                max_connections: match var("DATABASE_MAX_CONNECTIONS") {
                    Some(value) => value.parse().map_err(|_| ConfigError::Invalid {
                        name: "DATABASE_MAX_CONNECTIONS",
                        value,
                    })?,
                    None => DEFAULT_MAX_CONNECTIONS,
                },
            },
            "memory" => StoreBackend::Memory,
            other => return Err(ConfigError::UnknownStore(other.to_string())),
        };

        let bind_addr = var("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr: SocketAddr = bind_addr.parse().map_err(|_| ConfigError::Invalid {
            name: "BIND_ADDR",
            value: bind_addr.clone(),
        })?;

        let categories = match var("CASHFLOW_CATEGORIES") {
            Some(list) => CategorySet::parse_list(&list),
            None => CategorySet::default(),
        };
        if categories.is_empty() {
            return Err(ConfigError::NoCategories);
        }

        Ok(Config {
            store,
            bind_addr,
            static_dir: var("STATIC_DIR").map(PathBuf::from),
            categories,
        })
    }
}
