use anyhow::{anyhow, Result};
use std::net::SocketAddr;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StoreBackend {
    Postgres,
    Memory,
}

impl FromStr for StoreBackend {
    type Err = String;

    fn from_str(value: &str) -> std::result::Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(Self::Postgres),
            "memory" => Ok(Self::Memory),
            other => Err(format!("unknown store backend '{}'", other)),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DatabaseTarget {
    Url(String),
    Parts {
        host: String,
        port: u16,
        user: String,
        password: String,
        name: String,
    },
}

#[derive(Clone, Debug)]
pub struct DatabaseConfig {
    pub target: DatabaseTarget,
    pub max_connections: u32,
    pub connect_timeout_seconds: u64,
    pub idle_timeout_seconds: u64,
    pub max_lifetime_seconds: u64,
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub http_addr: SocketAddr,
    pub store_backend: StoreBackend,
    /// Present only for the postgres backend.
    pub database: Option<DatabaseConfig>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = Env(lookup);

        let http_addr = env.or("HTTP_ADDR", "0.0.0.0:8080");
        let http_addr = SocketAddr::from_str(&http_addr)
            .map_err(|err| anyhow!("invalid HTTP_ADDR: {}", err))?;
        let store_backend: StoreBackend = env.or_parse("STORE_BACKEND", "postgres")?;

        let database = match store_backend {
            StoreBackend::Postgres => Some(DatabaseConfig::from_env(&env)?),
            StoreBackend::Memory => None,
        };

        Ok(Self {
            http_addr,
            store_backend,
            database,
        })
    }
}

impl DatabaseConfig {
    fn from_env<F>(env: &Env<F>) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let target = match env.get("DATABASE_URL") {
            Some(url) => DatabaseTarget::Url(url),
            None => DatabaseTarget::Parts {
                host: env.required("DB_HOST")?,
                port: env.or_parse("DB_PORT", "5432")?,
                user: env.required("DB_USER")?,
                password: env.required("DB_PASSWORD")?,
                name: env.required("DB_NAME")?,
            },
        };

        Ok(Self {
            target,
            max_connections: env.or_parse("DB_MAX_CONNECTIONS", "10")?,
            connect_timeout_seconds: env.or_parse("DB_CONNECT_TIMEOUT_SECONDS", "5")?,
            idle_timeout_seconds: env.or_parse("DB_IDLE_TIMEOUT_SECONDS", "300")?,
            max_lifetime_seconds: env.or_parse("DB_MAX_LIFETIME_SECONDS", "1800")?,
        })
    }
}

struct Env<F>(F);

impl<F> Env<F>
where
    F: Fn(&str) -> Option<String>,
{
    /// Blank values count as unset.
    fn get(&self, key: &str) -> Option<String> {
        (self.0)(key).filter(|value| !value.trim().is_empty())
    }

    fn or(&self, key: &str, default: &str) -> String {
        self.get(key).unwrap_or_else(|| default.to_string())
    }

    fn required(&self, key: &str) -> Result<String> {
        self.get(key)
            .ok_or_else(|| anyhow!("missing required env var: {}", key))
    }

    fn or_parse<T>(&self, key: &str, default: &str) -> Result<T>
    where
        T: FromStr,
        <T as FromStr>::Err: std::fmt::Display,
    {
        self.or(key, default)
            .parse::<T>()
            .map_err(|err| anyhow!("invalid {}: {}", key, err))
    }
}
