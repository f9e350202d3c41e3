use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

const DEFAULT_DATABASE_PORT: u16 = 3306;
const DEFAULT_BACKUP_PREFIX: &str = "supabase_backup";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Environment variable {0} is required.")]
    Missing(&'static str),
    #[error("database_port must be a valid port, got {0:?}.")]
    InvalidPort(String),
    #[error("No {0} configuration found; set {1} to enable it.")]
    MissingSection(&'static str, &'static str),
}

///Connection details for the direct database path.
#[derive(Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub database: String,
    pub schema: String,
}

impl DatabaseConfig {
    pub fn opts(&self) -> mysql_async::OptsBuilder {
        mysql_async::OptsBuilder::default()
            .ip_or_hostname(self.host.clone())
            .tcp_port(self.port)
            .user(Some(self.user.clone()))
            .pass(Some(self.password.clone()))
            .db_name(Some(self.database.clone()))
    }
}

impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("database", &self.database)
            .field("schema", &self.schema)
            .finish()
    }
}

///Endpoint and keys for the REST API path.
#[derive(Clone, PartialEq, Eq)]
pub struct RestConfig {
    pub url: String,
    pub anon_key: String,
    pub service_key: Option<String>,
    pub schema: String,
}

impl RestConfig {
    ///The key used for catalog queries, which need wider access than row reads.
    pub fn catalog_key(&self) -> &str {
        self.service_key.as_deref().unwrap_or(&self.anon_key)
    }
}

impl fmt::Debug for RestConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RestConfig")
            .field("url", &self.url)
            .field("anon_key", &"<redacted>")
            .field("service_key", &self.service_key.as_ref().map(|_| "<redacted>"))
            .field("schema", &self.schema)
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database: Option<DatabaseConfig>,
    pub rest: Option<RestConfig>,
    pub database_tables: Vec<String>,
    pub backup_directory: PathBuf,
    pub backup_prefix: String,
}

impl Config {
    ///Reads the configuration from the process environment (after any `.env` file was loaded).
    pub fn build() -> Result<Config, ConfigError> {
        Config::from_lookup(|key| dotenvy::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Config, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let require = |key: &'static str| get(key).ok_or(ConfigError::Missing(key));

        let database = match get("database_host") {
            Some(host) => {
                let port = match get("database_port") {
                    Some(p) => p.parse().map_err(|_| ConfigError::InvalidPort(p))?,
                    None => DEFAULT_DATABASE_PORT,
                };
                let database = require("database_name")?;
                Some(DatabaseConfig {
                    host,
                    port,
                    user: require("database_user")?,
                    password: require("database_password")?,
                    schema: get("database_schema").unwrap_or_else(|| database.clone()),
                    database,
                })
            }
            None => None,
        };

        let rest = match get("rest_url") {
            Some(url) => Some(RestConfig {
                url,
                anon_key: require("rest_anon_key")?,
                service_key: get("rest_service_key"),
                schema: get("rest_schema").unwrap_or_else(|| "public".to_string()),
            }),
            None => None,
        };

        let database_tables = get("database_tables")
            .map(|tables| parse_table_list(&tables))
            .unwrap_or_default();

        Ok(Config {
            database,
            rest,
            database_tables,
            backup_directory: PathBuf::from(get("backup_directory").unwrap_or_else(|| ".".into())),
            backup_prefix: get("backup_prefix").unwrap_or_else(|| DEFAULT_BACKUP_PREFIX.into()),
        })
    }

    pub fn database(&self) -> Result<&DatabaseConfig, ConfigError> {
        self.database
            .as_ref()
            .ok_or(ConfigError::MissingSection("database", "database_host"))
    }

    pub fn rest(&self) -> Result<&RestConfig, ConfigError> {
        self.rest
            .as_ref()
            .ok_or(ConfigError::MissingSection("REST API", "rest_url"))
    }
}

///Splits a `;`-separated list, dropping blank entries.
pub fn parse_table_list(tables: &str) -> Vec<String> {
    tables
        .split(";")
        .filter_map(|s| {
            let s_str = s.trim().to_string();
            if !s_str.is_empty() { Some(s_str) } else { None }
        })
        .collect()
}
