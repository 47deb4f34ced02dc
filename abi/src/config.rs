use std::fs;

use serde::{Deserialize, Serialize};

use crate::Error;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    pub db: DbConfig,
    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DbConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub dbname: String,
    #[serde(default = "default_pool_size")]
    pub max_connections: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogConfig {
    /// default filter directive, `RUST_LOG` takes precedence when set
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_pool_size() -> u32 {
    5
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Config {
    pub fn load(filename: impl AsRef<std::path::Path>) -> Result<Self, Error> {
        let config = fs::read_to_string(filename.as_ref()).map_err(|_| Error::ConfigReadError)?;
        serde_yaml::from_str(&config).map_err(|_| Error::ConfigParseError)
    }
}

impl DbConfig {
    pub fn url(&self) -> String {
        format!("{}/{}", self.server_url(), self.dbname)
    }

    pub fn server_url(&self) -> String {
        if self.password.is_empty() {
            format!("postgres://{}@{}:{}", self.user, self.host, self.port)
        } else {
            format!(
                "postgres://{}:{}@{}:{}",
                self.user, self.password, self.host, self.port
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_should_be_loaded() {
        let config = Config::load("../service/fixtures/config.yml").unwrap();
        assert_eq!(
            config,
            Config {
                db: DbConfig {
                    host: "localhost".to_string(),
                    port: 5432,
                    user: "postgres".to_string(),
                    password: "postgres".to_string(),
                    dbname: "reservation".to_string(),
                    max_connections: 5,
                },
                log: LogConfig {
                    level: "debug".to_string(),
                },
            }
        );
    }

    #[test]
    fn log_section_should_default_to_info() {
        let config: Config = serde_yaml::from_str(
            "db:\n  host: localhost\n  port: 5432\n  user: alice\n  password: ''\n  dbname: rental\n",
        )
        .unwrap();
        assert_eq!(config.log.level, "info");
        assert_eq!(config.db.max_connections, 5);
        assert_eq!(config.db.url(), "postgres://alice@localhost:5432/rental");
    }

    #[test]
    fn missing_config_file_should_fail() {
        let err = Config::load("../service/fixtures/nope.yml").unwrap_err();
        assert_eq!(err, Error::ConfigReadError);
    }

    #[test]
    fn db_url_should_include_password() {
        let db = DbConfig {
            host: "db".to_string(),
            port: 5433,
            user: "postgres".to_string(),
            password: "secret".to_string(),
            dbname: "rental".to_string(),
            max_connections: 5,
        };
        assert_eq!(db.url(), "postgres://postgres:secret@db:5433/rental");
    }
}
