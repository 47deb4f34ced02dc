use std::path::{Path, PathBuf};

use abi::{Config, LogConfig};
use anyhow::{anyhow, Result};
use reservation::ReservationManager;
use tracing_subscriber::EnvFilter;

mod service;

pub struct RsvpService {
    manager: ReservationManager,
}

/// Locate the config file: `RESERVATION_CONFIG` first, then
/// "./reservation.yml", "~/.config/reservation.yml", "/etc/reservation.yml".
pub fn config_path() -> Result<PathBuf> {
    let candidates = [
        PathBuf::from("./reservation.yml"),
        PathBuf::from(shellexpand::tilde("~/.config/reservation.yml").into_owned()),
        PathBuf::from("/etc/reservation.yml"),
    ];
    find_config(std::env::var("RESERVATION_CONFIG").ok(), &candidates)
}

/// `explicit` wins unconditionally, otherwise the first existing candidate.
fn find_config(explicit: Option<String>, candidates: &[PathBuf]) -> Result<PathBuf> {
    if let Some(filename) = explicit {
        return Ok(PathBuf::from(filename));
    }
    let found = candidates.iter().find(|p| p.exists()).cloned();
    found.ok_or_else(|| anyhow!("no config file found"))
}

/// Filter for the fmt subscriber. The configured level must parse even when
/// `RUST_LOG` overrides it.
pub fn log_filter(config: &LogConfig) -> Result<EnvFilter> {
    let configured = EnvFilter::try_new(&config.level)
        .map_err(|e| anyhow!("invalid log level {:?}: {}", config.level, e))?;
    Ok(EnvFilter::try_from_default_env().unwrap_or(configured))
}

/// Install the global fmt subscriber. `RUST_LOG` wins over the configured level.
pub fn init_tracing(config: &LogConfig) -> Result<()> {
    let filter = log_filter(config)?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(|e| anyhow!(e))
}

/// Load config, set up logging and connect the service to postgres.
pub async fn start(config_file: Option<&Path>) -> Result<RsvpService> {
    let filename = match config_file {
        Some(p) => p.to_path_buf(),
        None => config_path()?,
    };
    let config = Config::load(&filename)?;
    init_tracing(&config.log)?;
    tracing::info!(config = %filename.display(), "loaded configuration");
    RsvpService::from_config(&config).await
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE: &str = "fixtures/config.yml";

    #[test]
    fn explicit_config_should_win_over_candidates() {
        let candidates = [PathBuf::from(FIXTURE)];
        let path = find_config(Some("elsewhere.yml".to_string()), &candidates).unwrap();
        assert_eq!(path, PathBuf::from("elsewhere.yml"));
    }

    #[test]
    fn first_existing_candidate_should_be_used() {
        let candidates = [
            PathBuf::from("fixtures/missing.yml"),
            PathBuf::from(FIXTURE),
            PathBuf::from("Cargo.toml"),
        ];
        let path = find_config(None, &candidates).unwrap();
        assert_eq!(path, PathBuf::from(FIXTURE));
    }

    #[test]
    fn no_existing_candidate_should_fail() {
        let candidates = [PathBuf::from("fixtures/missing.yml")];
        let err = find_config(None, &candidates).unwrap_err();
        assert_eq!(err.to_string(), "no config file found");
    }

    #[test]
    fn config_path_should_follow_env_var() {
        // the only test in this crate touching RESERVATION_CONFIG
        std::env::set_var("RESERVATION_CONFIG", FIXTURE);
        let path = config_path().unwrap();
        assert_eq!(path, PathBuf::from(FIXTURE));
        let config = Config::load(&path).unwrap();
        assert_eq!(config.db.dbname, "reservation");
        assert_eq!(config.log.level, "debug");
    }

    #[test]
    fn log_filter_should_accept_directives() {
        for level in ["info", "debug", "reservation=trace,warn"] {
            let config = LogConfig {
                level: level.to_string(),
            };
            assert!(log_filter(&config).is_ok(), "{level}");
        }
    }

    #[test]
    fn malformed_log_level_should_be_rejected() {
        let config = LogConfig {
            level: "reservation=loud".to_string(),
        };
        assert!(log_filter(&config).is_err());
        assert!(init_tracing(&config).is_err());
    }

    #[tokio::test]
    async fn start_should_fail_on_missing_config_file() {
        let err = start(Some(Path::new("fixtures/missing.yml")))
            .await
            .err()
            .unwrap();
        assert_eq!(
            err.downcast_ref::<abi::Error>(),
            Some(&abi::Error::ConfigReadError)
        );
    }
}
