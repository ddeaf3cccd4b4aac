//! Runtime configuration.
//!
//! Resolution order for every field: explicit override, then environment
//! variable, then default.

use crate::logging::{default_log_level, normalize_level};
use std::path::PathBuf;

pub const DB_PATH_ENV: &str = "SHIPMAINT_DB_PATH";
pub const LOG_DIR_ENV: &str = "SHIPMAINT_LOG_DIR";
pub const LOG_LEVEL_ENV: &str = "SHIPMAINT_LOG_LEVEL";

const DEFAULT_DB_FILE_NAME: &str = "shipmaint.sqlite3";
const DEFAULT_LOG_DIR_NAME: &str = "shipmaint-logs";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub db_path: PathBuf,
    pub log_dir: PathBuf,
    pub log_level: &'static str,
}

/// Values supplied explicitly by the caller (e.g. CLI flags).
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub db_path: Option<PathBuf>,
    pub log_dir: Option<PathBuf>,
    pub log_level: Option<String>,
}

impl AppConfig {
    /// Resolves configuration from overrides and the process environment.
    pub fn resolve(overrides: ConfigOverrides) -> Result<Self, String> {
        Self::resolve_with(overrides, |name| std::env::var(name).ok())
    }

    /// Same as [`AppConfig::resolve`] with an injectable environment lookup.
    pub fn resolve_with(
        overrides: ConfigOverrides,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, String> {
        let lookup = |name: &str| {
            env(name)
                .map(|raw| raw.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let db_path = overrides
            .db_path
            .or_else(|| lookup(DB_PATH_ENV).map(PathBuf::from))
            .unwrap_or_else(|| std::env::temp_dir().join(DEFAULT_DB_FILE_NAME));
        let log_dir = overrides
            .log_dir
            .or_else(|| lookup(LOG_DIR_ENV).map(PathBuf::from))
            .unwrap_or_else(|| std::env::temp_dir().join(DEFAULT_LOG_DIR_NAME));
        let log_level = match overrides.log_level.or_else(|| lookup(LOG_LEVEL_ENV)) {
            Some(level) => normalize_level(&level)?,
            None => default_log_level(),
        };

        Ok(Self {
            db_path,
            log_dir,
            log_level,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{AppConfig, ConfigOverrides, DB_PATH_ENV, LOG_LEVEL_ENV};
    use std::path::PathBuf;

    #[test]
    fn overrides_win_over_environment() {
        let config = AppConfig::resolve_with(
            ConfigOverrides {
                db_path: Some(PathBuf::from("/data/fleet.db")),
                ..ConfigOverrides::default()
            },
            |name| (name == DB_PATH_ENV).then(|| "/env/fleet.db".to_string()),
        )
        .unwrap();
        assert_eq!(config.db_path, PathBuf::from("/data/fleet.db"));
    }

    #[test]
    fn environment_used_when_not_overridden_and_blank_is_ignored() {
        let config = AppConfig::resolve_with(ConfigOverrides::default(), |name| match name {
            DB_PATH_ENV => Some("/env/fleet.db".to_string()),
            LOG_LEVEL_ENV => Some("  ".to_string()),
            _ => None,
        })
        .unwrap();
        assert_eq!(config.db_path, PathBuf::from("/env/fleet.db"));
        assert_eq!(config.log_level, crate::default_log_level());
    }

    #[test]
    fn invalid_level_is_rejected() {
        let err = AppConfig::resolve_with(
            ConfigOverrides {
                log_level: Some("loud".to_string()),
                ..ConfigOverrides::default()
            },
            |_| None,
        )
        .unwrap_err();
        assert!(err.contains("unsupported log level"));
    }
}
