//! Environment-driven configuration shared across the workspace.

pub mod server;
pub mod tracing;

use std::env;
use thiserror::Error;

/// Failures while reading configuration from the environment.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("environment variable '{0}' must be set")]
    Missing(String),

    #[error("environment variable '{key}' is invalid: {reason}")]
    Invalid { key: String, reason: String },
}

/// Deployment environment, selected by `APP_ENV`.
///
/// Only "production" (case-insensitive) selects [`Environment::Production`];
/// anything else, including an unset variable, means development.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    pub fn from_env() -> Self {
        match env::var("APP_ENV") {
            Ok(value) if value.eq_ignore_ascii_case("production") => Environment::Production,
            _ => Environment::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }

    pub fn is_development(&self) -> bool {
        matches!(self, Environment::Development)
    }
}

/// Static application metadata, baked in at compile time.
///
/// Construct with [`app_info!`] so name and version always track the
/// calling crate's Cargo.toml.
#[derive(Clone, Copy, Debug)]
pub struct AppInfo {
    pub name: &'static str,
    pub version: &'static str,
}

/// [`AppInfo`] for the crate this macro is expanded in.
#[macro_export]
macro_rules! app_info {
    () => {
        $crate::AppInfo {
            name: env!("CARGO_PKG_NAME"),
            version: env!("CARGO_PKG_VERSION"),
        }
    };
}

/// Configuration that loads itself from environment variables.
pub trait FromEnv: Sized {
    fn from_env() -> Result<Self, ConfigError>;
}

/// Read `key`, falling back to `default` when unset.
pub fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Read `key`, erroring when unset.
pub fn require_env(key: &str) -> Result<String, ConfigError> {
    env::var(key).map_err(|_| ConfigError::Missing(key.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_defaults_to_development() {
        temp_env::with_var_unset("APP_ENV", || {
            assert_eq!(Environment::from_env(), Environment::Development);
        });
    }

    #[test]
    fn test_environment_production_ignores_case() {
        for value in ["production", "PRODUCTION", "Production"] {
            temp_env::with_var("APP_ENV", Some(value), || {
                let env = Environment::from_env();
                assert!(env.is_production());
                assert!(!env.is_development());
            });
        }
    }

    #[test]
    fn test_environment_unknown_value_means_development() {
        temp_env::with_var("APP_ENV", Some("staging"), || {
            assert_eq!(Environment::from_env(), Environment::Development);
        });
    }

    #[test]
    fn test_env_or_prefers_the_set_value() {
        temp_env::with_var("SOME_KEY", Some("configured"), || {
            assert_eq!(env_or("SOME_KEY", "fallback"), "configured");
        });
        temp_env::with_var_unset("SOME_KEY", || {
            assert_eq!(env_or("SOME_KEY", "fallback"), "fallback");
        });
    }

    #[test]
    fn test_require_env_names_the_missing_variable() {
        temp_env::with_var_unset("SOME_REQUIRED_KEY", || {
            let err = require_env("SOME_REQUIRED_KEY").unwrap_err();
            assert!(err.to_string().contains("SOME_REQUIRED_KEY"));
        });
    }

    #[test]
    fn test_app_info_tracks_the_expanding_crate() {
        let info = app_info!();
        assert_eq!(info.name, "core_config");
        assert!(!info.version.is_empty());
    }
}
