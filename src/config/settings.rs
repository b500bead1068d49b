//! Configuration settings, profiles, and validation.

use super::instance::InstanceOverrides;
use crate::{Error, Result};
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Named configuration profile.
///
/// A profile bundles the handful of flags that differ between environments.
/// Applying a profile overrides the base defaults; an instance file can
/// still override the profile afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    /// Local development: debug on.
    Development,
    /// Test runs: testing and debug on.
    Testing,
    /// Production: debug off.
    Production,
}

impl FromStr for Profile {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Ok(Self::Development),
            "testing" | "test" => Ok(Self::Testing),
            "production" | "prod" => Ok(Self::Production),
            other => Err(Error::config(format!(
                "unknown profile '{other}', must be one of: development, testing, production"
            ))),
        }
    }
}

/// Main configuration for the Plinth server.
#[derive(Debug, Clone)]
pub struct Config {
    /// Active configuration profile.
    pub profile: Profile,

    /// Secret key for signing cookies/tokens. The default is a dev
    /// placeholder; production deployments must set `SECRET_KEY`.
    pub secret_key: String,

    /// Enable debug behavior (verbose errors, intended for development).
    pub debug: bool,

    /// Testing mode flag.
    pub testing: bool,

    /// Host address to bind to.
    pub host: String,

    /// Port to listen on.
    pub port: u16,

    /// Platform-injected port (`PORT` env var). When set, the server binds
    /// to `0.0.0.0:$PORT` regardless of `host`/`port`.
    pub platform_port: Option<u16>,

    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable JSON log output.
    pub log_json: bool,

    /// Tokio runtime worker thread count.
    pub worker_threads: usize,

    /// Per-request timeout in seconds.
    pub request_timeout_secs: u64,

    /// Directory served under `/static`.
    pub static_dir: PathBuf,

    /// Directory holding the optional instance config file.
    pub instance_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            profile: Profile::Production,
            secret_key: "dev-secret-change-me".to_string(),
            debug: false,
            testing: false,
            host: "127.0.0.1".to_string(),
            port: 8000,
            platform_port: None,
            log_level: "info".to_string(),
            log_json: false,
            worker_threads: std::thread::available_parallelism()
                .map(std::num::NonZeroUsize::get)
                .unwrap_or(2),
            request_timeout_secs: 30,
            static_dir: PathBuf::from("./static"),
            instance_dir: PathBuf::from("./instance"),
        }
    }
}

impl Config {
    /// Create a new configuration with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Application factory configuration step.
    ///
    /// Applies the three-tier override order: base defaults, then the
    /// optional profile, then the optional instance file. A missing
    /// instance file is skipped silently; a malformed one is an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the instance file is unreadable or malformed,
    /// or if the resulting configuration fails validation.
    pub fn build(profile: Option<Profile>, instance_file: Option<&Path>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(profile) = profile {
            config.apply_profile(profile);
        }

        let default_path = config.instance_dir.join("config.json");
        let path = instance_file.unwrap_or(&default_path);
        if let Some(overrides) = InstanceOverrides::load(path)? {
            tracing::debug!(path = %path.display(), "Applying instance overrides");
            overrides.apply(&mut config);
        }

        config.validate()?;
        Ok(config)
    }

    /// Apply a profile's flag overrides.
    pub fn apply_profile(&mut self, profile: Profile) {
        self.profile = profile;
        match profile {
            Profile::Development => {
                self.debug = true;
            }
            Profile::Testing => {
                self.testing = true;
                self.debug = true;
            }
            Profile::Production => {
                self.debug = false;
            }
        }
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration value is invalid.
    pub fn validate(&self) -> Result<()> {
        if self.port == 0 {
            return Err(Error::config("port cannot be 0"));
        }

        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.to_lowercase().as_str()) {
            return Err(Error::config(format!(
                "invalid log level '{}', must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            )));
        }

        if self.worker_threads == 0 {
            return Err(Error::config("worker_threads cannot be 0"));
        }

        if self.host.is_empty() {
            return Err(Error::config("host cannot be empty"));
        }

        if self.secret_key.is_empty() {
            return Err(Error::config("secret_key cannot be empty"));
        }

        if self.request_timeout_secs == 0 {
            return Err(Error::config("request_timeout_secs cannot be 0"));
        }

        Ok(())
    }

    /// Get the server bind address.
    ///
    /// A platform-injected `PORT` wins over the configured host and port,
    /// and forces binding on all interfaces.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        match self.platform_port {
            Some(port) => format!("0.0.0.0:{port}"),
            None => format!("{}:{}", self.host, self.port),
        }
    }

    /// Get the path to the instance config file.
    #[must_use]
    pub fn instance_file(&self) -> PathBuf {
        self.instance_dir.join("config.json")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.port, 8000);
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.secret_key, "dev-secret-change-me");
        assert!(!config.debug);
        assert!(!config.testing);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_new() {
        let config = Config::new();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_profile_from_str() {
        assert_eq!(
            "development".parse::<Profile>().unwrap(),
            Profile::Development
        );
        assert_eq!("test".parse::<Profile>().unwrap(), Profile::Testing);
        assert_eq!("PROD".parse::<Profile>().unwrap(), Profile::Production);
        assert!("staging".parse::<Profile>().is_err());
    }

    #[test]
    fn test_apply_development_profile() {
        let mut config = Config::default();
        config.apply_profile(Profile::Development);
        assert!(config.debug);
        assert!(!config.testing);
    }

    #[test]
    fn test_apply_testing_profile() {
        let mut config = Config::default();
        config.apply_profile(Profile::Testing);
        assert!(config.debug);
        assert!(config.testing);
    }

    #[test]
    fn test_apply_production_profile() {
        let mut config = Config::default();
        config.debug = true;
        config.apply_profile(Profile::Production);
        assert!(!config.debug);
    }

    #[test]
    fn test_validate_invalid_port() {
        let config = Config {
            port: 0,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("port"));
    }

    #[test]
    fn test_validate_invalid_log_level() {
        let config = Config {
            log_level: "invalid".to_string(),
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("log level"));
    }

    #[test]
    fn test_validate_zero_worker_threads() {
        let config = Config {
            worker_threads: 0,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("worker_threads"));
    }

    #[test]
    fn test_validate_empty_host() {
        let config = Config {
            host: String::new(),
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("host"));
    }

    #[test]
    fn test_validate_empty_secret_key() {
        let config = Config {
            secret_key: String::new(),
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("secret_key"));
    }

    #[test]
    fn test_validate_zero_timeout() {
        let config = Config {
            request_timeout_secs: 0,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("request_timeout_secs"));
    }

    #[test]
    fn test_bind_addr() {
        let config = Config {
            host: "0.0.0.0".to_string(),
            port: 9090,
            ..Default::default()
        };
        assert_eq!(config.bind_addr(), "0.0.0.0:9090");
    }

    #[test]
    fn test_bind_addr_platform_port_wins() {
        let config = Config {
            host: "127.0.0.1".to_string(),
            port: 8000,
            platform_port: Some(10000),
            ..Default::default()
        };
        assert_eq!(config.bind_addr(), "0.0.0.0:10000");
    }

    #[test]
    fn test_instance_file() {
        let config = Config {
            instance_dir: PathBuf::from("/etc/plinth"),
            ..Default::default()
        };
        assert_eq!(
            config.instance_file(),
            PathBuf::from("/etc/plinth/config.json")
        );
    }

    #[test]
    fn test_build_without_instance_file() {
        let config = Config::build(None, Some(Path::new("/nonexistent/config.json"))).unwrap();
        assert_eq!(config.port, 8000);
    }

    #[test]
    fn test_build_with_profile() {
        let config = Config::build(
            Some(Profile::Development),
            Some(Path::new("/nonexistent/config.json")),
        )
        .unwrap();
        assert!(config.debug);
        assert_eq!(config.profile, Profile::Development);
    }

    #[test]
    fn test_all_log_levels_valid() {
        for level in ["trace", "debug", "info", "warn", "error"] {
            let config = Config {
                log_level: level.to_string(),
                ..Default::default()
            };
            assert!(config.validate().is_ok(), "Level '{level}' should be valid");
        }
    }

    #[test]
    fn test_log_level_case_insensitive() {
        for level in ["TRACE", "Debug", "INFO", "Warn", "ERROR"] {
            let config = Config {
                log_level: level.to_string(),
                ..Default::default()
            };
            assert!(
                config.validate().is_ok(),
                "Level '{level}' should be valid (case insensitive)"
            );
        }
    }
}
