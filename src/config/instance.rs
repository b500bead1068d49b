//! Instance config file loading.
//!
//! The instance file carries machine-local overrides (secrets, bind
//! address) and is kept out of version control. A missing file is not an
//! error; a present but malformed file is.

use crate::{Config, Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Per-key overrides parsed from the instance config file.
///
/// Every field is optional; only keys present in the file override the
/// value from earlier configuration tiers. Unknown keys are ignored.
#[derive(Debug, Default, Deserialize)]
pub struct InstanceOverrides {
    pub secret_key: Option<String>,
    pub debug: Option<bool>,
    pub testing: Option<bool>,
    pub host: Option<String>,
    pub port: Option<u16>,
    pub log_level: Option<String>,
    pub log_json: Option<bool>,
    pub worker_threads: Option<usize>,
    pub request_timeout_secs: Option<u64>,
    pub static_dir: Option<PathBuf>,
}

impl InstanceOverrides {
    /// Load overrides from a JSON file.
    ///
    /// Returns `Ok(None)` when the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Option<Self>> {
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        serde_json::from_str(&contents).map(Some).map_err(|e| {
            Error::config(format!(
                "invalid instance config '{}': {e}",
                path.display()
            ))
        })
    }

    /// Apply the overrides onto a configuration.
    pub fn apply(self, config: &mut Config) {
        if let Some(secret_key) = self.secret_key {
            config.secret_key = secret_key;
        }
        if let Some(debug) = self.debug {
            config.debug = debug;
        }
        if let Some(testing) = self.testing {
            config.testing = testing;
        }
        if let Some(host) = self.host {
            config.host = host;
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(log_level) = self.log_level {
            config.log_level = log_level;
        }
        if let Some(log_json) = self.log_json {
            config.log_json = log_json;
        }
        if let Some(worker_threads) = self.worker_threads {
            config.worker_threads = worker_threads;
        }
        if let Some(request_timeout_secs) = self.request_timeout_secs {
            config.request_timeout_secs = request_timeout_secs;
        }
        if let Some(static_dir) = self.static_dir {
            config.static_dir = static_dir;
        }
    }
}
