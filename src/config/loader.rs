//! Settings loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading engine
//! settings from an optional YAML file with environment overrides.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::{EngineError, EngineResult};
use crate::models::ConsumptionTaxTreatment;

use super::rate_store::RateStore;
use super::types::Settings;

/// Environment variable overriding the bind host.
pub const ENV_HOST: &str = "PAYROLL_HOST";
/// Environment variable overriding the port.
pub const ENV_PORT: &str = "PAYROLL_PORT";
/// Environment variable overriding the rates file path.
pub const ENV_RATES_FILE: &str = "PAYROLL_RATES_FILE";
/// Environment variable overriding the CBS/IBS treatment.
pub const ENV_TREATMENT: &str = "PAYROLL_CONSUMPTION_TAX_TREATMENT";

/// Loads and provides access to engine settings.
///
/// A missing settings file is not an error: the defaults apply. A file that
/// exists but can't be parsed is reported as `ConfigParseError`.
///
/// # Example
///
/// ```no_run
/// use payroll_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./payroll.yaml")?
///     .with_overrides(|key| std::env::var(key).ok())?;
/// println!("Listening on {}", loader.settings().bind_address());
/// # Ok::<(), payroll_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    settings: Settings,
}

impl ConfigLoader {
    /// Loads settings from the given YAML file, falling back to defaults
    /// when the file doesn't exist.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!(path = %path_str, "Settings file not found, using defaults");
                return Ok(Self::from_settings(Settings::default()));
            }
            Err(err) => {
                return Err(EngineError::ConfigParseError {
                    path: path_str,
                    message: err.to_string(),
                });
            }
        };

        Self::from_yaml(&content, &path_str)
    }

    /// Parses settings from YAML text. `origin` names the source in errors.
    pub fn from_yaml(content: &str, origin: &str) -> EngineResult<Self> {
        // An empty document deserializes to unit, not to a map.
        if content.trim().is_empty() {
            return Ok(Self::from_settings(Settings::default()));
        }

        let settings: Settings =
            serde_yaml::from_str(content).map_err(|e| EngineError::ConfigParseError {
                path: origin.to_string(),
                message: e.to_string(),
            })?;

        Ok(Self::from_settings(settings))
    }

    /// Wraps already-built settings.
    pub fn from_settings(settings: Settings) -> Self {
        Self { settings }
    }

    /// Applies overrides looked up by variable name (normally the process
    /// environment).
    pub fn with_overrides<F>(mut self, lookup: F) -> EngineResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup(ENV_HOST) {
            self.settings.host = host;
        }
        if let Some(port) = lookup(ENV_PORT) {
            self.settings.port = port.trim().parse().map_err(|_| EngineError::ConfigParseError {
                path: ENV_PORT.to_string(),
                message: format!("'{}' is not a valid port", port),
            })?;
        }
        if let Some(rates_file) = lookup(ENV_RATES_FILE) {
            self.settings.rates_file = PathBuf::from(rates_file);
        }
        if let Some(treatment) = lookup(ENV_TREATMENT) {
            self.settings.consumption_tax_treatment = match treatment.trim() {
                "deducted" => ConsumptionTaxTreatment::Deducted,
                "informational" => ConsumptionTaxTreatment::Informational,
                other => {
                    return Err(EngineError::ConfigParseError {
                        path: ENV_TREATMENT.to_string(),
                        message: format!(
                            "'{}' is not one of 'deducted', 'informational'",
                            other
                        ),
                    });
                }
            };
        }
        Ok(self)
    }

    /// Returns the loaded settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Returns a rate store for the configured rates file.
    pub fn rate_store(&self) -> RateStore {
        RateStore::new(&self.settings.rates_file)
    }
}
