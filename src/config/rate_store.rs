//! Persistence of the consumption-tax rates.
//!
//! The rates live in a small JSON document (`config.json` by default):
//!
//! ```json
//! { "cbs_rate": 0.9, "ibs_rate": 2.0 }
//! ```

use std::ffi::OsString;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::{info, warn};

use crate::error::{EngineError, EngineResult};
use crate::models::RateSet;

/// On-disk shape of the rates document.
///
/// Every key is optional so a partial document can be merged over the
/// defaults. The upper-case keys are the older format, which stored
/// fractions (`0.12`) instead of percentages (`12`).
#[derive(Debug, Deserialize)]
struct RatesDocument {
    cbs_rate: Option<Decimal>,
    ibs_rate: Option<Decimal>,
    #[serde(rename = "CBS_RATE")]
    legacy_cbs_rate: Option<Decimal>,
    #[serde(rename = "IBS_RATE")]
    legacy_ibs_rate: Option<Decimal>,
}

impl RatesDocument {
    fn into_rates(self) -> RateSet {
        let defaults = RateSet::default();
        let from_fraction = |fraction: Decimal| fraction * Decimal::ONE_HUNDRED;

        RateSet {
            cbs_rate: self
                .cbs_rate
                .or(self.legacy_cbs_rate.map(from_fraction))
                .unwrap_or(defaults.cbs_rate),
            ibs_rate: self
                .ibs_rate
                .or(self.legacy_ibs_rate.map(from_fraction))
                .unwrap_or(defaults.ibs_rate),
        }
    }
}

/// Loads and saves the [`RateSet`] at a fixed path.
///
/// # Example
///
/// ```no_run
/// use payroll_engine::config::RateStore;
///
/// let store = RateStore::new("config.json");
/// let rates = store.load();
/// store.save(&rates)?;
/// # Ok::<(), payroll_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone)]
pub struct RateStore {
    path: PathBuf,
}

impl RateStore {
    /// Creates a store backed by the given file.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Returns the path of the rates document.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the persisted rates, falling back to the defaults when the
    /// document is missing, unreadable or corrupt.
    pub fn load(&self) -> RateSet {
        match self.try_load() {
            Ok(rates) => {
                info!(
                    path = %self.path.display(),
                    cbs_rate = %rates.cbs_rate,
                    ibs_rate = %rates.ibs_rate,
                    "Loaded consumption-tax rates"
                );
                rates
            }
            Err(EngineError::ConfigNotFound { path }) => {
                info!(path = %path, "Rates file not found, using default rates");
                RateSet::default()
            }
            Err(err) => {
                warn!(error = %err, "Ignoring unusable rates file, using default rates");
                RateSet::default()
            }
        }
    }

    /// Loads the persisted rates, reporting why the document can't be used.
    ///
    /// Returns `ConfigNotFound` when the file doesn't exist and
    /// `ConfigParseError` when it isn't valid JSON or holds out-of-range
    /// rates.
    pub fn try_load(&self) -> EngineResult<RateSet> {
        let path_str = self.path.display().to_string();

        let content = fs::read_to_string(&self.path).map_err(|err| match err.kind() {
            ErrorKind::NotFound => EngineError::ConfigNotFound {
                path: path_str.clone(),
            },
            _ => EngineError::ConfigParseError {
                path: path_str.clone(),
                message: err.to_string(),
            },
        })?;

        let document: RatesDocument =
            serde_json::from_str(&content).map_err(|e| EngineError::ConfigParseError {
                path: path_str.clone(),
                message: e.to_string(),
            })?;

        let rates = document.into_rates();
        rates
            .validate()
            .map_err(|e| EngineError::ConfigParseError {
                path: path_str,
                message: e.to_string(),
            })?;

        Ok(rates)
    }

    /// Validates and persists the rates.
    ///
    /// The document is written to a temporary sibling first and then renamed
    /// over the target, so a failed write never leaves a truncated file.
    pub fn save(&self, rates: &RateSet) -> EngineResult<()> {
        rates.validate()?;

        let path_str = self.path.display().to_string();
        let write_error = |err: std::io::Error| EngineError::ConfigWriteError {
            path: path_str.clone(),
            message: err.to_string(),
        };

        let json = serde_json::to_string_pretty(rates).map_err(|e| EngineError::ConfigWriteError {
            path: path_str.clone(),
            message: e.to_string(),
        })?;

        let tmp_path = self.tmp_path();
        fs::write(&tmp_path, json).map_err(write_error)?;
        if let Err(err) = fs::rename(&tmp_path, &self.path) {
            let _ = fs::remove_file(&tmp_path);
            return Err(write_error(err));
        }

        info!(
            path = %path_str,
            cbs_rate = %rates.cbs_rate,
            ibs_rate = %rates.ibs_rate,
            "Saved consumption-tax rates"
        );
        Ok(())
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| OsString::from("rates"));
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}
