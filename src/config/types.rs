//! Configuration types for the payroll engine.
//!
//! This module contains the strongly-typed settings deserialized from the
//! optional YAML settings file.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::models::ConsumptionTaxTreatment;

/// Default path of the persisted rates document.
pub const DEFAULT_RATES_FILE: &str = "config.json";

/// Default path of the YAML settings file.
pub const DEFAULT_SETTINGS_FILE: &str = "payroll.yaml";

/// Server and persistence settings.
///
/// Every field is optional in the YAML file; missing fields keep their
/// defaults.
///
/// ```yaml
/// host: 0.0.0.0
/// port: 8080
/// rates_file: /var/lib/payroll/config.json
/// consumption_tax_treatment: informational
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Address the HTTP server binds to.
    pub host: String,
    /// Port the HTTP server listens on.
    pub port: u16,
    /// Location of the persisted rates document.
    pub rates_file: PathBuf,
    /// Default CBS/IBS treatment when a request doesn't choose one.
    pub consumption_tax_treatment: ConsumptionTaxTreatment,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            rates_file: PathBuf::from(DEFAULT_RATES_FILE),
            consumption_tax_treatment: ConsumptionTaxTreatment::default(),
        }
    }
}

impl Settings {
    /// Returns `host:port` for binding.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
