//! Configuration loading and persistence for the payroll engine.
//!
//! Two documents are involved: the optional YAML settings file read once at
//! startup, and the JSON rates document that the operator can rewrite at
//! runtime through [`RateStore::save`].
//!
//! # Example
//!
//! ```no_run
//! use payroll_engine::config::ConfigLoader;
//!
//! let loader = ConfigLoader::load("./payroll.yaml").unwrap();
//! let rates = loader.rate_store().load();
//! println!("CBS {}%, IBS {}%", rates.cbs_rate, rates.ibs_rate);
//! ```

mod loader;
mod rate_store;
mod types;

pub use loader::{ConfigLoader, ENV_HOST, ENV_PORT, ENV_RATES_FILE, ENV_TREATMENT};
pub use rate_store::RateStore;
pub use types::{DEFAULT_RATES_FILE, DEFAULT_SETTINGS_FILE, Settings};
