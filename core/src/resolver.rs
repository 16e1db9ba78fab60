//! DNS client configuration and the SOA authority probe.
//!
//! The system configuration is read once per process. Whatever the first
//! read produced, including a failure, is what every later caller sees.

use std::path::Path;
use std::sync::{Arc, OnceLock};

use assay_common::config::DEFAULT_RESOLV_CONF;

pub mod config;
pub mod soa;

use config::{ConfigError, ResolverConfig};

pub(crate) type SharedConfig = Result<Arc<ResolverConfig>, ConfigError>;

static SYSTEM_CONFIG: OnceLock<SharedConfig> = OnceLock::new();

fn load_cached(cell: &OnceLock<SharedConfig>, path: &Path) -> SharedConfig {
    cell.get_or_init(|| ResolverConfig::from_file(path).map(Arc::new))
        .clone()
}

/// The process-wide configuration from `/etc/resolv.conf`.
pub fn system_config() -> Result<Arc<ResolverConfig>, ConfigError> {
    load_cached(&SYSTEM_CONFIG, Path::new(DEFAULT_RESOLV_CONF))
}
