use std::path::Path;
use std::sync::{Arc, OnceLock};

use super::StaticConfig;
use crate::errors::Result;

static CONFIG: OnceLock<Arc<StaticConfig>> = OnceLock::new();

/// Load and install the global configuration
///
/// Only the first successful call takes effect; later calls return the
/// already installed configuration.
///
/// # Examples
/// ```no_run
/// use pingd::config::init_config;
/// let config = init_config(None).expect("invalid configuration");
/// assert!(config.server.port > 0);
/// ```
pub fn init_config(path: Option<&Path>) -> Result<Arc<StaticConfig>> {
    if let Some(existing) = CONFIG.get() {
        return Ok(existing.clone());
    }

    let loaded = Arc::new(StaticConfig::load(path)?);
    Ok(CONFIG.get_or_init(|| loaded).clone())
}
