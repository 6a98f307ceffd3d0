//! # Paths
//!
//! Where configuration and session logs live on disk.

use std::path::PathBuf;

pub const APP_DIR: &str = "intent-shell";
pub const CONFIG_FILE: &str = "config.yaml";
pub const SESSION_LOG: &str = "session.log";
const FALLBACK_DATA_DIR: &str = "data";

/// Config files tried in order when no `--config` is given.
pub fn config_candidates() -> Vec<PathBuf> {
    let mut candidates = vec![PathBuf::from(CONFIG_FILE)];
    if let Some(dir) = dirs::config_dir() {
        candidates.push(dir.join(APP_DIR).join(CONFIG_FILE));
    }
    candidates
}

/// Directory for `session.log`: the configured one, else the platform data dir.
pub fn log_dir(configured: Option<&str>) -> PathBuf {
    match configured {
        Some(dir) => PathBuf::from(dir),
        None => dirs::data_local_dir()
            .map(|dir| dir.join(APP_DIR))
            .unwrap_or_else(|| PathBuf::from(FALLBACK_DATA_DIR)),
    }
}
