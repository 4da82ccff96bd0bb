//! Application state
//!
//! Holds the shared components and configuration

use crate::catalog_store::{CatalogSource, CatalogStore};
use std::path::PathBuf;
use std::sync::Arc;

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// Directory holding the delimited catalog files
    pub catalog_dir: PathBuf,
    /// Optional remote catalog base URL (takes precedence over the dir)
    pub catalog_url: Option<String>,
    /// Optional periodic catalog reload interval (seconds)
    pub catalog_reload_sec: Option<u64>,
    /// Wizard frontend dist directory
    pub static_dir: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8086),
            catalog_dir: std::env::var("CATALOG_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("/var/lib/is24/catalog")),
            catalog_url: std::env::var("CATALOG_URL").ok(),
            catalog_reload_sec: std::env::var("CATALOG_RELOAD_SEC")
                .ok()
                .and_then(|v| v.parse().ok()),
            static_dir: std::env::var("STATIC_DIR")
                .unwrap_or_else(|_| "/opt/is24/frontend/dist".to_string()),
        }
    }
}

impl AppConfig {
    /// Catalog source resolved from the configuration
    pub fn catalog_source(&self) -> CatalogSource {
        match &self.catalog_url {
            Some(url) => CatalogSource::Url(url.clone()),
            None => CatalogSource::Dir(self.catalog_dir.clone()),
        }
    }
}

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Application config
    pub config: AppConfig,
    /// CatalogStore (SSoT)
    pub catalog_store: Arc<CatalogStore>,
}
