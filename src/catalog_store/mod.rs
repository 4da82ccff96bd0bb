//! CatalogStore - Single Source of Truth for catalog data
//!
//! ## Responsibilities
//!
//! - Catalog load (parse + normalize) at boot
//! - Immutable in-memory catalog shared with the engine
//! - Wholesale reload (never a partial merge)
//! - Snapshot export/import round-trip
//!
//! ## Design Principles
//!
//! - SSoT: all catalog reads go through here
//! - The engine only ever sees an `Arc<Catalog>` frozen at request time;
//!   a reload swaps the whole value and later requests pick it up

mod coerce;
mod loader;
mod normalizer;
mod types;

pub use coerce::{is_false_like, split_list, to_bool, to_count, to_num, to_str_or_absent};
pub use loader::{
    CatalogSource, ACCESSORY_MAP_FILE, CAMERAS_FILE, DRIVES_FILE, RECORDERS_FILE, SWITCHES_FILE,
};
pub use normalizer::{
    normalize_accessory_map, normalize_cameras, normalize_catalog, normalize_drives,
    normalize_recorders, normalize_switches, RawCatalog,
};
pub use types::*;

use std::sync::Arc;
use tokio::sync::RwLock;

/// CatalogStore instance
pub struct CatalogStore {
    source: CatalogSource,
    cache: RwLock<Arc<Catalog>>,
}

impl CatalogStore {
    /// Load the catalog from its source and build the store.
    /// A completely unreadable source is a boot failure.
    pub async fn new(source: CatalogSource) -> crate::Result<Self> {
        let catalog = Self::load_from(&source).await?;
        tracing::info!(
            cameras = catalog.cameras.len(),
            recorders = catalog.recorders.len(),
            drives = catalog.drives.len(),
            switches = catalog.switches.len(),
            mapped_cameras = catalog.accessory_map.len(),
            "Catalog loaded"
        );
        Ok(Self {
            source,
            cache: RwLock::new(Arc::new(catalog)),
        })
    }

    async fn load_from(source: &CatalogSource) -> crate::Result<Catalog> {
        let raw = source.load().await?;
        Ok(normalize_catalog(&raw))
    }

    /// Current catalog generation. Cheap clone of an Arc; callers hold it
    /// for the duration of one computation pass.
    pub async fn current(&self) -> Arc<Catalog> {
        self.cache.read().await.clone()
    }

    /// Re-read the source and replace the catalog wholesale
    pub async fn reload(&self) -> crate::Result<CatalogSummary> {
        let catalog = Self::load_from(&self.source).await?;
        let summary = catalog.summary();
        *self.cache.write().await = Arc::new(catalog);
        tracing::info!(
            cameras = summary.cameras,
            recorders = summary.recorders,
            "Catalog reloaded"
        );
        Ok(summary)
    }

    /// Export the current catalog as a serializable snapshot
    pub async fn export_snapshot(&self) -> CatalogSnapshot {
        CatalogSnapshot::from_catalog(&*self.current().await)
    }

    /// Replace the catalog with an imported snapshot (wholesale)
    pub async fn import_snapshot(&self, snapshot: CatalogSnapshot) -> crate::Result<CatalogSummary> {
        if snapshot.version != SNAPSHOT_VERSION {
            return Err(crate::Error::Validation(format!(
                "unsupported snapshot version {}",
                snapshot.version
            )));
        }
        let catalog = snapshot.into_catalog();
        if catalog.is_empty() {
            return Err(crate::Error::Validation(
                "snapshot contains no catalog data".to_string(),
            ));
        }
        let summary = catalog.summary();
        *self.cache.write().await = Arc::new(catalog);
        tracing::info!(cameras = summary.cameras, "Catalog snapshot imported");
        Ok(summary)
    }
}
