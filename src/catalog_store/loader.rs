//! Catalog source acquisition
//!
//! The async I/O boundary of the store: raw delimited text is read from a
//! directory of per-family files, or fetched from a remote base URL. Once
//! the text is in hand, parsing and normalization are synchronous and pure.

use super::normalizer::RawCatalog;
use crate::error::{Error, Result};
use crate::record_parser::parse_records;
use std::path::PathBuf;

/// Per-family source file names (tab or comma separated, header row first)
pub const CAMERAS_FILE: &str = "cameras.tsv";
pub const RECORDERS_FILE: &str = "recorders.tsv";
pub const DRIVES_FILE: &str = "drives.tsv";
pub const SWITCHES_FILE: &str = "switches.tsv";
pub const ACCESSORY_MAP_FILE: &str = "accessory_mapping.tsv";

const FAMILY_FILES: [&str; 5] = [
    CAMERAS_FILE,
    RECORDERS_FILE,
    DRIVES_FILE,
    SWITCHES_FILE,
    ACCESSORY_MAP_FILE,
];

/// Where catalog text comes from
#[derive(Debug, Clone)]
pub enum CatalogSource {
    /// Directory holding the five family files
    Dir(PathBuf),
    /// Base URL serving the five family files
    Url(String),
}

impl CatalogSource {
    /// Load raw text for every family and parse it into record groups.
    ///
    /// A missing/unreadable family degrades to an empty group with a
    /// warning; only a catalog with no usable family at all is a hard
    /// failure.
    pub async fn load(&self) -> Result<RawCatalog> {
        let mut texts = Vec::with_capacity(FAMILY_FILES.len());
        for file in FAMILY_FILES {
            match self.fetch_family(file).await {
                Ok(text) => texts.push(text),
                Err(e) => {
                    tracing::warn!(file = file, error = %e, "Catalog family unavailable, treating as empty");
                    texts.push(String::new());
                }
            }
        }

        if texts.iter().all(|t| t.trim().is_empty()) {
            return Err(Error::Config(format!(
                "no catalog data readable from {:?}",
                self
            )));
        }

        let mut groups = texts.iter().map(|t| parse_records(t));
        Ok(RawCatalog {
            cameras: groups.next().unwrap_or_default(),
            recorders: groups.next().unwrap_or_default(),
            drives: groups.next().unwrap_or_default(),
            switches: groups.next().unwrap_or_default(),
            accessory_map: groups.next().unwrap_or_default(),
        })
    }

    async fn fetch_family(&self, file: &str) -> Result<String> {
        match self {
            Self::Dir(dir) => Ok(tokio::fs::read_to_string(dir.join(file)).await?),
            Self::Url(base) => {
                let url = format!("{}/{}", base.trim_end_matches('/'), file);
                let response = reqwest::get(&url).await?;
                if !response.status().is_success() {
                    return Err(Error::Network(format!(
                        "catalog fetch {} returned {}",
                        url,
                        response.status()
                    )));
                }
                Ok(response.text().await?)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_family(dir: &std::path::Path, file: &str, text: &str) {
        std::fs::write(dir.join(file), text).unwrap();
    }

    #[tokio::test]
    async fn test_load_from_dir() {
        let dir = tempfile::tempdir().unwrap();
        write_family(dir.path(), CAMERAS_FILE, "id,name\nCAM1,Dome\n");
        write_family(dir.path(), RECORDERS_FILE, "id,name,channels\nNVR8,8ch,8\n");

        let raw = CatalogSource::Dir(dir.path().to_path_buf())
            .load()
            .await
            .unwrap();
        assert_eq!(raw.cameras.len(), 1);
        assert_eq!(raw.recorders.len(), 1);
        // Missing families degrade to empty groups
        assert!(raw.switches.is_empty());
        assert!(raw.accessory_map.is_empty());
    }

    #[tokio::test]
    async fn test_load_with_nothing_readable_is_hard_failure() {
        let dir = tempfile::tempdir().unwrap();
        let result = CatalogSource::Dir(dir.path().to_path_buf()).load().await;
        assert!(result.is_err());
    }
}
