//! CatalogStore data types
//!
//! Typed catalog entries for cameras, recorders, drives, switches, and the
//! camera -> mounting accessory compatibility mapping. Loaded once per
//! source, immutable for the lifetime of a catalog generation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Video codec selectable for recording
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Codec {
    H264,
    H265,
}

impl Default for Codec {
    fn default() -> Self {
        Self::H265
    }
}

impl std::fmt::Display for Codec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::H264 => write!(f, "h264"),
            Self::H265 => write!(f, "h265"),
        }
    }
}

impl From<&str> for Codec {
    fn from(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "h264" | "h.264" | "avc" => Self::H264,
            _ => Self::H265,
        }
    }
}

/// Camera catalog entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CameraEntry {
    pub id: String,
    pub name: String,
    pub model: Option<String>,
    pub resolution: Option<String>,
    pub megapixels: Option<f64>,
    pub fps_max: Option<f64>,
    /// Static stream bitrate (Mbps) per codec at the quoted fps tier
    pub bitrate_h264_mbps: Option<f64>,
    pub bitrate_h265_mbps: Option<f64>,
    /// PoE draw used against the switch power budget
    pub poe_watts: Option<f64>,
    pub poe_class: Option<String>,
    pub outdoor: bool,
    pub ptz: bool,
    pub tags: Vec<String>,
    pub image_url: Option<String>,
    pub datasheet_url: Option<String>,
}

impl CameraEntry {
    /// Catalog bitrate for the configured codec, if quoted
    pub fn bitrate_for(&self, codec: Codec) -> Option<f64> {
        match codec {
            Codec::H264 => self.bitrate_h264_mbps,
            Codec::H265 => self.bitrate_h265_mbps,
        }
    }
}

/// Recorder (NVR) catalog entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecorderEntry {
    pub id: String,
    pub name: String,
    pub channels: Option<u32>,
    /// Aggregate incoming throughput ceiling (Mbps)
    pub throughput_mbps: Option<f64>,
    pub hdd_bays: Option<u32>,
    pub image_url: Option<String>,
    pub datasheet_url: Option<String>,
}

/// Surveillance drive catalog entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DriveEntry {
    pub id: String,
    pub name: String,
    pub capacity_tb: Option<f64>,
}

/// PoE switch catalog entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SwitchEntry {
    pub id: String,
    pub name: String,
    pub ports: Option<u32>,
    /// Total deliverable PoE power (watts)
    pub poe_budget_watts: Option<f64>,
    pub image_url: Option<String>,
    pub datasheet_url: Option<String>,
}

/// Mounting accessory kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessoryType {
    JunctionBox,
    WallMount,
    CeilingMount,
}

impl std::fmt::Display for AccessoryType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::JunctionBox => write!(f, "junction_box"),
            Self::WallMount => write!(f, "wall_mount"),
            Self::CeilingMount => write!(f, "ceiling_mount"),
        }
    }
}

/// One compatible accessory variant for a camera
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessoryVariant {
    pub kind: AccessoryType,
    pub id: String,
    pub name: String,
    /// Whether this mount is usable without its paired junction box.
    /// Advisory at resolution time; junction boxes are always true.
    pub stand_alone: bool,
    pub qty_per_camera: u32,
    pub image_url: Option<String>,
    pub datasheet_url: Option<String>,
}

/// Camera id -> ordered compatible variants (absence is a normal state)
pub type AccessoryMap = HashMap<String, Vec<AccessoryVariant>>;

/// Immutable normalized catalog. Reload replaces the whole value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    pub cameras: Vec<CameraEntry>,
    pub recorders: Vec<RecorderEntry>,
    pub drives: Vec<DriveEntry>,
    pub switches: Vec<SwitchEntry>,
    pub accessory_map: AccessoryMap,
}

impl Catalog {
    pub fn camera(&self, id: &str) -> Option<&CameraEntry> {
        self.cameras.iter().find(|c| c.id == id)
    }

    /// Compatible variants for a camera; empty slice when unmapped
    pub fn variants_for(&self, camera_id: &str) -> &[AccessoryVariant] {
        self.accessory_map
            .get(camera_id)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// Largest drive in the catalog, used for recorder bay capacity
    pub fn max_drive_tb(&self) -> Option<f64> {
        self.drives
            .iter()
            .filter_map(|d| d.capacity_tb)
            .fold(None, |acc, c| Some(acc.map_or(c, |a: f64| a.max(c))))
    }

    pub fn is_empty(&self) -> bool {
        self.cameras.is_empty()
            && self.recorders.is_empty()
            && self.drives.is_empty()
            && self.switches.is_empty()
            && self.accessory_map.is_empty()
    }

    pub fn summary(&self) -> CatalogSummary {
        CatalogSummary {
            cameras: self.cameras.len(),
            recorders: self.recorders.len(),
            drives: self.drives.len(),
            switches: self.switches.len(),
            mapped_cameras: self.accessory_map.len(),
        }
    }
}

/// Catalog counts for health/summary endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogSummary {
    pub cameras: usize,
    pub recorders: usize,
    pub drives: usize,
    pub switches: usize,
    pub mapped_cameras: usize,
}

/// Serializable catalog snapshot. Export then import reproduces an
/// equivalent catalog (structured record groups, not raw text).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogSnapshot {
    pub version: u32,
    pub exported_at: DateTime<Utc>,
    pub cameras: Vec<CameraEntry>,
    pub recorders: Vec<RecorderEntry>,
    pub drives: Vec<DriveEntry>,
    pub switches: Vec<SwitchEntry>,
    pub accessory_map: AccessoryMap,
}

/// Current snapshot schema version
pub const SNAPSHOT_VERSION: u32 = 1;

impl CatalogSnapshot {
    pub fn from_catalog(catalog: &Catalog) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            exported_at: Utc::now(),
            cameras: catalog.cameras.clone(),
            recorders: catalog.recorders.clone(),
            drives: catalog.drives.clone(),
            switches: catalog.switches.clone(),
            accessory_map: catalog.accessory_map.clone(),
        }
    }

    pub fn into_catalog(self) -> Catalog {
        Catalog {
            cameras: self.cameras,
            recorders: self.recorders,
            drives: self.drives,
            switches: self.switches,
            accessory_map: self.accessory_map,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera(id: &str) -> CameraEntry {
        CameraEntry {
            id: id.to_string(),
            name: format!("Camera {}", id),
            model: None,
            resolution: None,
            megapixels: None,
            fps_max: None,
            bitrate_h264_mbps: Some(6.0),
            bitrate_h265_mbps: Some(4.0),
            poe_watts: None,
            poe_class: None,
            outdoor: false,
            ptz: false,
            tags: Vec::new(),
            image_url: None,
            datasheet_url: None,
        }
    }

    #[test]
    fn test_bitrate_for_codec() {
        let cam = camera("CAM1");
        assert_eq!(cam.bitrate_for(Codec::H264), Some(6.0));
        assert_eq!(cam.bitrate_for(Codec::H265), Some(4.0));
    }

    #[test]
    fn test_variants_for_unmapped_camera_is_empty() {
        let catalog = Catalog::default();
        assert!(catalog.variants_for("CAM-UNKNOWN").is_empty());
    }

    #[test]
    fn test_max_drive_tb() {
        let mut catalog = Catalog::default();
        assert_eq!(catalog.max_drive_tb(), None);
        catalog.drives = vec![
            DriveEntry {
                id: "HDD4".into(),
                name: "4TB".into(),
                capacity_tb: Some(4.0),
            },
            DriveEntry {
                id: "HDD10".into(),
                name: "10TB".into(),
                capacity_tb: Some(10.0),
            },
            DriveEntry {
                id: "HDD?".into(),
                name: "unknown".into(),
                capacity_tb: None,
            },
        ];
        assert_eq!(catalog.max_drive_tb(), Some(10.0));
    }

    #[test]
    fn test_snapshot_round_trip_preserves_catalog() {
        let mut catalog = Catalog::default();
        catalog.cameras = vec![camera("CAM1"), camera("CAM2")];
        catalog.accessory_map.insert(
            "CAM1".to_string(),
            vec![AccessoryVariant {
                kind: AccessoryType::JunctionBox,
                id: "JB-1".into(),
                name: "Junction box".into(),
                stand_alone: true,
                qty_per_camera: 1,
                image_url: None,
                datasheet_url: None,
            }],
        );

        let snap = CatalogSnapshot::from_catalog(&catalog);
        let json = serde_json::to_string(&snap).unwrap();
        let restored: CatalogSnapshot = serde_json::from_str(&json).unwrap();
        let restored = restored.into_catalog();

        assert_eq!(restored.cameras.len(), 2);
        assert_eq!(restored.variants_for("CAM1").len(), 1);
        assert_eq!(restored.variants_for("CAM1")[0].id, "JB-1");
    }
}
