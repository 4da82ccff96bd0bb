//! Catalog normalization
//!
//! Converts raw parsed records into typed catalog entries. Rows without a
//! usable id are skipped with a warning; individual bad fields coerce to
//! absent. Nothing in here aborts a catalog load.

use super::coerce::{is_false_like, split_list, to_bool, to_count, to_num, to_str_or_absent};
use super::types::{
    AccessoryMap, AccessoryType, AccessoryVariant, CameraEntry, Catalog, DriveEntry,
    RecorderEntry, SwitchEntry,
};
use crate::record_parser::RawRecord;

/// Raw record groups, one per entity family
#[derive(Debug, Default)]
pub struct RawCatalog {
    pub cameras: Vec<RawRecord>,
    pub recorders: Vec<RawRecord>,
    pub drives: Vec<RawRecord>,
    pub switches: Vec<RawRecord>,
    pub accessory_map: Vec<RawRecord>,
}

/// Normalize all families into an immutable catalog
pub fn normalize_catalog(raw: &RawCatalog) -> Catalog {
    Catalog {
        cameras: normalize_cameras(&raw.cameras),
        recorders: normalize_recorders(&raw.recorders),
        drives: normalize_drives(&raw.drives),
        switches: normalize_switches(&raw.switches),
        accessory_map: normalize_accessory_map(&raw.accessory_map),
    }
}

fn record_id(record: &RawRecord, family: &str) -> Option<String> {
    match to_str_or_absent(record.get("id")) {
        Some(id) => Some(id),
        None => {
            tracing::warn!(
                family = family,
                line = record.line,
                "Skipping row without usable id"
            );
            None
        }
    }
}

pub fn normalize_cameras(records: &[RawRecord]) -> Vec<CameraEntry> {
    records
        .iter()
        .filter_map(|r| {
            let id = record_id(r, "cameras")?;
            Some(CameraEntry {
                name: to_str_or_absent(r.get("name")).unwrap_or_else(|| id.clone()),
                id,
                model: to_str_or_absent(r.get("model")),
                resolution: to_str_or_absent(r.get("resolution")),
                megapixels: to_num(r.get("megapixels")),
                fps_max: to_num(r.get("fps_max")),
                bitrate_h264_mbps: to_num(r.get("bitrate_h264_mbps")),
                bitrate_h265_mbps: to_num(r.get("bitrate_h265_mbps")),
                poe_watts: to_num(r.get("poe_watts")),
                poe_class: to_str_or_absent(r.get("poe_class")),
                outdoor: to_bool(r.get_or_empty("outdoor")),
                ptz: to_bool(r.get_or_empty("ptz")),
                tags: split_list(r.get_or_empty("tags")),
                image_url: to_str_or_absent(r.get("image_url")),
                datasheet_url: to_str_or_absent(r.get("datasheet_url")),
            })
        })
        .collect()
}

pub fn normalize_recorders(records: &[RawRecord]) -> Vec<RecorderEntry> {
    records
        .iter()
        .filter_map(|r| {
            let id = record_id(r, "recorders")?;
            Some(RecorderEntry {
                name: to_str_or_absent(r.get("name")).unwrap_or_else(|| id.clone()),
                id,
                channels: to_count(r.get("channels")),
                throughput_mbps: to_num(r.get("throughput_mbps")),
                hdd_bays: to_count(r.get("hdd_bays")),
                image_url: to_str_or_absent(r.get("image_url")),
                datasheet_url: to_str_or_absent(r.get("datasheet_url")),
            })
        })
        .collect()
}

pub fn normalize_drives(records: &[RawRecord]) -> Vec<DriveEntry> {
    records
        .iter()
        .filter_map(|r| {
            let id = record_id(r, "drives")?;
            Some(DriveEntry {
                name: to_str_or_absent(r.get("name")).unwrap_or_else(|| id.clone()),
                id,
                capacity_tb: to_num(r.get("capacity_tb")),
            })
        })
        .collect()
}

pub fn normalize_switches(records: &[RawRecord]) -> Vec<SwitchEntry> {
    records
        .iter()
        .filter_map(|r| {
            let id = record_id(r, "switches")?;
            Some(SwitchEntry {
                name: to_str_or_absent(r.get("name")).unwrap_or_else(|| id.clone()),
                id,
                ports: to_count(r.get("ports")),
                poe_budget_watts: to_num(r.get("poe_budget_watts")),
                image_url: to_str_or_absent(r.get("image_url")),
                datasheet_url: to_str_or_absent(r.get("datasheet_url")),
            })
        })
        .collect()
}

/// Fixed column groups of the accessory-mapping export, one group per
/// variant slot.
struct VariantColumns {
    kind: AccessoryType,
    id: &'static str,
    name: &'static str,
    stand_alone: Option<&'static str>,
    image_url: &'static str,
    datasheet_url: &'static str,
}

const VARIANT_COLUMNS: [VariantColumns; 3] = [
    VariantColumns {
        kind: AccessoryType::JunctionBox,
        id: "junction_box_id",
        name: "junction_box_name",
        stand_alone: None,
        image_url: "image_url_junction_box",
        datasheet_url: "datasheet_url_junction_box",
    },
    VariantColumns {
        kind: AccessoryType::WallMount,
        id: "wall_mount_id",
        name: "wall_mount_name",
        stand_alone: Some("wall_mount_stand_alone"),
        image_url: "image_url_wall_mount",
        datasheet_url: "datasheet_url_wall_mount",
    },
    VariantColumns {
        kind: AccessoryType::CeilingMount,
        id: "ceiling_mount_id",
        name: "ceiling_mount_name",
        stand_alone: Some("ceiling_mount_stand_alone"),
        image_url: "image_url_ceiling_mount",
        datasheet_url: "datasheet_url_ceiling_mount",
    },
];

/// Build the camera -> variants mapping. Duplicate camera ids overwrite
/// (last row wins); see DESIGN.md.
pub fn normalize_accessory_map(records: &[RawRecord]) -> AccessoryMap {
    let mut map = AccessoryMap::new();

    for record in records {
        let camera_id = match to_str_or_absent(record.get("camera_id")) {
            Some(id) => id,
            None => {
                tracing::warn!(
                    family = "accessory_map",
                    line = record.line,
                    "Skipping mapping row without camera_id"
                );
                continue;
            }
        };

        let qty_per_camera = to_count(record.get("qty")).unwrap_or(1);
        let mut variants = Vec::new();

        for cols in &VARIANT_COLUMNS {
            // A variant slot exists only when its id column carries a value
            if is_false_like(record.get(cols.id)) {
                continue;
            }
            let id = record.get_or_empty(cols.id).trim().to_string();
            let stand_alone = match cols.stand_alone {
                // Junction boxes are always suggestion-eligible, whatever
                // mounts the row also carries
                None => true,
                Some(col) => !is_false_like(record.get(col)),
            };

            variants.push(AccessoryVariant {
                kind: cols.kind,
                name: to_str_or_absent(record.get(cols.name)).unwrap_or_else(|| id.clone()),
                id,
                stand_alone,
                qty_per_camera,
                image_url: to_str_or_absent(record.get(cols.image_url)),
                datasheet_url: to_str_or_absent(record.get(cols.datasheet_url)),
            });
        }

        if map.insert(camera_id.clone(), variants).is_some() {
            tracing::debug!(
                camera_id = %camera_id,
                line = record.line,
                "Duplicate mapping row for camera, last row wins"
            );
        }
    }

    map
}
