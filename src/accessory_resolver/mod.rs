//! AccessoryResolver - camera to mounting accessory resolution
//!
//! ## Responsibilities
//!
//! - Per-block resolution of compatible accessory variants
//! - Quantity scaling (variant qty per camera x block qty)
//! - Project-wide aggregation into deduplicated purchasing lines
//!
//! A camera with no mapping entry resolves to an empty list. That is the
//! documented degraded path the wizard renders as an informational message,
//! never an error.

use crate::catalog_store::{AccessoryType, AccessoryVariant};
use crate::plan_service::Block;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Derived, deduplicated accessory purchasing line
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessoryLine {
    pub accessory_id: String,
    pub kind: AccessoryType,
    pub name: String,
    /// Contributing blocks, kept for traceability after aggregation
    pub from_block_ids: Vec<String>,
    pub qty: u32,
    /// Advisory: whether the mount is usable without its junction box
    pub stand_alone: bool,
    pub image_url: Option<String>,
    pub datasheet_url: Option<String>,
}

/// Resolve the accessory lines for one configured block.
///
/// Every variant present in the mapping is offered: junction boxes always
/// (they are the base plate even when a stand-alone mount is chosen), and
/// mounts regardless of their `stand_alone` flag, which callers treat as
/// advisory metadata rather than a hard filter.
pub fn resolve_accessories(block: &Block, variants: &[AccessoryVariant]) -> Vec<AccessoryLine> {
    if !block.contributes() {
        return Vec::new();
    }
    if variants.is_empty() {
        tracing::debug!(
            block_id = %block.id,
            camera_id = block.selected_camera_id.as_deref().unwrap_or(""),
            "No accessory mapping for camera, resolving to empty"
        );
        return Vec::new();
    }

    variants
        .iter()
        .filter_map(|variant| {
            let qty = variant.qty_per_camera * block.qty;
            // Zero-quantity lines are dropped
            if qty == 0 {
                return None;
            }
            Some(AccessoryLine {
                accessory_id: variant.id.clone(),
                kind: variant.kind,
                name: variant.name.clone(),
                from_block_ids: vec![block.id.clone()],
                qty,
                stand_alone: variant.stand_alone,
                image_url: variant.image_url.clone(),
                datasheet_url: variant.datasheet_url.clone(),
            })
        })
        .collect()
}

/// Aggregate per-block lines into project purchasing lines.
///
/// Dedup key is `(kind, accessory_id)` across the whole project: the same
/// accessory required by two blocks collapses into one line with a summed
/// quantity, still recording each contributing block id. First-seen order
/// is preserved.
pub fn aggregate_lines(lines: Vec<AccessoryLine>) -> Vec<AccessoryLine> {
    let mut order: Vec<(AccessoryType, String)> = Vec::new();
    let mut merged: HashMap<(AccessoryType, String), AccessoryLine> = HashMap::new();

    for line in lines {
        let key = (line.kind, line.accessory_id.clone());
        match merged.get_mut(&key) {
            Some(existing) => {
                existing.qty += line.qty;
                existing.from_block_ids.extend(line.from_block_ids);
            }
            None => {
                order.push(key.clone());
                merged.insert(key, line);
            }
        }
    }

    order
        .into_iter()
        .filter_map(|key| merged.remove(&key))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(id: &str, camera: &str, qty: u32) -> Block {
        Block {
            id: id.to_string(),
            label: format!("Block {}", id),
            selected_camera_id: Some(camera.to_string()),
            qty,
            validated: true,
            answers: serde_json::Value::Null,
            mbps_override: None,
        }
    }

    fn variant(kind: AccessoryType, id: &str, stand_alone: bool, qty: u32) -> AccessoryVariant {
        AccessoryVariant {
            kind,
            id: id.to_string(),
            name: format!("Accessory {}", id),
            stand_alone,
            qty_per_camera: qty,
            image_url: None,
            datasheet_url: None,
        }
    }

    #[test]
    fn test_quantity_scales_with_block_qty() {
        let variants = vec![variant(AccessoryType::JunctionBox, "JB-1", true, 2)];
        let lines = resolve_accessories(&block("B1", "CAM1", 3), &variants);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].qty, 6);
        assert_eq!(lines[0].from_block_ids, vec!["B1"]);
    }

    #[test]
    fn test_junction_box_offered_alongside_mounts() {
        let variants = vec![
            variant(AccessoryType::JunctionBox, "JB-1", true, 1),
            variant(AccessoryType::WallMount, "WM-1", true, 1),
            variant(AccessoryType::CeilingMount, "CM-1", false, 1),
        ];
        let lines = resolve_accessories(&block("B1", "CAM1", 1), &variants);
        assert_eq!(lines.len(), 3);
        assert!(lines
            .iter()
            .any(|l| l.kind == AccessoryType::JunctionBox && l.accessory_id == "JB-1"));
        // Non-stand-alone mounts are still returned, flagged advisory
        let cm = lines
            .iter()
            .find(|l| l.kind == AccessoryType::CeilingMount)
            .unwrap();
        assert!(!cm.stand_alone);
    }

    #[test]
    fn test_no_mapping_resolves_empty() {
        let lines = resolve_accessories(&block("B1", "CAM1", 5), &[]);
        assert!(lines.is_empty());
    }

    #[test]
    fn test_unvalidated_or_zero_qty_block_resolves_empty() {
        let variants = vec![variant(AccessoryType::JunctionBox, "JB-1", true, 1)];
        let mut b = block("B1", "CAM1", 3);
        b.validated = false;
        assert!(resolve_accessories(&b, &variants).is_empty());

        let b = block("B2", "CAM1", 0);
        assert!(resolve_accessories(&b, &variants).is_empty());
    }

    #[test]
    fn test_zero_qty_per_camera_variant_omitted() {
        let variants = vec![
            variant(AccessoryType::JunctionBox, "JB-1", true, 0),
            variant(AccessoryType::WallMount, "WM-1", true, 1),
        ];
        let lines = resolve_accessories(&block("B1", "CAM1", 4), &variants);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].accessory_id, "WM-1");
    }

    #[test]
    fn test_aggregation_sums_across_blocks() {
        let variants = vec![variant(AccessoryType::JunctionBox, "JB-1", true, 1)];
        let mut lines = resolve_accessories(&block("B1", "CAM1", 3), &variants);
        lines.extend(resolve_accessories(&block("B2", "CAM1", 2), &variants));

        let aggregated = aggregate_lines(lines);
        assert_eq!(aggregated.len(), 1);
        assert_eq!(aggregated[0].qty, 5);
        assert_eq!(aggregated[0].from_block_ids, vec!["B1", "B2"]);
    }

    #[test]
    fn test_aggregation_keeps_distinct_kinds_apart() {
        // Same id under two kinds must not merge
        let lines = vec![
            AccessoryLine {
                accessory_id: "X-1".into(),
                kind: AccessoryType::WallMount,
                name: "Wall".into(),
                from_block_ids: vec!["B1".into()],
                qty: 1,
                stand_alone: true,
                image_url: None,
                datasheet_url: None,
            },
            AccessoryLine {
                accessory_id: "X-1".into(),
                kind: AccessoryType::CeilingMount,
                name: "Ceiling".into(),
                from_block_ids: vec!["B1".into()],
                qty: 1,
                stand_alone: true,
                image_url: None,
                datasheet_url: None,
            },
        ];
        assert_eq!(aggregate_lines(lines).len(), 2);
    }
}
