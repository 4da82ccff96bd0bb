//! PlanService - full project computation pass
//!
//! ## Responsibilities
//!
//! - CameraLine derivation from validated blocks
//! - One-shot orchestration: accessories + sizing + equipment
//!
//! Every pass is a pure recomputation over the current catalog and the
//! request's selection; nothing is cached between passes and nothing in
//! the catalog is mutated. A superseded pass is simply discarded by the
//! caller.

mod types;

pub use types::{
    camera_lines_from_blocks, Block, CameraLine, RecordingMode, RecordingParameters,
};

use crate::accessory_resolver::{aggregate_lines, resolve_accessories, AccessoryLine};
use crate::catalog_store::Catalog;
use crate::equipment_recommender::{recommend_equipment, Recommendation};
use crate::sizing_engine::{compute_sizing, SizingResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Computation request: the wizard's current selection state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanRequest {
    pub blocks: Vec<Block>,
    #[serde(default)]
    pub recording: RecordingParameters,
}

/// Full computed plan for one selection state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectPlan {
    pub plan_id: Uuid,
    pub computed_at: DateTime<Utc>,
    pub camera_lines: Vec<CameraLine>,
    pub accessories: Vec<AccessoryLine>,
    pub sizing: SizingResult,
    pub recommendation: Recommendation,
}

/// Run one full computation pass over the request selection
pub fn compute_plan(request: &PlanRequest, catalog: &Catalog) -> crate::Result<ProjectPlan> {
    request.recording.validate()?;

    let camera_lines = camera_lines_from_blocks(&request.blocks);

    let mut accessory_lines = Vec::new();
    for block in request.blocks.iter().filter(|b| b.contributes()) {
        let camera_id = block.selected_camera_id.as_deref().unwrap_or("");
        accessory_lines.extend(resolve_accessories(block, catalog.variants_for(camera_id)));
    }
    let accessories = aggregate_lines(accessory_lines);

    let sizing = compute_sizing(&camera_lines, &request.recording, catalog);
    let recommendation = recommend_equipment(&sizing, &camera_lines, catalog);

    tracing::info!(
        blocks = request.blocks.len(),
        camera_lines = camera_lines.len(),
        accessories = accessories.len(),
        total_mbps = sizing.total_mbps,
        required_tb = sizing.required_tb,
        nvr = recommendation
            .nvr_pick
            .as_ref()
            .map(|n| n.id.as_str())
            .unwrap_or("none"),
        "Plan computed"
    );

    Ok(ProjectPlan {
        plan_id: Uuid::new_v4(),
        computed_at: Utc::now(),
        camera_lines,
        accessories,
        sizing,
        recommendation,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog_store::{
        normalize_accessory_map, normalize_cameras, normalize_drives, normalize_recorders,
        normalize_switches,
    };
    use crate::catalog_store::{AccessoryType, Codec};
    use crate::record_parser::parse_records;
    use crate::sizing_engine::BitrateSource;

    /// Catalog assembled through the real parse + normalize path
    fn scenario_catalog() -> Catalog {
        let cameras = normalize_cameras(&parse_records(
            "id,name,bitrate_h264_mbps,bitrate_h265_mbps,poe_watts\n\
             CAM1,Dome 4MP,6,4,7.5\n",
        ));
        let recorders = normalize_recorders(&parse_records(
            "id,name,channels,throughput_mbps,hdd_bays\nNVR4,4ch,4,40,1\nNVR8,8ch,8,80,2\n",
        ));
        let drives = normalize_drives(&parse_records("id,name,capacity_tb\nHDD6,6TB,6\n"));
        let switches = normalize_switches(&parse_records(
            "id,name,ports,poe_budget_watts\nSW8,8-port PoE,8,120\n",
        ));
        let accessory_map = normalize_accessory_map(&parse_records(
            "camera_id,junction_box_id,junction_box_name,wall_mount_id,wall_mount_name,wall_mount_stand_alone,ceiling_mount_id,ceiling_mount_name,ceiling_mount_stand_alone,qty,image_url_junction_box,datasheet_url_junction_box,image_url_wall_mount,datasheet_url_wall_mount,image_url_ceiling_mount,datasheet_url_ceiling_mount\n\
             CAM1,JB-1,Junction box,WM-1,Wall mount,true,,,,1,,,,,,\n",
        ));
        Catalog {
            cameras,
            recorders,
            drives,
            switches,
            accessory_map,
        }
    }

    fn scenario_request() -> PlanRequest {
        PlanRequest {
            blocks: vec![Block {
                id: "B1".to_string(),
                label: "Entrance".to_string(),
                selected_camera_id: Some("CAM1".to_string()),
                qty: 3,
                validated: true,
                answers: serde_json::Value::Null,
                mbps_override: None,
            }],
            recording: RecordingParameters {
                days_retention: 7,
                hours_per_day: 24,
                overhead_pct: 20.0,
                codec: Codec::H265,
                fps: 15.0,
                mode: RecordingMode::Continuous,
                motion_duty_cycle_pct: 40.0,
            },
        }
    }

    #[test]
    fn test_end_to_end_scenario() {
        let catalog = scenario_catalog();
        let plan = compute_plan(&scenario_request(), &catalog).unwrap();

        // 3 x 4 Mbps
        assert_eq!(plan.sizing.total_mbps, 12.0);
        assert_eq!(plan.sizing.per_camera.len(), 1);
        assert_eq!(plan.sizing.per_camera[0].source, BitrateSource::Catalog);
        // 12 Mbps * 7d * 24h / 8 = 0.9072 TB, * 1.2 overhead -> ceil 2
        assert_eq!(plan.sizing.required_tb, 2);

        // Junction box qty 3 and stand-alone wall mount qty 3
        assert_eq!(plan.accessories.len(), 2);
        let jb = plan
            .accessories
            .iter()
            .find(|a| a.kind == AccessoryType::JunctionBox)
            .unwrap();
        assert_eq!(jb.qty, 3);
        let wm = plan
            .accessories
            .iter()
            .find(|a| a.kind == AccessoryType::WallMount)
            .unwrap();
        assert_eq!(wm.qty, 3);
        assert!(wm.stand_alone);

        // 3 cameras: NVR4 qualifies (4ch, 40 Mbps, 6 TB bay) and is minimal
        assert_eq!(plan.recommendation.nvr_pick.as_ref().unwrap().id, "NVR4");
        // 3 + 1 uplink ports on one 8-port switch
        assert_eq!(plan.recommendation.switches.ports_needed, 4);
        assert!(plan.recommendation.switches.satisfied);
        assert_eq!(plan.recommendation.switches.total_ports, 8);
    }

    #[test]
    fn test_snapshot_round_trip_yields_identical_sizing() {
        let catalog = scenario_catalog();
        let request = scenario_request();
        let before = compute_plan(&request, &catalog).unwrap();

        let snap = crate::catalog_store::CatalogSnapshot::from_catalog(&catalog);
        let json = serde_json::to_string(&snap).unwrap();
        let restored: crate::catalog_store::CatalogSnapshot =
            serde_json::from_str(&json).unwrap();
        let after = compute_plan(&request, &restored.into_catalog()).unwrap();

        assert_eq!(before.sizing.total_mbps, after.sizing.total_mbps);
        assert_eq!(before.sizing.required_tb, after.sizing.required_tb);
        assert_eq!(before.accessories.len(), after.accessories.len());
        assert_eq!(
            before.recommendation.nvr_pick.as_ref().map(|n| &n.id),
            after.recommendation.nvr_pick.as_ref().map(|n| &n.id)
        );
    }

    #[test]
    fn test_invalid_recording_parameters_rejected() {
        let catalog = scenario_catalog();
        let mut request = scenario_request();
        request.recording.days_retention = 0;
        assert!(compute_plan(&request, &catalog).is_err());
    }

    #[test]
    fn test_empty_selection_computes_empty_plan() {
        let catalog = scenario_catalog();
        let request = PlanRequest {
            blocks: Vec::new(),
            recording: RecordingParameters::default(),
        };
        let plan = compute_plan(&request, &catalog).unwrap();
        assert!(plan.camera_lines.is_empty());
        assert!(plan.accessories.is_empty());
        assert_eq!(plan.sizing.required_tb, 0);
        assert!(plan.recommendation.nvr_pick.is_none());
        assert!(!plan.recommendation.switches.required);
    }
}
