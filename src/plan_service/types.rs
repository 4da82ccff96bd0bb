//! PlanService data types
//!
//! Wizard-side selection state (blocks) and recording parameters arrive as
//! request payloads; everything derived from them is rebuilt per pass.

use crate::catalog_store::Codec;
use serde::{Deserialize, Serialize};

/// A user-declared physical camera location.
///
/// Created and mutated by the wizard frontend only; the engine treats it as
/// read-only input. A block contributes to sizing and accessories only when
/// it is validated with a selected camera.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Block {
    pub id: String,
    pub label: String,
    pub selected_camera_id: Option<String>,
    pub qty: u32,
    pub validated: bool,
    /// Free-form selection-narrowing criteria from the wizard steps
    #[serde(default)]
    pub answers: serde_json::Value,
    /// Explicit per-camera bitrate override (Mbps), outranks the catalog
    #[serde(default)]
    pub mbps_override: Option<f64>,
}

impl Block {
    /// Whether this block contributes to the computation pass
    pub fn contributes(&self) -> bool {
        self.validated && self.selected_camera_id.is_some() && self.qty > 0
    }
}

/// Derived (camera, quantity) pair, one per contributing block.
/// Regenerated from validated blocks on every recompute.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CameraLine {
    pub camera_id: String,
    pub from_block_id: String,
    pub qty: u32,
    pub mbps_override: Option<f64>,
}

/// Derive camera lines from the current blocks. Unvalidated or empty
/// blocks simply drop out; that is a normal state, not an error.
pub fn camera_lines_from_blocks(blocks: &[Block]) -> Vec<CameraLine> {
    blocks
        .iter()
        .filter(|b| b.contributes())
        .map(|b| CameraLine {
            camera_id: b.selected_camera_id.clone().unwrap_or_default(),
            from_block_id: b.id.clone(),
            qty: b.qty,
            mbps_override: b.mbps_override,
        })
        .collect()
}

/// Recording mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordingMode {
    Continuous,
    MotionTriggered,
}

impl Default for RecordingMode {
    fn default() -> Self {
        Self::Continuous
    }
}

/// Recording configuration for one computation pass
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordingParameters {
    pub days_retention: u32,
    pub hours_per_day: u32,
    /// Headroom applied last, on top of the full raw requirement
    pub overhead_pct: f64,
    pub codec: Codec,
    pub fps: f64,
    pub mode: RecordingMode,
    /// Effective recording duty (%) when mode is motion_triggered
    #[serde(default = "default_motion_duty_cycle")]
    pub motion_duty_cycle_pct: f64,
}

fn default_motion_duty_cycle() -> f64 {
    40.0
}

impl Default for RecordingParameters {
    fn default() -> Self {
        Self {
            days_retention: 30,
            hours_per_day: 24,
            overhead_pct: 20.0,
            codec: Codec::default(),
            fps: 15.0,
            mode: RecordingMode::default(),
            motion_duty_cycle_pct: default_motion_duty_cycle(),
        }
    }
}

impl RecordingParameters {
    /// Range-check the caller-supplied parameters
    pub fn validate(&self) -> crate::Result<()> {
        if self.days_retention < 1 {
            return Err(crate::Error::Validation(
                "days_retention must be >= 1".to_string(),
            ));
        }
        if self.hours_per_day < 1 || self.hours_per_day > 24 {
            return Err(crate::Error::Validation(
                "hours_per_day must be within 1-24".to_string(),
            ));
        }
        if self.overhead_pct < 0.0 {
            return Err(crate::Error::Validation(
                "overhead_pct must be >= 0".to_string(),
            ));
        }
        if self.fps <= 0.0 {
            return Err(crate::Error::Validation("fps must be > 0".to_string()));
        }
        if !(0.0..=100.0).contains(&self.motion_duty_cycle_pct) {
            return Err(crate::Error::Validation(
                "motion_duty_cycle_pct must be within 0-100".to_string(),
            ));
        }
        Ok(())
    }

    /// Fraction of configured hours actually recorded
    pub fn duty_factor(&self) -> f64 {
        match self.mode {
            RecordingMode::Continuous => 1.0,
            RecordingMode::MotionTriggered => self.motion_duty_cycle_pct / 100.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(id: &str, camera: Option<&str>, qty: u32, validated: bool) -> Block {
        Block {
            id: id.to_string(),
            label: format!("Block {}", id),
            selected_camera_id: camera.map(|c| c.to_string()),
            qty,
            validated,
            answers: serde_json::Value::Null,
            mbps_override: None,
        }
    }

    #[test]
    fn test_only_validated_blocks_with_camera_contribute() {
        let blocks = vec![
            block("B1", Some("CAM1"), 3, true),
            block("B2", Some("CAM2"), 2, false),
            block("B3", None, 4, true),
            block("B4", Some("CAM1"), 0, true),
        ];
        let lines = camera_lines_from_blocks(&blocks);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].camera_id, "CAM1");
        assert_eq!(lines[0].from_block_id, "B1");
        assert_eq!(lines[0].qty, 3);
    }

    #[test]
    fn test_same_camera_in_two_blocks_stays_two_lines() {
        let blocks = vec![
            block("B1", Some("CAM1"), 3, true),
            block("B2", Some("CAM1"), 2, true),
        ];
        let lines = camera_lines_from_blocks(&blocks);
        assert_eq!(lines.len(), 2);
    }

    #[test]
    fn test_recording_parameters_validation() {
        let mut params = RecordingParameters::default();
        assert!(params.validate().is_ok());

        params.days_retention = 0;
        assert!(params.validate().is_err());

        params = RecordingParameters::default();
        params.hours_per_day = 25;
        assert!(params.validate().is_err());

        params = RecordingParameters::default();
        params.fps = 0.0;
        assert!(params.validate().is_err());

        params = RecordingParameters::default();
        params.overhead_pct = -1.0;
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_duty_factor() {
        let mut params = RecordingParameters::default();
        assert_eq!(params.duty_factor(), 1.0);
        params.mode = RecordingMode::MotionTriggered;
        params.motion_duty_cycle_pct = 25.0;
        assert_eq!(params.duty_factor(), 0.25);
    }
}
