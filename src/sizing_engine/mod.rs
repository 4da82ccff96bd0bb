//! SizingEngine - bandwidth and storage capacity calculation
//!
//! ## Responsibilities
//!
//! - Per-camera bitrate resolution (override > catalog > missing)
//! - Aggregate bandwidth totals
//! - Retention storage requirement, ceiling-rounded to whole terabytes
//!
//! Pure functions of (camera lines, recording parameters, catalog); every
//! pass allocates a fresh result and mutates nothing.

use crate::catalog_store::Catalog;
use crate::plan_service::{CameraLine, RecordingParameters};
use serde::{Deserialize, Serialize};

/// Where a per-camera bitrate figure came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BitrateSource {
    Override,
    Catalog,
    /// No override and no catalog figure; contributes 0 Mbps and must be
    /// surfaced as a warning, never silently understated
    Missing,
}

/// Sizing of one camera line
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerCameraSizing {
    pub camera_id: String,
    pub from_block_id: String,
    pub qty: u32,
    pub mbps_per_cam: f64,
    pub mbps_line: f64,
    pub source: BitrateSource,
}

/// Result of one sizing pass
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SizingResult {
    pub per_camera: Vec<PerCameraSizing>,
    pub total_mbps: f64,
    /// Whole terabytes, ceiling-rounded
    pub required_tb: u64,
    pub warnings: Vec<String>,
}

const SECONDS_PER_HOUR: f64 = 3600.0;
/// Decimal terabyte: 10^6 megabytes
const MEGABYTES_PER_TB: f64 = 1_000_000.0;

/// Compute per-camera bitrates, aggregate bandwidth, and required storage
pub fn compute_sizing(
    lines: &[CameraLine],
    params: &RecordingParameters,
    catalog: &Catalog,
) -> SizingResult {
    let mut per_camera = Vec::with_capacity(lines.len());
    let mut warnings = Vec::new();
    let mut total_mbps = 0.0;

    for line in lines {
        let (mbps_per_cam, source) = resolve_bitrate(line, params, catalog, &mut warnings);
        let mbps_line = mbps_per_cam * line.qty as f64;
        total_mbps += mbps_line;

        per_camera.push(PerCameraSizing {
            camera_id: line.camera_id.clone(),
            from_block_id: line.from_block_id.clone(),
            qty: line.qty,
            mbps_per_cam,
            mbps_line,
            source,
        });
    }

    let required_tb = required_terabytes(total_mbps, params);

    tracing::debug!(
        lines = per_camera.len(),
        total_mbps = total_mbps,
        required_tb = required_tb,
        "Sizing pass computed"
    );

    SizingResult {
        per_camera,
        total_mbps,
        required_tb,
        warnings,
    }
}

fn resolve_bitrate(
    line: &CameraLine,
    params: &RecordingParameters,
    catalog: &Catalog,
    warnings: &mut Vec<String>,
) -> (f64, BitrateSource) {
    if let Some(mbps) = line.mbps_override {
        return (mbps, BitrateSource::Override);
    }

    let catalog_mbps = catalog
        .camera(&line.camera_id)
        .and_then(|c| c.bitrate_for(params.codec));
    match catalog_mbps {
        Some(mbps) => (mbps, BitrateSource::Catalog),
        None => {
            warnings.push(format!(
                "no bitrate for camera {} at codec {}, total bandwidth understated",
                line.camera_id, params.codec
            ));
            (0.0, BitrateSource::Missing)
        }
    }
}

/// Convert aggregate Mbps over the retention window into whole terabytes.
///
/// Overhead headroom applies last, on the full raw requirement. The
/// result is always rounded up: storage must never be under-provisioned.
pub fn required_terabytes(total_mbps: f64, params: &RecordingParameters) -> u64 {
    let recorded_seconds = params.hours_per_day as f64
        * SECONDS_PER_HOUR
        * params.days_retention as f64
        * params.duty_factor();
    let megabytes = total_mbps * recorded_seconds / 8.0;
    let raw_tb = megabytes / MEGABYTES_PER_TB;
    let with_overhead = raw_tb * (1.0 + params.overhead_pct / 100.0);
    with_overhead.ceil() as u64
}
