//! EquipmentRecommender - NVR and switch/PoE selection
//!
//! ## Responsibilities
//!
//! - Minimal sufficient recorder pick (channels, throughput, bay storage)
//! - Switch combination search against port count and PoE power budget
//!
//! "Minimal sufficient" means the smallest-capacity entry that still meets
//! every requirement, not the cheapest or the highest-spec. Unmet
//! requirements are distinguished outcomes, never silently downgraded to
//! the largest available unit.

use crate::catalog_store::{Catalog, RecorderEntry, SwitchEntry};
use crate::plan_service::CameraLine;
use crate::sizing_engine::SizingResult;
use serde::{Deserialize, Serialize};

/// Upper bound on physical switch units per plan; larger installations
/// need a different product tier
const MAX_SWITCH_UNITS: usize = 8;

/// Selected recorder
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NvrPick {
    pub id: String,
    pub name: String,
    pub channels: u32,
    pub throughput_mbps: f64,
    /// Bay storage ceiling with the largest catalog drive in every bay
    pub max_storage_tb: f64,
    pub hdd_bays: u32,
}

/// One switch model with a unit count in the chosen combination
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SwitchUnit {
    pub switch_id: String,
    pub name: String,
    pub count: u32,
    pub ports: u32,
    pub poe_budget_watts: f64,
}

/// Switch/PoE plan for display
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SwitchPlan {
    pub required: bool,
    pub ports_needed: u32,
    /// Summed capacity of the chosen combination
    pub total_ports: u32,
    pub total_poe_budget_watts: f64,
    pub poe_draw_watts: f64,
    pub units: Vec<SwitchUnit>,
    /// False when no combination satisfies the requirements
    pub satisfied: bool,
}

/// Recommendation outcome. `nvr_pick = None` is an unmet requirement the
/// caller must render distinctly from a normal recommendation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendation {
    pub nvr_pick: Option<NvrPick>,
    pub switches: SwitchPlan,
    pub warnings: Vec<String>,
}

/// Select a recorder and the switch/PoE configuration for a sizing result
pub fn recommend_equipment(
    sizing: &SizingResult,
    lines: &[CameraLine],
    catalog: &Catalog,
) -> Recommendation {
    let mut warnings = Vec::new();
    let camera_count: u32 = lines.iter().map(|l| l.qty).sum();

    let nvr_pick = pick_recorder(sizing, camera_count, catalog, &mut warnings);
    let switches = plan_switches(camera_count, lines, catalog, &mut warnings);

    if nvr_pick.is_none() && camera_count > 0 {
        tracing::warn!(
            cameras = camera_count,
            total_mbps = sizing.total_mbps,
            required_tb = sizing.required_tb,
            "No catalog recorder satisfies the requirements"
        );
    }

    Recommendation {
        nvr_pick,
        switches,
        warnings,
    }
}

/// Complete recorder specs; rows with absent figures never qualify
/// (absent is not zero)
fn recorder_specs(entry: &RecorderEntry) -> Option<(u32, f64, u32)> {
    Some((entry.channels?, entry.throughput_mbps?, entry.hdd_bays?))
}

fn pick_recorder(
    sizing: &SizingResult,
    camera_count: u32,
    catalog: &Catalog,
    warnings: &mut Vec<String>,
) -> Option<NvrPick> {
    if camera_count == 0 {
        return None;
    }

    let max_drive_tb = catalog.max_drive_tb();
    if max_drive_tb.is_none() && sizing.required_tb > 0 {
        warnings.push(
            "drive catalog is empty, recorder storage capacity cannot be confirmed".to_string(),
        );
    }

    let mut best: Option<NvrPick> = None;
    for entry in &catalog.recorders {
        let (channels, throughput_mbps, hdd_bays) = match recorder_specs(entry) {
            Some(specs) => specs,
            None => {
                warnings.push(format!(
                    "recorder {} skipped: incomplete catalog specs",
                    entry.id
                ));
                continue;
            }
        };

        let max_storage_tb = hdd_bays as f64 * max_drive_tb.unwrap_or(0.0);
        let qualifies = channels >= camera_count
            && throughput_mbps >= sizing.total_mbps
            && max_storage_tb >= sizing.required_tb as f64;
        if !qualifies {
            continue;
        }

        let better = match &best {
            None => true,
            // Minimal sufficient: smallest channel capacity, ties broken
            // by smallest throughput rating
            Some(b) => {
                channels < b.channels
                    || (channels == b.channels && throughput_mbps < b.throughput_mbps)
            }
        };
        if better {
            best = Some(NvrPick {
                id: entry.id.clone(),
                name: entry.name.clone(),
                channels,
                throughput_mbps,
                max_storage_tb,
                hdd_bays,
            });
        }
    }

    best
}

fn switch_specs(entry: &SwitchEntry) -> Option<(u32, f64)> {
    let ports = entry.ports?;
    if ports == 0 {
        return None;
    }
    Some((ports, entry.poe_budget_watts?))
}

fn plan_switches(
    camera_count: u32,
    lines: &[CameraLine],
    catalog: &Catalog,
    warnings: &mut Vec<String>,
) -> SwitchPlan {
    // One port per camera plus the recorder uplink
    let ports_needed = if camera_count > 0 { camera_count + 1 } else { 0 };
    let required = ports_needed > 0;

    let mut poe_draw_watts = 0.0;
    if required {
        for line in lines {
            match catalog.camera(&line.camera_id).and_then(|c| c.poe_watts) {
                Some(watts) => poe_draw_watts += watts * line.qty as f64,
                None => warnings.push(format!(
                    "no PoE draw figure for camera {}, power budget understated",
                    line.camera_id
                )),
            }
        }
    }

    let mut plan = SwitchPlan {
        required,
        ports_needed,
        total_ports: 0,
        total_poe_budget_watts: 0.0,
        poe_draw_watts,
        units: Vec::new(),
        satisfied: !required,
    };
    if !required {
        return plan;
    }

    let candidates: Vec<(&SwitchEntry, u32, f64)> = catalog
        .switches
        .iter()
        .filter_map(|entry| {
            let (ports, poe) = match switch_specs(entry) {
                Some(specs) => Some(specs),
                None => {
                    warnings.push(format!(
                        "switch {} skipped: incomplete catalog specs",
                        entry.id
                    ));
                    None
                }
            }?;
            Some((entry, ports, poe))
        })
        .collect();

    match search_combination(&candidates, ports_needed, poe_draw_watts) {
        Some(combo) => {
            let mut units: Vec<SwitchUnit> = Vec::new();
            for idx in combo {
                let (entry, ports, poe) = candidates[idx];
                plan.total_ports += ports;
                plan.total_poe_budget_watts += poe;
                match units.iter_mut().find(|u| u.switch_id == entry.id) {
                    Some(unit) => unit.count += 1,
                    None => units.push(SwitchUnit {
                        switch_id: entry.id.clone(),
                        name: entry.name.clone(),
                        count: 1,
                        ports,
                        poe_budget_watts: poe,
                    }),
                }
            }
            plan.units = units;
            plan.satisfied = true;
        }
        None => {
            plan.satisfied = false;
            warnings.push(format!(
                "no switch combination covers {} ports and {:.0} W PoE",
                ports_needed, poe_draw_watts
            ));
        }
    }

    plan
}

/// Minimal multiset of candidate switches: fewest physical units first,
/// then smallest port surplus, then smallest PoE surplus. Bounded
/// exhaustive search; candidate sets are small (tens of models).
fn search_combination(
    candidates: &[(&SwitchEntry, u32, f64)],
    ports_needed: u32,
    poe_needed: f64,
) -> Option<Vec<usize>> {
    if candidates.is_empty() {
        return None;
    }

    let mut search = ComboSearch {
        candidates,
        size: 0,
        ports_needed,
        poe_needed,
        max_ports: candidates.iter().map(|c| c.1).max().unwrap_or(0),
        max_poe: candidates.iter().map(|c| c.2).fold(0.0, |a: f64, b| a.max(b)),
        best: None,
    };

    for size in 1..=MAX_SWITCH_UNITS {
        // Skip unit counts that cannot reach the requirement at all
        if (search.max_ports as u64) * (size as u64) < ports_needed as u64
            || search.max_poe * (size as f64) < poe_needed
        {
            continue;
        }
        search.size = size;
        search.extend(0, 0, 0.0, &mut Vec::with_capacity(size));
        if let Some((_, _, indices)) = search.best.take() {
            return Some(indices);
        }
    }

    None
}

struct ComboSearch<'a> {
    candidates: &'a [(&'a SwitchEntry, u32, f64)],
    size: usize,
    ports_needed: u32,
    poe_needed: f64,
    max_ports: u32,
    max_poe: f64,
    /// (port surplus, poe surplus, indices) of the best combination so far
    best: Option<(u32, f64, Vec<usize>)>,
}

impl ComboSearch<'_> {
    fn extend(&mut self, start: usize, ports_sum: u32, poe_sum: f64, combo: &mut Vec<usize>) {
        if combo.len() == self.size {
            if ports_sum >= self.ports_needed && poe_sum >= self.poe_needed {
                let port_surplus = ports_sum - self.ports_needed;
                let poe_surplus = poe_sum - self.poe_needed;
                let better = match &self.best {
                    None => true,
                    Some((bp, bw, _)) => {
                        port_surplus < *bp || (port_surplus == *bp && poe_surplus < *bw)
                    }
                };
                if better {
                    self.best = Some((port_surplus, poe_surplus, combo.clone()));
                }
            }
            return;
        }

        // Prune branches that cannot reach the requirement anymore
        let remaining = (self.size - combo.len()) as u64;
        if (ports_sum as u64) + remaining * (self.max_ports as u64) < self.ports_needed as u64 {
            return;
        }
        if poe_sum + remaining as f64 * self.max_poe < self.poe_needed {
            return;
        }

        // Non-decreasing indices enumerate multisets without permutations
        for idx in start..self.candidates.len() {
            combo.push(idx);
            self.extend(
                idx,
                ports_sum + self.candidates[idx].1,
                poe_sum + self.candidates[idx].2,
                combo,
            );
            combo.pop();
        }
    }
}
