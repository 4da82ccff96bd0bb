//! IS24 CamSizer Library
//!
//! aranea Installation Sizing engine (aISe)
//!
//! ## Architecture (7 Components)
//!
//! 1. RecordParser - Delimited catalog text parsing
//! 2. CatalogStore - SSoT for cameras, recorders, drives, switches, mappings
//! 3. AccessoryResolver - Camera to mounting accessory compatibility
//! 4. SizingEngine - Bandwidth and storage capacity calculation
//! 5. EquipmentRecommender - NVR and switch/PoE selection
//! 6. PlanService - Full computation pass over a selection
//! 7. WebAPI - REST API endpoints
//!
//! ## Design Principles
//!
//! - SSoT: CatalogStore is the single source of truth
//! - Pure passes: every recompute is a fresh function of catalog +
//!   selection, no incremental state
//! - Expected absences are values, not errors

pub mod accessory_resolver;
pub mod catalog_store;
pub mod equipment_recommender;
pub mod error;
pub mod models;
pub mod plan_service;
pub mod record_parser;
pub mod sizing_engine;
pub mod state;
pub mod web_api;

pub use error::{Error, Result};
pub use state::AppState;
