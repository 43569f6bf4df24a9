//! Core domain models for packcraft
//!
//! This crate contains:
//! - Gear and trip models (GearItem, Category, TripSettings)
//! - AI-derived state shapes (PackAnalysis, SuggestedItem)
//! - The built-in gear catalog and curated presets
//! - Chat and snapshot records

pub mod analysis;
pub mod catalog;
pub mod chat;
pub mod gear;
pub mod preset;
pub mod snapshot;
pub mod trip;

pub use analysis::{PackAnalysis, SuggestedItem};
pub use catalog::{browse, default_catalog, default_presets, SortKey};
pub use chat::{AiStatus, ChatMessage, Role};
pub use gear::{Category, GearItem};
pub use preset::Preset;
pub use snapshot::WeightSnapshot;
pub use trip::{
    Environment, PackStyle, Season, TripSettings, TripType, WaterAvailability, Weather,
};
