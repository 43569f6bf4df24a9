//! Curated loadout presets

use crate::trip::TripSettings;
use serde::{Deserialize, Serialize};

/// A named starter loadout: settings plus catalog item references.
/// Applying a preset replaces both wholesale; item ids not present in the
/// catalog are silently skipped.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Preset {
    pub id: String,
    pub name: String,
    pub description: String,
    pub settings: TripSettings,
    pub item_ids: Vec<String>,
}
