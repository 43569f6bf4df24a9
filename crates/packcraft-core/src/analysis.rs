//! AI-derived analysis shapes
//!
//! These mirror the structured JSON the advisor returns. Field names stay
//! camelCase on the wire.

use crate::gear::Category;
use serde::{Deserialize, Serialize};

/// Qualitative pack analysis, replaced wholesale after each reconciliation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackAnalysis {
    /// Instance ids the advisor considers survival/safety critical
    #[serde(default)]
    pub essential_item_ids: Vec<String>,
    /// Free-text category gaps, e.g. "No Rain Gear"
    #[serde(default)]
    pub missing_categories: Vec<String>,
    /// Critical safety risks
    #[serde(default)]
    pub red_flags: Vec<String>,
    /// One of Ultralight / Lightweight / Traditional / Heavy, or "Unknown"
    #[serde(default)]
    pub weight_assessment: String,
}

impl PackAnalysis {
    /// Safe default used when the external call fails or returns bad JSON
    pub fn unknown() -> Self {
        Self {
            essential_item_ids: Vec::new(),
            missing_categories: Vec::new(),
            red_flags: Vec::new(),
            weight_assessment: "Unknown".to_string(),
        }
    }
}

/// Advisor-proposed item not yet in the pack
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestedItem {
    pub name: String,
    pub category: Category,
    /// Approximate weight in grams, 0 when the advisor omits it
    #[serde(default, rename = "weight")]
    pub weight_g: f64,
    /// Human-readable range, e.g. "600-900g"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight_display: Option<String>,
    pub reason: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_analysis_is_empty() {
        let a = PackAnalysis::unknown();
        assert!(a.essential_item_ids.is_empty());
        assert!(a.red_flags.is_empty());
        assert_eq!(a.weight_assessment, "Unknown");
    }

    #[test]
    fn analysis_parses_camel_case() {
        let json = r#"{
            "essentialItemIds": ["a", "b"],
            "missingCategories": ["No Rain Gear"],
            "redFlags": [],
            "weightAssessment": "Lightweight"
        }"#;
        let a: PackAnalysis = serde_json::from_str(json).unwrap();
        assert_eq!(a.essential_item_ids, vec!["a", "b"]);
        assert_eq!(a.weight_assessment, "Lightweight");
    }

    #[test]
    fn suggestion_defaults_missing_weight_to_zero() {
        let json = r#"{"name": "Rain Jacket", "category": "Clothing", "reason": "Rain forecast"}"#;
        let s: SuggestedItem = serde_json::from_str(json).unwrap();
        assert_eq!(s.weight_g, 0.0);
        assert!(s.weight_display.is_none());
    }
}
