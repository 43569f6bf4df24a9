//! Gear item domain model

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Fixed set of gear categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Shelter,
    Sleep,
    Clothing,
    Cooking,
    Water,
    Safety,
    Electronics,
    Misc,
}

impl Category {
    /// All categories in display order
    pub const ALL: [Category; 8] = [
        Category::Shelter,
        Category::Sleep,
        Category::Clothing,
        Category::Cooking,
        Category::Water,
        Category::Safety,
        Category::Electronics,
        Category::Misc,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Category::Shelter => "Shelter",
            Category::Sleep => "Sleep",
            Category::Clothing => "Clothing",
            Category::Cooking => "Cooking",
            Category::Water => "Water",
            Category::Safety => "Safety",
            Category::Electronics => "Electronics",
            Category::Misc => "Misc",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .iter()
            .find(|c| c.name().eq_ignore_ascii_case(s))
            .copied()
            .ok_or_else(|| format!("unknown category: {}", s))
    }
}

/// A single piece of gear, either a catalog template or a pack instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GearItem {
    pub id: String,
    pub name: String,
    pub category: Category,
    /// Weight in grams
    pub weight_g: f64,
    /// Food, water, fuel: counts toward total weight but not base weight
    pub consumable: bool,
    /// Worn clothing: also excluded from base weight
    pub worn: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl GearItem {
    /// Weight with invalid values coerced to 0
    ///
    /// Weights arriving from external sources can be NaN or negative.
    /// All aggregation goes through this.
    pub fn sanitized_weight(&self) -> f64 {
        if self.weight_g.is_finite() && self.weight_g >= 0.0 {
            self.weight_g
        } else {
            0.0
        }
    }

    /// Build a user-entered item with a freshly generated id
    pub fn custom(name: impl Into<String>, category: Category, weight_g: f64) -> GearItem {
        GearItem {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.into(),
            category,
            weight_g,
            consumable: false,
            worn: false,
            notes: None,
        }
    }

    /// Copy this item into a pack instance with a freshly generated id
    ///
    /// Catalog items are templates, never shared: mutating a pack instance
    /// must not touch the catalog.
    pub fn instantiate(&self) -> GearItem {
        GearItem {
            id: uuid::Uuid::new_v4().to_string(),
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(weight: f64) -> GearItem {
        GearItem {
            id: "t".to_string(),
            name: "Test".to_string(),
            category: Category::Misc,
            weight_g: weight,
            consumable: false,
            worn: false,
            notes: None,
        }
    }

    #[test]
    fn sanitizes_bad_weights() {
        assert_eq!(item(f64::NAN).sanitized_weight(), 0.0);
        assert_eq!(item(f64::INFINITY).sanitized_weight(), 0.0);
        assert_eq!(item(-10.0).sanitized_weight(), 0.0);
        assert_eq!(item(120.0).sanitized_weight(), 120.0);
    }

    #[test]
    fn instantiate_assigns_fresh_ids() {
        let template = item(100.0);
        let a = template.instantiate();
        let b = template.instantiate();
        assert_ne!(a.id, template.id);
        assert_ne!(a.id, b.id);
        assert_eq!(a.name, template.name);
    }

    #[test]
    fn category_round_trips_from_str() {
        for cat in Category::ALL {
            assert_eq!(cat.name().parse::<Category>().unwrap(), cat);
        }
        assert!("Food".parse::<Category>().is_err());
    }
}
