//! Built-in gear catalog and curated presets
//!
//! Catalog entries are templates. Anything added to a pack goes through
//! [`GearItem::instantiate`] so pack instances never share ids with the
//! catalog.

use crate::gear::{Category, GearItem};
use crate::preset::Preset;
use crate::trip::{
    Environment, PackStyle, Season, TripSettings, TripType, WaterAvailability, Weather,
};
use std::str::FromStr;

fn entry(
    id: &str,
    name: &str,
    category: Category,
    weight_g: f64,
    consumable: bool,
    worn: bool,
    notes: Option<&str>,
) -> GearItem {
    GearItem {
        id: id.to_string(),
        name: name.to_string(),
        category,
        weight_g,
        consumable,
        worn,
        notes: notes.map(str::to_string),
    }
}

/// The default gear library
pub fn default_catalog() -> Vec<GearItem> {
    use Category::*;
    vec![
        // Shelter
        entry("ul-tent", "Ultralight Tent (1p)", Shelter, 800.0, false, false, Some("Double wall")),
        entry("tarp-bivy", "Tarp & Bivy Combo", Shelter, 450.0, false, false, None),
        entry("hammock", "Hammock Setup", Shelter, 950.0, false, false, None),
        entry("stakes", "Tent Stakes (6)", Shelter, 80.0, false, false, None),
        // Sleep
        entry("down-quilt", "Down Quilt (0°C)", Sleep, 600.0, false, false, None),
        entry("sleeping-bag", "Sleeping Bag (-5°C)", Sleep, 1100.0, false, false, None),
        entry("inflatable-pad", "Inflatable Pad (R3.5)", Sleep, 350.0, false, false, None),
        entry("foam-pad", "Foam Pad (CCF)", Sleep, 250.0, false, false, None),
        entry("pillow", "Inflatable Pillow", Sleep, 60.0, false, false, None),
        // Clothing
        entry("rain-jacket", "Rain Jacket", Clothing, 200.0, false, false, None),
        entry("puffy", "Puffy Jacket (Down)", Clothing, 300.0, false, false, None),
        entry("fleece", "Fleece Midlayer", Clothing, 350.0, false, false, None),
        entry("hiking-shirt", "Hiking Shirt", Clothing, 150.0, false, true, None),
        entry("hiking-pants", "Hiking Pants", Clothing, 300.0, false, true, None),
        entry("extra-socks", "Extra Socks", Clothing, 60.0, false, false, None),
        entry("base-layer", "Base Layer (Top)", Clothing, 180.0, false, false, None),
        // Cooking
        entry("canister-stove", "Canister Stove", Cooking, 80.0, false, false, None),
        entry("ti-pot", "Titanium Pot (750ml)", Cooking, 100.0, false, false, None),
        entry("spork", "Spork", Cooking, 15.0, false, false, None),
        entry("fuel-canister", "Fuel Canister (Small)", Cooking, 200.0, true, false, None),
        entry("food-day", "Food (per day)", Cooking, 700.0, true, false, None),
        // Water
        entry("water-filter", "Water Filter (Squeeze)", Water, 80.0, false, false, None),
        entry("bottle-1l", "Smartwater Bottle (1L)", Water, 40.0, false, false, None),
        entry("bladder-2l", "Water Bladder (2L)", Water, 150.0, false, false, None),
        entry("chlorine-tabs", "Chlorine Tabs", Water, 10.0, false, false, None),
        entry("water-1l", "Water (1L)", Water, 1000.0, true, false, None),
        // Safety
        entry("first-aid", "First Aid Kit (Basic)", Safety, 150.0, false, false, None),
        entry("headlamp", "Headlamp", Safety, 90.0, false, false, None),
        entry("knife", "Mini Knife", Safety, 40.0, false, false, None),
        entry("fire-starter", "Fire Starter", Safety, 25.0, false, false, None),
        entry("compass", "Compass", Safety, 30.0, false, false, None),
        entry("sat-messenger", "Satellite Messenger", Safety, 120.0, false, false, None),
        // Electronics
        entry("power-bank", "Power Bank (10k mAh)", Electronics, 200.0, false, false, None),
        entry("cables", "Charging Cables", Electronics, 50.0, false, false, None),
        entry("phone", "Smartphone", Electronics, 200.0, false, false, None),
        // Misc
        entry("trekking-poles", "Trekking Poles", Misc, 500.0, false, false, None),
        entry("trowel", "Trowel", Misc, 20.0, false, false, None),
        entry("toilet-paper", "Toilet Paper", Misc, 50.0, true, false, None),
        entry("backpack-40l", "Backpack (40L)", Misc, 900.0, false, false, None),
    ]
}

/// Curated starter presets
pub fn default_presets() -> Vec<Preset> {
    vec![
        Preset {
            id: "day-hike".to_string(),
            name: "Day Hike".to_string(),
            description: "Essentials for a safe day out.".to_string(),
            settings: TripSettings {
                trip_type: TripType::DayHike,
                low_temp_c: 15,
                distance_per_day_km: 10.0,
                ..TripSettings::default()
            },
            item_ids: ["rain-jacket", "bottle-1l", "first-aid", "headlamp", "phone", "spork", "food-day"]
                .map(String::from)
                .to_vec(),
        },
        Preset {
            id: "overnight".to_string(),
            name: "Overnight".to_string(),
            description: "Standard 3-season camping setup.".to_string(),
            settings: TripSettings {
                distance_per_day_km: 12.0,
                ..TripSettings::default()
            },
            item_ids: [
                "ul-tent", "down-quilt", "inflatable-pad", "pillow", "rain-jacket", "fleece",
                "canister-stove", "ti-pot", "spork", "fuel-canister", "food-day", "water-filter",
                "bottle-1l", "first-aid", "headlamp", "backpack-40l",
            ]
            .map(String::from)
            .to_vec(),
        },
        Preset {
            id: "weekend".to_string(),
            name: "Weekend Trip".to_string(),
            description: "2-night trip in mixed terrain.".to_string(),
            settings: TripSettings {
                trip_type: TripType::MultiDay,
                environment: Environment::Mixed,
                season: Season::Shoulder,
                low_temp_c: 5,
                water: WaterAvailability::Frequent,
                pack_style: PackStyle::Balanced,
                weather: Weather::Clear,
                ..TripSettings::default()
            },
            item_ids: [
                "ul-tent", "down-quilt", "inflatable-pad", "rain-jacket", "puffy", "extra-socks",
                "canister-stove", "ti-pot", "spork", "fuel-canister", "food-day", "water-filter",
                "bottle-1l", "first-aid", "headlamp", "power-bank", "backpack-40l",
            ]
            .map(String::from)
            .to_vec(),
        },
    ]
}

/// Catalog sort order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    Name,
    Weight,
    #[default]
    Category,
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "name" => Ok(SortKey::Name),
            "weight" => Ok(SortKey::Weight),
            "category" => Ok(SortKey::Category),
            other => Err(format!("unknown sort key: {}", other)),
        }
    }
}

/// Filter and sort catalog entries for display
pub fn browse(
    catalog: &[GearItem],
    search: Option<&str>,
    category: Option<Category>,
    sort: SortKey,
) -> Vec<GearItem> {
    let needle = search.map(str::to_lowercase);
    let mut items: Vec<GearItem> = catalog
        .iter()
        .filter(|item| {
            let matches_search = needle
                .as_deref()
                .map(|n| item.name.to_lowercase().contains(n))
                .unwrap_or(true);
            let matches_category = category.map(|c| item.category == c).unwrap_or(true);
            matches_search && matches_category
        })
        .cloned()
        .collect();

    match sort {
        SortKey::Name => items.sort_by(|a, b| a.name.cmp(&b.name)),
        SortKey::Weight => {
            items.sort_by(|a, b| {
                a.sanitized_weight()
                    .partial_cmp(&b.sanitized_weight())
                    .unwrap_or(std::cmp::Ordering::Equal)
            });
        }
        SortKey::Category => items.sort_by(|a, b| a.category.name().cmp(b.category.name())),
    }

    items
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_ids_are_unique() {
        let catalog = default_catalog();
        let mut ids: Vec<&str> = catalog.iter().map(|i| i.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), catalog.len());
    }

    #[test]
    fn every_preset_id_resolves_in_catalog() {
        let catalog = default_catalog();
        for preset in default_presets() {
            for id in &preset.item_ids {
                assert!(
                    catalog.iter().any(|i| &i.id == id),
                    "preset {} references unknown item {}",
                    preset.id,
                    id
                );
            }
        }
    }

    #[test]
    fn browse_filters_by_search_and_category() {
        let catalog = default_catalog();
        let hits = browse(&catalog, Some("tent"), None, SortKey::Name);
        assert!(hits.iter().all(|i| i.name.to_lowercase().contains("tent")));
        assert!(!hits.is_empty());

        let water = browse(&catalog, None, Some(Category::Water), SortKey::Weight);
        assert!(water.iter().all(|i| i.category == Category::Water));
        // Sorted ascending by weight
        assert!(water.windows(2).all(|w| w[0].weight_g <= w[1].weight_g));
    }

    #[test]
    fn browse_with_no_filters_returns_everything() {
        let catalog = default_catalog();
        let all = browse(&catalog, None, None, SortKey::Category);
        assert_eq!(all.len(), catalog.len());
    }
}
