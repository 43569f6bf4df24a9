//! Pure weight derivations over a pack
//!
//! Everything here is deterministic and side-effect free: safe to call on
//! every state change without memoization. The threshold constants are
//! product decisions, not derived from physics; do not re-tune them.

use packcraft_core::{Category, GearItem, PackStyle, Season, TripSettings, TripType};
use serde::{Deserialize, Serialize};

/// Per-category weight sum (zero-total categories excluded)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySlice {
    pub category: Category,
    pub grams: f64,
}

/// Derived weight statistics for a pack under given trip settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightStats {
    /// Sum of all item weights
    pub total_g: f64,
    /// Total excluding consumables and worn clothing
    pub base_g: f64,
    /// Target ceiling for the chosen pack style, grams
    pub target_max_g: f64,
    /// How full the target is, 0..=100
    pub weight_percent: f64,
    /// Ultralight score, 0..=100 (100 = at or under the UL threshold)
    pub ul_score: u32,
    /// Top 3 items by weight, heaviest first, stable ties
    pub heaviest: Vec<GearItem>,
    pub by_category: Vec<CategorySlice>,
}

/// Compute all derived statistics for the pack
pub fn compute(items: &[GearItem], settings: &TripSettings) -> WeightStats {
    let total_g: f64 = items.iter().map(GearItem::sanitized_weight).sum();
    let base_g: f64 = items
        .iter()
        .filter(|i| !i.consumable && !i.worn)
        .map(GearItem::sanitized_weight)
        .sum();

    let target_max_g = target_max(settings);
    let weight_percent = weight_percent(total_g, target_max_g);
    let ul_score = ul_score(items, base_g, settings);

    let mut by_weight: Vec<GearItem> = items.to_vec();
    // Stable sort keeps insertion order for equal weights
    by_weight.sort_by(|a, b| {
        b.sanitized_weight()
            .partial_cmp(&a.sanitized_weight())
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    by_weight.truncate(3);

    let by_category = Category::ALL
        .iter()
        .map(|&category| CategorySlice {
            category,
            grams: items
                .iter()
                .filter(|i| i.category == category)
                .map(GearItem::sanitized_weight)
                .sum(),
        })
        .filter(|slice| slice.grams > 0.0)
        .collect();

    WeightStats {
        total_g,
        base_g,
        target_max_g,
        weight_percent,
        ul_score,
        heaviest: by_weight,
        by_category,
    }
}

/// Target ceiling in grams for the chosen pack style
pub fn target_max(settings: &TripSettings) -> f64 {
    let mut max = match settings.pack_style {
        PackStyle::Ultralight => 5000.0,
        PackStyle::Balanced => 8000.0,
        PackStyle::Comfort => 12000.0,
    };
    if settings.trip_type == TripType::MultiDay {
        max += 2000.0;
    }
    max
}

fn weight_percent(total_g: f64, target_max_g: f64) -> f64 {
    if target_max_g <= 0.0 {
        return 0.0;
    }
    let percent = total_g / target_max_g * 100.0;
    if !percent.is_finite() {
        return 0.0;
    }
    percent.clamp(0.0, 100.0)
}

/// Linear penalty: every 100g of base weight over the threshold costs a point
fn ul_score(items: &[GearItem], base_g: f64, settings: &TripSettings) -> u32 {
    if items.is_empty() {
        return 100;
    }
    let mut threshold = 4500.0;
    if settings.trip_type == TripType::MultiDay {
        threshold += 1500.0;
    }
    if settings.season == Season::Winter {
        threshold += 2000.0;
    }

    let diff = (base_g - threshold).max(0.0);
    let score = (100.0 - diff / 100.0).max(0.0);
    if !score.is_finite() {
        return 0;
    }
    score.round() as u32
}

/// Grams below 1kg, otherwise kilograms with two decimals
pub fn format_weight(grams: f64) -> String {
    if !grams.is_finite() {
        return "0 g".to_string();
    }
    if grams >= 1000.0 {
        format!("{:.2} kg", grams / 1000.0)
    } else {
        format!("{:.0} g", grams)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use packcraft_core::{Environment, WaterAvailability, Weather};

    fn item(name: &str, weight: f64, consumable: bool, worn: bool) -> GearItem {
        GearItem {
            id: format!("id-{}", name),
            name: name.to_string(),
            category: Category::Misc,
            weight_g: weight,
            consumable,
            worn,
            notes: None,
        }
    }

    fn settings(style: PackStyle, trip: TripType, season: Season) -> TripSettings {
        TripSettings {
            trip_type: trip,
            environment: Environment::Forest,
            season,
            low_temp_c: 10,
            distance_per_day_km: 15.0,
            water: WaterAvailability::Occasional,
            location: String::new(),
            pack_style: style,
            weather: Weather::Clear,
            party_size: 1,
        }
    }

    #[test]
    fn worked_overnight_example() {
        let items = vec![
            item("tent", 800.0, false, false),
            item("food", 1000.0, true, false),
        ];
        let s = settings(PackStyle::Ultralight, TripType::Overnight, Season::Summer);
        let stats = compute(&items, &s);
        assert_eq!(stats.total_g, 1800.0);
        assert_eq!(stats.base_g, 800.0);
        assert_eq!(stats.target_max_g, 5000.0);
        assert_eq!(stats.weight_percent, 36.0);
    }

    #[test]
    fn empty_pack_defaults() {
        let s = settings(PackStyle::Balanced, TripType::Overnight, Season::Summer);
        let stats = compute(&[], &s);
        assert_eq!(stats.total_g, 0.0);
        assert_eq!(stats.ul_score, 100);
        assert_eq!(stats.weight_percent, 0.0);
        assert!(stats.heaviest.is_empty());
        assert!(stats.by_category.is_empty());
    }

    #[test]
    fn total_is_at_least_base() {
        let items = vec![
            item("pack", 900.0, false, false),
            item("shirt", 150.0, false, true),
            item("food", 700.0, true, false),
            item("broken", f64::NAN, false, false),
        ];
        let s = settings(PackStyle::Comfort, TripType::DayHike, Season::Summer);
        let stats = compute(&items, &s);
        assert!(stats.total_g >= stats.base_g);
        assert_eq!(stats.total_g, 1750.0);
        assert_eq!(stats.base_g, 900.0);
    }

    #[test]
    fn target_max_adjusts_for_style_and_trip_type() {
        let ul = settings(PackStyle::Ultralight, TripType::Overnight, Season::Summer);
        let comfort = settings(PackStyle::Comfort, TripType::MultiDay, Season::Summer);
        assert_eq!(target_max(&ul), 5000.0);
        assert_eq!(target_max(&comfort), 14000.0);
    }

    #[test]
    fn weight_percent_is_bounded() {
        let heavy = vec![item("anvil", 1_000_000.0, false, false)];
        let s = settings(PackStyle::Ultralight, TripType::Overnight, Season::Summer);
        let stats = compute(&heavy, &s);
        assert_eq!(stats.weight_percent, 100.0);
        assert!(stats.weight_percent.is_finite());
    }

    #[test]
    fn ul_score_penalizes_base_weight_linearly() {
        let s = settings(PackStyle::Ultralight, TripType::Overnight, Season::Summer);
        // At threshold: full score
        let at = vec![item("base", 4500.0, false, false)];
        assert_eq!(compute(&at, &s).ul_score, 100);
        // 1kg over: 10 points off
        let over = vec![item("base", 5500.0, false, false)];
        assert_eq!(compute(&over, &s).ul_score, 90);
        // Far over: floored at 0
        let way_over = vec![item("base", 50_000.0, false, false)];
        assert_eq!(compute(&way_over, &s).ul_score, 0);
    }

    #[test]
    fn ul_score_threshold_shifts_with_trip_and_season() {
        let base = vec![item("base", 8000.0, false, false)];
        let summer = settings(PackStyle::Balanced, TripType::Overnight, Season::Summer);
        let winter_multi = settings(PackStyle::Balanced, TripType::MultiDay, Season::Winter);
        // Summer overnight: 3500 over 4500 threshold -> 65
        assert_eq!(compute(&base, &summer).ul_score, 65);
        // Winter multi-day: threshold 8000 -> exactly at it
        assert_eq!(compute(&base, &winter_multi).ul_score, 100);
    }

    #[test]
    fn ul_score_monotonically_non_increasing() {
        let s = settings(PackStyle::Ultralight, TripType::Overnight, Season::Summer);
        let mut last = 100;
        for grams in (4000..12000).step_by(250) {
            let stats = compute(&[item("base", grams as f64, false, false)], &s);
            assert!(stats.ul_score <= last);
            assert!(stats.ul_score <= 100);
            last = stats.ul_score;
        }
    }

    #[test]
    fn heaviest_keeps_stable_order_on_ties() {
        let items = vec![
            item("first", 500.0, false, false),
            item("second", 500.0, false, false),
            item("third", 500.0, false, false),
            item("light", 10.0, false, false),
        ];
        let s = settings(PackStyle::Balanced, TripType::Overnight, Season::Summer);
        let stats = compute(&items, &s);
        let names: Vec<&str> = stats.heaviest.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["first", "second", "third"]);
    }

    #[test]
    fn category_breakdown_skips_empty_categories() {
        let mut shelter = item("tent", 800.0, false, false);
        shelter.category = Category::Shelter;
        let s = settings(PackStyle::Balanced, TripType::Overnight, Season::Summer);
        let stats = compute(&[shelter], &s);
        assert_eq!(stats.by_category.len(), 1);
        assert_eq!(stats.by_category[0].category, Category::Shelter);
        assert_eq!(stats.by_category[0].grams, 800.0);
    }

    #[test]
    fn formats_grams_and_kilograms() {
        assert_eq!(format_weight(800.0), "800 g");
        assert_eq!(format_weight(1800.0), "1.80 kg");
        assert_eq!(format_weight(f64::NAN), "0 g");
    }
}
