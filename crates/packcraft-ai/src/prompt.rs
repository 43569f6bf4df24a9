//! Prompt construction for the advisor capabilities

use packcraft_core::{GearItem, TripSettings};
use std::fmt::Write;

/// Shared trip + loadout context block included in every pack-aware prompt
pub fn pack_context(items: &[GearItem], settings: &TripSettings) -> String {
    let total_g: f64 = items.iter().map(GearItem::sanitized_weight).sum();

    let mut out = String::new();
    let _ = writeln!(out, "TRIP SETTINGS:");
    let _ = writeln!(out, "- Type: {}", settings.trip_type);
    let location = if settings.location.is_empty() {
        "Unspecified"
    } else {
        &settings.location
    };
    let _ = writeln!(out, "- Location: {}", location);
    let _ = writeln!(out, "- Style: {}", settings.pack_style);
    let _ = writeln!(out, "- Environment: {}", settings.environment);
    let _ = writeln!(out, "- Weather: {}", settings.weather);
    let _ = writeln!(out, "- Season: {}", settings.season);
    let _ = writeln!(out, "- Low Temp: {}°C", settings.low_temp_c);
    let _ = writeln!(out, "- Party Size: {}", settings.party_size);
    let _ = writeln!(out, "- Distance/Day: {} km", settings.distance_per_day_km);
    let _ = writeln!(out, "- Water Availability: {}", settings.water);
    let _ = writeln!(out);
    let _ = writeln!(out, "CURRENT PACK LOADOUT:");
    let _ = writeln!(out, "Total Weight: {:.2} kg", total_g / 1000.0);
    let _ = writeln!(out, "Items:");
    for item in items {
        let _ = writeln!(
            out,
            "- {}: {} ({:.0}g) [{}]",
            item.id, item.name, item.sanitized_weight(), item.category
        );
    }
    out
}

pub fn quick_feedback(items: &[GearItem], settings: &TripSettings) -> String {
    format!(
        "Analyze this backpack loadout for the specified trip.\n\
         Provide a single, concise paragraph (max 3 sentences) giving immediate feedback.\n\
         Focus on obvious red flags or easy wins for weight reduction based on the pack style ({}).\n\
         Tone: Helpful, encouraging, outdoorsy.\n\n{}",
        settings.pack_style,
        pack_context(items, settings)
    )
}

pub fn analyze_pack(items: &[GearItem], settings: &TripSettings) -> String {
    format!(
        "Analyze the following backpacking gear list against the trip settings.\n\
         1. Identify which items are ESSENTIAL for survival/safety (Shelter, Sleep, Rain gear, Water, Light, FAK). Return their IDs.\n\
         2. Identify missing ESSENTIAL CATEGORIES (e.g. \"No Rain Gear\", \"No Light Source\", \"No Shelter\").\n\
         3. Identify RED FLAGS (critical safety risks, e.g. \"No warm layer for -5C\").\n\
         4. Assess the weight (Ultralight, Lightweight, Traditional, Heavy) considering the user's goal style ({}).\n\
         Respond with a JSON object with keys: essentialItemIds (array of strings), \
         missingCategories (array of strings), redFlags (array of strings), weightAssessment (string).\n\n{}",
        settings.pack_style,
        pack_context(items, settings)
    )
}

pub fn suggest_items(items: &[GearItem], settings: &TripSettings) -> String {
    format!(
        "Based on the current pack and trip settings, suggest 3 to 6 items that the user is missing or should consider adding.\n\
         Prioritize safety and comfort appropriate for the weather ({}) and location.\n\
         Do NOT suggest items that are already in the pack.\n\
         Respond with a JSON array of objects with keys: name (string), \
         category (one of Shelter, Sleep, Clothing, Cooking, Water, Safety, Electronics, Misc), \
         weight (number, grams), weightDisplay (string, human-readable range), reason (string).\n\n{}",
        settings.weather,
        pack_context(items, settings)
    )
}

pub fn deep_review(items: &[GearItem], settings: &TripSettings) -> String {
    format!(
        "You are an expert backpacking guide named \"packcraft\".\n\
         Perform a deep, comprehensive safety and weight analysis of this loadout.\n\n\
         Your output should use the following Markdown headers:\n\
         ## Overall Pack Summary\n\
         ## Critical Checks (Pass/Fail/Warn)\n\
         ## Suggested Removals / Simplifications\n\
         ## Trip-specific Advice\n\n\
         Think deeply about the specific weather ({}, {}°C) and location ({}).\n\
         Consider the user's pack style goal: {}.\n\
         If safety items are missing (First Aid, Light, Navigation, Shelter), flag them clearly.\n\
         Do NOT give medical advice.\n\n{}",
        settings.weather,
        settings.low_temp_c,
        settings.location,
        settings.pack_style,
        pack_context(items, settings)
    )
}

pub fn chat_system_instruction(items: &[GearItem], settings: &TripSettings) -> String {
    format!(
        "You are packcraft, a helpful hiking gear assistant.\n\
         Current Context:\n{}\n\
         Answer the user's question specifically about their current pack and trip.\n\
         Keep answers relatively concise unless asked for detail.\n\
         Be friendly and practical.",
        pack_context(items, settings)
    )
}

pub fn search(query: &str) -> String {
    format!(
        "Find information about backpacking gear: {}. Summarize key specs or usage advice.",
        query
    )
}

pub fn estimate_weight(item_name: &str) -> String {
    format!(
        "Estimate the typical packed weight of this backpacking item: {}.\n\
         Respond with a single number: the weight in grams. No units, no prose.",
        item_name
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use packcraft_core::{default_catalog, Category};

    #[test]
    fn context_lists_every_item_with_id_and_total() {
        let catalog = default_catalog();
        let items: Vec<_> = catalog.iter().take(3).map(|i| i.instantiate()).collect();
        let ctx = pack_context(&items, &TripSettings::default());
        for item in &items {
            assert!(ctx.contains(&item.id));
            assert!(ctx.contains(&item.name));
        }
        assert!(ctx.contains("Total Weight:"));
        assert!(ctx.contains("TRIP SETTINGS:"));
    }

    #[test]
    fn deep_review_carries_fixed_headers() {
        let prompt = deep_review(&[], &TripSettings::default());
        assert!(prompt.contains("## Overall Pack Summary"));
        assert!(prompt.contains("## Critical Checks (Pass/Fail/Warn)"));
        assert!(prompt.contains("## Suggested Removals / Simplifications"));
        assert!(prompt.contains("## Trip-specific Advice"));
    }

    #[test]
    fn suggest_prompt_names_all_categories() {
        let prompt = suggest_items(&[], &TripSettings::default());
        for cat in Category::ALL {
            assert!(prompt.contains(cat.name()));
        }
    }
}
