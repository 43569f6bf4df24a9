use anyhow::{anyhow, Result};
use packcraft_analytics::format_weight;
use packcraft_core::{browse, default_catalog, default_presets, Category, SortKey};

pub fn handle(search: Option<String>, category: Option<String>, sort: String) -> Result<()> {
    let category = category
        .as_deref()
        .map(|c| c.parse::<Category>().map_err(|e| anyhow!(e)))
        .transpose()?;
    let sort: SortKey = sort.parse().map_err(|e: String| anyhow!(e))?;

    let catalog = default_catalog();
    let items = browse(&catalog, search.as_deref(), category, sort);

    if items.is_empty() {
        println!("No catalog entries match.");
        return Ok(());
    }

    for item in items {
        let mut flags = Vec::new();
        if item.consumable {
            flags.push("consumable");
        }
        if item.worn {
            flags.push("worn");
        }
        let flags = if flags.is_empty() {
            String::new()
        } else {
            format!(" ({})", flags.join(", "))
        };
        println!(
            "  {:<16} {:<28} {:>10}  [{}]{}",
            item.id,
            item.name,
            format_weight(item.weight_g),
            item.category,
            flags
        );
    }

    Ok(())
}

pub fn presets() -> Result<()> {
    let catalog = default_catalog();

    for preset in default_presets() {
        let total: f64 = preset
            .item_ids
            .iter()
            .filter_map(|id| catalog.iter().find(|item| &item.id == id))
            .map(|item| item.sanitized_weight())
            .sum();

        println!("{} ({})", preset.name, preset.id);
        println!("  {}", preset.description);
        println!(
            "  {} items, {} loaded ({}, {})",
            preset.item_ids.len(),
            format_weight(total),
            preset.settings.trip_type,
            preset.settings.season
        );
    }

    Ok(())
}
