//! Interactive planning session
//!
//! Thin line-oriented shell over [`Session`]. All planner behavior lives in
//! the session crate; this module only parses commands and prints state.

use std::io::Write as _;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{anyhow, bail, Context, Result};
use packcraft_ai::GeminiAdvisor;
use packcraft_analytics::format_weight;
use packcraft_config::Config;
use packcraft_core::{
    default_catalog, default_presets, Category, Environment, GearItem, PackStyle, Preset, Season,
    TripType, WaterAvailability, Weather,
};
use packcraft_session::Session;
use tokio::io::{AsyncBufReadExt, BufReader};

pub async fn handle(config: &Config, preset: Option<String>) -> Result<()> {
    let api_key = std::env::var(&config.advisor.api_key_env).with_context(|| {
        format!(
            "set {} to your Gemini API key before planning",
            config.advisor.api_key_env
        )
    })?;
    let advisor = GeminiAdvisor::new(api_key)?.with_models(
        &config.advisor.fast_model,
        &config.advisor.deep_model,
        &config.advisor.search_model,
    );

    let session = Session::new(Arc::new(advisor))
        .with_debounce(Duration::from_millis(config.analysis_debounce_ms));

    let catalog = default_catalog();
    let presets = default_presets();

    if let Some(id) = preset {
        let preset = find_preset(&presets, &id)?;
        session.apply_preset(preset, &catalog);
        println!("Loaded preset: {}", preset.name);
    }

    println!("packcraft planning session. Type 'help' for commands, 'quit' to leave.");

    let stdin = BufReader::new(tokio::io::stdin());
    let mut lines = stdin.lines();

    loop {
        print!("packcraft> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match run_command(&session, &catalog, &presets, line).await {
            Ok(true) => {}
            Ok(false) => break,
            Err(err) => println!("error: {:#}", err),
        }
    }

    Ok(())
}

/// Execute one command line; Ok(false) ends the session
async fn run_command(
    session: &Session,
    catalog: &[GearItem],
    presets: &[Preset],
    line: &str,
) -> Result<bool> {
    let (cmd, rest) = match line.split_once(char::is_whitespace) {
        Some((cmd, rest)) => (cmd, rest.trim()),
        None => (line, ""),
    };

    match cmd {
        "quit" | "exit" => return Ok(false),
        "help" => print_help(),
        "items" => print_items(session),
        "stats" => print_stats(session),
        "analysis" => {
            // Wait out the debounce so the printout reflects the latest edit
            session.settled().await;
            print_analysis(session);
        }
        "add" => {
            if rest.is_empty() {
                bail!("usage: add <catalog-id>");
            }
            let template = catalog
                .iter()
                .find(|item| item.id == rest)
                .ok_or_else(|| anyhow!("no catalog entry '{}' (see 'packcraft catalog')", rest))?;
            let added = session.add_item(template);
            println!(
                "+ {} ({}) [{}]",
                added.name,
                format_weight(added.weight_g),
                added.id
            );
        }
        "custom" => {
            let mut parts = rest.splitn(3, char::is_whitespace);
            let (category, grams, name) = match (parts.next(), parts.next(), parts.next()) {
                (Some(c), Some(g), Some(n)) if !n.trim().is_empty() => (c, g, n.trim()),
                _ => bail!("usage: custom <category> <grams|?> <name>"),
            };
            let category: Category = category.parse().map_err(|e: String| anyhow!(e))?;
            let weight_g = if grams == "?" {
                let estimate = session.estimate_weight(name).await;
                println!("estimated {} at {}", name, format_weight(estimate));
                estimate
            } else {
                grams.parse::<f64>().context("grams must be a number")?
            };
            let added = session.add_custom(name, weight_g, category)?;
            println!(
                "+ {} ({}) [{}]",
                added.name,
                format_weight(added.weight_g),
                added.id
            );
        }
        "estimate" => {
            if rest.is_empty() {
                bail!("usage: estimate <item name>");
            }
            let grams = session.estimate_weight(rest).await;
            println!("{}: ~{}", rest, format_weight(grams));
        }
        "remove" => {
            if rest.is_empty() {
                bail!("usage: remove <instance-id>");
            }
            if session.remove(rest) {
                println!("removed {}", rest);
            } else {
                println!("no pack item with id {}", rest);
            }
        }
        "clear" => {
            session.clear();
            println!("pack emptied");
        }
        "preset" => {
            if rest.is_empty() {
                for preset in presets {
                    println!("  {:<10} {}", preset.id, preset.description);
                }
            } else {
                let preset = find_preset(presets, rest)?;
                session.apply_preset(preset, catalog);
                println!("Loaded preset: {}", preset.name);
            }
        }
        "suggest" => {
            let suggestions = session.request_suggestions().await;
            if suggestions.is_empty() {
                println!("no suggestions right now");
            }
            for s in suggestions {
                let weight = s
                    .weight_display
                    .clone()
                    .unwrap_or_else(|| format_weight(s.weight_g));
                println!("  {} [{}] ~{}", s.name, s.category, weight);
                println!("    {}", s.reason);
            }
        }
        "take" => {
            if rest.is_empty() {
                bail!("usage: take <suggested item name>");
            }
            let added = session.add_suggestion(rest)?;
            println!("+ {} [{}]", added.name, added.id);
        }
        "strip" => {
            let removed = session.strip_to_essentials()?;
            println!("stripped {} non-essential item(s)", removed);
        }
        "snapshot" => {
            let previous = session.snapshot();
            let snapshot = session.take_snapshot();
            match previous {
                Some(old) => {
                    let delta = old.delta_from(snapshot.total_g);
                    let sign = if delta >= 0.0 { "+" } else { "-" };
                    println!(
                        "snapshot: {} ({}{} since last)",
                        format_weight(snapshot.total_g),
                        sign,
                        format_weight(delta.abs())
                    );
                }
                None => println!("snapshot: {}", format_weight(snapshot.total_g)),
            }
        }
        "check" => {
            println!("{}", session.quick_feedback().await?);
        }
        "review" => {
            println!("{}", session.deep_review().await?);
        }
        "chat" => {
            if rest.is_empty() {
                bail!("usage: chat <message>");
            }
            println!("{}", session.chat(rest).await?);
        }
        "search" => {
            if rest.is_empty() {
                bail!("usage: search <query>");
            }
            println!("{}", session.search(rest).await?);
        }
        "set" => apply_set(session, rest)?,
        other => println!("unknown command '{}' (try 'help')", other),
    }

    Ok(true)
}

fn find_preset<'a>(presets: &'a [Preset], id: &str) -> Result<&'a Preset> {
    presets
        .iter()
        .find(|p| p.id == id)
        .ok_or_else(|| anyhow!("no preset '{}' (see 'packcraft presets')", id))
}

fn print_help() {
    println!(
        "\
pack:
  add <catalog-id>              add a catalog item
  custom <cat> <grams|?> <name> add your own item ('?' asks for an estimate)
  take <name>                   move an advisor suggestion into the pack
  remove <instance-id>          drop one pack item
  strip                         keep only analysis-essential items
  clear                         empty the pack
  items                         list the pack by category

trip:
  set type day|overnight|multi
  set env forest|desert|alpine|coastal|mixed
  set season summer|shoulder|winter
  set style ultralight|balanced|comfort
  set weather clear|rainy|stormy|snowy
  set water frequent|occasional|rare
  set temp <celsius> | set distance <km> | set party <n> | set location <text>
  preset [id]                   list presets, or load one

advisor:
  stats | analysis | snapshot | suggest
  estimate <name>               weight estimate in grams
  check                         quick loadout feedback
  review                        deep gear review
  chat <message> | search <query>

quit"
    );
}

fn print_items(session: &Session) {
    let pack = session.pack();
    if pack.is_empty() {
        println!("pack is empty");
        return;
    }
    let essential: Vec<String> = session
        .analysis()
        .map(|a| a.essential_item_ids)
        .unwrap_or_default();

    for category in Category::ALL {
        let in_category: Vec<&GearItem> =
            pack.iter().filter(|i| i.category == category).collect();
        if in_category.is_empty() {
            continue;
        }
        println!("{}:", category);
        for item in in_category {
            let mut marks = String::new();
            if essential.contains(&item.id) {
                marks.push_str(" *essential");
            }
            if item.consumable {
                marks.push_str(" (consumable)");
            }
            if item.worn {
                marks.push_str(" (worn)");
            }
            println!(
                "  [{}] {:<28} {:>10}{}",
                item.id,
                item.name,
                format_weight(item.weight_g),
                marks
            );
        }
    }
}

fn print_stats(session: &Session) {
    let stats = session.stats();
    println!(
        "total {}   base {}   target {}",
        format_weight(stats.total_g),
        format_weight(stats.base_g),
        format_weight(stats.target_max_g)
    );
    println!(
        "capacity {:.0}%   ultralight score {}/100",
        stats.weight_percent, stats.ul_score
    );

    if !stats.heaviest.is_empty() {
        println!("heaviest:");
        for item in &stats.heaviest {
            println!("  {:<28} {}", item.name, format_weight(item.weight_g));
        }
    }
    if !stats.by_category.is_empty() {
        println!("by category:");
        for slice in &stats.by_category {
            println!("  {:<12} {}", slice.category, format_weight(slice.grams));
        }
    }
    if let Some(snapshot) = session.snapshot() {
        let delta = snapshot.delta_from(stats.total_g);
        let sign = if delta >= 0.0 { "+" } else { "-" };
        println!(
            "snapshot {} ({}{} since)",
            format_weight(snapshot.total_g),
            sign,
            format_weight(delta.abs())
        );
    }
}

fn print_analysis(session: &Session) {
    match session.analysis() {
        None => println!("no analysis yet (add some gear first)"),
        Some(analysis) => {
            println!("weight assessment: {}", analysis.weight_assessment);
            if !analysis.red_flags.is_empty() {
                println!("red flags:");
                for flag in &analysis.red_flags {
                    println!("  ! {}", flag);
                }
            }
            if !analysis.missing_categories.is_empty() {
                println!("missing:");
                for gap in &analysis.missing_categories {
                    println!("  - {}", gap);
                }
            }
            if session.can_strip() {
                println!(
                    "('strip' would keep the {} essential items)",
                    analysis.essential_item_ids.len()
                );
            }
        }
    }
}

fn apply_set(session: &Session, rest: &str) -> Result<()> {
    let (field, value) = rest
        .split_once(char::is_whitespace)
        .map(|(f, v)| (f, v.trim()))
        .ok_or_else(|| anyhow!("usage: set <field> <value>"))?;

    match field {
        "type" => {
            let trip_type = parse_trip_type(value)?;
            session.update_settings(|s| s.trip_type = trip_type);
        }
        "env" => {
            let environment = parse_environment(value)?;
            session.update_settings(|s| s.environment = environment);
        }
        "season" => {
            let season = parse_season(value)?;
            session.update_settings(|s| s.season = season);
        }
        "style" => {
            let style = parse_style(value)?;
            session.update_settings(|s| s.pack_style = style);
        }
        "weather" => {
            let weather = parse_weather(value)?;
            session.update_settings(|s| s.weather = weather);
        }
        "water" => {
            let water = parse_water(value)?;
            session.update_settings(|s| s.water = water);
        }
        "temp" => {
            let temp: i32 = value.parse().context("temp takes a whole number, °C")?;
            session.update_settings(|s| s.low_temp_c = temp);
        }
        "distance" => {
            let km: f64 = value.parse().context("distance takes km per day")?;
            session.update_settings(|s| s.distance_per_day_km = km);
        }
        "party" => {
            let n: u32 = value.parse().context("party takes a head count")?;
            session.update_settings(|s| s.party_size = n);
        }
        "location" => {
            let location = value.to_string();
            session.update_settings(|s| s.location = location);
        }
        other => bail!("unknown setting '{}'", other),
    }

    println!("ok");
    Ok(())
}

fn parse_trip_type(s: &str) -> Result<TripType> {
    match s.to_ascii_lowercase().as_str() {
        "day" | "day-hike" | "dayhike" => Ok(TripType::DayHike),
        "overnight" => Ok(TripType::Overnight),
        "multi" | "multi-day" | "multiday" => Ok(TripType::MultiDay),
        _ => bail!("trip type is day, overnight, or multi"),
    }
}

fn parse_environment(s: &str) -> Result<Environment> {
    match s.to_ascii_lowercase().as_str() {
        "forest" => Ok(Environment::Forest),
        "desert" => Ok(Environment::Desert),
        "alpine" => Ok(Environment::Alpine),
        "coastal" => Ok(Environment::Coastal),
        "mixed" => Ok(Environment::Mixed),
        _ => bail!("environment is forest, desert, alpine, coastal, or mixed"),
    }
}

fn parse_season(s: &str) -> Result<Season> {
    match s.to_ascii_lowercase().as_str() {
        "summer" => Ok(Season::Summer),
        "shoulder" => Ok(Season::Shoulder),
        "winter" => Ok(Season::Winter),
        _ => bail!("season is summer, shoulder, or winter"),
    }
}

fn parse_style(s: &str) -> Result<PackStyle> {
    match s.to_ascii_lowercase().as_str() {
        "ultralight" | "ul" => Ok(PackStyle::Ultralight),
        "balanced" => Ok(PackStyle::Balanced),
        "comfort" => Ok(PackStyle::Comfort),
        _ => bail!("style is ultralight, balanced, or comfort"),
    }
}

fn parse_weather(s: &str) -> Result<Weather> {
    match s.to_ascii_lowercase().as_str() {
        "clear" => Ok(Weather::Clear),
        "rainy" | "rain" => Ok(Weather::Rainy),
        "stormy" => Ok(Weather::Stormy),
        "snowy" | "snow" => Ok(Weather::Snowy),
        _ => bail!("weather is clear, rainy, stormy, or snowy"),
    }
}

fn parse_water(s: &str) -> Result<WaterAvailability> {
    match s.to_ascii_lowercase().as_str() {
        "frequent" => Ok(WaterAvailability::Frequent),
        "occasional" => Ok(WaterAvailability::Occasional),
        "rare" => Ok(WaterAvailability::Rare),
        _ => bail!("water is frequent, occasional, or rare"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_value_parsers_accept_shorthand() {
        assert_eq!(parse_trip_type("multi").unwrap(), TripType::MultiDay);
        assert_eq!(parse_style("ul").unwrap(), PackStyle::Ultralight);
        assert_eq!(parse_weather("rain").unwrap(), Weather::Rainy);
        assert!(parse_season("monsoon").is_err());
    }
}
