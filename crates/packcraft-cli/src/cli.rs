use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "packcraft")]
#[command(about = "Backpacking loadout planner with an AI gear advisor", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Browse the built-in gear catalog
    Catalog {
        /// Case-insensitive name filter
        #[arg(long)]
        search: Option<String>,

        /// Restrict to one category (Shelter, Sleep, Clothing, ...)
        #[arg(long)]
        category: Option<String>,

        /// Sort order: name, weight, or category
        #[arg(long, default_value = "category")]
        sort: String,
    },

    /// List the curated starter presets
    Presets,

    /// Start an interactive planning session
    Plan {
        /// Preset to load before the prompt comes up
        #[arg(long)]
        preset: Option<String>,
    },
}
