use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::error::{LookupError, Result};
use crate::ingest::IngestMode;
use crate::pipeline::{CaloriesBand, CarbsBand, FilterCriteria, SortKey};

/// FoodLookup — browse a nutrition dataset against a daily carbs budget and
/// build a shopping list.
#[derive(Parser, Debug)]
#[command(name = "food_lookup")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Path to the nutrition dataset.
    #[arg(short, long, default_value = "foods.csv", global = true)]
    pub file: PathBuf,

    /// Dataset encoding. Inferred from the file extension when omitted.
    #[arg(long, value_enum, global = true)]
    pub format: Option<IngestMode>,

    /// Maximum daily carbs in grams, used to flag foods.
    #[arg(short, long, global = true)]
    pub budget: Option<u32>,
}

impl Cli {
    pub fn ingest_mode(&self) -> IngestMode {
        self.format.unwrap_or_else(|| IngestMode::from_path(&self.file))
    }
}

#[derive(Subcommand, Debug, Default)]
pub enum Command {
    /// Filter, sort and list foods.
    Search(SearchArgs),

    /// Build a shopping list and print its totals.
    Totals {
        /// Item to add, as NAME=GRAMS. Repeat to add more.
        #[arg(short, long = "item", value_parser = parse_item)]
        items: Vec<(String, f64)>,
    },

    /// List the distinct food categories.
    Categories,

    /// Menu-driven session over the dataset.
    #[default]
    Interactive,
}

#[derive(clap::Args, Debug, Default)]
pub struct SearchArgs {
    /// Exact food name.
    #[arg(long)]
    pub name: Option<String>,

    /// Exact category.
    #[arg(long)]
    pub category: Option<String>,

    /// Carbs band: very-low, low, medium-low, medium, medium-high, high.
    #[arg(long)]
    pub carbs: Option<CarbsBand>,

    /// Calories band: low, medium, high.
    #[arg(long)]
    pub calories: Option<CaloriesBand>,

    /// Case-insensitive name search, at least 3 characters.
    #[arg(short, long)]
    pub search: Option<String>,

    /// Sort key: alphabetical, carbs-asc, carbs-desc, calories-asc,
    /// calories-desc, fat-asc, fat-desc.
    #[arg(long, default_value = "unsorted")]
    pub sort: SortKey,
}

impl From<SearchArgs> for FilterCriteria {
    fn from(args: SearchArgs) -> Self {
        FilterCriteria {
            name: args.name,
            category: args.category,
            carbs: args.carbs,
            calories: args.calories,
            search: args.search,
            sort: args.sort,
        }
    }
}

/// Parse a `NAME=GRAMS` item. The last `=` splits, so names may contain one.
pub fn parse_item(s: &str) -> Result<(String, f64)> {
    let (name, grams) = s
        .rsplit_once('=')
        .ok_or_else(|| LookupError::InvalidQuantity(format!("expected NAME=GRAMS, got '{}'", s)))?;

    let grams: f64 = grams
        .trim()
        .parse()
        .map_err(|_| LookupError::InvalidQuantity(format!("'{}' is not a number", grams.trim())))?;

    Ok((name.trim().to_string(), grams))
}
