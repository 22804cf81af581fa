//! Structured (JSON) dataset ingestion.
//!
//! Records are already typed, so there is no field parsing; only the
//! validity and nutrient checks apply.

use tracing::debug;

use crate::error::Result;
use crate::models::Food;

/// Parse a JSON array of food objects.
///
/// A document that is not a list of foods fails as a whole. Individual foods
/// with negative or non-finite values, or without any nutrients, are dropped.
pub fn parse_foods(json: &str) -> Result<Vec<Food>> {
    let records: Vec<Food> = serde_json::from_str(json)?;
    Ok(retain_valid(records))
}

/// Apply the ingestion invariants to already-typed records.
pub fn retain_valid(records: Vec<Food>) -> Vec<Food> {
    let total = records.len();
    let foods: Vec<Food> = records
        .into_iter()
        .filter(|food| {
            let keep = food.is_valid() && food.has_nutrients();
            if !keep {
                debug!(food = %food.debug_string(), "dropping structured record");
            }
            keep
        })
        .collect();

    debug!(kept = foods.len(), dropped = total - foods.len(), "structured ingest finished");
    foods
}
