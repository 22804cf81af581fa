use dialoguer::{Confirm, Input, Select};
use strsim::jaro_winkler;

use crate::classify::Budget;
use crate::error::{LookupError, Result};
use crate::pipeline::{CaloriesBand, CarbsBand, FilterCriteria, SortKey};
use crate::session::Session;

/// Similarity above which a name is offered as a suggestion.
const SUGGESTION_THRESHOLD: f64 = 0.7;

/// Names most similar to the input, best first.
pub fn suggest_names<'a>(names: &[&'a str], input: &str, limit: usize) -> Vec<&'a str> {
    let needle = input.to_lowercase();
    let mut candidates: Vec<(&str, f64)> = names
        .iter()
        .map(|name| (*name, jaro_winkler(&name.to_lowercase(), &needle)))
        .filter(|(_, score)| *score > SUGGESTION_THRESHOLD)
        .collect();

    candidates.sort_by(|a, b| b.1.total_cmp(&a.1));
    candidates.into_iter().take(limit).map(|(name, _)| name).collect()
}

/// Prompt for a food name, resolving near misses against the dataset.
///
/// Returns `None` if the user declines every suggestion.
pub fn prompt_food_name(session: &Session) -> Result<Option<String>> {
    let input: String = Input::new()
        .with_prompt("Food name")
        .interact_text()?;

    let input = input.trim();
    if session.food(input).is_some() {
        return Ok(Some(input.to_string()));
    }

    let names = session.food_names();
    let candidates = suggest_names(&names, input, 5);

    if candidates.is_empty() {
        println!("No matching food found for '{}'", input);
        return Ok(None);
    }

    if candidates.len() == 1 {
        let confirm = Confirm::new()
            .with_prompt(format!("Did you mean '{}'?", candidates[0]))
            .default(true)
            .interact()?;
        return Ok(confirm.then(|| candidates[0].to_string()));
    }

    let mut options: Vec<&str> = candidates.clone();
    options.push("None of these");

    let selection = Select::new()
        .with_prompt("Which did you mean?")
        .items(&options)
        .default(0)
        .interact()?;

    Ok(candidates.get(selection).map(|name| name.to_string()))
}

/// Prompt for a gram quantity.
pub fn prompt_grams() -> Result<f64> {
    let input: String = Input::new()
        .with_prompt("Quantity in grams")
        .default("100".to_string())
        .interact_text()?;

    input
        .trim()
        .parse()
        .map_err(|_| LookupError::InvalidQuantity(format!("'{}' is not a number", input.trim())))
}

/// Prompt for the daily carbs budget. Blank clears it.
pub fn prompt_budget(current: Budget) -> Result<String> {
    let default = current.get().map(|b| b.to_string()).unwrap_or_default();
    let input: String = Input::new()
        .with_prompt("Maximum daily carbs in grams (blank to clear)")
        .default(default)
        .allow_empty(true)
        .interact_text()?;
    Ok(input)
}

/// Pick one option or "Any".
fn select_optional<T: Copy>(prompt: &str, options: &[(T, String)]) -> Result<Option<T>> {
    let mut labels: Vec<&str> = vec!["Any"];
    labels.extend(options.iter().map(|(_, label)| label.as_str()));

    let selection = Select::new()
        .with_prompt(prompt)
        .items(&labels)
        .default(0)
        .interact()?;

    Ok(selection.checked_sub(1).map(|i| options[i].0))
}

/// Walk the user through every filter and the sort order.
pub fn prompt_criteria(session: &Session) -> Result<FilterCriteria> {
    let categories = session.categories();
    let category_options: Vec<(usize, String)> = categories
        .iter()
        .enumerate()
        .map(|(i, c)| (i, c.to_string()))
        .collect();
    let category = select_optional("Category", &category_options)?.map(|i| categories[i].to_string());

    let carbs_options: Vec<(CarbsBand, String)> =
        CarbsBand::ALL.iter().map(|b| (*b, b.to_string())).collect();
    let carbs = select_optional("Carbs band", &carbs_options)?;

    let calories_options: Vec<(CaloriesBand, String)> =
        CaloriesBand::ALL.iter().map(|b| (*b, b.to_string())).collect();
    let calories = select_optional("Calories band", &calories_options)?;

    let search: String = Input::new()
        .with_prompt("Search (3+ characters)")
        .allow_empty(true)
        .interact_text()?;

    let sort_options: Vec<(SortKey, String)> =
        SortKey::ALL.iter().map(|k| (*k, k.to_string())).collect();
    let sort = select_optional("Sort by", &sort_options)?.unwrap_or_default();

    Ok(FilterCriteria {
        name: None,
        category,
        carbs,
        calories,
        search: Some(search).filter(|s| !s.trim().is_empty()),
        sort,
    })
}

/// Prompt for yes/no confirmation.
pub fn prompt_yes_no(prompt: &str, default: bool) -> Result<bool> {
    Ok(Confirm::new()
        .with_prompt(prompt)
        .default(default)
        .interact()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suggest_names() {
        let names = ["Cheddar", "Chicken Breast", "Banana"];
        let suggestions = suggest_names(&names, "chedar", 5);
        assert_eq!(suggestions.first(), Some(&"Cheddar"));
        assert!(!suggestions.contains(&"Banana"));

        assert!(suggest_names(&names, "zzzz", 5).is_empty());
    }
}
