use crate::classify::{Budget, Severity};
use crate::models::{ListItem, RoundedTotals};
use crate::session::ClassifiedFood;

/// Marker shown next to a food for its severity.
pub fn severity_marker(severity: Severity) -> &'static str {
    match severity {
        Severity::None => "   ",
        Severity::Green => "[G]",
        Severity::Orange => "[O]",
        Severity::Red => "[R]",
    }
}

/// Display the filtered foods in a formatted table.
pub fn display_food_list(view: &[ClassifiedFood<'_>], budget: Budget) {
    if view.is_empty() {
        println!("No foods match the current filters.");
        return;
    }

    println!();
    match budget.get() {
        Some(max) => println!("=== Foods ({} items, budget {} g carbs) ===", view.len(), max),
        None => println!("=== Foods ({} items) ===", view.len()),
    }
    println!();

    let max_name_len = view.iter().map(|c| c.food.name.len()).max().unwrap_or(10);

    for item in view {
        let food = item.food;
        println!(
            "{} {:<width$} {:>5} kcal | C:{:>6.1} F:{:>6.1} P:{:>6.1} Chol:{:>6.1} | {}",
            severity_marker(item.severity),
            food.name,
            food.calories,
            food.carbs,
            food.fat,
            food.protein,
            food.cholesterol,
            food.category,
            width = max_name_len
        );
    }

    println!();
}

/// Display shopping list rows and rounded totals.
pub fn display_shopping_list(items: &[ListItem], totals: &RoundedTotals) {
    if items.is_empty() {
        println!("Shopping list is empty.");
        return;
    }

    println!();
    println!("=== Shopping List ===");
    println!();

    let max_name_len = items.iter().map(|i| i.name.len()).max().unwrap_or(10);

    for item in items {
        println!(
            "  {:<width$}  x{:<3} @ {:.0} g",
            item.name,
            item.count,
            item.grams,
            width = max_name_len
        );
    }

    println!();
    println!("--- Totals ---");
    println!("Carbs: {} g", totals.carbs);
    println!("Calories: {} kcal", totals.calories);
    println!("Fat: {} g", totals.fat);
    println!();
}

/// Display a titled list of plain labels.
pub fn display_labels(labels: &[&str], title: &str) {
    if labels.is_empty() {
        println!("{}: (none)", title);
        return;
    }

    println!();
    println!("=== {} ({}) ===", title, labels.len());
    for label in labels {
        println!("  {}", label);
    }
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_markers_are_aligned() {
        let widths: Vec<usize> = [Severity::None, Severity::Green, Severity::Orange, Severity::Red]
            .into_iter()
            .map(|s| severity_marker(s).len())
            .collect();
        assert!(widths.iter().all(|&w| w == 3));
    }
}
