use std::cmp::Ordering;

use crate::models::Food;
use crate::pipeline::criteria::{FilterCriteria, SortKey};

/// Filter and sort foods. The input is left untouched.
///
/// Returns the foods passing every active predicate, ordered by the
/// criteria's sort key. An empty result is a normal outcome.
pub fn apply<'a>(foods: &'a [Food], criteria: &FilterCriteria) -> Vec<&'a Food> {
    let search = criteria.active_search();
    let name = criteria.active_name();
    let category = criteria.active_category();

    let mut matches: Vec<&Food> = foods
        .iter()
        .filter(|f| name.is_none_or(|n| f.name == n))
        .filter(|f| category.is_none_or(|c| f.category == c))
        .filter(|f| criteria.carbs.is_none_or(|band| band.contains(f.carbs)))
        .filter(|f| criteria.calories.is_none_or(|band| band.contains(f.calories)))
        .filter(|f| {
            search
                .as_deref()
                .is_none_or(|term| f.name.to_lowercase().contains(term))
        })
        .collect();

    sort_foods(&mut matches, criteria.sort);
    matches
}

/// Stable in-place sort by the given key.
pub fn sort_foods(foods: &mut [&Food], key: SortKey) {
    match key {
        SortKey::Alphabetical => foods.sort_by(|a, b| compare_names(&a.name, &b.name)),
        SortKey::CarbsAsc => foods.sort_by(|a, b| a.carbs.total_cmp(&b.carbs)),
        SortKey::CarbsDesc => foods.sort_by(|a, b| b.carbs.total_cmp(&a.carbs)),
        SortKey::CaloriesAsc => foods.sort_by_key(|f| f.calories),
        SortKey::CaloriesDesc => foods.sort_by(|a, b| b.calories.cmp(&a.calories)),
        SortKey::FatAsc => foods.sort_by(|a, b| a.fat.total_cmp(&b.fat)),
        SortKey::FatDesc => foods.sort_by(|a, b| b.fat.total_cmp(&a.fat)),
        SortKey::Unsorted => {}
    }
}

/// Dictionary-style name ordering: case-insensitive first, then by the
/// raw string so lowercase sorts before uppercase on ties.
///
/// Case folding only, no locale collation: accented initials compare by
/// code point, so `Éclair` sorts after `zucchini`.
fn compare_names(a: &str, b: &str) -> Ordering {
    let folded = a
        .chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase));

    folded.then_with(|| b.cmp(a))
}
