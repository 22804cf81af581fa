use std::collections::HashMap;

use tracing::debug;

use crate::models::{Food, ListItem, ShoppingListEntry, Totals};

/// Shopping list keyed by food name.
///
/// An entry exists only while its count is at least 1. Every mutation is
/// applied immediately; there is no undo.
#[derive(Debug, Clone, Default)]
pub struct ShoppingList {
    entries: HashMap<String, ShoppingListEntry>,
}

impl ShoppingList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one unit of a food.
    ///
    /// On a repeat add the multiplier is overwritten and rescales every
    /// unit already counted, not just the new one.
    pub fn add(&mut self, food: &Food, multiplier: f64) {
        self.entries
            .entry(food.name.clone())
            .and_modify(|entry| {
                entry.count += 1;
                entry.multiplier = multiplier;
            })
            .or_insert_with(|| ShoppingListEntry::new(multiplier));
    }

    /// Remove one unit of a food, deleting the entry at the last unit.
    ///
    /// The multiplier is left as is. Removing an absent food is a no-op.
    pub fn remove(&mut self, name: &str) {
        match self.entries.get_mut(name) {
            Some(entry) if entry.count > 1 => entry.count -= 1,
            Some(_) => {
                self.entries.remove(name);
            }
            None => debug!(name, "remove on absent list entry"),
        }
    }

    /// Overwrite the multiplier of an existing entry. No-op if absent.
    pub fn set_multiplier(&mut self, name: &str, multiplier: f64) {
        match self.entries.get_mut(name) {
            Some(entry) => entry.multiplier = multiplier,
            None => debug!(name, "quantity change on absent list entry"),
        }
    }

    /// Clear the whole list.
    pub fn reset(&mut self) {
        self.entries.clear();
    }

    pub fn get(&self, name: &str) -> Option<&ShoppingListEntry> {
        self.entries.get(name)
    }

    /// Weighted totals over the list.
    ///
    /// `lookup` resolves a name to its food; names it cannot resolve
    /// contribute nothing.
    pub fn compute_totals<'a, F>(&self, lookup: F) -> Totals
    where
        F: Fn(&str) -> Option<&'a Food>,
    {
        self.entries
            .iter()
            .filter_map(|(name, entry)| lookup(name).map(|food| (food, entry)))
            .fold(Totals::default(), |mut totals, (food, entry)| {
                totals.carbs += entry.contribution(food.carbs);
                totals.calories += entry.contribution(food.calories as f64);
                totals.fat += entry.contribution(food.fat);
                totals
            })
    }

    /// Totals against a plain food slice, matching by exact name.
    pub fn compute_totals_in(&self, foods: &[Food]) -> Totals {
        self.compute_totals(|name| foods.iter().rev().find(|f| f.name == name))
    }

    /// List rows ordered by name.
    pub fn items(&self) -> Vec<ListItem> {
        let mut items: Vec<ListItem> = self
            .entries
            .iter()
            .map(|(name, entry)| ListItem {
                name: name.clone(),
                count: entry.count,
                grams: entry.grams(),
            })
            .collect();
        items.sort_by(|a, b| a.name.cmp(&b.name));
        items
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
