use std::collections::{BTreeSet, HashMap};
use std::path::Path;

use tracing::{debug, info};

use crate::classify::{classify, Budget, Severity};
use crate::error::{LookupError, Result};
use crate::ingest::{self, IngestMode};
use crate::models::{Food, ListItem, RoundedTotals, Totals};
use crate::pipeline::{self, FilterCriteria};
use crate::shopping::ShoppingList;

/// A visible food paired with its severity.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifiedFood<'a> {
    pub food: &'a Food,
    pub severity: Severity,
}

/// All state of one lookup session: the dataset, the budget, the current
/// filter criteria and the shopping list.
///
/// The dataset is replaced only by a load; after that it is read-only.
#[derive(Debug, Default)]
pub struct Session {
    /// Foods in dataset order.
    foods: Vec<Food>,

    /// Name to index into `foods`. Later duplicates win.
    index: HashMap<String, usize>,

    budget: Budget,

    criteria: FilterCriteria,

    list: ShoppingList,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a session over an already-loaded dataset.
    pub fn with_foods(foods: Vec<Food>) -> Self {
        let mut session = Self::new();
        session.replace_foods(foods);
        session
    }

    /// Load a dataset from disk.
    ///
    /// On failure the session is left with no foods at all.
    pub async fn load_dataset<P: AsRef<Path>>(&mut self, path: P, mode: IngestMode) -> Result<usize> {
        match ingest::load_dataset(path, mode).await {
            Ok(foods) => {
                self.replace_foods(foods);
                Ok(self.foods.len())
            }
            Err(e) => {
                self.replace_foods(Vec::new());
                Err(e)
            }
        }
    }

    fn replace_foods(&mut self, foods: Vec<Food>) {
        self.index = foods
            .iter()
            .enumerate()
            .map(|(i, food)| (food.name.clone(), i))
            .collect();
        self.foods = foods;

        if self.index.len() != self.foods.len() {
            debug!(
                rows = self.foods.len(),
                unique = self.index.len(),
                "dataset has duplicate names, last row wins on lookup"
            );
        }
    }

    /// Look up a food by exact name.
    pub fn food(&self, name: &str) -> Option<&Food> {
        self.index.get(name).map(|&i| &self.foods[i])
    }

    pub fn foods(&self) -> &[Food] {
        &self.foods
    }

    /// Distinct categories, sorted.
    pub fn categories(&self) -> Vec<&str> {
        self.foods
            .iter()
            .map(|f| f.category.as_str())
            .filter(|c| !c.is_empty())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Distinct food names, sorted.
    pub fn food_names(&self) -> Vec<&str> {
        self.index
            .keys()
            .map(String::as_str)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    // ─────────────────────────────────────────────────────────────────────
    // Filtering and classification
    // ─────────────────────────────────────────────────────────────────────

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    /// Replace the filter criteria and return the new view.
    pub fn apply_filters(&mut self, criteria: FilterCriteria) -> Vec<ClassifiedFood<'_>> {
        self.criteria = criteria;
        self.view()
    }

    /// The visible foods under the current criteria, each classified
    /// against the current budget.
    pub fn view(&self) -> Vec<ClassifiedFood<'_>> {
        pipeline::apply(&self.foods, &self.criteria)
            .into_iter()
            .map(|food| ClassifiedFood {
                food,
                severity: classify(food, self.budget),
            })
            .collect()
    }

    /// Classify a food by name. Unknown names get no classification.
    pub fn classify(&self, name: &str) -> Severity {
        self.food(name)
            .map(|food| classify(food, self.budget))
            .unwrap_or(Severity::None)
    }

    pub fn budget(&self) -> Budget {
        self.budget
    }

    pub fn set_budget(&mut self, budget: Budget) {
        self.budget = budget;
    }

    /// Parse and apply a budget typed by the user.
    ///
    /// Invalid input is rejected and the previous budget stays in effect.
    pub fn set_budget_input(&mut self, input: &str) -> Result<Budget> {
        let budget = Budget::parse(input)?;
        self.budget = budget;
        Ok(budget)
    }

    // ─────────────────────────────────────────────────────────────────────
    // Shopping list
    // ─────────────────────────────────────────────────────────────────────

    /// Add one unit of a food at the given gram quantity.
    pub fn add_item(&mut self, name: &str, grams: f64) -> Result<()> {
        let multiplier = grams_to_multiplier(grams)?;
        let food = self
            .index
            .get(name)
            .map(|&i| &self.foods[i])
            .ok_or_else(|| LookupError::FoodNotFound(name.to_string()))?;

        self.list.add(food, multiplier);
        debug!(name, grams, "added to list");
        Ok(())
    }

    /// Remove one unit of a food. Absent foods are ignored.
    pub fn remove_item(&mut self, name: &str) {
        self.list.remove(name);
    }

    /// Change the gram quantity of a listed food. Absent foods are ignored.
    pub fn set_item_quantity(&mut self, name: &str, grams: f64) -> Result<()> {
        let multiplier = grams_to_multiplier(grams)?;
        self.list.set_multiplier(name, multiplier);
        Ok(())
    }

    pub fn reset_list(&mut self) {
        info!(entries = self.list.len(), "shopping list reset");
        self.list.reset();
    }

    pub fn list(&self) -> &ShoppingList {
        &self.list
    }

    /// Current list rows, ordered by name.
    pub fn list_contents(&self) -> Vec<ListItem> {
        self.list.items()
    }

    /// Unrounded totals of the list against the loaded dataset.
    pub fn totals(&self) -> Totals {
        self.list.compute_totals(|name| self.food(name))
    }

    /// Totals rounded for display.
    pub fn get_totals(&self) -> RoundedTotals {
        self.totals().rounded()
    }
}

/// Convert a gram quantity to a multiplier of the 100g serving.
pub fn grams_to_multiplier(grams: f64) -> Result<f64> {
    if !grams.is_finite() || grams <= 0.0 {
        return Err(LookupError::InvalidQuantity(format!(
            "{} g must be a positive amount",
            grams
        )));
    }
    Ok(grams / 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::{CarbsBand, SortKey};

    fn make_food(name: &str, category: &str, carbs: f64, calories: u32) -> Food {
        Food {
            name: name.to_string(),
            category: category.to_string(),
            carbs,
            fat: 1.0,
            protein: 1.0,
            cholesterol: 0.0,
            calories,
        }
    }

    fn sample_session() -> Session {
        Session::with_foods(vec![
            make_food("Pasta", "grains", 75.0, 371),
            make_food("Spinach", "vegetables", 3.6, 23),
            make_food("Banana", "fruit", 22.8, 89),
        ])
    }

    #[test]
    fn test_lookup_last_duplicate_wins() {
        let session = Session::with_foods(vec![
            make_food("Milk", "dairy", 4.8, 64),
            make_food("Milk", "dairy", 5.0, 46),
        ]);
        assert_eq!(session.food("Milk").unwrap().calories, 46);
        assert!(session.food("milk").is_none());
        assert_eq!(session.food_names(), vec!["Milk"]);
    }

    #[test]
    fn test_categories_distinct_sorted() {
        let session = sample_session();
        assert_eq!(session.categories(), vec!["fruit", "grains", "vegetables"]);
    }

    #[test]
    fn test_view_reclassifies_after_budget_change() {
        let mut session = sample_session();
        let view = session.apply_filters(FilterCriteria {
            sort: SortKey::Alphabetical,
            ..Default::default()
        });
        assert!(view.iter().all(|c| c.severity == Severity::None));

        session.set_budget(Budget::new(50));
        let view = session.view();
        let severities: Vec<_> = view.iter().map(|c| (c.food.name.as_str(), c.severity)).collect();
        assert_eq!(
            severities,
            vec![
                ("Banana", Severity::Green),
                ("Pasta", Severity::Red),
                ("Spinach", Severity::Green),
            ]
        );
    }

    #[test]
    fn test_filters_persist_in_session() {
        let mut session = sample_session();
        session.apply_filters(FilterCriteria {
            carbs: Some(CarbsBand::VeryLow),
            ..Default::default()
        });
        let view = session.view();
        assert_eq!(view.len(), 1);
        assert_eq!(view[0].food.name, "Spinach");
    }

    #[test]
    fn test_invalid_budget_keeps_previous() {
        let mut session = sample_session();
        session.set_budget_input("100").unwrap();
        assert!(session.set_budget_input("-1").is_err());
        assert!(session.set_budget_input("lots").is_err());
        assert_eq!(session.budget(), Budget::new(100));

        session.set_budget_input("").unwrap();
        assert!(!session.budget().is_set());
    }

    #[test]
    fn test_classify_unknown_name() {
        let mut session = sample_session();
        session.set_budget(Budget::new(10));
        assert_eq!(session.classify("Nope"), Severity::None);
        assert_eq!(session.classify("Pasta"), Severity::Red);
    }

    #[test]
    fn test_add_item_converts_grams() {
        let mut session = sample_session();
        session.add_item("Pasta", 150.0).unwrap();
        session.add_item("Pasta", 150.0).unwrap();

        let contents = session.list_contents();
        assert_eq!(contents.len(), 1);
        assert_eq!(contents[0].count, 2);
        assert_eq!(contents[0].grams, 150.0);

        // 75 * 1.5 * 2
        assert_eq!(session.get_totals().carbs, 225);
    }

    #[test]
    fn test_add_item_rejects_bad_input() {
        let mut session = sample_session();
        assert!(matches!(
            session.add_item("Pizza", 100.0),
            Err(LookupError::FoodNotFound(_))
        ));
        for grams in [0.0, -10.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                session.add_item("Pasta", grams),
                Err(LookupError::InvalidQuantity(_))
            ));
        }
        assert!(session.list().is_empty());
    }

    #[test]
    fn test_set_item_quantity_rescales_all_units() {
        let mut session = sample_session();
        session.add_item("Banana", 100.0).unwrap();
        session.add_item("Banana", 100.0).unwrap();
        session.set_item_quantity("Banana", 50.0).unwrap();

        // 89 * 0.5 * 2
        assert_eq!(session.get_totals().calories, 89);

        session.set_item_quantity("Spinach", 50.0).unwrap();
        assert!(session.list().get("Spinach").is_none());
    }

    #[test]
    fn test_remove_and_reset() {
        let mut session = sample_session();
        session.add_item("Spinach", 200.0).unwrap();
        session.add_item("Banana", 120.0).unwrap();

        session.remove_item("Spinach");
        session.remove_item("Spinach");
        assert_eq!(session.list_contents().len(), 1);

        session.reset_list();
        assert!(session.list_contents().is_empty());
        assert_eq!(session.get_totals(), RoundedTotals::default());
    }

    #[test]
    fn test_grams_to_multiplier() {
        assert_eq!(grams_to_multiplier(250.0).unwrap(), 2.5);
        assert!(grams_to_multiplier(0.0).is_err());
    }
}
