/// One shopping list line, keyed externally by food name.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShoppingListEntry {
    /// Number of times the food was added. Always at least 1.
    pub count: u32,

    /// Fraction of a 100g serving that applies to every counted unit.
    pub multiplier: f64,
}

impl ShoppingListEntry {
    pub fn new(multiplier: f64) -> Self {
        Self {
            count: 1,
            multiplier,
        }
    }

    /// Effective gram quantity per unit.
    #[inline]
    pub fn grams(&self) -> f64 {
        self.multiplier * 100.0
    }

    /// Contribution of a per-100g value: `value * multiplier * count`,
    /// multiplied in that order.
    #[inline]
    pub fn contribution(&self, per_100g: f64) -> f64 {
        per_100g * self.multiplier * self.count as f64
    }
}

/// Unrounded nutritional totals of a shopping list.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Totals {
    pub carbs: f64,
    pub calories: f64,
    pub fat: f64,
}

/// Totals rounded to the nearest integer for display.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RoundedTotals {
    pub carbs: i64,
    pub calories: i64,
    pub fat: i64,
}

impl Totals {
    pub fn rounded(&self) -> RoundedTotals {
        RoundedTotals {
            carbs: self.carbs.round() as i64,
            calories: self.calories.round() as i64,
            fat: self.fat.round() as i64,
        }
    }
}

/// A shopping list row as shown to the user.
#[derive(Debug, Clone, PartialEq)]
pub struct ListItem {
    pub name: String,
    pub count: u32,
    pub grams: f64,
}
