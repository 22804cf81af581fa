//! Daily carbs budget and per-food severity.

use std::fmt;

use crate::error::{LookupError, Result};
use crate::models::Food;

/// Margin over a food's carbs within which it is flagged orange.
pub const ORANGE_MARGIN: f64 = 1.2;

/// Maximum daily carbs in grams. Unset disables classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Budget(Option<u32>);

impl Budget {
    pub const UNSET: Budget = Budget(None);

    pub fn new(max_daily_carbs: u32) -> Self {
        Budget(Some(max_daily_carbs))
    }

    /// Parse user input. Blank input clears the budget; anything other than
    /// a non-negative integer is rejected.
    pub fn parse(input: &str) -> Result<Budget> {
        let input = input.trim();
        if input.is_empty() {
            return Ok(Budget::UNSET);
        }

        input
            .parse::<u32>()
            .map(Budget::new)
            .map_err(|_| LookupError::InvalidBudget(format!("'{}' is not a non-negative whole number", input)))
    }

    pub fn get(&self) -> Option<u32> {
        self.0
    }

    pub fn is_set(&self) -> bool {
        self.0.is_some()
    }
}

impl From<Option<u32>> for Budget {
    fn from(value: Option<u32>) -> Self {
        Budget(value)
    }
}

/// How a food's carbs compare to the daily budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    /// No budget set.
    None,
    Green,
    /// Within 20% of exceeding the budget.
    Orange,
    /// The food alone exceeds the budget.
    Red,
}

impl Severity {
    pub fn label(&self) -> &'static str {
        match self {
            Severity::None => "",
            Severity::Green => "green",
            Severity::Orange => "orange",
            Severity::Red => "red",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Classify one food against the budget. Both comparisons are strict.
pub fn classify(food: &Food, budget: Budget) -> Severity {
    let Some(max) = budget.get() else {
        return Severity::None;
    };

    let budget = max as f64;
    let carbs = food.carbs;

    if budget < carbs {
        Severity::Red
    } else if budget < carbs * ORANGE_MARGIN {
        Severity::Orange
    } else {
        Severity::Green
    }
}
