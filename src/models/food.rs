use serde::{Deserialize, Serialize};

/// Stand-in value for "trace" and "not measured" readings.
///
/// Kept distinct from a true zero so such foods are not treated as empty.
pub const TRACE_SENTINEL: f64 = 0.1;

/// A food item with nutritional data per 100g serving.
///
/// Immutable once loaded. The name is the identity key within a dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Food {
    pub name: String,

    pub category: String,

    pub carbs: f64,

    pub fat: f64,

    pub protein: f64,

    pub cholesterol: f64,

    pub calories: u32,
}

impl Food {
    /// True if at least one of protein, fat, carbs or calories is positive.
    ///
    /// Foods failing this check are dropped on ingestion.
    #[inline]
    pub fn has_nutrients(&self) -> bool {
        self.protein > 0.0 || self.fat > 0.0 || self.carbs > 0.0 || self.calories > 0
    }

    /// Non-negative, finite decimal fields.
    pub fn is_valid(&self) -> bool {
        [self.carbs, self.fat, self.protein, self.cholesterol]
            .into_iter()
            .all(|v| v.is_finite() && v >= 0.0)
    }

    /// Debug string for logging.
    pub fn debug_string(&self) -> String {
        format!(
            "{} [{}]: {} kcal, C:{} F:{} P:{} Chol:{}",
            self.name,
            self.category,
            self.calories,
            self.carbs,
            self.fat,
            self.protein,
            self.cholesterol
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_food() -> Food {
        Food {
            name: "Apple".to_string(),
            category: "fruit".to_string(),
            carbs: 11.8,
            fat: 0.1,
            protein: 0.4,
            cholesterol: 0.0,
            calories: 47,
        }
    }

    #[test]
    fn test_has_nutrients() {
        assert!(sample_food().has_nutrients());

        let empty = Food {
            carbs: 0.0,
            fat: 0.0,
            protein: 0.0,
            calories: 0,
            cholesterol: 5.0,
            ..sample_food()
        };
        // Cholesterol alone does not count
        assert!(!empty.has_nutrients());

        let calories_only = Food {
            calories: 1,
            ..empty
        };
        assert!(calories_only.has_nutrients());
    }

    #[test]
    fn test_trace_counts_as_nutrient() {
        let trace = Food {
            carbs: TRACE_SENTINEL,
            fat: 0.0,
            protein: 0.0,
            calories: 0,
            ..sample_food()
        };
        assert!(trace.has_nutrients());
    }

    #[test]
    fn test_is_valid() {
        assert!(sample_food().is_valid());

        let mut invalid = sample_food();
        invalid.fat = -1.0;
        assert!(!invalid.is_valid());

        invalid.fat = f64::NAN;
        assert!(!invalid.is_valid());
    }
}
