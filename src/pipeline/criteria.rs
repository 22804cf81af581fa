use std::fmt;
use std::str::FromStr;

use crate::error::LookupError;

/// Minimum trimmed length for the search term to take effect.
pub const MIN_SEARCH_LEN: usize = 3;

/// Carbohydrate bands in grams per 100g. Bounds are half-open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CarbsBand {
    /// Below 10g.
    VeryLow,
    /// 10g up to 20g.
    Low,
    /// 20g up to 30g.
    MediumLow,
    /// 30g up to 40g.
    Medium,
    /// 40g up to 50g.
    MediumHigh,
    /// 50g and above.
    High,
}

impl CarbsBand {
    pub const ALL: [CarbsBand; 6] = [
        CarbsBand::VeryLow,
        CarbsBand::Low,
        CarbsBand::MediumLow,
        CarbsBand::Medium,
        CarbsBand::MediumHigh,
        CarbsBand::High,
    ];

    pub fn contains(&self, carbs: f64) -> bool {
        match self {
            CarbsBand::VeryLow => carbs < 10.0,
            CarbsBand::Low => (10.0..20.0).contains(&carbs),
            CarbsBand::MediumLow => (20.0..30.0).contains(&carbs),
            CarbsBand::Medium => (30.0..40.0).contains(&carbs),
            CarbsBand::MediumHigh => (40.0..50.0).contains(&carbs),
            CarbsBand::High => carbs >= 50.0,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CarbsBand::VeryLow => "very-low",
            CarbsBand::Low => "low",
            CarbsBand::MediumLow => "medium-low",
            CarbsBand::Medium => "medium",
            CarbsBand::MediumHigh => "medium-high",
            CarbsBand::High => "high",
        }
    }
}

/// Calorie bands in kcal per 100g. Medium is inclusive at both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaloriesBand {
    Low,
    Medium,
    High,
}

impl CaloriesBand {
    pub const ALL: [CaloriesBand; 3] = [CaloriesBand::Low, CaloriesBand::Medium, CaloriesBand::High];

    pub fn contains(&self, calories: u32) -> bool {
        match self {
            CaloriesBand::Low => calories < 200,
            CaloriesBand::Medium => (200..=500).contains(&calories),
            CaloriesBand::High => calories > 500,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CaloriesBand::Low => "low",
            CaloriesBand::Medium => "medium",
            CaloriesBand::High => "high",
        }
    }
}

impl FromStr for CarbsBand {
    type Err = LookupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim().to_lowercase();
        CarbsBand::ALL
            .into_iter()
            .find(|band| band.as_str() == token)
            .ok_or_else(|| LookupError::UnknownBand(s.to_string()))
    }
}

impl FromStr for CaloriesBand {
    type Err = LookupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim().to_lowercase();
        CaloriesBand::ALL
            .into_iter()
            .find(|band| band.as_str() == token)
            .ok_or_else(|| LookupError::UnknownBand(s.to_string()))
    }
}

impl fmt::Display for CarbsBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for CaloriesBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result ordering. Every ordering is stable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    Alphabetical,
    CarbsAsc,
    CarbsDesc,
    CaloriesAsc,
    CaloriesDesc,
    FatAsc,
    FatDesc,
    /// Keep dataset order.
    #[default]
    Unsorted,
}

impl SortKey {
    pub const ALL: [SortKey; 7] = [
        SortKey::Alphabetical,
        SortKey::CarbsAsc,
        SortKey::CarbsDesc,
        SortKey::CaloriesAsc,
        SortKey::CaloriesDesc,
        SortKey::FatAsc,
        SortKey::FatDesc,
    ];

    /// Parse a sort token. Unrecognized tokens mean no reordering.
    pub fn parse(s: &str) -> SortKey {
        let token = s.trim().to_lowercase();
        SortKey::ALL
            .into_iter()
            .find(|key| key.as_str() == token)
            .unwrap_or(SortKey::Unsorted)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Alphabetical => "alphabetical",
            SortKey::CarbsAsc => "carbs-asc",
            SortKey::CarbsDesc => "carbs-desc",
            SortKey::CaloriesAsc => "calories-asc",
            SortKey::CaloriesDesc => "calories-desc",
            SortKey::FatAsc => "fat-asc",
            SortKey::FatDesc => "fat-desc",
            SortKey::Unsorted => "unsorted",
        }
    }
}

impl FromStr for SortKey {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(SortKey::parse(s))
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Independent, optional predicates plus one sort key.
///
/// All active predicates are ANDed. An absent or empty predicate passes
/// everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterCriteria {
    /// Exact, case-sensitive name match.
    pub name: Option<String>,

    /// Exact, case-sensitive category match.
    pub category: Option<String>,

    pub carbs: Option<CarbsBand>,

    pub calories: Option<CaloriesBand>,

    /// Case-insensitive substring of the name, active from
    /// [`MIN_SEARCH_LEN`] characters after trimming.
    pub search: Option<String>,

    pub sort: SortKey,
}

impl FilterCriteria {
    /// The lowercased search term, if long enough to filter.
    pub fn active_search(&self) -> Option<String> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|term| term.chars().count() >= MIN_SEARCH_LEN)
            .map(str::to_lowercase)
    }

    /// The name predicate, ignoring empty selections.
    pub fn active_name(&self) -> Option<&str> {
        self.name.as_deref().filter(|n| !n.is_empty())
    }

    /// The category predicate, ignoring empty selections.
    pub fn active_category(&self) -> Option<&str> {
        self.category.as_deref().filter(|c| !c.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_carbs_band_boundaries() {
        assert!(CarbsBand::VeryLow.contains(9.99));
        assert!(!CarbsBand::VeryLow.contains(10.0));
        assert!(CarbsBand::Low.contains(10.0));
        assert!(!CarbsBand::Low.contains(20.0));
        assert!(CarbsBand::MediumHigh.contains(49.9));
        assert!(CarbsBand::High.contains(50.0));
    }

    #[test]
    fn test_carbs_bands_partition() {
        for carbs in [0.0, 9.99, 10.0, 25.0, 39.99, 40.0, 50.0, 120.0] {
            let hits = CarbsBand::ALL.iter().filter(|b| b.contains(carbs)).count();
            assert_eq!(hits, 1, "carbs {} must fall in exactly one band", carbs);
        }
    }

    #[test]
    fn test_calories_band_boundaries() {
        assert!(CaloriesBand::Low.contains(199));
        assert!(!CaloriesBand::Low.contains(200));
        assert!(CaloriesBand::Medium.contains(200));
        assert!(CaloriesBand::Medium.contains(500));
        assert!(!CaloriesBand::High.contains(500));
        assert!(CaloriesBand::High.contains(501));
    }

    #[test]
    fn test_parse_bands() {
        assert_eq!("very-low".parse::<CarbsBand>().unwrap(), CarbsBand::VeryLow);
        assert_eq!(" Medium-High ".parse::<CarbsBand>().unwrap(), CarbsBand::MediumHigh);
        assert_eq!("medium".parse::<CaloriesBand>().unwrap(), CaloriesBand::Medium);
        assert!(matches!(
            "huge".parse::<CarbsBand>(),
            Err(LookupError::UnknownBand(_))
        ));
    }

    #[test]
    fn test_parse_sort_key() {
        assert_eq!(SortKey::parse("alphabetical"), SortKey::Alphabetical);
        assert_eq!(SortKey::parse("fat-desc"), SortKey::FatDesc);
        assert_eq!(SortKey::parse("protein-asc"), SortKey::Unsorted);
        assert_eq!(SortKey::parse(""), SortKey::Unsorted);
    }

    #[test]
    fn test_active_search() {
        let mut criteria = FilterCriteria::default();
        assert_eq!(criteria.active_search(), None);

        criteria.search = Some("ch".to_string());
        assert_eq!(criteria.active_search(), None);

        criteria.search = Some("  ch  ".to_string());
        assert_eq!(criteria.active_search(), None);

        criteria.search = Some(" CHE ".to_string());
        assert_eq!(criteria.active_search().as_deref(), Some("che"));
    }
}
