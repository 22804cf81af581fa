pub mod criteria;
pub mod filter;

pub use criteria::{CaloriesBand, CarbsBand, FilterCriteria, SortKey, MIN_SEARCH_LEN};
pub use filter::{apply, sort_foods};
