mod loader;
pub mod structured;
pub mod tabular;

pub use loader::{load_dataset, parse_dataset, IngestMode};
