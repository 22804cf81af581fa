pub mod classify;
pub mod cli;
pub mod error;
pub mod ingest;
pub mod interface;
pub mod models;
pub mod pipeline;
pub mod session;
pub mod shopping;

pub use classify::{classify, Budget, Severity};
pub use error::{LookupError, Result};
pub use models::{Food, ShoppingListEntry};
pub use session::Session;
