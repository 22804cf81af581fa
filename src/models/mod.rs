mod food;
mod shopping;

pub use food::{Food, TRACE_SENTINEL};
pub use shopping::{ListItem, RoundedTotals, ShoppingListEntry, Totals};
