pub mod prompts;
pub mod render;

pub use prompts::{
    prompt_budget, prompt_criteria, prompt_food_name, prompt_grams, prompt_yes_no, suggest_names,
};
pub use render::{display_food_list, display_labels, display_shopping_list, severity_marker};
