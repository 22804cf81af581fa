use thiserror::Error;

#[derive(Debug, Error)]
pub enum LookupError {
    #[error("Food not found: {0}")]
    FoodNotFound(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("Could not load dataset: {0}")]
    Ingestion(String),

    #[error("Invalid budget: {0}")]
    InvalidBudget(String),

    #[error("Invalid quantity: {0}")]
    InvalidQuantity(String),

    #[error("Unknown band: {0}")]
    UnknownBand(String),
}

pub type Result<T> = std::result::Result<T, LookupError>;
