use recipe::RecipeError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Recipe error: {0}")]
    RecipeError(#[from] RecipeError),

    #[error("Storage error: {0}")]
    StorageError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    ConfigError(#[from] config::ConfigError),

    #[error("Invalid slot '{0}': expected day-meal, like monday-dinner")]
    InvalidSlot(String),
}
