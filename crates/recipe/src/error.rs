use thiserror::Error;

#[derive(Error, Debug)]
pub enum RecipeError {
    #[error("catalog data is invalid: {0}")]
    Catalog(#[from] serde_json::Error),

    #[error("unknown recipe: {0}")]
    UnknownRecipe(String),
}
