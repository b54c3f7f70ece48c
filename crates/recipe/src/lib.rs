pub mod catalog;
pub mod error;
pub mod parser;
pub mod search;
pub mod types;

pub use catalog::Catalog;
pub use error::RecipeError;
pub use parser::{parse_line, ParsedLine};
pub use search::{filter_and_sort, RecipeFilter, SortKey};
pub use types::{Difficulty, Ingredient, Quantity, Recipe};
