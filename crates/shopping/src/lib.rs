pub mod aggregation;
pub mod units;

// Re-export commonly used types
pub use aggregation::{
    format_for_shopping, format_ingredient, format_quantity, IngredientAggregator,
};
pub use units::{
    display_unit, known_units, normalize_unit, unit_category, units_equivalent, UnitCategory,
    UnitDefinition,
};
