pub mod generator;
pub mod types;

// Re-export commonly used types
pub use generator::{generate_random_menu, MenuGenerationOptions};
pub use types::{DayMenu, Meal, Weekday, WeekMenu};
