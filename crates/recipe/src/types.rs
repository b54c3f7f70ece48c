use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString, VariantArray};

/// Ingredient amount as written in a recipe.
///
/// Catalog data holds both plain numbers (`2`, `0.5`) and phrases that never
/// participate in arithmetic (`"to taste"`, `"1/4 to 1/2"`). Only `Numeric`
/// quantities are summed during shopping-list aggregation; `Text` quantities
/// are deduplicated verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Quantity {
    Numeric(f64),
    Text(String),
}

impl Quantity {
    /// Display form used when the quantity is printed as-is.
    pub fn raw(&self) -> String {
        match self {
            Quantity::Numeric(v) => {
                if (v - v.round()).abs() < f64::EPSILON {
                    format!("{}", v.round() as i64)
                } else {
                    format!("{v}")
                }
            }
            Quantity::Text(s) => s.clone(),
        }
    }
}

impl Default for Quantity {
    fn default() -> Self {
        Quantity::Numeric(1.0)
    }
}

/// One line item belonging to a recipe.
///
/// `item` is the grouping key for aggregation (matched case-insensitively).
/// `preparation` and `notes` are cosmetic and never reach the shopping list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    #[serde(default)]
    pub quantity: Quantity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    pub item: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preparation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Ingredient {
    pub fn new(quantity: Quantity, unit: Option<&str>, item: &str) -> Self {
        Ingredient {
            quantity,
            unit: unit.map(str::to_string),
            item: item.to_string(),
            preparation: None,
            notes: None,
        }
    }
}

#[derive(
    EnumString,
    Display,
    VariantArray,
    AsRefStr,
    Default,
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
)]
#[strum(ascii_case_insensitive)]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Ordering used when sorting recipes by difficulty.
    pub fn rank(&self) -> u8 {
        match self {
            Difficulty::Easy => 1,
            Difficulty::Medium => 2,
            Difficulty::Hard => 3,
        }
    }
}

/// A catalog recipe. The planning and shopping engines only read `id`,
/// `title`, and `ingredients`; the remaining metadata feeds browsing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
    pub difficulty: Difficulty,
    pub prep_time: String,
    pub cook_time: String,
    pub servings: u32,
    pub ingredients: Vec<Ingredient>,
    #[serde(default)]
    pub instructions: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quantity_deserializes_numbers_and_text() {
        let n: Quantity = serde_json::from_str("1.5").unwrap();
        assert_eq!(n, Quantity::Numeric(1.5));

        let t: Quantity = serde_json::from_str("\"to taste\"").unwrap();
        assert_eq!(t, Quantity::Text("to taste".to_string()));
    }

    #[test]
    fn quantity_defaults_to_one() {
        assert_eq!(Quantity::default(), Quantity::Numeric(1.0));
    }

    #[test]
    fn quantity_raw_trims_whole_numbers() {
        assert_eq!(Quantity::Numeric(2.0).raw(), "2");
        assert_eq!(Quantity::Numeric(0.5).raw(), "0.5");
        assert_eq!(Quantity::Text("pinch".into()).raw(), "pinch");
    }

    #[test]
    fn difficulty_parses_case_insensitively() {
        assert_eq!("easy".parse::<Difficulty>().unwrap(), Difficulty::Easy);
        assert_eq!("Hard".parse::<Difficulty>().unwrap(), Difficulty::Hard);
        assert!(Difficulty::Easy.rank() < Difficulty::Hard.rank());
    }

    #[test]
    fn ingredient_optional_fields_default() {
        let ing: Ingredient =
            serde_json::from_str(r#"{"quantity": 2, "unit": "cups", "item": "flour"}"#).unwrap();
        assert_eq!(ing.quantity, Quantity::Numeric(2.0));
        assert_eq!(ing.unit.as_deref(), Some("cups"));
        assert!(ing.preparation.is_none());
        assert!(ing.notes.is_none());
    }
}
