use std::collections::HashMap;

use tracing::debug;

use recipe::{Ingredient, Quantity, Recipe};

use crate::units::{display_unit, normalize_unit};

/// Combines the ingredients of several recipes into one shopping list.
///
/// Ingredients are grouped by item name (case-insensitive). Within a group,
/// numeric quantities carrying the same canonical unit are summed; different
/// units stay as separate lines, and textual quantities ("to taste") are
/// deduplicated rather than summed.
#[derive(Default)]
pub struct IngredientAggregator;

impl IngredientAggregator {
    pub fn new() -> Self {
        Self
    }

    /// Aggregate every ingredient of the given recipes into display lines,
    /// sorted for the shopping page.
    pub fn aggregate_for_shopping<'a, I>(&self, recipes: I) -> Vec<String>
    where
        I: IntoIterator<Item = &'a Recipe>,
    {
        let mut order: Vec<String> = Vec::new();
        let mut groups: HashMap<String, (String, Vec<&'a Ingredient>)> = HashMap::new();

        let mut recipe_count = 0usize;
        for recipe in recipes {
            recipe_count += 1;
            for ingredient in &recipe.ingredients {
                let key = ingredient.item.trim().to_lowercase();
                if key.is_empty() {
                    continue;
                }
                let (_, members) = groups.entry(key.clone()).or_insert_with(|| {
                    order.push(key.clone());
                    (ingredient.item.trim().to_string(), Vec::new())
                });
                members.push(ingredient);
            }
        }

        let mut lines: Vec<String> = Vec::new();
        for key in &order {
            if let Some((name, members)) = groups.get(key) {
                match members.as_slice() {
                    [only] => lines.push(format_for_shopping(only)),
                    _ => ItemGroup::collect(name, members).render(&mut lines),
                }
            }
        }

        // Sort by the final word of each line, which is usually the item
        // name ("2 cups flour" sorts under "flour").
        lines.sort_by_key(|line| {
            line.split_whitespace()
                .next_back()
                .unwrap_or_default()
                .to_lowercase()
        });

        debug!(recipes = recipe_count, lines = lines.len(), "aggregated shopping list");
        lines
    }
}

/// The buckets of one multi-member item group.
struct ItemGroup<'a> {
    /// First-seen spelling, used for display.
    name: &'a str,
    /// Numeric totals per canonical unit, in first-seen order.
    by_unit: Vec<(String, f64)>,
    /// Total of quantities given without any unit.
    unitless: f64,
    has_unitless: bool,
    /// Textual quantities, deduplicated, in first-seen order.
    texts: Vec<String>,
}

impl<'a> ItemGroup<'a> {
    fn collect(name: &'a str, members: &[&Ingredient]) -> Self {
        let mut group = ItemGroup {
            name,
            by_unit: Vec::new(),
            unitless: 0.0,
            has_unitless: false,
            texts: Vec::new(),
        };
        for member in members {
            group.add(member);
        }
        group
    }

    fn add(&mut self, ingredient: &Ingredient) {
        match &ingredient.quantity {
            Quantity::Numeric(amount) => match &ingredient.unit {
                Some(unit) => {
                    let canonical = normalize_unit(unit);
                    match self.by_unit.iter_mut().find(|(u, _)| *u == canonical) {
                        Some((_, total)) => *total += amount,
                        None => self.by_unit.push((canonical, *amount)),
                    }
                }
                None => {
                    self.unitless += amount;
                    self.has_unitless = true;
                }
            },
            Quantity::Text(text) => {
                // Exact-string dedup: "To taste" and "to taste" stay distinct.
                if !self.texts.iter().any(|t| t == text) {
                    self.texts.push(text.clone());
                }
            }
        }
    }

    fn render(&self, lines: &mut Vec<String>) {
        for (unit, total) in &self.by_unit {
            lines.push(format!(
                "{} {} {}",
                format_quantity(*total),
                display_unit(unit, *total),
                self.name
            ));
        }
        if self.has_unitless {
            lines.push(format!("{} {}", format_quantity(self.unitless), self.name));
        }
        for text in &self.texts {
            lines.push(format!("{} {}", text, self.name));
        }
    }
}

const COMMON_FRACTIONS: &[(f64, &str)] = &[
    (0.25, "1/4"),
    (0.333, "1/3"),
    (0.5, "1/2"),
    (0.667, "2/3"),
    (0.75, "3/4"),
];

/// Format a numeric quantity for display: whole numbers without a decimal
/// point, common fractions as "1/2" or "2 1/3", everything else as a short
/// decimal.
pub fn format_quantity(quantity: f64) -> String {
    let rounded = quantity.round();
    if (quantity - rounded).abs() < 0.01 {
        return format!("{}", rounded as i64);
    }

    let whole = quantity.trunc();
    let remainder = quantity - whole;
    for (value, display) in COMMON_FRACTIONS {
        if (remainder - value).abs() < 0.01 {
            return if whole >= 1.0 {
                format!("{} {}", whole as i64, display)
            } else {
                display.to_string()
            };
        }
    }

    let formatted = if quantity < 10.0 {
        format!("{quantity:.2}")
    } else {
        format!("{quantity:.1}")
    };
    let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');
    trimmed.to_string()
}

/// Shopping-list rendering of a single ingredient: quantity and unit as
/// written (no fraction rendering, no unit normalization), preparation and
/// notes dropped.
pub fn format_for_shopping(ingredient: &Ingredient) -> String {
    let mut parts: Vec<String> = vec![ingredient.quantity.raw()];
    if let Some(unit) = &ingredient.unit {
        parts.push(unit.clone());
    }
    parts.push(ingredient.item.clone());
    parts.retain(|p| !p.trim().is_empty());
    parts.join(" ")
}

/// Recipe-page rendering of a single ingredient, with preparation and notes.
pub fn format_ingredient(ingredient: &Ingredient) -> String {
    let mut out = String::new();

    match &ingredient.quantity {
        Quantity::Numeric(amount) => {
            out.push_str(&format_quantity(*amount));
            if let Some(unit) = &ingredient.unit {
                out.push(' ');
                out.push_str(&display_unit(&normalize_unit(unit), *amount));
            }
        }
        Quantity::Text(text) => out.push_str(text),
    }

    if !out.is_empty() {
        out.push(' ');
    }
    out.push_str(&ingredient.item);

    if let Some(preparation) = &ingredient.preparation {
        out.push_str(", ");
        out.push_str(preparation);
    }
    if let Some(notes) = &ingredient.notes {
        out.push_str(" (");
        out.push_str(notes);
        out.push(')');
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use recipe::{Difficulty, Recipe};

    fn recipe(id: &str, ingredients: Vec<Ingredient>) -> Recipe {
        Recipe {
            id: id.to_string(),
            title: id.to_string(),
            description: String::new(),
            category: "Main Course".to_string(),
            style: None,
            difficulty: Difficulty::Easy,
            prep_time: "5 min".to_string(),
            cook_time: "10 min".to_string(),
            servings: 2,
            ingredients,
            instructions: vec![],
        }
    }

    fn ing(quantity: Quantity, unit: Option<&str>, item: &str) -> Ingredient {
        Ingredient {
            quantity,
            unit: unit.map(str::to_string),
            item: item.to_string(),
            preparation: None,
            notes: None,
        }
    }

    #[test]
    fn sums_same_item_same_unit_across_recipes() {
        let a = recipe("a", vec![ing(Quantity::Numeric(1.0), Some("cup"), "flour")]);
        let b = recipe("b", vec![ing(Quantity::Numeric(1.0), Some("cups"), "flour")]);
        let lines = IngredientAggregator::new().aggregate_for_shopping([&a, &b]);
        assert_eq!(lines, vec!["2 cups flour"]);
    }

    #[test]
    fn different_units_stay_on_separate_lines() {
        let a = recipe("a", vec![ing(Quantity::Numeric(1.0), Some("cup"), "flour")]);
        let b = recipe("b", vec![ing(Quantity::Numeric(2.0), Some("tbsp"), "flour")]);
        let lines = IngredientAggregator::new().aggregate_for_shopping([&a, &b]);
        assert_eq!(lines, vec!["1 cup flour", "2 tbsp flour"]);
    }

    #[test]
    fn grouping_is_case_insensitive_keeping_first_spelling() {
        let a = recipe("a", vec![ing(Quantity::Numeric(1.0), Some("clove"), "Garlic")]);
        let b = recipe("b", vec![ing(Quantity::Numeric(2.0), Some("cloves"), "garlic")]);
        let lines = IngredientAggregator::new().aggregate_for_shopping([&a, &b]);
        assert_eq!(lines, vec!["3 cloves Garlic"]);
    }

    #[test]
    fn textual_quantities_are_deduplicated() {
        let a = recipe("a", vec![ing(Quantity::Text("to taste".to_string()), None, "salt")]);
        let b = recipe("b", vec![ing(Quantity::Text("to taste".to_string()), None, "salt")]);
        let lines = IngredientAggregator::new().aggregate_for_shopping([&a, &b]);
        assert_eq!(lines, vec!["to taste salt"]);
    }

    #[test]
    fn textual_dedup_is_exact_not_case_insensitive() {
        let a = recipe("a", vec![ing(Quantity::Text("to taste".to_string()), None, "salt")]);
        let b = recipe("b", vec![ing(Quantity::Text("To taste".to_string()), None, "salt")]);
        let lines = IngredientAggregator::new().aggregate_for_shopping([&a, &b]);
        assert_eq!(lines, vec!["to taste salt", "To taste salt"]);
    }

    #[test]
    fn unitless_quantities_sum() {
        let a = recipe("a", vec![ing(Quantity::Numeric(2.0), None, "eggs")]);
        let b = recipe("b", vec![ing(Quantity::Numeric(3.0), None, "eggs")]);
        let lines = IngredientAggregator::new().aggregate_for_shopping([&a, &b]);
        assert_eq!(lines, vec!["5 eggs"]);
    }

    #[test]
    fn lines_sort_by_last_word() {
        let a = recipe(
            "a",
            vec![
                ing(Quantity::Numeric(1.0), Some("cup"), "sugar"),
                ing(Quantity::Numeric(2.0), None, "eggs"),
                ing(Quantity::Numeric(1.0), Some("cup"), "flour"),
            ],
        );
        let lines = IngredientAggregator::new().aggregate_for_shopping([&a]);
        assert_eq!(lines, vec!["2 eggs", "1 cup flour", "1 cup sugar"]);
    }

    #[test]
    fn fractional_totals_render_as_fractions() {
        let a = recipe("a", vec![ing(Quantity::Numeric(0.25), Some("cup"), "butter")]);
        let b = recipe("b", vec![ing(Quantity::Numeric(0.25), Some("cup"), "butter")]);
        let lines = IngredientAggregator::new().aggregate_for_shopping([&a, &b]);
        assert_eq!(lines, vec!["1/2 cup butter"]);
    }

    #[test]
    fn format_quantity_whole_fraction_decimal() {
        assert_eq!(format_quantity(2.0), "2");
        assert_eq!(format_quantity(2.001), "2");
        assert_eq!(format_quantity(0.5), "1/2");
        assert_eq!(format_quantity(0.75), "3/4");
        assert_eq!(format_quantity(1.5), "1 1/2");
        assert_eq!(format_quantity(2.333), "2 1/3");
        assert_eq!(format_quantity(0.667), "2/3");
        assert_eq!(format_quantity(2.3), "2.3");
        assert_eq!(format_quantity(0.12), "0.12");
        assert_eq!(format_quantity(12.55), "12.6");
    }

    #[test]
    fn single_member_groups_pass_through_as_written() {
        let a = recipe(
            "a",
            vec![
                ing(Quantity::Numeric(1.0), Some("cups"), "flour"),
                ing(Quantity::Numeric(0.5), Some("cup"), "butter"),
            ],
        );
        let lines = IngredientAggregator::new().aggregate_for_shopping([&a]);
        // Quantity and unit are kept as written: no normalization, and the
        // decimal is not rewritten as a fraction.
        assert_eq!(lines, vec!["0.5 cup butter", "1 cups flour"]);
    }

    #[test]
    fn format_for_shopping_drops_preparation_and_notes() {
        let mut butter = ing(Quantity::Numeric(0.5), Some("cup"), "butter");
        butter.preparation = Some("softened".to_string());
        butter.notes = Some("unsalted".to_string());
        assert_eq!(format_for_shopping(&butter), "0.5 cup butter");

        let eggs = ing(Quantity::Numeric(3.0), None, "eggs");
        assert_eq!(format_for_shopping(&eggs), "3 eggs");
    }

    #[test]
    fn format_ingredient_renders_all_fields() {
        let mut onion = ing(Quantity::Numeric(1.0), None, "onion");
        onion.preparation = Some("diced".to_string());
        assert_eq!(format_ingredient(&onion), "1 onion, diced");

        let mut flour = ing(Quantity::Numeric(2.0), Some("cups"), "flour");
        flour.notes = Some("sifted".to_string());
        assert_eq!(format_ingredient(&flour), "2 cups flour (sifted)");

        let salt = ing(Quantity::Text("to taste".to_string()), None, "salt");
        assert_eq!(format_ingredient(&salt), "to taste salt");
    }
}
