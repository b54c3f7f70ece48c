use crate::error::RecipeError;
use crate::types::Recipe;

/// The fixed recipe set, compiled into the binary.
static RECIPES_JSON: &str = include_str!("../data/recipes.json");

/// Read-only recipe catalog.
///
/// The data set is embedded; `load_embedded` parses it once and the result is
/// shared read-only from there on. There is no mutation API.
#[derive(Debug, Clone)]
pub struct Catalog {
    recipes: Vec<Recipe>,
}

impl Catalog {
    pub fn load_embedded() -> Result<Self, RecipeError> {
        let recipes: Vec<Recipe> = serde_json::from_str(RECIPES_JSON)?;
        Ok(Catalog { recipes })
    }

    /// Build a catalog from caller-supplied recipes (used by tests and hosts
    /// that bring their own data).
    pub fn from_recipes(recipes: Vec<Recipe>) -> Self {
        Catalog { recipes }
    }

    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Recipe> {
        self.recipes.iter().find(|r| r.id == id)
    }

    pub fn require(&self, id: &str) -> Result<&Recipe, RecipeError> {
        self.get(id)
            .ok_or_else(|| RecipeError::UnknownRecipe(id.to_string()))
    }

    /// Distinct categories, sorted.
    pub fn categories(&self) -> Vec<String> {
        let mut out: Vec<String> = self.recipes.iter().map(|r| r.category.clone()).collect();
        out.sort();
        out.dedup();
        out
    }

    /// Distinct styles, sorted. Recipes without a style are skipped.
    pub fn styles(&self) -> Vec<String> {
        let mut out: Vec<String> = self
            .recipes
            .iter()
            .filter_map(|r| r.style.clone())
            .collect();
        out.sort();
        out.dedup();
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Quantity;

    #[test]
    fn embedded_catalog_parses() {
        let catalog = Catalog::load_embedded().unwrap();
        assert!(catalog.len() >= 12);
        assert!(!catalog.is_empty());
    }

    #[test]
    fn every_recipe_has_non_empty_items() {
        let catalog = Catalog::load_embedded().unwrap();
        for recipe in catalog.recipes() {
            assert!(!recipe.ingredients.is_empty(), "{} has no ingredients", recipe.id);
            for ing in &recipe.ingredients {
                assert!(!ing.item.trim().is_empty(), "{} has an empty item", recipe.id);
            }
        }
    }

    #[test]
    fn lookup_by_id() {
        let catalog = Catalog::load_embedded().unwrap();
        let pancakes = catalog.get("dads-pancakes").unwrap();
        assert_eq!(pancakes.title, "Dad's Famous Pancakes");
        assert!(catalog.get("no-such-recipe").is_none());
        assert!(catalog.require("no-such-recipe").is_err());
    }

    #[test]
    fn catalog_holds_textual_quantities() {
        let catalog = Catalog::load_embedded().unwrap();
        let stew = catalog.get("cousins-beef-stew").unwrap();
        let salt = stew.ingredients.iter().find(|i| i.item == "salt").unwrap();
        assert_eq!(salt.quantity, Quantity::Text("to taste".to_string()));
    }

    #[test]
    fn categories_and_styles_are_distinct_sorted() {
        let catalog = Catalog::load_embedded().unwrap();
        let categories = cat_sorted(catalog.categories());
        assert!(categories.contains(&"Breakfast".to_string()));
        assert!(categories.contains(&"Main Course".to_string()));

        let styles = cat_sorted(catalog.styles());
        assert!(styles.contains(&"Italian".to_string()));
    }

    fn cat_sorted(v: Vec<String>) -> Vec<String> {
        let mut sorted = v.clone();
        sorted.sort();
        assert_eq!(v, sorted);
        v
    }
}
