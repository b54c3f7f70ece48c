use std::cmp::Ordering;
use std::sync::LazyLock;

use regex::Regex;
use strum::{Display, EnumString, VariantArray};

use crate::types::{Difficulty, Recipe};

static MINUTES_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(\d+)").unwrap());

/// Browse-page filter. All populated fields must match (AND semantics);
/// the search term matches title or description, case-insensitively.
#[derive(Debug, Clone, Default)]
pub struct RecipeFilter {
    pub search: Option<String>,
    pub category: Option<String>,
    pub difficulty: Option<Difficulty>,
    pub style: Option<String>,
}

impl RecipeFilter {
    pub fn matches(&self, recipe: &Recipe) -> bool {
        if let Some(term) = &self.search {
            let term = term.to_lowercase();
            let hit = recipe.title.to_lowercase().contains(&term)
                || recipe.description.to_lowercase().contains(&term);
            if !hit {
                return false;
            }
        }
        if let Some(category) = &self.category {
            if !recipe.category.eq_ignore_ascii_case(category) {
                return false;
            }
        }
        if let Some(difficulty) = &self.difficulty {
            if recipe.difficulty != *difficulty {
                return false;
            }
        }
        if let Some(style) = &self.style {
            match &recipe.style {
                Some(s) if s.eq_ignore_ascii_case(style) => {}
                _ => return false,
            }
        }
        true
    }
}

#[derive(EnumString, Display, VariantArray, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum SortKey {
    #[default]
    Title,
    Difficulty,
    Category,
    Style,
    CookTime,
}

/// Apply a filter and sort order to the catalog, returning references in
/// display order.
pub fn filter_and_sort<'a>(
    recipes: &'a [Recipe],
    filter: &RecipeFilter,
    sort: SortKey,
) -> Vec<&'a Recipe> {
    let mut out: Vec<&Recipe> = recipes.iter().filter(|r| filter.matches(r)).collect();
    out.sort_by(|a, b| compare(a, b, sort));
    out
}

fn compare(a: &Recipe, b: &Recipe, sort: SortKey) -> Ordering {
    match sort {
        SortKey::Title => a.title.cmp(&b.title),
        SortKey::Difficulty => a.difficulty.rank().cmp(&b.difficulty.rank()),
        SortKey::Category => a.category.cmp(&b.category),
        SortKey::Style => a.style.cmp(&b.style),
        SortKey::CookTime => cook_time_minutes(&a.cook_time).cmp(&cook_time_minutes(&b.cook_time)),
    }
}

/// Extract a sortable minute count from a cook-time string like
/// "20 min" or "2 hours".
fn cook_time_minutes(time: &str) -> u32 {
    let value = MINUTES_RE
        .captures(time)
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse::<u32>().ok())
        .unwrap_or(0);
    if time.to_lowercase().contains("hour") {
        value * 60
    } else {
        value
    }
}
