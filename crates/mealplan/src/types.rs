use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString, VariantArray};

use recipe::Recipe;

/// Day of the week, ordered Monday first.
#[derive(
    EnumString,
    Display,
    VariantArray,
    AsRefStr,
    Serialize,
    Deserialize,
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

/// Meal slot within a day.
#[derive(
    EnumString,
    Display,
    VariantArray,
    AsRefStr,
    Serialize,
    Deserialize,
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum Meal {
    Breakfast,
    Lunch,
    Dinner,
}

/// The meals assigned for one day.
pub type DayMenu = BTreeMap<Meal, Recipe>;

/// A week of assigned meals.
///
/// Recipes are stored by value so a saved menu survives catalog changes.
/// Days with no assignments are absent rather than empty.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct WeekMenu {
    days: BTreeMap<Weekday, DayMenu>,
}

impl WeekMenu {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn assign(&mut self, day: Weekday, meal: Meal, recipe: Recipe) {
        self.days.entry(day).or_default().insert(meal, recipe);
    }

    /// Remove an assignment. Returns the removed recipe, if any. A day left
    /// with no meals is dropped entirely.
    pub fn remove(&mut self, day: Weekday, meal: Meal) -> Option<Recipe> {
        let day_menu = self.days.get_mut(&day)?;
        let removed = day_menu.remove(&meal);
        if day_menu.is_empty() {
            self.days.remove(&day);
        }
        removed
    }

    pub fn get(&self, day: Weekday, meal: Meal) -> Option<&Recipe> {
        self.days.get(&day)?.get(&meal)
    }

    pub fn is_filled(&self, day: Weekday, meal: Meal) -> bool {
        self.get(day, meal).is_some()
    }

    pub fn day(&self, day: Weekday) -> Option<&DayMenu> {
        self.days.get(&day)
    }

    /// Iterate all assignments in day, then meal, order.
    pub fn iter(&self) -> impl Iterator<Item = (Weekday, Meal, &Recipe)> {
        self.days
            .iter()
            .flat_map(|(day, menu)| menu.iter().map(|(meal, recipe)| (*day, *meal, recipe)))
    }

    /// All assigned recipes, in day then meal order. Duplicates are kept:
    /// a recipe planned twice contributes its ingredients twice.
    pub fn recipes(&self) -> Vec<&Recipe> {
        self.iter().map(|(_, _, recipe)| recipe).collect()
    }

    pub fn len(&self) -> usize {
        self.days.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn clear(&mut self) {
        self.days.clear();
    }
}
