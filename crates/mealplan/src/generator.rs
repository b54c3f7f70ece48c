use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing::debug;

use recipe::Recipe;

use crate::types::{Meal, Weekday, WeekMenu};

/// Slots the generator must leave alone, in addition to anything already
/// assigned in the existing menu.
#[derive(Debug, Clone, Default)]
pub struct MenuGenerationOptions {
    pub excluded_days: HashSet<Weekday>,
    pub excluded_meals: HashSet<Meal>,
    pub excluded_slots: HashSet<(Weekday, Meal)>,
}

impl MenuGenerationOptions {
    fn excludes(&self, day: Weekday, meal: Meal) -> bool {
        self.excluded_days.contains(&day)
            || self.excluded_meals.contains(&meal)
            || self.excluded_slots.contains(&(day, meal))
    }
}

/// Fill the open slots of a menu with randomly drawn recipes.
///
/// Existing assignments are never overwritten. Recipes are drawn from a
/// shuffled copy of the pool without repeats until the pool is exhausted,
/// then the pool is reshuffled and drawing starts over. With an empty pool
/// the menu is returned with its open slots still open.
///
/// Passing a seed makes the draw reproducible.
pub fn generate_random_menu(
    recipes: &[Recipe],
    days: &[Weekday],
    meals: &[Meal],
    options: &MenuGenerationOptions,
    existing: &WeekMenu,
    seed: Option<u64>,
) -> WeekMenu {
    let mut menu = existing.clone();
    if recipes.is_empty() {
        return menu;
    }

    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let mut pool: Vec<&Recipe> = recipes.iter().collect();
    pool.shuffle(&mut rng);
    let mut cursor = 0usize;

    let mut filled = 0usize;
    for &day in days {
        for &meal in meals {
            if options.excludes(day, meal) || menu.is_filled(day, meal) {
                continue;
            }
            if cursor >= pool.len() {
                pool.shuffle(&mut rng);
                cursor = 0;
            }
            menu.assign(day, meal, pool[cursor].clone());
            cursor += 1;
            filled += 1;
        }
    }

    debug!(filled, total = menu.len(), "generated menu");
    menu
}
