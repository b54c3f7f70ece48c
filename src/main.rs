use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::Path;
use strum::VariantArray;

use mealgrid::error::AppError;
use mealgrid::store::{FavoritesStore, MenuStore};
use mealplan::{generate_random_menu, Meal, MenuGenerationOptions, Weekday, WeekMenu};
use recipe::{filter_and_sort, Catalog, Difficulty, RecipeFilter, SortKey};
use shopping::{format_ingredient, IngredientAggregator};

/// mealgrid - weekly menu planning from a family recipe box
#[derive(Parser)]
#[command(name = "mealgrid")]
#[command(about = "Browse recipes, plan a week of meals, build the shopping list", long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List recipes, optionally filtered and sorted
    Recipes {
        /// Match against title and description
        #[arg(long)]
        search: Option<String>,

        /// Filter by category, e.g. "Main Course"
        #[arg(long)]
        category: Option<String>,

        /// Filter by difficulty: easy, medium or hard
        #[arg(long)]
        difficulty: Option<Difficulty>,

        /// Filter by style, e.g. "Italian"
        #[arg(long)]
        style: Option<String>,

        /// Sort order: title, difficulty, category, style or cook-time
        #[arg(long, default_value = "title")]
        sort: SortKey,
    },
    /// Show one recipe in full
    Show {
        /// Recipe id, e.g. dads-pancakes
        id: String,
    },
    /// Print the current weekly menu
    Menu,
    /// Fill the open menu slots with random recipes
    Generate {
        /// Meals to plan (defaults to dinner only)
        #[arg(long, value_delimiter = ',', default_values_t = vec![Meal::Dinner])]
        meals: Vec<Meal>,

        /// Leave a whole day unplanned (repeatable)
        #[arg(long = "exclude-day")]
        exclude_day: Vec<Weekday>,

        /// Leave a meal unplanned on every day (repeatable)
        #[arg(long = "exclude-meal")]
        exclude_meal: Vec<Meal>,

        /// Leave one slot unplanned, e.g. monday-dinner (repeatable)
        #[arg(long = "exclude-slot")]
        exclude_slot: Vec<String>,

        /// Seed for a reproducible draw
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Put a recipe into one menu slot
    Assign {
        day: Weekday,
        meal: Meal,
        /// Recipe id
        id: String,
    },
    /// Empty one menu slot
    Remove {
        day: Weekday,
        meal: Meal,
    },
    /// Drop the whole menu
    Clear,
    /// Aggregate the menu's ingredients into a shopping list
    ShoppingList,
    /// Manage favorite recipes
    Favorite {
        #[command(subcommand)]
        command: FavoriteCommands,
    },
}

#[derive(Subcommand)]
enum FavoriteCommands {
    /// Mark a recipe as a favorite
    Add { id: String },
    /// Unmark a favorite
    Remove { id: String },
    /// List favorites
    List,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = mealgrid::config::Config::load(cli.config.clone())?;
    config.validate().map_err(|e| anyhow::anyhow!(e))?;

    // Initialize observability (tracing + logging)
    mealgrid::observability::init_observability(&config.observability.log_level)?;

    let catalog = Catalog::load_embedded()?;
    let data_dir = Path::new(&config.storage.data_dir);
    let menu_store = MenuStore::new(data_dir);
    let favorites_store = FavoritesStore::new(data_dir);

    match cli.command {
        Commands::Recipes {
            search,
            category,
            difficulty,
            style,
            sort,
        } => {
            let filter = RecipeFilter {
                search,
                category,
                difficulty,
                style,
            };
            recipes_command(&catalog, &filter, sort);
            Ok(())
        }
        Commands::Show { id } => show_command(&catalog, &id),
        Commands::Menu => {
            print_menu(&menu_store.load()?);
            Ok(())
        }
        Commands::Generate {
            meals,
            exclude_day,
            exclude_meal,
            exclude_slot,
            seed,
        } => generate_command(
            &catalog,
            &menu_store,
            meals,
            exclude_day,
            exclude_meal,
            exclude_slot,
            seed,
        ),
        Commands::Assign { day, meal, id } => {
            let recipe = catalog.require(&id)?.clone();
            let mut menu = menu_store.load()?;
            menu.assign(day, meal, recipe);
            menu_store.save(&menu)?;
            println!("Assigned {} to {} {}", id, day, meal);
            Ok(())
        }
        Commands::Remove { day, meal } => {
            let mut menu = menu_store.load()?;
            match menu.remove(day, meal) {
                Some(recipe) => {
                    menu_store.save(&menu)?;
                    println!("Removed {} from {} {}", recipe.id, day, meal);
                }
                None => println!("Nothing planned for {} {}", day, meal),
            }
            Ok(())
        }
        Commands::Clear => {
            menu_store.clear()?;
            println!("Menu cleared");
            Ok(())
        }
        Commands::ShoppingList => {
            let menu = menu_store.load()?;
            let lines = IngredientAggregator::new().aggregate_for_shopping(menu.recipes());
            if lines.is_empty() {
                println!("The menu is empty; nothing to buy");
            }
            for line in lines {
                println!("{line}");
            }
            Ok(())
        }
        Commands::Favorite { command } => favorite_command(&catalog, &favorites_store, command),
    }
}

fn recipes_command(catalog: &Catalog, filter: &RecipeFilter, sort: SortKey) {
    let recipes = filter_and_sort(catalog.recipes(), filter, sort);
    if recipes.is_empty() {
        println!("No recipes match");
        return;
    }
    for recipe in recipes {
        println!(
            "{:<28} {:<12} {:<10} cook {}",
            recipe.id, recipe.category, recipe.difficulty, recipe.cook_time
        );
    }
}

fn show_command(catalog: &Catalog, id: &str) -> Result<()> {
    let recipe = catalog.require(id)?;
    println!("{}", recipe.title);
    println!("{}", recipe.description);
    println!(
        "{} | {} | prep {} | cook {} | serves {}",
        recipe.category, recipe.difficulty, recipe.prep_time, recipe.cook_time, recipe.servings
    );
    if let Some(style) = &recipe.style {
        println!("Style: {style}");
    }
    println!();
    println!("Ingredients:");
    for ingredient in &recipe.ingredients {
        println!("  {}", format_ingredient(ingredient));
    }
    println!();
    println!("Instructions:");
    for (i, step) in recipe.instructions.iter().enumerate() {
        println!("  {}. {}", i + 1, step);
    }
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn generate_command(
    catalog: &Catalog,
    menu_store: &MenuStore,
    meals: Vec<Meal>,
    exclude_day: Vec<Weekday>,
    exclude_meal: Vec<Meal>,
    exclude_slot: Vec<String>,
    seed: Option<u64>,
) -> Result<()> {
    let mut options = MenuGenerationOptions {
        excluded_days: exclude_day.into_iter().collect(),
        excluded_meals: exclude_meal.into_iter().collect(),
        ..Default::default()
    };
    for slot in &exclude_slot {
        options.excluded_slots.insert(parse_slot(slot)?);
    }

    let existing = menu_store.load()?;
    let menu = generate_random_menu(
        catalog.recipes(),
        Weekday::VARIANTS,
        &meals,
        &options,
        &existing,
        seed,
    );
    menu_store.save(&menu)?;
    print_menu(&menu);
    Ok(())
}

fn favorite_command(
    catalog: &Catalog,
    store: &FavoritesStore,
    command: FavoriteCommands,
) -> Result<()> {
    match command {
        FavoriteCommands::Add { id } => {
            catalog.require(&id)?;
            if store.add(&id)? {
                println!("Added {id} to favorites");
            } else {
                println!("{id} is already a favorite");
            }
        }
        FavoriteCommands::Remove { id } => {
            if store.remove(&id)? {
                println!("Removed {id} from favorites");
            } else {
                println!("{id} is not a favorite");
            }
        }
        FavoriteCommands::List => {
            let ids = store.load()?;
            if ids.is_empty() {
                println!("No favorites yet");
            }
            for id in ids {
                match catalog.get(&id) {
                    Some(recipe) => println!("{:<28} {}", recipe.id, recipe.title),
                    None => println!("{id}"),
                }
            }
        }
    }
    Ok(())
}

/// Parse "monday-dinner" into its day and meal.
fn parse_slot(slot: &str) -> Result<(Weekday, Meal), AppError> {
    let (day, meal) = slot
        .split_once('-')
        .ok_or_else(|| AppError::InvalidSlot(slot.to_string()))?;
    let day = day
        .parse::<Weekday>()
        .map_err(|_| AppError::InvalidSlot(slot.to_string()))?;
    let meal = meal
        .parse::<Meal>()
        .map_err(|_| AppError::InvalidSlot(slot.to_string()))?;
    Ok((day, meal))
}

fn print_menu(menu: &WeekMenu) {
    if menu.is_empty() {
        println!("The menu is empty");
        return;
    }
    for &day in Weekday::VARIANTS {
        let Some(day_menu) = menu.day(day) else {
            continue;
        };
        println!("{day}:");
        for (meal, recipe) in day_menu {
            println!("  {:<10} {}", meal.to_string(), recipe.title);
        }
    }
}
