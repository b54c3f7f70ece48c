use std::fs;
use std::path::{Path, PathBuf};

use mealplan::WeekMenu;
use tracing::debug;

use crate::error::AppError;

/// On-disk persistence for the weekly menu.
///
/// The menu is one JSON file under the data directory. A missing file reads
/// as an empty menu; saving creates the directory as needed.
pub struct MenuStore {
    path: PathBuf,
}

impl MenuStore {
    pub fn new(data_dir: &Path) -> Self {
        MenuStore {
            path: data_dir.join("menu.json"),
        }
    }

    pub fn load(&self) -> Result<WeekMenu, AppError> {
        if !self.path.exists() {
            return Ok(WeekMenu::new());
        }
        let raw = fs::read_to_string(&self.path)?;
        let menu = serde_json::from_str(&raw)?;
        Ok(menu)
    }

    pub fn save(&self, menu: &WeekMenu) -> Result<(), AppError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let raw = serde_json::to_string_pretty(menu)?;
        fs::write(&self.path, raw)?;
        debug!(path = %self.path.display(), assignments = menu.len(), "saved menu");
        Ok(())
    }

    pub fn clear(&self) -> Result<(), AppError> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
        }
        Ok(())
    }
}

/// On-disk persistence for favorite recipe ids.
///
/// Ids are kept in the order they were added; adding an existing id or
/// removing a missing one is a no-op.
pub struct FavoritesStore {
    path: PathBuf,
}

impl FavoritesStore {
    pub fn new(data_dir: &Path) -> Self {
        FavoritesStore {
            path: data_dir.join("favorites.json"),
        }
    }

    pub fn load(&self) -> Result<Vec<String>, AppError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let raw = fs::read_to_string(&self.path)?;
        let ids = serde_json::from_str(&raw)?;
        Ok(ids)
    }

    pub fn save(&self, ids: &[String]) -> Result<(), AppError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let raw = serde_json::to_string_pretty(ids)?;
        fs::write(&self.path, raw)?;
        Ok(())
    }

    /// Add an id. Returns false when it was already a favorite.
    pub fn add(&self, id: &str) -> Result<bool, AppError> {
        let mut ids = self.load()?;
        if ids.iter().any(|existing| existing == id) {
            return Ok(false);
        }
        ids.push(id.to_string());
        self.save(&ids)?;
        Ok(true)
    }

    /// Remove an id. Returns false when it was not a favorite.
    pub fn remove(&self, id: &str) -> Result<bool, AppError> {
        let mut ids = self.load()?;
        let before = ids.len();
        ids.retain(|existing| existing != id);
        if ids.len() == before {
            return Ok(false);
        }
        self.save(&ids)?;
        Ok(true)
    }
}
