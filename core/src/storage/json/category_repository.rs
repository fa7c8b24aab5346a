//! # JSON Category Repository
//!
//! File-based storage for procedure categories, kept in
//! `{data_directory}/categories.json`. Same conventions as the other
//! collection repositories: whole-file reads and writes, atomic temp-file
//! replacement, starter fallback.

use anyhow::Result;
use log::{debug, info, warn};
use shared::Category;
use std::fs;
use std::path::PathBuf;
use uuid::Uuid;

use super::connection::JsonConnection;
use crate::storage::traits::CategoryStorage;

/// JSON-based category repository backed by a single collection file
#[derive(Clone)]
pub struct CategoryRepository {
    connection: JsonConnection,
}

impl CategoryRepository {
    /// Create a new JSON category repository
    pub fn new(connection: JsonConnection) -> Self {
        Self { connection }
    }

    /// Get the categories JSON file path
    fn categories_file_path(&self) -> PathBuf {
        self.connection.data_file("categories.json")
    }

    /// Read all categories, falling back to the starter categories when the
    /// file is missing or unreadable
    fn read_categories(&self) -> Vec<Category> {
        let path = self.categories_file_path();

        if !path.exists() {
            debug!("Categories file {:?} not found, using starter categories", path);
            return self.connection.starter().categories.clone();
        }

        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) => {
                warn!("Failed to read categories file {:?}: {}. Using starter categories.", path, e);
                return self.connection.starter().categories.clone();
            }
        };

        match serde_json::from_str(&contents) {
            Ok(categories) => categories,
            Err(e) => {
                warn!("Failed to parse categories file {:?}: {}. Using starter categories.", path, e);
                self.connection.starter().categories.clone()
            }
        }
    }

    /// Write all categories to the JSON file
    fn write_categories(&self, categories: &[Category]) -> Result<()> {
        let path = self.categories_file_path();
        let temp_file_path = path.with_extension("json.tmp");

        let contents = serde_json::to_string_pretty(categories)?;

        // Write to temporary file first (atomic operation)
        fs::write(&temp_file_path, contents)?;

        // Atomically replace the original file
        fs::rename(&temp_file_path, &path)?;

        debug!("Successfully wrote {} categories to {:?}", categories.len(), path);
        Ok(())
    }
}

impl CategoryStorage for CategoryRepository {
    fn list_categories(&self) -> Vec<Category> {
        self.read_categories()
    }

    fn get_category(&self, category_id: Uuid) -> Option<Category> {
        self.read_categories()
            .into_iter()
            .find(|category| category.id == category_id)
    }

    fn store_category(&self, category: &Category) -> Result<()> {
        info!("Storing category: {}", category.id);

        let mut categories = self.read_categories();
        categories.push(category.clone());
        self.write_categories(&categories)
    }

    fn update_category(&self, category: &Category) -> Result<()> {
        info!("Updating category: {}", category.id);

        let mut categories = self.read_categories();
        match categories.iter_mut().find(|existing| existing.id == category.id) {
            Some(existing) => *existing = category.clone(),
            None => return Err(anyhow::anyhow!("Category not found: {}", category.id)),
        }
        self.write_categories(&categories)
    }

    fn delete_category(&self, category_id: Uuid) -> Result<bool> {
        info!("Deleting category: {}", category_id);

        let mut categories = self.read_categories();
        let original_len = categories.len();
        categories.retain(|category| category.id != category_id);

        if categories.len() == original_len {
            return Ok(false);
        }

        self.write_categories(&categories)?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn setup_test_repo() -> (CategoryRepository, TempDir) {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let connection = JsonConnection::new(temp_dir.path()).expect("Failed to create connection");
        (CategoryRepository::new(connection), temp_dir)
    }

    #[test]
    fn test_missing_file_falls_back_to_starter() {
        let (repo, _temp_dir) = setup_test_repo();

        let names: Vec<String> = repo
            .list_categories()
            .into_iter()
            .map(|category| category.name)
            .collect();
        assert_eq!(names, vec!["Health", "Hygiene", "Grooming", "Other"]);
    }

    #[test]
    fn test_store_and_get_category() {
        let (repo, _temp_dir) = setup_test_repo();

        let category = Category::named("Training");
        repo.store_category(&category)
            .expect("Failed to store category");

        let retrieved = repo
            .get_category(category.id)
            .expect("Category should exist");
        assert_eq!(retrieved.name, "Training");
    }

    #[test]
    fn test_update_category() {
        let (repo, _temp_dir) = setup_test_repo();

        let mut category = Category::named("Training");
        repo.store_category(&category)
            .expect("Failed to store category");

        category.name = "Exercises".to_string();
        repo.update_category(&category)
            .expect("Failed to update category");

        let retrieved = repo
            .get_category(category.id)
            .expect("Category should exist");
        assert_eq!(retrieved.name, "Exercises");
    }

    #[test]
    fn test_delete_category() {
        let (repo, _temp_dir) = setup_test_repo();

        let category = Category::named("Training");
        repo.store_category(&category)
            .expect("Failed to store category");

        assert!(repo
            .delete_category(category.id)
            .expect("Failed to delete category"));
        assert!(repo.get_category(category.id).is_none());
        assert!(!repo
            .delete_category(category.id)
            .expect("Failed to delete category"));
    }
}
