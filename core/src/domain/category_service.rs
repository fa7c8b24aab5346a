use anyhow::Result;
use log::{info, warn};
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::commands::categories::{
    CategoryListResult, CategoryResult, CreateCategoryCommand, DeleteCategoryCommand,
    DeleteCategoryResult, RenameCategoryCommand,
};
use crate::domain::validation::ValidationError;
use crate::storage::json::{CategoryRepository, JsonConnection};
use crate::storage::traits::CategoryStorage;
use shared::Category;

/// Service for managing procedure categories. Procedures embed category
/// snapshots, so renames and deletions here never rewrite other collections.
#[derive(Clone)]
pub struct CategoryService {
    category_repository: CategoryRepository,
}

impl CategoryService {
    /// Create a new CategoryService
    pub fn new(connection: Arc<JsonConnection>) -> Self {
        Self {
            category_repository: CategoryRepository::new((*connection).clone()),
        }
    }

    /// Create a new category
    pub fn create_category(&self, command: CreateCategoryCommand) -> Result<CategoryResult> {
        info!("Creating category: name={}", command.name);

        if command.name.trim().is_empty() {
            return Err(ValidationError::EmptyCategoryName.into());
        }

        let category = Category {
            id: Uuid::new_v4(),
            name: command.name.trim().to_string(),
        };

        self.category_repository.store_category(&category)?;

        Ok(CategoryResult {
            category,
            success_message: "Category created successfully".to_string(),
        })
    }

    /// List all categories
    pub fn list_categories(&self) -> CategoryListResult {
        CategoryListResult {
            categories: self.category_repository.list_categories(),
        }
    }

    /// Rename a category
    pub fn rename_category(&self, command: RenameCategoryCommand) -> Result<CategoryResult> {
        info!("Renaming category: {}", command.category_id);

        if command.name.trim().is_empty() {
            return Err(ValidationError::EmptyCategoryName.into());
        }

        let mut category = self
            .category_repository
            .get_category(command.category_id)
            .ok_or_else(|| anyhow::anyhow!("Category not found: {}", command.category_id))?;
        category.name = command.name.trim().to_string();

        self.category_repository.update_category(&category)?;

        Ok(CategoryResult {
            category,
            success_message: "Category renamed successfully".to_string(),
        })
    }

    /// Delete a category
    pub fn delete_category(&self, command: DeleteCategoryCommand) -> Result<DeleteCategoryResult> {
        info!("Deleting category: {}", command.category_id);

        let deleted = self.category_repository.delete_category(command.category_id)?;
        if !deleted {
            warn!("Category not found for deletion: {}", command.category_id);
            return Ok(DeleteCategoryResult {
                deleted: false,
                success_message: "Category not found".to_string(),
            });
        }

        Ok(DeleteCategoryResult {
            deleted: true,
            success_message: "Category deleted successfully".to_string(),
        })
    }
}
