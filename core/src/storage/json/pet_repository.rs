//! # JSON Pet Repository
//!
//! This module provides a file-based pet storage implementation using a
//! single JSON document. All pets live in `{data_directory}/pets.json`.
//!
//! ## File Structure
//!
//! ```text
//! Pet Care Tracker/
//! ├── settings.yaml
//! ├── pets.json    ← This module manages this file
//! ├── events.json
//! ├── history.json
//! ├── procedures.json
//! └── categories.json
//! ```
//!
//! ## Features
//!
//! - Whole-collection reads and writes (read-modify-write per mutation)
//! - Atomic file writes with temp files
//! - Starter-dataset fallback when the file is absent or unreadable

use anyhow::Result;
use log::{debug, info, warn};
use shared::Pet;
use std::fs;
use std::path::PathBuf;
use uuid::Uuid;

use super::connection::JsonConnection;
use crate::storage::traits::PetStorage;

/// JSON-based pet repository backed by a single collection file
#[derive(Clone)]
pub struct PetRepository {
    connection: JsonConnection,
}

impl PetRepository {
    /// Create a new JSON pet repository
    pub fn new(connection: JsonConnection) -> Self {
        Self { connection }
    }

    /// Get the pets JSON file path
    fn pets_file_path(&self) -> PathBuf {
        self.connection.data_file("pets.json")
    }

    /// Read all pets, falling back to the starter pets when the file is
    /// missing or unreadable
    fn read_pets(&self) -> Vec<Pet> {
        let path = self.pets_file_path();

        if !path.exists() {
            debug!("Pets file {:?} not found, using starter pets", path);
            return self.connection.starter().pets.clone();
        }

        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) => {
                warn!("Failed to read pets file {:?}: {}. Using starter pets.", path, e);
                return self.connection.starter().pets.clone();
            }
        };

        match serde_json::from_str(&contents) {
            Ok(pets) => pets,
            Err(e) => {
                warn!("Failed to parse pets file {:?}: {}. Using starter pets.", path, e);
                self.connection.starter().pets.clone()
            }
        }
    }

    /// Write all pets to the JSON file
    fn write_pets(&self, pets: &[Pet]) -> Result<()> {
        let path = self.pets_file_path();
        let temp_file_path = path.with_extension("json.tmp");

        let contents = serde_json::to_string_pretty(pets)?;

        // Write to temporary file first (atomic operation)
        fs::write(&temp_file_path, contents)?;

        // Atomically replace the original file
        fs::rename(&temp_file_path, &path)?;

        debug!("Successfully wrote {} pets to {:?}", pets.len(), path);
        Ok(())
    }
}

impl PetStorage for PetRepository {
    fn list_pets(&self) -> Vec<Pet> {
        self.read_pets()
    }

    fn get_pet(&self, pet_id: Uuid) -> Option<Pet> {
        self.read_pets().into_iter().find(|pet| pet.id == pet_id)
    }

    fn store_pet(&self, pet: &Pet) -> Result<()> {
        info!("Storing pet: {}", pet.id);

        let mut pets = self.read_pets();
        pets.push(pet.clone());
        self.write_pets(&pets)
    }

    fn update_pet(&self, pet: &Pet) -> Result<()> {
        info!("Updating pet: {}", pet.id);

        let mut pets = self.read_pets();
        match pets.iter_mut().find(|existing| existing.id == pet.id) {
            Some(existing) => *existing = pet.clone(),
            None => return Err(anyhow::anyhow!("Pet not found: {}", pet.id)),
        }
        self.write_pets(&pets)
    }

    fn delete_pet(&self, pet_id: Uuid) -> Result<bool> {
        info!("Deleting pet: {}", pet_id);

        let mut pets = self.read_pets();
        let original_len = pets.len();
        pets.retain(|pet| pet.id != pet_id);

        if pets.len() == original_len {
            return Ok(false);
        }

        self.write_pets(&pets)?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::IntervalUnit;
    use tempfile::TempDir;

    fn setup_test_repo() -> (PetRepository, TempDir) {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let connection = JsonConnection::new(temp_dir.path()).expect("Failed to create connection");
        (PetRepository::new(connection), temp_dir)
    }

    fn sample_pet(name: &str) -> Pet {
        Pet {
            id: Uuid::new_v4(),
            name: name.to_string(),
            age: 5,
            age_unit: IntervalUnit::Year,
            image_data: None,
        }
    }

    #[test]
    fn test_missing_file_falls_back_to_starter() {
        let (repo, _temp_dir) = setup_test_repo();

        let pets = repo.list_pets();

        assert_eq!(pets.len(), 1);
        assert_eq!(pets[0].name, "Jack");
    }

    #[test]
    fn test_store_and_get_pet() {
        let (repo, _temp_dir) = setup_test_repo();

        let pet = sample_pet("Rex");
        repo.store_pet(&pet).expect("Failed to store pet");

        let retrieved = repo.get_pet(pet.id).expect("Pet should exist");
        assert_eq!(retrieved.name, "Rex");

        // Starter pet plus the stored one
        assert_eq!(repo.list_pets().len(), 2);
    }

    #[test]
    fn test_update_pet() {
        let (repo, _temp_dir) = setup_test_repo();

        let mut pet = sample_pet("Rex");
        repo.store_pet(&pet).expect("Failed to store pet");

        pet.age = 6;
        repo.update_pet(&pet).expect("Failed to update pet");

        let retrieved = repo.get_pet(pet.id).expect("Pet should exist");
        assert_eq!(retrieved.age, 6);
    }

    #[test]
    fn test_update_unknown_pet_fails() {
        let (repo, _temp_dir) = setup_test_repo();

        // Persist the collection so the starter fallback is out of play
        repo.store_pet(&sample_pet("Rex")).expect("Failed to store pet");

        let result = repo.update_pet(&sample_pet("Ghost"));
        assert!(result.is_err());
    }

    #[test]
    fn test_delete_pet() {
        let (repo, _temp_dir) = setup_test_repo();

        let pet = sample_pet("Rex");
        repo.store_pet(&pet).expect("Failed to store pet");

        assert!(repo.delete_pet(pet.id).expect("Failed to delete pet"));
        assert!(repo.get_pet(pet.id).is_none());

        // Second delete finds nothing
        assert!(!repo.delete_pet(pet.id).expect("Failed to delete pet"));
    }

    #[test]
    fn test_corrupt_file_falls_back_to_starter() {
        let (repo, temp_dir) = setup_test_repo();

        fs::write(temp_dir.path().join("pets.json"), "not json at all")
            .expect("Failed to write corrupt file");

        let pets = repo.list_pets();
        assert_eq!(pets.len(), 1);
        assert_eq!(pets[0].name, "Jack");
    }

    #[test]
    fn test_pets_persist_across_instances() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");

        let pet = sample_pet("Rex");
        {
            let connection =
                JsonConnection::new(temp_dir.path()).expect("Failed to create connection");
            let repo = PetRepository::new(connection);
            repo.store_pet(&pet).expect("Failed to store pet");
        }

        let connection = JsonConnection::new(temp_dir.path()).expect("Failed to create connection");
        let repo = PetRepository::new(connection);

        let retrieved = repo.get_pet(pet.id).expect("Pet should survive reload");
        assert_eq!(retrieved.name, "Rex");
    }
}
