//! # JSON Procedure Repository
//!
//! File-based storage for procedure templates, kept in
//! `{data_directory}/procedures.json`. Templates embed a snapshot of their
//! category taken at creation time; later category renames or deletions do
//! not rewrite the stored templates.
//!
//! ## Features
//!
//! - Whole-collection reads and writes (read-modify-write per mutation)
//! - Atomic file writes with temp files
//! - Starter-dataset fallback when the file is absent or unreadable

use anyhow::Result;
use log::{debug, info, warn};
use shared::ProcedureDefinition;
use std::fs;
use std::path::PathBuf;
use uuid::Uuid;

use super::connection::JsonConnection;
use crate::storage::traits::ProcedureStorage;

/// JSON-based procedure repository backed by a single collection file
#[derive(Clone)]
pub struct ProcedureRepository {
    connection: JsonConnection,
}

impl ProcedureRepository {
    /// Create a new JSON procedure repository
    pub fn new(connection: JsonConnection) -> Self {
        Self { connection }
    }

    /// Get the procedures JSON file path
    fn procedures_file_path(&self) -> PathBuf {
        self.connection.data_file("procedures.json")
    }

    /// Read all procedure templates, falling back to the starter templates
    /// when the file is missing or unreadable
    fn read_procedures(&self) -> Vec<ProcedureDefinition> {
        let path = self.procedures_file_path();

        if !path.exists() {
            debug!("Procedures file {:?} not found, using starter procedures", path);
            return self.connection.starter().procedures.clone();
        }

        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) => {
                warn!("Failed to read procedures file {:?}: {}. Using starter procedures.", path, e);
                return self.connection.starter().procedures.clone();
            }
        };

        match serde_json::from_str(&contents) {
            Ok(procedures) => procedures,
            Err(e) => {
                warn!("Failed to parse procedures file {:?}: {}. Using starter procedures.", path, e);
                self.connection.starter().procedures.clone()
            }
        }
    }

    /// Write all procedure templates to the JSON file
    fn write_procedures(&self, procedures: &[ProcedureDefinition]) -> Result<()> {
        let path = self.procedures_file_path();
        let temp_file_path = path.with_extension("json.tmp");

        let contents = serde_json::to_string_pretty(procedures)?;

        // Write to temporary file first (atomic operation)
        fs::write(&temp_file_path, contents)?;

        // Atomically replace the original file
        fs::rename(&temp_file_path, &path)?;

        debug!("Successfully wrote {} procedures to {:?}", procedures.len(), path);
        Ok(())
    }
}

impl ProcedureStorage for ProcedureRepository {
    fn list_procedures(&self) -> Vec<ProcedureDefinition> {
        self.read_procedures()
    }

    fn get_procedure(&self, procedure_id: Uuid) -> Option<ProcedureDefinition> {
        self.read_procedures()
            .into_iter()
            .find(|procedure| procedure.id == procedure_id)
    }

    fn store_procedure(&self, procedure: &ProcedureDefinition) -> Result<()> {
        info!("Storing procedure: {}", procedure.id);

        let mut procedures = self.read_procedures();
        procedures.push(procedure.clone());
        self.write_procedures(&procedures)
    }

    fn update_procedure(&self, procedure: &ProcedureDefinition) -> Result<()> {
        info!("Updating procedure: {}", procedure.id);

        let mut procedures = self.read_procedures();
        match procedures.iter_mut().find(|existing| existing.id == procedure.id) {
            Some(existing) => *existing = procedure.clone(),
            None => return Err(anyhow::anyhow!("Procedure not found: {}", procedure.id)),
        }
        self.write_procedures(&procedures)
    }

    fn delete_procedure(&self, procedure_id: Uuid) -> Result<bool> {
        info!("Deleting procedure: {}", procedure_id);

        let mut procedures = self.read_procedures();
        let original_len = procedures.len();
        procedures.retain(|procedure| procedure.id != procedure_id);

        if procedures.len() == original_len {
            return Ok(false);
        }

        self.write_procedures(&procedures)?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn setup_test_repo() -> (ProcedureRepository, TempDir) {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let connection = JsonConnection::new(temp_dir.path()).expect("Failed to create connection");
        (ProcedureRepository::new(connection), temp_dir)
    }

    #[test]
    fn test_missing_file_falls_back_to_starter() {
        let (repo, _temp_dir) = setup_test_repo();

        let procedures = repo.list_procedures();
        assert_eq!(procedures.len(), 9);
        assert!(procedures.iter().any(|p| p.name == "Deworming"));
    }

    #[test]
    fn test_store_and_get_procedure() {
        let (repo, _temp_dir) = setup_test_repo();

        let procedure = ProcedureDefinition::named("Brushing");
        repo.store_procedure(&procedure)
            .expect("Failed to store procedure");

        let retrieved = repo
            .get_procedure(procedure.id)
            .expect("Procedure should exist");
        assert_eq!(retrieved.name, "Brushing");
        assert_eq!(repo.list_procedures().len(), 10);
    }

    #[test]
    fn test_update_procedure() {
        let (repo, _temp_dir) = setup_test_repo();

        let mut procedure = ProcedureDefinition::named("Brushing");
        repo.store_procedure(&procedure)
            .expect("Failed to store procedure");

        procedure.interval = 3;
        repo.update_procedure(&procedure)
            .expect("Failed to update procedure");

        let retrieved = repo
            .get_procedure(procedure.id)
            .expect("Procedure should exist");
        assert_eq!(retrieved.interval, 3);
    }

    #[test]
    fn test_delete_procedure() {
        let (repo, _temp_dir) = setup_test_repo();

        let procedure = ProcedureDefinition::named("Brushing");
        repo.store_procedure(&procedure)
            .expect("Failed to store procedure");

        assert!(repo
            .delete_procedure(procedure.id)
            .expect("Failed to delete procedure"));
        assert!(repo.get_procedure(procedure.id).is_none());
        assert!(!repo
            .delete_procedure(procedure.id)
            .expect("Failed to delete procedure"));
    }
}
