//! # JSON History Repository
//!
//! File-based storage for completion history records, kept in
//! `{data_directory}/history.json`. Records are append-mostly: after a
//! completion is logged, only its comment may change. The starter history is
//! empty, so an absent or unreadable file simply reads as no history.

use anyhow::Result;
use log::{debug, info, warn};
use shared::HistoryRecord;
use std::fs;
use std::path::PathBuf;
use uuid::Uuid;

use super::connection::JsonConnection;
use crate::storage::traits::HistoryStorage;

/// JSON-based history repository backed by a single collection file
#[derive(Clone)]
pub struct HistoryRepository {
    connection: JsonConnection,
}

impl HistoryRepository {
    /// Create a new JSON history repository
    pub fn new(connection: JsonConnection) -> Self {
        Self { connection }
    }

    /// Get the history JSON file path
    fn history_file_path(&self) -> PathBuf {
        self.connection.data_file("history.json")
    }

    /// Read all history records, falling back to the (empty) starter history
    /// when the file is missing or unreadable
    fn read_records(&self) -> Vec<HistoryRecord> {
        let path = self.history_file_path();

        if !path.exists() {
            debug!("History file {:?} not found, using starter history", path);
            return self.connection.starter().history.clone();
        }

        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) => {
                warn!("Failed to read history file {:?}: {}. Using starter history.", path, e);
                return self.connection.starter().history.clone();
            }
        };

        match serde_json::from_str(&contents) {
            Ok(records) => records,
            Err(e) => {
                warn!("Failed to parse history file {:?}: {}. Using starter history.", path, e);
                self.connection.starter().history.clone()
            }
        }
    }

    /// Write all history records to the JSON file
    fn write_records(&self, records: &[HistoryRecord]) -> Result<()> {
        let path = self.history_file_path();
        let temp_file_path = path.with_extension("json.tmp");

        let contents = serde_json::to_string_pretty(records)?;

        // Write to temporary file first (atomic operation)
        fs::write(&temp_file_path, contents)?;

        // Atomically replace the original file
        fs::rename(&temp_file_path, &path)?;

        debug!("Successfully wrote {} history records to {:?}", records.len(), path);
        Ok(())
    }
}

impl HistoryStorage for HistoryRepository {
    fn list_records(&self) -> Vec<HistoryRecord> {
        self.read_records()
    }

    fn get_record(&self, record_id: Uuid) -> Option<HistoryRecord> {
        self.read_records()
            .into_iter()
            .find(|record| record.id == record_id)
    }

    fn list_records_for_event(&self, event_id: Uuid) -> Vec<HistoryRecord> {
        self.read_records()
            .into_iter()
            .filter(|record| record.event_id == event_id)
            .collect()
    }

    fn append_record(&self, record: &HistoryRecord) -> Result<()> {
        info!("Appending history record: {}", record.id);

        let mut records = self.read_records();
        records.push(record.clone());
        self.write_records(&records)
    }

    fn update_comment(&self, record_id: Uuid, comment: &str) -> Result<bool> {
        info!("Updating comment on history record: {}", record_id);

        let mut records = self.read_records();
        match records.iter_mut().find(|record| record.id == record_id) {
            Some(record) => record.comment = comment.to_string(),
            None => return Ok(false),
        }

        self.write_records(&records)?;
        Ok(true)
    }

    fn delete_record(&self, record_id: Uuid) -> Result<bool> {
        info!("Deleting history record: {}", record_id);

        let mut records = self.read_records();
        let original_len = records.len();
        records.retain(|record| record.id != record_id);

        if records.len() == original_len {
            return Ok(false);
        }

        self.write_records(&records)?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use shared::ProcedureDefinition;
    use tempfile::TempDir;

    fn setup_test_repo() -> (HistoryRepository, TempDir) {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let connection = JsonConnection::new(temp_dir.path()).expect("Failed to create connection");
        (HistoryRepository::new(connection), temp_dir)
    }

    fn sample_record(event_id: Uuid) -> HistoryRecord {
        let completed_at = NaiveDate::from_ymd_opt(2026, 3, 7)
            .unwrap()
            .and_hms_opt(18, 30, 0)
            .unwrap();
        HistoryRecord {
            id: Uuid::new_v4(),
            event_id,
            procedure: ProcedureDefinition::named("Brushing"),
            pet_id: None,
            is_on_time: true,
            completed_at,
            comment: String::new(),
        }
    }

    #[test]
    fn test_fresh_store_has_no_history() {
        let (repo, _temp_dir) = setup_test_repo();
        assert!(repo.list_records().is_empty());
    }

    #[test]
    fn test_append_and_list_records() {
        let (repo, _temp_dir) = setup_test_repo();

        let record = sample_record(Uuid::new_v4());
        repo.append_record(&record).expect("Failed to append record");

        let records = repo.list_records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, record.id);
    }

    #[test]
    fn test_list_records_for_event() {
        let (repo, _temp_dir) = setup_test_repo();

        let event_id = Uuid::new_v4();
        repo.append_record(&sample_record(event_id))
            .expect("Failed to append record");
        repo.append_record(&sample_record(event_id))
            .expect("Failed to append record");
        repo.append_record(&sample_record(Uuid::new_v4()))
            .expect("Failed to append record");

        assert_eq!(repo.list_records_for_event(event_id).len(), 2);
    }

    #[test]
    fn test_update_comment() {
        let (repo, _temp_dir) = setup_test_repo();

        let record = sample_record(Uuid::new_v4());
        repo.append_record(&record).expect("Failed to append record");

        let updated = repo
            .update_comment(record.id, "gave the small dose")
            .expect("Failed to update comment");
        assert!(updated);

        let retrieved = repo.get_record(record.id).expect("Record should exist");
        assert_eq!(retrieved.comment, "gave the small dose");

        let missing = repo
            .update_comment(Uuid::new_v4(), "nobody home")
            .expect("Failed to update comment");
        assert!(!missing);
    }

    #[test]
    fn test_delete_record() {
        let (repo, _temp_dir) = setup_test_repo();

        let record = sample_record(Uuid::new_v4());
        repo.append_record(&record).expect("Failed to append record");

        assert!(repo.delete_record(record.id).expect("Failed to delete record"));
        assert!(repo.list_records().is_empty());
        assert!(!repo.delete_record(record.id).expect("Failed to delete record"));
    }

    #[test]
    fn test_corrupt_file_reads_as_empty() {
        let (repo, temp_dir) = setup_test_repo();

        fs::write(temp_dir.path().join("history.json"), "[ not json")
            .expect("Failed to write corrupt file");

        assert!(repo.list_records().is_empty());
    }
}
