use anyhow::Result;
use log::info;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::commands::history::{
    DeleteRecordCommand, DeleteRecordResult, EditCommentCommand, HistoryListResult,
    HistoryRecordResult,
};
use crate::storage::json::{HistoryRepository, JsonConnection};
use crate::storage::traits::HistoryStorage;

/// Service for reading and curating the completion history
#[derive(Clone)]
pub struct HistoryService {
    history_repository: HistoryRepository,
}

impl HistoryService {
    /// Create a new HistoryService
    pub fn new(connection: Arc<JsonConnection>) -> Self {
        Self {
            history_repository: HistoryRepository::new((*connection).clone()),
        }
    }

    /// List all records, most recent completion first
    pub fn list_records(&self) -> HistoryListResult {
        let mut records = self.history_repository.list_records();
        records.sort_by(|a, b| b.completed_at.cmp(&a.completed_at));
        HistoryListResult { records }
    }

    /// List the records produced by completions of one event, most recent
    /// completion first
    pub fn records_for_event(&self, event_id: Uuid) -> HistoryListResult {
        let mut records = self.history_repository.list_records_for_event(event_id);
        records.sort_by(|a, b| b.completed_at.cmp(&a.completed_at));
        HistoryListResult { records }
    }

    /// Edit a record's comment, the only field that stays mutable after
    /// completion
    pub fn edit_comment(&self, command: EditCommentCommand) -> Result<HistoryRecordResult> {
        info!("Editing comment on history record: {}", command.record_id);

        let updated = self
            .history_repository
            .update_comment(command.record_id, &command.comment)?;
        if !updated {
            return Err(anyhow::anyhow!(
                "History record not found: {}",
                command.record_id
            ));
        }

        let record = self
            .history_repository
            .get_record(command.record_id)
            .ok_or_else(|| anyhow::anyhow!("History record not found: {}", command.record_id))?;

        Ok(HistoryRecordResult {
            record,
            success_message: "Comment updated successfully".to_string(),
        })
    }

    /// Delete a record outright
    pub fn delete_record(&self, command: DeleteRecordCommand) -> Result<DeleteRecordResult> {
        info!("Deleting history record: {}", command.record_id);

        let deleted = self.history_repository.delete_record(command.record_id)?;
        if !deleted {
            return Ok(DeleteRecordResult {
                deleted: false,
                success_message: "Record not found".to_string(),
            });
        }

        Ok(DeleteRecordResult {
            deleted: true,
            success_message: "Record deleted successfully".to_string(),
        })
    }
}
