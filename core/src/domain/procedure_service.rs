use anyhow::Result;
use log::{info, warn};
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::commands::procedures::{
    CopyProcedureCommand, CreateProcedureCommand, DeleteProcedureCommand, DeleteProcedureResult,
    ProcedureListResult, ProcedureResult, UpdateProcedureCommand,
};
use crate::domain::validation::ValidationError;
use crate::storage::json::{JsonConnection, ProcedureRepository};
use crate::storage::traits::ProcedureStorage;
use shared::ProcedureDefinition;

/// Service for managing procedure templates
#[derive(Clone)]
pub struct ProcedureService {
    procedure_repository: ProcedureRepository,
}

impl ProcedureService {
    /// Create a new ProcedureService
    pub fn new(connection: Arc<JsonConnection>) -> Self {
        Self {
            procedure_repository: ProcedureRepository::new((*connection).clone()),
        }
    }

    /// Create a new procedure template
    pub fn create_procedure(&self, command: CreateProcedureCommand) -> Result<ProcedureResult> {
        info!("Creating procedure: name={}", command.name);

        self.validate(&command.name, command.interval)?;

        let procedure = ProcedureDefinition {
            id: Uuid::new_v4(),
            name: command.name.trim().to_string(),
            category: command.category,
            interval: command.interval,
            interval_unit: command.interval_unit,
            time_of_day: command.time_of_day,
        };

        self.procedure_repository.store_procedure(&procedure)?;

        info!("Created procedure: {} with ID: {}", procedure.name, procedure.id);

        Ok(ProcedureResult {
            procedure,
            success_message: "Procedure created successfully".to_string(),
        })
    }

    /// Get a procedure template by ID
    pub fn get_procedure(&self, procedure_id: Uuid) -> Option<ProcedureDefinition> {
        self.procedure_repository.get_procedure(procedure_id)
    }

    /// List all procedure templates
    pub fn list_procedures(&self) -> ProcedureListResult {
        ProcedureListResult {
            procedures: self.procedure_repository.list_procedures(),
        }
    }

    /// Replace a procedure template wholesale by id. Events keep the
    /// snapshot they embedded when they were scheduled.
    pub fn update_procedure(&self, command: UpdateProcedureCommand) -> Result<ProcedureResult> {
        let procedure = command.procedure;
        info!("Updating procedure: {}", procedure.id);

        self.validate(&procedure.name, procedure.interval)?;
        self.procedure_repository.update_procedure(&procedure)?;

        Ok(ProcedureResult {
            procedure,
            success_message: "Procedure updated successfully".to_string(),
        })
    }

    /// Duplicate a procedure template under a fresh id
    pub fn copy_procedure(&self, command: CopyProcedureCommand) -> Result<ProcedureResult> {
        info!("Copying procedure: {}", command.procedure_id);

        let mut copy = self
            .procedure_repository
            .get_procedure(command.procedure_id)
            .ok_or_else(|| anyhow::anyhow!("Procedure not found: {}", command.procedure_id))?;
        copy.id = Uuid::new_v4();

        self.procedure_repository.store_procedure(&copy)?;

        info!("Copied procedure {} to {}", command.procedure_id, copy.id);

        Ok(ProcedureResult {
            procedure: copy,
            success_message: "Procedure copied successfully".to_string(),
        })
    }

    /// Delete a procedure template
    pub fn delete_procedure(&self, command: DeleteProcedureCommand) -> Result<DeleteProcedureResult> {
        info!("Deleting procedure: {}", command.procedure_id);

        let deleted = self.procedure_repository.delete_procedure(command.procedure_id)?;
        if !deleted {
            warn!("Procedure not found for deletion: {}", command.procedure_id);
            return Ok(DeleteProcedureResult {
                deleted: false,
                success_message: "Procedure not found".to_string(),
            });
        }

        Ok(DeleteProcedureResult {
            deleted: true,
            success_message: "Procedure deleted successfully".to_string(),
        })
    }

    fn validate(&self, name: &str, interval: i32) -> Result<()> {
        if name.trim().is_empty() {
            return Err(ValidationError::EmptyProcedureName.into());
        }
        if interval < 1 {
            return Err(ValidationError::NonPositiveInterval.into());
        }
        Ok(())
    }
}
