use anyhow::Result;
use log::{info, warn};
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::commands::pets::{
    CreatePetCommand, DeletePetCommand, DeletePetResult, PetListResult, PetResult,
    UpdatePetCommand,
};
use crate::domain::validation::ValidationError;
use crate::notifications::ReminderScheduler;
use crate::storage::json::{EventRepository, JsonConnection, PetRepository};
use crate::storage::traits::{EventStorage, PetStorage};
use shared::{Event, OrphanedEventPolicy, Pet};

/// Service for managing pet profiles
#[derive(Clone)]
pub struct PetService {
    pet_repository: PetRepository,
    event_repository: EventRepository,
    orphan_policy: OrphanedEventPolicy,
    reminders: Arc<dyn ReminderScheduler>,
}

impl PetService {
    /// Create a new PetService
    pub fn new(
        connection: Arc<JsonConnection>,
        orphan_policy: OrphanedEventPolicy,
        reminders: Arc<dyn ReminderScheduler>,
    ) -> Self {
        Self {
            pet_repository: PetRepository::new((*connection).clone()),
            event_repository: EventRepository::new((*connection).clone()),
            orphan_policy,
            reminders,
        }
    }

    /// Register a new pet
    pub fn create_pet(&self, command: CreatePetCommand) -> Result<PetResult> {
        info!("Creating pet: name={}", command.name);

        if command.name.trim().is_empty() {
            return Err(ValidationError::EmptyPetName.into());
        }

        let pet = Pet {
            id: Uuid::new_v4(),
            name: command.name.trim().to_string(),
            age: command.age,
            age_unit: command.age_unit,
            image_data: command.image_data,
        };

        self.pet_repository.store_pet(&pet)?;

        info!("Created pet: {} with ID: {}", pet.name, pet.id);

        Ok(PetResult {
            pet,
            success_message: "Pet created successfully".to_string(),
        })
    }

    /// Get a pet by ID
    pub fn get_pet(&self, pet_id: Uuid) -> Option<Pet> {
        self.pet_repository.get_pet(pet_id)
    }

    /// List all pets
    pub fn list_pets(&self) -> PetListResult {
        PetListResult {
            pets: self.pet_repository.list_pets(),
        }
    }

    /// Replace a pet wholesale by id
    pub fn update_pet(&self, command: UpdatePetCommand) -> Result<PetResult> {
        let pet = command.pet;
        info!("Updating pet: {}", pet.id);

        if pet.name.trim().is_empty() {
            return Err(ValidationError::EmptyPetName.into());
        }

        self.pet_repository.update_pet(&pet)?;

        Ok(PetResult {
            pet,
            success_message: "Pet updated successfully".to_string(),
        })
    }

    /// Delete a pet and apply the configured orphaned-event policy to the
    /// events still assigned to it. History records are never touched.
    pub fn delete_pet(&self, command: DeletePetCommand) -> Result<DeletePetResult> {
        info!(
            "Deleting pet: {} (orphaned events: {:?})",
            command.pet_id, self.orphan_policy
        );

        let deleted = self.pet_repository.delete_pet(command.pet_id)?;
        if !deleted {
            warn!("Pet not found for deletion: {}", command.pet_id);
            return Ok(DeletePetResult {
                deleted: false,
                affected_events: 0,
                success_message: "Pet not found".to_string(),
            });
        }

        let affected_events = self.apply_orphan_policy(command.pet_id)?;

        Ok(DeletePetResult {
            deleted: true,
            affected_events,
            success_message: "Pet deleted successfully".to_string(),
        })
    }

    fn apply_orphan_policy(&self, pet_id: Uuid) -> Result<usize> {
        let orphans = self.event_repository.list_events_for_pet(pet_id);
        if orphans.is_empty() {
            return Ok(0);
        }

        match self.orphan_policy {
            OrphanedEventPolicy::Keep => Ok(0),
            OrphanedEventPolicy::Unlink => {
                let unlinked: Vec<Event> = orphans
                    .into_iter()
                    .map(|mut event| {
                        event.pet_id = None;
                        event
                    })
                    .collect();
                self.event_repository.update_events(&unlinked)?;
                info!("Unlinked {} events from deleted pet {}", unlinked.len(), pet_id);
                Ok(unlinked.len())
            }
            OrphanedEventPolicy::Delete => {
                let event_ids: Vec<Uuid> = orphans.iter().map(|event| event.id).collect();
                let removed = self.event_repository.delete_events(&event_ids)?;
                for event_id in &event_ids {
                    self.reminders.cancel_reminder(*event_id);
                }
                info!("Removed {} events of deleted pet {}", removed, pet_id);
                Ok(removed)
            }
        }
    }
}
