//! # Pet Care Tracker Core
//!
//! Contains all non-UI logic for the pet care tracker application.
//!
//! This crate serves as the orchestration layer that brings together:
//! - **Domain**: Business logic and rules for recurring care procedures
//! - **Storage**: Data persistence mechanisms (JSON files on disk)
//! - **Notifications**: An injected reminder collaborator for due events
//!
//! The core is designed to be UI-agnostic, meaning it can back a desktop
//! shell, a mobile wrapper, or a CLI without modification. Embedders hand in
//! their platform's reminder scheduler and get an [`AppState`] of services
//! back.
//!
//! ## Architecture
//!
//! The crate follows a layered architecture:
//! ```text
//! Embedding app (UI shell, CLI)
//!     ↓
//! AppState (services)
//!     ↓
//! Domain Layer (business logic, recurrence math)
//!     ↓
//! Storage Layer (JSON files, persistence)
//! ```
//!
//! ## Key Responsibilities
//!
//! - Initialize and configure the application state
//! - Wire the reminder scheduler into the services that need it
//! - Coordinate between domain logic and data persistence
//! - Provide a clean separation of concerns for maintainability

pub mod domain;
pub mod notifications;
pub mod storage;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use log::info;
use shared::OrphanedEventPolicy;

use crate::domain::{
    CategoryService, EventService, HistoryService, PetService, ProcedureService, SettingsService,
};
use crate::notifications::{NullReminderScheduler, ReminderScheduler};
use crate::storage::JsonConnection;

pub use domain::*;
pub use storage::*;

/// Main application state that holds all services
#[derive(Clone)]
pub struct AppState {
    pub event_service: EventService,
    pub pet_service: PetService,
    pub procedure_service: ProcedureService,
    pub category_service: CategoryService,
    pub history_service: HistoryService,
    pub settings_service: SettingsService,
}

/// Options the embedding application hands to [`initialize_tracker`].
pub struct TrackerOptions {
    /// Directory for the JSON data files. Platform default when `None`.
    pub data_dir: Option<PathBuf>,
    /// What happens to a pet's events when the pet is deleted.
    pub orphaned_event_policy: OrphanedEventPolicy,
    /// Reminder collaborator supplied by the platform shell.
    pub reminders: Arc<dyn ReminderScheduler>,
}

impl Default for TrackerOptions {
    fn default() -> Self {
        Self {
            data_dir: None,
            orphaned_event_policy: OrphanedEventPolicy::default(),
            reminders: Arc::new(NullReminderScheduler),
        }
    }
}

/// Initialize the tracker with all required services
pub fn initialize_tracker(options: TrackerOptions) -> Result<AppState> {
    info!("Setting up storage");
    let connection = match options.data_dir {
        Some(dir) => JsonConnection::new(dir)?,
        None => JsonConnection::new_default()?,
    };
    let connection = Arc::new(connection);

    info!("Setting up domain model");
    let event_service = EventService::new(connection.clone(), options.reminders.clone());
    let pet_service = PetService::new(
        connection.clone(),
        options.orphaned_event_policy,
        options.reminders,
    );
    let procedure_service = ProcedureService::new(connection.clone());
    let category_service = CategoryService::new(connection.clone());
    let history_service = HistoryService::new(connection.clone());
    let settings_service = SettingsService::new(connection);

    info!("Setting up application state");
    let app_state = AppState {
        event_service,
        pet_service,
        procedure_service,
        category_service,
        history_service,
        settings_service,
    };

    Ok(app_state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::commands::events::{EventFilter, EventListQuery};
    use crate::domain::commands::pets::CreatePetCommand;
    use shared::IntervalUnit;
    use tempfile::TempDir;

    fn tracker_in(dir: &TempDir) -> AppState {
        let options = TrackerOptions {
            data_dir: Some(dir.path().to_path_buf()),
            ..TrackerOptions::default()
        };
        initialize_tracker(options).unwrap()
    }

    #[test]
    fn test_initialize_tracker_serves_starter_data() {
        let dir = TempDir::new().unwrap();
        let state = tracker_in(&dir);

        let pets = state.pet_service.list_pets();
        assert_eq!(pets.pets.len(), 1);
        assert_eq!(pets.pets[0].name, "Jack");

        let procedures = state.procedure_service.list_procedures();
        assert_eq!(procedures.procedures.len(), 9);

        let categories = state.category_service.list_categories();
        assert_eq!(categories.categories.len(), 4);
    }

    #[test]
    fn test_services_share_one_store() {
        let dir = TempDir::new().unwrap();
        let state = tracker_in(&dir);

        let created = state
            .pet_service
            .create_pet(CreatePetCommand {
                name: "Misha".to_string(),
                age: 2,
                age_unit: IntervalUnit::Year,
                image_data: None,
            })
            .unwrap();

        // A clone of the state reads through to the same files.
        let other = state.clone();
        let names: Vec<String> = other
            .pet_service
            .list_pets()
            .pets
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert!(names.contains(&created.pet.name));
    }

    #[test]
    fn test_event_listing_reachable_from_state() {
        let dir = TempDir::new().unwrap();
        let state = tracker_in(&dir);

        let listed = state.event_service.list_events(EventListQuery {
            filter: EventFilter::All,
            pet_id: None,
            search: None,
        });
        assert_eq!(listed.events.len(), 2);
    }
}
