//! # Storage Traits
//!
//! This module defines the storage abstraction traits that allow different
//! storage backends to be used interchangeably in the domain layer.
//!
//! Read operations are infallible by contract: a repository that cannot
//! produce stored data (missing file, unreadable payload) falls back to its
//! starter dataset rather than surfacing an error. Write operations report
//! failures so callers can refuse to pretend a mutation happened.

use anyhow::Result;
use shared::{Category, Event, HistoryRecord, Pet, ProcedureDefinition};
use uuid::Uuid;

/// Trait defining the interface for pet storage operations
///
/// This trait abstracts away the specific storage implementation details,
/// allowing the domain layer to work with different storage backends
/// (JSON files, databases, etc.) without modification.
pub trait PetStorage: Send + Sync {
    /// List all pets in stored order
    fn list_pets(&self) -> Vec<Pet>;

    /// Retrieve a specific pet by ID
    fn get_pet(&self, pet_id: Uuid) -> Option<Pet>;

    /// Store a new pet
    fn store_pet(&self, pet: &Pet) -> Result<()>;

    /// Update an existing pet
    fn update_pet(&self, pet: &Pet) -> Result<()>;

    /// Delete a pet by ID
    /// Returns true if the pet was found and deleted, false otherwise
    fn delete_pet(&self, pet_id: Uuid) -> Result<bool>;
}

/// Trait defining the interface for scheduled event storage operations
pub trait EventStorage: Send + Sync {
    /// List all scheduled events in stored order
    fn list_events(&self) -> Vec<Event>;

    /// Retrieve a specific event by ID
    fn get_event(&self, event_id: Uuid) -> Option<Event>;

    /// List all events assigned to a specific pet
    fn list_events_for_pet(&self, pet_id: Uuid) -> Vec<Event>;

    /// Store a new event
    fn store_event(&self, event: &Event) -> Result<()>;

    /// Update an existing event
    fn update_event(&self, event: &Event) -> Result<()>;

    /// Update multiple events in a single write
    /// Events that no longer exist in storage are ignored
    fn update_events(&self, events: &[Event]) -> Result<()>;

    /// Delete a single event
    /// Returns true if the event was found and deleted, false otherwise
    fn delete_event(&self, event_id: Uuid) -> Result<bool>;

    /// Delete multiple events
    /// Returns the number of events actually deleted
    fn delete_events(&self, event_ids: &[Uuid]) -> Result<usize>;
}

/// Trait defining the interface for completion history storage operations
pub trait HistoryStorage: Send + Sync {
    /// List all history records in stored order
    fn list_records(&self) -> Vec<HistoryRecord>;

    /// Retrieve a specific history record by ID
    fn get_record(&self, record_id: Uuid) -> Option<HistoryRecord>;

    /// List the records produced by completions of a specific event
    fn list_records_for_event(&self, event_id: Uuid) -> Vec<HistoryRecord>;

    /// Append a new history record
    fn append_record(&self, record: &HistoryRecord) -> Result<()>;

    /// Update the comment of a specific record
    /// Returns true if the record was found and updated, false otherwise
    fn update_comment(&self, record_id: Uuid, comment: &str) -> Result<bool>;

    /// Delete a single history record
    /// Returns true if the record was found and deleted, false otherwise
    fn delete_record(&self, record_id: Uuid) -> Result<bool>;
}

/// Trait defining the interface for procedure template storage operations
pub trait ProcedureStorage: Send + Sync {
    /// List all procedure templates in stored order
    fn list_procedures(&self) -> Vec<ProcedureDefinition>;

    /// Retrieve a specific procedure template by ID
    fn get_procedure(&self, procedure_id: Uuid) -> Option<ProcedureDefinition>;

    /// Store a new procedure template
    fn store_procedure(&self, procedure: &ProcedureDefinition) -> Result<()>;

    /// Update an existing procedure template
    fn update_procedure(&self, procedure: &ProcedureDefinition) -> Result<()>;

    /// Delete a procedure template by ID
    /// Returns true if the template was found and deleted, false otherwise
    fn delete_procedure(&self, procedure_id: Uuid) -> Result<bool>;
}

/// Trait defining the interface for category storage operations
pub trait CategoryStorage: Send + Sync {
    /// List all categories in stored order
    fn list_categories(&self) -> Vec<Category>;

    /// Retrieve a specific category by ID
    fn get_category(&self, category_id: Uuid) -> Option<Category>;

    /// Store a new category
    fn store_category(&self, category: &Category) -> Result<()>;

    /// Update an existing category
    fn update_category(&self, category: &Category) -> Result<()>;

    /// Delete a category by ID
    /// Returns true if the category was found and deleted, false otherwise
    fn delete_category(&self, category_id: Uuid) -> Result<bool>;
}
