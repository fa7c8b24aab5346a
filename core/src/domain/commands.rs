// core/src/domain/commands.rs

//! Domain-level command and query types.
//! Callers express intents (create, update, complete, delete, ...) with
//! these structs and the services apply them atomically; nothing outside
//! the services mutates the stored collections.

pub mod events {
    use chrono::NaiveDateTime;
    use shared::{Event, HistoryRecord, IntervalUnit, ProcedureDefinition, TimeOfDay};
    use uuid::Uuid;

    /// Status filter for event list queries.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum EventFilter {
        /// Due on the current calendar day.
        Today,
        /// Due after now, within the configured upcoming threshold.
        Soon,
        /// Due strictly before now (including earlier today).
        Overdue,
        /// No date constraint.
        All,
    }

    impl Default for EventFilter {
        fn default() -> Self {
            EventFilter::Today
        }
    }

    /// Input for scheduling a new event.
    #[derive(Debug, Clone)]
    pub struct CreateEventCommand {
        /// Procedure snapshot to embed in the event.
        pub procedure: ProcedureDefinition,
        pub pet_id: Option<Uuid>,
        pub due_at: NaiveDateTime,
        pub is_notification_enabled: bool,
        pub interval_unit: IntervalUnit,
        pub time_of_day: TimeOfDay,
    }

    /// Input for editing an event: a wholesale replacement by id.
    #[derive(Debug, Clone)]
    pub struct UpdateEventCommand {
        pub event: Event,
    }

    /// Input for deleting an event.
    #[derive(Debug, Clone)]
    pub struct DeleteEventCommand {
        pub event_id: Uuid,
    }

    /// Input for marking an event complete.
    #[derive(Debug, Clone)]
    pub struct CompleteEventCommand {
        pub event_id: Uuid,
        /// Free-text commentary for the history record; empty when omitted.
        pub comment: Option<String>,
    }

    /// Query parameters for listing events.
    #[derive(Debug, Clone, Default)]
    pub struct EventListQuery {
        pub filter: EventFilter,
        /// Restrict to one pet's events.
        pub pet_id: Option<Uuid>,
        /// Case-insensitive substring match on procedure or pet name.
        pub search: Option<String>,
    }

    /// Result of creating or updating an event.
    #[derive(Debug, Clone)]
    pub struct EventResult {
        pub event: Event,
        pub success_message: String,
    }

    /// Result of deleting an event.
    #[derive(Debug, Clone)]
    pub struct DeleteEventResult {
        pub deleted: bool,
        pub success_message: String,
    }

    /// Result of completing an event: the appended history record and the
    /// rescheduled event.
    #[derive(Debug, Clone)]
    pub struct CompleteEventResult {
        pub record: HistoryRecord,
        pub event: Event,
        pub success_message: String,
    }

    /// Result of listing events.
    #[derive(Debug, Clone)]
    pub struct EventListResult {
        pub events: Vec<Event>,
    }
}

pub mod pets {
    use shared::{IntervalUnit, Pet};
    use uuid::Uuid;

    /// Input for registering a new pet.
    #[derive(Debug, Clone)]
    pub struct CreatePetCommand {
        pub name: String,
        pub age: i32,
        pub age_unit: IntervalUnit,
        pub image_data: Option<Vec<u8>>,
    }

    /// Input for editing a pet: a wholesale replacement by id.
    #[derive(Debug, Clone)]
    pub struct UpdatePetCommand {
        pub pet: Pet,
    }

    /// Input for deleting a pet.
    #[derive(Debug, Clone)]
    pub struct DeletePetCommand {
        pub pet_id: Uuid,
    }

    /// Result of creating or updating a pet.
    #[derive(Debug, Clone)]
    pub struct PetResult {
        pub pet: Pet,
        pub success_message: String,
    }

    /// Result of listing pets.
    #[derive(Debug, Clone)]
    pub struct PetListResult {
        pub pets: Vec<Pet>,
    }

    /// Result of deleting a pet. `affected_events` counts the events the
    /// orphaned-event policy unlinked or removed.
    #[derive(Debug, Clone)]
    pub struct DeletePetResult {
        pub deleted: bool,
        pub affected_events: usize,
        pub success_message: String,
    }
}

pub mod procedures {
    use shared::{Category, IntervalUnit, ProcedureDefinition, TimeOfDay};
    use uuid::Uuid;

    /// Input for creating a procedure definition.
    #[derive(Debug, Clone)]
    pub struct CreateProcedureCommand {
        pub name: String,
        /// Category snapshot to embed, if any.
        pub category: Option<Category>,
        pub interval: i32,
        pub interval_unit: IntervalUnit,
        pub time_of_day: TimeOfDay,
    }

    /// Input for editing a procedure: a wholesale replacement by id.
    #[derive(Debug, Clone)]
    pub struct UpdateProcedureCommand {
        pub procedure: ProcedureDefinition,
    }

    /// Input for deleting a procedure definition.
    #[derive(Debug, Clone)]
    pub struct DeleteProcedureCommand {
        pub procedure_id: Uuid,
    }

    /// Input for duplicating a procedure under a fresh id.
    #[derive(Debug, Clone)]
    pub struct CopyProcedureCommand {
        pub procedure_id: Uuid,
    }

    /// Result of creating, updating, or copying a procedure.
    #[derive(Debug, Clone)]
    pub struct ProcedureResult {
        pub procedure: ProcedureDefinition,
        pub success_message: String,
    }

    /// Result of listing procedures.
    #[derive(Debug, Clone)]
    pub struct ProcedureListResult {
        pub procedures: Vec<ProcedureDefinition>,
    }

    /// Result of deleting a procedure.
    #[derive(Debug, Clone)]
    pub struct DeleteProcedureResult {
        pub deleted: bool,
        pub success_message: String,
    }
}

pub mod categories {
    use shared::Category;
    use uuid::Uuid;

    /// Input for creating a category.
    #[derive(Debug, Clone)]
    pub struct CreateCategoryCommand {
        pub name: String,
    }

    /// Input for renaming a category.
    #[derive(Debug, Clone)]
    pub struct RenameCategoryCommand {
        pub category_id: Uuid,
        pub name: String,
    }

    /// Input for deleting a category.
    #[derive(Debug, Clone)]
    pub struct DeleteCategoryCommand {
        pub category_id: Uuid,
    }

    /// Result of creating or renaming a category.
    #[derive(Debug, Clone)]
    pub struct CategoryResult {
        pub category: Category,
        pub success_message: String,
    }

    /// Result of listing categories.
    #[derive(Debug, Clone)]
    pub struct CategoryListResult {
        pub categories: Vec<Category>,
    }

    /// Result of deleting a category.
    #[derive(Debug, Clone)]
    pub struct DeleteCategoryResult {
        pub deleted: bool,
        pub success_message: String,
    }
}

pub mod history {
    use shared::HistoryRecord;
    use uuid::Uuid;

    /// Input for editing a history record's comment, the only mutable field.
    #[derive(Debug, Clone)]
    pub struct EditCommentCommand {
        pub record_id: Uuid,
        pub comment: String,
    }

    /// Input for deleting a history record.
    #[derive(Debug, Clone)]
    pub struct DeleteRecordCommand {
        pub record_id: Uuid,
    }

    /// Result of editing a record.
    #[derive(Debug, Clone)]
    pub struct HistoryRecordResult {
        pub record: HistoryRecord,
        pub success_message: String,
    }

    /// Result of deleting a record.
    #[derive(Debug, Clone)]
    pub struct DeleteRecordResult {
        pub deleted: bool,
        pub success_message: String,
    }

    /// Result of listing history records.
    #[derive(Debug, Clone)]
    pub struct HistoryListResult {
        pub records: Vec<HistoryRecord>,
    }
}

pub mod settings {
    use shared::{AppSettings, DateStyle, IntervalUnit};

    /// Input for updating user settings.
    #[derive(Debug, Clone)]
    pub struct UpdateSettingsCommand {
        pub upcoming_threshold: i32,
        pub threshold_unit: IntervalUnit,
        pub use_24_hour_clock: bool,
        pub date_style: DateStyle,
    }

    /// Result of updating settings.
    #[derive(Debug, Clone)]
    pub struct SettingsResult {
        pub settings: AppSettings,
        pub success_message: String,
    }
}
