//! Scheduling, completion, and querying of recurring care events. This is
//! the service the other entity services orbit around: it owns the due
//! timestamps, the completion history, and the reminder lifecycle.

use anyhow::Result;
use chrono::{Local, NaiveDateTime};
use log::{info, warn};
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::commands::events::{
    CompleteEventCommand, CompleteEventResult, CreateEventCommand, DeleteEventCommand,
    DeleteEventResult, EventFilter, EventListQuery, EventListResult, EventResult,
    UpdateEventCommand,
};
use crate::domain::recurrence::RecurrenceEngine;
use crate::notifications::{reminder_body, ReminderScheduler, REMINDER_TITLE};
use crate::storage::json::{
    EventRepository, HistoryRepository, JsonConnection, PetRepository, ProcedureRepository,
    SettingsRepository, SettingsStorage,
};
use crate::storage::traits::{EventStorage, HistoryStorage, PetStorage, ProcedureStorage};
use shared::{Event, EventStatus, HistoryRecord, ProcedureDefinition};

/// Service for managing scheduled events and their completion history
#[derive(Clone)]
pub struct EventService {
    event_repository: EventRepository,
    history_repository: HistoryRepository,
    pet_repository: PetRepository,
    procedure_repository: ProcedureRepository,
    settings_repository: SettingsRepository,
    recurrence: RecurrenceEngine,
    reminders: Arc<dyn ReminderScheduler>,
}

impl EventService {
    /// Create a new EventService
    pub fn new(connection: Arc<JsonConnection>, reminders: Arc<dyn ReminderScheduler>) -> Self {
        Self {
            event_repository: EventRepository::new((*connection).clone()),
            history_repository: HistoryRepository::new((*connection).clone()),
            pet_repository: PetRepository::new((*connection).clone()),
            procedure_repository: ProcedureRepository::new((*connection).clone()),
            settings_repository: SettingsRepository::new((*connection).clone()),
            recurrence: RecurrenceEngine::new(),
            reminders,
        }
    }

    /// Schedule a new event
    pub fn create_event(&self, command: CreateEventCommand) -> Result<EventResult> {
        let now = Local::now().naive_local();
        info!("Creating event for procedure: {}", command.procedure.name);

        let event = Event {
            id: Uuid::new_v4(),
            procedure: command.procedure,
            pet_id: command.pet_id,
            due_at: command.due_at,
            is_notification_enabled: command.is_notification_enabled,
            interval_unit: command.interval_unit,
            time_of_day: command.time_of_day,
        };

        self.event_repository.store_event(&event)?;
        self.schedule_reminder_if_needed(&event, now);

        info!("Created event: {} due {}", event.id, event.due_at);

        Ok(EventResult {
            event,
            success_message: "Event created successfully".to_string(),
        })
    }

    /// Replace an event wholesale by id
    pub fn update_event(&self, command: UpdateEventCommand) -> Result<EventResult> {
        let now = Local::now().naive_local();
        let mut event = command.event;
        info!("Updating event: {}", event.id);

        let existing = self
            .event_repository
            .get_event(event.id)
            .ok_or_else(|| anyhow::anyhow!("Event not found: {}", event.id))?;

        // A slot change resets the due clock-time, keeping the date
        if event.time_of_day != existing.time_of_day {
            event.due_at = event.time_of_day.apply_to(event.due_at);
        }

        self.event_repository.update_event(&event)?;

        let reminder_changed = event.is_notification_enabled != existing.is_notification_enabled
            || event.due_at != existing.due_at
            || event.procedure.name != existing.procedure.name;
        if reminder_changed {
            self.reminders.cancel_reminder(event.id);
            self.schedule_reminder_if_needed(&event, now);
        }

        Ok(EventResult {
            event,
            success_message: "Event updated successfully".to_string(),
        })
    }

    /// Delete an event and cancel its reminder
    pub fn delete_event(&self, command: DeleteEventCommand) -> Result<DeleteEventResult> {
        info!("Deleting event: {}", command.event_id);

        let deleted = self.event_repository.delete_event(command.event_id)?;
        if !deleted {
            warn!("Event not found for deletion: {}", command.event_id);
            return Ok(DeleteEventResult {
                deleted: false,
                success_message: "Event not found".to_string(),
            });
        }

        self.reminders.cancel_reminder(command.event_id);

        Ok(DeleteEventResult {
            deleted: true,
            success_message: "Event deleted successfully".to_string(),
        })
    }

    /// Mark an event done: append a history record, move the due timestamp
    /// to the next occurrence, and refresh the reminder
    pub fn complete_event(&self, command: CompleteEventCommand) -> Result<CompleteEventResult> {
        let now = Local::now().naive_local();
        info!("Completing event: {}", command.event_id);

        let event = self
            .event_repository
            .get_event(command.event_id)
            .ok_or_else(|| anyhow::anyhow!("Event not found: {}", command.event_id))?;

        let record = HistoryRecord {
            id: Uuid::new_v4(),
            event_id: event.id,
            procedure: event.procedure.clone(),
            pet_id: event.pet_id,
            is_on_time: self.recurrence.is_on_time(event.due_at, now),
            completed_at: now,
            comment: command.comment.unwrap_or_default(),
        };

        let mut rescheduled = event.clone();
        rescheduled.due_at = self.recurrence.next_occurrence(
            event.due_at,
            now,
            event.procedure.interval,
            event.interval_unit,
        );

        // History first; roll the record back if the event update fails so
        // the pair persists together or not at all
        self.history_repository.append_record(&record)?;
        if let Err(e) = self.event_repository.update_event(&rescheduled) {
            if let Err(rollback) = self.history_repository.delete_record(record.id) {
                warn!(
                    "Could not roll back history record {} after failed event update: {}",
                    record.id, rollback
                );
            }
            return Err(e);
        }

        self.reminders.cancel_reminder(event.id);
        self.schedule_reminder_if_needed(&rescheduled, now);

        info!(
            "Completed event {} ({}), next due {}",
            event.id, event.procedure.name, rescheduled.due_at
        );

        Ok(CompleteEventResult {
            record,
            event: rescheduled,
            success_message: "Event completed successfully".to_string(),
        })
    }

    /// List events matching a status filter, pet filter, and search string,
    /// sorted by due timestamp ascending
    pub fn list_events(&self, query: EventListQuery) -> EventListResult {
        let now = Local::now().naive_local();
        let mut events = self.event_repository.list_events();

        if let Some(pet_id) = query.pet_id {
            events.retain(|event| event.pet_id == Some(pet_id));
        }

        events = self.filter_by_status(events, query.filter, now);

        if let Some(search) = query.search.as_deref() {
            let needle = search.to_lowercase();
            let pets = self.pet_repository.list_pets();
            events.retain(|event| {
                if event.procedure.name.to_lowercase().contains(&needle) {
                    return true;
                }
                event
                    .pet_id
                    .and_then(|pet_id| pets.iter().find(|pet| pet.id == pet_id))
                    .map(|pet| pet.name.to_lowercase().contains(&needle))
                    .unwrap_or(false)
            });
        }

        events.sort_by_key(|event| event.due_at);

        EventListResult { events }
    }

    /// Classify an event against the current wall clock
    pub fn status_of(&self, event: &Event) -> EventStatus {
        self.recurrence.classify(event.due_at, Local::now().naive_local())
    }

    /// Build an unpersisted draft for the new-event form: first stored
    /// procedure (or an "Unknown" placeholder), due today at the procedure's
    /// slot, notifications off
    pub fn draft_event(&self, pet_id: Option<Uuid>) -> Event {
        let now = Local::now().naive_local();
        let procedure = self
            .procedure_repository
            .list_procedures()
            .into_iter()
            .next()
            .unwrap_or_else(|| ProcedureDefinition::named("Unknown"));
        Event::draft(procedure, pet_id, now)
    }

    fn filter_by_status(
        &self,
        events: Vec<Event>,
        filter: EventFilter,
        now: NaiveDateTime,
    ) -> Vec<Event> {
        match filter {
            EventFilter::All => events,
            EventFilter::Today => events
                .into_iter()
                .filter(|event| event.due_at.date() == now.date())
                .collect(),
            EventFilter::Soon => {
                let settings = self.settings_repository.get_settings();
                match self
                    .recurrence
                    .advance(now, settings.upcoming_threshold, settings.threshold_unit)
                {
                    Some(window_end) => events
                        .into_iter()
                        .filter(|event| event.due_at > now && event.due_at <= window_end)
                        .collect(),
                    // Window cannot be computed, nothing qualifies as soon
                    None => Vec::new(),
                }
            }
            EventFilter::Overdue => events
                .into_iter()
                .filter(|event| event.due_at < now)
                .collect(),
        }
    }

    fn schedule_reminder_if_needed(&self, event: &Event, now: NaiveDateTime) {
        if !event.is_notification_enabled || event.due_at <= now {
            return;
        }

        let pet_name = event
            .pet_id
            .and_then(|pet_id| self.pet_repository.get_pet(pet_id))
            .map(|pet| pet.name);
        let body = reminder_body(&event.procedure.name, pet_name.as_deref());

        self.reminders
            .schedule_reminder(event.id, event.due_at, REMINDER_TITLE, &body);
    }
}
