//! # JSON Event Repository
//!
//! This module provides a file-based storage implementation for scheduled
//! events using a single JSON document at `{data_directory}/events.json`.
//!
//! ## JSON Format
//!
//! The file holds one pretty-printed array of event objects. Each event
//! embeds a full snapshot of its procedure, so the file stays readable on
//! its own:
//!
//! ```json
//! [
//!   {
//!     "id": "8f0a...",
//!     "procedure": { "id": "c41b...", "name": "Deworming", ... },
//!     "pet_id": "77de...",
//!     "due_at": "2026-03-07T12:00:00",
//!     "is_notification_enabled": false,
//!     "interval_unit": "Week",
//!     "time_of_day": "Midday"
//!   }
//! ]
//! ```
//!
//! ## Features
//!
//! - Whole-collection reads and writes (read-modify-write per mutation)
//! - Bulk update and bulk delete in a single write
//! - Atomic file writes with temp files
//! - Starter-dataset fallback when the file is absent or unreadable

use anyhow::Result;
use log::{debug, info, warn};
use shared::Event;
use std::fs;
use std::path::PathBuf;
use uuid::Uuid;

use super::connection::JsonConnection;
use crate::storage::traits::EventStorage;

/// JSON-based event repository backed by a single collection file
#[derive(Clone)]
pub struct EventRepository {
    connection: JsonConnection,
}

impl EventRepository {
    /// Create a new JSON event repository
    pub fn new(connection: JsonConnection) -> Self {
        Self { connection }
    }

    /// Get the events JSON file path
    fn events_file_path(&self) -> PathBuf {
        self.connection.data_file("events.json")
    }

    /// Read all events, falling back to the starter events when the file is
    /// missing or unreadable
    fn read_events(&self) -> Vec<Event> {
        let path = self.events_file_path();

        if !path.exists() {
            debug!("Events file {:?} not found, using starter events", path);
            return self.connection.starter().events.clone();
        }

        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) => {
                warn!("Failed to read events file {:?}: {}. Using starter events.", path, e);
                return self.connection.starter().events.clone();
            }
        };

        match serde_json::from_str(&contents) {
            Ok(events) => events,
            Err(e) => {
                warn!("Failed to parse events file {:?}: {}. Using starter events.", path, e);
                self.connection.starter().events.clone()
            }
        }
    }

    /// Write all events to the JSON file
    fn write_events(&self, events: &[Event]) -> Result<()> {
        let path = self.events_file_path();
        let temp_file_path = path.with_extension("json.tmp");

        let contents = serde_json::to_string_pretty(events)?;

        // Write to temporary file first (atomic operation)
        fs::write(&temp_file_path, contents)?;

        // Atomically replace the original file
        fs::rename(&temp_file_path, &path)?;

        debug!("Successfully wrote {} events to {:?}", events.len(), path);
        Ok(())
    }
}

impl EventStorage for EventRepository {
    fn list_events(&self) -> Vec<Event> {
        self.read_events()
    }

    fn get_event(&self, event_id: Uuid) -> Option<Event> {
        self.read_events()
            .into_iter()
            .find(|event| event.id == event_id)
    }

    fn list_events_for_pet(&self, pet_id: Uuid) -> Vec<Event> {
        self.read_events()
            .into_iter()
            .filter(|event| event.pet_id == Some(pet_id))
            .collect()
    }

    fn store_event(&self, event: &Event) -> Result<()> {
        info!("Storing event: {}", event.id);

        let mut events = self.read_events();
        events.push(event.clone());
        self.write_events(&events)
    }

    fn update_event(&self, event: &Event) -> Result<()> {
        info!("Updating event: {}", event.id);

        let mut events = self.read_events();
        match events.iter_mut().find(|existing| existing.id == event.id) {
            Some(existing) => *existing = event.clone(),
            None => return Err(anyhow::anyhow!("Event not found: {}", event.id)),
        }
        self.write_events(&events)
    }

    fn update_events(&self, updates: &[Event]) -> Result<()> {
        if updates.is_empty() {
            return Ok(());
        }
        info!("Updating {} events in bulk", updates.len());

        let mut events = self.read_events();
        for existing in events.iter_mut() {
            if let Some(update) = updates.iter().find(|update| update.id == existing.id) {
                *existing = update.clone();
            }
        }
        self.write_events(&events)
    }

    fn delete_event(&self, event_id: Uuid) -> Result<bool> {
        info!("Deleting event: {}", event_id);

        let mut events = self.read_events();
        let original_len = events.len();
        events.retain(|event| event.id != event_id);

        if events.len() == original_len {
            return Ok(false);
        }

        self.write_events(&events)?;
        Ok(true)
    }

    fn delete_events(&self, event_ids: &[Uuid]) -> Result<usize> {
        if event_ids.is_empty() {
            return Ok(0);
        }
        info!("Deleting {} events in bulk", event_ids.len());

        let mut events = self.read_events();
        let original_len = events.len();
        events.retain(|event| !event_ids.contains(&event.id));

        let deleted = original_len - events.len();
        if deleted > 0 {
            self.write_events(&events)?;
        }
        Ok(deleted)
    }
}
