//! # Reminder Scheduling
//!
//! The tracker does not talk to any notification system itself. It describes
//! the reminder it wants (identifier, fire time, text) to a
//! [`ReminderScheduler`] injected by the embedding application, which may
//! bridge to OS notifications, a message queue, or nothing at all.
//!
//! Scheduling is fire-and-forget: calls are not awaited and failures are
//! swallowed by the implementation. An implementation without permission to
//! notify simply does nothing.

use chrono::NaiveDateTime;
use log::debug;
use uuid::Uuid;

/// Title shared by every reminder.
pub const REMINDER_TITLE: &str = "Time to procedures!";

/// Stable identifier for an event's reminder. Scheduling under an existing
/// identifier replaces the pending reminder, so reschedule is cancel + schedule.
pub fn reminder_identifier(event_id: Uuid) -> String {
    format!("event_{}", event_id)
}

/// Reminder body line, with a placeholder when the pet is unknown.
pub fn reminder_body(procedure_name: &str, pet_name: Option<&str>) -> String {
    format!("{} for {}", procedure_name, pet_name.unwrap_or("your pet"))
}

/// Collaborator that delivers reminders for due events.
pub trait ReminderScheduler: Send + Sync {
    /// Request a reminder for an event at its due time.
    fn schedule_reminder(&self, event_id: Uuid, due_at: NaiveDateTime, title: &str, body: &str);

    /// Drop any pending reminder for an event.
    fn cancel_reminder(&self, event_id: Uuid);
}

/// Scheduler that drops every request. Used when the embedding application
/// has no notification channel.
#[derive(Debug, Clone, Default)]
pub struct NullReminderScheduler;

impl ReminderScheduler for NullReminderScheduler {
    fn schedule_reminder(&self, event_id: Uuid, due_at: NaiveDateTime, title: &str, _body: &str) {
        debug!(
            "Dropping reminder {} ({}) due {}",
            reminder_identifier(event_id),
            title,
            due_at
        );
    }

    fn cancel_reminder(&self, event_id: Uuid) {
        debug!("Dropping cancel for reminder {}", reminder_identifier(event_id));
    }
}

#[cfg(test)]
pub use test_support::{RecordingScheduler, ScheduledReminder};

#[cfg(test)]
mod test_support {
    use super::*;
    use std::sync::Mutex;

    /// One captured schedule request.
    #[derive(Debug, Clone, PartialEq)]
    pub struct ScheduledReminder {
        pub event_id: Uuid,
        pub due_at: NaiveDateTime,
        pub title: String,
        pub body: String,
    }

    /// Scheduler fake that records every request for assertions.
    #[derive(Debug, Default)]
    pub struct RecordingScheduler {
        scheduled: Mutex<Vec<ScheduledReminder>>,
        cancelled: Mutex<Vec<Uuid>>,
    }

    impl RecordingScheduler {
        pub fn scheduled(&self) -> Vec<ScheduledReminder> {
            self.scheduled.lock().unwrap().clone()
        }

        pub fn cancelled(&self) -> Vec<Uuid> {
            self.cancelled.lock().unwrap().clone()
        }
    }

    impl ReminderScheduler for RecordingScheduler {
        fn schedule_reminder(&self, event_id: Uuid, due_at: NaiveDateTime, title: &str, body: &str) {
            self.scheduled.lock().unwrap().push(ScheduledReminder {
                event_id,
                due_at,
                title: title.to_string(),
                body: body.to_string(),
            });
        }

        fn cancel_reminder(&self, event_id: Uuid) {
            self.cancelled.lock().unwrap().push(event_id);
        }
    }
}
