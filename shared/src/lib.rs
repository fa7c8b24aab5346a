use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Calendar granularity used for recurrence steps and pet ages.
///
/// Conversions to actual date arithmetic live in the core crate; this type
/// only carries the closed set of units and their display labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IntervalUnit {
    Hour,
    Day,
    Week,
    Month,
    Year,
}

impl IntervalUnit {
    /// Every unit, in picker order.
    pub const ALL: [IntervalUnit; 5] = [
        IntervalUnit::Hour,
        IntervalUnit::Day,
        IntervalUnit::Week,
        IntervalUnit::Month,
        IntervalUnit::Year,
    ];

    /// Capitalized name for pickers and settings screens. Matches the
    /// serialized variant name.
    pub fn display_name(&self) -> &'static str {
        match self {
            IntervalUnit::Hour => "Hour",
            IntervalUnit::Day => "Day",
            IntervalUnit::Week => "Week",
            IntervalUnit::Month => "Month",
            IntervalUnit::Year => "Year",
        }
    }

    /// Unit label for display: singular when the magnitude is exactly 1,
    /// plural otherwise.
    pub fn label(&self, count: i64) -> &'static str {
        match self {
            IntervalUnit::Hour => {
                if count == 1 {
                    "hour"
                } else {
                    "hours"
                }
            }
            IntervalUnit::Day => {
                if count == 1 {
                    "day"
                } else {
                    "days"
                }
            }
            IntervalUnit::Week => {
                if count == 1 {
                    "week"
                } else {
                    "weeks"
                }
            }
            IntervalUnit::Month => {
                if count == 1 {
                    "month"
                } else {
                    "months"
                }
            }
            IntervalUnit::Year => {
                if count == 1 {
                    "year"
                } else {
                    "years"
                }
            }
        }
    }
}

/// Preferred time-of-day slot for a procedure. Each slot maps to a fixed
/// clock time applied to due timestamps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeOfDay {
    Morning,
    Midday,
    Evening,
}

impl TimeOfDay {
    /// Fixed (hour, minute) the slot maps to.
    pub fn clock_time(&self) -> (u32, u32) {
        match self {
            TimeOfDay::Morning => (6, 0),
            TimeOfDay::Midday => (12, 0),
            TimeOfDay::Evening => (18, 0),
        }
    }

    /// Replace the clock-time portion of `timestamp` with this slot's fixed
    /// time, preserving the date portion. If the combined timestamp cannot
    /// be constructed the original is returned unchanged.
    pub fn apply_to(&self, timestamp: NaiveDateTime) -> NaiveDateTime {
        let (hour, minute) = self.clock_time();
        timestamp
            .date()
            .and_hms_opt(hour, minute, 0)
            .unwrap_or(timestamp)
    }
}

/// Status bucket for an event's due timestamp relative to "now".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventStatus {
    /// Due on the current calendar day.
    Today,
    /// Due strictly before now and not today.
    Overdue,
    /// Due in the future: whole-unit count and the tier it was reported in.
    Upcoming(i64, IntervalUnit),
}

impl EventStatus {
    /// Short badge text, e.g. "Today", "Overdue", "in 3 days".
    pub fn label(&self) -> String {
        match self {
            EventStatus::Today => "Today".to_string(),
            EventStatus::Overdue => "Overdue".to_string(),
            EventStatus::Upcoming(count, unit) => {
                format!("in {} {}", count, unit.label(*count))
            }
        }
    }
}

/// A named grouping for procedures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
}

impl Category {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
        }
    }
}

/// A recurring care-task template (e.g. "Deworming every 2 months, midday").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcedureDefinition {
    pub id: Uuid,
    pub name: String,
    /// Embedded snapshot; renaming or deleting the source category does not
    /// touch this copy.
    pub category: Option<Category>,
    /// Recurrence step count, combined with `interval_unit`.
    pub interval: i32,
    pub interval_unit: IntervalUnit,
    pub time_of_day: TimeOfDay,
}

impl ProcedureDefinition {
    /// Template with the model defaults: every 7 days, morning slot,
    /// no category.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            category: None,
            interval: 7,
            interval_unit: IntervalUnit::Day,
            time_of_day: TimeOfDay::Morning,
        }
    }
}

/// A pet profile. The image payload is opaque to this library.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pet {
    pub id: Uuid,
    pub name: String,
    pub age: i32,
    pub age_unit: IntervalUnit,
    pub image_data: Option<Vec<u8>>,
}

/// One scheduled instance of a procedure for a pet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: Uuid,
    /// Snapshot taken when the event was created or last edited; editing the
    /// procedure definition afterwards does not change it.
    pub procedure: ProcedureDefinition,
    /// Owning pet, if any. The pet may since have been deleted.
    pub pet_id: Option<Uuid>,
    pub due_at: NaiveDateTime,
    pub is_notification_enabled: bool,
    /// Recurrence unit override. The step count still comes from the
    /// embedded procedure's interval.
    pub interval_unit: IntervalUnit,
    pub time_of_day: TimeOfDay,
}

impl Event {
    /// Draft a new, not-yet-persisted event from a procedure template:
    /// due today at the procedure's slot time, notifications off, recurrence
    /// taken from the template.
    pub fn draft(procedure: ProcedureDefinition, pet_id: Option<Uuid>, now: NaiveDateTime) -> Self {
        let due_at = procedure.time_of_day.apply_to(now);
        Self {
            id: Uuid::new_v4(),
            pet_id,
            due_at,
            is_notification_enabled: false,
            interval_unit: procedure.interval_unit,
            time_of_day: procedure.time_of_day,
            procedure,
        }
    }
}

/// Immutable record of one completion. Only the comment may be edited
/// after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryRecord {
    pub id: Uuid,
    /// Identity of the event this completion belongs to.
    pub event_id: Uuid,
    pub procedure: ProcedureDefinition,
    pub pet_id: Option<Uuid>,
    /// Whether the completion day was on or before the due day.
    pub is_on_time: bool,
    pub completed_at: NaiveDateTime,
    pub comment: String,
}

/// Date layout for formatted timestamps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DateStyle {
    /// 07.03.2026
    DotDmy,
    /// 2026-03-07
    IsoYmd,
    /// 07 Mar 2026
    MonthNameDmy,
    /// 07/03/2026
    SlashDmy,
}

impl DateStyle {
    /// strftime pattern for the date portion.
    pub fn date_pattern(&self) -> &'static str {
        match self {
            DateStyle::DotDmy => "%d.%m.%Y",
            DateStyle::IsoYmd => "%Y-%m-%d",
            DateStyle::MonthNameDmy => "%d %b %Y",
            DateStyle::SlashDmy => "%d/%m/%Y",
        }
    }
}

/// User preferences consumed by list filtering and display formatting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppSettings {
    /// "Upcoming soon" window size, combined with `threshold_unit`.
    pub upcoming_threshold: i32,
    pub threshold_unit: IntervalUnit,
    pub use_24_hour_clock: bool,
    pub date_style: DateStyle,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            upcoming_threshold: 7,
            threshold_unit: IntervalUnit::Day,
            use_24_hour_clock: true,
            date_style: DateStyle::DotDmy,
        }
    }
}

impl AppSettings {
    /// strftime pattern for the clock portion.
    pub fn clock_pattern(&self) -> &'static str {
        if self.use_24_hour_clock {
            "%H:%M"
        } else {
            "%-I:%M %p"
        }
    }

    /// Format a timestamp per the configured date style and clock,
    /// date part first.
    pub fn format_timestamp(&self, timestamp: NaiveDateTime) -> String {
        let pattern = format!("{} {}", self.date_style.date_pattern(), self.clock_pattern());
        timestamp.format(&pattern).to_string()
    }
}

/// What happens to a pet's events when the pet is deleted. History records
/// are never touched by any policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrphanedEventPolicy {
    /// Leave the events in place, still referencing the gone pet.
    Keep,
    /// Clear the events' pet reference.
    Unlink,
    /// Remove the events (and cancel their reminders).
    Delete,
}

impl Default for OrphanedEventPolicy {
    fn default() -> Self {
        OrphanedEventPolicy::Keep
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn timestamp(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    #[test]
    fn test_interval_unit_labels() {
        assert_eq!(IntervalUnit::Day.label(1), "day");
        assert_eq!(IntervalUnit::Day.label(5), "days");
        assert_eq!(IntervalUnit::Week.label(1), "week");
        assert_eq!(IntervalUnit::Week.label(4), "weeks");
        assert_eq!(IntervalUnit::Hour.label(2), "hours");
        assert_eq!(IntervalUnit::Month.label(1), "month");
        assert_eq!(IntervalUnit::Year.label(0), "years");
    }

    #[test]
    fn test_interval_unit_display_names_match_serialized_form() {
        for unit in IntervalUnit::ALL {
            let encoded = serde_json::to_string(&unit).unwrap();
            assert_eq!(encoded, format!("\"{}\"", unit.display_name()));
        }
        assert_eq!(IntervalUnit::Day.display_name(), "Day");
    }

    #[test]
    fn test_time_of_day_clock_times() {
        assert_eq!(TimeOfDay::Morning.clock_time(), (6, 0));
        assert_eq!(TimeOfDay::Midday.clock_time(), (12, 0));
        assert_eq!(TimeOfDay::Evening.clock_time(), (18, 0));
    }

    #[test]
    fn test_apply_time_of_day_keeps_date() {
        let original = timestamp(2026, 3, 7, 9, 45);
        let adjusted = TimeOfDay::Evening.apply_to(original);
        assert_eq!(adjusted, timestamp(2026, 3, 7, 18, 0));

        // Seconds are zeroed along with the rest of the clock time.
        let with_seconds = NaiveDate::from_ymd_opt(2026, 3, 7)
            .unwrap()
            .and_hms_opt(9, 45, 33)
            .unwrap();
        assert_eq!(
            TimeOfDay::Morning.apply_to(with_seconds),
            timestamp(2026, 3, 7, 6, 0)
        );
    }

    #[test]
    fn test_event_status_labels() {
        assert_eq!(EventStatus::Today.label(), "Today");
        assert_eq!(EventStatus::Overdue.label(), "Overdue");
        assert_eq!(
            EventStatus::Upcoming(1, IntervalUnit::Week).label(),
            "in 1 week"
        );
        assert_eq!(
            EventStatus::Upcoming(3, IntervalUnit::Day).label(),
            "in 3 days"
        );
    }

    #[test]
    fn test_draft_event_from_procedure() {
        let mut procedure = ProcedureDefinition::named("Claws");
        procedure.interval = 2;
        procedure.interval_unit = IntervalUnit::Month;
        procedure.time_of_day = TimeOfDay::Evening;

        let now = timestamp(2026, 3, 7, 9, 45);
        let pet_id = Uuid::new_v4();
        let event = Event::draft(procedure.clone(), Some(pet_id), now);

        assert_eq!(event.procedure, procedure);
        assert_eq!(event.pet_id, Some(pet_id));
        assert_eq!(event.due_at, timestamp(2026, 3, 7, 18, 0));
        assert!(!event.is_notification_enabled);
        assert_eq!(event.interval_unit, IntervalUnit::Month);
        assert_eq!(event.time_of_day, TimeOfDay::Evening);
    }

    #[test]
    fn test_procedure_named_uses_defaults() {
        let procedure = ProcedureDefinition::named("Unknown");
        assert_eq!(procedure.name, "Unknown");
        assert!(procedure.category.is_none());
        assert_eq!(procedure.interval, 7);
        assert_eq!(procedure.interval_unit, IntervalUnit::Day);
        assert_eq!(procedure.time_of_day, TimeOfDay::Morning);
    }

    #[test]
    fn test_settings_defaults() {
        let settings = AppSettings::default();
        assert_eq!(settings.upcoming_threshold, 7);
        assert_eq!(settings.threshold_unit, IntervalUnit::Day);
        assert!(settings.use_24_hour_clock);
        assert_eq!(settings.date_style, DateStyle::DotDmy);
    }

    #[test]
    fn test_format_timestamp_styles() {
        let ts = timestamp(2026, 3, 7, 14, 5);
        let mut settings = AppSettings::default();

        assert_eq!(settings.format_timestamp(ts), "07.03.2026 14:05");

        settings.date_style = DateStyle::IsoYmd;
        assert_eq!(settings.format_timestamp(ts), "2026-03-07 14:05");

        settings.date_style = DateStyle::MonthNameDmy;
        assert_eq!(settings.format_timestamp(ts), "07 Mar 2026 14:05");

        settings.date_style = DateStyle::SlashDmy;
        settings.use_24_hour_clock = false;
        assert_eq!(settings.format_timestamp(ts), "07/03/2026 2:05 PM");

        // 12-hour clock reports midnight as 12, without a leading zero.
        let after_midnight = timestamp(2026, 3, 7, 0, 30);
        assert_eq!(
            settings.format_timestamp(after_midnight),
            "07/03/2026 12:30 AM"
        );
    }

    #[test]
    fn test_events_round_trip_json() {
        let mut procedure = ProcedureDefinition::named("Vaccines");
        procedure.category = Some(Category::named("Health"));
        procedure.interval = 1;
        procedure.interval_unit = IntervalUnit::Year;

        let now = timestamp(2026, 3, 7, 9, 0);
        let events = vec![
            Event::draft(procedure.clone(), Some(Uuid::new_v4()), now),
            Event {
                is_notification_enabled: true,
                ..Event::draft(procedure, None, now)
            },
        ];

        let encoded = serde_json::to_string(&events).unwrap();
        let decoded: Vec<Event> = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded, events);
    }

    #[test]
    fn test_history_round_trip_json() {
        let record = HistoryRecord {
            id: Uuid::new_v4(),
            event_id: Uuid::new_v4(),
            procedure: ProcedureDefinition::named("Combing"),
            pet_id: None,
            is_on_time: true,
            completed_at: timestamp(2026, 3, 7, 18, 0),
            comment: "went fine".to_string(),
        };

        let encoded = serde_json::to_string(&vec![record.clone()]).unwrap();
        let decoded: Vec<HistoryRecord> = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded, vec![record]);
    }
}
