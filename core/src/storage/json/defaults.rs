//! # Starter Dataset
//!
//! First-run contents for every collection. A repository falls back to this
//! dataset when its file is absent or cannot be decoded, so a fresh install
//! opens with a populated tracker instead of empty screens.
//!
//! The dataset is generated once per [`JsonConnection`](super::connection::JsonConnection)
//! and shared by all repositories, which keeps the generated ids consistent:
//! the starter events reference the starter pet and starter procedure
//! snapshots built in the same pass.

use chrono::Local;
use shared::{Category, Event, HistoryRecord, IntervalUnit, Pet, ProcedureDefinition, TimeOfDay};
use uuid::Uuid;

/// In-memory defaults for all persisted collections.
#[derive(Debug, Clone)]
pub struct StarterData {
    pub pets: Vec<Pet>,
    pub events: Vec<Event>,
    pub history: Vec<HistoryRecord>,
    pub procedures: Vec<ProcedureDefinition>,
    pub categories: Vec<Category>,
}

impl StarterData {
    /// Build the full starter dataset with freshly generated ids.
    ///
    /// The two starter events are due "now" so a first launch immediately
    /// shows something on the today list.
    pub fn generate() -> Self {
        let now = Local::now().naive_local();

        let health = Category::named("Health");
        let hygiene = Category::named("Hygiene");
        let grooming = Category::named("Grooming");
        let other = Category::named("Other");

        let procedures = vec![
            starter_procedure("Vaccines", &health, 1, IntervalUnit::Year, TimeOfDay::Morning),
            starter_procedure("Deworming", &health, 2, IntervalUnit::Month, TimeOfDay::Midday),
            starter_procedure("Fleas/ticks", &health, 2, IntervalUnit::Day, TimeOfDay::Midday),
            starter_procedure("Claws", &grooming, 2, IntervalUnit::Month, TimeOfDay::Evening),
            starter_procedure("Trimming/clipping", &grooming, 1, IntervalUnit::Year, TimeOfDay::Morning),
            starter_procedure("Ears", &hygiene, 1, IntervalUnit::Year, TimeOfDay::Morning),
            starter_procedure("Teeth", &hygiene, 1, IntervalUnit::Year, TimeOfDay::Morning),
            starter_procedure("Bathing", &hygiene, 1, IntervalUnit::Year, TimeOfDay::Morning),
            starter_procedure("Combing", &grooming, 3, IntervalUnit::Month, TimeOfDay::Evening),
        ];

        let jack = Pet {
            id: Uuid::new_v4(),
            name: "Jack".to_string(),
            age: 3,
            age_unit: IntervalUnit::Year,
            image_data: None,
        };

        let events = vec![
            Event {
                id: Uuid::new_v4(),
                procedure: procedures[1].clone(),
                pet_id: Some(jack.id),
                due_at: now,
                is_notification_enabled: false,
                interval_unit: IntervalUnit::Week,
                time_of_day: TimeOfDay::Midday,
            },
            Event {
                id: Uuid::new_v4(),
                procedure: procedures[0].clone(),
                pet_id: Some(jack.id),
                due_at: now,
                is_notification_enabled: false,
                interval_unit: IntervalUnit::Year,
                time_of_day: TimeOfDay::Morning,
            },
        ];

        Self {
            pets: vec![jack],
            events,
            history: Vec::new(),
            procedures,
            categories: vec![health, hygiene, grooming, other],
        }
    }
}

fn starter_procedure(
    name: &str,
    category: &Category,
    interval: i32,
    interval_unit: IntervalUnit,
    time_of_day: TimeOfDay,
) -> ProcedureDefinition {
    ProcedureDefinition {
        id: Uuid::new_v4(),
        name: name.to_string(),
        category: Some(category.clone()),
        interval,
        interval_unit,
        time_of_day,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starter_collection_sizes() {
        let starter = StarterData::generate();

        assert_eq!(starter.categories.len(), 4);
        assert_eq!(starter.procedures.len(), 9);
        assert_eq!(starter.pets.len(), 1);
        assert_eq!(starter.events.len(), 2);
        assert!(starter.history.is_empty());
    }

    #[test]
    fn test_starter_ids_correlate() {
        let starter = StarterData::generate();
        let jack = &starter.pets[0];

        for event in &starter.events {
            assert_eq!(event.pet_id, Some(jack.id));
            assert!(starter
                .procedures
                .iter()
                .any(|procedure| procedure.id == event.procedure.id));
        }

        let category_ids: Vec<Uuid> = starter.categories.iter().map(|c| c.id).collect();
        for procedure in &starter.procedures {
            let category = procedure.category.as_ref().expect("starter procedure has a category");
            assert!(category_ids.contains(&category.id));
        }
    }

    #[test]
    fn test_starter_pet_and_event_defaults() {
        let starter = StarterData::generate();
        let jack = &starter.pets[0];

        assert_eq!(jack.name, "Jack");
        assert_eq!(jack.age, 3);
        assert_eq!(jack.age_unit, IntervalUnit::Year);
        assert!(jack.image_data.is_none());

        let deworming = &starter.events[0];
        assert_eq!(deworming.procedure.name, "Deworming");
        assert_eq!(deworming.interval_unit, IntervalUnit::Week);
        assert_eq!(deworming.time_of_day, TimeOfDay::Midday);
        assert!(!deworming.is_notification_enabled);

        let vaccines = &starter.events[1];
        assert_eq!(vaccines.procedure.name, "Vaccines");
        assert_eq!(vaccines.interval_unit, IntervalUnit::Year);
        assert_eq!(vaccines.time_of_day, TimeOfDay::Morning);
    }
}
