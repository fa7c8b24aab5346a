use anyhow::Result;
use chrono::NaiveDateTime;
use log::info;
use std::sync::Arc;

use crate::domain::commands::settings::{SettingsResult, UpdateSettingsCommand};
use crate::domain::validation::ValidationError;
use crate::storage::json::{JsonConnection, SettingsRepository, SettingsStorage};
use shared::AppSettings;

/// Service for user preferences: the upcoming-soon window and the display
/// formats. Settings never influence the status classifier.
#[derive(Clone)]
pub struct SettingsService {
    settings_repository: SettingsRepository,
}

impl SettingsService {
    /// Create a new SettingsService
    pub fn new(connection: Arc<JsonConnection>) -> Self {
        Self {
            settings_repository: SettingsRepository::new((*connection).clone()),
        }
    }

    /// Get the current settings, or the defaults when none are stored
    pub fn get_settings(&self) -> AppSettings {
        self.settings_repository.get_settings()
    }

    /// Replace the stored settings
    pub fn update_settings(&self, command: UpdateSettingsCommand) -> Result<SettingsResult> {
        info!(
            "Updating settings: threshold={} {:?}",
            command.upcoming_threshold, command.threshold_unit
        );

        if command.upcoming_threshold < 0 {
            return Err(ValidationError::NegativeThreshold.into());
        }

        let settings = AppSettings {
            upcoming_threshold: command.upcoming_threshold,
            threshold_unit: command.threshold_unit,
            use_24_hour_clock: command.use_24_hour_clock,
            date_style: command.date_style,
        };

        self.settings_repository.update_settings(&settings)?;

        Ok(SettingsResult {
            settings,
            success_message: "Settings updated successfully".to_string(),
        })
    }

    /// Format a timestamp per the stored display preferences
    pub fn format_timestamp(&self, timestamp: NaiveDateTime) -> String {
        self.get_settings().format_timestamp(timestamp)
    }
}
