//! # JSON Settings Repository
//!
//! This module provides file-based storage for user settings using a single
//! YAML file `settings.yaml` at the root of the data directory.
//!
//! ## YAML Format
//!
//! ```yaml
//! upcoming_threshold: 7
//! threshold_unit: Day
//! use_24_hour_clock: true
//! date_style: DotDmy
//! ```
//!
//! ## Features
//!
//! - Single settings file shared by all services
//! - Defaults when the file is absent or unreadable
//! - Atomic file writes with temp files

use anyhow::Result;
use log::{debug, info, warn};
use shared::AppSettings;
use std::fs;
use std::path::PathBuf;

use super::connection::JsonConnection;

/// Storage trait for settings operations
pub trait SettingsStorage: Send + Sync {
    /// Get the stored settings, or the defaults when none are stored
    fn get_settings(&self) -> AppSettings;

    /// Persist new settings
    fn update_settings(&self, settings: &AppSettings) -> Result<()>;
}

/// JSON-connection-based settings repository using a single YAML file
#[derive(Clone)]
pub struct SettingsRepository {
    connection: JsonConnection,
}

impl SettingsRepository {
    /// Create a new settings repository
    pub fn new(connection: JsonConnection) -> Self {
        Self { connection }
    }

    /// Get the settings file path
    fn settings_file_path(&self) -> PathBuf {
        self.connection.data_file("settings.yaml")
    }

    /// Load settings from file, falling back to defaults when the file is
    /// missing or unreadable
    fn load_settings(&self) -> AppSettings {
        let path = self.settings_file_path();

        if !path.exists() {
            debug!("Settings file {:?} not found, using defaults", path);
            return AppSettings::default();
        }

        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) => {
                warn!("Failed to read settings file {:?}: {}. Using defaults.", path, e);
                return AppSettings::default();
            }
        };

        match serde_yaml::from_str(&contents) {
            Ok(settings) => settings,
            Err(e) => {
                warn!("Failed to parse settings file {:?}: {}. Using defaults.", path, e);
                AppSettings::default()
            }
        }
    }

    /// Save settings to file
    fn save_settings(&self, settings: &AppSettings) -> Result<()> {
        let path = self.settings_file_path();
        let yaml_content = serde_yaml::to_string(settings)?;

        // Use atomic write pattern: write to temp file, then rename
        let temp_path = path.with_extension("tmp");
        fs::write(&temp_path, yaml_content)?;
        fs::rename(&temp_path, &path)?;

        debug!("Saved settings to {:?}", path);
        Ok(())
    }
}

impl SettingsStorage for SettingsRepository {
    fn get_settings(&self) -> AppSettings {
        self.load_settings()
    }

    fn update_settings(&self, settings: &AppSettings) -> Result<()> {
        self.save_settings(settings)?;
        info!("Updated settings");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::{DateStyle, IntervalUnit};
    use tempfile::TempDir;

    fn setup_test_repo() -> (SettingsRepository, TempDir) {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let connection = JsonConnection::new(temp_dir.path()).expect("Failed to create connection");
        (SettingsRepository::new(connection), temp_dir)
    }

    #[test]
    fn test_get_settings_returns_defaults_without_file() {
        let (repo, _temp_dir) = setup_test_repo();

        let settings = repo.get_settings();
        assert_eq!(settings, AppSettings::default());
    }

    #[test]
    fn test_update_and_get_settings() {
        let (repo, _temp_dir) = setup_test_repo();

        let settings = AppSettings {
            upcoming_threshold: 2,
            threshold_unit: IntervalUnit::Week,
            use_24_hour_clock: false,
            date_style: DateStyle::IsoYmd,
        };
        repo.update_settings(&settings)
            .expect("Failed to update settings");

        assert_eq!(repo.get_settings(), settings);
    }

    #[test]
    fn test_corrupt_file_falls_back_to_defaults() {
        let (repo, temp_dir) = setup_test_repo();

        fs::write(temp_dir.path().join("settings.yaml"), ": not yaml :")
            .expect("Failed to write corrupt file");

        assert_eq!(repo.get_settings(), AppSettings::default());
    }

    #[test]
    fn test_settings_persist_across_instances() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");

        let settings = AppSettings {
            upcoming_threshold: 3,
            threshold_unit: IntervalUnit::Day,
            use_24_hour_clock: true,
            date_style: DateStyle::SlashDmy,
        };

        {
            let connection =
                JsonConnection::new(temp_dir.path()).expect("Failed to create connection");
            let repo = SettingsRepository::new(connection);
            repo.update_settings(&settings)
                .expect("Failed to update settings");
        }

        // Simulate app restart with a fresh connection
        let connection = JsonConnection::new(temp_dir.path()).expect("Failed to create connection");
        let repo = SettingsRepository::new(connection);
        assert_eq!(repo.get_settings(), settings);
    }
}
