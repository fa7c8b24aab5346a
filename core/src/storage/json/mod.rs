//! # JSON Storage Module
//!
//! This module provides a JSON-file-based storage implementation for the pet
//! care tracker. Each collection lives in its own pretty-printed JSON file
//! under the data directory; user settings live in a YAML file next to them.
//!
//! ## Features
//!
//! - One file per collection (`pets.json`, `events.json`, ...)
//! - Full CRUD operations with atomic file writes
//! - Starter-dataset fallback for absent or unreadable files
//! - Compatible with the storage traits in [`crate::storage::traits`]

pub mod category_repository;
pub mod connection;
pub mod defaults;
pub mod event_repository;
pub mod history_repository;
pub mod pet_repository;
pub mod procedure_repository;
pub mod settings_repository;

pub use category_repository::CategoryRepository;
pub use connection::JsonConnection;
pub use defaults::StarterData;
pub use event_repository::EventRepository;
pub use history_repository::HistoryRepository;
pub use pet_repository::PetRepository;
pub use procedure_repository::ProcedureRepository;
pub use settings_repository::{SettingsRepository, SettingsStorage};
