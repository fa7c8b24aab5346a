//! # Storage Module
//!
//! Handles all data persistence operations for the pet care tracker.
//!
//! This module abstracts away the specific storage implementation details and
//! provides a consistent interface for persisting and retrieving data. The
//! domain layer depends on the traits in [`traits`]; the JSON-file
//! implementation in [`json`] is the one shipped with the crate.
//!
//! ## Key Responsibilities
//!
//! - **Data Persistence**: Saving pets, events, history, procedure templates,
//!   categories and settings to disk
//! - **Data Retrieval**: Loading stored collections back into memory, with
//!   starter-dataset fallback for absent or unreadable files
//! - **Atomicity**: Temp-file-and-rename writes per collection file

pub mod json;
pub mod traits;

// Re-export the main types that other modules need
pub use json::JsonConnection;
pub use traits::{
    CategoryStorage, EventStorage, HistoryStorage, PetStorage, ProcedureStorage,
};
