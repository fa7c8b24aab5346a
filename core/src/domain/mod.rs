//! # Domain Module
//!
//! Contains all business logic for the pet care tracker.
//!
//! This module encapsulates the core business rules, entities, and services
//! that define how recurring care procedures are modeled, scheduled, and
//! recorded. It operates independently of any specific UI framework or
//! storage mechanism.
//!
//! ## Module Organization
//!
//! - **event_service**: Scheduling, completion, and querying of care events
//! - **recurrence**: Status classification and next-occurrence calendar math
//! - **pet_service**: Pet profiles and the orphaned-event policy
//! - **procedure_service**: Procedure template CRUD and copying
//! - **category_service**: Category CRUD (snapshot semantics, no cascades)
//! - **history_service**: Completion history queries and comment curation
//! - **settings_service**: User preferences for filtering and formatting
//! - **commands**: Command and result types the services speak
//! - **validation**: Input validation errors shared by the services
//!
//! ## Key Responsibilities
//!
//! - **Event Management**: Creating, editing, completing, and deleting
//!   scheduled events, with reminders kept in sync
//! - **Recurrence**: Computing an event's status and its next due timestamp
//!   with calendar-aware arithmetic
//! - **Business Rule Enforcement**: Non-empty names, positive intervals,
//!   non-negative thresholds
//! - **History**: One immutable record per completion, comment edits aside
//!
//! ## Design Principles
//!
//! - **Single Responsibility**: Each service has a focused purpose
//! - **Testability**: Pure date math behind a small engine type, storage
//!   behind repositories, reminders behind an injected trait
//! - **Storage Agnostic**: Works with any storage implementation
//! - **UI Agnostic**: Business logic separate from presentation concerns

pub mod commands;
pub mod event_service;
pub mod recurrence;
pub mod pet_service;
pub mod procedure_service;
pub mod category_service;
pub mod history_service;
pub mod settings_service;
pub mod validation;

pub use commands::*;
pub use event_service::*;
pub use recurrence::*;
pub use pet_service::*;
pub use procedure_service::*;
pub use category_service::*;
pub use history_service::*;
pub use settings_service::*;
pub use validation::*;
