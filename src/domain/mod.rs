/// Domain module containing core business logic and data types
///
/// This module defines the core entities (Habit, StatusMap, DateKey) and
/// their validation rules. These types represent the fundamental concepts
/// in the habit tracking system.

pub mod date_key;
pub mod habit;
pub mod status_map;
pub mod types;

// Re-export public types for easy access
pub use date_key::*;
pub use habit::*;
pub use status_map::*;
pub use types::*;

use thiserror::Error;

/// Errors that can occur during domain operations
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Invalid habit name: {0}")]
    InvalidHabitName(String),

    #[error("Invalid date: {0}")]
    InvalidDate(String),
}
