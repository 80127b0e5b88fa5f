/// Public library interface for habitgrid
///
/// Habitgrid is a habit-tracking core: each calendar day of a habit is
/// marked success, fail, or left unmarked, and the library derives streaks,
/// month/year aggregates, and the calendar grids used to render them. The
/// analytics and grid builders are pure functions over immutable snapshots;
/// persistence and identity sit behind the store and auth traits, with
/// local SQLite implementations included.

use std::path::PathBuf;
use std::sync::Arc;

use chrono::NaiveDate;
use thiserror::Error;
use tokio::sync::watch;

// Internal modules
mod analytics;
mod auth;
mod domain;
mod grid;
mod store;

// Re-export public modules and types
pub use analytics::{current_streak, longest_streak, month_stats, year_stats, PeriodStats};
pub use auth::{AuthError, IdentityProvider, LocalIdentityProvider, User};
pub use domain::*;
pub use grid::{
    year_options, DayCell, HeatCell, MonthAnchor, MonthCursor, MonthGrid, WeekColumn, YearGrid,
    EARLIEST_YEAR, MONTH_GRID_CELLS, MONTH_SHORT, WEEKDAYS,
};
pub use store::{HabitPatch, HabitStore, SqliteHabitStore, StoreError};

/// Errors that can occur during tracker operation
#[derive(Error, Debug)]
pub enum Error {
    #[error("Domain validation error: {0}")]
    Domain(#[from] DomainError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),
}

/// The habit tracker client facade
///
/// Composes a habit store and an identity provider and enforces the write
/// preconditions: every write requires a signed-in user and fails fast
/// without touching the store otherwise, and day toggles on future dates
/// are ignored. Reads flow through the store subscription, which replaces
/// the whole habit list on every change.
pub struct HabitTracker {
    store: Arc<dyn HabitStore>,
    identity: Arc<dyn IdentityProvider>,
}

impl HabitTracker {
    /// Create a tracker over an existing store and identity provider
    pub fn new(store: Arc<dyn HabitStore>, identity: Arc<dyn IdentityProvider>) -> Self {
        Self { store, identity }
    }

    /// Open a tracker backed by a local SQLite database at the given path
    pub fn open(db_path: PathBuf) -> Result<Self, Error> {
        let store = SqliteHabitStore::new(db_path.clone())?;
        let identity = LocalIdentityProvider::new(db_path)?;
        Ok(Self::new(Arc::new(store), Arc::new(identity)))
    }

    /// Get a reference to the store (useful for testing)
    pub fn store(&self) -> &Arc<dyn HabitStore> {
        &self.store
    }

    /// Get a reference to the identity provider (useful for testing)
    pub fn identity(&self) -> &Arc<dyn IdentityProvider> {
        &self.identity
    }

    /// The signed-in user, or a fast `NotSignedIn` failure
    async fn require_user(&self) -> Result<User, Error> {
        self.identity
            .current_user()
            .await
            .ok_or(Error::Auth(AuthError::NotSignedIn))
    }

    /// Subscribe to the signed-in user's habit list
    pub async fn habits(&self) -> Result<watch::Receiver<Vec<Habit>>, Error> {
        let user = self.require_user().await?;
        Ok(self.store.subscribe(&user.id).await?)
    }

    /// Create a habit with an empty history
    pub async fn create_habit(&self, name: &str, kind: HabitKind) -> Result<HabitId, Error> {
        let user = self.require_user().await?;
        Habit::validate_name(name)?;
        Ok(self.store.create(&user.id, name, kind).await?)
    }

    /// Rename a habit
    pub async fn rename_habit(&self, habit: &HabitId, name: &str) -> Result<(), Error> {
        let user = self.require_user().await?;
        Habit::validate_name(name)?;
        Ok(self
            .store
            .update(&user.id, habit, HabitPatch::rename(name))
            .await?)
    }

    /// Change a habit's polarity
    pub async fn set_kind(&self, habit: &HabitId, kind: HabitKind) -> Result<(), Error> {
        let user = self.require_user().await?;
        Ok(self
            .store
            .update(&user.id, habit, HabitPatch::set_kind(kind))
            .await?)
    }

    /// Delete a habit document
    pub async fn delete_habit(&self, habit: &HabitId) -> Result<(), Error> {
        let user = self.require_user().await?;
        Ok(self.store.delete(&user.id, habit).await?)
    }

    /// Advance a day's status through the click cycle and persist it
    ///
    /// Returns the written status, or `Ok(None)` without any store call
    /// when the day is in the future. The next status is derived from the
    /// snapshot in hand; the updated state arrives through the
    /// subscription once the store has applied the write.
    pub async fn toggle_day(
        &self,
        habit: &Habit,
        key: &DateKey,
        today: NaiveDate,
    ) -> Result<Option<DayStatus>, Error> {
        let user = self.require_user().await?;

        if key.to_date()? > today {
            tracing::debug!("Ignoring toggle on future day {}", key);
            return Ok(None);
        }

        let next = habit.statuses.status_of(key).next();
        self.store
            .set_day_status(&user.id, &habit.id, key, next)
            .await?;
        Ok(Some(next))
    }

    /// Reset a habit's entire history
    pub async fn clear_statuses(&self, habit: &HabitId) -> Result<(), Error> {
        let user = self.require_user().await?;
        Ok(self.store.clear_statuses(&user.id, habit).await?)
    }

    /// Sign the current user out
    pub async fn sign_out(&self) {
        self.identity.sign_out().await;
    }
}
