/// SQLite implementation of the habit store interface
///
/// A local stand-in for the managed document backend. Habit documents are
/// rows holding the status map as JSON text; after every write the
/// affected user's list is re-read in full and broadcast to subscribers,
/// preserving the snapshot-replacement contract.

use std::collections::HashMap;
use std::path::PathBuf;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};
use tokio::sync::{watch, Mutex};

use crate::domain::{DateKey, DayStatus, Habit, HabitId, HabitKind, StatusMap, UserId};
use crate::store::{migrations, HabitPatch, HabitStore, StoreError};

/// SQLite-backed store implementation
pub struct SqliteHabitStore {
    conn: Mutex<Connection>,
    watchers: Mutex<HashMap<UserId, watch::Sender<Vec<Habit>>>>,
}

impl SqliteHabitStore {
    /// Open (or create) a store at the given database path
    pub fn new(db_path: PathBuf) -> Result<Self, StoreError> {
        let conn = Connection::open(&db_path)
            .map_err(|e| StoreError::Connection(format!("Failed to open database: {}", e)))?;

        migrations::initialize_database(&conn)?;

        tracing::info!("SQLite habit store initialized at: {:?}", db_path);

        Ok(Self {
            conn: Mutex::new(conn),
            watchers: Mutex::new(HashMap::new()),
        })
    }

    /// Open a store at the platform's data directory
    pub fn open_default() -> Result<Self, StoreError> {
        let mut dir = dirs::data_dir()
            .or_else(dirs::home_dir)
            .ok_or_else(|| StoreError::Connection("No writable data directory".to_string()))?;
        dir.push("habitgrid");
        std::fs::create_dir_all(&dir)
            .map_err(|e| StoreError::Connection(format!("Failed to create {:?}: {}", dir, e)))?;
        dir.push("habits.db");
        Self::new(dir)
    }

    /// Open an in-memory store (useful for tests)
    pub fn in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()
            .map_err(|e| StoreError::Connection(format!("Failed to open database: {}", e)))?;

        migrations::initialize_database(&conn)?;

        Ok(Self {
            conn: Mutex::new(conn),
            watchers: Mutex::new(HashMap::new()),
        })
    }

    /// Helper to convert HabitKind to its stored string form
    fn kind_to_string(kind: HabitKind) -> &'static str {
        match kind {
            HabitKind::Good => "good",
            HabitKind::Bad => "bad",
        }
    }

    /// Helper to convert a stored string back to HabitKind
    fn string_to_kind(s: &str) -> Result<HabitKind, rusqlite::Error> {
        match s {
            "good" => Ok(HabitKind::Good),
            "bad" => Ok(HabitKind::Bad),
            _ => Err(rusqlite::Error::InvalidColumnType(
                0,
                "Invalid habit kind".to_string(),
                rusqlite::types::Type::Text,
            )),
        }
    }

    /// Load a user's full habit list in creation order
    fn load_habits(conn: &Connection, user: &UserId) -> Result<Vec<Habit>, StoreError> {
        let mut stmt = conn.prepare(
            "SELECT id, name, kind, statuses, created_at
             FROM habits WHERE user_id = ?1
             ORDER BY created_at ASC, id ASC",
        )?;

        let rows = stmt.query_map(params![user.to_string()], |row| {
            let id_str: String = row.get(0)?;
            let id = HabitId::from_string(&id_str).map_err(|_| {
                rusqlite::Error::InvalidColumnType(
                    0,
                    "Invalid UUID".to_string(),
                    rusqlite::types::Type::Text,
                )
            })?;

            let kind_str: String = row.get(2)?;
            let kind = Self::string_to_kind(&kind_str)?;

            let statuses_json: String = row.get(3)?;
            let statuses: StatusMap = serde_json::from_str(&statuses_json).map_err(|_| {
                rusqlite::Error::InvalidColumnType(
                    3,
                    "Invalid status map".to_string(),
                    rusqlite::types::Type::Text,
                )
            })?;

            let created_at: DateTime<Utc> = row.get(4)?;

            Ok(Habit::from_existing(id, row.get(1)?, kind, statuses, created_at))
        })?;

        let mut habits = Vec::new();
        for habit in rows {
            habits.push(habit?);
        }
        Ok(habits)
    }

    /// Broadcast the post-write list to the user's subscribers, if any
    async fn publish(&self, user: &UserId) -> Result<(), StoreError> {
        let watchers = self.watchers.lock().await;
        if let Some(tx) = watchers.get(user) {
            let conn = self.conn.lock().await;
            let habits = Self::load_habits(&conn, user)?;
            tx.send_replace(habits);
        }
        Ok(())
    }
}

#[async_trait]
impl HabitStore for SqliteHabitStore {
    async fn subscribe(&self, user: &UserId) -> Result<watch::Receiver<Vec<Habit>>, StoreError> {
        let mut watchers = self.watchers.lock().await;
        if let Some(tx) = watchers.get(user) {
            return Ok(tx.subscribe());
        }

        let habits = {
            let conn = self.conn.lock().await;
            Self::load_habits(&conn, user)?
        };
        let (tx, rx) = watch::channel(habits);
        watchers.insert(user.clone(), tx);
        Ok(rx)
    }

    async fn create(
        &self,
        user: &UserId,
        name: &str,
        kind: HabitKind,
    ) -> Result<HabitId, StoreError> {
        let id = HabitId::new();
        let created_at = Utc::now();
        let statuses_json = serde_json::to_string(&StatusMap::new())?;

        {
            let conn = self.conn.lock().await;
            conn.execute(
                "INSERT INTO habits (id, user_id, name, kind, statuses, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    id.to_string(),
                    user.to_string(),
                    name,
                    Self::kind_to_string(kind),
                    statuses_json,
                    created_at
                ],
            )?;
        }

        tracing::debug!("Created habit: {} ({})", name, id);
        self.publish(user).await?;
        Ok(id)
    }

    async fn update(
        &self,
        user: &UserId,
        habit: &HabitId,
        patch: HabitPatch,
    ) -> Result<(), StoreError> {
        let rows_affected = {
            let conn = self.conn.lock().await;
            conn.execute(
                "UPDATE habits SET
                    name = COALESCE(?3, name),
                    kind = COALESCE(?4, kind)
                 WHERE id = ?1 AND user_id = ?2",
                params![
                    habit.to_string(),
                    user.to_string(),
                    patch.name,
                    patch.kind.map(Self::kind_to_string)
                ],
            )?
        };

        if rows_affected == 0 {
            return Err(StoreError::HabitNotFound {
                habit_id: habit.to_string(),
            });
        }

        tracing::debug!("Updated habit: {}", habit);
        self.publish(user).await
    }

    async fn delete(&self, user: &UserId, habit: &HabitId) -> Result<(), StoreError> {
        let rows_affected = {
            let conn = self.conn.lock().await;
            conn.execute(
                "DELETE FROM habits WHERE id = ?1 AND user_id = ?2",
                params![habit.to_string(), user.to_string()],
            )?
        };

        if rows_affected == 0 {
            return Err(StoreError::HabitNotFound {
                habit_id: habit.to_string(),
            });
        }

        tracing::debug!("Deleted habit: {}", habit);
        self.publish(user).await
    }

    async fn set_day_status(
        &self,
        user: &UserId,
        habit: &HabitId,
        key: &DateKey,
        status: DayStatus,
    ) -> Result<(), StoreError> {
        {
            let conn = self.conn.lock().await;
            let statuses_json: String = conn
                .query_row(
                    "SELECT statuses FROM habits WHERE id = ?1 AND user_id = ?2",
                    params![habit.to_string(), user.to_string()],
                    |row| row.get(0),
                )
                .map_err(|e| match e {
                    rusqlite::Error::QueryReturnedNoRows => StoreError::HabitNotFound {
                        habit_id: habit.to_string(),
                    },
                    other => StoreError::Query(other),
                })?;

            let mut statuses: StatusMap = serde_json::from_str(&statuses_json)?;
            // An Empty write drops the key, keeping the document sparse
            statuses.set(key.clone(), status);

            conn.execute(
                "UPDATE habits SET statuses = ?3 WHERE id = ?1 AND user_id = ?2",
                params![
                    habit.to_string(),
                    user.to_string(),
                    serde_json::to_string(&statuses)?
                ],
            )?;
        }

        tracing::debug!("Set {} = {:?} on habit {}", key, status, habit);
        self.publish(user).await
    }

    async fn clear_statuses(&self, user: &UserId, habit: &HabitId) -> Result<(), StoreError> {
        let rows_affected = {
            let conn = self.conn.lock().await;
            conn.execute(
                "UPDATE habits SET statuses = '{}' WHERE id = ?1 AND user_id = ?2",
                params![habit.to_string(), user.to_string()],
            )?
        };

        if rows_affected == 0 {
            return Err(StoreError::HabitNotFound {
                habit_id: habit.to_string(),
            });
        }

        tracing::debug!("Cleared statuses on habit {}", habit);
        self.publish(user).await
    }
}
