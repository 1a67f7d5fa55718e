//! SQLite-based day storage.
//!
//! Provides persistent storage for:
//! - Tasks, keyed by the date they were planned for
//! - Daily check-ins (energy and hard stop)
//! - Barriers and evening reflections

use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;

use super::data_dir;
use super::migrations;
use super::records::{Barrier, CheckIn, Reflection};
use crate::error::{DatabaseError, Result};
use crate::task::{NewTask, Task};

const DATE_FORMAT: &str = "%Y-%m-%d";

fn date_key(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

fn parse_date(value: String) -> Result<NaiveDate, DatabaseError> {
    NaiveDate::parse_from_str(&value, DATE_FORMAT).map_err(|_| DatabaseError::CorruptValue {
        column: "date",
        value,
    })
}

fn parse_timestamp(column: &'static str, value: String) -> Result<DateTime<Utc>, DatabaseError> {
    DateTime::parse_from_rfc3339(&value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| DatabaseError::CorruptValue { column, value })
}

fn parse_column<T: std::str::FromStr>(
    column: &'static str,
    value: String,
) -> Result<T, DatabaseError> {
    value
        .parse()
        .map_err(|_| DatabaseError::CorruptValue { column, value })
}

/// SQLite database for day plans.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open the database at `<data_dir>/dayweather.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> Result<Self> {
        let path = data_dir()?.join("dayweather.db");
        Self::open_at(&path)
    }

    /// Open the database at an explicit path.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open_at(path: &Path) -> Result<Self> {
        let conn = Connection::open(path).map_err(|source| DatabaseError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        Self::init(conn)
    }

    /// Open an in-memory database (for tests).
    ///
    /// # Errors
    /// Returns an error if the schema cannot be created.
    pub fn open_memory() -> Result<Self> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self> {
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        migrations::migrate(&conn)
            .map_err(|e| DatabaseError::MigrationFailed(e.to_string()))?;
        Ok(Self { conn })
    }

    // === Tasks ===

    /// Insert a task at the end of the given day's list.
    ///
    /// # Errors
    /// Returns an error if the insert fails.
    pub fn create_task(&self, date: NaiveDate, task: NewTask) -> Result<Task> {
        let id = uuid::Uuid::new_v4().to_string();
        let now = Utc::now().to_rfc3339();
        let date = date_key(date);
        let position: i64 = self.conn.query_row(
            "SELECT COALESCE(MAX(position) + 1, 0) FROM tasks WHERE date = ?1",
            params![date],
            |row| row.get(0),
        )?;

        self.conn.execute(
            "INSERT INTO tasks (id, date, description, completed, complexity, task_type,
                                position, created_at, updated_at)
             VALUES (?1, ?2, ?3, 0, ?4, ?5, ?6, ?7, ?7)",
            params![
                id,
                date,
                task.description(),
                task.complexity().as_str(),
                task.task_type().as_str(),
                position,
                now,
            ],
        )?;
        tracing::info!(%id, %date, kind = %task.task_type(), "created task");
        Ok(task.with_id(id))
    }

    /// All tasks planned for a date, in insertion order.
    ///
    /// # Errors
    /// Returns an error if the query fails or a stored value is corrupt.
    pub fn tasks_for(&self, date: NaiveDate) -> Result<Vec<Task>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, description, completed, complexity, task_type
             FROM tasks WHERE date = ?1
             ORDER BY position, created_at",
        )?;
        let rows = stmt.query_map(params![date_key(date)], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, bool>(2)?,
                row.get::<_, String>(3)?,
                row.get::<_, String>(4)?,
            ))
        })?;

        let mut tasks = Vec::new();
        for row in rows {
            let (id, description, completed, complexity, task_type) = row?;
            tasks.push(Task {
                id,
                description,
                completed,
                complexity: parse_column("complexity", complexity)?,
                task_type: parse_column("task_type", task_type)?,
            });
        }
        Ok(tasks)
    }

    /// Look up a single task.
    ///
    /// # Errors
    /// Returns [`DatabaseError::NotFound`] for an unknown id.
    pub fn task(&self, id: &str) -> Result<Task> {
        let row = self
            .conn
            .query_row(
                "SELECT id, description, completed, complexity, task_type
                 FROM tasks WHERE id = ?1",
                params![id],
                |row| {
                    Ok((
                        row.get::<_, String>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, bool>(2)?,
                        row.get::<_, String>(3)?,
                        row.get::<_, String>(4)?,
                    ))
                },
            )
            .optional()?;
        let (id, description, completed, complexity, task_type) =
            row.ok_or_else(|| not_found("task", id))?;
        Ok(Task {
            id,
            description,
            completed,
            complexity: parse_column("complexity", complexity)?,
            task_type: parse_column("task_type", task_type)?,
        })
    }

    /// Mark a task done or not done.
    ///
    /// # Errors
    /// Returns [`DatabaseError::NotFound`] for an unknown id.
    pub fn set_task_completed(&self, id: &str, completed: bool) -> Result<()> {
        let changed = self.conn.execute(
            "UPDATE tasks SET completed = ?2, updated_at = ?3 WHERE id = ?1",
            params![id, completed, Utc::now().to_rfc3339()],
        )?;
        if changed == 0 {
            return Err(not_found("task", id).into());
        }
        tracing::info!(%id, completed, "updated task");
        Ok(())
    }

    /// Flip a task's completed flag, returning the new value.
    ///
    /// # Errors
    /// Returns [`DatabaseError::NotFound`] for an unknown id.
    pub fn toggle_task(&self, id: &str) -> Result<bool> {
        let completed = !self.task(id)?.completed;
        self.set_task_completed(id, completed)?;
        Ok(completed)
    }

    /// Delete a task.
    ///
    /// # Errors
    /// Returns [`DatabaseError::NotFound`] for an unknown id.
    pub fn delete_task(&self, id: &str) -> Result<()> {
        let changed = self
            .conn
            .execute("DELETE FROM tasks WHERE id = ?1", params![id])?;
        if changed == 0 {
            return Err(not_found("task", id).into());
        }
        tracing::info!(%id, "deleted task");
        Ok(())
    }

    // === Check-ins ===

    /// The check-in for a date, if one was made.
    ///
    /// # Errors
    /// Returns an error if the query fails or a stored value is corrupt.
    pub fn checkin_for(&self, date: NaiveDate) -> Result<Option<CheckIn>> {
        let row = self
            .conn
            .query_row(
                "SELECT energy, hard_stop, updated_at FROM checkins WHERE date = ?1",
                params![date_key(date)],
                |row| {
                    Ok((
                        row.get::<_, Option<String>>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, String>(2)?,
                    ))
                },
            )
            .optional()?;

        let Some((energy, hard_stop, updated_at)) = row else {
            return Ok(None);
        };
        Ok(Some(CheckIn {
            date,
            energy: energy.map(|e| parse_column("energy", e)).transpose()?,
            hard_stop: parse_column("hard_stop", hard_stop)?,
            updated_at: parse_timestamp("updated_at", updated_at)?,
        }))
    }

    /// Insert or replace the check-in for its date.
    ///
    /// # Errors
    /// Returns an error if the write fails.
    pub fn upsert_checkin(&self, checkin: &CheckIn) -> Result<()> {
        self.conn.execute(
            "INSERT INTO checkins (date, energy, hard_stop, updated_at)
             VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(date) DO UPDATE SET
                energy = excluded.energy,
                hard_stop = excluded.hard_stop,
                updated_at = excluded.updated_at",
            params![
                date_key(checkin.date),
                checkin.energy.map(|e| e.as_str()),
                checkin.hard_stop.to_string(),
                checkin.updated_at.to_rfc3339(),
            ],
        )?;
        tracing::info!(date = %checkin.date, energy = ?checkin.energy, hard_stop = %checkin.hard_stop, "saved check-in");
        Ok(())
    }

    // === Barriers ===

    /// Record a barrier.
    ///
    /// # Errors
    /// Returns an error if the write fails or `task_id` names no task.
    pub fn add_barrier(&self, barrier: &Barrier) -> Result<()> {
        if let Some(task_id) = &barrier.task_id {
            self.task(task_id)?;
        }
        self.conn.execute(
            "INSERT INTO barriers (id, date, task_id, description, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                barrier.id,
                date_key(barrier.date),
                barrier.task_id,
                barrier.description,
                barrier.created_at.to_rfc3339(),
            ],
        )?;
        tracing::info!(id = %barrier.id, date = %barrier.date, "recorded barrier");
        Ok(())
    }

    /// Barriers recorded for a date, oldest first.
    ///
    /// # Errors
    /// Returns an error if the query fails or a stored value is corrupt.
    pub fn barriers_for(&self, date: NaiveDate) -> Result<Vec<Barrier>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, date, task_id, description, created_at
             FROM barriers WHERE date = ?1 ORDER BY created_at",
        )?;
        let rows = stmt.query_map(params![date_key(date)], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, Option<String>>(2)?,
                row.get::<_, String>(3)?,
                row.get::<_, String>(4)?,
            ))
        })?;

        let mut barriers = Vec::new();
        for row in rows {
            let (id, date, task_id, description, created_at) = row?;
            barriers.push(Barrier {
                id,
                date: parse_date(date)?,
                task_id,
                description,
                created_at: parse_timestamp("created_at", created_at)?,
            });
        }
        Ok(barriers)
    }

    // === Reflections ===

    /// Insert or replace the reflection for its date.
    ///
    /// # Errors
    /// Returns an error if the write fails.
    pub fn upsert_reflection(&self, reflection: &Reflection) -> Result<()> {
        self.conn.execute(
            "INSERT INTO reflections (date, went_well, was_hard, energy_rating, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)
             ON CONFLICT(date) DO UPDATE SET
                went_well = excluded.went_well,
                was_hard = excluded.was_hard,
                energy_rating = excluded.energy_rating,
                created_at = excluded.created_at",
            params![
                date_key(reflection.date),
                reflection.went_well,
                reflection.was_hard,
                reflection.energy_rating,
                reflection.created_at.to_rfc3339(),
            ],
        )?;
        tracing::info!(date = %reflection.date, "saved reflection");
        Ok(())
    }

    /// The reflection for a date, if any.
    ///
    /// # Errors
    /// Returns an error if the query fails or a stored value is corrupt.
    pub fn reflection_for(&self, date: NaiveDate) -> Result<Option<Reflection>> {
        let row = self
            .conn
            .query_row(
                "SELECT went_well, was_hard, energy_rating, created_at
                 FROM reflections WHERE date = ?1",
                params![date_key(date)],
                |row| {
                    Ok((
                        row.get::<_, String>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, Option<u8>>(2)?,
                        row.get::<_, String>(3)?,
                    ))
                },
            )
            .optional()?;

        let Some((went_well, was_hard, energy_rating, created_at)) = row else {
            return Ok(None);
        };
        Ok(Some(Reflection {
            date,
            went_well,
            was_hard,
            energy_rating,
            created_at: parse_timestamp("created_at", created_at)?,
        }))
    }
}

fn not_found(entity: &'static str, id: &str) -> DatabaseError {
    DatabaseError::NotFound {
        entity,
        id: id.to_string(),
    }
}
