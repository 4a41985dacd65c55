//! Repository
//!
//! Profile and task persistence over the shared connection pool. Skill maps
//! and string lists are stored as JSON text columns; timestamps as RFC 3339
//! strings. No transactional guarantees across calls.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use gigmatch_core::{AppError, AppResult, Profile, SkillLevel, Task, TaskStatus};
use rusqlite::params;
use tracing::debug;

use super::database::DbPool;

/// SQLite-backed store for profiles and tasks
#[derive(Clone)]
pub struct Repository {
    pool: DbPool,
}

/// Raw profile row before JSON/timestamp decoding
struct ProfileRow {
    id: String,
    chat_id: i64,
    name: String,
    skills: String,
    interests: String,
    goals: String,
    soft_skills: String,
    created_at: String,
    updated_at: String,
}

/// Raw task row before JSON/timestamp decoding
struct TaskRow {
    id: String,
    title: String,
    description: String,
    required_skills: String,
    budget: i64,
    deadline: String,
    owner_id: String,
    status: String,
    created_at: String,
}

impl Repository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> AppResult<r2d2::PooledConnection<r2d2_sqlite::SqliteConnectionManager>> {
        self.pool
            .get()
            .map_err(|e| AppError::database(format!("Failed to get connection: {}", e)))
    }

    // ========================================================================
    // Profiles
    // ========================================================================

    /// Insert or replace the profile. A chat has at most one profile; a
    /// re-interview overwrites the previous record for that chat.
    pub fn save_profile(&self, profile: &Profile) -> AppResult<()> {
        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO profiles (id, chat_id, name, skills, interests, goals, soft_skills,
             created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
             ON CONFLICT(chat_id) DO UPDATE SET
                id = excluded.id,
                name = excluded.name,
                skills = excluded.skills,
                interests = excluded.interests,
                goals = excluded.goals,
                soft_skills = excluded.soft_skills,
                updated_at = excluded.updated_at",
            params![
                profile.id,
                profile.chat_id,
                profile.name,
                serde_json::to_string(&profile.skills)?,
                serde_json::to_string(&profile.interests)?,
                serde_json::to_string(&profile.goals)?,
                serde_json::to_string(&profile.soft_skills)?,
                profile.created_at.to_rfc3339(),
                profile.updated_at.to_rfc3339(),
            ],
        )
        .map_err(|e| AppError::database(e.to_string()))?;

        debug!(profile_id = %profile.id, chat_id = profile.chat_id, "profile saved");
        Ok(())
    }

    pub fn get_profile(&self, id: &str) -> AppResult<Option<Profile>> {
        self.query_profile("SELECT id, chat_id, name, skills, interests, goals, soft_skills,
             created_at, updated_at FROM profiles WHERE id = ?1", params![id])
    }

    /// Look a profile up by its owning chat
    pub fn get_profile_by_chat(&self, chat_id: i64) -> AppResult<Option<Profile>> {
        self.query_profile("SELECT id, chat_id, name, skills, interests, goals, soft_skills,
             created_at, updated_at FROM profiles WHERE chat_id = ?1", params![chat_id])
    }

    fn query_profile(
        &self,
        sql: &str,
        params: impl rusqlite::Params,
    ) -> AppResult<Option<Profile>> {
        let conn = self.conn()?;
        let result = conn.query_row(sql, params, |row| {
            Ok(ProfileRow {
                id: row.get(0)?,
                chat_id: row.get(1)?,
                name: row.get(2)?,
                skills: row.get(3)?,
                interests: row.get(4)?,
                goals: row.get(5)?,
                soft_skills: row.get(6)?,
                created_at: row.get(7)?,
                updated_at: row.get(8)?,
            })
        });

        match result {
            Ok(raw) => Ok(Some(profile_from_row(raw)?)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(AppError::database(e.to_string())),
        }
    }

    // ========================================================================
    // Tasks
    // ========================================================================

    pub fn save_task(&self, task: &Task) -> AppResult<()> {
        let conn = self.conn()?;
        conn.execute(
            "INSERT OR REPLACE INTO tasks (id, title, description, required_skills, budget,
             deadline, owner_id, status, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                task.id,
                task.title,
                task.description,
                serde_json::to_string(&task.required_skills)?,
                task.budget as i64,
                task.deadline.to_rfc3339(),
                task.owner_id,
                task.status.as_str(),
                task.created_at.to_rfc3339(),
            ],
        )
        .map_err(|e| AppError::database(e.to_string()))?;

        debug!(task_id = %task.id, "task saved");
        Ok(())
    }

    pub fn get_task(&self, id: &str) -> AppResult<Option<Task>> {
        let conn = self.conn()?;
        let result = conn.query_row(
            "SELECT id, title, description, required_skills, budget, deadline, owner_id,
             status, created_at FROM tasks WHERE id = ?1",
            params![id],
            map_task_row,
        );

        match result {
            Ok(raw) => Ok(Some(task_from_row(raw)?)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(AppError::database(e.to_string())),
        }
    }

    /// Open tasks ordered by creation time, then id, so ranking ties are
    /// deterministic across runs.
    pub fn list_open_tasks(&self) -> AppResult<Vec<Task>> {
        let conn = self.conn()?;
        let mut stmt = conn
            .prepare(
                "SELECT id, title, description, required_skills, budget, deadline, owner_id,
                 status, created_at FROM tasks WHERE status = 'open'
                 ORDER BY created_at ASC, id ASC",
            )
            .map_err(|e| AppError::database(e.to_string()))?;

        let rows = stmt
            .query_map([], map_task_row)
            .map_err(|e| AppError::database(e.to_string()))?;

        let mut tasks = Vec::new();
        for row in rows {
            let raw = row.map_err(|e| AppError::database(e.to_string()))?;
            tasks.push(task_from_row(raw)?);
        }
        Ok(tasks)
    }

    /// Insert a handful of demo tasks when the task table is empty.
    /// Returns the number of tasks inserted.
    pub fn seed_demo_tasks(&self) -> AppResult<usize> {
        let conn = self.conn()?;
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM tasks", [], |row| row.get(0))
            .map_err(|e| AppError::database(e.to_string()))?;
        if count > 0 {
            return Ok(0);
        }
        drop(conn);

        let now = Utc::now();
        let demos = [
            Task {
                id: "demo-react-landing".to_string(),
                title: "Build a simple React landing page".to_string(),
                description: "A landing page for a startup with a modern design".to_string(),
                required_skills: HashMap::from([
                    ("React".to_string(), 2),
                    ("JavaScript".to_string(), 3),
                    ("CSS".to_string(), 2),
                ]),
                budget: 30000,
                deadline: now + Duration::days(14),
                owner_id: "demo-client-1".to_string(),
                status: TaskStatus::Open,
                created_at: now,
            },
            Task {
                id: "demo-python-scraper".to_string(),
                title: "Data scraper in Python".to_string(),
                description: "A script collecting data from websites into a database".to_string(),
                required_skills: HashMap::from([
                    ("Python".to_string(), 3),
                    ("SQL".to_string(), 2),
                ]),
                budget: 25000,
                deadline: now + Duration::days(7),
                owner_id: "demo-client-2".to_string(),
                status: TaskStatus::Open,
                created_at: now,
            },
            Task {
                id: "demo-flutter-notes".to_string(),
                title: "Mobile notes app in Flutter".to_string(),
                description: "A simple notes application with synchronization".to_string(),
                required_skills: HashMap::from([
                    ("Flutter".to_string(), 3),
                    ("Dart".to_string(), 3),
                ]),
                budget: 80000,
                deadline: now + Duration::days(30),
                owner_id: "demo-client-3".to_string(),
                status: TaskStatus::Open,
                created_at: now,
            },
        ];

        for task in &demos {
            self.save_task(task)?;
        }
        Ok(demos.len())
    }
}

fn map_task_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<TaskRow> {
    Ok(TaskRow {
        id: row.get(0)?,
        title: row.get(1)?,
        description: row.get(2)?,
        required_skills: row.get(3)?,
        budget: row.get(4)?,
        deadline: row.get(5)?,
        owner_id: row.get(6)?,
        status: row.get(7)?,
        created_at: row.get(8)?,
    })
}

fn profile_from_row(raw: ProfileRow) -> AppResult<Profile> {
    let skills: HashMap<String, SkillLevel> = serde_json::from_str(&raw.skills)?;
    Ok(Profile {
        id: raw.id,
        chat_id: raw.chat_id,
        name: raw.name,
        skills,
        interests: serde_json::from_str(&raw.interests)?,
        goals: serde_json::from_str(&raw.goals)?,
        soft_skills: serde_json::from_str(&raw.soft_skills)?,
        created_at: parse_timestamp(&raw.created_at)?,
        updated_at: parse_timestamp(&raw.updated_at)?,
    })
}

fn task_from_row(raw: TaskRow) -> AppResult<Task> {
    let status = TaskStatus::parse(&raw.status)
        .ok_or_else(|| AppError::database(format!("unknown task status: {}", raw.status)))?;
    Ok(Task {
        id: raw.id,
        title: raw.title,
        description: raw.description,
        required_skills: serde_json::from_str(&raw.required_skills)?,
        budget: raw.budget.max(0) as u64,
        deadline: parse_timestamp(&raw.deadline)?,
        owner_id: raw.owner_id,
        status,
        created_at: parse_timestamp(&raw.created_at)?,
    })
}

fn parse_timestamp(s: &str) -> AppResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| AppError::database(format!("invalid timestamp '{}': {}", s, e)))
}
