//! Core Data Model
//!
//! Domain types shared across the interview, matching, storage, and bot
//! layers. Skill levels are always kept inside [1, 5]; tasks are only
//! matchable while their status is `Open`.

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lowest meaningful skill level
pub const MIN_SKILL_LEVEL: u8 = 1;
/// Highest meaningful skill level
pub const MAX_SKILL_LEVEL: u8 = 5;

/// Where a recorded skill level came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkillSource {
    /// Self-reported during a profile interview
    Interview,
    /// Inferred from completed task work
    Task,
}

/// A single skill with its assessed level
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillLevel {
    pub name: String,
    /// Level in [1, 5]
    pub level: u8,
    pub verified: bool,
    pub source: SkillSource,
}

impl SkillLevel {
    /// Create an unverified skill as reported in an interview.
    /// The level is clamped into the valid range.
    pub fn from_interview(name: impl Into<String>, level: u8) -> Self {
        Self {
            name: name.into(),
            level: level.clamp(MIN_SKILL_LEVEL, MAX_SKILL_LEVEL),
            verified: false,
            source: SkillSource::Interview,
        }
    }
}

/// A user's structured profile, produced by a finalized profile interview
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    /// Server-assigned identity
    pub id: String,
    /// Owning chat identity
    pub chat_id: i64,
    pub name: String,
    /// Skill name -> assessed level; keys are unique by construction
    pub skills: HashMap<String, SkillLevel>,
    pub interests: Vec<String>,
    /// Ordered professional goals
    pub goals: Vec<String>,
    pub soft_skills: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Profile {
    /// Create an empty profile shell with server-assigned identity
    pub fn new(id: impl Into<String>, chat_id: i64) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            chat_id,
            name: String::new(),
            skills: HashMap::new(),
            interests: Vec::new(),
            goals: Vec::new(),
            soft_skills: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// Lifecycle status of a task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    Open,
    Assigned,
    Completed,
}

impl TaskStatus {
    /// Get the string form for database storage
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Assigned => "assigned",
            Self::Completed => "completed",
        }
    }

    /// Parse from the stored string form
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "open" => Some(Self::Open),
            "assigned" => Some(Self::Assigned),
            "completed" => Some(Self::Completed),
            _ => None,
        }
    }
}

/// A posted task with its requirements, produced by a finalized task interview
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    /// Server-assigned identity
    pub id: String,
    pub title: String,
    pub description: String,
    /// Skill name -> minimum required level in [1, 5]
    pub required_skills: HashMap<String, u8>,
    /// Budget in whole currency units
    pub budget: u64,
    pub deadline: DateTime<Utc>,
    /// Identity of the user who posted the task
    pub owner_id: String,
    pub status: TaskStatus,
    pub created_at: DateTime<Utc>,
}

impl Task {
    pub fn is_open(&self) -> bool {
        self.status == TaskStatus::Open
    }
}

/// The target output type of an interview
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InterviewKind {
    Profile,
    Task,
}

impl InterviewKind {
    /// Get the string form for logs and storage
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Profile => "profile",
            Self::Task => "task",
        }
    }

    /// Parse a kind string from the transport layer
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "profile" => Some(Self::Profile),
            "task" => Some(Self::Task),
            _ => None,
        }
    }
}

impl std::fmt::Display for InterviewKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rough experience bracket inferred from a profile answer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExperienceLevel {
    Junior,
    Middle,
    Senior,
}

impl ExperienceLevel {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "junior" => Some(Self::Junior),
            "middle" => Some(Self::Middle),
            "senior" => Some(Self::Senior),
            _ => None,
        }
    }
}

/// Rough complexity bracket inferred from a task answer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskComplexity {
    Simple,
    Medium,
    Complex,
}

impl TaskComplexity {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "simple" => Some(Self::Simple),
            "medium" => Some(Self::Medium),
            "complex" => Some(Self::Complex),
            _ => None,
        }
    }
}

/// Hints accumulated from per-answer analysis during a profile interview.
///
/// All fields are optional; extraction failures simply leave them untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileHints {
    #[serde(default)]
    pub mentioned_skills: Vec<String>,
    #[serde(default)]
    pub experience_level: Option<ExperienceLevel>,
    #[serde(default)]
    pub interests: Vec<String>,
    #[serde(default)]
    pub key_info: Option<String>,
}

impl ProfileHints {
    /// Merge newer hints over these, field by field. A present or non-empty
    /// incoming field replaces the stored one; absent fields keep the
    /// previous value.
    pub fn merge(&mut self, incoming: ProfileHints) {
        if !incoming.mentioned_skills.is_empty() {
            self.mentioned_skills = incoming.mentioned_skills;
        }
        if incoming.experience_level.is_some() {
            self.experience_level = incoming.experience_level;
        }
        if !incoming.interests.is_empty() {
            self.interests = incoming.interests;
        }
        if incoming.key_info.is_some() {
            self.key_info = incoming.key_info;
        }
    }
}

/// Hints accumulated from per-answer analysis during a task interview
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskHints {
    #[serde(default)]
    pub mentioned_technologies: Vec<String>,
    #[serde(default)]
    pub task_complexity: Option<TaskComplexity>,
    #[serde(default)]
    pub project_type: Option<String>,
    #[serde(default)]
    pub key_info: Option<String>,
}

impl TaskHints {
    /// Merge newer hints over these, field by field
    pub fn merge(&mut self, incoming: TaskHints) {
        if !incoming.mentioned_technologies.is_empty() {
            self.mentioned_technologies = incoming.mentioned_technologies;
        }
        if incoming.task_complexity.is_some() {
            self.task_complexity = incoming.task_complexity;
        }
        if incoming.project_type.is_some() {
            self.project_type = incoming.project_type;
        }
        if incoming.key_info.is_some() {
            self.key_info = incoming.key_info;
        }
    }
}

/// Typed per-kind context carried by an interview session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum SessionContext {
    Profile(ProfileHints),
    Task(TaskHints),
}

impl SessionContext {
    /// Empty context for the given interview kind
    pub fn empty(kind: InterviewKind) -> Self {
        match kind {
            InterviewKind::Profile => Self::Profile(ProfileHints::default()),
            InterviewKind::Task => Self::Task(TaskHints::default()),
        }
    }

    /// Profile hints, if this is a profile context
    pub fn profile_hints(&self) -> Option<&ProfileHints> {
        match self {
            Self::Profile(hints) => Some(hints),
            Self::Task(_) => None,
        }
    }

    /// Task hints, if this is a task context
    pub fn task_hints(&self) -> Option<&TaskHints> {
        match self {
            Self::Task(hints) => Some(hints),
            Self::Profile(_) => None,
        }
    }

    /// Merge newer hints of the same kind into this context.
    /// A mismatched kind is ignored.
    pub fn merge(&mut self, incoming: SessionContext) {
        match (self, incoming) {
            (Self::Profile(current), Self::Profile(new)) => current.merge(new),
            (Self::Task(current), Self::Task(new)) => current.merge(new),
            _ => {}
        }
    }
}

/// A live interview session for one user.
///
/// `current_step` only ever increases; `answers` is append-only, keyed by the
/// step each answer was given at.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterviewSession {
    pub chat_id: i64,
    pub kind: InterviewKind,
    pub current_step: usize,
    pub answers: BTreeMap<usize, String>,
    pub context: SessionContext,
    pub started_at: DateTime<Utc>,
}

impl InterviewSession {
    pub fn new(chat_id: i64, kind: InterviewKind) -> Self {
        Self {
            chat_id,
            kind,
            current_step: 0,
            answers: BTreeMap::new(),
            context: SessionContext::empty(kind),
            started_at: Utc::now(),
        }
    }

    /// Record the answer for the current step
    pub fn record_answer(&mut self, text: impl Into<String>) {
        self.answers.insert(self.current_step, text.into());
    }
}

/// A scored recommendation of one task for one profile.
///
/// Derived on every query, never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchResult {
    pub task_id: String,
    pub profile_id: String,
    /// Combined score in [0, 1]
    pub score: f64,
    /// Human-readable explanation lines, most significant first
    pub reasons: Vec<String>,
    pub created_at: DateTime<Utc>,
}
