//! Gigmatch Core
//!
//! Shared domain types for the Gigmatch bot: profiles, tasks, interview
//! sessions, match results, and the application error type.

pub mod error;
pub mod models;

pub use error::{AppError, AppResult};
pub use models::{
    ExperienceLevel, InterviewKind, InterviewSession, MatchResult, Profile, ProfileHints,
    SessionContext, SkillLevel, SkillSource, Task, TaskComplexity, TaskHints, TaskStatus,
};
