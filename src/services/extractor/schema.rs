//! Extraction Response Schemas
//!
//! Closed record types for every extractor response, mapped defensively from
//! the raw JSON: a missing or wrongly shaped field is dropped, never fatal.
//! Only a non-object top level is treated as an extraction failure upstream.

use std::collections::HashMap;

use gigmatch_core::models::{
    ExperienceLevel, ProfileHints, TaskComplexity, TaskHints, MAX_SKILL_LEVEL, MIN_SKILL_LEVEL,
};
use serde_json::Value;

/// A skill as reported by the extractor
#[derive(Debug, Clone, PartialEq)]
pub struct SkillRating {
    /// Reported level, already clamped into [1, 5]
    pub level: u8,
    pub confidence: Option<f64>,
}

/// Structured profile record extracted from a full transcript
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileExtraction {
    pub name: Option<String>,
    /// Skill name -> rating; only skills with a parseable numeric level appear
    pub skills: HashMap<String, SkillRating>,
    pub soft_skills: Vec<String>,
    pub interests: Vec<String>,
    pub goals: Vec<String>,
}

impl ProfileExtraction {
    /// Map a raw extractor response. Returns None when the top level is not
    /// a JSON object.
    pub fn from_value(value: &Value) -> Option<Self> {
        let object = value.as_object()?;

        let mut skills = HashMap::new();
        if let Some(raw_skills) = object.get("skills").and_then(Value::as_object) {
            for (name, entry) in raw_skills {
                if let Some(level) = parse_level(entry) {
                    let confidence = entry.get("confidence").and_then(Value::as_f64);
                    skills.insert(name.clone(), SkillRating { level, confidence });
                }
            }
        }

        Some(Self {
            name: string_field(object, "name"),
            skills,
            soft_skills: string_list(object.get("soft_skills")),
            interests: string_list(object.get("interests")),
            goals: string_list(object.get("goals")),
        })
    }
}

/// Structured task record extracted from a full transcript
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskExtraction {
    pub title: Option<String>,
    pub description: Option<String>,
    /// Skill name -> minimum level, clamped into [1, 5]
    pub required_skills: HashMap<String, u8>,
    pub budget: Option<u64>,
    pub deadline_days: Option<i64>,
}

impl TaskExtraction {
    /// Map a raw extractor response. Returns None when the top level is not
    /// a JSON object.
    pub fn from_value(value: &Value) -> Option<Self> {
        let object = value.as_object()?;

        let mut required_skills = HashMap::new();
        if let Some(raw_skills) = object.get("required_skills").and_then(Value::as_object) {
            for (name, entry) in raw_skills {
                if let Some(level) = parse_level(entry) {
                    required_skills.insert(name.clone(), level);
                }
            }
        }

        let budget = object
            .get("budget")
            .and_then(Value::as_f64)
            .filter(|b| *b >= 0.0)
            .map(|b| b as u64);

        let deadline_days = object
            .get("deadline_days")
            .and_then(Value::as_i64)
            .filter(|d| *d > 0);

        Some(Self {
            title: string_field(object, "title"),
            description: string_field(object, "description"),
            required_skills,
            budget,
            deadline_days,
        })
    }
}

/// Map a per-answer analysis response into profile hints.
/// Unrecognized experience levels are dropped.
pub fn parse_profile_hints(value: &Value) -> Option<ProfileHints> {
    let object = value.as_object()?;
    Some(ProfileHints {
        mentioned_skills: string_list(object.get("mentioned_skills")),
        experience_level: object
            .get("experience_level")
            .and_then(Value::as_str)
            .and_then(ExperienceLevel::parse),
        interests: string_list(object.get("interests")),
        key_info: string_field(object, "key_info"),
    })
}

/// Map a per-answer analysis response into task hints
pub fn parse_task_hints(value: &Value) -> Option<TaskHints> {
    let object = value.as_object()?;
    Some(TaskHints {
        mentioned_technologies: string_list(object.get("mentioned_technologies")),
        task_complexity: object
            .get("task_complexity")
            .and_then(Value::as_str)
            .and_then(TaskComplexity::parse),
        project_type: string_field(object, "project_type"),
        key_info: string_field(object, "key_info"),
    })
}

/// A skill level given either as a bare number or as {"level": n, ...}
fn parse_level(entry: &Value) -> Option<u8> {
    let raw = match entry {
        Value::Number(n) => n.as_f64(),
        Value::Object(map) => map.get("level").and_then(Value::as_f64),
        _ => None,
    }?;
    let rounded = raw.round();
    if !rounded.is_finite() {
        return None;
    }
    Some((rounded.max(MIN_SKILL_LEVEL as f64).min(MAX_SKILL_LEVEL as f64)) as u8)
}

fn string_field(object: &serde_json::Map<String, Value>, key: &str) -> Option<String> {
    object
        .get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Collect string entries from a JSON array, skipping non-string elements
fn string_list(value: Option<&Value>) -> Vec<String> {
    value
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}
