//! Match Scoring
//!
//! Pure scoring and ranking functions over a profile and a snapshot of
//! tasks. No shared state; callers supply a deterministically ordered task
//! slice (the storage layer orders by creation time, then id) so that equal
//! scores keep a stable order.

use chrono::Utc;
use gigmatch_core::{MatchResult, Profile, Task};

/// Weight of the skill component in the combined score
const SKILL_WEIGHT: f64 = 0.8;
/// Weight of the interest component in the combined score
const INTEREST_WEIGHT: f64 = 0.2;
/// Minimum combined score for a task to be recommended at all
const SCORE_THRESHOLD: f64 = 0.3;
/// Score granted when one side declares nothing to compare against
const NEUTRAL_SCORE: f64 = 0.5;

/// Rank all open tasks against a profile, keeping scores above the
/// recommendation threshold, best first.
pub fn find_matching_tasks(profile: &Profile, tasks: &[Task]) -> Vec<MatchResult> {
    let mut matches: Vec<MatchResult> = tasks
        .iter()
        .filter(|task| task.is_open())
        .filter_map(|task| {
            let score = calculate_match_score(profile, task);
            if score > SCORE_THRESHOLD {
                Some(MatchResult {
                    task_id: task.id.clone(),
                    profile_id: profile.id.clone(),
                    score,
                    reasons: match_reasons(profile, task, score),
                    created_at: Utc::now(),
                })
            } else {
                None
            }
        })
        .collect();

    // Stable sort keeps the caller's task order for equal scores
    matches.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
    matches
}

/// The ranked list truncated to the first `n` entries
pub fn recommend_top_tasks(profile: &Profile, tasks: &[Task], n: usize) -> Vec<MatchResult> {
    let mut matches = find_matching_tasks(profile, tasks);
    matches.truncate(n);
    matches
}

/// Combined score in [0, 1]: skills weighted 80%, interests 20%
pub fn calculate_match_score(profile: &Profile, task: &Task) -> f64 {
    let skill = skill_score(profile, task);
    let interest = interest_score(profile, task);
    (skill * SKILL_WEIGHT + interest * INTEREST_WEIGHT).min(1.0)
}

/// Skill component.
///
/// Per required skill the profile has: `1.0 + 0.1 * excess` above the bar,
/// `0.7 * have/need` below it; an absent skill contributes zero. The sum is
/// averaged over the count of required skills and then multiplied by
/// coverage, so missing skills are penalized twice on purpose.
fn skill_score(profile: &Profile, task: &Task) -> f64 {
    if task.required_skills.is_empty() {
        return NEUTRAL_SCORE;
    }

    let mut total = 0.0;
    let mut matched = 0usize;

    for (name, min_level) in &task.required_skills {
        if let Some(skill) = profile.skills.get(name) {
            let have = skill.level as f64;
            let need = *min_level as f64;
            if skill.level >= *min_level {
                total += 1.0 + (have - need) * 0.1;
            } else {
                total += have / need * 0.7;
            }
            matched += 1;
        }
    }

    if matched == 0 {
        return 0.0;
    }

    let average = total / task.required_skills.len() as f64;
    let coverage = matched as f64 / task.required_skills.len() as f64;
    average * coverage
}

/// Interest component: the fraction of the profile's interests appearing as
/// a case-insensitive substring of the task's title and description.
fn interest_score(profile: &Profile, task: &Task) -> f64 {
    if profile.interests.is_empty() {
        return NEUTRAL_SCORE;
    }

    let task_text = format!("{} {}", task.title, task.description).to_lowercase();
    let matched = profile
        .interests
        .iter()
        .filter(|interest| task_text.contains(&interest.to_lowercase()))
        .count();

    matched as f64 / profile.interests.len() as f64
}

/// Human-readable explanation lines: a qualitative banner at the top when
/// the score clears a threshold, one line per required skill, one line per
/// matched interest. Skill lines are ordered by name for stable output.
fn match_reasons(profile: &Profile, task: &Task, score: f64) -> Vec<String> {
    let mut reasons = Vec::new();

    if score > 0.8 {
        reasons.push("🎯 Excellent match!".to_string());
    } else if score > 0.6 {
        reasons.push("👍 Good match".to_string());
    } else if score > 0.4 {
        reasons.push("🤔 Partial match".to_string());
    }

    let mut required: Vec<_> = task.required_skills.iter().collect();
    required.sort_by(|a, b| a.0.cmp(b.0));

    for (name, min_level) in required {
        match profile.skills.get(name) {
            Some(skill) if skill.level >= *min_level => {
                reasons.push(format!("✅ {}: your level {}/{}", name, skill.level, min_level));
            }
            Some(skill) => {
                reasons.push(format!(
                    "⚠️ {}: your level {}/{} (below required)",
                    name, skill.level, min_level
                ));
            }
            None => {
                reasons.push(format!("❌ {}: skill missing", name));
            }
        }
    }

    let task_text = format!("{} {}", task.title, task.description).to_lowercase();
    for interest in &profile.interests {
        if task_text.contains(&interest.to_lowercase()) {
            reasons.push(format!("💡 Matches your interest: {}", interest));
        }
    }

    reasons
}
