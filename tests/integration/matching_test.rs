//! Matching Integration Tests
//!
//! Ranking behavior over realistic task sets, including the storage-fed
//! flow: persisted profile + seeded open tasks -> deterministic
//! recommendations.

use chrono::{Duration, Utc};
use gigmatch_bot::services::matching::{calculate_match_score, recommend_top_tasks};
use gigmatch_bot::storage::{Database, Repository};
use gigmatch_core::{Profile, SkillLevel, Task, TaskStatus};

fn profile_with(skills: &[(&str, u8)], interests: &[&str]) -> Profile {
    let mut profile = Profile::new("profile-1", 42);
    profile.name = "Alice".to_string();
    for (name, level) in skills {
        profile
            .skills
            .insert(name.to_string(), SkillLevel::from_interview(*name, *level));
    }
    profile.interests = interests.iter().map(|s| s.to_string()).collect();
    profile
}

fn open_task(id: &str, required: &[(&str, u8)]) -> Task {
    Task {
        id: id.to_string(),
        title: format!("Task {}", id),
        description: String::new(),
        required_skills: required
            .iter()
            .map(|(name, level)| (name.to_string(), *level))
            .collect(),
        budget: 10000,
        deadline: Utc::now() + Duration::days(14),
        owner_id: "client".to_string(),
        status: TaskStatus::Open,
        created_at: Utc::now(),
    }
}

fn test_repository() -> Repository {
    let db = Database::open_in_memory().unwrap();
    db.init_schema().unwrap();
    Repository::new(db.pool().clone())
}

#[test]
fn test_top_one_returns_only_the_best_task() {
    // Scores land at 0.9 (at the bar), 0.3 exactly (excluded by the strict
    // threshold), and 0.98 (above the bar).
    let profile = profile_with(&[("Python", 4), ("React", 4)], &[]);

    let at_the_bar = open_task("python-task", &[("Python", 4)]);
    let excluded = open_task("partial-task", &[("Python", 4), ("Go", 4)]);
    let best = open_task("react-task", &[("React", 3)]);

    let tasks = vec![at_the_bar.clone(), excluded.clone(), best.clone()];

    assert!((calculate_match_score(&profile, &at_the_bar) - 0.9).abs() < 1e-9);
    assert!((calculate_match_score(&profile, &excluded) - 0.3).abs() < 1e-9);
    assert!((calculate_match_score(&profile, &best) - 0.98).abs() < 1e-9);

    let top = recommend_top_tasks(&profile, &tasks, 1);
    assert_eq!(top.len(), 1);
    assert_eq!(top[0].task_id, "react-task");

    let all = recommend_top_tasks(&profile, &tasks, 10);
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].task_id, "react-task");
    assert_eq!(all[1].task_id, "python-task");
}

#[test]
fn test_storage_fed_recommendations_rank_the_obvious_match_first() {
    let repo = test_repository();
    assert_eq!(repo.seed_demo_tasks().unwrap(), 3);

    let profile = profile_with(
        &[("React", 4), ("JavaScript", 4), ("CSS", 3)],
        &["landing page"],
    );
    repo.save_profile(&profile).unwrap();

    let stored = repo.get_profile_by_chat(42).unwrap().unwrap();
    let tasks = repo.list_open_tasks().unwrap();
    let ranked = recommend_top_tasks(&stored, &tasks, 5);

    assert!(!ranked.is_empty());
    assert_eq!(ranked[0].task_id, "demo-react-landing");
    assert_eq!(ranked[0].profile_id, stored.id);
    assert!(ranked[0].score > 0.8);
    assert!(ranked[0]
        .reasons
        .iter()
        .any(|r| r.contains("Matches your interest: landing page")));
}

#[test]
fn test_recommendations_are_deterministic_across_runs() {
    let repo = test_repository();
    repo.seed_demo_tasks().unwrap();
    let profile = profile_with(&[("Python", 3), ("SQL", 2), ("React", 2)], &[]);

    let tasks = repo.list_open_tasks().unwrap();
    let first = recommend_top_tasks(&profile, &tasks, 5);
    for _ in 0..5 {
        let again = recommend_top_tasks(&profile, &repo.list_open_tasks().unwrap(), 5);
        let first_ids: Vec<_> = first.iter().map(|m| &m.task_id).collect();
        let again_ids: Vec<_> = again.iter().map(|m| &m.task_id).collect();
        assert_eq!(first_ids, again_ids);
        for (a, b) in first.iter().zip(again.iter()) {
            assert_eq!(a.score, b.score);
        }
    }
}

#[test]
fn test_equal_scores_follow_storage_order() {
    let repo = test_repository();
    let base = Utc::now();

    // Identical requirements and timestamps: list order falls back to id
    for id in ["b-twin", "a-twin"] {
        let mut task = open_task(id, &[("Python", 3)]);
        task.created_at = base;
        repo.save_task(&task).unwrap();
    }

    let profile = profile_with(&[("Python", 3)], &[]);
    let tasks = repo.list_open_tasks().unwrap();
    let ranked = recommend_top_tasks(&profile, &tasks, 5);

    assert_eq!(ranked.len(), 2);
    assert_eq!(ranked[0].task_id, "a-twin");
    assert_eq!(ranked[1].task_id, "b-twin");
}

#[test]
fn test_no_overlap_profile_gets_no_recommendations() {
    let repo = test_repository();
    repo.seed_demo_tasks().unwrap();

    // Skills and interests that match nothing seeded
    let profile = profile_with(&[("COBOL", 5)], &["mainframes"]);
    let tasks = repo.list_open_tasks().unwrap();

    assert!(recommend_top_tasks(&profile, &tasks, 5).is_empty());
}

#[test]
fn test_assigned_tasks_never_surface() {
    let repo = test_repository();
    let mut task = open_task("taken", &[("Python", 1)]);
    task.status = TaskStatus::Assigned;
    repo.save_task(&task).unwrap();

    let profile = profile_with(&[("Python", 5)], &[]);
    let tasks = repo.list_open_tasks().unwrap();
    assert!(tasks.is_empty());
    assert!(recommend_top_tasks(&profile, &tasks, 5).is_empty());

    // Even when handed directly, a non-open task is filtered out
    let direct = Task {
        status: TaskStatus::Completed,
        ..open_task("done", &[("Python", 1)])
    };
    assert!(recommend_top_tasks(&profile, &[direct], 5).is_empty());
}
