//! Interview Integration Tests
//!
//! Drives the interviewer end-to-end against a scripted mock provider:
//! state transitions, empty-answer validation, context adaptation,
//! finalization round-trips, and failure recovery.

use gigmatch_bot::services::interview::AnswerOutcome;
use gigmatch_core::{AppError, InterviewKind};

use super::support::{
    interviewer_with_failing_extractor, interviewer_with_script, mock_error,
};

const CHAT: i64 = 100;

fn empty_hints() -> Result<String, gigmatch_llm::LlmError> {
    Ok("{}".to_string())
}

fn profile_extraction_json() -> String {
    r#"{
        "name": "Alice",
        "skills": {
            "Python": {"level": 4, "confidence": 0.9},
            "SQL": {"level": 2},
            "Excel": {"level": "lots"},
            "Go": {"level": 9}
        },
        "soft_skills": ["communication"],
        "interests": ["web development", "data"],
        "goals": ["go freelance"]
    }"#
    .to_string()
}

fn task_extraction_json() -> String {
    r#"{
        "title": "Data scraper",
        "description": "Collect listings into a database",
        "required_skills": {"Python": 3, "SQL": 2},
        "budget": 25000,
        "deadline_days": 10
    }"#
    .to_string()
}

#[tokio::test]
async fn test_start_interview_provides_first_question() {
    let interviewer = interviewer_with_script(vec![]);

    interviewer
        .start_interview(CHAT, InterviewKind::Profile)
        .await
        .unwrap();
    assert!(interviewer.is_in_interview(CHAT).await);
    assert_eq!(
        interviewer.interview_kind(CHAT).await,
        Some(InterviewKind::Profile)
    );

    let question = interviewer.current_question(CHAT).await.unwrap();
    assert_eq!(question.step, 0);
    assert_eq!(question.total, 7);
    assert!(question.text.contains("What is your name?"));
}

#[tokio::test]
async fn test_operations_without_session_fail_with_no_session() {
    let interviewer = interviewer_with_script(vec![]);

    assert!(matches!(
        interviewer.current_question(CHAT).await,
        Err(AppError::NoSession)
    ));
    assert!(matches!(
        interviewer.process_answer(CHAT, "hello").await,
        Err(AppError::NoSession)
    ));
    assert!(matches!(
        interviewer.extract_profile(CHAT).await,
        Err(AppError::NoSession)
    ));
}

#[tokio::test]
async fn test_start_by_name_validates_the_kind() {
    let interviewer = interviewer_with_script(vec![]);

    let err = interviewer
        .start_interview_by_name(CHAT, "resume")
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidKind(kind) if kind == "resume"));
    assert!(!interviewer.is_in_interview(CHAT).await);

    interviewer
        .start_interview_by_name(CHAT, "task")
        .await
        .unwrap();
    assert_eq!(
        interviewer.interview_kind(CHAT).await,
        Some(InterviewKind::Task)
    );
}

#[tokio::test]
async fn test_double_start_is_rejected_and_keeps_the_first_session() {
    let interviewer = interviewer_with_script(vec![]);
    interviewer
        .start_interview(CHAT, InterviewKind::Profile)
        .await
        .unwrap();

    let err = interviewer
        .start_interview(CHAT, InterviewKind::Task)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::AlreadyActive(InterviewKind::Profile)));

    assert_eq!(
        interviewer.interview_kind(CHAT).await,
        Some(InterviewKind::Profile)
    );
}

#[tokio::test]
async fn test_empty_answer_does_not_advance_the_step() {
    let interviewer = interviewer_with_script(vec![]);
    interviewer
        .start_interview(CHAT, InterviewKind::Profile)
        .await
        .unwrap();

    for blank in ["", "   ", "\n\t "] {
        let outcome = interviewer.process_answer(CHAT, blank).await.unwrap();
        assert_eq!(outcome, AnswerOutcome::Reprompt);
    }

    let question = interviewer.current_question(CHAT).await.unwrap();
    assert_eq!(question.step, 0);
}

#[tokio::test]
async fn test_steps_advance_monotonically_to_finished() {
    let interviewer = interviewer_with_script(vec![empty_hints(); 7]);
    interviewer
        .start_interview(CHAT, InterviewKind::Profile)
        .await
        .unwrap();

    for expected_step in 1..7 {
        let outcome = interviewer
            .process_answer(CHAT, &format!("answer {}", expected_step))
            .await
            .unwrap();
        match outcome {
            AnswerOutcome::Next(question) => {
                assert_eq!(question.step, expected_step);
                assert_eq!(question.total, 7);
            }
            other => panic!("expected next question, got {:?}", other),
        }
    }

    let outcome = interviewer.process_answer(CHAT, "final answer").await.unwrap();
    assert_eq!(outcome, AnswerOutcome::Finished);
    // The session stays alive for finalization
    assert!(interviewer.is_in_interview(CHAT).await);

    // Further answers only repeat the finish signal without recording
    let outcome = interviewer.process_answer(CHAT, "extra").await.unwrap();
    assert_eq!(outcome, AnswerOutcome::Finished);
}

#[tokio::test]
async fn test_hint_analysis_failure_never_fails_the_step() {
    let interviewer = interviewer_with_failing_extractor();
    interviewer
        .start_interview(CHAT, InterviewKind::Profile)
        .await
        .unwrap();

    let outcome = interviewer.process_answer(CHAT, "My name is Bob").await.unwrap();
    assert!(matches!(outcome, AnswerOutcome::Next(_)));

    let question = interviewer.current_question(CHAT).await.unwrap();
    assert_eq!(question.step, 1);
}

#[tokio::test]
async fn test_context_hints_adapt_the_next_question() {
    let hints = r#"{
        "mentioned_skills": ["Python", "Django"],
        "experience_level": "senior"
    }"#;
    let interviewer = interviewer_with_script(vec![Ok(hints.to_string())]);
    interviewer
        .start_interview(CHAT, InterviewKind::Profile)
        .await
        .unwrap();

    let outcome = interviewer
        .process_answer(CHAT, "I mostly write Python with Django")
        .await
        .unwrap();

    match outcome {
        AnswerOutcome::Next(question) => {
            assert!(question.text.contains("You mentioned Python, Django"));
        }
        other => panic!("expected adapted question, got {:?}", other),
    }
}

#[tokio::test]
async fn test_profile_round_trip() {
    let mut script = vec![empty_hints(); 7];
    script.push(Ok(profile_extraction_json()));
    let interviewer = interviewer_with_script(script);

    interviewer
        .start_interview(CHAT, InterviewKind::Profile)
        .await
        .unwrap();
    for i in 0..7 {
        interviewer
            .process_answer(CHAT, &format!("answer {}", i))
            .await
            .unwrap();
    }

    let profile = interviewer.extract_profile(CHAT).await.unwrap();

    assert_eq!(profile.name, "Alice");
    assert_eq!(profile.chat_id, CHAT);
    assert!(!profile.id.is_empty());
    // Exactly the skills with a parseable numeric level, all inside [1, 5]
    let mut names: Vec<&str> = profile.skills.keys().map(String::as_str).collect();
    names.sort_unstable();
    assert_eq!(names, vec!["Go", "Python", "SQL"]);
    assert!(profile.skills.values().all(|s| (1..=5).contains(&s.level)));
    assert_eq!(profile.skills["Go"].level, 5);
    assert_eq!(profile.interests, vec!["web development", "data"]);
    assert_eq!(profile.soft_skills, vec!["communication"]);

    // Successful finalization deletes the session
    assert!(!interviewer.is_in_interview(CHAT).await);
}

#[tokio::test]
async fn test_task_round_trip() {
    let mut script = vec![empty_hints(); 6];
    script.push(Ok(task_extraction_json()));
    let interviewer = interviewer_with_script(script);

    interviewer
        .start_interview(CHAT, InterviewKind::Task)
        .await
        .unwrap();
    for i in 0..6 {
        interviewer
            .process_answer(CHAT, &format!("answer {}", i))
            .await
            .unwrap();
    }

    let task = interviewer.extract_task(CHAT).await.unwrap();

    assert_eq!(task.title, "Data scraper");
    assert_eq!(task.required_skills["Python"], 3);
    assert_eq!(task.budget, 25000);
    assert_eq!(task.owner_id, CHAT.to_string());
    assert!(task.is_open());
    assert_eq!((task.deadline - task.created_at).num_days(), 10);
    assert!(!interviewer.is_in_interview(CHAT).await);
}

#[tokio::test]
async fn test_wrong_kind_finalize_is_rejected_and_keeps_the_session() {
    let interviewer = interviewer_with_script(vec![]);
    interviewer
        .start_interview(CHAT, InterviewKind::Task)
        .await
        .unwrap();

    let err = interviewer.extract_profile(CHAT).await.unwrap_err();
    assert!(matches!(
        err,
        AppError::WrongKind {
            expected: InterviewKind::Profile,
            actual: InterviewKind::Task,
        }
    ));
    assert!(interviewer.is_in_interview(CHAT).await);
}

#[tokio::test]
async fn test_failed_finalization_keeps_the_session_for_retry() {
    let mut script = vec![empty_hints(); 7];
    script.push(Err(mock_error()));
    script.push(Ok(profile_extraction_json()));
    let interviewer = interviewer_with_script(script);

    interviewer
        .start_interview(CHAT, InterviewKind::Profile)
        .await
        .unwrap();
    for i in 0..7 {
        interviewer
            .process_answer(CHAT, &format!("answer {}", i))
            .await
            .unwrap();
    }

    let err = interviewer.extract_profile(CHAT).await.unwrap_err();
    assert!(matches!(err, AppError::Extraction(_)));
    assert!(interviewer.is_in_interview(CHAT).await);

    // The transcript survives, so a retry succeeds
    let profile = interviewer.extract_profile(CHAT).await.unwrap();
    assert_eq!(profile.name, "Alice");
    assert!(!interviewer.is_in_interview(CHAT).await);
}

#[tokio::test]
async fn test_cancel_is_unconditional_and_idempotent() {
    let interviewer = interviewer_with_script(vec![]);
    interviewer
        .start_interview(CHAT, InterviewKind::Profile)
        .await
        .unwrap();
    assert!(interviewer.is_in_interview(CHAT).await);

    interviewer.cancel_interview(CHAT).await;
    assert!(!interviewer.is_in_interview(CHAT).await);

    // A second cancel has no observable effect
    interviewer.cancel_interview(CHAT).await;
    assert!(!interviewer.is_in_interview(CHAT).await);
    assert_eq!(interviewer.interview_kind(CHAT).await, None);
}

#[tokio::test]
async fn test_sessions_are_isolated_per_user() {
    let interviewer = interviewer_with_script(vec![empty_hints(); 4]);

    interviewer
        .start_interview(1, InterviewKind::Profile)
        .await
        .unwrap();
    interviewer
        .start_interview(2, InterviewKind::Task)
        .await
        .unwrap();

    interviewer.process_answer(1, "Alice").await.unwrap();

    assert_eq!(
        interviewer.current_question(1).await.unwrap().step,
        1
    );
    assert_eq!(
        interviewer.current_question(2).await.unwrap().step,
        0
    );

    interviewer.cancel_interview(1).await;
    assert!(!interviewer.is_in_interview(1).await);
    assert!(interviewer.is_in_interview(2).await);
}
