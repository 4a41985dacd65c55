//! Question Bank
//!
//! Fixed ordered question sequences per interview kind, with context-aware
//! variants for a few recognized (kind, step) pairs. Pure lookup: the same
//! (kind, step, context) always renders the same text.

use gigmatch_core::{ExperienceLevel, InterviewKind, SessionContext, TaskComplexity};

/// A single question template
#[derive(Debug, Clone, Copy)]
pub struct QuestionTemplate {
    pub text: &'static str,
    pub required: bool,
}

const PROFILE_QUESTIONS: &[QuestionTemplate] = &[
    QuestionTemplate {
        text: "Hi! Let's get acquainted. What is your name?",
        required: true,
    },
    QuestionTemplate {
        text: "Tell me about your experience in IT. Which technologies do you work with? \
               (for example: Python, JavaScript, React)",
        required: true,
    },
    QuestionTemplate {
        text: "Rate your overall programming level from 1 to 5, where:\n\
               1 - beginner\n2 - basic knowledge\n3 - confident user\n4 - advanced\n5 - expert",
        required: true,
    },
    QuestionTemplate {
        text: "What kind of work interests you? What projects would you like to build? \
               (web development, mobile apps, data, design, and so on)",
        required: true,
    },
    QuestionTemplate {
        text: "Tell me about your strengths at work. What are you especially good at?",
        required: false,
    },
    QuestionTemplate {
        text: "Which professional goals would you like to reach in the near future?",
        required: false,
    },
    QuestionTemplate {
        text: "Do you have experience with remote work or freelancing? If so, tell me briefly.",
        required: false,
    },
];

const TASK_QUESTIONS: &[QuestionTemplate] = &[
    QuestionTemplate {
        text: "What is your task called? Come up with a short, clear title.",
        required: true,
    },
    QuestionTemplate {
        text: "Describe in detail what needs to be done. What result do you expect?",
        required: true,
    },
    QuestionTemplate {
        text: "Which technical skills does the contractor need? List technologies and the \
               desired level (for example: Python - 3/5, React - 2/5)",
        required: true,
    },
    QuestionTemplate {
        text: "What budget are you ready to allocate for this task?",
        required: true,
    },
    QuestionTemplate {
        text: "When does the task need to be done? Give a number of days or a concrete date.",
        required: true,
    },
    QuestionTemplate {
        text: "Are there any special requirements for the contractor? \
               (experience, portfolio, communication, and so on)",
        required: false,
    },
];

/// Static ordered question sequences per interview kind
#[derive(Debug, Clone, Copy, Default)]
pub struct QuestionBank;

impl QuestionBank {
    pub fn new() -> Self {
        Self
    }

    /// Render the question for (kind, step), adapted by accumulated context.
    /// Returns None when the step is past the end of the sequence.
    pub fn question(
        &self,
        kind: InterviewKind,
        step: usize,
        context: &SessionContext,
    ) -> Option<String> {
        let template = self.templates(kind).get(step)?;
        Some(
            self.adapt(kind, step, context)
                .unwrap_or_else(|| template.text.to_string()),
        )
    }

    /// Fixed length of the question sequence for a kind
    pub fn max_steps(&self, kind: InterviewKind) -> usize {
        self.templates(kind).len()
    }

    fn templates(&self, kind: InterviewKind) -> &'static [QuestionTemplate] {
        match kind {
            InterviewKind::Profile => PROFILE_QUESTIONS,
            InterviewKind::Task => TASK_QUESTIONS,
        }
    }

    /// Context-aware variant for recognized (kind, step) pairs
    fn adapt(&self, kind: InterviewKind, step: usize, context: &SessionContext) -> Option<String> {
        match kind {
            InterviewKind::Profile => {
                let hints = context.profile_hints()?;
                match step {
                    1 if !hints.mentioned_skills.is_empty() => Some(format!(
                        "You mentioned {}. Tell me more about your experience with these \
                         technologies and rate your level in each (1-5).",
                        hints.mentioned_skills.join(", ")
                    )),
                    3 => match hints.experience_level? {
                        ExperienceLevel::Junior => Some(
                            "As someone starting out, which projects attract you most for \
                             gaining experience?"
                                .to_string(),
                        ),
                        ExperienceLevel::Senior => Some(
                            "With your experience, which complex and interesting problems are \
                             you ready to take on?"
                                .to_string(),
                        ),
                        ExperienceLevel::Middle => None,
                    },
                    _ => None,
                }
            }
            InterviewKind::Task => {
                let hints = context.task_hints()?;
                match step {
                    2 => match hints.task_complexity? {
                        TaskComplexity::Simple => Some(
                            "For a simple task, list the basic skills the contractor needs \
                             (for example: HTML/CSS - 2/5, basic JavaScript - 1/5)"
                                .to_string(),
                        ),
                        TaskComplexity::Complex => Some(
                            "For a complex task, describe the skill and experience requirements \
                             in detail (for example: React - 4/5, Node.js - 3/5, API experience)"
                                .to_string(),
                        ),
                        TaskComplexity::Medium => None,
                    },
                    3 if !hints.mentioned_technologies.is_empty() => Some(format!(
                        "Given that {} will be used, what budget fits this task?",
                        hints.mentioned_technologies.join(", ")
                    )),
                    _ => None,
                }
            }
        }
    }
}
