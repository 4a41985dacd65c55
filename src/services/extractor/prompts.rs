//! Extraction Prompts
//!
//! Prompt builders for the two shapes of extractor call: per-answer hint
//! analysis and full-transcript record extraction. Each prompt pins the
//! expected JSON key set so responses can be mapped field by field.

/// System prompt shared by the per-answer analysis calls
pub const ANALYST_SYSTEM: &str =
    "You are an expert analyst for a freelance marketplace. \
     Respond with a single JSON object and nothing else.";

/// System prompt shared by the full-record extraction calls
pub const EXTRACTION_SYSTEM: &str =
    "You are an expert in HR and project analysis for a freelance marketplace. \
     Respond with a single JSON object matching the requested schema and nothing else.";

/// Prompt for analyzing one profile-interview answer for context hints
pub fn analyze_profile_answer(answer: &str) -> String {
    format!(
        r#"Analyze this answer from a profile interview and pull out the key information.

Answer: "{answer}"

Determine:
1. The main skills or technologies mentioned
2. The experience level (junior/middle/senior)
3. Interests and preferences
4. Anything else important for the profile

Return JSON:
{{
  "mentioned_skills": ["skill1", "skill2"],
  "experience_level": "junior|middle|senior",
  "interests": ["interest1"],
  "key_info": "short summary"
}}"#
    )
}

/// Prompt for analyzing one task-interview answer for context hints
pub fn analyze_task_answer(answer: &str) -> String {
    format!(
        r#"Analyze this answer from a task-creation interview and pull out the key information.

Answer: "{answer}"

Determine:
1. The technologies or requirements mentioned
2. The task complexity (simple/medium/complex)
3. The project type
4. Anything else important for the task

Return JSON:
{{
  "mentioned_technologies": ["tech1", "tech2"],
  "task_complexity": "simple|medium|complex",
  "project_type": "web|mobile|data|design|other",
  "key_info": "short summary"
}}"#
    )
}

/// Prompt for extracting a structured profile from a full interview transcript
pub fn extract_profile(transcript: &str) -> String {
    format!(
        r#"Analyze this profile interview and extract structured information.

Interview transcript:
{transcript}

Extract:
1. The user's name
2. Technical skills with a level (1-5)
3. Soft skills
4. Interests and hobbies
5. Professional goals

Return JSON:
{{
  "name": "Name",
  "skills": {{
    "Python": {{"level": 3, "confidence": 0.8}},
    "JavaScript": {{"level": 2, "confidence": 0.6}}
  }},
  "soft_skills": ["communication", "teamwork"],
  "interests": ["machine learning", "web development"],
  "goals": ["become a senior developer"]
}}"#
    )
}

/// Prompt for extracting a structured task from a full interview transcript
pub fn extract_task(transcript: &str) -> String {
    format!(
        r#"Analyze this task-creation interview and extract the requirements.

Interview transcript:
{transcript}

Extract:
1. The task title
2. A detailed description
3. Required skills with a minimum level (1-5)
4. The budget
5. The deadline in days

Return JSON:
{{
  "title": "Task title",
  "description": "Detailed description of what needs to be done",
  "required_skills": {{
    "Python": 3,
    "React": 2
  }},
  "budget": 50000,
  "deadline_days": 14
}}"#
    )
}
