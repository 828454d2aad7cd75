// Prompt templates for the career features.
// Reuses cross-cutting fragments from ai_gateway::prompts.

use crate::ai_gateway::prompts::{AUDIENCE, JSON_ONLY_INSTRUCTION};

pub const MENTOR_PERSONA: &str = "You are an expert academic and career mentor for B.Tech students.";
pub const MENTOR_CONCISE: &str = "Keep answers concise.";
pub const MENTOR_ELI5: &str = "Explain things very simply.";

/// Roadmap template. Replace `{year}`, `{track}`, `{days}`, `{goal}` before sending.
const ROADMAP_PROMPT_TEMPLATE: &str = r#"You are an expert career architect from roadmap.sh.
Generate a high-quality, professional study roadmap for a {year} {audience}.

PARTICULARS:
- Track: {track}
- Timeline: {days} days
- Primary Goal/Mission: {goal}

REQUIRED OUTPUT FORMAT (STRICT JSON ONLY):
{
    "summary": "A 2-3 sentence strategic overview of the mission path (HTML formatted with <strong> or <em>).",
    "weeks": [
        {
            "title": "Clear, punchy week title (e.g., Foundations & Core Patterns)",
            "focus": "Brief description of the specific knowledge areas covered this week.",
            "topics": ["Start Topic 1", "Topic 2", "Topic 3"],
            "project": "One concrete mini-project or milestone task to build this week.",
            "status": "pending"
        }
    ]
}

GUIDELINES:
- Content must be technical, practical, and aligned with industry standards (like roadmap.sh).
- Break down the {days} days into appropriate weekly chunks.
- Focus heavily on the student's primary goal: {goal}.
- "topics" should be short, tag-like concepts (e.g., "Hooks", "Redux", "JWT").
- {json_only}"#;

/// Resume analysis template. Replace `{resume_text}` before sending.
const RESUME_ANALYSIS_PROMPT_TEMPLATE: &str = r#"Analyze this resume for a {audience} targeting tech roles.
Focus on matching standards for companies like Google, Amazon, Microsoft, and Meta.

{json_only} Use the following structure:
{
    "score": 0-100 (integer),
    "improved_summary": "A 3-4 line professional summary highlighting strengths",
    "feedback": "HTML formatted list of improvements (use <ul> and <li>)",
    "jobs_html": "HTML formatted suggested job roles and target sectors"
}

Resume Content:
{resume_text}"#;

/// Legacy feedback template. Replace `{resume_text}` before sending.
const RESUME_FEEDBACK_PROMPT_TEMPLATE: &str = r#"Analyze this resume for a {audience} targeting tech roles.
Return JSON with score (0-100), feedback (HTML), and jobs array.
Resume: {resume_text}"#;

pub fn roadmap_prompt(year: &str, track: &str, days: u32, goal: &str) -> String {
    ROADMAP_PROMPT_TEMPLATE
        .replace("{audience}", AUDIENCE)
        .replace("{json_only}", JSON_ONLY_INSTRUCTION)
        .replace("{year}", year)
        .replace("{track}", track)
        .replace("{days}", &days.to_string())
        .replace("{goal}", goal)
}

pub fn resume_analysis_prompt(resume_text: &str) -> String {
    RESUME_ANALYSIS_PROMPT_TEMPLATE
        .replace("{audience}", AUDIENCE)
        .replace("{json_only}", JSON_ONLY_INSTRUCTION)
        .replace("{resume_text}", resume_text)
}

pub fn resume_feedback_prompt(resume_text: &str) -> String {
    RESUME_FEEDBACK_PROMPT_TEMPLATE
        .replace("{audience}", AUDIENCE)
        .replace("{resume_text}", resume_text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roadmap_prompt_fills_every_placeholder() {
        let prompt = roadmap_prompt("3rd Year", "Web Development", 45, "Crack SDE internships");
        assert!(prompt.contains("3rd Year B.Tech student"));
        assert!(prompt.contains("Timeline: 45 days"));
        assert!(prompt.contains("primary goal: Crack SDE internships"));
        for placeholder in ["{year}", "{track}", "{days}", "{goal}", "{audience}", "{json_only}"] {
            assert!(!prompt.contains(placeholder), "unfilled {placeholder}");
        }
    }

    #[test]
    fn test_resume_prompts_embed_text() {
        let analysis = resume_analysis_prompt("Built a compiler in Rust");
        assert!(analysis.ends_with("Built a compiler in Rust"));
        assert!(analysis.contains("\"jobs_html\""));

        let feedback = resume_feedback_prompt("Intern at Acme");
        assert!(feedback.ends_with("Resume: Intern at Acme"));
    }
}
