//! Embedded fallback prompts
//!
//! These are compiled into the binary and used when no override template is found.

/// Asks for a day count suited to the skill's complexity
pub const RECOMMEND_DAYS: &str = r#"Based on the complexity of the skill "{{skill}}", recommend a number of days for an intensive, beginner-friendly learning plan. The goal is to get a solid foundational understanding. The number should be reasonable for a structured introduction, typically between {{min_days}} and {{max_days}} days."#;

/// Asks for the full day-by-day plan
pub const GENERATE_PLAN: &str = r#"You are an expert curriculum designer. A user wants to learn a new skill.

Skill: {{skill}}
Current Level: {{level}}

Generate a concise, practical {{days}}-day learning plan to help them get started.
The plan must be appropriate for their stated level. For a beginner, start with the absolute fundamentals. For intermediate, build on existing knowledge.
For each of the {{days}} days, provide:
1. Daily Goal: A clear objective for the day.
2. Key Concepts: An array of 2-3 core topics to learn.
3. Actionable Task: A small, concrete exercise to practice the skill.

Return the plan as a JSON array of {{days}} objects, strictly following the provided schema. The day property for each object should be numbered sequentially from 1 to {{days}}.
"#;

/// Get embedded prompt by name
pub fn get_embedded(name: &str) -> Option<&'static str> {
    match name {
        "recommend-days" => Some(RECOMMEND_DAYS),
        "generate-plan" => Some(GENERATE_PLAN),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_embedded_recommend() {
        let prompt = get_embedded("recommend-days").unwrap();
        assert!(prompt.contains("{{skill}}"));
        assert!(prompt.contains("{{max_days}}"));
    }

    #[test]
    fn test_get_embedded_plan() {
        let prompt = get_embedded("generate-plan").unwrap();
        assert!(prompt.contains("curriculum designer"));
        assert!(prompt.contains("{{level}}"));
    }

    #[test]
    fn test_get_embedded_unknown() {
        assert!(get_embedded("nonexistent").is_none());
    }
}
