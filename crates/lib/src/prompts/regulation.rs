//! # Regulation Prompt
//!
//! The ethics-guideline prompt: a fixed preamble, one line per user profile,
//! one entry per questionnaire response, and a fixed closing instruction block.

use crate::{
    questionnaire::normalize_question,
    types::{SurveyResponse, User},
};
use std::fmt::Write;

pub const REGULATION_PREAMBLE: &str = r#"As an expert AI ethics consultant, create comprehensive ethical guidelines
for autonomous vehicle development based on the following user perspectives.

Analyze the collected insights considering:
- Ethical decision-making frameworks
- Human life prioritization
- Transparency in AI decision processes
- Balancing individual and collective safety

User Perspectives Compilation:"#;

pub const REGULATION_CLOSING: &str = r#"

Deliverable Guidelines Requirements:
1. Provide clear, actionable recommendations
2. Address potential moral and ethical conflicts
3. Ensure transparency in autonomous vehicle decision-making
4. Consider diverse perspectives and edge cases
5. Create a robust ethical framework for AI developers

Format your response using markdown, with clear sections and bullet points."#;

/// Shown in place of a category for questions that match no keyword.
pub const UNCATEGORIZED: &str = "Uncategorized";

/// Assembles the full regulation prompt from every user and response.
pub fn build_regulation_prompt(users: &[User], responses: &[SurveyResponse]) -> String {
    let mut prompt = String::from(REGULATION_PREAMBLE);

    for user in users {
        // Writing to a String cannot fail.
        let _ = write!(
            prompt,
            "\n- User Profile: {} y/o {}, Autonomous Vehicle Knowledge: {}",
            user.age, user.gender, user.knows_autonomous
        );
    }

    for response in responses {
        let category = normalize_question(&response.question).unwrap_or(UNCATEGORIZED);
        let _ = write!(
            prompt,
            "\n- Critical Question: {category}\n  User Response: {}",
            response.answer
        );
    }

    prompt.push_str(REGULATION_CLOSING);
    prompt
}
