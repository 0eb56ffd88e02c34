//! # Ethical Questionnaire
//!
//! The fixed set of questions shown on the Questionnaire page, and the mapping
//! from stored question labels to the coarse categories used in prompts.

use serde::Serialize;

/// How a question is answered on the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "options", rename_all = "snake_case")]
pub enum InputKind {
    Select(&'static [&'static str]),
    Radio(&'static [&'static str]),
    TextArea,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Question {
    /// The key responses are stored under, `Q1` through `Q6`.
    pub label: &'static str,
    pub text: &'static str,
    pub input: InputKind,
}

impl Question {
    /// Whether `answer` is acceptable for this question.
    ///
    /// Choice questions require one of their options; text areas accept anything.
    pub fn accepts(&self, answer: &str) -> bool {
        match self.input {
            InputKind::Select(options) | InputKind::Radio(options) => options.contains(&answer),
            InputKind::TextArea => true,
        }
    }
}

pub const QUESTIONS: [Question; 6] = [
    Question {
        label: "Q1",
        text: "Should autonomous vehicles prioritize saving passengers over pedestrians, or should every life be treated equally?",
        input: InputKind::Select(&[
            "Prioritize Passengers",
            "Treat Every Life Equally",
            "Prioritize Pedestrians",
        ]),
    },
    Question {
        label: "Q2",
        text: "In a situation where only one life can be saved, should age (e.g., child vs. elderly) influence the decision?",
        input: InputKind::Select(&["Yes, prioritize the younger", "No, every life is equal", "Not Sure"]),
    },
    Question {
        label: "Q3",
        text: "How should autonomous vehicles handle situations involving animals on the road? Should they prioritize human safety over animal lives?",
        input: InputKind::TextArea,
    },
    Question {
        label: "Q4",
        text: "Would you feel comfortable knowing an autonomous vehicle might sacrifice your safety to save a larger group of people?",
        input: InputKind::Radio(&["Yes", "No", "Maybe"]),
    },
    Question {
        label: "Q5",
        text: "What ethical principles should guide the decisions of autonomous vehicles during accidents?",
        input: InputKind::TextArea,
    },
    Question {
        label: "Q6",
        text: "Should autonomous vehicles be programmed to follow traffic rules strictly, even if it means a higher risk of accidents?",
        input: InputKind::Radio(&["Yes", "No", "Depends on the situation"]),
    },
];

pub fn find_question(label: &str) -> Option<&'static Question> {
    QUESTIONS.iter().find(|q| q.label == label)
}

/// Keyword to category, tried in order. The first match wins.
const CATEGORIES: [(&str, &str); 4] = [
    (
        "prioritize",
        "Should autonomous vehicles prioritize saving passengers over pedestrians?",
    ),
    ("age", "How should age influence life-saving decisions?"),
    ("animals", "Handling situations involving animals on the road"),
    ("sacrifice", "Comfort with potential self-sacrifice for group safety"),
];

/// Maps a stored question to its human-readable category.
///
/// Known labels are first resolved to their question text. Matching is a
/// case-insensitive substring test; questions matching no keyword have no category.
pub fn normalize_question(question: &str) -> Option<&'static str> {
    let text = find_question(question).map_or(question, |q| q.text);
    let text = text.to_lowercase();
    CATEGORIES
        .iter()
        .find(|(keyword, _)| text.contains(keyword))
        .map(|(_, category)| *category)
}
