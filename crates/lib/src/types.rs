//! # Core Data Types
//!
//! The entities of the survey and forum. All of them are append-only: rows are
//! inserted and read, never updated or deleted.

use crate::errors::EthicsError;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// The oldest age accepted on the User Details form.
pub const MAX_AGE: i64 = 120;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub const ALL: [Gender; 3] = [Gender::Male, Gender::Female, Gender::Other];

    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::Other => "Other",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = EthicsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Gender::ALL
            .into_iter()
            .find(|g| g.as_str() == s)
            .ok_or_else(|| EthicsError::validation(format!("Unknown gender '{s}'.")))
    }
}

/// Whether the user already knows about autonomous vehicles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KnowsAutonomous {
    Yes,
    No,
}

impl KnowsAutonomous {
    pub const ALL: [KnowsAutonomous; 2] = [KnowsAutonomous::Yes, KnowsAutonomous::No];

    pub fn as_str(&self) -> &'static str {
        match self {
            KnowsAutonomous::Yes => "Yes",
            KnowsAutonomous::No => "No",
        }
    }
}

impl fmt::Display for KnowsAutonomous {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for KnowsAutonomous {
    type Err = EthicsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        KnowsAutonomous::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| EthicsError::validation(format!("Unknown knowledge flag '{s}'.")))
    }
}

/// The fields submitted on the User Details page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewUser {
    pub name: String,
    pub age: i64,
    pub gender: Gender,
    pub knows_autonomous: KnowsAutonomous,
}

impl NewUser {
    /// Checks the form constraints and returns the user with its name trimmed.
    pub fn validated(self) -> Result<Self, EthicsError> {
        let name = self.name.trim().to_string();
        if name.is_empty() {
            return Err(EthicsError::validation("Name cannot be empty."));
        }
        if !(0..=MAX_AGE).contains(&self.age) {
            return Err(EthicsError::validation(format!(
                "Age must be between 0 and {MAX_AGE}."
            )));
        }
        Ok(Self { name, ..self })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub age: i64,
    pub gender: Gender,
    pub knows_autonomous: KnowsAutonomous,
    pub created_at: String,
}

/// One questionnaire answer, keyed by its question label (e.g. `Q1`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurveyResponse {
    pub id: i64,
    pub user_id: i64,
    pub question: String,
    pub answer: String,
}

/// A forum post joined with its author's name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: i64,
    pub author_name: String,
    pub content: String,
    pub created_at: String,
}

/// A forum comment joined with its author's name.
///
/// `parent_comment_id` is `None` for a top-level comment on the post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: i64,
    pub post_id: i64,
    pub user_id: i64,
    pub parent_comment_id: Option<i64>,
    pub content: String,
    pub created_at: String,
    pub author_name: String,
}

/// A generated ethical-guideline document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Regulation {
    pub id: i64,
    pub content: String,
    pub created_at: String,
}
