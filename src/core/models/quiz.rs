use crate::chrono::{DateTime, Utc};
use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const ANSWER_COUNT: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Main,
    Secondary,
    Third,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Main, Category::Secondary, Category::Third];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Main => "Main",
            Category::Secondary => "Secondary",
            Category::Third => "Third",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| Error::Validation(format!("unknown category: {}", s)))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quiz {
    pub id: i32,
    pub question: String,
    pub answers: Vec<String>,
    pub correct_answer_index: usize,
    pub category: Category,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Quiz {
    pub fn correct_answer(&self) -> &str {
        &self.answers[self.correct_answer_index]
    }
}

/// Request body for create and update. Every field is optional here so a missing
/// field is reported as a validation message rather than a decode failure.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payload {
    pub question: Option<String>,
    pub answers: Option<Vec<String>>,
    pub correct_answer_index: Option<i64>,
    pub category: Option<String>,
}

/// A quiz that passed validation and may be written to the store.
#[derive(Debug, Clone, PartialEq)]
pub struct Draft {
    pub question: String,
    pub answers: [String; ANSWER_COUNT],
    pub correct_answer_index: usize,
    pub category: Category,
}

impl TryFrom<Payload> for Draft {
    type Error = Error;

    fn try_from(payload: Payload) -> Result<Self, Self::Error> {
        let question = payload.question.ok_or_else(|| Error::Validation("question is required".into()))?;
        if question.trim().is_empty() {
            return Err(Error::Validation("question must not be empty".into()));
        }
        let answers = payload.answers.ok_or_else(|| Error::Validation("answers are required".into()))?;
        let answers: [String; ANSWER_COUNT] = answers
            .try_into()
            .map_err(|a: Vec<String>| Error::Validation(format!("exactly {} answers are required, got {}", ANSWER_COUNT, a.len())))?;
        let index = payload
            .correct_answer_index
            .ok_or_else(|| Error::Validation("correctAnswerIndex is required".into()))?;
        if !(0..ANSWER_COUNT as i64).contains(&index) {
            return Err(Error::Validation(format!("correctAnswerIndex must be between 0 and {}", ANSWER_COUNT - 1)));
        }
        let category = payload.category.ok_or_else(|| Error::Validation("category is required".into()))?.parse()?;
        Ok(Draft {
            question,
            answers,
            correct_answer_index: index as usize,
            category,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query {
    pub search_term: Option<String>,
    pub categories: Vec<String>,
}

impl Query {
    pub fn with_categories<I, S>(categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            search_term: None,
            categories: categories.into_iter().map(Into::into).collect(),
        }
    }

    pub fn matches(&self, quiz: &Quiz) -> bool {
        if let Some(term) = self.search_term.as_deref().filter(|t| !t.is_empty()) {
            if !quiz.question.to_lowercase().contains(&term.to_lowercase()) {
                return false;
            }
        }
        self.categories.is_empty() || self.categories.iter().any(|c| c == quiz.category.as_str())
    }
}
