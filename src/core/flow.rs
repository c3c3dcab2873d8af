use crate::core::models::quiz::{Category, Query};
use crate::core::scoring::Policy;
use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A quiz-taking flow: which categories it draws from, how it is scored and
/// whether the score is written back to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Flow {
    Main,
    Training,
}

impl Flow {
    pub fn categories(&self) -> &'static [Category] {
        match self {
            Flow::Main => &[Category::Main],
            Flow::Training => &[Category::Secondary, Category::Third],
        }
    }

    pub fn policy(&self) -> Policy {
        match self {
            Flow::Main => Policy::AllQuestions,
            Flow::Training => Policy::AnsweredOnly,
        }
    }

    pub fn persists_score(&self) -> bool {
        matches!(self, Flow::Main)
    }

    pub fn query(&self) -> Query {
        Query::with_categories(self.categories().iter().map(Category::as_str))
    }
}

impl FromStr for Flow {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "main" => Ok(Flow::Main),
            "training" => Ok(Flow::Training),
            _ => Err(Error::NotFound("flow")),
        }
    }
}
