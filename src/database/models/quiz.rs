use crate::chrono::{DateTime, Utc};
use crate::core::models::quiz::{Quiz, ANSWER_COUNT};
use crate::error::Error;
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct QuizRow {
    pub id: i32,
    pub question: String,
    pub answers: Vec<String>,
    pub correct_answer_index: i32,
    pub category: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<QuizRow> for Quiz {
    type Error = Error;

    fn try_from(row: QuizRow) -> Result<Self, Self::Error> {
        if row.answers.len() != ANSWER_COUNT || !(0..ANSWER_COUNT as i32).contains(&row.correct_answer_index) {
            return Err(Error::Storage(format!("quiz {} violates the answer invariant", row.id)));
        }
        let category = row.category.parse().map_err(|_| Error::Storage(format!("quiz {} has unknown category {}", row.id, row.category)))?;
        Ok(Quiz {
            id: row.id,
            question: row.question,
            answers: row.answers,
            correct_answer_index: row.correct_answer_index as usize,
            category,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}
