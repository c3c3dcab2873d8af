use crate::core::models::quiz::{Quiz, ANSWER_COUNT};
use crate::core::scoring::{score, Policy, ScoreResult, Selections};
use crate::error::Error;
use serde::Serialize;
use std::collections::BTreeSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Progress {
    pub answered: usize,
    pub total: usize,
}

/// Selections and navigation over a fixed list of quizzes.
#[derive(Debug, Clone, Default)]
pub struct QuizSession {
    quizzes: Vec<Quiz>,
    selected: Selections,
    answered: BTreeSet<usize>,
    cursor: usize,
}

impl QuizSession {
    pub fn new(quizzes: Vec<Quiz>) -> Self {
        Self {
            quizzes,
            ..Default::default()
        }
    }

    pub fn quizzes(&self) -> &[Quiz] {
        &self.quizzes
    }

    pub fn selections(&self) -> &Selections {
        &self.selected
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn current(&self) -> Option<&Quiz> {
        self.quizzes.get(self.cursor)
    }

    pub fn selected(&self, quiz_id: i32) -> Option<usize> {
        self.selected.get(&quiz_id).copied()
    }

    pub fn is_answered(&self, position: usize) -> bool {
        self.answered.contains(&position)
    }

    /// Records or overwrites the answer for `quiz_id` and marks that quiz's
    /// position as answered, wherever the cursor is.
    pub fn select_answer(&mut self, quiz_id: i32, answer_index: usize) -> Result<(), Error> {
        if answer_index >= ANSWER_COUNT {
            return Err(Error::Validation(format!("answer index {} is out of range", answer_index)));
        }
        let position = self.quizzes.iter().position(|q| q.id == quiz_id).ok_or(Error::NotFound("quiz"))?;
        self.selected.insert(quiz_id, answer_index);
        self.answered.insert(position);
        Ok(())
    }

    pub fn go_to(&mut self, position: usize) -> Result<(), Error> {
        if position >= self.quizzes.len() {
            return Err(Error::Validation(format!("question {} does not exist", position)));
        }
        self.cursor = position;
        Ok(())
    }

    pub fn next(&mut self) {
        if self.cursor + 1 < self.quizzes.len() {
            self.cursor += 1;
        }
    }

    pub fn previous(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn progress(&self) -> Progress {
        Progress {
            answered: self.answered.len(),
            total: self.quizzes.len(),
        }
    }

    pub fn score(&self, policy: Policy) -> ScoreResult {
        score(&self.quizzes, &self.selected, policy)
    }
}
