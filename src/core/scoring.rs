use crate::core::models::quiz::Quiz;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Quiz id to selected answer index.
pub type Selections = HashMap<i32, usize>;

/// How unanswered questions count towards the total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Policy {
    /// Every quiz counts; unanswered ones are wrong.
    AllQuestions,
    /// Only quizzes with a selection count.
    AnsweredOnly,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreResult {
    pub correct_count: usize,
    pub total_questions: usize,
    pub percentage: f64,
}

impl ScoreResult {
    /// Percentage rounded to two decimals.
    pub fn rounded(&self) -> f64 {
        (self.percentage * 100.0).round() / 100.0
    }

    pub fn display(&self) -> String {
        format!("{:.2}%", self.percentage)
    }
}

pub fn score(quizzes: &[Quiz], selections: &Selections, policy: Policy) -> ScoreResult {
    let correct_count = quizzes.iter().filter(|q| selections.get(&q.id) == Some(&q.correct_answer_index)).count();
    let total_questions = match policy {
        Policy::AllQuestions => quizzes.len(),
        Policy::AnsweredOnly => quizzes.iter().filter(|q| selections.contains_key(&q.id)).count(),
    };
    let percentage = if total_questions == 0 {
        0.0
    } else {
        correct_count as f64 / total_questions as f64 * 100.0
    };
    ScoreResult {
        correct_count,
        total_questions,
        percentage,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub quiz_id: i32,
    pub question: String,
    pub selected_answer: usize,
    pub correct_answer: usize,
    pub is_correct: bool,
    pub correct_answer_text: String,
}

/// Per-question breakdown of the answered quizzes, in quiz order.
pub fn review(quizzes: &[Quiz], selections: &Selections) -> Vec<Review> {
    quizzes
        .iter()
        .filter_map(|q| {
            selections.get(&q.id).map(|&selected| Review {
                quiz_id: q.id,
                question: q.question.clone(),
                selected_answer: selected,
                correct_answer: q.correct_answer_index,
                is_correct: selected == q.correct_answer_index,
                correct_answer_text: q.correct_answer().to_owned(),
            })
        })
        .collect()
}
