use crate::core::models::quiz::Query as QuizQuery;
use crate::core::scoring::Selections;
use crate::serde::{Deserialize, Serialize};

/// Builds the quiz filter from raw query pairs. `category` may repeat, as in
/// `?category=Secondary&category=Third`.
pub fn quiz_query(pairs: Vec<(String, String)>) -> QuizQuery {
    let mut query = QuizQuery::default();
    for (key, value) in pairs {
        match key.as_str() {
            "searchTerm" if !value.is_empty() => query.search_term = Some(value),
            "category" if !value.is_empty() => query.categories.push(value),
            _ => {}
        }
    }
    query
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateScore {
    pub user_id: i32,
    pub score: f64,
}

#[derive(Debug, Deserialize)]
pub struct SubmitAnswers {
    pub answers: Selections,
}
