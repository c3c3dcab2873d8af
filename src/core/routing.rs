use serde::Serialize;

/// Results strictly above this percentage pass.
pub const PASS_THRESHOLD: f64 = 45.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Destination {
    /// No result yet: take the main quiz.
    MainQuiz,
    /// Passed: the company page is unlocked.
    Company,
    /// Failed: retry through training.
    Training,
}

pub fn passes(result: f64) -> bool {
    result > PASS_THRESHOLD
}

pub fn route(result: Option<f64>) -> Destination {
    match result {
        None => Destination::MainQuiz,
        Some(r) if passes(r) => Destination::Company,
        Some(_) => Destination::Training,
    }
}
