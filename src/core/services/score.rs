use crate::core::flow::Flow;
use crate::core::models::quiz::{Quiz, ANSWER_COUNT};
use crate::core::ports::repository::{QuizCommon, Store, UserCommon};
use crate::core::routing::{route, Destination};
use crate::core::scoring::{review, score, Review, ScoreResult, Selections};
use crate::error::Error;
use serde::Serialize;

pub fn validate_percentage(percentage: f64) -> Result<(), Error> {
    if !percentage.is_finite() || !(0.0..=100.0).contains(&percentage) {
        return Err(Error::Validation(format!("score must be between 0 and 100, got {}", percentage)));
    }
    Ok(())
}

/// Overwrites the user's stored result.
pub async fn submit_score<S>(store: &mut S, user_id: i32, percentage: f64) -> Result<(), Error>
where
    S: Store,
{
    validate_percentage(percentage)?;
    if !UserCommon::update_result(store, user_id, percentage).await? {
        return Err(Error::NotFound("user"));
    }
    log::info!("user {} result set to {:.2}", user_id, percentage);
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Standing {
    pub result: Option<f64>,
    pub destination: Destination,
}

pub async fn standing<S>(store: &mut S, user_id: i32) -> Result<Standing, Error>
where
    S: Store,
{
    let user = UserCommon::get(store, user_id).await?.ok_or(Error::NotFound("user"))?;
    Ok(Standing {
        result: user.result,
        destination: route(user.result),
    })
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub flow: Flow,
    pub score: ScoreResult,
    pub destination: Destination,
    pub persisted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub review: Option<Vec<Review>>,
}

/// Scores a finished attempt without writing anything. Training attempts
/// carry the per-question review.
pub fn evaluate(flow: Flow, quizzes: &[Quiz], selections: &Selections) -> Submission {
    let result = score(quizzes, selections, flow.policy());
    Submission {
        flow,
        score: result,
        destination: route(Some(result.percentage)),
        persisted: false,
        error: None,
        review: match flow {
            Flow::Training => Some(review(quizzes, selections)),
            Flow::Main => None,
        },
    }
}

/// Scores `selections` against the flow's quizzes. A failed write of the result
/// is reported in the returned submission, the score itself is still returned.
pub async fn submit_flow<S>(store: &mut S, user_id: i32, flow: Flow, selections: &Selections) -> Result<Submission, Error>
where
    S: Store,
{
    if let Some((id, idx)) = selections.iter().find(|&(_, &idx)| idx >= ANSWER_COUNT) {
        return Err(Error::Validation(format!("answer {} for quiz {} is out of range", idx, id)));
    }
    let quizzes = QuizCommon::query(store, &flow.query()).await?;
    let mut submission = evaluate(flow, &quizzes, selections);
    if flow.persists_score() {
        match submit_score(store, user_id, submission.score.percentage).await {
            Ok(()) => submission.persisted = true,
            Err(Error::NotFound(what)) => return Err(Error::NotFound(what)),
            Err(e) => {
                log::warn!("failed to persist score for user {}: {}", user_id, e);
                submission.error = Some(e.to_string());
            }
        }
    }
    Ok(submission)
}
