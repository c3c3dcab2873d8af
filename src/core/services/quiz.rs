use crate::core::models::quiz::{Draft, Payload, Query, Quiz};
use crate::core::ports::repository::{QuizCommon, Store};
use crate::error::Error;

pub async fn create_quiz<S>(store: &mut S, payload: Payload) -> Result<Quiz, Error>
where
    S: Store,
{
    let draft = Draft::try_from(payload)?;
    let quiz = QuizCommon::insert(store, draft).await?;
    log::info!("quiz {} created in category {}", quiz.id, quiz.category);
    Ok(quiz)
}

pub async fn list_quizzes<S>(store: &mut S, query: &Query) -> Result<Vec<Quiz>, Error>
where
    S: Store,
{
    QuizCommon::query(store, query).await
}

pub async fn get_quiz<S>(store: &mut S, id: i32) -> Result<Quiz, Error>
where
    S: Store,
{
    QuizCommon::get(store, id).await?.ok_or(Error::NotFound("quiz"))
}

pub async fn update_quiz<S>(store: &mut S, id: i32, payload: Payload) -> Result<Quiz, Error>
where
    S: Store,
{
    let draft = Draft::try_from(payload)?;
    let quiz = QuizCommon::update(store, id, draft).await?.ok_or(Error::NotFound("quiz"))?;
    log::info!("quiz {} updated", id);
    Ok(quiz)
}

pub async fn delete_quiz<S>(store: &mut S, id: i32) -> Result<(), Error>
where
    S: Store,
{
    if !QuizCommon::delete(store, id).await? {
        return Err(Error::NotFound("quiz"));
    }
    log::info!("quiz {} deleted", id);
    Ok(())
}
