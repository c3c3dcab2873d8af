use crate::actix_web::{
    web::{Data, Json, Path, Query},
    HttpResponse,
};
use crate::context::{Admin, UserInfo};
use crate::core::models::quiz::Payload;
use crate::core::ports::repository::Manager;
use crate::core::services::quiz;
use crate::error::Error;
use crate::request::quiz_query;
use crate::response::{Message, QuizBody, QuizList};

pub async fn create<M: Manager>(_: Admin, Json(payload): Json<Payload>, manager: Data<M>) -> Result<HttpResponse, Error> {
    let mut store = manager.db().await?;
    let quiz = quiz::create_quiz(&mut store, payload).await?;
    Ok(HttpResponse::Created().json(QuizBody {
        message: "Quiz added successfully!",
        quiz,
    }))
}

pub async fn list<M: Manager>(_: UserInfo, Query(pairs): Query<Vec<(String, String)>>, manager: Data<M>) -> Result<Json<QuizList>, Error> {
    let mut store = manager.db().await?;
    let quizzes = quiz::list_quizzes(&mut store, &quiz_query(pairs)).await?;
    Ok(Json(QuizList {
        message: "Quizzes retrieved successfully!",
        quizzes,
    }))
}

pub async fn detail<M: Manager>(_: UserInfo, id: Path<i32>, manager: Data<M>) -> Result<Json<QuizBody>, Error> {
    let id = id.into_inner();
    let mut store = manager.db().await?;
    let quiz = quiz::get_quiz(&mut store, id).await?;
    Ok(Json(QuizBody {
        message: "Quiz retrieved successfully!",
        quiz,
    }))
}

pub async fn update<M: Manager>(_: Admin, id: Path<i32>, Json(payload): Json<Payload>, manager: Data<M>) -> Result<Json<QuizBody>, Error> {
    let id = id.into_inner();
    let mut store = manager.db().await?;
    let quiz = quiz::update_quiz(&mut store, id, payload).await?;
    Ok(Json(QuizBody {
        message: "Quiz updated successfully!",
        quiz,
    }))
}

pub async fn delete<M: Manager>(_: Admin, id: Path<i32>, manager: Data<M>) -> Result<Json<Message>, Error> {
    let id = id.into_inner();
    let mut store = manager.db().await?;
    quiz::delete_quiz(&mut store, id).await?;
    Ok(Json(Message {
        message: "Quiz deleted successfully!",
    }))
}
