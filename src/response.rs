use crate::core::models::quiz::Quiz;
use crate::serde::Serialize;

#[derive(Debug, Serialize)]
pub struct Message {
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
pub struct QuizBody {
    pub message: &'static str,
    pub quiz: Quiz,
}

#[derive(Debug, Serialize)]
pub struct QuizList {
    pub message: &'static str,
    pub quizzes: Vec<Quiz>,
}

#[derive(Debug, Serialize)]
pub struct Created {
    pub id: i32,
}

#[derive(Debug, Serialize)]
pub struct Token {
    pub token: String,
}
