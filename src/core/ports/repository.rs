#![allow(async_fn_in_trait)]

use crate::core::models::{
    quiz::{Draft as QuizDraft, Query as QuizQuery, Quiz},
    user::{Insert as UserInsert, User},
};
use crate::error::Error;

pub trait QuizCommon {
    async fn insert(&mut self, draft: QuizDraft) -> Result<Quiz, Error>;
    async fn query(&mut self, query: &QuizQuery) -> Result<Vec<Quiz>, Error>;
    async fn count(&mut self) -> Result<i64, Error>;
    async fn get(&mut self, id: i32) -> Result<Option<Quiz>, Error>;
    async fn update(&mut self, id: i32, draft: QuizDraft) -> Result<Option<Quiz>, Error>;
    async fn delete(&mut self, id: i32) -> Result<bool, Error>;
}

pub trait UserCommon {
    async fn insert(&mut self, user: UserInsert) -> Result<i32, Error>;
    async fn get(&mut self, id: i32) -> Result<Option<User>, Error>;
    async fn get_by_username(&mut self, username: &str) -> Result<Option<User>, Error>;
    async fn update_result(&mut self, id: i32, result: f64) -> Result<bool, Error>;
}

pub trait Common: QuizCommon + UserCommon {}

pub trait Store: Common {}

pub trait TxStore: Store {
    async fn commit(self) -> Result<(), Error>;
    async fn rollback(self) -> Result<(), Error>;
}

pub trait Manager {
    type Store: Store;
    type TxStore: TxStore;

    async fn db(&self) -> Result<Self::Store, Error>;
    async fn tx(&self) -> Result<Self::TxStore, Error>;
}
