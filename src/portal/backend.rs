#![allow(async_fn_in_trait)]

use crate::core::models::quiz::{Query, Quiz};
use crate::core::ports::repository::Manager;
use crate::core::services::{quiz, score};
use crate::error::Error;
use crate::request::UpdateScore;
use awc::{http::StatusCode, Client, SendClientRequest};
use serde::de::{DeserializeOwned, IgnoredAny};
use serde::Deserialize;

/// What the portal needs from the quiz service.
pub trait PortalBackend {
    async fn quizzes(&self, query: &Query) -> Result<Vec<Quiz>, Error>;
    async fn submit_score(&self, user_id: i32, percentage: f64) -> Result<(), Error>;
    async fn result(&self, user_id: i32) -> Result<Option<f64>, Error>;
}

/// Talks to a store directly, in process.
#[derive(Debug, Clone)]
pub struct Local<M> {
    manager: M,
}

impl<M: Manager> Local<M> {
    pub fn new(manager: M) -> Self {
        Self { manager }
    }
}

impl<M: Manager> PortalBackend for Local<M> {
    async fn quizzes(&self, query: &Query) -> Result<Vec<Quiz>, Error> {
        let mut store = self.manager.db().await?;
        quiz::list_quizzes(&mut store, query).await
    }

    async fn submit_score(&self, user_id: i32, percentage: f64) -> Result<(), Error> {
        let mut store = self.manager.db().await?;
        score::submit_score(&mut store, user_id, percentage).await
    }

    async fn result(&self, user_id: i32) -> Result<Option<f64>, Error> {
        let mut store = self.manager.db().await?;
        Ok(score::standing(&mut store, user_id).await?.result)
    }
}

#[derive(Deserialize)]
struct QuizzesBody {
    quizzes: Vec<Quiz>,
}

#[derive(Deserialize)]
struct ResultBody {
    result: Option<f64>,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

/// Talks to a running portal server over its REST surface.
#[derive(Clone)]
pub struct Http {
    client: Client,
    base_url: String,
    token: String,
}

impl Http {
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            client: Client::default(),
            base_url: base_url.into().trim_end_matches('/').to_owned(),
            token: token.into(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// Sends the request and decodes a success body. Transport failures and 5xx
/// answers become `Error::Network`, other statuses map back onto the error
/// the server raised.
async fn call<T: DeserializeOwned>(send: SendClientRequest, what: &'static str) -> Result<T, Error> {
    let mut res = send.await.map_err(|e| Error::Network(e.to_string()))?;
    let status = res.status();
    if status.is_success() {
        return res.json::<T>().await.map_err(|e| Error::Network(e.to_string()));
    }
    let message = res.json::<ErrorBody>().await.map(|b| b.message).unwrap_or_else(|_| status.to_string());
    Err(match status {
        StatusCode::BAD_REQUEST => Error::Validation(message),
        StatusCode::UNAUTHORIZED => Error::Unauthorized,
        StatusCode::FORBIDDEN => Error::Forbidden,
        StatusCode::NOT_FOUND => Error::NotFound(what),
        _ => Error::Network(format!("{}: {}", status, message)),
    })
}

impl PortalBackend for Http {
    async fn quizzes(&self, query: &Query) -> Result<Vec<Quiz>, Error> {
        let mut pairs: Vec<(&str, &str)> = query.categories.iter().map(|c| ("category", c.as_str())).collect();
        if let Some(term) = &query.search_term {
            pairs.push(("searchTerm", term.as_str()));
        }
        let req = self
            .client
            .get(self.url("/get-quizzes"))
            .bearer_auth(&self.token)
            .query(&pairs)
            .map_err(|e| Error::Validation(e.to_string()))?;
        let body: QuizzesBody = call(req.send(), "quizzes").await?;
        Ok(body.quizzes)
    }

    async fn submit_score(&self, user_id: i32, percentage: f64) -> Result<(), Error> {
        let req = self.client.post(self.url("/update-score")).bearer_auth(&self.token);
        call::<IgnoredAny>(req.send_json(&UpdateScore { user_id, score: percentage }), "user").await?;
        Ok(())
    }

    async fn result(&self, user_id: i32) -> Result<Option<f64>, Error> {
        let req = self.client.get(self.url(&format!("/users/{}/result", user_id))).bearer_auth(&self.token);
        let body: ResultBody = call(req.send(), "user").await?;
        Ok(body.result)
    }
}
