use crate::core::flow::Flow;
use crate::core::services::score::{evaluate, Submission};
use crate::error::Error;
use crate::portal::backend::PortalBackend;
use crate::portal::scope::ViewScope;
use crate::portal::session::QuizSession;

/// One user taking one flow: load the flow's quizzes, answer, submit.
pub struct Attempt<B> {
    backend: B,
    user_id: i32,
    flow: Flow,
    scope: ViewScope,
    session: Option<QuizSession>,
}

impl<B: PortalBackend> Attempt<B> {
    pub fn new(backend: B, user_id: i32, flow: Flow) -> Self {
        Self::with_scope(backend, user_id, flow, ViewScope::new())
    }

    pub fn with_scope(backend: B, user_id: i32, flow: Flow, scope: ViewScope) -> Self {
        Self {
            backend,
            user_id,
            flow,
            scope,
            session: None,
        }
    }

    pub fn scope(&self) -> &ViewScope {
        &self.scope
    }

    pub fn session(&self) -> Option<&QuizSession> {
        self.session.as_ref()
    }

    pub fn session_mut(&mut self) -> Option<&mut QuizSession> {
        self.session.as_mut()
    }

    /// Fetches the flow's quizzes into a fresh session. Returns `false` when
    /// the view went away before the response arrived.
    pub async fn load(&mut self) -> Result<bool, Error> {
        let ticket = self.scope.ticket();
        let fetched = self.backend.quizzes(&self.flow.query()).await;
        if !ticket.is_current() {
            log::debug!("discarding late quiz fetch for user {}", self.user_id);
            return Ok(false);
        }
        let quizzes = fetched?;
        log::info!("loaded {} quizzes for the {:?} flow", quizzes.len(), self.flow);
        self.session = Some(QuizSession::new(quizzes));
        Ok(true)
    }

    /// Scores the session. Main attempts write the percentage back; if that
    /// fails the submission still carries the local score and the error.
    pub async fn submit(&mut self) -> Result<Submission, Error> {
        let session = self.session.as_ref().ok_or_else(|| Error::BusinessError("no quizzes loaded".into()))?;
        let mut submission = evaluate(self.flow, session.quizzes(), session.selections());
        if self.flow.persists_score() {
            match self.backend.submit_score(self.user_id, submission.score.percentage).await {
                Ok(()) => submission.persisted = true,
                Err(e) => {
                    log::warn!("failed to submit score for user {}: {}", self.user_id, e);
                    submission.error = Some(e.to_string());
                }
            }
        }
        Ok(submission)
    }
}
