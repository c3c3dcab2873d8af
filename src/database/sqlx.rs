use crate::core::models::{
    quiz::{Draft as QuizDraft, Query as QuizQuery, Quiz},
    user::{Insert as UserInsert, User},
};
use crate::core::ports::repository::{Common, Manager, QuizCommon, Store, TxStore, UserCommon};
use crate::database::models::quiz::QuizRow;
use crate::error::Error;
use sqlx::pool::PoolConnection;
use sqlx::{query, query_as, query_scalar, Error as SqlxError, Executor, PgPool, Postgres, Transaction};

const UNIQUE_VIOLATION: &str = "23505";

/// Turns a unique-constraint violation into a business error, anything else
/// stays a database error.
fn on_unique(err: SqlxError, message: &str) -> Error {
    match &err {
        SqlxError::Database(db) if db.code().as_deref() == Some(UNIQUE_VIOLATION) => Error::BusinessError(message.into()),
        _ => err.into(),
    }
}

pub struct PgSqlx<E>
where
    for<'e> &'e mut E: Executor<'e>,
{
    executor: E,
}

impl<E> PgSqlx<E>
where
    for<'e> &'e mut E: Executor<'e>,
{
    pub fn new(executor: E) -> Self {
        Self { executor }
    }
}

impl<E> QuizCommon for PgSqlx<E>
where
    for<'e> &'e mut E: Executor<'e, Database = Postgres>,
{
    async fn insert(&mut self, draft: QuizDraft) -> Result<Quiz, Error> {
        let row: QuizRow = query_as(
            "INSERT INTO quizzes (question, answers, correct_answer_index, category)
            VALUES ($1, $2, $3, $4)
            RETURNING *",
        )
        .bind(draft.question)
        .bind(Vec::from(draft.answers))
        .bind(draft.correct_answer_index as i32)
        .bind(draft.category.as_str())
        .fetch_one(&mut self.executor)
        .await?;
        row.try_into()
    }

    async fn query(&mut self, param: &QuizQuery) -> Result<Vec<Quiz>, Error> {
        let rows: Vec<QuizRow> = query_as(
            "
        SELECT *
        FROM quizzes
        WHERE ($1::TEXT IS NULL OR strpos(lower(question), lower($1)) > 0)
            AND (cardinality($2::TEXT[]) = 0 OR category = ANY($2))
        ORDER BY id",
        )
        .bind(param.search_term.as_deref().filter(|t| !t.is_empty()))
        .bind(&param.categories)
        .fetch_all(&mut self.executor)
        .await?;
        rows.into_iter().map(Quiz::try_from).collect()
    }

    async fn count(&mut self) -> Result<i64, Error> {
        let total = query_scalar("SELECT COUNT(*) FROM quizzes").fetch_one(&mut self.executor).await?;
        Ok(total)
    }

    async fn get(&mut self, id: i32) -> Result<Option<Quiz>, Error> {
        let row: Option<QuizRow> = query_as("SELECT * FROM quizzes WHERE id = $1").bind(id).fetch_optional(&mut self.executor).await?;
        row.map(Quiz::try_from).transpose()
    }

    async fn update(&mut self, id: i32, draft: QuizDraft) -> Result<Option<Quiz>, Error> {
        let row: Option<QuizRow> = query_as(
            "UPDATE quizzes
            SET question = $1, answers = $2, correct_answer_index = $3, category = $4, updated_at = now()
            WHERE id = $5
            RETURNING *",
        )
        .bind(draft.question)
        .bind(Vec::from(draft.answers))
        .bind(draft.correct_answer_index as i32)
        .bind(draft.category.as_str())
        .bind(id)
        .fetch_optional(&mut self.executor)
        .await?;
        row.map(Quiz::try_from).transpose()
    }

    async fn delete(&mut self, id: i32) -> Result<bool, Error> {
        let res = query("DELETE FROM quizzes WHERE id = $1").bind(id).execute(&mut self.executor).await?;
        Ok(res.rows_affected() > 0)
    }
}

impl<E> UserCommon for PgSqlx<E>
where
    for<'e> &'e mut E: Executor<'e, Database = Postgres>,
{
    async fn insert(&mut self, user: UserInsert) -> Result<i32, Error> {
        let id = query_scalar("INSERT INTO users (username, password, salt, is_admin) VALUES ($1, $2, $3, $4) RETURNING id")
            .bind(user.username)
            .bind(user.password)
            .bind(user.salt)
            .bind(user.is_admin)
            .fetch_one(&mut self.executor)
            .await
            .map_err(|e| on_unique(e, "username already taken"))?;
        Ok(id)
    }

    async fn get(&mut self, id: i32) -> Result<Option<User>, Error> {
        let user = query_as("SELECT * FROM users WHERE id = $1").bind(id).fetch_optional(&mut self.executor).await?;
        Ok(user)
    }

    async fn get_by_username(&mut self, username: &str) -> Result<Option<User>, Error> {
        let user = query_as("SELECT * FROM users WHERE username = $1").bind(username).fetch_optional(&mut self.executor).await?;
        Ok(user)
    }

    async fn update_result(&mut self, id: i32, result: f64) -> Result<bool, Error> {
        let res = query("UPDATE users SET result = $1 WHERE id = $2").bind(result).bind(id).execute(&mut self.executor).await?;
        Ok(res.rows_affected() > 0)
    }
}

impl<E> Common for PgSqlx<E> where for<'e> &'e mut E: Executor<'e, Database = Postgres> {}

impl<E> Store for PgSqlx<E> where for<'e> &'e mut E: Executor<'e, Database = Postgres> {}

impl TxStore for PgSqlx<Transaction<'static, Postgres>> {
    async fn commit(self) -> Result<(), Error> {
        self.executor.commit().await?;
        Ok(())
    }

    async fn rollback(self) -> Result<(), Error> {
        self.executor.rollback().await?;
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct PgSqlxManager {
    pool: PgPool,
}

impl PgSqlxManager {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl Manager for PgSqlxManager {
    type Store = PgSqlx<PoolConnection<Postgres>>;
    type TxStore = PgSqlx<Transaction<'static, Postgres>>;

    async fn db(&self) -> Result<Self::Store, Error> {
        let conn = self.pool.acquire().await?;
        Ok(PgSqlx::new(conn))
    }

    async fn tx(&self) -> Result<Self::TxStore, Error> {
        let tx = self.pool.begin().await?;
        Ok(PgSqlx::new(tx))
    }
}
