use crate::chrono::Utc;
use crate::core::models::{
    quiz::{Draft as QuizDraft, Query as QuizQuery, Quiz},
    user::{Insert as UserInsert, User},
};
use crate::core::ports::repository::{Common, Manager, QuizCommon, Store, TxStore, UserCommon};
use crate::error::Error;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Debug, Clone, Default)]
pub struct Data {
    quizzes: Vec<Quiz>,
    users: Vec<User>,
    quiz_seq: i32,
    user_seq: i32,
}

/// A single write. Transactions keep the writes they made and replay them
/// against the shared data on commit, so concurrent writes survive.
#[derive(Debug, Clone)]
pub enum Op {
    InsertQuiz(Quiz),
    UpdateQuiz(Quiz),
    DeleteQuiz(i32),
    InsertUser(User),
    SetResult(i32, f64),
}

impl Op {
    /// Returns whether a row was touched.
    fn apply(&self, data: &mut Data) -> bool {
        match self {
            Op::InsertQuiz(quiz) => {
                data.quizzes.push(quiz.clone());
                true
            }
            Op::UpdateQuiz(quiz) => match data.quizzes.iter_mut().find(|q| q.id == quiz.id) {
                Some(q) => {
                    *q = quiz.clone();
                    true
                }
                None => false,
            },
            Op::DeleteQuiz(id) => {
                let before = data.quizzes.len();
                data.quizzes.retain(|q| q.id != *id);
                data.quizzes.len() != before
            }
            Op::InsertUser(user) => {
                data.users.push(user.clone());
                true
            }
            Op::SetResult(id, result) => match data.users.iter_mut().find(|u| u.id == *id) {
                Some(u) => {
                    u.result = Some(*result);
                    true
                }
                None => false,
            },
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Seq {
    Quiz,
    User,
}

pub trait Handle {
    fn read<R>(&mut self, f: impl FnOnce(&Data) -> R) -> Result<R, Error>;
    /// Ids always come from the shared sequence, so rows staged in a
    /// transaction never collide with rows written outside it.
    fn next_id(&mut self, seq: Seq) -> Result<i32, Error>;
    fn apply(&mut self, op: Op) -> Result<bool, Error>;
}

#[derive(Debug, Clone)]
pub struct Shared {
    data: Arc<Mutex<Data>>,
    available: Arc<AtomicBool>,
    writable: Arc<AtomicBool>,
}

impl Shared {
    fn lock(&self) -> Result<MutexGuard<'_, Data>, Error> {
        if !self.available.load(Ordering::SeqCst) {
            return Err(Error::Storage("store unavailable".into()));
        }
        self.data.lock().map_err(|e| Error::Storage(e.to_string()))
    }

    fn check_writable(&self) -> Result<(), Error> {
        if !self.writable.load(Ordering::SeqCst) {
            return Err(Error::Storage("store is read-only".into()));
        }
        Ok(())
    }
}

impl Handle for Shared {
    fn read<R>(&mut self, f: impl FnOnce(&Data) -> R) -> Result<R, Error> {
        Ok(f(&*self.lock()?))
    }

    fn next_id(&mut self, seq: Seq) -> Result<i32, Error> {
        let mut data = self.lock()?;
        let counter = match seq {
            Seq::Quiz => &mut data.quiz_seq,
            Seq::User => &mut data.user_seq,
        };
        *counter += 1;
        Ok(*counter)
    }

    fn apply(&mut self, op: Op) -> Result<bool, Error> {
        self.check_writable()?;
        Ok(op.apply(&mut *self.lock()?))
    }
}

/// Reads and writes a private snapshot and logs the writes for commit.
pub struct Staged {
    shared: Shared,
    data: Data,
    ops: Vec<Op>,
}

impl Handle for Staged {
    fn read<R>(&mut self, f: impl FnOnce(&Data) -> R) -> Result<R, Error> {
        if !self.shared.available.load(Ordering::SeqCst) {
            return Err(Error::Storage("store unavailable".into()));
        }
        Ok(f(&self.data))
    }

    fn next_id(&mut self, seq: Seq) -> Result<i32, Error> {
        self.shared.next_id(seq)
    }

    fn apply(&mut self, op: Op) -> Result<bool, Error> {
        self.shared.check_writable()?;
        let touched = op.apply(&mut self.data);
        if touched {
            self.ops.push(op);
        }
        Ok(touched)
    }
}

pub struct Memory<H> {
    handle: H,
}

impl<H: Handle> QuizCommon for Memory<H> {
    async fn insert(&mut self, draft: QuizDraft) -> Result<Quiz, Error> {
        let now = Utc::now();
        let quiz = Quiz {
            id: self.handle.next_id(Seq::Quiz)?,
            question: draft.question,
            answers: draft.answers.into(),
            correct_answer_index: draft.correct_answer_index,
            category: draft.category,
            created_at: now,
            updated_at: now,
        };
        self.handle.apply(Op::InsertQuiz(quiz.clone()))?;
        Ok(quiz)
    }

    async fn query(&mut self, query: &QuizQuery) -> Result<Vec<Quiz>, Error> {
        self.handle.read(|data| data.quizzes.iter().filter(|q| query.matches(q)).cloned().collect())
    }

    async fn count(&mut self) -> Result<i64, Error> {
        self.handle.read(|data| data.quizzes.len() as i64)
    }

    async fn get(&mut self, id: i32) -> Result<Option<Quiz>, Error> {
        self.handle.read(|data| data.quizzes.iter().find(|q| q.id == id).cloned())
    }

    async fn update(&mut self, id: i32, draft: QuizDraft) -> Result<Option<Quiz>, Error> {
        let Some(mut quiz) = QuizCommon::get(self, id).await? else {
            return Ok(None);
        };
        quiz.question = draft.question;
        quiz.answers = draft.answers.into();
        quiz.correct_answer_index = draft.correct_answer_index;
        quiz.category = draft.category;
        quiz.updated_at = Utc::now();
        Ok(self.handle.apply(Op::UpdateQuiz(quiz.clone()))?.then_some(quiz))
    }

    async fn delete(&mut self, id: i32) -> Result<bool, Error> {
        self.handle.apply(Op::DeleteQuiz(id))
    }
}

impl<H: Handle> UserCommon for Memory<H> {
    async fn insert(&mut self, user: UserInsert) -> Result<i32, Error> {
        let id = self.handle.next_id(Seq::User)?;
        self.handle.apply(Op::InsertUser(User {
            id,
            username: user.username,
            password: user.password,
            salt: user.salt,
            is_admin: user.is_admin,
            result: None,
        }))?;
        Ok(id)
    }

    async fn get(&mut self, id: i32) -> Result<Option<User>, Error> {
        self.handle.read(|data| data.users.iter().find(|u| u.id == id).cloned())
    }

    async fn get_by_username(&mut self, username: &str) -> Result<Option<User>, Error> {
        self.handle.read(|data| data.users.iter().find(|u| u.username == username).cloned())
    }

    async fn update_result(&mut self, id: i32, result: f64) -> Result<bool, Error> {
        self.handle.apply(Op::SetResult(id, result))
    }
}

impl<H: Handle> Common for Memory<H> {}

impl<H: Handle> Store for Memory<H> {}

impl TxStore for Memory<Staged> {
    async fn commit(self) -> Result<(), Error> {
        let Staged { shared, ops, .. } = self.handle;
        shared.check_writable()?;
        let mut data = shared.lock()?;
        for op in &ops {
            op.apply(&mut data);
        }
        Ok(())
    }

    async fn rollback(self) -> Result<(), Error> {
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct MemoryManager {
    shared: Shared,
}

impl Default for MemoryManager {
    fn default() -> Self {
        Self {
            shared: Shared {
                data: Arc::default(),
                available: Arc::new(AtomicBool::new(true)),
                writable: Arc::new(AtomicBool::new(true)),
            },
        }
    }
}

impl MemoryManager {
    /// Simulates an outage: every store operation fails with a storage error
    /// until availability is restored.
    pub fn set_available(&self, available: bool) {
        self.shared.available.store(available, Ordering::SeqCst);
    }

    /// Reads keep working, writes fail with a storage error.
    pub fn set_writable(&self, writable: bool) {
        self.shared.writable.store(writable, Ordering::SeqCst);
    }
}

impl Manager for MemoryManager {
    type Store = Memory<Shared>;
    type TxStore = Memory<Staged>;

    async fn db(&self) -> Result<Self::Store, Error> {
        Ok(Memory { handle: self.shared.clone() })
    }

    async fn tx(&self) -> Result<Self::TxStore, Error> {
        let mut shared = self.shared.clone();
        let data = shared.read(Data::clone)?;
        Ok(Memory {
            handle: Staged { shared, data, ops: Vec::new() },
        })
    }
}
