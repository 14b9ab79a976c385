//! Storage interfaces and backends
//!
//! The board service talks to persistence through two capability traits, one
//! per aggregate root. Any implementation of the pair is substitutable; the
//! in-memory backend below is the default and doubles as the test backend.

pub mod memory;

pub use memory::MemoryStorage;

use async_trait::async_trait;

use crate::error::Result;
use crate::model::{Answer, NewAnswer, NewQuestion, Question, QuestionWithAnswers};

/// Persistence operations for questions
#[async_trait]
pub trait QuestionStorage: Send + Sync {
    /// Persist a new question, assigning its id and creation time
    async fn create_question(&self, question: NewQuestion) -> Result<Question>;

    /// Fetch a question together with all of its answers
    async fn question(&self, id: i64) -> Result<QuestionWithAnswers>;

    /// Fetch every stored question, in no guaranteed order
    async fn all_questions(&self) -> Result<Vec<Question>>;

    /// Delete a question and, as part of the same operation, its answers
    async fn delete_question(&self, id: i64) -> Result<()>;

    /// Report whether a question with this id currently exists
    async fn exists(&self, id: i64) -> Result<bool>;

    /// Release underlying resources during process teardown
    async fn shutdown(&self);
}

/// Persistence operations for answers
#[async_trait]
pub trait AnswerStorage: Send + Sync {
    /// Persist a batch of answers, assigning distinct sequential ids and a
    /// creation time shared by the whole batch
    async fn create_answers(&self, batch: Vec<NewAnswer>) -> Result<Vec<Answer>>;

    /// Fetch a single answer
    async fn answer(&self, id: i64) -> Result<Answer>;

    /// Delete a single answer
    async fn delete_answer(&self, id: i64) -> Result<()>;

    /// Release underlying resources during process teardown
    async fn shutdown(&self);
}
