//! In-memory storage backend

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;
use tracing::debug;

use crate::error::{AppError, Result};
use crate::model::{Answer, NewAnswer, NewQuestion, Question, QuestionWithAnswers};
use crate::storage::{AnswerStorage, QuestionStorage};

#[derive(Debug, Default)]
struct Tables {
    questions: HashMap<i64, Question>,
    answers: HashMap<i64, Answer>,
    // Counters only ever grow; a deleted id is never handed out again.
    next_question_id: i64,
    next_answer_id: i64,
}

/// Storage backend keeping all questions and answers in process memory
///
/// Implements both capability traits, so one instance can serve as the whole
/// persistence layer. Everything sits behind a single lock, which makes the
/// cascading delete atomic with respect to concurrent readers.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    tables: RwLock<Tables>,
}

impl MemoryStorage {
    /// Create an empty in-memory backend
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl QuestionStorage for MemoryStorage {
    async fn create_question(&self, question: NewQuestion) -> Result<Question> {
        let mut tables = self.tables.write();
        tables.next_question_id += 1;
        let question = Question {
            id: tables.next_question_id,
            text: question.text,
            created_at: Utc::now(),
        };
        tables.questions.insert(question.id, question.clone());
        Ok(question)
    }

    async fn question(&self, id: i64) -> Result<QuestionWithAnswers> {
        let tables = self.tables.read();
        let question = tables
            .questions
            .get(&id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("question {} does not exist", id)))?;
        let answers = tables
            .answers
            .values()
            .filter(|answer| answer.question_id == id)
            .cloned()
            .collect();
        Ok(QuestionWithAnswers { question, answers })
    }

    async fn all_questions(&self) -> Result<Vec<Question>> {
        let tables = self.tables.read();
        Ok(tables.questions.values().cloned().collect())
    }

    async fn delete_question(&self, id: i64) -> Result<()> {
        let mut tables = self.tables.write();
        if tables.questions.remove(&id).is_none() {
            return Err(AppError::NotFound(format!("question {} does not exist", id)));
        }
        // Cascade to the question's answers under the same write lock.
        tables.answers.retain(|_, answer| answer.question_id != id);
        Ok(())
    }

    async fn exists(&self, id: i64) -> Result<bool> {
        Ok(self.tables.read().questions.contains_key(&id))
    }

    async fn shutdown(&self) {
        debug!("Question storage shut down");
    }
}

#[async_trait]
impl AnswerStorage for MemoryStorage {
    async fn create_answers(&self, batch: Vec<NewAnswer>) -> Result<Vec<Answer>> {
        let mut tables = self.tables.write();
        // One creation time for the whole batch.
        let created_at = Utc::now();
        let mut created = Vec::with_capacity(batch.len());
        for answer in batch {
            tables.next_answer_id += 1;
            let answer = Answer {
                id: tables.next_answer_id,
                question_id: answer.question_id,
                user_id: answer.user_id,
                text: answer.text,
                created_at,
            };
            tables.answers.insert(answer.id, answer.clone());
            created.push(answer);
        }
        Ok(created)
    }

    async fn answer(&self, id: i64) -> Result<Answer> {
        self.tables
            .read()
            .answers
            .get(&id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("answer {} does not exist", id)))
    }

    async fn delete_answer(&self, id: i64) -> Result<()> {
        let mut tables = self.tables.write();
        if tables.answers.remove(&id).is_none() {
            return Err(AppError::NotFound(format!("answer {} does not exist", id)));
        }
        Ok(())
    }

    async fn shutdown(&self) {
        debug!("Answer storage shut down");
    }
}
