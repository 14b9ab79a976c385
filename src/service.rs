//! Domain orchestration for questions and answers

use std::sync::Arc;

use tracing::{error, warn};

use crate::error::{AppError, Result};
use crate::model::{
    Answer, CreateAnswerRequest, CreateQuestionRequest, NewAnswer, NewQuestion, Question,
    QuestionWithAnswers,
};
use crate::storage::{AnswerStorage, QuestionStorage};

/// Service enforcing the board's cross-entity rules
///
/// A question must exist before answers attach to it, answers are created in
/// one batch per request, and deleting a question deletes its answers. The
/// service holds immutable storage handles and keeps no other state.
#[derive(Clone)]
pub struct BoardService {
    questions: Arc<dyn QuestionStorage>,
    answers: Arc<dyn AnswerStorage>,
}

impl BoardService {
    /// Create a service over the two storage capabilities
    pub fn new(questions: Arc<dyn QuestionStorage>, answers: Arc<dyn AnswerStorage>) -> Self {
        Self { questions, answers }
    }

    /// Decode and validate a question body, then persist the question
    ///
    /// Storage assigns the id and creation time.
    pub async fn new_question(&self, body: &[u8]) -> Result<Question> {
        let request: CreateQuestionRequest = decode(body, "new_question")?;

        if request.text.is_empty() {
            return Err(AppError::Validation(
                "question text must not be empty".to_string(),
            ));
        }

        self.questions
            .create_question(NewQuestion { text: request.text })
            .await
            .map_err(|error| {
                error!(operation = "new_question", error = %error, "Storage call failed");
                error
            })
    }

    /// Fetch a question together with its answers
    pub async fn question(&self, id: i64) -> Result<QuestionWithAnswers> {
        self.questions.question(id).await.map_err(|error| {
            error!(operation = "question", id, error = %error, "Storage call failed");
            error
        })
    }

    /// Fetch every question on the board
    pub async fn all_questions(&self) -> Result<Vec<Question>> {
        self.questions.all_questions().await.map_err(|error| {
            error!(operation = "all_questions", error = %error, "Storage call failed");
            error
        })
    }

    /// Delete a question and every answer attached to it
    pub async fn delete_question(&self, id: i64) -> Result<()> {
        self.questions.delete_question(id).await.map_err(|error| {
            error!(operation = "delete_question", id, error = %error, "Storage call failed");
            error
        })
    }

    /// Create a batch of answers for one question
    ///
    /// The body is decoded and validated first, then the question's existence
    /// is checked before anything is written, so a bad request never leaves
    /// orphaned answers behind. The existence check and the batch insert are
    /// two separate storage calls with no shared transaction: a question
    /// deleted concurrently between them can still orphan the batch, and that
    /// race is accepted.
    pub async fn new_answer(&self, body: &[u8], question_id: i64) -> Result<Vec<Answer>> {
        let request: CreateAnswerRequest = decode(body, "new_answer")?;
        let CreateAnswerRequest { user_id, texts } = request;

        if texts.is_empty() {
            return Err(AppError::Validation("texts must not be empty".to_string()));
        }
        if texts.iter().any(String::is_empty) {
            return Err(AppError::Validation(
                "answer text must not be empty".to_string(),
            ));
        }

        let exists = self.questions.exists(question_id).await.map_err(|error| {
            error!(operation = "new_answer", id = question_id, error = %error, "Storage call failed");
            error
        })?;
        if !exists {
            warn!(id = question_id, "Rejected answers for a missing question");
            return Err(AppError::NotFound(format!(
                "question {} does not exist",
                question_id
            )));
        }

        let batch: Vec<NewAnswer> = texts
            .into_iter()
            .map(|text| NewAnswer {
                question_id,
                user_id: user_id.clone(),
                text,
            })
            .collect();

        self.answers.create_answers(batch).await.map_err(|error| {
            error!(operation = "new_answer", id = question_id, error = %error, "Storage call failed");
            error
        })
    }

    /// Fetch a single answer
    pub async fn answer(&self, id: i64) -> Result<Answer> {
        self.answers.answer(id).await.map_err(|error| {
            error!(operation = "answer", id, error = %error, "Storage call failed");
            error
        })
    }

    /// Delete a single answer
    pub async fn delete_answer(&self, id: i64) -> Result<()> {
        self.answers.delete_answer(id).await.map_err(|error| {
            error!(operation = "delete_answer", id, error = %error, "Storage call failed");
            error
        })
    }

    /// Run the storage teardown hooks, once, during process shutdown
    pub async fn shutdown(&self) {
        self.answers.shutdown().await;
        self.questions.shutdown().await;
    }
}

/// Decode a JSON request body, logging the exact decode failure
fn decode<T: serde::de::DeserializeOwned>(body: &[u8], operation: &str) -> Result<T> {
    serde_json::from_slice(body).map_err(|error| {
        error!(operation, error = %error, "Failed to decode request body");
        AppError::Decoding(error.to_string())
    })
}
