//! Domain and wire models for the question/answer board

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A question posted to the board
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub id: i64,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

/// An answer attached to a question
///
/// Answers reference their question by id; the question owns them only in
/// the sense that deleting it deletes them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Answer {
    pub id: i64,
    pub question_id: i64,
    pub user_id: String,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

/// A question bundled with all of its answers, assembled at read time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionWithAnswers {
    pub question: Question,
    pub answers: Vec<Answer>,
}

/// A question that storage has not yet assigned an id or timestamp
#[derive(Debug, Clone, PartialEq)]
pub struct NewQuestion {
    pub text: String,
}

/// An answer that storage has not yet assigned an id or timestamp
#[derive(Debug, Clone, PartialEq)]
pub struct NewAnswer {
    pub question_id: i64,
    pub user_id: String,
    pub text: String,
}

/// Body accepted by `POST /questions`
///
/// A missing `text` field decodes to the empty string and is rejected by
/// validation, not by the decoder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateQuestionRequest {
    #[serde(default)]
    pub text: String,
}

/// Body accepted by `POST /questions/{id}/answers`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAnswerRequest {
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub texts: Vec<String>,
}

/// Response wrapper for a single created question
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionResponse {
    pub question: Question,
}

/// Response wrapper for the question listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionListResponse {
    pub questions: Vec<Question>,
}

/// Response wrapper for a single answer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerResponse {
    pub answer: Answer,
}

/// Response wrapper for a batch of created answers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerListResponse {
    pub answers: Vec<Answer>,
}
