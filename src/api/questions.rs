//! Question endpoint handlers

use std::sync::Arc;

use axum::extract::Request;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::info;

use crate::api::read_body;
use crate::error::Result;
use crate::model::{QuestionListResponse, QuestionResponse};
use crate::router::PathParams;
use crate::AppState;

/// `POST /questions`
pub async fn create_question(
    state: Arc<AppState>,
    _params: PathParams,
    request: Request,
) -> Result<Response> {
    let body = read_body(request).await?;
    info!("Creating question");

    let question = state.service.new_question(&body).await?;
    Ok((StatusCode::CREATED, Json(QuestionResponse { question })).into_response())
}

/// `GET /questions`
pub async fn list_questions(
    state: Arc<AppState>,
    _params: PathParams,
    _request: Request,
) -> Result<Response> {
    info!("Listing questions");

    let questions = state.service.all_questions().await?;
    Ok(Json(QuestionListResponse { questions }).into_response())
}

/// `GET /questions/{id}`
pub async fn get_question(
    state: Arc<AppState>,
    params: PathParams,
    _request: Request,
) -> Result<Response> {
    let id: i64 = params.parse("id")?;
    info!(id, "Fetching question");

    let aggregate = state.service.question(id).await?;
    Ok(Json(aggregate).into_response())
}

/// `DELETE /questions/{id}`
pub async fn delete_question(
    state: Arc<AppState>,
    params: PathParams,
    _request: Request,
) -> Result<Response> {
    let id: i64 = params.parse("id")?;
    info!(id, "Deleting question");

    state.service.delete_question(id).await?;
    Ok(StatusCode::NO_CONTENT.into_response())
}
