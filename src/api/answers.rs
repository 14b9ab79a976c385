//! Answer endpoint handlers

use std::sync::Arc;

use axum::extract::Request;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::info;

use crate::api::read_body;
use crate::error::{AppError, ErrorResponse, Result};
use crate::model::{AnswerListResponse, AnswerResponse};
use crate::router::PathParams;
use crate::AppState;

/// `POST /questions/{id}/answers`
pub async fn create_answers(
    state: Arc<AppState>,
    params: PathParams,
    request: Request,
) -> Result<Response> {
    let question_id: i64 = params.parse("id")?;
    let body = read_body(request).await?;
    info!(question_id, "Creating answers");

    let answers = state.service.new_answer(&body, question_id).await?;
    Ok((StatusCode::CREATED, Json(AnswerListResponse { answers })).into_response())
}

/// `GET /answers/{id}`
pub async fn get_answer(
    state: Arc<AppState>,
    params: PathParams,
    _request: Request,
) -> Result<Response> {
    let id: i64 = params.parse("id")?;
    info!(id, "Fetching answer");

    let answer = state.service.answer(id).await?;
    Ok(Json(AnswerResponse { answer }).into_response())
}

/// `DELETE /answers/{id}`
pub async fn delete_answer(
    state: Arc<AppState>,
    params: PathParams,
    _request: Request,
) -> Result<Response> {
    let id: i64 = params.parse("id")?;
    info!(id, "Deleting answer");

    match state.service.delete_answer(id).await {
        Ok(()) => Ok(StatusCode::NO_CONTENT.into_response()),
        // This endpoint reports an unknown id as a bad request, not as a
        // missing resource.
        Err(error @ AppError::NotFound(_)) => Ok((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: error.client_message(),
            }),
        )
            .into_response()),
        Err(error) => Err(error),
    }
}
