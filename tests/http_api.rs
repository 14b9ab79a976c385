//! HTTP integration tests for the board API
//!
//! Each test assembles a fresh application over in-memory storage and drives
//! it in-process, so ids always start at 1.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use qa_board::api::routes::create_router;
use qa_board::config::Settings;
use qa_board::model::{AnswerListResponse, QuestionListResponse, QuestionResponse};
use qa_board::service::BoardService;
use qa_board::storage::MemoryStorage;
use qa_board::AppState;

fn create_test_app() -> Router {
    let storage = Arc::new(MemoryStorage::new());
    let service = BoardService::new(storage.clone(), storage);
    let state = Arc::new(AppState {
        settings: Settings::default(),
        service,
    });
    create_router(state)
}

fn json_request(method: Method, path: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(path)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn raw_request(method: Method, path: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(path)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn empty_request(method: Method, path: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(path)
        .body(Body::empty())
        .unwrap()
}

async fn response_bytes(response: Response) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

async fn response_json(response: Response) -> Value {
    serde_json::from_slice(&response_bytes(response).await).unwrap()
}

#[tokio::test]
async fn test_create_question_returns_created() {
    let app = create_test_app();

    let response = app
        .oneshot(json_request(
            Method::POST,
            "/questions",
            json!({"text": "What is Rust?"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body: QuestionResponse =
        serde_json::from_slice(&response_bytes(response).await).unwrap();
    assert_eq!(body.question.id, 1);
    assert_eq!(body.question.text, "What is Rust?");
}

#[tokio::test]
async fn test_create_question_rejects_bad_bodies() {
    let app = create_test_app();

    let empty_text = app
        .clone()
        .oneshot(json_request(Method::POST, "/questions", json!({"text": ""})))
        .await
        .unwrap();
    assert_eq!(empty_text.status(), StatusCode::BAD_REQUEST);
    let body = response_json(empty_text).await;
    assert_eq!(body["error"], "question text must not be empty");

    let malformed = app
        .clone()
        .oneshot(raw_request(Method::POST, "/questions", "not json"))
        .await
        .unwrap();
    assert_eq!(malformed.status(), StatusCode::BAD_REQUEST);

    let no_body = app
        .oneshot(empty_request(Method::POST, "/questions"))
        .await
        .unwrap();
    assert_eq!(no_body.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_oversized_body_is_rejected() {
    let app = create_test_app();

    // Bodies past the 256 KiB read bound fail before JSON decoding sees them.
    let oversized = "a".repeat(300 * 1024);
    let response = app
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/questions",
            json!({"text": oversized}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = response_json(response).await;
    assert_eq!(body["error"], "failed to decode request body");

    // A body under the bound goes through untouched.
    let within = "a".repeat(200 * 1024);
    let response = app
        .oneshot(json_request(
            Method::POST,
            "/questions",
            json!({"text": within}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
}

#[tokio::test]
async fn test_list_questions() {
    let app = create_test_app();

    let empty = app
        .clone()
        .oneshot(empty_request(Method::GET, "/questions"))
        .await
        .unwrap();
    assert_eq!(empty.status(), StatusCode::OK);
    let body = response_json(empty).await;
    assert_eq!(body["questions"], json!([]));

    for text in ["first", "second"] {
        let response = app
            .clone()
            .oneshot(json_request(Method::POST, "/questions", json!({"text": text})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let listed = app
        .oneshot(empty_request(Method::GET, "/questions"))
        .await
        .unwrap();
    let body: QuestionListResponse =
        serde_json::from_slice(&response_bytes(listed).await).unwrap();
    assert_eq!(body.questions.len(), 2);
    // Listing order is not part of the contract.
    let mut texts: Vec<&str> = body.questions.iter().map(|q| q.text.as_str()).collect();
    texts.sort_unstable();
    assert_eq!(texts, vec!["first", "second"]);
}

#[tokio::test]
async fn test_get_question_returns_aggregate() {
    let app = create_test_app();

    app.clone()
        .oneshot(json_request(Method::POST, "/questions", json!({"text": "q"})))
        .await
        .unwrap();
    app.clone()
        .oneshot(json_request(
            Method::POST,
            "/questions/1/answers",
            json!({"user_id": "u1", "texts": ["a", "b"]}),
        ))
        .await
        .unwrap();

    let response = app
        .oneshot(empty_request(Method::GET, "/questions/1"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response_json(response).await;
    assert_eq!(body["question"]["id"], 1);
    assert_eq!(body["answers"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_get_question_unknown_id_is_not_found() {
    let app = create_test_app();
    let response = app
        .oneshot(empty_request(Method::GET, "/questions/99"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_non_numeric_id_misses_every_route() {
    let app = create_test_app();
    let response = app
        .oneshot(empty_request(Method::GET, "/questions/abc"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_id_overflowing_i64_is_bad_request() {
    let app = create_test_app();
    let response = app
        .oneshot(empty_request(
            Method::GET,
            "/questions/99999999999999999999999",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_delete_question_then_again() {
    let app = create_test_app();

    app.clone()
        .oneshot(json_request(Method::POST, "/questions", json!({"text": "q"})))
        .await
        .unwrap();

    let deleted = app
        .clone()
        .oneshot(empty_request(Method::DELETE, "/questions/1"))
        .await
        .unwrap();
    assert_eq!(deleted.status(), StatusCode::NO_CONTENT);

    let again = app
        .oneshot(empty_request(Method::DELETE, "/questions/1"))
        .await
        .unwrap();
    assert_eq!(again.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_create_answers_batch() {
    let app = create_test_app();

    app.clone()
        .oneshot(json_request(Method::POST, "/questions", json!({"text": "q"})))
        .await
        .unwrap();

    let response = app
        .oneshot(json_request(
            Method::POST,
            "/questions/1/answers",
            json!({"user_id": "u1", "texts": ["a", "b", "c"]}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let body: AnswerListResponse =
        serde_json::from_slice(&response_bytes(response).await).unwrap();
    assert_eq!(body.answers.len(), 3);
    let texts: Vec<&str> = body.answers.iter().map(|a| a.text.as_str()).collect();
    assert_eq!(texts, vec!["a", "b", "c"]);
    assert!(body.answers.iter().all(|a| a.question_id == 1));
    assert!(body.answers.iter().all(|a| a.user_id == "u1"));
}

#[tokio::test]
async fn test_create_answers_for_missing_question_is_not_found() {
    let app = create_test_app();
    let response = app
        .oneshot(json_request(
            Method::POST,
            "/questions/7/answers",
            json!({"user_id": "u1", "texts": ["a"]}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = response_json(response).await;
    assert_eq!(body["error"], "question 7 does not exist");
}

#[tokio::test]
async fn test_create_answers_empty_texts_is_bad_request() {
    let app = create_test_app();

    app.clone()
        .oneshot(json_request(Method::POST, "/questions", json!({"text": "q"})))
        .await
        .unwrap();

    // Validation fires whether or not the question exists.
    let existing = app
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/questions/1/answers",
            json!({"user_id": "u1", "texts": []}),
        ))
        .await
        .unwrap();
    assert_eq!(existing.status(), StatusCode::BAD_REQUEST);

    let missing = app
        .oneshot(json_request(
            Method::POST,
            "/questions/12/answers",
            json!({"user_id": "u1", "texts": []}),
        ))
        .await
        .unwrap();
    assert_eq!(missing.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_get_answer_round_trip() {
    let app = create_test_app();

    app.clone()
        .oneshot(json_request(Method::POST, "/questions", json!({"text": "q"})))
        .await
        .unwrap();
    app.clone()
        .oneshot(json_request(
            Method::POST,
            "/questions/1/answers",
            json!({"user_id": "u1", "texts": ["a"]}),
        ))
        .await
        .unwrap();

    let response = app
        .oneshot(empty_request(Method::GET, "/answers/1"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["answer"]["text"], "a");
    assert_eq!(body["answer"]["question_id"], 1);
}

#[tokio::test]
async fn test_get_unknown_answer_is_not_found() {
    let app = create_test_app();
    let response = app
        .oneshot(empty_request(Method::GET, "/answers/5"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_answer() {
    let app = create_test_app();

    app.clone()
        .oneshot(json_request(Method::POST, "/questions", json!({"text": "q"})))
        .await
        .unwrap();
    app.clone()
        .oneshot(json_request(
            Method::POST,
            "/questions/1/answers",
            json!({"user_id": "u1", "texts": ["a"]}),
        ))
        .await
        .unwrap();

    let deleted = app
        .clone()
        .oneshot(empty_request(Method::DELETE, "/answers/1"))
        .await
        .unwrap();
    assert_eq!(deleted.status(), StatusCode::NO_CONTENT);

    let gone = app
        .oneshot(empty_request(Method::GET, "/answers/1"))
        .await
        .unwrap();
    assert_eq!(gone.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_unknown_answer_is_bad_request() {
    let app = create_test_app();
    let response = app
        .oneshot(empty_request(Method::DELETE, "/answers/9"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = response_json(response).await;
    assert_eq!(body["error"], "answer 9 does not exist");
}

#[tokio::test]
async fn test_unregistered_paths_and_methods_are_not_found() {
    let app = create_test_app();

    let unknown = app
        .clone()
        .oneshot(empty_request(Method::GET, "/nope"))
        .await
        .unwrap();
    assert_eq!(unknown.status(), StatusCode::NOT_FOUND);

    // A known path with the wrong method is treated the same way.
    let wrong_method = app
        .clone()
        .oneshot(empty_request(Method::PUT, "/questions"))
        .await
        .unwrap();
    assert_eq!(wrong_method.status(), StatusCode::NOT_FOUND);

    // Patterns are anchored, so a trailing slash misses.
    let trailing = app
        .oneshot(empty_request(Method::GET, "/questions/1/"))
        .await
        .unwrap();
    assert_eq!(trailing.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_board_end_to_end() {
    let app = create_test_app();

    let created = app
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/questions",
            json!({"text": "What is Go?"}),
        ))
        .await
        .unwrap();
    assert_eq!(created.status(), StatusCode::CREATED);
    let body = response_json(created).await;
    assert_eq!(body["question"]["id"], 1);

    let answered = app
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/questions/1/answers",
            json!({"user_id": "u1", "texts": ["A", "B"]}),
        ))
        .await
        .unwrap();
    assert_eq!(answered.status(), StatusCode::CREATED);
    let body: AnswerListResponse =
        serde_json::from_slice(&response_bytes(answered).await).unwrap();
    let ids: Vec<i64> = body.answers.iter().map(|a| a.id).collect();
    assert_eq!(ids, vec![1, 2]);

    let deleted = app
        .clone()
        .oneshot(empty_request(Method::DELETE, "/questions/1"))
        .await
        .unwrap();
    assert_eq!(deleted.status(), StatusCode::NO_CONTENT);

    // The cascade removed the answers along with the question.
    let orphan = app
        .oneshot(empty_request(Method::GET, "/answers/1"))
        .await
        .unwrap();
    assert_eq!(orphan.status(), StatusCode::NOT_FOUND);
}
