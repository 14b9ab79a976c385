//! HTTP route table and application router assembly

use std::sync::Arc;
use std::time::Duration;

use axum::extract::Request;
use axum::http::Method;
use axum::Router;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::api::{answers, questions};
use crate::router::PathRouter;
use crate::AppState;

/// Build the board's route table
///
/// Routes are tried in registration order, so the answer routes sit ahead of
/// the question routes.
pub fn board_routes() -> PathRouter<Arc<AppState>> {
    let mut router = PathRouter::new();

    // Answer endpoints
    router.add_route(Method::POST, "/questions/{id}/answers", answers::create_answers);
    router.add_route(Method::GET, "/answers/{id}", answers::get_answer);
    router.add_route(Method::DELETE, "/answers/{id}", answers::delete_answer);

    // Question endpoints
    router.add_route(Method::POST, "/questions", questions::create_question);
    router.add_route(Method::GET, "/questions", questions::list_questions);
    router.add_route(Method::GET, "/questions/{id}", questions::get_question);
    router.add_route(Method::DELETE, "/questions/{id}", questions::delete_question);

    router
}

/// Create the main application router
///
/// Every request funnels through the fallback into [`PathRouter::dispatch`];
/// the surrounding layers add request tracing and the per-request deadline
/// from the server configuration.
pub fn create_router(state: Arc<AppState>) -> Router {
    let request_timeout = Duration::from_secs(state.settings.server.request_timeout_secs);
    let routes = Arc::new(board_routes());

    Router::new()
        .fallback(move |request: Request| {
            let routes = Arc::clone(&routes);
            let state = Arc::clone(&state);
            async move { routes.dispatch(state, request).await }
        })
        .layer(TimeoutLayer::new(request_timeout))
        .layer(TraceLayer::new_for_http())
}
