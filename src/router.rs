//! Pattern-based request dispatch
//!
//! `PathRouter` maps `(method, path)` pairs onto handlers through anchored
//! regular expressions compiled at registration time. Routes are tried in
//! registration order and the first match wins, so more specific templates
//! must be registered before general ones that could also match.

use std::collections::HashMap;
use std::future::Future;
use std::str::FromStr;

use axum::extract::Request;
use axum::http::{Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use futures::future::BoxFuture;
use regex::{Captures, Regex};

use crate::error::{AppError, ErrorResponse, Result};

type BoxedHandler<S> =
    Box<dyn Fn(S, PathParams, Request) -> BoxFuture<'static, Result<Response>> + Send + Sync>;

/// A single registered route
struct Route<S> {
    method: Method,
    pattern: Regex,
    handler: BoxedHandler<S>,
}

/// Path parameters captured while matching a route
///
/// Captures are stored as strings under their placeholder name; handlers
/// parse them into concrete types with [`PathParams::parse`].
#[derive(Debug, Clone, Default)]
pub struct PathParams {
    values: HashMap<String, String>,
}

impl PathParams {
    fn from_captures(pattern: &Regex, captures: &Captures<'_>) -> Self {
        let mut values = HashMap::new();
        for name in pattern.capture_names().flatten() {
            if let Some(capture) = captures.name(name) {
                values.insert(name.to_string(), capture.as_str().to_string());
            }
        }
        Self { values }
    }

    /// Raw string value of a captured parameter
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// Parse a captured parameter into a concrete type
    ///
    /// A missing parameter or a failed parse is a [`AppError::Validation`],
    /// which surfaces to the client as a bad request.
    pub fn parse<T: FromStr>(&self, name: &str) -> Result<T> {
        self.get(name)
            .and_then(|value| value.parse().ok())
            .ok_or_else(|| AppError::Validation(format!("invalid path parameter '{}'", name)))
    }

    /// Number of captured parameters
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no parameters were captured
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Router matching requests against templates in registration order
pub struct PathRouter<S> {
    routes: Vec<Route<S>>,
}

impl<S> PathRouter<S> {
    /// Create a router with no routes
    pub fn new() -> Self {
        Self { routes: Vec::new() }
    }

    /// Register a handler for a method and path template
    ///
    /// Templates may contain `{id}` (one or more digits) and `{slug}` (one or
    /// more non-slash characters) placeholders; everything else matches
    /// literally and the whole template is anchored to the full path.
    ///
    /// # Panics
    ///
    /// Panics if the template does not compile into a valid pattern. Route
    /// registration happens once at startup, so a bad template is a
    /// programmer error, not a request-time failure.
    pub fn add_route<H, Fut>(&mut self, method: Method, template: &str, handler: H)
    where
        H: Fn(S, PathParams, Request) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Response>> + Send + 'static,
    {
        let pattern = compile_template(template);
        self.routes.push(Route {
            method,
            pattern,
            handler: Box::new(move |state, params, request| {
                Box::pin(handler(state, params, request))
            }),
        });
    }

    /// Dispatch a request to the first route matching its method and path
    ///
    /// Captured path segments are handed to the handler as [`PathParams`].
    /// A mismatched method counts the same as a mismatched path, and a
    /// request matching no route gets a not-found response without any
    /// handler running.
    pub async fn dispatch(&self, state: S, request: Request) -> Response {
        let path = request.uri().path().to_string();

        for route in &self.routes {
            if route.method != *request.method() {
                continue;
            }
            if let Some(captures) = route.pattern.captures(&path) {
                let params = PathParams::from_captures(&route.pattern, &captures);
                return match (route.handler)(state, params, request).await {
                    Ok(response) => response,
                    Err(error) => error.into_response(),
                };
            }
        }

        not_found()
    }

    /// Number of registered routes
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Whether no routes are registered
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

impl<S> Default for PathRouter<S> {
    fn default() -> Self {
        Self::new()
    }
}

/// Compile a path template into an anchored pattern with named captures
fn compile_template(template: &str) -> Regex {
    let pattern = format!("^{}$", template)
        .replace("{id}", "(?P<id>[0-9]+)")
        .replace("{slug}", "(?P<slug>[^/]+)");

    match Regex::new(&pattern) {
        Ok(compiled) => compiled,
        Err(error) => panic!("invalid route template '{}': {}", template, error),
    }
}

/// Response returned when no route matches
fn not_found() -> Response {
    let body = Json(ErrorResponse {
        error: "not found".to_string(),
    });
    (StatusCode::NOT_FOUND, body).into_response()
}
