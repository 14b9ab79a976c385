//! Question/Answer Board
//!
//! A small HTTP service for posting questions, attaching batches of answers
//! to them, and reading or deleting either entity. Requests are dispatched
//! through a pattern-based path router; domain rules live in the board
//! service; persistence sits behind a pair of storage traits.

pub mod api;
pub mod config;
pub mod error;
pub mod model;
pub mod router;
pub mod service;
pub mod storage;

pub use error::{AppError, Result};

use config::Settings;
use service::BoardService;

/// Application state shared across all handlers
pub struct AppState {
    pub settings: Settings,
    pub service: BoardService,
}
