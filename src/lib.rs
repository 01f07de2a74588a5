//! Toolcrib Equipment Checkout Tracking System
//!
//! A Rust implementation of the Toolcrib equipment tracking server,
//! providing a REST JSON API for checking finite-quantity equipment out to
//! approved holders and back in, with a full audit trail.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}
