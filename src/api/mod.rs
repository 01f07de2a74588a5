//! API handlers for Toolcrib REST endpoints

pub mod equipment;
pub mod health;
pub mod history;
pub mod holders;
pub mod loans;
pub mod openapi;

use axum::extract::FromRequest;

use crate::error::AppError;

/// Request-body extractor that routes malformed JSON (including unknown
/// enum values such as a bad `condition`) through the application error
/// type, so it surfaces as a 400 validation error rather than axum's
/// default 422 rejection.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ValidJson<T>(pub T);
