//! HTTP handlers for the catalog page and its form endpoints

pub mod books;
pub mod health;
pub mod openapi;

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};

use crate::{error::AppError, models::Outcome};

/// 302 redirect to `location`
pub fn redirect_found(location: &str) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location.to_string())]).into_response()
}

/// Redirect back to the catalog page tagged with `outcome`
pub fn redirect_outcome(outcome: Outcome) -> Response {
    redirect_found(&outcome.location(None))
}

/// Redirect back to the catalog page carrying the error text
pub fn redirect_error(err: &AppError) -> Response {
    redirect_found(&Outcome::Error.location(Some(&err.to_string())))
}
