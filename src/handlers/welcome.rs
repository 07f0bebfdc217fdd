use crate::error::AppError;
use crate::response::render;
use crate::views::WelcomePage;
use axum::{http::Uri, response::Html};

pub async fn welcome() -> Result<Html<String>, AppError> {
    render(&WelcomePage)
}

/// Fallback for unmatched paths.
pub async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(format!("No handler found for {}", uri.path()))
}
