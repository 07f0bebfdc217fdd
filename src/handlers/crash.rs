//! Always fails, to demonstrate error rendering.

use crate::error::AppError;

pub const CRASH_MESSAGE: &str = "Expected: controller used to showcase what happens when an exception is thrown";

pub async fn trigger_exception() -> Result<(), AppError> {
    Err(AppError::Internal(CRASH_MESSAGE.to_string()))
}
