use axum::extract::FromRequest;

use crate::error::AppError;

/// `Json` extractor whose rejections use the `{"error": ...}` body with a 400.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);
