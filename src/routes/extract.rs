use axum::extract::{rejection::JsonRejection, FromRequest, Request};

use crate::error::AppError;

/// JSON body extractor whose rejections surface as validation errors
///
/// axum's own `Json` rejects malformed bodies (missing fields, type
/// mismatches, wrong content type) with 422/415 plain-text responses
/// before any handler runs. Body-shape failures are input validation
/// here, so they go through `AppError` as 400 with the `{"message"}`
/// envelope like every other invalid field.
pub struct AppJson<T>(pub T);

impl<S, T> FromRequest<S> for AppJson<T>
where
    axum::Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match axum::Json::<T>::from_request(req, state).await {
            Ok(axum::Json(value)) => Ok(AppJson(value)),
            Err(rejection) => Err(AppError::Validation(rejection.body_text())),
        }
    }
}
