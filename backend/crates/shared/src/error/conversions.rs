//! Error conversions - From implementations for common error types
//!
//! Provides automatic conversion from request-decoding errors to [`AppError`],
//! and renders [`AppError`] as the JSON error envelope.

use super::app_error::{AppError, FieldError, INTERNAL_MESSAGE};

// ============================================================================
// validator conversions
// ============================================================================

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut fields: Vec<FieldError> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                let field = field.to_string();
                errs.iter().map(move |e| {
                    let message = e
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("{} is invalid", field));
                    FieldError::new(field.clone(), message)
                })
            })
            .collect();

        // HashMap order is random; keep the envelope stable
        fields.sort_by(|a, b| a.field.cmp(&b.field));

        AppError::validation(fields)
    }
}

// ============================================================================
// Axum conversions (feature-gated)
// ============================================================================

#[cfg(feature = "axum")]
impl From<axum::extract::rejection::JsonRejection> for AppError {
    fn from(rejection: axum::extract::rejection::JsonRejection) -> Self {
        AppError::bad_request("invalid request body").with_source(rejection)
    }
}

#[cfg(feature = "axum")]
impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::Json;
        use axum::http::StatusCode;

        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        // Server-side detail stays in the logs
        let message = if self.is_server_error() {
            INTERNAL_MESSAGE
        } else {
            self.message()
        };

        let body = if self.fields().is_empty() {
            serde_json::json!({ "error": message })
        } else {
            serde_json::json!({ "error": message, "fields": self.fields() })
        };

        (status, Json(body)).into_response()
    }
}
