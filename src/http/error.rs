use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::domain::notification::{FieldError, ValidationErrors};

#[derive(Debug)]
pub struct AppError {
    status: StatusCode,
    message: String,
    details: Vec<FieldError>,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    details: Vec<FieldError>,
}

impl AppError {
    fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            details: Vec::new(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn unprocessable(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNPROCESSABLE_ENTITY, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    pub fn validation(errors: ValidationErrors) -> Self {
        Self {
            details: errors.into_fields(),
            ..Self::unprocessable("validation failed")
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        Self::validation(errors)
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        match &rejection {
            JsonRejection::JsonDataError(_) | JsonRejection::JsonSyntaxError(_) => {
                Self::unprocessable(rejection.body_text())
            }
            _ => Self::new(rejection.status(), rejection.body_text()),
        }
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        match &rejection {
            PathRejection::FailedToDeserializePathParams(_) => {
                Self::unprocessable(rejection.body_text())
            }
            _ => Self::new(rejection.status(), rejection.body_text()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = Json(ErrorResponse {
            error: self.message,
            details: self.details,
        });
        (self.status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::notification::NotificationPayload;

    #[test]
    fn validation_error_is_unprocessable_with_details() {
        let errors = NotificationPayload::default().validate().unwrap_err();
        let err = AppError::from(errors);

        assert_eq!(err.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(err.details.len(), 3);
        assert_eq!(err.details[0].field, "user_id");
    }

    #[test]
    fn plain_errors_omit_details() {
        let body = serde_json::to_value(ErrorResponse {
            error: "notification not found".into(),
            details: Vec::new(),
        })
        .unwrap();
        assert_eq!(body, serde_json::json!({ "error": "notification not found" }));
    }

    #[test]
    fn into_response_keeps_status() {
        let response = AppError::not_found("notification not found").into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
