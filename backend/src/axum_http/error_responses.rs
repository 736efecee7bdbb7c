use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::usecases::{
    admin_businesses::AdminBusinessError, business_profile::BusinessProfileError,
    gallery::GalleryError, highlights::HighlightError, public_directory::PublicDirectoryError,
};

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub code: u16,
    pub message: String,
}

pub fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    let body = Json(ErrorResponse {
        code: status.as_u16(),
        message: message.into(),
    });

    (status, body).into_response()
}

fn usecase_error_response(status: StatusCode, err: &dyn std::error::Error) -> Response {
    // Don't leak internal error detail to client
    let message = if status.is_server_error() {
        "Internal server error".to_string()
    } else {
        err.to_string()
    };

    error_response(status, message)
}

impl IntoResponse for HighlightError {
    fn into_response(self) -> Response {
        usecase_error_response(self.status_code(), &self)
    }
}

impl IntoResponse for BusinessProfileError {
    fn into_response(self) -> Response {
        usecase_error_response(self.status_code(), &self)
    }
}

impl IntoResponse for GalleryError {
    fn into_response(self) -> Response {
        usecase_error_response(self.status_code(), &self)
    }
}

impl IntoResponse for PublicDirectoryError {
    fn into_response(self) -> Response {
        usecase_error_response(self.status_code(), &self)
    }
}

impl IntoResponse for AdminBusinessError {
    fn into_response(self) -> Response {
        usecase_error_response(self.status_code(), &self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crates::domain::value_objects::plans::Capability;

    #[test]
    fn internal_errors_are_masked() {
        let response =
            HighlightError::Internal(anyhow::anyhow!("password=hunter2")).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn domain_errors_keep_their_status() {
        assert_eq!(
            HighlightError::CapabilityDenied(Capability::HighlightRequest)
                .into_response()
                .status(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            HighlightError::AlreadyRequested.into_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            GalleryError::LimitReached(5).into_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            BusinessProfileError::DuplicateName.into_response().status(),
            StatusCode::CONFLICT
        );
    }
}
