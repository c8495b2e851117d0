//! HTTP mapping for API errors.

use aula_auth::AuthError;
use aula_core::ApiError;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

/// Wrapper so [`ApiError`] can be returned straight from handlers.
#[derive(Debug)]
pub struct HttpError(pub ApiError);

impl HttpError {
    fn status(&self) -> StatusCode {
        match self.0 {
            ApiError::InvalidParams { .. } => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden { .. } => StatusCode::FORBIDDEN,
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body = json!({ "error": self.0.client_message() });
        (self.status(), Json(body)).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        Self(err)
    }
}

impl From<AuthError> for HttpError {
    fn from(err: AuthError) -> Self {
        let api = match err {
            AuthError::InsufficientRole { .. } => ApiError::forbidden(err.to_string()),
            AuthError::Missing | AuthError::Invalid(_) | AuthError::Expired => {
                ApiError::unauthorized(err.to_string())
            }
        };
        Self(api)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_params_is_400() {
        let err = HttpError(ApiError::invalid_params("sessionId es requerido"));
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn unauthorized_is_401() {
        let err = HttpError::from(AuthError::Missing);
        assert_eq!(err.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn expired_token_is_401() {
        let err = HttpError::from(AuthError::Expired);
        assert_eq!(err.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn insufficient_role_is_403() {
        let err = HttpError::from(AuthError::InsufficientRole {
            role: "student".into(),
        });
        assert_eq!(err.status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn internal_is_500_and_sanitized() {
        let err = HttpError(ApiError::Internal {
            message: "secret path /etc/aula".into(),
        });
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.0.client_message(), "Internal error");
    }
}
