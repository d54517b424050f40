use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Failure taxonomy for the auth endpoints. Every variant renders as a JSON
/// body `{"message": ...}` with the mapped status code; nothing escapes the
/// handler boundary as a bare status or a stack trace.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("{0}")]
    Validation(String),
    #[error("email already in use")]
    Conflict,
    #[error("{0}")]
    Unauthorized(String),
    #[error("user not found")]
    NotFound,
    #[error("invalid token")]
    MalformedToken,
    #[error("{0}")]
    Internal(String),
}

impl AuthError {
    pub fn status(&self) -> StatusCode {
        match self {
            AuthError::Validation(_) => StatusCode::BAD_REQUEST,
            AuthError::Conflict => StatusCode::BAD_REQUEST,
            AuthError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AuthError::NotFound => StatusCode::NOT_FOUND,
            AuthError::MalformedToken => StatusCode::BAD_REQUEST,
            AuthError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn unauthorized() -> Self {
        AuthError::Unauthorized("unauthorized".into())
    }

    pub fn invalid_credentials() -> Self {
        AuthError::Unauthorized("invalid email or password".into())
    }

    /// Registration collapses every failure to a 400 with the error message.
    pub fn for_register(self) -> Self {
        match self {
            AuthError::Validation(_) | AuthError::Conflict => self,
            other => AuthError::Validation(other.to_string()),
        }
    }
}

impl From<anyhow::Error> for AuthError {
    fn from(e: anyhow::Error) -> Self {
        AuthError::Internal(e.to_string())
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(json!({ "message": self.to_string() }));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping() {
        assert_eq!(
            AuthError::Validation("x".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(AuthError::Conflict.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            AuthError::unauthorized().status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(AuthError::NotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(AuthError::MalformedToken.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn register_collapses_internal_to_400() {
        let err = AuthError::Internal("db down".into()).for_register();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "db down");
    }

    #[test]
    fn invalid_credentials_message() {
        assert_eq!(
            AuthError::invalid_credentials().to_string(),
            "invalid email or password"
        );
    }
}
