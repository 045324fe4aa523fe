use crate::errors::{error::ErrorResponse, repository::RepositoryError, service::ServiceError};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::error;

#[derive(Debug)]
pub enum HttpError {
    BadRequest(String),
    Unauthorized(String),
    NotFound(String),
    Internal(String),
}

impl HttpError {
    pub fn status(&self) -> StatusCode {
        match self {
            HttpError::BadRequest(_) => StatusCode::BAD_REQUEST,
            HttpError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            HttpError::NotFound(_) => StatusCode::NOT_FOUND,
            HttpError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ServiceError> for HttpError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Checkout(reason) => HttpError::BadRequest(reason.to_string()),

            ServiceError::Validation(errors) => {
                HttpError::BadRequest(format!("invalid payload: {}", errors.join("; ")))
            }

            ServiceError::InvalidCredentials => {
                HttpError::BadRequest("not found, invalid email or password".into())
            }

            ServiceError::AlreadyExists(msg) => HttpError::BadRequest(msg),

            ServiceError::NotFound(msg) => HttpError::NotFound(msg),

            ServiceError::Repo(RepositoryError::NotFound) => HttpError::NotFound("not found".into()),

            ServiceError::Repo(repo_err) => {
                error!("❌ Storage failure: {repo_err}");
                HttpError::Internal("internal storage error".into())
            }

            ServiceError::Bcrypt(err) => {
                error!("❌ Password hashing failure: {err}");
                HttpError::Internal("internal authentication error".into())
            }

            ServiceError::Jwt(_) | ServiceError::TokenExpired => {
                HttpError::Unauthorized("permission denied".into())
            }
        }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let status = self.status();
        let msg = match self {
            HttpError::BadRequest(msg)
            | HttpError::Unauthorized(msg)
            | HttpError::NotFound(msg)
            | HttpError::Internal(msg) => msg,
        };

        (status, Json(ErrorResponse::new(msg))).into_response()
    }
}
