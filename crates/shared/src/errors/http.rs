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
    Forbidden(String),
    NotFound(String),
    Conflict(String),
    Upstream {
        status: StatusCode,
        message: String,
    },
    Internal {
        message: String,
        detail: String,
    },
}

impl From<ServiceError> for HttpError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::MissingToken | ServiceError::InvalidToken | ServiceError::TokenExpired => {
                HttpError::Unauthorized(err.to_string())
            }

            ServiceError::Forbidden(msg) => HttpError::Forbidden(msg),

            ServiceError::Validation(errors) => HttpError::BadRequest(errors.join("; ")),

            ServiceError::EmptyCart => HttpError::BadRequest(err.to_string()),

            ServiceError::NotFound(msg) => HttpError::NotFound(msg),

            ServiceError::Upstream { status, message } => {
                let status = status
                    .and_then(|code| StatusCode::from_u16(code).ok())
                    .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
                HttpError::Upstream { status, message }
            }

            ServiceError::Repo(repo_err) => match repo_err {
                RepositoryError::NotFound => HttpError::NotFound("Not found".into()),
                RepositoryError::Conflict(msg) => HttpError::Conflict(msg),
                other => HttpError::Internal {
                    message: "Repository error".into(),
                    detail: format!("{other:?}"),
                },
            },

            ServiceError::Internal(msg) => HttpError::Internal {
                message: "Internal server error".into(),
                detail: msg,
            },
        }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let (status, message, detail) = match self {
            HttpError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg, None),
            HttpError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg, None),
            HttpError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg, None),
            HttpError::NotFound(msg) => (StatusCode::NOT_FOUND, msg, None),
            HttpError::Conflict(msg) => (StatusCode::CONFLICT, msg, None),
            HttpError::Upstream { status, message } => (status, message, None),
            HttpError::Internal { message, detail } => {
                error!("❌ {message}: {detail}");
                (StatusCode::INTERNAL_SERVER_ERROR, message, Some(detail))
            }
        };

        let body = Json(ErrorResponse {
            status: "error".into(),
            message,
            detail: detail.filter(|_| cfg!(debug_assertions)),
        });

        (status, body).into_response()
    }
}
