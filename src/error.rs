use crate::actix_web::{http::StatusCode, HttpResponse, ResponseError};
use crate::jsonwebtoken::errors::Error as JsonWebTokenError;
use crate::serde::Serialize;
use crate::sqlx::{migrate::MigrateError, Error as SqlxError};
use crate::thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum Error {
    #[error("{0}")]
    Validation(String),

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("database error: {0}")]
    DatabaseError(#[from] SqlxError),

    #[error("migration error: {0}")]
    MigrateError(#[from] MigrateError),

    #[error("storage error: {0}")]
    Storage(String),

    #[error("network error: {0}")]
    Network(String),

    #[error("jwt error: {0}")]
    JWTError(#[from] JsonWebTokenError),

    #[error("unauthorized")]
    Unauthorized,

    #[error("forbidden")]
    Forbidden,

    #[error("business error: {0}")]
    BusinessError(String),

    #[error("dotenv error: {0}")]
    DotEnvError(#[from] crate::dotenv::Error),
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    message: String,
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        match self {
            Error::Validation(_) | Error::BusinessError(_) => StatusCode::BAD_REQUEST,
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            Error::Unauthorized | Error::JWTError(_) => StatusCode::UNAUTHORIZED,
            Error::Forbidden => StatusCode::FORBIDDEN,
            Error::Network(_) => StatusCode::BAD_GATEWAY,
            Error::DatabaseError(_) | Error::MigrateError(_) | Error::Storage(_) | Error::DotEnvError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            log::error!("{}", self);
        }
        HttpResponse::build(status).json(ErrorBody { message: self.to_string() })
    }
}

impl Error {
    /// Whether retrying the same operation later may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Error::DatabaseError(_) | Error::Storage(_) | Error::Network(_))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(Error::Validation("bad".into()).status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(Error::NotFound("quiz").status_code(), StatusCode::NOT_FOUND);
        assert_eq!(Error::Storage("down".into()).status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(Error::Forbidden.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(Error::Unauthorized.status_code(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_retryable() {
        assert!(Error::Storage("down".into()).is_retryable());
        assert!(Error::Network("timeout".into()).is_retryable());
        assert!(!Error::Validation("bad".into()).is_retryable());
        assert!(!Error::NotFound("quiz").is_retryable());
    }

    #[test]
    fn test_not_found_message() {
        assert_eq!(Error::NotFound("quiz").to_string(), "quiz not found");
    }
}
