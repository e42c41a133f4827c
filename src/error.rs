use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde_json::json;
use thiserror::Error;

/// Application error taxonomy, mapped onto HTTP at the single
/// `error_response` choke point so no failure path can skip the
/// user-visible message or the log line.
#[derive(Debug, Error)]
pub enum AppError {
    /// Malformed input, rejected before any database call.
    #[error("{0}")]
    Validation(String),

    /// A state rule stopped the operation (already clocked in, shift
    /// already closed). Reported as a warning, otherwise a no-op.
    #[error("{0}")]
    Logic(String),

    #[error("Incorrect manager password")]
    Unauthorized,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Logic(_) => StatusCode::CONFLICT,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::Config(_) | AppError::Database(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::Validation(m) => {
                tracing::warn!(reason = %m, "Rejected invalid input");
                HttpResponse::BadRequest().json(json!({"error": m}))
            }
            AppError::Logic(m) => {
                tracing::warn!(reason = %m, "Operation stopped by state rule");
                HttpResponse::Conflict().json(json!({"error": m}))
            }
            AppError::Unauthorized => {
                tracing::warn!("Manager gate denied request");
                HttpResponse::Unauthorized().json(json!({"error": self.to_string()}))
            }
            AppError::Config(m) => {
                tracing::error!(detail = %m, "Configuration error");
                HttpResponse::InternalServerError()
                    .json(json!({"error": "Configuration issue", "detail": m}))
            }
            // The sqlx detail goes to the log only, never to the user.
            AppError::Database(e) => {
                tracing::error!(error = %e, "Database operation failed");
                HttpResponse::InternalServerError()
                    .json(json!({"error": "Database operation failed"}))
            }
            AppError::Internal(m) => {
                tracing::error!(detail = %m, "Internal error");
                HttpResponse::InternalServerError()
                    .json(json!({"error": "An internal error occurred"}))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_follow_the_error_taxonomy() {
        assert_eq!(
            AppError::Validation("Employee name cannot be empty".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::Logic("Alice already has an open shift".into()).status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(AppError::Unauthorized.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            AppError::Database(sqlx::Error::PoolClosed).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn database_detail_is_not_leaked_to_the_body() {
        let resp = AppError::Database(sqlx::Error::PoolClosed).error_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = actix_web::body::to_bytes(resp.into_body());
        let body = futures::executor::block_on(body).unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"], "Database operation failed");
    }
}
