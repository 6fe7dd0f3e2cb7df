//! Error handling - every failure leaves as a result-code envelope.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use postboard_core::{DomainError, RepoError};
use postboard_shared::ApiResponse;
use thiserror::Error;
use validator::ValidationErrors;

use super::result_code::ResultCode;

/// Application-level error type, the only place faults become HTTP.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Validation errors: {0:?}")]
    Validation(Vec<String>),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    fn result_code(&self) -> &'static str {
        match self {
            AppError::NotFound(_) => "404-1",
            AppError::BadRequest(_) | AppError::Validation(_) => "400-1",
            AppError::Internal(_) => "500-1",
        }
    }

    fn message(&self) -> String {
        match self {
            AppError::NotFound(msg) | AppError::BadRequest(msg) => msg.clone(),
            AppError::Validation(errors) => errors.join("\n"),
            AppError::Internal(_) => "서버 오류가 발생했습니다.".to_string(),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) | AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if let AppError::Internal(detail) = self {
            tracing::error!("Internal error: {}", detail);
        }

        let body = ApiResponse::<()>::new(self.result_code(), self.message());
        let mut res = HttpResponse::build(self.status_code()).json(body);
        res.extensions_mut()
            .insert(ResultCode(self.result_code().to_string()));
        res
    }
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::NotFound { id, .. } => {
                AppError::NotFound(format!("{}번 글이 존재하지 않습니다.", id))
            }
            DomainError::Repo(err) => err.into(),
        }
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound => AppError::NotFound("해당 글이 존재하지 않습니다.".to_string()),
            RepoError::Constraint(msg) => {
                AppError::Internal(format!("Constraint violation: {msg}"))
            }
            RepoError::Connection(msg) => {
                tracing::error!("Database connection error: {}", msg);
                AppError::Internal("Database error".to_string())
            }
            RepoError::Query(msg) => {
                tracing::error!("Database query error: {}", msg);
                AppError::Internal("Database error".to_string())
            }
        }
    }
}

/// Field errors become `<field>-<code>-<message>` lines, sorted.
impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        let mut lines: Vec<String> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| {
                    format!(
                        "{}-{}-{}",
                        field,
                        e.code,
                        e.message.as_deref().unwrap_or("invalid value")
                    )
                })
            })
            .collect();
        lines.sort();
        AppError::Validation(lines)
    }
}

/// Result type alias for handlers.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use actix_web::body::to_bytes;

    use super::*;

    async fn body_of(err: AppError) -> (StatusCode, serde_json::Value) {
        let res = err.error_response();
        let status = res.status();
        let bytes = to_bytes(res.into_body()).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[actix_web::test]
    async fn not_found_domain_error_names_the_post() {
        let err: AppError = DomainError::NotFound {
            entity_type: "Post",
            id: 9,
        }
        .into();

        let (status, body) = body_of(err).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["resultCode"], "404-1");
        assert_eq!(body["msg"], "9번 글이 존재하지 않습니다.");
        assert!(body.get("data").is_none());
    }

    #[actix_web::test]
    async fn store_failure_hides_details() {
        let err: AppError = DomainError::Repo(RepoError::Query("relation missing".into())).into();

        let (status, body) = body_of(err).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["resultCode"], "500-1");
        assert!(!body["msg"].as_str().unwrap().contains("relation"));
    }

    #[actix_web::test]
    async fn validation_errors_are_joined_per_field() {
        let (status, body) = body_of(AppError::Validation(vec![
            "content-length-too long".into(),
            "title-length-too short".into(),
        ]))
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["resultCode"], "400-1");
        assert_eq!(body["msg"], "content-length-too long\ntitle-length-too short");
    }
}
