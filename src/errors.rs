use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use thiserror::Error;

use crate::domain::errors::DomainError;

/// Failure surfaced to the operator as a JSON notification.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    ConfirmationRequired(String),

    #[error("{0}")]
    Upstream(String),
}

impl From<DomainError> for AppError {
    fn from(e: DomainError) -> Self {
        let msg = e.to_string();
        match e {
            DomainError::OrderNotFound(_) => AppError::NotFound(msg),
            DomainError::InvalidInput(_) => AppError::BadRequest(msg),
            DomainError::InvalidTransition { .. } => AppError::Conflict(msg),
            DomainError::CancellationNotConfirmed => AppError::ConfirmationRequired(msg),
            DomainError::MalformedResponse(_) | DomainError::Transport(_) | DomainError::Rejected(_) => {
                AppError::Upstream(msg)
            }
        }
    }
}

impl actix_web::ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::ConfirmationRequired(_) => StatusCode::PRECONDITION_REQUIRED,
            AppError::Upstream(_) => StatusCode::BAD_GATEWAY,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::Upstream(msg) => log::error!("{}", msg),
            other => log::warn!("{}", other),
        }
        HttpResponse::build(self.status_code()).json(serde_json::json!({
            "error": self.to_string()
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::status::AdminStatus;
    use actix_web::ResponseError;

    #[test]
    fn not_found_returns_404() {
        let err: AppError = DomainError::OrderNotFound("DH9".to_string()).into();
        assert_eq!(err.error_response().status(), StatusCode::NOT_FOUND);
        assert_eq!(err.to_string(), "Order not found: DH9");
    }

    #[test]
    fn invalid_transition_returns_409() {
        let err: AppError = DomainError::InvalidTransition {
            from: AdminStatus::Completed,
            to: AdminStatus::Pending,
        }
        .into();
        assert_eq!(err.error_response().status(), StatusCode::CONFLICT);
        assert_eq!(err.to_string(), "Invalid transition: completed -> pending");
    }

    #[test]
    fn unconfirmed_cancellation_returns_428() {
        let err: AppError = DomainError::CancellationNotConfirmed.into();
        assert_eq!(err.error_response().status(), StatusCode::PRECONDITION_REQUIRED);
    }

    #[test]
    fn invalid_input_returns_400() {
        let err: AppError = DomainError::InvalidInput("unknown status 'x'".to_string()).into();
        assert_eq!(err.error_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn backend_failures_return_502() {
        for e in [
            DomainError::MalformedResponse("missing data".to_string()),
            DomainError::Transport("timed out".to_string()),
            DomainError::Rejected("error".to_string()),
        ] {
            let err: AppError = e.into();
            assert!(matches!(err, AppError::Upstream(_)));
            assert_eq!(err.error_response().status(), StatusCode::BAD_GATEWAY);
        }
    }

    #[test]
    fn rejected_display_keeps_backend_message() {
        let err: AppError = DomainError::Rejected("Trạng thái không hợp lệ".to_string()).into();
        assert_eq!(
            err.to_string(),
            "Order service rejected the update: Trạng thái không hợp lệ"
        );
    }
}
