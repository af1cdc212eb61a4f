use thiserror::Error;

use super::status::AdminStatus;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Order not found: {0}")]
    OrderNotFound(String),
    #[error("Invalid transition: {from} -> {to}")]
    InvalidTransition { from: AdminStatus, to: AdminStatus },
    #[error("Cancellation was not confirmed")]
    CancellationNotConfirmed,
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Malformed response from order service: {0}")]
    MalformedResponse(String),
    #[error("Order service unreachable: {0}")]
    Transport(String),
    #[error("Order service rejected the update: {0}")]
    Rejected(String),
}
