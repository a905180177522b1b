use rocket::{http::Status, response::Responder};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by ledger operations. Every failure is synchronous and
/// aborts the attempted mutation with zero state change; the caller must
/// correct the input, authorization, or phase and resubmit.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A non-admin identity called an admin-only operation.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),
    /// The operation is not valid in the current phase.
    #[error("Invalid state: {0}")]
    InvalidState(String),
    /// Empty name or out-of-range candidate id.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    /// The caller already performed this once-only action.
    #[error("Already done: {0}")]
    AlreadyDone(String),
}

impl<'r, 'o: 'r> Responder<'r, 'o> for Error {
    fn respond_to(self, _: &'r rocket::Request<'_>) -> rocket::response::Result<'o> {
        warn!("{self}");
        Err(match self {
            Self::Unauthorized(_) => Status::Unauthorized,
            Self::InvalidInput(_) => Status::BadRequest,
            Self::InvalidState(_) | Self::AlreadyDone(_) => Status::Conflict,
        })
    }
}
