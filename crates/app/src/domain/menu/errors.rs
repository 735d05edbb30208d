//! Menu service errors.

use thiserror::Error;

use crate::backend::rest::{RestError, codes};

#[derive(Debug, Error)]
pub enum MenuServiceError {
    #[error("menu item already exists")]
    AlreadyExists,

    #[error("menu entry not found")]
    NotFound,

    #[error("related resource not found")]
    InvalidReference,

    #[error("missing required field: {0}")]
    MissingRequiredData(&'static str),

    #[error("invalid price value")]
    InvalidPrice,

    #[error("invalid data")]
    InvalidData,

    #[error("backend error")]
    Backend(#[source] RestError),
}

impl From<RestError> for MenuServiceError {
    fn from(error: RestError) -> Self {
        let code = error.code().map(str::to_owned);

        match code.as_deref() {
            Some(codes::UNIQUE_VIOLATION) => Self::AlreadyExists,
            Some(codes::FOREIGN_KEY_VIOLATION) => Self::InvalidReference,
            Some(codes::NOT_NULL_VIOLATION) => Self::MissingRequiredData("column"),
            Some(codes::CHECK_VIOLATION | codes::INVALID_TEXT_REPRESENTATION) => Self::InvalidData,
            Some(_) | None => Self::Backend(error),
        }
    }
}
