//! Orders service errors.

use thiserror::Error;

use crate::backend::rest::{RestError, codes};

#[derive(Debug, Error)]
pub enum OrdersServiceError {
    #[error("order not found")]
    NotFound,

    #[error("related resource not found")]
    InvalidReference,

    #[error("invalid data")]
    InvalidData,

    #[error("backend error")]
    Backend(#[source] RestError),
}

impl From<RestError> for OrdersServiceError {
    fn from(error: RestError) -> Self {
        let code = error.code().map(str::to_owned);

        match code.as_deref() {
            Some(codes::FOREIGN_KEY_VIOLATION) => Self::InvalidReference,
            Some(
                codes::NOT_NULL_VIOLATION
                | codes::CHECK_VIOLATION
                | codes::INVALID_TEXT_REPRESENTATION,
            ) => Self::InvalidData,
            Some(_) | None => Self::Backend(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use reqwest::StatusCode;

    use super::*;

    #[test]
    fn foreign_key_violations_are_invalid_references() {
        let error = RestError::rejected(StatusCode::CONFLICT, r#"{"code":"23503","message":"fk"}"#);

        assert!(matches!(
            OrdersServiceError::from(error),
            OrdersServiceError::InvalidReference
        ));
    }

    #[test]
    fn unknown_rejections_stay_backend_errors() {
        let error = RestError::rejected(StatusCode::INTERNAL_SERVER_ERROR, "boom");

        assert!(matches!(
            OrdersServiceError::from(error),
            OrdersServiceError::Backend(_)
        ));
    }
}
