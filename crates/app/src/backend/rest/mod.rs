//! REST backend
//!
//! Tables are exposed at `{base}/rest/v1/{table}`; filters travel in the query
//! string (`column=eq.value`, `column=in.(a,b)`), ordering as
//! `order=column.asc`, and writes ask for the affected rows back with
//! `Prefer: return=representation`.

use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

mod client;
mod menu;
mod orders;
mod query;
mod rows;

pub use client::{RestBackend, RestConfig};
pub(crate) use query::{Direction, Query};

/// Postgres error codes surfaced through the REST layer.
pub(crate) mod codes {
    pub(crate) const NOT_NULL_VIOLATION: &str = "23502";
    pub(crate) const FOREIGN_KEY_VIOLATION: &str = "23503";
    pub(crate) const UNIQUE_VIOLATION: &str = "23505";
    pub(crate) const CHECK_VIOLATION: &str = "23514";
    pub(crate) const INVALID_TEXT_REPRESENTATION: &str = "22P02";
}

/// Errors that can occur when talking to the REST backend.
#[derive(Debug, Error)]
pub enum RestError {
    /// An HTTP transport or serialization error occurred.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend answered with a non-2xx status.
    #[error("backend rejected request with status {status}: {message}")]
    Rejected {
        status: StatusCode,
        code: Option<String>,
        message: String,
    },

    /// The backend answered successfully but not with what was asked for.
    #[error("unexpected response from backend: {0}")]
    UnexpectedResponse(String),
}

impl RestError {
    /// Postgres error code of a rejected request, if the backend sent one.
    pub fn code(&self) -> Option<&str> {
        match self {
            Self::Rejected { code, .. } => code.as_deref(),
            Self::Http(_) | Self::UnexpectedResponse(_) => None,
        }
    }

    pub(crate) fn rejected(status: StatusCode, body: &str) -> Self {
        #[derive(Deserialize)]
        struct ErrorBody {
            code: Option<String>,
            message: Option<String>,
        }

        match serde_json::from_str::<ErrorBody>(body) {
            Ok(parsed) => Self::Rejected {
                status,
                code: parsed.code,
                message: parsed.message.unwrap_or_else(|| body.to_string()),
            },
            Err(_unparsed) => Self::Rejected {
                status,
                code: None,
                message: body.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejected_bodies_keep_the_postgres_code() {
        let error = RestError::rejected(
            StatusCode::CONFLICT,
            r#"{"code":"23503","details":null,"hint":null,"message":"insert or update violates foreign key constraint"}"#,
        );

        assert_eq!(error.code(), Some(codes::FOREIGN_KEY_VIOLATION));
        assert!(error.to_string().contains("foreign key"), "{error}");
    }

    #[test]
    fn unparsable_bodies_are_kept_verbatim() {
        let error = RestError::rejected(StatusCode::BAD_GATEWAY, "upstream down");

        assert_eq!(error.code(), None);
        assert!(error.to_string().contains("upstream down"), "{error}");
    }
}
