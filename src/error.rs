use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};

use serde::Serialize;
use serde_json::json;

use thiserror::Error;

use crate::store::StoreError;

pub type RestResult<T> = Result<T, RestError>;

/// A single rejected request field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    /// Location of the field, e.g. `["body", "email"]`
    pub loc: Vec<String>,
    pub msg: String,
}

impl FieldError {
    pub fn body(field: &str, msg: impl Into<String>) -> Self {
        Self {
            loc: vec!["body".into(), field.into()],
            msg: msg.into(),
        }
    }

    /// An error about the request body as a whole
    pub fn whole_body(msg: impl Into<String>) -> Self {
        Self {
            loc: vec!["body".into()],
            msg: msg.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum RestError {
    #[error("Validation Error: {0:?}")]
    Validation(Vec<FieldError>),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Document store unavailable")]
    StoreUnavailable(#[source] StoreError),

    #[error("Internal Server Error: {0}")]
    Internal(String),
}

impl From<StoreError> for RestError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::Unavailable(_) => {
                tracing::error!(error.cause_chain = ?e, "Document store request failed");
                Self::StoreUnavailable(e)
            }
            StoreError::Duplicate { .. } => Self::Conflict("Email already subscribed".into()),
            StoreError::Malformed(_) => {
                tracing::error!(error.cause_chain = ?e, "Failed to map a stored document");
                Self::Internal("Malformed document".into())
            }
        }
    }
}

impl ResponseError for RestError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Conflict(_) => StatusCode::BAD_REQUEST,
            Self::StoreUnavailable(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self {
            Self::Validation(errors) => json!({ "detail": errors }),
            Self::Conflict(msg) => json!({ "detail": msg }),
            Self::StoreUnavailable(_) | Self::Internal(_) => {
                json!({ "detail": "Internal Server Error" })
            }
        };
        HttpResponse::build(self.status_code()).json(body)
    }
}
