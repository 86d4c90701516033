//! Gateway error → HTTP status mapping.
//!
//! The client only ever sees a short fixed message; the full error goes to
//! the log.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::invoke::InvokeError;

pub const READ_BODY_MESSAGE: &str = "Error reading body";
pub const INVOKE_MESSAGE: &str = "Error invoking lambda";
pub const DECODE_BODY_MESSAGE: &str = "Error base64-decoding response body";
pub const INVALID_RESPONSE_MESSAGE: &str = "Invalid response from lambda";

/// Anything that ends a request before a function response is written.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("failed to read request body: {0}")]
    ReadBody(#[source] axum::Error),

    #[error(transparent)]
    Invoke(#[from] InvokeError),

    #[error("failed to base64-decode response body: {0}")]
    InvalidBody(#[source] base64::DecodeError),

    #[error("function returned invalid status code {0}")]
    InvalidStatus(i64),

    #[error("function returned invalid header {0:?}")]
    InvalidHeader(String),
}

impl GatewayError {
    pub fn status(&self) -> StatusCode {
        match self {
            GatewayError::ReadBody(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Fixed text sent to the client.
    pub fn public_message(&self) -> &'static str {
        match self {
            GatewayError::ReadBody(_) => READ_BODY_MESSAGE,
            GatewayError::Invoke(_) => INVOKE_MESSAGE,
            GatewayError::InvalidBody(_) => DECODE_BODY_MESSAGE,
            GatewayError::InvalidStatus(_) | GatewayError::InvalidHeader(_) => {
                INVALID_RESPONSE_MESSAGE
            }
        }
    }

    /// Short label for metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            GatewayError::ReadBody(_) => "read_body",
            GatewayError::Invoke(err) => err.kind(),
            GatewayError::InvalidBody(_)
            | GatewayError::InvalidStatus(_)
            | GatewayError::InvalidHeader(_) => "response",
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        (self.status(), self.public_message()).into_response()
    }
}
