//! Invocation error taxonomy.

use std::time::Duration;

use tokio_util::codec::LinesCodecError;

/// Everything that can go wrong between handing a request to the client and
/// getting a decoded response back.
#[derive(Debug, thiserror::Error)]
pub enum InvokeError {
    #[error("failed to encode invocation: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("failed to connect to {address}: {source}")]
    Connect {
        address: String,
        #[source]
        source: std::io::Error,
    },

    #[error("transport error: {0}")]
    Transport(#[from] LinesCodecError),

    #[error("backend closed the connection before replying")]
    ConnectionClosed,

    #[error("malformed reply from backend: {0}")]
    MalformedReply(#[source] serde_json::Error),

    #[error("reply id {got} does not match call id {expected}")]
    UnexpectedReply { expected: u64, got: u64 },

    #[error("backend rpc error: {0}")]
    Rpc(String),

    #[error("backend reply carried no result")]
    EmptyReply,

    #[error("function error ({kind}): {message}")]
    Function { message: String, kind: String },

    #[error("failed to decode function response: {0}")]
    Deserialize(#[source] serde_json::Error),

    #[error("invocation timed out after {0:?}")]
    Timeout(Duration),
}

impl InvokeError {
    /// Short label for metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            InvokeError::Serialize(_) => "serialize",
            InvokeError::Connect { .. } => "connect",
            InvokeError::Transport(_)
            | InvokeError::ConnectionClosed
            | InvokeError::MalformedReply(_)
            | InvokeError::UnexpectedReply { .. }
            | InvokeError::EmptyReply => "transport",
            InvokeError::Rpc(_) => "rpc",
            InvokeError::Function { .. } => "function",
            InvokeError::Deserialize(_) => "deserialize",
            InvokeError::Timeout(_) => "timeout",
        }
    }
}
