//! Line-delimited JSON-RPC framing.
//!
//! Each message is one JSON object followed by `\n`:
//! ```text
//! → {"method":"Function.Invoke","params":[<InvokeRequest>],"id":0}
//! ← {"id":0,"result":<InvokeResponse>,"error":null}
//! ```
//! A connection carries exactly one call.

use futures_util::{SinkExt, StreamExt};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tokio::net::TcpStream;
use tokio_util::codec::{Framed, LinesCodec};

use crate::invoke::error::InvokeError;

/// Remote method executing a function.
pub const INVOKE_METHOD: &str = "Function.Invoke";

/// Sequence number of the single call made on each connection.
pub const CALL_ID: u64 = 0;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RpcRequest<P> {
    pub method: String,
    pub params: [P; 1],
    pub id: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RpcReply<R> {
    pub id: u64,
    pub result: Option<R>,
    pub error: Option<serde_json::Value>,
}

impl<R> RpcReply<R> {
    pub fn ok(id: u64, result: R) -> Self {
        Self {
            id,
            result: Some(result),
            error: None,
        }
    }

    pub fn err(id: u64, message: impl Into<String>) -> Self {
        Self {
            id,
            result: None,
            error: Some(serde_json::Value::String(message.into())),
        }
    }
}

/// Codec for one side of the connection.
pub fn codec(max_frame_bytes: usize) -> LinesCodec {
    LinesCodec::new_with_max_length(max_frame_bytes)
}

/// Issue a single call on `stream` and wait for its reply.
pub async fn call<P, R>(
    stream: TcpStream,
    method: &str,
    params: P,
    max_frame_bytes: usize,
) -> Result<R, InvokeError>
where
    P: Serialize,
    R: DeserializeOwned,
{
    let mut framed = Framed::new(stream, codec(max_frame_bytes));

    let request = RpcRequest {
        method: method.to_string(),
        params: [params],
        id: CALL_ID,
    };
    let line = serde_json::to_string(&request).map_err(InvokeError::Serialize)?;
    framed.send(line).await?;

    let line = match framed.next().await {
        Some(line) => line?,
        None => return Err(InvokeError::ConnectionClosed),
    };
    let reply: RpcReply<R> = serde_json::from_str(&line).map_err(InvokeError::MalformedReply)?;

    if reply.id != CALL_ID {
        return Err(InvokeError::UnexpectedReply {
            expected: CALL_ID,
            got: reply.id,
        });
    }
    if let Some(error) = reply.error {
        let message = match error {
            serde_json::Value::String(message) => message,
            other => other.to_string(),
        };
        return Err(InvokeError::Rpc(message));
    }
    reply.result.ok_or(InvokeError::EmptyReply)
}
