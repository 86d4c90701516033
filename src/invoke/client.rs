//! Invocation client: one synchronous call to the function backend per request.

use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use tokio::net::TcpStream;

use crate::config::BackendConfig;
use crate::event::{ProxyRequest, ProxyResponse};
use crate::invoke::envelope::{InvokeRequest, InvokeResponse};
use crate::invoke::error::InvokeError;
use crate::invoke::rpc::{self, INVOKE_METHOD};

/// Sends gateway events to a single backend address.
///
/// Holds no connection: every [`invoke`](Self::invoke) dials the backend,
/// makes one call and drops the socket.
#[derive(Debug, Clone)]
pub struct InvocationClient {
    address: String,
    timeout: Option<Duration>,
    max_frame_bytes: usize,
}

impl InvocationClient {
    pub fn new(config: &BackendConfig) -> Self {
        Self {
            address: config.address.clone(),
            timeout: config.invoke_timeout(),
            max_frame_bytes: config.max_frame_bytes,
        }
    }

    /// Backend address this client dials.
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Invoke the function with `request` and decode its response.
    ///
    /// Without a configured timeout the envelope deadline is the current time
    /// and the call waits for the backend indefinitely.
    pub async fn invoke(&self, request: &ProxyRequest) -> Result<ProxyResponse, InvokeError> {
        let payload = serde_json::to_vec(request).map_err(InvokeError::Serialize)?;
        let envelope = InvokeRequest::new(payload, self.deadline(Utc::now()));

        tracing::debug!(
            request_id = %envelope.request_id,
            backend = %self.address,
            payload_bytes = envelope.payload.len(),
            "Invoking function"
        );

        let reply = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, self.call(envelope))
                .await
                .map_err(|_| InvokeError::Timeout(limit))??,
            None => self.call(envelope).await?,
        };

        if let Some(error) = reply.error {
            return Err(InvokeError::Function {
                message: error.message,
                kind: error.kind,
            });
        }

        serde_json::from_slice(&reply.payload).map_err(InvokeError::Deserialize)
    }

    async fn call(&self, envelope: InvokeRequest) -> Result<InvokeResponse, InvokeError> {
        let stream = TcpStream::connect(&self.address)
            .await
            .map_err(|source| InvokeError::Connect {
                address: self.address.clone(),
                source,
            })?;
        rpc::call(stream, INVOKE_METHOD, envelope, self.max_frame_bytes).await
    }

    fn deadline(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        self.timeout
            .and_then(|limit| TimeDelta::from_std(limit).ok())
            .and_then(|limit| now.checked_add_signed(limit))
            .unwrap_or(now)
    }
}
