//! Function invocation subsystem.
//!
//! # Data Flow
//! ```text
//! ProxyRequest
//!     → client.rs (JSON payload, fresh request id, deadline)
//!     → envelope.rs (InvokeRequest wrapper)
//!     → rpc.rs (one "Function.Invoke" call over a fresh TCP connection)
//!     ← InvokeResponse (payload or function error)
//!     → ProxyResponse
//! ```
//!
//! # Design Decisions
//! - One connection per invocation; nothing is pooled or retried
//! - The only state is the immutable backend address and limits
//! - Every failure becomes an [`InvokeError`]; callers decide the HTTP status

pub mod client;
pub mod envelope;
pub mod error;
pub mod rpc;

pub use client::InvocationClient;
pub use envelope::{InvokeRequest, InvokeResponse, InvokeResponseError, StackFrame, Timestamp};
pub use error::InvokeError;
pub use rpc::{RpcReply, RpcRequest, INVOKE_METHOD};
