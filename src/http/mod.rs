//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, single catch-all handler)
//!     → request.rs (HTTP request → ProxyRequest)
//!     → invoke::InvocationClient (one backend call)
//!     → response.rs (ProxyResponse → HTTP response)
//!     → Send to client
//!
//! Any failure along the way:
//!     → error.rs (GatewayError → 400/500 with a fixed message)
//! ```

pub mod error;
pub mod request;
pub mod response;
pub mod server;

pub use error::GatewayError;
pub use server::{AppState, HttpServer};
