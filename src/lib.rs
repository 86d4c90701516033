//! HTTP gateway for Lambda-style function backends.
//!
//! Every inbound HTTP request becomes one `Function.Invoke` call carrying an
//! API-gateway style proxy event; the function's proxy response is written
//! back as the HTTP response.

pub mod config;
pub mod event;
pub mod http;
pub mod invoke;
pub mod lifecycle;
pub mod observability;

pub use config::schema::GatewayConfig;
pub use event::{ProxyRequest, ProxyResponse};
pub use http::HttpServer;
pub use invoke::InvocationClient;
pub use lifecycle::Shutdown;
