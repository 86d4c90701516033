//! Shared utilities for integration testing.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use lambda_gateway::invoke::{InvokeRequest, InvokeResponse, InvokeResponseError, RpcReply, RpcRequest};
use lambda_gateway::{GatewayConfig, HttpServer, ProxyRequest, ProxyResponse, Shutdown};
use tokio::net::TcpListener;
use tokio_util::codec::{Framed, LinesCodec};

/// What the mock function does with an invocation.
#[allow(dead_code)]
pub enum Reply {
    /// Return this proxy response.
    Response(ProxyResponse),
    /// Fail with an application-level error.
    FunctionError(String),
    /// Return these raw payload bytes.
    Payload(Vec<u8>),
}

/// Start a programmable mock function backend speaking the invoke RPC.
pub async fn start_function_backend<F>(handler: F) -> SocketAddr
where
    F: Fn(ProxyRequest) -> Reply + Send + Sync + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let handler = Arc::new(handler);

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((socket, _)) => {
                    let handler = handler.clone();
                    tokio::spawn(async move {
                        let mut framed = Framed::new(socket, LinesCodec::new());
                        let Some(Ok(line)) = framed.next().await else {
                            return;
                        };
                        let call: RpcRequest<InvokeRequest> = serde_json::from_str(&line).unwrap();
                        let [envelope] = call.params;
                        let event: ProxyRequest = serde_json::from_slice(&envelope.payload).unwrap();

                        let response = match handler(event) {
                            Reply::Response(response) => InvokeResponse {
                                payload: serde_json::to_vec(&response).unwrap(),
                                error: None,
                            },
                            Reply::FunctionError(message) => InvokeResponse {
                                payload: Vec::new(),
                                error: Some(InvokeResponseError {
                                    message,
                                    kind: "errorString".into(),
                                    ..Default::default()
                                }),
                            },
                            Reply::Payload(payload) => InvokeResponse {
                                payload,
                                error: None,
                            },
                        };

                        let reply = serde_json::to_string(&RpcReply::ok(call.id, response)).unwrap();
                        let _ = framed.send(reply).await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    addr
}

/// Start the gateway on an ephemeral port in front of `backend`.
pub async fn start_gateway(backend: SocketAddr) -> (SocketAddr, Shutdown) {
    let mut config = GatewayConfig::default();
    config.backend.address = backend.to_string();
    config.observability.access_log = false;

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config);
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    tokio::time::sleep(Duration::from_millis(50)).await;
    (addr, shutdown)
}

/// HTTP client that never goes through a system proxy.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}
