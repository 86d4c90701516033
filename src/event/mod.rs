//! Gateway event records exchanged with the function backend.
//!
//! # Data Flow
//! ```text
//! HTTP request
//!     → fold.rs (headers / query → single + multi-value maps)
//!     → binary.rs (decide text vs base64 body)
//!     → ProxyRequest (JSON payload of the invocation)
//!
//! Invocation payload
//!     → ProxyResponse (status, headers, body, base64 flag)
//!     → http::response writes it back to the client
//! ```
//!
//! # Design Decisions
//! - Field names follow the API-gateway proxy event shape expected by
//!   Lambda-style handlers
//! - Responses are lenient: missing or null fields fall back to defaults
//! - Response headers are single-valued; the request side carries both forms

pub mod binary;
pub mod fold;

use std::collections::HashMap;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Deserializer, Serialize};

pub use binary::{encode_body, is_binary};
pub use fold::FoldedMap;

/// Route template for the root path.
pub const ROOT_RESOURCE: &str = "/";

/// Route template for every other path.
pub const PROXY_RESOURCE: &str = "/{proxy}";

/// Path parameter carrying the path remainder for [`PROXY_RESOURCE`].
pub const PROXY_PARAMETER: &str = "proxy";

/// Request record handed to the function.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProxyRequest {
    pub resource: String,
    pub path: String,
    pub http_method: String,
    pub headers: HashMap<String, String>,
    pub multi_value_headers: HashMap<String, Vec<String>>,
    pub query_string_parameters: HashMap<String, String>,
    pub multi_value_query_string_parameters: HashMap<String, Vec<String>>,
    /// `None` for the root resource; serialized as `null`.
    pub path_parameters: Option<HashMap<String, String>>,
    /// Always `null`; there are no deployment stages.
    pub stage_variables: Option<HashMap<String, String>>,
    pub request_context: RequestContext,
    pub body: String,
    pub is_base64_encoded: bool,
}

/// Request context. Carries no identity or tracing data and serializes as `{}`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RequestContext {}

/// Response record returned by the function.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProxyResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub status_code: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub headers: HashMap<String, String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub body: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_base64_encoded: bool,
}

impl ProxyResponse {
    /// Raw response bytes, base64-decoded when the body is flagged as encoded.
    pub fn decoded_body(&self) -> Result<Vec<u8>, base64::DecodeError> {
        if self.is_base64_encoded {
            STANDARD.decode(self.body.as_bytes())
        } else {
            Ok(self.body.as_bytes().to_vec())
        }
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
