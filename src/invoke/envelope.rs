//! Invocation envelope wrapping the serialized gateway event.
//!
//! Field names are PascalCase on the wire and byte fields travel as standard
//! base64 strings, the JSON shape Lambda-style function runtimes expect.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Call metadata plus the opaque payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct InvokeRequest {
    #[serde(with = "base64_bytes")]
    pub payload: Vec<u8>,
    pub request_id: String,
    pub x_amzn_trace_id: String,
    pub deadline: Timestamp,
    pub invoked_function_arn: String,
    pub cognito_identity_id: String,
    pub cognito_identity_pool_id: String,
    #[serde(default, with = "base64_bytes::nullable")]
    pub client_context: Vec<u8>,
}

impl InvokeRequest {
    /// Wrap `payload` with a fresh request id. Identity and tracing fields
    /// stay empty.
    pub fn new(payload: Vec<u8>, deadline: DateTime<Utc>) -> Self {
        Self {
            payload,
            request_id: Uuid::new_v4().to_string(),
            x_amzn_trace_id: String::new(),
            deadline: deadline.into(),
            invoked_function_arn: String::new(),
            cognito_identity_id: String::new(),
            cognito_identity_pool_id: String::new(),
            client_context: Vec::new(),
        }
    }
}

/// Wall-clock instant split into seconds and nanoseconds since the epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Timestamp {
    pub seconds: i64,
    pub nanos: i64,
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(at: DateTime<Utc>) -> Self {
        Self {
            seconds: at.timestamp(),
            nanos: i64::from(at.timestamp_subsec_nanos()),
        }
    }
}

/// Reply from the function: a payload, or an error in its place.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct InvokeResponse {
    #[serde(default, with = "base64_bytes")]
    pub payload: Vec<u8>,
    #[serde(default)]
    pub error: Option<InvokeResponseError>,
}

/// Application-level failure reported by the function.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct InvokeResponseError {
    pub message: String,
    #[serde(rename = "Type")]
    pub kind: String,
    pub stack_trace: Option<Vec<StackFrame>>,
    pub should_exit: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct StackFrame {
    pub path: String,
    pub line: i32,
    pub label: String,
}

mod base64_bytes {
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S, T>(bytes: &T, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
        T: AsRef<[u8]>,
    {
        serializer.serialize_str(&STANDARD.encode(bytes.as_ref()))
    }

    /// `null` reads as no bytes.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<u8>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<String>::deserialize(deserializer)? {
            Some(text) => STANDARD.decode(text).map_err(serde::de::Error::custom),
            None => Ok(Vec::new()),
        }
    }

    /// Same as the parent module, except empty bytes are written as `null`.
    pub mod nullable {
        use serde::Serializer;

        pub use super::deserialize;

        pub fn serialize<S, T>(bytes: &T, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
            T: AsRef<[u8]>,
        {
            if bytes.as_ref().is_empty() {
                serializer.serialize_none()
            } else {
                super::serialize(bytes, serializer)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn request_wire_shape() {
        let at = DateTime::from_timestamp(1_700_000_000, 250).unwrap();
        let mut request = InvokeRequest::new(b"{}".to_vec(), at);
        request.request_id = "req-1".into();

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            json!({
                "Payload": "e30=",
                "RequestId": "req-1",
                "XAmznTraceId": "",
                "Deadline": {"Seconds": 1_700_000_000i64, "Nanos": 250},
                "InvokedFunctionArn": "",
                "CognitoIdentityId": "",
                "CognitoIdentityPoolId": "",
                "ClientContext": null
            })
        );
    }

    #[test]
    fn each_request_gets_a_fresh_id() {
        let now = Utc::now();
        let a = InvokeRequest::new(Vec::new(), now);
        let b = InvokeRequest::new(Vec::new(), now);
        assert_ne!(a.request_id, b.request_id);
        assert!(Uuid::parse_str(&a.request_id).is_ok());
    }

    #[test]
    fn response_with_error_and_null_payload() {
        let response: InvokeResponse = serde_json::from_value(json!({
            "Payload": null,
            "Error": {
                "Message": "boom",
                "Type": "errorString",
                "StackTrace": null,
                "ShouldExit": false
            }
        }))
        .unwrap();

        assert!(response.payload.is_empty());
        let error = response.error.unwrap();
        assert_eq!(error.message, "boom");
        assert_eq!(error.kind, "errorString");
    }

    #[test]
    fn response_payload_is_base64() {
        let response: InvokeResponse =
            serde_json::from_value(json!({"Payload": "eyJzdGF0dXNDb2RlIjoyMDB9", "Error": null}))
                .unwrap();
        assert_eq!(response.payload, br#"{"statusCode":200}"#);
        assert!(response.error.is_none());

        let err = serde_json::from_value::<InvokeResponse>(json!({"Payload": "%%%"}));
        assert!(err.is_err());
    }
}
