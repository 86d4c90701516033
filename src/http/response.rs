//! Response mapping: [`ProxyResponse`] → HTTP response.
//!
//! # Design Decisions
//! - Headers are single-valued and set verbatim (insert, not append)
//! - The body is fully decoded before the response exists, so a bad base64
//!   body yields a clean 500 and nothing of the invalid body is sent

use axum::body::Body;
use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum::response::Response;

use crate::event::ProxyResponse;
use crate::http::error::GatewayError;

impl ProxyResponse {
    /// Convert into the HTTP response sent to the client.
    pub fn into_http(self) -> Result<Response, GatewayError> {
        let status = u16::try_from(self.status_code)
            .ok()
            .and_then(|code| StatusCode::from_u16(code).ok())
            .ok_or(GatewayError::InvalidStatus(self.status_code))?;

        let body = self.decoded_body().map_err(GatewayError::InvalidBody)?;

        let mut response = Response::new(Body::from(body));
        *response.status_mut() = status;

        let headers = response.headers_mut();
        for (name, value) in &self.headers {
            let header_name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|_| GatewayError::InvalidHeader(name.clone()))?;
            let header_value = HeaderValue::from_str(value)
                .map_err(|_| GatewayError::InvalidHeader(name.clone()))?;
            headers.insert(header_name, header_value);
        }

        Ok(response)
    }
}
