//! Request translation: inbound HTTP request → [`ProxyRequest`].
//!
//! # Responsibilities
//! - Resolve the two-route resource (`/` or `/{proxy}`)
//! - Fold headers and query parameters into single and multi-value maps
//! - Decide whether the body travels as text or base64
//!
//! # Design Decisions
//! - Translation is pure and infallible; reading the body happens earlier
//! - `Host` is seeded from the connection before real headers are folded
//! - Header names are presented in canonical MIME form (`Content-Type`)

use std::collections::HashMap;

use axum::http::request::Parts;
use axum::http::{header, HeaderMap};
use percent_encoding::percent_decode_str;

use crate::event::{
    encode_body, FoldedMap, ProxyRequest, RequestContext, PROXY_PARAMETER, PROXY_RESOURCE,
    ROOT_RESOURCE,
};

/// Canonical name of the seeded host header.
const HOST_HEADER: &str = "Host";

impl ProxyRequest {
    /// Build the gateway event for an HTTP request whose body was already read.
    pub fn from_http(parts: &Parts, body: &[u8]) -> Self {
        let path = decoded_path(parts.uri.path());
        let (resource, path_parameters) = resolve_route(&path);

        let (headers, multi_value_headers) =
            fold_headers(&connection_host(parts), &parts.headers).into_parts();
        let (query_string_parameters, multi_value_query_string_parameters) =
            fold_query(parts.uri.query()).into_parts();

        let (body, is_base64_encoded) = encode_body(body);

        Self {
            resource,
            path,
            http_method: parts.method.to_string(),
            headers,
            multi_value_headers,
            query_string_parameters,
            multi_value_query_string_parameters,
            path_parameters,
            stage_variables: None,
            request_context: RequestContext::default(),
            body,
            is_base64_encoded,
        }
    }
}

/// Map a path onto the root or proxy resource.
pub fn resolve_route(path: &str) -> (String, Option<HashMap<String, String>>) {
    if path == "/" {
        return (ROOT_RESOURCE.to_string(), None);
    }
    let remainder = path.strip_prefix('/').unwrap_or(path);
    let parameters = HashMap::from([(PROXY_PARAMETER.to_string(), remainder.to_string())]);
    (PROXY_RESOURCE.to_string(), Some(parameters))
}

/// Host the client addressed: the `Host` header, or the URI authority for
/// HTTP/2 requests that carry `:authority` instead.
pub fn connection_host(parts: &Parts) -> String {
    parts
        .headers
        .get(header::HOST)
        .map(|value| String::from_utf8_lossy(value.as_bytes()).into_owned())
        .or_else(|| parts.uri.authority().map(|a| a.as_str().to_string()))
        .unwrap_or_default()
}

fn fold_headers(host: &str, headers: &HeaderMap) -> FoldedMap {
    let mut folded = FoldedMap::new();
    folded.insert(HOST_HEADER, host);
    for (name, value) in headers {
        if *name == header::HOST {
            continue;
        }
        folded.insert(
            canonical_header_name(name.as_str()),
            String::from_utf8_lossy(value.as_bytes()),
        );
    }
    folded
}

fn fold_query(query: Option<&str>) -> FoldedMap {
    query
        .map(|q| url::form_urlencoded::parse(q.as_bytes()).collect())
        .unwrap_or_default()
}

fn decoded_path(raw: &str) -> String {
    percent_decode_str(raw).decode_utf8_lossy().into_owned()
}

/// `content-type` → `Content-Type`, `x-a` → `X-A`.
pub fn canonical_header_name(name: &str) -> String {
    let mut upper = true;
    name.chars()
        .map(|c| {
            let out = if upper {
                c.to_ascii_uppercase()
            } else {
                c.to_ascii_lowercase()
            };
            upper = c == '-';
            out
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine;

    fn translate(request: Request<()>, body: &[u8]) -> ProxyRequest {
        let (parts, ()) = request.into_parts();
        ProxyRequest::from_http(&parts, body)
    }

    #[test]
    fn root_path_uses_root_resource() {
        let event = translate(
            Request::get("/").header("host", "example.com").body(()).unwrap(),
            b"",
        );
        assert_eq!(event.resource, "/");
        assert_eq!(event.path, "/");
        assert_eq!(event.http_method, "GET");
        assert_eq!(event.path_parameters, None);
        assert_eq!(event.stage_variables, None);
    }

    #[test]
    fn other_paths_use_proxy_resource() {
        let event = translate(Request::delete("/foo/bar").body(()).unwrap(), b"");
        assert_eq!(event.resource, "/{proxy}");
        assert_eq!(event.path, "/foo/bar");
        assert_eq!(event.http_method, "DELETE");
        let params = event.path_parameters.unwrap();
        assert_eq!(params.len(), 1);
        assert_eq!(params["proxy"], "foo/bar");
    }

    #[test]
    fn path_is_percent_decoded() {
        let event = translate(Request::get("/files/a%20b").body(()).unwrap(), b"");
        assert_eq!(event.path, "/files/a b");
        assert_eq!(event.path_parameters.unwrap()["proxy"], "files/a b");
    }

    #[test]
    fn repeated_headers_fold_last_wins() {
        let event = translate(
            Request::get("/")
                .header("X-A", "1")
                .header("X-A", "2")
                .header("X-B", "z")
                .body(())
                .unwrap(),
            b"",
        );
        assert_eq!(event.headers["X-A"], "2");
        assert_eq!(event.multi_value_headers["X-A"], ["1", "2"]);
        assert_eq!(event.headers["X-B"], "z");
        assert_eq!(event.multi_value_headers["X-B"], ["z"]);
    }

    #[test]
    fn host_is_seeded_once() {
        let event = translate(
            Request::get("/")
                .header("host", "api.example.com:8002")
                .header("content-type", "text/plain")
                .body(())
                .unwrap(),
            b"",
        );
        assert_eq!(event.headers["Host"], "api.example.com:8002");
        assert_eq!(event.multi_value_headers["Host"], ["api.example.com:8002"]);
        assert!(!event.headers.contains_key("host"));
        assert_eq!(event.headers["Content-Type"], "text/plain");
    }

    #[test]
    fn host_falls_back_to_authority() {
        let event = translate(Request::get("http://h2.example/x").body(()).unwrap(), b"");
        assert_eq!(event.headers["Host"], "h2.example");

        let event = translate(Request::get("/x").body(()).unwrap(), b"");
        assert_eq!(event.headers["Host"], "");
    }

    #[test]
    fn repeated_query_keys_fold_like_headers() {
        let event = translate(
            Request::get("/search?q=rust&tag=a&tag=b&empty=&sp=a+b%21")
                .body(())
                .unwrap(),
            b"",
        );
        assert_eq!(event.query_string_parameters["q"], "rust");
        assert_eq!(event.query_string_parameters["tag"], "b");
        assert_eq!(event.multi_value_query_string_parameters["tag"], ["a", "b"]);
        assert_eq!(event.query_string_parameters["empty"], "");
        assert_eq!(event.query_string_parameters["sp"], "a b!");
    }

    #[test]
    fn no_query_means_empty_maps() {
        let event = translate(Request::get("/").body(()).unwrap(), b"");
        assert!(event.query_string_parameters.is_empty());
        assert!(event.multi_value_query_string_parameters.is_empty());
    }

    #[test]
    fn text_body_is_verbatim() {
        let event = translate(Request::post("/").body(()).unwrap(), b"a=1&b=2");
        assert_eq!(event.body, "a=1&b=2");
        assert!(!event.is_base64_encoded);
    }

    #[test]
    fn binary_body_is_base64() {
        let raw = [0u8, 159, 146, 150, b'\n'];
        let event = translate(Request::put("/upload").body(()).unwrap(), &raw);
        assert!(event.is_base64_encoded);
        assert_eq!(STANDARD.decode(&event.body).unwrap(), raw);
    }

    #[test]
    fn canonical_names() {
        assert_eq!(canonical_header_name("content-type"), "Content-Type");
        assert_eq!(canonical_header_name("x-a"), "X-A");
        assert_eq!(canonical_header_name("x-amz-date"), "X-Amz-Date");
        assert_eq!(canonical_header_name("etag"), "Etag");
    }
}
