//! Text-or-binary classification of request bodies.
//!
//! A body is passed to the function as plain text only when every character
//! is printable 7-bit ASCII (`' '..='~'`). Anything else, including tabs and
//! line breaks, is shipped base64-encoded.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

/// Returns true when `bytes` cannot be passed through as printable text.
///
/// Invalid UTF-8 decodes to U+FFFD, which is outside ASCII, so a bytewise scan
/// classifies exactly the same inputs as a per-character one.
pub fn is_binary(bytes: &[u8]) -> bool {
    bytes.iter().any(|b| !is_printable_ascii(*b))
}

fn is_printable_ascii(byte: u8) -> bool {
    matches!(byte, b' '..=b'~')
}

/// Encode a raw body for the invocation payload.
///
/// Returns the body text and whether it is base64-encoded.
pub fn encode_body(bytes: &[u8]) -> (String, bool) {
    if is_binary(bytes) {
        (STANDARD.encode(bytes), true)
    } else {
        // Printable ASCII is always valid UTF-8.
        (String::from_utf8_lossy(bytes).into_owned(), false)
    }
}
