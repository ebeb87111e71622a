//! Lambda-proxy envelope handling.
//!
//! The live backend sits behind an API gateway that sometimes hands back the
//! raw proxy result, `{ "statusCode": .., "headers": .., "body": "<json>" }`,
//! instead of the inner payload. Unwrapping re-parses the `body` string.

use serde_json::Value;

/// How a live response body is post-processed before it is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EnvelopeMode {
    /// Parse a string `body` field as JSON; fall back to the outer object.
    #[default]
    Unwrap,
    /// Return the response JSON as is.
    Plain,
}

impl EnvelopeMode {
    pub fn apply(self, outer: Value) -> Value {
        match self {
            EnvelopeMode::Unwrap => unwrap_envelope(outer),
            EnvelopeMode::Plain => outer,
        }
    }
}

/// Return the JSON inside `outer.body`, or `outer` itself when there is no
/// string body or the body is not valid JSON. Never fails.
///
/// Only a string `body` is re-parsed. A numeric or boolean `body` is left in
/// place even though `JSON.parse(5)` would yield `5`; the gateway only ever
/// sends the payload as a string.
pub fn unwrap_envelope(outer: Value) -> Value {
    let inner = outer
        .get("body")
        .and_then(Value::as_str)
        .and_then(|body| serde_json::from_str::<Value>(body).ok());

    match inner {
        Some(inner) => inner,
        None => outer,
    }
}
