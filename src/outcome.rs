//! The response envelope and its encoding.

use crate::error::{Error, ErrorKind};
use crate::event::Point;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::Serialize;
use std::io::{self, Write};

/// Payload carried by a successful query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Payload {
    Point(Point),
    /// Base64 text of a PNG image.
    Image(String),
}

impl Payload {
    /// Re-encode PNG bytes as base64 text. The bytes are not inspected.
    pub fn image(png: &[u8]) -> Self {
        Payload::Image(STANDARD.encode(png))
    }
}

/// How much of an operation was committed before it failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Progress {
    pub completed: usize,
    pub total: usize,
}

/// The single result shape every operation produces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OperationOutcome {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Payload>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<ErrorKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress: Option<Progress>,
}

impl OperationOutcome {
    pub fn ok() -> Self {
        Self {
            success: true,
            message: None,
            data: None,
            code: None,
            progress: None,
        }
    }

    pub fn with_data(data: Payload) -> Self {
        Self {
            data: Some(data),
            ..Self::ok()
        }
    }

    pub fn failure(err: &Error) -> Self {
        Self {
            success: false,
            message: Some(err.to_string()),
            data: None,
            code: Some(err.kind()),
            progress: err
                .progress()
                .map(|(completed, total)| Progress { completed, total }),
        }
    }

    /// Process exit status: 0 iff the operation succeeded.
    pub fn exit_code(&self) -> i32 {
        if self.success { 0 } else { 1 }
    }

    /// Serialize as a single JSON line (no trailing newline).
    pub fn to_json(&self) -> String {
        match serde_json::to_string(self) {
            Ok(json) => json,
            // Only reachable if a payload refuses to serialize; keep the
            // envelope parseable regardless.
            Err(e) => format!(
                r#"{{"success":false,"message":{},"code":"EncodingFailed"}}"#,
                serde_json::Value::String(format!("EncodingFailed: {}", e))
            ),
        }
    }

    /// Write the envelope followed by a newline, once.
    pub fn emit<W: Write>(&self, mut out: W) -> io::Result<()> {
        writeln!(out, "{}", self.to_json())?;
        out.flush()
    }
}

impl From<&Error> for OperationOutcome {
    fn from(err: &Error) -> Self {
        Self::failure(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    fn parse(outcome: &OperationOutcome) -> Value {
        serde_json::from_str(&outcome.to_json()).unwrap()
    }

    #[test]
    fn test_plain_success_omits_optional_fields() {
        let outcome = OperationOutcome::ok();
        assert_eq!(outcome.to_json(), r#"{"success":true}"#);
        assert_eq!(outcome.exit_code(), 0);
    }

    #[test]
    fn test_point_payload() {
        let outcome = OperationOutcome::with_data(Payload::Point(Point::new(12, 34)));
        assert_eq!(parse(&outcome), json!({"success": true, "data": {"x": 12, "y": 34}}));
    }

    #[test]
    fn test_image_payload_is_base64() {
        let outcome = OperationOutcome::with_data(Payload::image(b"\x89PNG"));
        assert_eq!(parse(&outcome), json!({"success": true, "data": "iVBORw=="}));
    }

    #[test]
    fn test_failure_has_message_and_code() {
        let outcome = OperationOutcome::failure(&Error::InvalidArgument("bad".into()));
        assert_eq!(
            parse(&outcome),
            json!({
                "success": false,
                "message": "InvalidArgument: bad",
                "code": "InvalidArgument"
            })
        );
        assert_ne!(outcome.exit_code(), 0);
    }

    #[test]
    fn test_partial_failure_reports_progress() {
        let err = Error::partial(2, 7, Error::EncodingFailed("no mapping".into()));
        let outcome = OperationOutcome::from(&err);
        let value = parse(&outcome);
        assert_eq!(value["code"], "EncodingFailed");
        assert_eq!(value["progress"], json!({"completed": 2, "total": 7}));
    }

    #[test]
    fn test_emit_writes_one_line() {
        let mut buffer = Vec::new();
        OperationOutcome::ok().emit(&mut buffer).unwrap();
        assert_eq!(String::from_utf8(buffer).unwrap(), "{\"success\":true}\n");
    }
}
