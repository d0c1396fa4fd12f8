//! Outward-facing response assembly.
//!
//! A single logical operation either fully succeeds or reports exactly one
//! top-level error; partial successes are never mixed with an error field.

use serde::Serialize;
use serde_json::{json, Value};

use crate::error::{Error, Result};

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// An assembled response: JSON body plus HTTP-equivalent status code.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    /// HTTP-equivalent status code.
    pub status: u16,
    /// Response body.
    pub body: Value,
}

impl ApiResponse {
    /// Wrap a success payload as `{ "success": true, ...payload }`.
    ///
    /// The payload must serialize to a JSON object so the success flag has
    /// somewhere to live.
    pub fn success<T: Serialize>(payload: &T) -> Result<ApiResponse> {
        let mut body = serde_json::to_value(payload)
            .map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))?;

        match body.as_object_mut() {
            Some(object) => {
                object.insert("success".to_string(), Value::Bool(true));
            }
            None => {
                return Err(Error::Render(
                    "success payload must serialize to a JSON object".to_string(),
                ))
            }
        }

        Ok(ApiResponse { status: 200, body })
    }

    /// Wrap an error as `{ "error": ..., "details"? }` with its status.
    ///
    /// The extractor's or model's diagnostic lands in `details`; raw error
    /// objects never cross this boundary.
    pub fn failure(err: &Error) -> ApiResponse {
        let (message, details) = outward_parts(err);
        let mut body = json!({ "error": message });
        if let Some(details) = details {
            body["details"] = Value::String(details);
        }
        ApiResponse {
            status: err.status_code(),
            body,
        }
    }

    /// Assemble from an operation result. Render failures inside the
    /// success path degrade to a 500-class error response, so this never
    /// fails.
    pub fn from_result<T: Serialize>(result: &Result<T>) -> ApiResponse {
        match result {
            Ok(payload) => match Self::success(payload) {
                Ok(response) => response,
                Err(err) => Self::failure(&err),
            },
            Err(err) => Self::failure(err),
        }
    }

    /// Whether this is a success response.
    pub fn is_success(&self) -> bool {
        self.status == 200
    }

    /// Serialize the body.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        let result = match format {
            JsonFormat::Pretty => serde_json::to_string_pretty(&self.body),
            JsonFormat::Compact => serde_json::to_string(&self.body),
        };
        result.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
    }
}

/// Split an error into the outward message and optional diagnostic detail.
fn outward_parts(err: &Error) -> (String, Option<String>) {
    match err {
        Error::ExtractionFailed(detail) => {
            ("Text extraction failed".to_string(), Some(detail.clone()))
        }
        Error::ModelCallFailed(detail) => ("Model call failed".to_string(), Some(detail.clone())),
        other => (other.to_string(), None),
    }
}
