//! Uniform response envelope.

use serde::{Deserialize, Serialize};

/// Envelope returned by every mutation endpoint and every error.
///
/// `result_code` has the form `"<http status>-<subcode>"`, e.g. `"201-1"`.
/// Its leading segment is the HTTP status the server writes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    pub result_code: String,
    pub msg: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    /// Envelope without a payload.
    pub fn new(result_code: impl Into<String>, msg: impl Into<String>) -> Self {
        Self {
            result_code: result_code.into(),
            msg: msg.into(),
            data: None,
        }
    }

    pub fn with_data(result_code: impl Into<String>, msg: impl Into<String>, data: T) -> Self {
        Self {
            result_code: result_code.into(),
            msg: msg.into(),
            data: Some(data),
        }
    }
}

/// Parse the leading numeric segment of a result code.
///
/// `"201-1"` gives `Some(201)`; `"oops"` and `"-1"` give `None`.
pub fn status_of(result_code: &str) -> Option<u16> {
    result_code.split('-').next()?.trim().parse().ok()
}
