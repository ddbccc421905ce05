//! Response envelope shared by every API endpoint.
//!
//! Success and error bodies have the same shape so clients can branch on
//! `status` alone:
//!
//! ```json
//! {"status": "success", "error_code": null, "message": "...", "data": {...}, "metadata": null}
//! ```

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    Success,
    Error,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub status: ResponseStatus,
    pub error_code: Option<String>,
    pub message: String,
    pub data: Option<T>,
    pub metadata: Option<Map<String, Value>>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(message: impl Into<String>, data: T) -> Self {
        Self {
            status: ResponseStatus::Success,
            error_code: None,
            message: message.into(),
            data: Some(data),
            metadata: None,
        }
    }

    /// Attach one metadata entry; repeated calls accumulate
    pub fn with_metadata(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.metadata
            .get_or_insert_with(Map::new)
            .insert(key.to_string(), value.into());
        self
    }
}

impl ApiResponse<()> {
    pub fn error(error_code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status: ResponseStatus::Error,
            error_code: Some(error_code.into()),
            message: message.into(),
            data: None,
            metadata: None,
        }
    }
}

/// Body of delete confirmations
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}
