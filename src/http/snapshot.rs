//! Persistable snapshot of a response.
//!
//! Only the body, the redirect flag and the status code are significant.
//! Headers and protocol version are left out on purpose; a response rebuilt
//! from a snapshot starts with no headers and a detected version.

use serde::{Deserialize, Serialize};

use crate::error::ResponseResult;

/// Field names kept when a response is persisted.
pub const SERIALIZABLE_FIELDS: [&str; 3] = ["content", "isRedirect", "statusCode"];

/// The three significant fields of a response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseSnapshot {
    pub content: String,
    #[serde(rename = "isRedirect")]
    pub is_redirect: bool,
    #[serde(rename = "statusCode")]
    pub status_code: u16,
}

impl ResponseSnapshot {
    pub fn to_json(&self) -> ResponseResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(raw: &str) -> ResponseResult<Self> {
        Ok(serde_json::from_str(raw)?)
    }
}
