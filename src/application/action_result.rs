use serde::{Deserialize, Serialize};

use crate::application::ports::UpstreamResult;

/// Outcome of a dashboard action. The UI shows `message` as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionResult {
    pub success: bool,
    pub message: String,
}

impl ActionResult {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }

    /// Maps a port outcome, using `success_message` when it succeeded and
    /// the raw upstream text when it didn't.
    pub fn from_upstream<T>(result: UpstreamResult<T>, success_message: &str) -> Self {
        match result {
            Ok(_) => Self::ok(success_message),
            Err(err) => Self::failed(err.to_string()),
        }
    }
}

/// Search response. `customers` is `None` when the search could not run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub customers: Option<Vec<crate::domain::entities::customer::Customer>>,
    pub total: u64,
}

impl SearchResult {
    pub fn empty() -> Self {
        Self {
            customers: None,
            total: 0,
        }
    }
}
