// Operation result returned to front ends
// (success, message) pair; the message is shown to the user verbatim

use serde::{Deserialize, Serialize};

use crate::utils::error::{PmtError, PmtResult};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationResult {
    pub success: bool,
    pub message: String,
    /// Stable error code on failure (`PMT_*`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl OperationResult {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            code: None,
        }
    }

    pub fn fail(err: &PmtError) -> Self {
        Self {
            success: false,
            message: err.to_string(),
            code: Some(err.code().as_str().to_string()),
        }
    }

    /// Tuple form for callers that only care about the pair
    pub fn into_pair(self) -> (bool, String) {
        (self.success, self.message)
    }
}

impl From<PmtResult<String>> for OperationResult {
    fn from(result: PmtResult<String>) -> Self {
        match result {
            Ok(message) => OperationResult::ok(message),
            Err(err) => {
                log::warn!("[project-model] {} ({})", err, err.code().as_str());
                OperationResult::fail(&err)
            }
        }
    }
}
