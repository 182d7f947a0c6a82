use serde::{Deserialize, Serialize};

/// Pass/fail record returned by every guard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuardResult {
    pub succeeded: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl GuardResult {
    pub fn ok() -> Self {
        Self { succeeded: true, message: None }
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Self { succeeded: false, message: Some(message.into()) }
    }

    pub fn is_ok(&self) -> bool {
        self.succeeded
    }

    /// First failing result in list order, or success.
    ///
    /// Order matters: callers list guards so the first one names the error
    /// reported to the user.
    pub fn combine<I>(results: I) -> GuardResult
    where
        I: IntoIterator<Item = GuardResult>,
    {
        results.into_iter().find(|result| !result.succeeded).unwrap_or_else(GuardResult::ok)
    }

    pub fn into_result(self) -> Result<(), String> {
        if self.succeeded {
            Ok(())
        } else {
            Err(self.message.unwrap_or_default())
        }
    }
}
