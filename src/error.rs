use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("config error: {0}")]
    Config(String),

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("API request failed with status {status}")]
    ApiStatus { status: u16 },

    #[error("invalid response format: {0}")]
    InvalidResponseFormat(String),

    #[error("storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unknown error: {0}")]
    Unknown(String),
}

impl AppError {
    /// Short machine-readable code for UI shells that branch on the failure
    /// class without string matching.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Config(_) => "CONFIG_ERROR",
            AppError::Network(_) => "NETWORK_ERROR",
            AppError::ApiStatus { .. } => "API_REQUEST_FAILED",
            AppError::InvalidResponseFormat(_) => "INVALID_RESPONSE_FORMAT",
            AppError::Storage(_) => "STORAGE_ERROR",
            AppError::Json(_) => "JSON_ERROR",
            AppError::Unknown(_) => "UNKNOWN_ERROR",
        }
    }

    /// Fetch-class errors are retryable: the source keeps its cadence and the
    /// UI offers a manual retry. Local faults (config, storage) are not.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            AppError::Network(_)
                | AppError::ApiStatus { .. }
                | AppError::InvalidResponseFormat(_)
                | AppError::Json(_)
                | AppError::Unknown(_)
        )
    }
}
