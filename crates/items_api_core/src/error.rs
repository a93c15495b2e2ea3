use thiserror::Error;

/// Failures a request can end in, each mapped to one HTTP status.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    // 400
    #[error("Invalid JSON in request body")]
    InvalidJson,
    #[error("Missing required fields: id, data")]
    MissingCreateFields,
    #[error("Item ID required in path")]
    MissingPathId,
    #[error("Missing required field: data")]
    MissingData,

    // 404
    #[error("Item not found")]
    NotFound,

    // 405
    #[error("Method not allowed")]
    MethodNotAllowed,

    /// Anything else. The detail is for logs only.
    #[error("internal failure: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    pub fn status_code(&self) -> u16 {
        match self {
            Self::InvalidJson
            | Self::MissingCreateFields
            | Self::MissingPathId
            | Self::MissingData => 400,
            Self::NotFound => 404,
            Self::MethodNotAllowed => 405,
            Self::Internal(_) => 500,
        }
    }

    /// Message placed in the `error` field of the response body.
    pub fn public_message(&self) -> &'static str {
        match self {
            Self::InvalidJson => "Invalid JSON in request body",
            Self::MissingCreateFields => "Missing required fields: id, data",
            Self::MissingPathId => "Item ID required in path",
            Self::MissingData => "Missing required field: data",
            Self::NotFound => "Item not found",
            Self::MethodNotAllowed => "Method not allowed",
            Self::Internal(_) => "Internal server error",
        }
    }

    pub fn is_internal(&self) -> bool {
        matches!(self, Self::Internal(_))
    }
}
