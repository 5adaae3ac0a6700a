use thiserror::Error;

/// Failure of a remote call. Controllers consume these; none of them reach the page.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    /// Transport-level failure: the request never produced a response.
    #[error("request failed: {0}")]
    Network(String),

    /// The server answered with a non-success status.
    #[error("HTTP error {status}: {message}")]
    Rejected { status: u16, message: String },

    #[error("failed to parse JSON: {0}")]
    Decode(String),
}

impl ApiError {
    pub fn is_network(&self) -> bool {
        matches!(self, ApiError::Network(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::Rejected { status: 404, .. })
    }

    /// Text suitable for an inline form message.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Rejected { message, .. } if !message.is_empty() => message.clone(),
            other => other.to_string(),
        }
    }
}

/// Rejected locally before any network call is made.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("title is required")]
    EmptyTitle,
    #[error("description is required")]
    EmptyDescription,
    #[error("comment is empty")]
    EmptyComment,
    #[error("email is required")]
    EmptyEmail,
    #[error("email address is not valid")]
    InvalidEmail,
    #[error("password is required")]
    EmptyPassword,
    #[error("name is required")]
    EmptyName,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StorageError {
    #[error("storage unavailable")]
    Unavailable,
    #[error("storage write rejected: {0}")]
    Write(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid variant table: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("unknown variant '{0}'")]
    UnknownVariant(String),
}

/// Outcome of a form submission that did not succeed.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SubmitError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("a submission is already in flight")]
    Busy,
    #[error(transparent)]
    Api(#[from] ApiError),
}
