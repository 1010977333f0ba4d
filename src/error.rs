use thiserror::Error;

/// Failures surfaced by the summary pipeline.
///
/// Display strings are the user-facing messages; callers print them verbatim.
#[derive(Debug, Error)]
pub enum SummaryError {
    #[error("{0}")]
    Configuration(String),
    #[error("{message}")]
    Auth { status: u16, message: String },
    #[error("{message}")]
    Remote { status: u16, message: String },
    #[error("{0}")]
    MalformedResponse(String),
    #[error("gemini request failed: {0}")]
    Transport(String),
    #[error("storage failure: {0:#}")]
    Storage(#[from] anyhow::Error),
}

impl SummaryError {
    pub fn missing_api_key() -> Self {
        Self::Configuration(
            "API key not configured. Please set your Gemini API key with `vidsum config set-key`."
                .to_string(),
        )
    }

    pub fn http_status(&self) -> Option<u16> {
        match self {
            Self::Auth { status, .. } | Self::Remote { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Configuration(_) => ErrorCode::E001ConfigMissing,
            Self::Auth { .. } => ErrorCode::E002AuthRejected,
            Self::Remote { .. } => ErrorCode::E003RemoteFailure,
            Self::MalformedResponse(_) => ErrorCode::E004MalformedResponse,
            Self::Transport(_) => ErrorCode::E005Transport,
            Self::Storage(_) => ErrorCode::E006Storage,
        }
    }
}

impl From<reqwest::Error> for SummaryError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    E001ConfigMissing,
    E002AuthRejected,
    E003RemoteFailure,
    E004MalformedResponse,
    E005Transport,
    E006Storage,
}

impl ErrorCode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::E001ConfigMissing => "E001_CONFIG_MISSING",
            Self::E002AuthRejected => "E002_AUTH_REJECTED",
            Self::E003RemoteFailure => "E003_REMOTE_FAILURE",
            Self::E004MalformedResponse => "E004_MALFORMED_RESPONSE",
            Self::E005Transport => "E005_TRANSPORT",
            Self::E006Storage => "E006_STORAGE",
        }
    }
}
