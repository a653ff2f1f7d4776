use std::fmt;

use magnet_core::{MagnetLink, SubmissionReport};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    ScanCompleted(Result<Vec<MagnetLink>, ScanUnavailable>),
    /// Badge count for a page; restricted pages count as zero.
    LinksCounted { count: usize },
    SubmitCompleted(Result<SubmissionReport, String>),
    ConnectionTested(Result<String, String>),
    SettingsSaved(Result<(), String>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchOutput {
    pub bytes: Vec<u8>,
    pub metadata: FetchMetadata,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchMetadata {
    pub original_url: String,
    pub final_url: String,
    pub content_type: Option<String>,
    pub byte_len: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct FetchError {
    pub kind: FailureKind,
    pub message: String,
}

impl FetchError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    HttpStatus(u16),
    Timeout,
    RedirectLimitExceeded,
    TooLarge { max_bytes: u64, actual: Option<u64> },
    UnsupportedContentType { content_type: String },
    Network,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::RedirectLimitExceeded => write!(f, "redirect limit exceeded"),
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            FailureKind::UnsupportedContentType { content_type } => {
                write!(f, "unsupported content type {content_type}")
            }
            FailureKind::Network => write!(f, "network error"),
        }
    }
}

/// The page could not be queried. Callers show zero links and a note.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScanUnavailable {
    #[error("restricted origin {0}")]
    RestrictedOrigin(String),
    #[error("page fetch failed: {0}")]
    Fetch(#[from] FetchError),
    #[error("page could not be read: {0}")]
    Read(String),
}
