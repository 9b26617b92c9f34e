use thiserror::Error;

pub type Result<T> = std::result::Result<T, HashError>;

/// The two failure kinds the matching core can raise.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HashError {
    /// Malformed or wrong-length hex input.
    #[error("format error: {0}")]
    Format(String),
    /// Invalid token size, size larger than the input, or a block number below zero.
    #[error("range error: {0}")]
    Range(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Format,
    Range,
}

impl HashError {
    pub fn format(msg: impl Into<String>) -> Self {
        Self::Format(msg.into())
    }

    pub fn range(msg: impl Into<String>) -> Self {
        Self::Range(msg.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Format(_) => ErrorKind::Format,
            Self::Range(_) => ErrorKind::Range,
        }
    }
}
