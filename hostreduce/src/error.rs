use crate::types::Rank;

pub type Result<T> = std::result::Result<T, ReduceError>;

#[derive(Debug, thiserror::Error)]
pub enum ReduceError {
    #[error("unsupported data type: {code}")]
    UnsupportedDType { code: u8 },

    #[error("buffer size mismatch: expected {expected} bytes, got {actual}")]
    BufferSizeMismatch { expected: usize, actual: usize },

    #[error("invalid topology: {reason}")]
    InvalidTopology { reason: String },

    #[error("invalid peer group: {reason}")]
    InvalidPeerGroup { reason: String },

    #[error("rank {rank} is not a member of communicator '{label}'")]
    NotAMember { rank: Rank, label: String },

    #[error("environment variable {var} is not set")]
    MissingEnv { var: &'static str },

    #[error("environment variable {var} has invalid value '{value}'")]
    InvalidEnv { var: &'static str, value: String },

    #[error("failed to build reducer thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

impl ReduceError {
    /// Create an `InvalidTopology` error.
    pub fn topology(reason: impl Into<String>) -> Self {
        Self::InvalidTopology {
            reason: reason.into(),
        }
    }

    /// Create an `InvalidPeerGroup` error.
    pub fn peer_group(reason: impl Into<String>) -> Self {
        Self::InvalidPeerGroup {
            reason: reason.into(),
        }
    }
}
