use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VersionError {
    #[error("version {0:?} must have two or three dot-separated parts")]
    InvalidFormat(String),

    #[error("can't convert major of {0:?} to int")]
    InvalidMajor(String),

    #[error("can't convert minor of {0:?} to int")]
    InvalidMinor(String),

    #[error("patch {0:?} does not match patch format: [0-9]+[a-z0-9._-]*")]
    InvalidPatch(String),
}

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Rate limited: retry after {retry_after_secs:?} seconds")]
    RateLimited { retry_after_secs: Option<u64> },

    #[error("Package not found: {0}")]
    NotFound(String),

    #[error("Invalid package name {name:?}: {reason}")]
    InvalidPackage { name: String, reason: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}
