//! Provider error classification
//!
//! Provides typed errors for provider API operations, classified from the
//! error code instead of string matching on Debug output. The one rejection
//! that is benign for this tool (stopping an RDS instance that is not in a
//! stoppable configuration, e.g. a read replica) gets its own kind so the
//! suppression policy is a single explicit check.

use thiserror::Error;

/// Closed set of provider error categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The resource is structurally not in a stoppable configuration.
    /// Benign for a shutdown sweep; treated as a no-op success.
    InvalidParameterCombination,
    /// API rate limit exceeded.
    Throttled,
    /// The resource no longer exists.
    NotFound,
    /// Missing permissions for the operation.
    AccessDenied,
    /// Anything else.
    Other,
}

/// A classified error from a provider control-plane API.
#[derive(Debug, Clone, Error)]
#[error("provider error (code: {code:?}): {message}")]
pub struct ProviderError {
    pub kind: ErrorKind,
    pub code: Option<String>,
    pub message: String,
}

impl ProviderError {
    pub fn new(kind: ErrorKind, code: Option<String>, message: impl Into<String>) -> Self {
        Self {
            kind,
            code,
            message: message.into(),
        }
    }

    /// Build a `ProviderError` from a raw error code and message.
    pub fn classify(code: Option<&str>, message: Option<&str>) -> Self {
        let kind = classify_code(code);
        Self {
            kind,
            code: code.map(str::to_string),
            message: message.unwrap_or("unknown error").to_string(),
        }
    }

    /// A stop rejection that is expected for resources that cannot be
    /// stopped in their current configuration (e.g. RDS replicas).
    pub fn is_benign_stop_rejection(&self) -> bool {
        self.kind == ErrorKind::InvalidParameterCombination
    }

    pub fn is_not_found(&self) -> bool {
        self.kind == ErrorKind::NotFound
    }
}

/// Error codes for stop rejections on resources that are not stoppable.
const INVALID_PARAMETER_CODES: &[&str] = &["InvalidParameterCombination"];

/// Error codes for throttling/rate limiting.
const THROTTLING_CODES: &[&str] = &["Throttling", "ThrottlingException", "RequestLimitExceeded"];

/// Error codes for missing resources.
const NOT_FOUND_CODES: &[&str] = &[
    "InvalidInstanceID.NotFound",
    "DBInstanceNotFound",
    "DBInstanceNotFoundFault",
    "DBClusterNotFoundFault",
    "ClusterNotFoundException",
    "ServiceNotFoundException",
];

/// Error codes for authorization failures.
const ACCESS_DENIED_CODES: &[&str] = &[
    "AccessDenied",
    "AccessDeniedException",
    "UnauthorizedOperation",
];

fn classify_code(code: Option<&str>) -> ErrorKind {
    match code {
        Some(c) if INVALID_PARAMETER_CODES.contains(&c) => ErrorKind::InvalidParameterCombination,
        Some(c) if THROTTLING_CODES.contains(&c) => ErrorKind::Throttled,
        Some(c) if NOT_FOUND_CODES.contains(&c) => ErrorKind::NotFound,
        Some(c) if ACCESS_DENIED_CODES.contains(&c) => ErrorKind::AccessDenied,
        _ => ErrorKind::Other,
    }
}

/// Top-level error for a shutdown sweep.
#[derive(Debug, Error)]
pub enum StopError {
    #[error(transparent)]
    Provider(#[from] ProviderError),

    /// A listing API returned the same continuation cursor twice in a row.
    /// Following it again would loop forever, so this is fatal.
    #[error("list operation repeated continuation cursor {cursor:?}")]
    RepeatedCursor { cursor: String },
}
