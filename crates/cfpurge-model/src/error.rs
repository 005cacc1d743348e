//! CloudFront error codes and error types.
//!
//! CloudFront reports failures as an XML envelope carrying a `Code` string.
//! [`CloudFrontErrorCode`] maps the codes `CreateInvalidation` documents onto a
//! closed set of variants and keeps every other code verbatim in
//! [`CloudFrontErrorCode::Unknown`].

use std::fmt;

/// Error codes returned by `CreateInvalidation`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum CloudFrontErrorCode {
    /// Access denied.
    AccessDenied,
    /// Invalidation batch specified is too large.
    BatchTooLarge,
    /// `Quantity` does not match the number of `Items`.
    InconsistentQuantities,
    /// An argument is invalid.
    InvalidArgument,
    /// The request body is missing.
    MissingBody,
    /// The specified distribution does not exist.
    NoSuchDistribution,
    /// Too many invalidation batches are in progress.
    TooManyInvalidationsInProgress,
    /// A code outside the documented set, kept as received.
    Unknown(String),
}

impl CloudFrontErrorCode {
    /// Every documented code, in declaration order.
    pub const KNOWN: [Self; 7] = [
        Self::AccessDenied,
        Self::BatchTooLarge,
        Self::InconsistentQuantities,
        Self::InvalidArgument,
        Self::MissingBody,
        Self::NoSuchDistribution,
        Self::TooManyInvalidationsInProgress,
    ];

    /// Map a wire code onto a variant. Matching is exact and case-sensitive.
    #[must_use]
    pub fn from_code(code: &str) -> Self {
        match code {
            "AccessDenied" => Self::AccessDenied,
            "BatchTooLarge" => Self::BatchTooLarge,
            "InconsistentQuantities" => Self::InconsistentQuantities,
            "InvalidArgument" => Self::InvalidArgument,
            "MissingBody" => Self::MissingBody,
            "NoSuchDistribution" => Self::NoSuchDistribution,
            "TooManyInvalidationsInProgress" => Self::TooManyInvalidationsInProgress,
            other => Self::Unknown(other.to_owned()),
        }
    }

    /// Returns the error code as it appears on the wire.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::AccessDenied => "AccessDenied",
            Self::BatchTooLarge => "BatchTooLarge",
            Self::InconsistentQuantities => "InconsistentQuantities",
            Self::InvalidArgument => "InvalidArgument",
            Self::MissingBody => "MissingBody",
            Self::NoSuchDistribution => "NoSuchDistribution",
            Self::TooManyInvalidationsInProgress => "TooManyInvalidationsInProgress",
            Self::Unknown(code) => code,
        }
    }

    /// Whether this is one of the documented codes.
    #[must_use]
    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Unknown(_))
    }

    /// Message used when the envelope carries none.
    #[must_use]
    pub fn default_message(&self) -> &'static str {
        match self {
            Self::AccessDenied => "Access denied.",
            Self::BatchTooLarge => "Invalidation batch specified is too large.",
            Self::InconsistentQuantities => {
                "The value of Quantity and the size of Items don't match."
            }
            Self::InvalidArgument => "An argument is invalid.",
            Self::MissingBody => {
                "This operation requires a body. Ensure that the body is present and the \
                 Content-Type header is set."
            }
            Self::NoSuchDistribution => "The specified distribution does not exist.",
            Self::TooManyInvalidationsInProgress => {
                "You have exceeded the maximum number of allowable InProgress invalidation \
                 batch requests, or invalidation objects."
            }
            Self::Unknown(_) => "An unknown error occurred.",
        }
    }
}

impl fmt::Display for CloudFrontErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A failure reported by CloudFront.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("CloudFront error ({code}, HTTP {status}): {message}")]
pub struct ServiceError {
    /// The error code.
    pub code: CloudFrontErrorCode,
    /// Human-readable message.
    pub message: String,
    /// `Sender` or `Receiver`, when the envelope carries a `Type`.
    pub error_type: Option<String>,
    /// The request ID, when the envelope carries one.
    pub request_id: Option<String>,
    /// HTTP status of the response.
    pub status: http::StatusCode,
}

impl ServiceError {
    /// Create an error from a wire code and an optional message.
    ///
    /// An absent or empty message is replaced by the code's default message.
    #[must_use]
    pub fn new(code: &str, message: Option<String>, status: http::StatusCode) -> Self {
        let code = CloudFrontErrorCode::from_code(code);
        let message = message
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| code.default_message().to_owned());
        Self {
            code,
            message,
            error_type: None,
            request_id: None,
            status,
        }
    }

    /// Set the error type.
    #[must_use]
    pub fn with_error_type(mut self, error_type: impl Into<String>) -> Self {
        self.error_type = Some(error_type.into());
        self
    }

    /// Set the request ID.
    #[must_use]
    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = Some(request_id.into());
        self
    }

    /// The code exactly as the service sent it.
    #[must_use]
    pub fn raw_code(&self) -> &str {
        self.code.as_str()
    }

    /// Whether the code fell outside the documented set.
    #[must_use]
    pub fn is_unknown(&self) -> bool {
        !self.code.is_known()
    }
}

/// Input rejected before any request is built.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// A required parameter was not supplied.
    #[error("missing required parameter: {0}")]
    MissingField(&'static str),

    /// A required parameter was supplied but empty.
    #[error("required parameter must not be empty: {0}")]
    EmptyField(&'static str),

    /// A path pattern in the batch is empty.
    #[error("invalidation path at index {index} is empty")]
    EmptyPath {
        /// Position of the offending path in `Paths.Items`.
        index: usize,
    },

    /// Loose input could not be read as a `CreateInvalidation` request.
    #[error("malformed input: {0}")]
    Malformed(String),
}
