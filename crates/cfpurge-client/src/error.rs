//! Client error type.

use bytes::Bytes;
use cfpurge_model::{CloudFrontErrorCode, ServiceError, ValidationError};
use cfpurge_xml::XmlError;

use crate::transport::BoxError;

/// Every way a `CreateInvalidation` call can fail.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The input was rejected locally; nothing was sent.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The service answered with an error envelope.
    #[error(transparent)]
    Service(#[from] ServiceError),

    /// The service answered with an error status but no readable envelope.
    #[error("unexpected HTTP {status} response without a readable error envelope")]
    UnexpectedResponse {
        /// HTTP status of the response.
        status: http::StatusCode,
        /// Raw response body.
        body: Bytes,
    },

    /// The request body could not be written.
    #[error("failed to serialize request body: {0}")]
    Serialization(#[from] XmlError),

    /// The endpoint and path did not form a valid request.
    #[error("invalid request target: {0}")]
    Endpoint(#[from] http::Error),

    /// The signer refused the request.
    #[error("failed to sign request: {0}")]
    Signing(#[source] BoxError),

    /// The transport failed before a response was received.
    #[error("transport error: {0}")]
    Transport(#[source] BoxError),
}

impl ClientError {
    /// The service error, if the service reported one.
    #[must_use]
    pub fn as_service_error(&self) -> Option<&ServiceError> {
        match self {
            Self::Service(err) => Some(err),
            _ => None,
        }
    }

    /// The service error code, if the service reported one.
    #[must_use]
    pub fn code(&self) -> Option<&CloudFrontErrorCode> {
        self.as_service_error().map(|err| &err.code)
    }
}
