//! Response interpretation for `CreateInvalidation`.
//!
//! A success status yields a [`CreateInvalidationResult`] whose body is decoded
//! on first access. Any other status is read as an error envelope and raised as
//! a [`ServiceError`]; an error status without a usable envelope becomes
//! [`ClientError::UnexpectedResponse`].

use std::sync::OnceLock;

use bytes::Bytes;
use cfpurge_model::{Invalidation, Paths, ServiceError};
use cfpurge_xml::{decode_invalidation, parse_error_envelope};
use chrono::{DateTime, Utc};
use http::header::{HeaderMap, LOCATION};

use crate::error::ClientError;

/// Header carrying the request ID on CloudFront responses.
const REQUEST_ID_HEADER: &str = "x-amz-request-id";

/// Turn a raw response into a result or a typed error.
pub fn interpret(response: http::Response<Bytes>) -> Result<CreateInvalidationResult, ClientError> {
    let (parts, body) = response.into_parts();

    if parts.status.is_success() {
        return Ok(CreateInvalidationResult {
            http_status: parts.status,
            headers: parts.headers,
            body,
            decoded: OnceLock::new(),
        });
    }

    let envelope = match parse_error_envelope(&body) {
        Ok(envelope) => envelope,
        Err(e) => {
            tracing::debug!(status = %parts.status, error = %e, "error body is not an XML envelope");
            return Err(ClientError::UnexpectedResponse {
                status: parts.status,
                body,
            });
        }
    };

    let Some(code) = envelope.code.filter(|c| !c.is_empty()) else {
        tracing::debug!(status = %parts.status, "error envelope carries no code");
        return Err(ClientError::UnexpectedResponse {
            status: parts.status,
            body,
        });
    };

    let mut err = ServiceError::new(&code, envelope.message, parts.status);
    if let Some(error_type) = envelope.error_type {
        err = err.with_error_type(error_type);
    }
    let request_id = envelope
        .request_id
        .or_else(|| header_str(&parts.headers, REQUEST_ID_HEADER).map(str::to_owned));
    if let Some(request_id) = request_id {
        err = err.with_request_id(request_id);
    }

    if err.is_unknown() {
        tracing::warn!(code = %err.code, status = %err.status, "unrecognized CloudFront error code");
    } else {
        tracing::debug!(code = %err.code, status = %err.status, "CloudFront returned an error");
    }

    Err(ClientError::Service(err))
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}

/// Successful `CreateInvalidation` response.
///
/// Holds the raw response. The body is decoded the first time a member is
/// read and the decoded value is reused afterwards, so repeated reads return
/// identical values. Members missing from the body read as `None`.
#[derive(Debug, Clone)]
pub struct CreateInvalidationResult {
    http_status: http::StatusCode,
    headers: HeaderMap,
    body: Bytes,
    decoded: OnceLock<Invalidation>,
}

impl CreateInvalidationResult {
    /// HTTP status of the response, normally `201 Created`.
    #[must_use]
    pub fn http_status(&self) -> http::StatusCode {
        self.http_status
    }

    /// URI of the new invalidation, from the `Location` header.
    #[must_use]
    pub fn location(&self) -> Option<&str> {
        header_str(&self.headers, LOCATION.as_str())
    }

    /// Request ID, from the `x-amz-request-id` header.
    #[must_use]
    pub fn request_id(&self) -> Option<&str> {
        header_str(&self.headers, REQUEST_ID_HEADER)
    }

    /// The decoded invalidation.
    #[must_use]
    pub fn invalidation(&self) -> &Invalidation {
        self.decoded.get_or_init(|| decode_invalidation(&self.body))
    }

    /// Invalidation identifier.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.invalidation().id.as_deref()
    }

    /// `InProgress` or `Completed`.
    #[must_use]
    pub fn status(&self) -> Option<&str> {
        self.invalidation().status.as_deref()
    }

    /// When the invalidation was created.
    #[must_use]
    pub fn create_time(&self) -> Option<DateTime<Utc>> {
        self.invalidation().create_time
    }

    /// Caller reference of the echoed batch.
    #[must_use]
    pub fn caller_reference(&self) -> Option<&str> {
        self.invalidation()
            .invalidation_batch
            .as_ref()
            .map(|b| b.caller_reference.as_str())
    }

    /// Paths of the echoed batch.
    #[must_use]
    pub fn paths(&self) -> Option<&Paths> {
        self.invalidation()
            .invalidation_batch
            .as_ref()
            .map(|b| &b.paths)
    }

    /// Raw response body.
    #[must_use]
    pub fn raw_body(&self) -> &Bytes {
        &self.body
    }
}
