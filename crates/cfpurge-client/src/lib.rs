//! CloudFront `CreateInvalidation` client for cfpurge.
//!
//! The call path is split the same way the wire exchange is:
//!
//! 1. [`build`] validates a [`CreateInvalidationInput`] and produces a
//!    transport-agnostic [`RequestDescriptor`].
//! 2. [`CloudFrontClient`] resolves the endpoint, hands the request to a
//!    [`RequestSigner`], and sends it through an [`HttpTransport`].
//! 3. [`interpret`] turns the response into a [`CreateInvalidationResult`] or
//!    a typed [`ClientError`].
//!
//! Signing, transport, retries and timeouts are supplied by the caller's
//! collaborators; this crate holds no state between calls.

pub mod builder;
pub mod client;
pub mod error;
pub mod interpret;
pub mod signer;
pub mod transport;

pub use builder::{RequestDescriptor, build};
pub use client::CloudFrontClient;
pub use error::ClientError;
pub use interpret::{CreateInvalidationResult, interpret};
pub use signer::{RequestSigner, SigningContext};
#[cfg(feature = "reqwest")]
pub use transport::ReqwestTransport;
pub use transport::{BoxError, HttpTransport};

pub use cfpurge_core::{AwsRegion, ClientConfig};
pub use cfpurge_model::{
    CloudFrontErrorCode, CreateInvalidationInput, InputSource, Invalidation, InvalidationBatch,
    Paths, ServiceError, ValidationError,
};
