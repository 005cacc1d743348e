//! Request signing seam.

use async_trait::async_trait;
use bytes::Bytes;
use cfpurge_core::{EndpointInfo, SignatureVersion};

use crate::transport::BoxError;

/// Signing scope for one request, taken from the resolved endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SigningContext {
    /// Service name, `cloudfront`.
    pub service: &'static str,
    /// Region of the credential scope.
    pub region: &'static str,
    /// Signature versions the endpoint accepts, most preferred first.
    pub versions: &'static [SignatureVersion],
}

impl From<&'static EndpointInfo> for SigningContext {
    fn from(info: &'static EndpointInfo) -> Self {
        Self {
            service: info.sign_service,
            region: info.sign_region,
            versions: info.sign_versions,
        }
    }
}

/// Adds authentication to a request before it is sent.
///
/// Implementations typically compute an AWS Signature Version 4 over the
/// method, URI, headers and body, and insert `Authorization`, `X-Amz-Date`
/// and related headers.
#[async_trait]
pub trait RequestSigner: Send + Sync {
    /// Sign the request in place.
    async fn sign(
        &self,
        request: &mut http::Request<Bytes>,
        context: &SigningContext,
    ) -> Result<(), BoxError>;
}

#[async_trait]
impl<T: RequestSigner + ?Sized> RequestSigner for std::sync::Arc<T> {
    async fn sign(
        &self,
        request: &mut http::Request<Bytes>,
        context: &SigningContext,
    ) -> Result<(), BoxError> {
        (**self).sign(request, context).await
    }
}
