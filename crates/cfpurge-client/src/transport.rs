//! HTTP transport seam.
//!
//! The client never opens connections itself. An [`HttpTransport`] sends a
//! fully built, signed request and returns status, headers and body; pooling,
//! timeouts and retries live behind it.

use async_trait::async_trait;
use bytes::Bytes;

/// Boxed error returned by caller-supplied collaborators.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Sends one HTTP request and returns the complete response.
///
/// Error statuses are responses, not errors: an implementation must return
/// `Ok` for any response it received, whatever its status.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Send the request.
    async fn send(&self, request: http::Request<Bytes>) -> Result<http::Response<Bytes>, BoxError>;
}

#[async_trait]
impl<T: HttpTransport + ?Sized> HttpTransport for std::sync::Arc<T> {
    async fn send(&self, request: http::Request<Bytes>) -> Result<http::Response<Bytes>, BoxError> {
        (**self).send(request).await
    }
}

/// [`HttpTransport`] backed by a `reqwest::Client`.
#[cfg(feature = "reqwest")]
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

#[cfg(feature = "reqwest")]
impl ReqwestTransport {
    /// Wrap an existing client, keeping its pool and timeout settings.
    #[must_use]
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[cfg(feature = "reqwest")]
#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: http::Request<Bytes>) -> Result<http::Response<Bytes>, BoxError> {
        let request = reqwest::Request::try_from(request)?;
        let response = self.client.execute(request).await?;

        let mut builder = http::Response::builder()
            .status(response.status())
            .version(response.version());
        if let Some(headers) = builder.headers_mut() {
            headers.extend(response.headers().clone());
        }
        let body = response.bytes().await?;
        Ok(builder.body(body)?)
    }
}
