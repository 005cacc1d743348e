//! The CloudFront client.

use cfpurge_core::ClientConfig;
use cfpurge_model::{CreateInvalidationInput, InputSource};

use crate::builder::build;
use crate::error::ClientError;
use crate::interpret::{CreateInvalidationResult, interpret};
use crate::signer::{RequestSigner, SigningContext};
use crate::transport::HttpTransport;

/// CloudFront client exposing `CreateInvalidation`.
///
/// The client holds only its configuration and collaborators. Every call
/// builds its own request and response state, so a shared reference can be
/// used from many tasks at once.
#[derive(Debug)]
pub struct CloudFrontClient<T, S> {
    config: ClientConfig,
    transport: T,
    signer: S,
}

impl<T, S> CloudFrontClient<T, S>
where
    T: HttpTransport,
    S: RequestSigner,
{
    /// Create a client.
    #[must_use]
    pub fn new(config: ClientConfig, transport: T, signer: S) -> Self {
        Self {
            config,
            transport,
            signer,
        }
    }

    /// The client configuration.
    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Create a new invalidation.
    ///
    /// Accepts a typed [`CreateInvalidationInput`] or a loose JSON map with
    /// `DistributionId`, `InvalidationBatch` and an optional `@region`.
    /// Invalid input fails before anything is signed or sent.
    pub async fn create_invalidation(
        &self,
        input: impl Into<InputSource>,
    ) -> Result<CreateInvalidationResult, ClientError> {
        let input = CreateInvalidationInput::create(input)?;
        let descriptor = build(&input)?;

        let (base_url, endpoint) = self.config.endpoint_for(descriptor.region.as_ref());
        let context = SigningContext::from(endpoint);
        let mut request = descriptor.into_http_request(&base_url, &self.config.user_agent)?;

        self.signer
            .sign(&mut request, &context)
            .await
            .map_err(ClientError::Signing)?;

        tracing::debug!(
            distribution_id = %input.distribution_id,
            uri = %request.uri(),
            sign_region = context.region,
            "sending CreateInvalidation"
        );

        let response = self
            .transport
            .send(request)
            .await
            .map_err(ClientError::Transport)?;

        interpret(response)
    }
}
