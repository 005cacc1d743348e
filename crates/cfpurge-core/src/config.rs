//! Client configuration.
//!
//! Provides [`ClientConfig`] for configuring a CloudFront client. There is no
//! environment lookup here; embedding applications build the config in code or
//! deserialize it from their own configuration source.

use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

use crate::endpoint::{self, EndpointInfo};
use crate::types::AwsRegion;

/// Default `User-Agent` header value.
pub const DEFAULT_USER_AGENT: &str = concat!("cfpurge/", env!("CARGO_PKG_VERSION"));

/// CloudFront client configuration.
///
/// # Examples
///
/// ```
/// use cfpurge_core::ClientConfig;
///
/// let config = ClientConfig::builder()
///     .default_region("cn-north-1")
///     .endpoint_url("http://localhost:4566")
///     .build();
/// assert_eq!(config.endpoint_url.as_deref(), Some("http://localhost:4566"));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, TypedBuilder)]
#[serde(rename_all = "camelCase", default)]
pub struct ClientConfig {
    /// Region used when a call does not carry its own override.
    #[builder(default, setter(strip_option, into))]
    pub default_region: Option<AwsRegion>,

    /// Replaces the resolved endpoint URL. Signing still follows the resolved
    /// region and service.
    #[builder(default, setter(strip_option, into))]
    pub endpoint_url: Option<String>,

    /// Value of the `User-Agent` header.
    #[builder(default = String::from(DEFAULT_USER_AGENT), setter(into))]
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            default_region: None,
            endpoint_url: None,
            user_agent: String::from(DEFAULT_USER_AGENT),
        }
    }
}

impl ClientConfig {
    /// Pick the region for a call: the call's override, else the configured default.
    #[must_use]
    pub fn effective_region<'a>(&'a self, call_region: Option<&'a AwsRegion>) -> Option<&'a AwsRegion> {
        call_region.or(self.default_region.as_ref())
    }

    /// Resolve the endpoint for a call and apply the URL override, if any.
    ///
    /// Returns the base URL to send to and the signing metadata.
    #[must_use]
    pub fn endpoint_for(&self, call_region: Option<&AwsRegion>) -> (String, &'static EndpointInfo) {
        let region = self.effective_region(call_region).map(AwsRegion::as_str);
        let info = endpoint::resolve(region);
        let base = self
            .endpoint_url
            .as_deref()
            .unwrap_or(info.endpoint)
            .trim_end_matches('/')
            .to_owned();
        tracing::trace!(?region, endpoint = %base, sign_region = info.sign_region, "resolved endpoint");
        (base, info)
    }
}
