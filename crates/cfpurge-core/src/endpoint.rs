//! CloudFront endpoint resolution.
//!
//! CloudFront is served from a single global endpoint, except for the China
//! partition which has its own endpoint and signing region. The table below is
//! a static, read-only lookup; [`resolve`] never touches the network.

use std::fmt;

/// Service name used in the SigV4 credential scope.
pub const SIGN_SERVICE: &str = "cloudfront";

/// Signature versions a CloudFront endpoint accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SignatureVersion {
    /// AWS Signature Version 4.
    V4,
}

impl SignatureVersion {
    /// Returns the version tag as a string.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::V4 => "v4",
        }
    }
}

impl fmt::Display for SignatureVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where to send a request and how to sign it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EndpointInfo {
    /// Base URL of the endpoint, without a trailing slash.
    pub endpoint: &'static str,
    /// Region used in the signing scope.
    pub sign_region: &'static str,
    /// Service name used in the signing scope.
    pub sign_service: &'static str,
    /// Accepted signature versions, most preferred first.
    pub sign_versions: &'static [SignatureVersion],
}

static GLOBAL: EndpointInfo = EndpointInfo {
    endpoint: "https://cloudfront.amazonaws.com",
    sign_region: "us-east-1",
    sign_service: SIGN_SERVICE,
    sign_versions: &[SignatureVersion::V4],
};

static CHINA: EndpointInfo = EndpointInfo {
    endpoint: "https://cloudfront.cn-northwest-1.amazonaws.com.cn",
    sign_region: "cn-northwest-1",
    sign_service: SIGN_SERVICE,
    sign_versions: &[SignatureVersion::V4],
};

/// Regions that live outside the global partition.
static PARTITION_REGIONS: &[(&str, &EndpointInfo)] =
    &[("cn-north-1", &CHINA), ("cn-northwest-1", &CHINA)];

/// Resolve the endpoint for an optional region.
///
/// Absent regions and regions outside [`partition_regions`] resolve to the
/// global endpoint signed for `us-east-1`.
///
/// # Examples
///
/// ```
/// use cfpurge_core::resolve;
///
/// assert_eq!(resolve(None).endpoint, "https://cloudfront.amazonaws.com");
/// assert_eq!(resolve(Some("cn-north-1")).sign_region, "cn-northwest-1");
/// ```
#[must_use]
pub fn resolve(region: Option<&str>) -> &'static EndpointInfo {
    let Some(region) = region else {
        return &GLOBAL;
    };

    PARTITION_REGIONS
        .iter()
        .find(|(code, _)| *code == region)
        .map_or(&GLOBAL, |(_, info)| *info)
}

/// The global endpoint used when no partition applies.
#[must_use]
pub fn global() -> &'static EndpointInfo {
    &GLOBAL
}

/// Region codes that resolve to a dedicated partition endpoint.
#[must_use]
pub fn partition_regions() -> impl Iterator<Item = &'static str> {
    PARTITION_REGIONS.iter().map(|(code, _)| *code)
}
