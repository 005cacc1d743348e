//! Common AWS type definitions.

use std::fmt;

/// AWS Region identifier, e.g. `us-east-1` or `cn-northwest-1`.
///
/// The value is not checked against a list of known regions: CloudFront is a
/// global service and any region outside the dedicated partitions resolves to
/// the global endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct AwsRegion(String);

impl AwsRegion {
    /// Region used to sign requests against the global CloudFront endpoint.
    pub const DEFAULT: &str = "us-east-1";

    /// Create a new region.
    #[must_use]
    pub fn new(region: impl Into<String>) -> Self {
        Self(region.into())
    }

    /// Get the region as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for AwsRegion {
    fn default() -> Self {
        Self(Self::DEFAULT.to_owned())
    }
}

impl fmt::Display for AwsRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AwsRegion {
    fn from(region: &str) -> Self {
        Self::new(region)
    }
}

impl From<String> for AwsRegion {
    fn from(region: String) -> Self {
        Self(region)
    }
}

impl AsRef<str> for AwsRegion {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
