//! Request building for `CreateInvalidation`.
//!
//! [`build`] is a pure transformation: it validates the input and lays it out
//! as method, path, query, headers and body. Endpoint selection and signing
//! happen later, in the client.

use bytes::Bytes;
use cfpurge_core::AwsRegion;
use cfpurge_model::CreateInvalidationInput;
use cfpurge_xml::to_xml;
use http::header::{CONTENT_TYPE, HeaderMap, HeaderValue, USER_AGENT};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

use crate::error::ClientError;

/// API version segment of every CloudFront request path.
pub const API_VERSION: &str = "2019-03-26";

/// Characters escaped in a path segment: everything but RFC 3986 unreserved.
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// A request laid out for the wire, not yet bound to an endpoint.
#[derive(Debug, Clone)]
pub struct RequestDescriptor {
    /// HTTP method.
    pub method: http::Method,
    /// Absolute path, already percent-encoded.
    pub path: String,
    /// Query parameters, already percent-encoded.
    pub query: Vec<(String, String)>,
    /// Request headers.
    pub headers: HeaderMap,
    /// Request body.
    pub body: Bytes,
    /// Region override carried by the input; `None` means default resolution.
    pub region: Option<AwsRegion>,
}

impl RequestDescriptor {
    /// Path plus query string.
    #[must_use]
    pub fn path_and_query(&self) -> String {
        if self.query.is_empty() {
            return self.path.clone();
        }
        let query = self
            .query
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join("&");
        format!("{}?{query}", self.path)
    }

    /// Bind the descriptor to a base URL and produce an `http::Request`.
    pub fn into_http_request(
        self,
        base_url: &str,
        user_agent: &str,
    ) -> Result<http::Request<Bytes>, ClientError> {
        let uri = format!("{}{}", base_url.trim_end_matches('/'), self.path_and_query());

        let mut builder = http::Request::builder().method(self.method).uri(uri);
        if let Some(headers) = builder.headers_mut() {
            headers.extend(self.headers);
            if !user_agent.is_empty() {
                let value = HeaderValue::from_str(user_agent).map_err(http::Error::from)?;
                headers.insert(USER_AGENT, value);
            }
        }
        Ok(builder.body(self.body)?)
    }
}

/// Build the `CreateInvalidation` request for an input.
///
/// Fails with [`ClientError::Validation`] when the distribution ID is empty,
/// the caller reference is empty, or a path pattern is empty.
pub fn build(input: &CreateInvalidationInput) -> Result<RequestDescriptor, ClientError> {
    input.validate()?;

    let path = format!(
        "/{API_VERSION}/distribution/{}/invalidation",
        utf8_percent_encode(&input.distribution_id, PATH_SEGMENT)
    );
    let body = to_xml("InvalidationBatch", &input.invalidation_batch)?;

    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/xml"));

    tracing::debug!(
        method = "POST",
        %path,
        paths = input.invalidation_batch.paths.items.len(),
        region = ?input.region,
        "built CreateInvalidation request"
    );

    Ok(RequestDescriptor {
        method: http::Method::POST,
        path,
        query: Vec::new(),
        headers,
        body: Bytes::from(body),
        region: input.region.clone(),
    })
}
