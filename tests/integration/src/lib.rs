//! End-to-end tests for the cfpurge CloudFront client.
//!
//! The client is driven through an in-memory [`MockTransport`] that replays
//! canned responses and records what was sent, and a [`RecordingSigner`] that
//! stamps a fake `Authorization` header. No network access is needed.
//!
//! Run them with:
//! ```text
//! cargo test -p cfpurge-integration
//! ```

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, Once};

use async_trait::async_trait;
use bytes::Bytes;
use cfpurge_client::{
    BoxError, ClientConfig, CloudFrontClient, HttpTransport, RequestSigner, SigningContext,
};

static INIT: Once = Once::new();

/// Initialize tracing (once).
fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .with_test_writer()
            .init();
    });
}

/// Transport that replays queued responses and records every request.
#[derive(Debug, Default)]
pub struct MockTransport {
    responses: Mutex<VecDeque<Result<http::Response<Bytes>, String>>>,
    requests: Mutex<Vec<http::Request<Bytes>>>,
}

impl MockTransport {
    /// A transport that answers the next request with `status` and `body`.
    #[must_use]
    pub fn responding(status: u16, body: &str) -> Arc<Self> {
        let transport = Arc::new(Self::default());
        transport.push_response(status, body);
        transport
    }

    /// A transport whose next send fails with `message`.
    #[must_use]
    pub fn failing(message: &str) -> Arc<Self> {
        let transport = Arc::new(Self::default());
        transport
            .responses
            .lock()
            .expect("responses lock")
            .push_back(Err(message.to_owned()));
        transport
    }

    /// Queue another response.
    pub fn push_response(&self, status: u16, body: &str) {
        let response = http::Response::builder()
            .status(status)
            .header("x-amz-request-id", "mock-request-id")
            .header(
                http::header::LOCATION,
                "https://cloudfront.amazonaws.com/2019-03-26/distribution/EDFDVBD6EXAMPLE/invalidation/I2J0I21PCUYOIK",
            )
            .body(Bytes::from(body.to_owned()))
            .expect("valid mock response");
        self.responses
            .lock()
            .expect("responses lock")
            .push_back(Ok(response));
    }

    /// Number of requests sent so far.
    #[must_use]
    pub fn request_count(&self) -> usize {
        self.requests.lock().expect("requests lock").len()
    }

    /// Run `f` against the most recent request.
    pub fn with_last_request<R>(&self, f: impl FnOnce(&http::Request<Bytes>) -> R) -> R {
        let requests = self.requests.lock().expect("requests lock");
        f(requests.last().expect("at least one request was sent"))
    }
}

#[async_trait]
impl HttpTransport for MockTransport {
    async fn send(&self, request: http::Request<Bytes>) -> Result<http::Response<Bytes>, BoxError> {
        self.requests.lock().expect("requests lock").push(request);
        let next = self
            .responses
            .lock()
            .expect("responses lock")
            .pop_front()
            .unwrap_or_else(|| Err("no response queued".to_owned()));
        next.map_err(BoxError::from)
    }
}

/// Signer that records the signing scope and stamps a fake signature.
#[derive(Debug, Default)]
pub struct RecordingSigner {
    contexts: Mutex<Vec<SigningContext>>,
    fail: bool,
}

impl RecordingSigner {
    /// A signer that succeeds.
    #[must_use]
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// A signer that always refuses.
    #[must_use]
    pub fn refusing() -> Arc<Self> {
        Arc::new(Self {
            contexts: Mutex::default(),
            fail: true,
        })
    }

    /// Signing scopes seen so far.
    #[must_use]
    pub fn contexts(&self) -> Vec<SigningContext> {
        self.contexts.lock().expect("contexts lock").clone()
    }
}

#[async_trait]
impl RequestSigner for RecordingSigner {
    async fn sign(
        &self,
        request: &mut http::Request<Bytes>,
        context: &SigningContext,
    ) -> Result<(), BoxError> {
        self.contexts.lock().expect("contexts lock").push(*context);
        if self.fail {
            return Err("credentials expired".into());
        }
        let value = format!(
            "AWS4-HMAC-SHA256 Credential=test/20190326/{}/{}/aws4_request",
            context.region, context.service
        );
        request
            .headers_mut()
            .insert(http::header::AUTHORIZATION, value.parse::<http::HeaderValue>()?);
        Ok(())
    }
}

/// Client type used by the tests.
pub type TestClient = CloudFrontClient<Arc<MockTransport>, Arc<RecordingSigner>>;

/// Create a client over the given collaborators.
#[must_use]
pub fn test_client(
    config: ClientConfig,
    transport: &Arc<MockTransport>,
    signer: &Arc<RecordingSigner>,
) -> TestClient {
    init_tracing();
    CloudFrontClient::new(config, Arc::clone(transport), Arc::clone(signer))
}

/// Generate a unique caller reference for a test.
#[must_use]
pub fn caller_reference(prefix: &str) -> String {
    let id = uuid::Uuid::new_v4().to_string()[..8].to_owned();
    format!("{prefix}-{id}")
}

/// A `CreateInvalidation` success body.
#[must_use]
pub fn success_body(id: &str, status: &str, caller_reference: &str, paths: &[&str]) -> String {
    let items: String = paths.iter().map(|p| format!("<Path>{p}</Path>")).collect();
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<Invalidation xmlns="http://cloudfront.amazonaws.com/doc/2019-03-26/">
  <Id>{id}</Id>
  <Status>{status}</Status>
  <CreateTime>2019-03-26T16:45:09.000Z</CreateTime>
  <InvalidationBatch>
    <Paths><Quantity>{quantity}</Quantity><Items>{items}</Items></Paths>
    <CallerReference>{caller_reference}</CallerReference>
  </InvalidationBatch>
</Invalidation>"#,
        quantity = paths.len()
    )
}

/// A nested CloudFront error body.
#[must_use]
pub fn error_body(code: &str, message: &str) -> String {
    format!(
        "<ErrorResponse><Error><Type>Sender</Type><Code>{code}</Code><Message>{message}</Message></Error><RequestId>body-request-id</RequestId></ErrorResponse>"
    )
}

mod test_create;
