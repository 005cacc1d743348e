//! Happy-path and local-failure tests for `CreateInvalidation`.

#[cfg(test)]
mod tests {
    use cfpurge_client::{
        ClientConfig, ClientError, CreateInvalidationInput, InvalidationBatch, ValidationError,
    };
    use serde_json::json;

    use crate::{MockTransport, RecordingSigner, caller_reference, success_body, test_client};

    const DISTRIBUTION_ID: &str = "EDFDVBD6EXAMPLE";

    #[tokio::test]
    async fn test_should_create_invalidation_from_typed_input() {
        let reference = caller_reference("typed");
        let transport = MockTransport::responding(
            201,
            &success_body("I2J0I21PCUYOIK", "InProgress", &reference, &["/index.html", "/images/*"]),
        );
        let signer = RecordingSigner::new();
        let client = test_client(ClientConfig::default(), &transport, &signer);

        let input = CreateInvalidationInput::new(
            DISTRIBUTION_ID,
            InvalidationBatch::new(reference.as_str(), ["/index.html", "/images/*"]),
        );
        let result = client.create_invalidation(input).await.expect("created");

        assert_eq!(result.http_status(), http::StatusCode::CREATED);
        assert_eq!(result.id(), Some("I2J0I21PCUYOIK"));
        assert_eq!(result.status(), Some("InProgress"));
        assert_eq!(result.caller_reference(), Some(reference.as_str()));
        let paths = result.paths().expect("echoed paths");
        assert_eq!(paths.quantity, 2);
        assert_eq!(paths.items, ["/index.html", "/images/*"]);
        assert!(result.create_time().is_some());
        assert_eq!(result.request_id(), Some("mock-request-id"));
        assert!(
            result
                .location()
                .is_some_and(|l| l.ends_with("/invalidation/I2J0I21PCUYOIK"))
        );
        assert_eq!(transport.request_count(), 1);
    }

    #[tokio::test]
    async fn test_should_send_signed_xml_request() {
        let reference = caller_reference("wire");
        let transport =
            MockTransport::responding(201, &success_body("I1", "InProgress", &reference, &["/a"]));
        let signer = RecordingSigner::new();
        let client = test_client(
            ClientConfig::builder().user_agent("cfpurge-tests/1.0").build(),
            &transport,
            &signer,
        );

        client
            .create_invalidation(CreateInvalidationInput::new(
                DISTRIBUTION_ID,
                InvalidationBatch::new(reference.as_str(), ["/a"]),
            ))
            .await
            .expect("created");

        transport.with_last_request(|req| {
            assert_eq!(req.method(), &http::Method::POST);
            assert_eq!(
                req.uri().to_string(),
                "https://cloudfront.amazonaws.com/2019-03-26/distribution/EDFDVBD6EXAMPLE/invalidation"
            );
            assert_eq!(req.headers()[http::header::CONTENT_TYPE], "application/xml");
            assert_eq!(req.headers()[http::header::USER_AGENT], "cfpurge-tests/1.0");
            assert_eq!(
                req.headers()[http::header::AUTHORIZATION],
                "AWS4-HMAC-SHA256 Credential=test/20190326/us-east-1/cloudfront/aws4_request"
            );

            let body = std::str::from_utf8(req.body()).expect("UTF-8 body");
            assert!(body.starts_with("<?xml"));
            assert!(body.contains("<Paths><Quantity>1</Quantity><Items><Path>/a</Path></Items></Paths>"));
            assert!(body.contains(&format!("<CallerReference>{reference}</CallerReference>")));
        });
    }

    #[tokio::test]
    async fn test_should_accept_loose_input() {
        let reference = caller_reference("loose");
        let transport =
            MockTransport::responding(201, &success_body("I2", "InProgress", &reference, &["/*"]));
        let signer = RecordingSigner::new();
        let client = test_client(ClientConfig::default(), &transport, &signer);

        let result = client
            .create_invalidation(json!({
                "DistributionId": DISTRIBUTION_ID,
                "InvalidationBatch": {
                    "Paths": { "Quantity": 1, "Items": ["/*"] },
                    "CallerReference": reference,
                }
            }))
            .await
            .expect("created");

        assert_eq!(result.id(), Some("I2"));
        transport.with_last_request(|req| {
            let body = std::str::from_utf8(req.body()).expect("UTF-8 body");
            assert!(body.contains("<Path>/*</Path>"));
        });
    }

    #[tokio::test]
    async fn test_should_pass_declared_quantity_through() {
        let transport = MockTransport::responding(201, "");
        let signer = RecordingSigner::new();
        let client = test_client(ClientConfig::default(), &transport, &signer);

        client
            .create_invalidation(json!({
                "DistributionId": DISTRIBUTION_ID,
                "InvalidationBatch": {
                    "Paths": { "Quantity": 5, "Items": ["/a", "/b"] },
                    "CallerReference": "mismatch",
                }
            }))
            .await
            .expect("the service decides whether the counts agree");

        transport.with_last_request(|req| {
            let body = std::str::from_utf8(req.body()).expect("UTF-8 body");
            assert!(body.contains("<Quantity>5</Quantity>"));
        });
    }

    #[tokio::test]
    async fn test_should_reject_invalid_input_without_sending() {
        let transport = MockTransport::responding(201, "");
        let signer = RecordingSigner::new();
        let client = test_client(ClientConfig::default(), &transport, &signer);

        let err = client
            .create_invalidation(CreateInvalidationInput::new(
                "",
                InvalidationBatch::new("r", ["/a"]),
            ))
            .await
            .expect_err("empty distribution id");
        assert!(matches!(
            err,
            ClientError::Validation(ValidationError::EmptyField("DistributionId"))
        ));

        let err = client
            .create_invalidation(json!({ "DistributionId": DISTRIBUTION_ID }))
            .await
            .expect_err("missing batch");
        assert!(matches!(
            err,
            ClientError::Validation(ValidationError::MissingField("InvalidationBatch"))
        ));

        assert_eq!(transport.request_count(), 0);
        assert!(signer.contexts().is_empty());
    }

    #[tokio::test]
    async fn test_should_surface_signer_failure() {
        let transport = MockTransport::responding(201, "");
        let signer = RecordingSigner::refusing();
        let client = test_client(ClientConfig::default(), &transport, &signer);

        let err = client
            .create_invalidation(CreateInvalidationInput::new(
                DISTRIBUTION_ID,
                InvalidationBatch::new("r", ["/a"]),
            ))
            .await
            .expect_err("signer refuses");

        assert!(matches!(err, ClientError::Signing(_)));
        assert!(err.to_string().contains("credentials expired"));
        assert_eq!(transport.request_count(), 0);
    }

    #[tokio::test]
    async fn test_should_surface_transport_failure() {
        let transport = MockTransport::failing("connection reset");
        let signer = RecordingSigner::new();
        let client = test_client(ClientConfig::default(), &transport, &signer);

        let err = client
            .create_invalidation(CreateInvalidationInput::new(
                DISTRIBUTION_ID,
                InvalidationBatch::new("r", ["/a"]),
            ))
            .await
            .expect_err("transport fails");

        assert!(matches!(err, ClientError::Transport(_)));
        assert!(err.code().is_none());
    }

    #[tokio::test]
    async fn test_should_handle_concurrent_calls() {
        let transport = MockTransport::responding(201, &success_body("I1", "InProgress", "r1", &["/a"]));
        transport.push_response(201, &success_body("I1", "InProgress", "r1", &["/a"]));
        let signer = RecordingSigner::new();
        let client = test_client(ClientConfig::default(), &transport, &signer);

        let make = || {
            CreateInvalidationInput::new(DISTRIBUTION_ID, InvalidationBatch::new("r1", ["/a"]))
        };
        let (first, second) =
            tokio::join!(client.create_invalidation(make()), client.create_invalidation(make()));

        let first = first.expect("first call");
        let second = second.expect("second call");
        assert_eq!(first.id(), second.id());
        assert_eq!(transport.request_count(), 2);
    }
}
