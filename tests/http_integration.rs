//! Integration tests for the Denvr session using wiremock
//!
//! These tests verify that validated requests reach the server with the
//! right method, query string, body and credentials, and that transport
//! failures surface as transport errors.

use denvr::api::v1::servers::snapshots::{self, CreateSnapshot, GetSnapshot, GetSnapshots};
use denvr::api::v1::vpcs::{self, GetVpcs};
use denvr::{Config, DenvrError, Session};
use serde_json::json;
use std::net::TcpListener;
use wiremock::matchers::{bearer_token, body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn session_for(server: &MockServer) -> Session {
    let config = Config::default()
        .with_server(server.uri())
        .with_token("test-token")
        .with_cluster("Msc1")
        .with_namespace("denvr");
    Session::new(config).expect("Session should build")
}

/// Test module for session integration tests
mod session_tests {
    use super::*;

    /// Test GET with query parameters returns parsed JSON
    #[tokio::test]
    async fn test_get_vpcs_sends_query_and_token() {
        let server = MockServer::start().await;

        let expected_response = json!({
            "items": [
                {"id": "denvr", "cluster": "Msc1"},
                {"id": "research", "cluster": "Msc1"}
            ]
        });

        Mock::given(method("GET"))
            .and(path("/api/v1/vpcs/GetVpcs"))
            .and(query_param("cluster", "Msc1"))
            .and(bearer_token("test-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(&expected_response))
            .expect(1)
            .mount(&server)
            .await;

        let session = session_for(&server);
        let response = vpcs::Client::new(&session)
            .get_vpcs(&GetVpcs::default())
            .await
            .expect("Request should succeed");

        assert_eq!(response["items"].as_array().unwrap().len(), 2);
        assert_eq!(response["items"][0]["id"], "denvr");
    }

    /// Test explicit arguments override the configured defaults
    #[tokio::test]
    async fn test_explicit_cluster_overrides_default() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/v1/servers/snapshots/GetSnapshots"))
            .and(query_param("Cluster", "Hou1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"items": []})))
            .expect(1)
            .mount(&server)
            .await;

        let session = session_for(&server);
        let response = snapshots::Client::new(&session)
            .get_snapshots(&GetSnapshots {
                cluster: Some("Hou1".to_string()),
            })
            .await
            .expect("Request should succeed");

        assert_eq!(response, json!({"items": []}));
    }

    /// Test POST sends the filtered JSON body
    #[tokio::test]
    async fn test_create_snapshot_posts_body() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/v1/servers/snapshots/CreateSnapshot"))
            .and(body_json(json!({
                "name": "snap1",
                "namespace": "denvr",
                "cluster": "Msc1"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "snap1",
                "namespace": "denvr",
                "ready_to_use": false
            })))
            .expect(1)
            .mount(&server)
            .await;

        let session = session_for(&server);
        let response = snapshots::Client::new(&session)
            .create_snapshot(&CreateSnapshot {
                name: Some("snap1".to_string()),
                ..Default::default()
            })
            .await
            .expect("Request should succeed");

        assert_eq!(response["id"], "snap1");
        assert_eq!(response["ready_to_use"], false);
    }

    /// Test a missing required parameter never reaches the server
    #[tokio::test]
    async fn test_missing_parameter_sends_nothing() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let session = session_for(&server);
        let err = snapshots::Client::new(&session)
            .get_snapshot(&GetSnapshot::default())
            .await
            .expect_err("Validation should fail");

        assert!(err.is_validation());
        assert_eq!(err.missing_parameters(), Some(&["Id".to_string()][..]));
    }

    /// Test 404 response surfaces as a transport error
    #[tokio::test]
    async fn test_404_returns_http_status() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/v1/servers/snapshots/GetSnapshot"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({
                "error": {
                    "code": 0,
                    "message": "Snapshot not found"
                }
            })))
            .mount(&server)
            .await;

        let session = session_for(&server);
        let err = snapshots::Client::new(&session)
            .get_snapshot(&GetSnapshot {
                id: Some("missing".to_string()),
                ..Default::default()
            })
            .await
            .expect_err("Request should fail");

        assert!(err.is_transport());
        match err {
            DenvrError::HttpStatus { status, body } => {
                assert_eq!(status, 404);
                assert!(body.contains("Snapshot not found"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    /// Test 401 response indicates authentication failure
    #[tokio::test]
    async fn test_401_returns_unauthorized() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/v1/vpcs/GetVpcs"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let session = session_for(&server);
        let err = vpcs::Client::new(&session)
            .get_vpcs(&GetVpcs::default())
            .await
            .expect_err("Request should fail");

        assert_eq!(err.status().map(|s| s.as_u16()), Some(401));
        assert!(denvr::format_api_error(&err).contains("Authentication failed"));
    }

    /// Test empty response handling
    #[tokio::test]
    async fn test_empty_response_is_null() {
        let server = MockServer::start().await;

        Mock::given(method("DELETE"))
            .and(path("/api/v1/servers/snapshots/DeleteSnapshot"))
            .and(query_param("Id", "snap1"))
            .and(query_param("Namespace", "denvr"))
            .and(query_param("Cluster", "Msc1"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        let session = session_for(&server);
        let response = snapshots::Client::new(&session)
            .delete_snapshot(&snapshots::DeleteSnapshot {
                id: Some("snap1".to_string()),
                ..Default::default()
            })
            .await
            .expect("Request should succeed");

        assert!(response.is_null());
    }

    /// Test a non-JSON success body is a decode error
    #[tokio::test]
    async fn test_invalid_json_is_decode_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/v1/vpcs/GetVpcs"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let session = session_for(&server);
        let err = vpcs::Client::new(&session)
            .get_vpcs(&GetVpcs::default())
            .await
            .expect_err("Decoding should fail");

        assert!(matches!(err, DenvrError::Decode(_)));
        assert!(err.is_transport());
    }

    /// Test no Authorization header is sent without a token
    #[tokio::test]
    async fn test_no_token_no_auth_header() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/v1/clusters/GetAll"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"name": "Msc1"}])))
            .mount(&server)
            .await;

        let session = Session::new(Config::default().with_server(server.uri())).unwrap();
        let response = denvr::api::v1::clusters::Client::new(&session)
            .get_all()
            .await
            .expect("Request should succeed");

        assert_eq!(response[0]["name"], "Msc1");

        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 1);
        assert!(requests[0].headers.get("authorization").is_none());
    }

    /// Test connection failure is a transport error
    #[tokio::test]
    async fn test_connection_refused() {
        // Reserve a free port, then release it so nothing is listening
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);
        let uri = format!("http://127.0.0.1:{}", port);

        let session = Session::new(Config::default().with_server(uri).with_cluster("Msc1")).unwrap();
        let err = vpcs::Client::new(&session)
            .get_vpcs(&GetVpcs::default())
            .await
            .expect_err("Request should fail");

        assert!(matches!(err, DenvrError::RequestFailed(_)));
    }
}
