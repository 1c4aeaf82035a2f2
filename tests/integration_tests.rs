//! Integration tests using wiremock to simulate HTTP servers.

use easyreq::{
    ErrorEnvelope, RequestDescriptor, RequestExecutor, ReqwestTransport, OFFLINE_MESSAGE,
    SERVER_UNAVAILABLE_MESSAGE,
};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[derive(Debug, Serialize, Deserialize, PartialEq)]
struct TestData {
    id: u32,
    name: String,
}

fn executor() -> RequestExecutor {
    RequestExecutor::new(ReqwestTransport::new().unwrap())
}

fn get(server: &MockServer, route: &str) -> RequestDescriptor {
    RequestDescriptor::get(format!("{}{}", server.uri(), route)).unwrap()
}

#[tokio::test]
async fn test_successful_get_request() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/test"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(r#"{"id":1,"name":"a"}"#)
                .insert_header("x-custom-header", "custom-value"),
        )
        .mount(&mock_server)
        .await;

    let response = executor()
        .execute::<TestData>(&get(&mock_server, "/test"))
        .await
        .unwrap();

    assert_eq!(
        response.entity,
        TestData {
            id: 1,
            name: "a".to_string()
        }
    );
    assert_eq!(response.status().as_u16(), 200);
    assert_eq!(response.header("x-custom-header"), Some("custom-value"));
}

#[tokio::test]
async fn test_successful_post_request() {
    let mock_server = MockServer::start().await;

    let request_data = TestData {
        id: 0,
        name: "New".to_string(),
    };
    let response_data = TestData {
        id: 1,
        name: "New".to_string(),
    };

    Mock::given(method("POST"))
        .and(path("/test"))
        .and(header("content-type", "application/json"))
        .and(body_json(&request_data))
        .respond_with(ResponseTemplate::new(201).set_body_json(&response_data))
        .expect(1)
        .mount(&mock_server)
        .await;

    let request = RequestDescriptor::post(format!("{}/test", mock_server.uri()))
        .unwrap()
        .with_json_body(&request_data)
        .unwrap();

    let response = executor().execute::<TestData>(&request).await.unwrap();

    assert_eq!(response.entity, response_data);
    assert_eq!(response.status().as_u16(), 201);
}

#[tokio::test]
async fn test_server_error_discards_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/test"))
        .respond_with(ResponseTemplate::new(500).set_body_string(r#"{"error":"boom"}"#))
        .mount(&mock_server)
        .await;

    let result = executor()
        .execute::<TestData>(&get(&mock_server, "/test"))
        .await;

    match result {
        Err(ErrorEnvelope::ServerUnavailable(message)) => {
            assert_eq!(message, SERVER_UNAVAILABLE_MESSAGE);
        }
        _ => panic!("Expected ServerUnavailable, got {:?}", result),
    }
}

#[tokio::test]
async fn test_not_found_with_well_formed_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/test"))
        .respond_with(ResponseTemplate::new(404).set_body_json(TestData {
            id: 1,
            name: "a".to_string(),
        }))
        .mount(&mock_server)
        .await;

    let err = executor()
        .execute::<TestData>(&get(&mock_server, "/test"))
        .await
        .unwrap_err();

    assert!(err.is_server_unavailable());
    assert_eq!(err.status(), None);
}

#[tokio::test]
async fn test_empty_success_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/test"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&mock_server)
        .await;

    let request =
        RequestDescriptor::new(http::Method::DELETE, format!("{}/test", mock_server.uri()))
            .unwrap();
    let result = executor().execute::<serde_json::Value>(&request).await;

    match result {
        Err(ErrorEnvelope::ServerUnavailable(message)) => {
            assert_eq!(message, SERVER_UNAVAILABLE_MESSAGE);
        }
        _ => panic!("Expected ServerUnavailable, got {:?}", result),
    }
}

#[tokio::test]
async fn test_deserialization_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/test"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("invalid json")
                .insert_header("x-request-id", "42"),
        )
        .mount(&mock_server)
        .await;

    let result = executor()
        .execute::<TestData>(&get(&mock_server, "/test"))
        .await;

    match result {
        Err(ErrorEnvelope::Decode(err)) => {
            assert_eq!(err.metadata.status.as_u16(), 200);
            assert_eq!(err.metadata.header("x-request-id"), Some("42"));
            assert_eq!(err.raw_body, b"invalid json");
            assert!(err.source.to_string().contains("expected"));
        }
        _ => panic!("Expected Decode, got {:?}", result),
    }
}

#[tokio::test]
async fn test_shape_mismatch_is_decode_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/test"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"id":"one"}"#))
        .mount(&mock_server)
        .await;

    let err = executor()
        .execute::<TestData>(&get(&mock_server, "/test"))
        .await
        .unwrap_err();

    assert!(err.is_decode());
    assert_eq!(err.raw_body(), Some(&br#"{"id":"one"}"#[..]));
}

#[tokio::test]
async fn test_connection_refused_is_connectivity() {
    // Bind then drop a listener so the port is very likely closed.
    let addr = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap();

    let request = RequestDescriptor::get(format!("http://{}/test", addr)).unwrap();
    let result = executor().execute::<TestData>(&request).await;

    match result {
        Err(ErrorEnvelope::Connectivity(message)) => assert_eq!(message, OFFLINE_MESSAGE),
        _ => panic!("Expected Connectivity, got {:?}", result),
    }
}

#[tokio::test]
async fn test_transport_timeout_is_connectivity() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(r#"{"id":1,"name":"a"}"#)
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&mock_server)
        .await;

    let transport = ReqwestTransport::builder()
        .timeout(Duration::from_millis(100))
        .build()
        .unwrap();

    let err = RequestExecutor::new(transport)
        .execute::<TestData>(&get(&mock_server, "/slow"))
        .await
        .unwrap_err();

    assert!(err.is_connectivity());
}

#[tokio::test]
async fn test_default_and_request_headers() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/test"))
        .and(header("user-agent", "test-agent"))
        .and(header("authorization", "Bearer abc"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"id":1,"name":"a"}"#))
        .expect(1)
        .mount(&mock_server)
        .await;

    let transport = ReqwestTransport::builder()
        .default_header("User-Agent", "test-agent")
        .unwrap()
        .build()
        .unwrap();

    let request = get(&mock_server, "/test")
        .with_header("Authorization", "Bearer abc")
        .unwrap();

    let response = RequestExecutor::new(transport)
        .execute::<TestData>(&request)
        .await
        .unwrap();
    assert_eq!(response.id, 1);
}

#[tokio::test]
async fn test_query_parameters() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/test"))
        .and(query_param("page", "1"))
        .and(query_param("limit", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"id":1,"name":"a"}"#))
        .expect(1)
        .mount(&mock_server)
        .await;

    let request = get(&mock_server, "/test")
        .with_query_param("page", "1")
        .with_query_param("limit", "10");

    let response = executor().execute::<TestData>(&request).await.unwrap();
    assert_eq!(response.entity.name, "a");
}

#[tokio::test]
async fn test_request_is_sent_exactly_once() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/test"))
        .respond_with(ResponseTemplate::new(503).set_body_string("unavailable"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let err = executor()
        .execute::<TestData>(&get(&mock_server, "/test"))
        .await
        .unwrap_err();

    assert!(err.is_server_unavailable());
}

#[tokio::test]
async fn test_execute_with_callback() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/test"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"id":7,"name":"cb"}"#))
        .mount(&mock_server)
        .await;

    let (tx, rx) = tokio::sync::oneshot::channel::<easyreq::Outcome<TestData>>();
    let handle = executor().execute_with(&get(&mock_server, "/test"), move |outcome| {
        let _ = tx.send(outcome);
    });

    handle.await.unwrap();
    let outcome = rx.await.unwrap();
    assert_eq!(outcome.unwrap().entity.id, 7);
}
