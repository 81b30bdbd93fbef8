use async_trait::async_trait;
use people_core::person::{PeopleRepository, PersonCreateDto};
use people_core::{DirectoryError, Result};
use people_interaction::interceptors::{ApiKeyInterceptor, ErrorLogInterceptor};
use people_interaction::{
    ApiRequest, ApiResponse, HttpPipeline, MemoryErrorSink, PeopleApiClient, RequestContext,
    Transport,
};
use reqwest::header::{HeaderName, HeaderValue};
use reqwest::{Method, StatusCode, Url};
use serde_json::json;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

const BASE: &str = "https://reqres.in/api";
const API_KEY_HEADER: &str = "x-api-key";
const API_KEY_VALUE: &str = "reqres-free-v1";

// Mock Transport: records every request and replays scripted results
struct MockTransport {
    responses: Mutex<VecDeque<Result<ApiResponse>>>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl MockTransport {
    fn new() -> Self {
        Self {
            responses: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
        }
    }

    fn respond(&self, result: Result<ApiResponse>) {
        self.responses.lock().unwrap().push_back(result);
    }

    fn respond_json(&self, value: serde_json::Value) {
        self.respond(Ok(ApiResponse::json_ok(&value)));
    }

    fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse> {
        self.requests.lock().unwrap().push(request);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(ApiResponse::new(StatusCode::OK, "{}")))
    }
}

struct Harness {
    transport: Arc<MockTransport>,
    sink: Arc<MemoryErrorSink>,
    pipeline: HttpPipeline,
    client: PeopleApiClient,
}

fn harness() -> Harness {
    let transport = Arc::new(MockTransport::new());
    let sink = Arc::new(MemoryErrorSink::new());
    let pipeline = HttpPipeline::standard(
        transport.clone(),
        ApiKeyInterceptor::default(),
        sink.clone(),
    );
    let client = PeopleApiClient::new(pipeline.clone(), BASE).unwrap();
    Harness {
        transport,
        sink,
        pipeline,
        client,
    }
}

fn url(s: &str) -> Url {
    Url::parse(s).unwrap()
}

fn server_error() -> DirectoryError {
    DirectoryError::status(500, "Internal Server Error", r#"{"message":"boom"}"#)
}

#[tokio::test]
async fn test_client_requests_carry_api_key_and_plain_requests_do_not() {
    let h = harness();
    h.transport.respond_json(json!({
        "page": 1, "per_page": 6, "total": 0, "total_pages": 0, "data": []
    }));

    let people = h.client.list(1, 6).await.unwrap();
    assert!(people.is_empty());

    // A request without the opt-in flag
    h.pipeline
        .send(ApiRequest::get(url("https://example.test/ping")))
        .await
        .unwrap();

    let requests = h.transport.requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].method(), &Method::GET);
    assert_eq!(
        requests[0].url_with_params(),
        "https://reqres.in/api/users?page=1&per_page=6"
    );
    assert_eq!(requests[0].headers()[API_KEY_HEADER], API_KEY_VALUE);
    assert!(!requests[1].headers().contains_key(API_KEY_HEADER));
}

#[tokio::test]
async fn test_existing_api_key_header_is_not_overwritten() {
    let h = harness();

    let request = ApiRequest::get(url("https://example.test/ping"))
        .with_header(
            HeaderName::from_static(API_KEY_HEADER),
            HeaderValue::from_static("caller-supplied"),
        )
        .with_context(RequestContext::new().with_api_key());
    h.pipeline.send(request).await.unwrap();

    let requests = h.transport.requests();
    let sent = &requests[0];
    let values: Vec<_> = sent.headers().get_all(API_KEY_HEADER).iter().collect();
    assert_eq!(values, vec!["caller-supplied"]);
}

#[tokio::test]
async fn test_list_failure_reaches_caller_and_is_logged_once() {
    let h = harness();
    h.transport.respond(Err(server_error()));

    let err = h.client.list(1, 6).await.unwrap_err();

    // Same error object the transport produced
    assert_eq!(err, server_error());
    assert_eq!(err.status_code(), Some(500));

    let messages = h.sink.messages();
    assert_eq!(messages.len(), 1);
    assert!(messages[0].contains("HTTP 500"));
    assert!(messages[0].contains("[GET] https://reqres.in/api/users?page=1&per_page=6"));
    assert!(messages[0].contains("(people-list)"));
}

#[tokio::test]
async fn test_log_label_is_appended_in_parentheses() {
    let h = harness();
    h.transport.respond(Err(server_error()));

    let request = ApiRequest::get(url(&format!("{}/users", BASE)))
        .with_context(RequestContext::new().with_log_label("people-load"));
    let err = h.pipeline.send(request).await.unwrap_err();

    assert_eq!(err.status_code(), Some(500));
    assert_eq!(
        h.sink.messages(),
        vec!["HTTP 500 Internal Server Error: [GET] https://reqres.in/api/users (people-load)"]
    );
}

#[tokio::test]
async fn test_skip_error_log_silences_sink() {
    let h = harness();
    h.transport.respond(Err(server_error()));

    let request = ApiRequest::get(url(&format!("{}/users", BASE))).with_context(
        RequestContext::new()
            .with_skip_error_log()
            .with_log_label("silent-call"),
    );
    let err = h.pipeline.send(request).await.unwrap_err();

    assert_eq!(err.status_code(), Some(500));
    assert!(h.sink.is_empty());
}

#[tokio::test]
async fn test_network_failure_is_marked_as_network_error() {
    let h = harness();
    h.transport
        .respond(Err(DirectoryError::network("connection refused")));

    let err = h.client.delete(3).await.unwrap_err();

    assert!(err.is_network());
    assert_eq!(
        h.sink.messages(),
        vec!["HTTP network error: [DELETE] https://reqres.in/api/users/3 (people-delete)"]
    );
}

#[tokio::test]
async fn test_successful_requests_are_not_logged() {
    let h = harness();
    h.transport.respond_json(json!({"data": [{"id": 1}]}));

    h.client.list(1, 6).await.unwrap();

    assert!(h.sink.is_empty());
}

#[tokio::test]
async fn test_observer_before_injector_logs_request_without_key() {
    // Reversed chain: the observer sees the request before the key is added.
    let transport = Arc::new(MockTransport::new());
    let sink = Arc::new(MemoryErrorSink::new());
    let pipeline = HttpPipeline::builder(transport.clone())
        .with(ErrorLogInterceptor::new(sink.clone()))
        .with(ApiKeyInterceptor::default())
        .build();
    transport.respond(Err(server_error()));

    let request = ApiRequest::get(url("https://example.test/ping"))
        .with_context(RequestContext::new().with_api_key());
    pipeline.send(request).await.unwrap_err();

    // The key still went out and the failure was still reported once
    assert_eq!(transport.requests()[0].headers()[API_KEY_HEADER], API_KEY_VALUE);
    assert_eq!(sink.len(), 1);
}

#[tokio::test]
async fn test_list_normalizes_items_in_server_order() {
    let h = harness();
    h.transport.respond_json(json!({
        "page": 2,
        "per_page": 3,
        "total": 12,
        "total_pages": 4,
        "data": [
            {"id": 9, "first_name": "Ada", "last_name": "Lovelace", "email": "ada@example.com", "avatar": "https://example.com/9.png"},
            {"id": 4, "name": "Alan Turing"},
            {"id": "2"}
        ]
    }));

    let people = h.client.list(2, 3).await.unwrap();

    let ids: Vec<u64> = people.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![9, 4, 2]);
    assert_eq!(people[0].email, "ada@example.com");
    assert_eq!(people[1].first_name, "Alan");
    assert_eq!(people[1].last_name, "Turing");
    assert_eq!(people[1].email, "alan.turing@example.com");
    assert_eq!(people[1].avatar, "https://i.pravatar.cc/150?img=5");
    assert_eq!(people[2].first_name, "User2");
    assert_eq!(people[2].last_name, "Brown");
    assert_eq!(
        h.transport.requests()[0].url_with_params(),
        "https://reqres.in/api/users?page=2&per_page=3"
    );
}

#[tokio::test]
async fn test_list_with_invalid_envelope_is_decode_error() {
    let h = harness();
    h.transport
        .respond(Ok(ApiResponse::new(StatusCode::OK, "<html>oops</html>")));

    let err = h.client.list(1, 6).await.unwrap_err();
    assert!(matches!(err, DirectoryError::Decode { .. }));
    // Decode failures happen after the pipeline and are not HTTP failures
    assert!(h.sink.is_empty());
}

#[tokio::test]
async fn test_create_posts_dto_and_returns_ack() {
    let h = harness();
    h.transport.respond(Ok(ApiResponse::new(
        StatusCode::CREATED,
        r#"{"first_name":"Grace","id":"417","createdAt":"2025-05-01T10:00:00.000Z"}"#,
    )));

    let dto = PersonCreateDto::new("Grace", "Hopper", "grace@example.com");
    let ack = h.client.create(&dto).await.unwrap();

    assert_eq!(ack.id.as_deref(), Some("417"));
    assert_eq!(ack.created_at.as_deref(), Some("2025-05-01T10:00:00.000Z"));

    let requests = h.transport.requests();
    let sent = &requests[0];
    assert_eq!(sent.method(), &Method::POST);
    assert_eq!(sent.url_with_params(), "https://reqres.in/api/users");
    assert_eq!(sent.headers()[API_KEY_HEADER], API_KEY_VALUE);
    assert_eq!(
        sent.body(),
        Some(&json!({"first_name": "Grace", "last_name": "Hopper", "email": "grace@example.com"}))
    );
}

#[tokio::test]
async fn test_update_puts_to_record_endpoint() {
    let h = harness();
    h.transport
        .respond_json(json!({"updatedAt": "2025-05-01T10:00:00.000Z"}));

    let dto = PersonCreateDto::new("Alan M.", "Turing", "alanm@example.com");
    let ack = h.client.update(2, &dto).await.unwrap();

    assert_eq!(ack.updated_at.as_deref(), Some("2025-05-01T10:00:00.000Z"));
    let requests = h.transport.requests();
    let sent = &requests[0];
    assert_eq!(sent.method(), &Method::PUT);
    assert_eq!(sent.url_with_params(), "https://reqres.in/api/users/2");
    assert_eq!(sent.body().unwrap()["first_name"], "Alan M.");
}

#[tokio::test]
async fn test_delete_accepts_empty_body() {
    let h = harness();
    h.transport
        .respond(Ok(ApiResponse::new(StatusCode::NO_CONTENT, Vec::new())));

    h.client.delete(7).await.unwrap();

    let requests = h.transport.requests();
    let sent = &requests[0];
    assert_eq!(sent.method(), &Method::DELETE);
    assert_eq!(sent.url_with_params(), "https://reqres.in/api/users/7");
    assert!(sent.body().is_none());
}
