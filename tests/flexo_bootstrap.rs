//! Integration tests for the Flexo post-start bootstrap.
//!
//! Layer 1 and the SysML v2 API are both served by one wiremock server; a
//! short poll policy keeps the unhappy paths fast.

use std::time::Duration;

use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use sysml_v2::server::{FlexoBootstrap, OrgStatus, PollPolicy};

const TOKEN: &str = "test-token";

fn fast() -> PollPolicy {
    PollPolicy {
        attempts: 3,
        interval: Duration::from_millis(10),
    }
}

fn bootstrap(server: &MockServer) -> FlexoBootstrap {
    FlexoBootstrap::new(&server.uri(), TOKEN, &server.uri())
        .unwrap()
        .with_policy(fast())
}

async fn mount_ready(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/projects"))
        .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
        .mount(server)
        .await;
}

async fn mount_org(server: &MockServer, response: ResponseTemplate) {
    Mock::given(method("PUT"))
        .and(path("/orgs/sysmlv2"))
        .and(header("content-type", "text/turtle"))
        .and(header("authorization", "Bearer test-token"))
        .respond_with(response)
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn creates_org_and_waits_for_api() {
    let server = MockServer::start().await;
    mount_ready(&server).await;
    mount_org(&server, ResponseTemplate::new(201)).await;

    let outcome = bootstrap(&server).run().await;

    assert!(outcome.layer1_ready);
    assert_eq!(outcome.org, Some(OrgStatus::Created));
    assert!(outcome.api_ready);

    let requests = server.received_requests().await.unwrap();
    let put = requests
        .iter()
        .find(|r| r.method.as_str() == "PUT")
        .unwrap();
    let body = String::from_utf8_lossy(&put.body);
    assert!(body.contains("dct:title"));
}

#[tokio::test]
async fn conflict_means_org_exists() {
    for status in [409, 412] {
        let server = MockServer::start().await;
        mount_ready(&server).await;
        mount_org(&server, ResponseTemplate::new(status)).await;

        let outcome = bootstrap(&server).run().await;
        assert_eq!(outcome.org, Some(OrgStatus::AlreadyExists), "status {}", status);
    }
}

#[tokio::test]
async fn already_exists_body_means_org_exists() {
    let server = MockServer::start().await;
    mount_ready(&server).await;
    mount_org(
        &server,
        ResponseTemplate::new(500).set_body_string("Org sysmlv2 Already Exists"),
    )
    .await;

    let outcome = bootstrap(&server).run().await;
    assert_eq!(outcome.org, Some(OrgStatus::AlreadyExists));
}

#[tokio::test]
async fn other_failures_are_reported_not_raised() {
    let server = MockServer::start().await;
    mount_ready(&server).await;
    mount_org(&server, ResponseTemplate::new(403).set_body_string("forbidden")).await;

    let outcome = bootstrap(&server).run().await;
    assert_eq!(
        outcome.org,
        Some(OrgStatus::Failed("HTTP 403: forbidden".to_string()))
    );
    assert!(outcome.api_ready);
}

#[tokio::test]
async fn layer1_retried_until_ready() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(2)
        .mount(&server)
        .await;
    mount_ready(&server).await;
    mount_org(&server, ResponseTemplate::new(201)).await;

    let outcome = bootstrap(&server).run().await;
    assert!(outcome.layer1_ready);
    assert_eq!(outcome.org, Some(OrgStatus::Created));
}

#[tokio::test]
async fn api_never_ready_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/projects"))
        .respond_with(ResponseTemplate::new(502))
        .expect(3)
        .mount(&server)
        .await;
    mount_org(&server, ResponseTemplate::new(201)).await;

    let outcome = bootstrap(&server).run().await;
    assert!(outcome.layer1_ready);
    assert!(!outcome.api_ready);
}

#[tokio::test]
async fn unreachable_layer1_skips_the_rest() {
    let bootstrap = FlexoBootstrap::new("http://127.0.0.1:9", TOKEN, "http://127.0.0.1:9")
        .unwrap()
        .with_policy(fast());

    let outcome = bootstrap.run().await;
    assert!(!outcome.layer1_ready);
    assert_eq!(outcome.org, None);
    assert!(!outcome.api_ready);
}
