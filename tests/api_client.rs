//! Integration tests for the SysML v2 API client.
//!
//! Every test runs the client against a wiremock server, so request shapes
//! and error mapping are checked over real HTTP.

use serde_json::json;
use wiremock::matchers::{body_json, body_string, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use sysml_v2::api::{ApiError, SysmlClient};

// =============================================================================
// Health
// =============================================================================

mod health {
    use super::*;

    #[tokio::test]
    async fn healthy_on_any_non_5xx() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let client = SysmlClient::new(&server.uri()).unwrap();
        assert!(client.healthy().await);
        assert_eq!(client.ping().await.unwrap(), 404);
    }

    #[tokio::test]
    async fn unhealthy_on_5xx() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let client = SysmlClient::new(&server.uri()).unwrap();
        assert!(!client.healthy().await);
    }

    #[tokio::test]
    async fn unhealthy_when_unreachable() {
        let client = SysmlClient::new("http://127.0.0.1:9").unwrap();
        assert!(!client.healthy().await);
        assert!(client.ping().await.unwrap_err().is_unreachable());
    }
}

// =============================================================================
// Projects, commits, elements
// =============================================================================

mod resources {
    use super::*;

    #[tokio::test]
    async fn list_projects_passes_json_through() {
        let server = MockServer::start().await;
        let projects = json!([
            {"@id": "p1", "name": "Drone", "extra": {"nested": [1, 2]}},
            {"@id": "p2", "name": "Rover"}
        ]);
        Mock::given(method("GET"))
            .and(path("/projects"))
            .respond_with(ResponseTemplate::new(200).set_body_json(&projects))
            .expect(1)
            .mount(&server)
            .await;

        let client = SysmlClient::new(&server.uri()).unwrap();
        let listed = client.list_projects().await.unwrap();
        assert_eq!(serde_json::Value::Array(listed), projects);
    }

    #[tokio::test]
    async fn missing_project_is_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/projects/nope"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({"message": "no project"})))
            .mount(&server)
            .await;

        let client = SysmlClient::new(&server.uri()).unwrap();
        match client.get_project("nope").await {
            Err(ApiError::NotFound(detail)) => {
                assert!(detail.contains("/projects/nope"));
                assert!(detail.contains("no project"));
            }
            other => panic!("expected NotFound, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn server_error_carries_status_and_message() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/projects/p1/commits"))
            .respond_with(ResponseTemplate::new(500).set_body_json(json!({"error": "db down"})))
            .mount(&server)
            .await;

        let client = SysmlClient::new(&server.uri()).unwrap();
        let err = client.list_commits("p1").await.unwrap_err();
        assert_eq!(err.status(), Some(500));
        assert!(matches!(err, ApiError::Status { ref message, .. } if message == "db down"));
    }

    #[tokio::test]
    async fn create_project_omits_empty_description() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/projects"))
            .and(body_json(json!({"name": "Drone"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"@id": "p9"})))
            .expect(2)
            .mount(&server)
            .await;

        let client = SysmlClient::new(&server.uri()).unwrap();
        let created = client.create_project("Drone", None).await.unwrap();
        assert_eq!(created["@id"], "p9");
        client.create_project("Drone", Some("")).await.unwrap();
    }

    #[tokio::test]
    async fn create_project_sends_description() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/projects"))
            .and(body_json(json!({"name": "Drone", "description": "quad"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"@id": "p9"})))
            .expect(1)
            .mount(&server)
            .await;

        let client = SysmlClient::new(&server.uri()).unwrap();
        client.create_project("Drone", Some("quad")).await.unwrap();
    }

    #[tokio::test]
    async fn element_paths() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/projects/p1/commits/c1/elements"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"@id": "e1"}])))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/projects/p1/commits/c1/elements/e1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"@id": "e1"})))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/projects/p1/commits/c1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"@id": "c1"})))
            .mount(&server)
            .await;

        let client = SysmlClient::new(&server.uri()).unwrap();
        assert_eq!(client.get_elements("p1", "c1").await.unwrap().len(), 1);
        assert_eq!(client.get_element("p1", "c1", "e1").await.unwrap()["@id"], "e1");
        assert_eq!(client.get_commit("p1", "c1").await.unwrap()["@id"], "c1");
    }

    #[tokio::test]
    async fn query_posts_body() {
        let server = MockServer::start().await;
        let query = json!({"@type": "Query", "select": ["name"]});
        Mock::given(method("POST"))
            .and(path("/projects/p1/commits/c1/query"))
            .and(body_json(&query))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"name": "A"}])))
            .expect(1)
            .mount(&server)
            .await;

        let client = SysmlClient::new(&server.uri()).unwrap();
        let rows = client.query("p1", "c1", &query).await.unwrap();
        assert_eq!(rows[0]["name"], "A");
    }

    #[tokio::test]
    async fn unreachable_server_is_classified() {
        let client = SysmlClient::new("http://127.0.0.1:9").unwrap();
        let err = client.list_projects().await.unwrap_err();
        assert!(matches!(err, ApiError::Unreachable(_)));
    }
}

// =============================================================================
// Parse endpoint
// =============================================================================

mod parse {
    use super::*;

    #[tokio::test]
    async fn accepted_text_has_no_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/parse"))
            .and(header("content-type", "text/plain"))
            .and(body_string("part def A;"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let client = SysmlClient::new(&server.uri()).unwrap();
        assert_eq!(client.parse("part def A;").await.unwrap(), None);
    }

    #[tokio::test]
    async fn error_field_preferred_then_message_then_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/parse"))
            .and(body_string("one"))
            .respond_with(
                ResponseTemplate::new(400)
                    .set_body_json(json!({"error": "bad token", "message": "ignored"})),
            )
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/parse"))
            .and(body_string("two"))
            .respond_with(ResponseTemplate::new(422).set_body_json(json!({"message": "no type"})))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/parse"))
            .and(body_string("three"))
            .respond_with(ResponseTemplate::new(500).set_body_string("stack trace"))
            .mount(&server)
            .await;

        let client = SysmlClient::new(&server.uri()).unwrap();
        assert_eq!(client.parse("one").await.unwrap().as_deref(), Some("bad token"));
        assert_eq!(client.parse("two").await.unwrap().as_deref(), Some("no type"));
        assert_eq!(client.parse("three").await.unwrap().as_deref(), Some("HTTP 500"));
    }

    #[tokio::test]
    async fn non_string_error_field_is_kept() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/parse"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "error": ["line 3: unresolved 'Wheel'"],
                "message": "parse failed"
            })))
            .mount(&server)
            .await;

        let client = SysmlClient::new(&server.uri()).unwrap();
        let message = client.parse("part w : Wheel;").await.unwrap().unwrap();
        assert!(message.contains("unresolved 'Wheel'"), "{}", message);
    }

    #[tokio::test]
    async fn non_string_error_field_in_resource_errors() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/projects"))
            .respond_with(
                ResponseTemplate::new(500).set_body_json(json!({"error": {"code": 7}})),
            )
            .mount(&server)
            .await;

        let client = SysmlClient::new(&server.uri()).unwrap();
        let err = client.list_projects().await.unwrap_err();
        assert!(matches!(err, ApiError::Status { ref message, .. } if message.contains("\"code\":7")));
    }
}
