use std::collections::HashMap;

use ptero_api::{
    CreateServerRequest, CreateUserRequest, DeployConfig, FeatureLimits, PteroClient, ServerLimits,
    normalize_host,
};
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn user_request() -> CreateUserRequest {
    CreateUserRequest {
        email: "ryzz4821@panel.zone".into(),
        username: "ryzz4821".into(),
        first_name: "ryzz".into(),
        last_name: "User".into(),
        language: "en".into(),
        password: "ryzz4821!!".into(),
    }
}

#[tokio::test]
async fn create_user_sends_bearer_and_returns_id() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/application/users"))
        .and(header("Authorization", "Bearer ptla_secret"))
        .and(body_partial_json(json!({"username": "ryzz4821", "last_name": "User"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "object": "user",
            "attributes": {"id": 42, "username": "ryzz4821", "email": "ryzz4821@panel.zone"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = PteroClient::new(normalize_host(&format!("{}/", server.uri())), "ptla_secret");
    let user = client.create_user(&user_request()).await.unwrap();
    assert_eq!(user.attributes.id, 42);
}

#[tokio::test]
async fn create_user_rejection_surfaces_detail() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/application/users"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({
            "errors": [{"code": "ValidationException", "status": "422", "detail": "User exists"}]
        })))
        .mount(&server)
        .await;

    let client = PteroClient::new(server.uri(), "ptla_secret");
    let err = client.create_user(&user_request()).await.unwrap_err();
    assert!(!err.is_transport());
    assert_eq!(err.detail(), "User exists");
}

#[tokio::test]
async fn create_server_posts_limits() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/application/servers"))
        .and(body_partial_json(json!({
            "user": 42,
            "limits": {"memory": 2048, "swap": 0, "disk": 2048, "io": 500, "cpu": 60},
            "deploy": {"locations": [1], "dedicated_ip": false, "port_range": []}
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "object": "server",
            "attributes": {
                "id": 7, "name": "RYZZ SERVER", "user": 42, "suspended": false,
                "status": "installing",
                "limits": {"memory": 2048, "swap": 0, "disk": 2048, "io": 500, "cpu": 60}
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = PteroClient::new(server.uri(), "ptla_secret");
    let created = client
        .create_server(&CreateServerRequest {
            name: "RYZZ SERVER".into(),
            user: 42,
            egg: 15,
            docker_image: "ghcr.io/parkervcp/yolks:nodejs_18".into(),
            startup: "npm start".into(),
            environment: HashMap::new(),
            limits: ServerLimits { memory: 2048, swap: 0, disk: 2048, io: 500, cpu: 60 },
            feature_limits: FeatureLimits { databases: 1, backups: 1, allocations: 1 },
            deploy: DeployConfig { locations: vec![1], dedicated_ip: false, port_range: vec![] },
        })
        .await
        .unwrap();
    assert_eq!(created.attributes.status.as_deref(), Some("installing"));
}

#[tokio::test]
async fn list_servers_requests_single_bounded_page() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/application/servers"))
        .and(query_param("per_page", "50"))
        .and(query_param("include", "user,allocations"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "object": "list",
            "data": [
                {"object": "server", "attributes": {
                    "id": 1, "name": "A", "user": 3, "suspended": true, "status": null,
                    "limits": {"memory": 0, "swap": 0, "disk": 0, "io": 500, "cpu": 0, "threads": null}
                }},
                {"object": "server", "attributes": {
                    "id": 2, "name": "B", "user": 4, "suspended": false,
                    "limits": {"memory": 1024, "swap": -1, "disk": 1024, "io": 500, "cpu": 30}
                }}
            ],
            "meta": {"pagination": {"total": 2}}
        })))
        .mount(&server)
        .await;

    let client = PteroClient::new(server.uri(), "ptla_secret");
    let list = client.list_servers().await.unwrap();
    assert_eq!(list.data.len(), 2);
    assert!(list.data[0].attributes.suspended);
    assert_eq!(list.data[1].attributes.status, None);
}

#[tokio::test]
async fn unreachable_panel_is_transport_error() {
    // Nothing listens on port 9 of the loopback interface.
    let client = PteroClient::new("http://127.0.0.1:9", "ptla_secret");
    let err = client.list_servers().await.unwrap_err();
    assert!(err.is_transport());
}
