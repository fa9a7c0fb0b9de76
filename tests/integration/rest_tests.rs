//! Full sync against a local Google Ads REST stand-in.

use std::io::Write;

use googleads_connector::transport::RestClientFactory;
use googleads_connector::{
    Connector, CredentialsFile, ErrorKind, PageToken, SyncContext, SyncRunner,
    USER_RESOURCE_TYPE,
};
use serde_json::{Value, json};
use tempfile::NamedTempFile;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::common::{self, CUSTOMER_ID};

const USERS_QUERY: &str = "SELECT customer_user_access.user_id, \
    customer_user_access.email_address, customer_user_access.access_role \
    FROM customer_user_access";

fn credentials_file(token: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp file");
    write!(
        file,
        "{}",
        json!({ "type": "authorized_user", "access_token": token })
    )
    .expect("write credentials");
    file
}

fn connector(server: &MockServer, credentials: &NamedTempFile) -> Connector {
    common::init_tracing();
    let factory = RestClientFactory::builder()
        .base_url(server.uri())
        .credentials(CredentialsFile::new(credentials.path()))
        .build()
        .expect("factory");
    Connector::new(&common::config(), factory)
}

fn user(id: i64, email: &str, role: &str) -> Value {
    json!({
        "customerUserAccess": {
            "userId": id.to_string(),
            "emailAddress": email,
            "accessRole": role,
        }
    })
}

fn search_path() -> String {
    format!("/customers/{}/googleAds:search", CUSTOMER_ID)
}

async fn mount_directory(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/customers:listAccessibleCustomers"))
        .and(header("authorization", "Bearer ya29.integration"))
        .and(header("developer-token", "integration-dev-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "resourceNames": ["customers/111", "customers/222"]
        })))
        .mount(server)
        .await;

    Mock::given(method("POST"))
        .and(path(search_path()))
        .and(body_json(json!({ "query": USERS_QUERY })))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("request-id", "req-users-1")
                .set_body_json(json!({
                    "results": [
                        user(1, "alice@example.com", "ADMIN"),
                        user(2, "bob@example.com", "STANDARD"),
                    ],
                    "nextPageToken": "users-2",
                })),
        )
        .mount(server)
        .await;

    Mock::given(method("POST"))
        .and(path(search_path()))
        .and(body_json(json!({ "query": USERS_QUERY, "pageToken": "users-2" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [user(3, "carol@example.com", "ADMIN")],
        })))
        .mount(server)
        .await;

    Mock::given(method("POST"))
        .and(path(search_path()))
        .and(body_json(json!({
            "query": format!(
                "{} WHERE customer_user_access.access_role = \"ADMIN\"",
                USERS_QUERY
            ),
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [
                user(1, "alice@example.com", "ADMIN"),
                user(3, "carol@example.com", "ADMIN"),
            ],
        })))
        .mount(server)
        .await;

    Mock::given(method("POST"))
        .and(path(search_path()))
        .and(body_json(json!({
            "query": format!(
                "{} WHERE customer_user_access.access_role = \"STANDARD\"",
                USERS_QUERY
            ),
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [user(2, "bob@example.com", "STANDARD")],
        })))
        .mount(server)
        .await;

    // Roles nobody holds.
    Mock::given(method("POST"))
        .and(path(search_path()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "results": [] })))
        .with_priority(10)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_full_sync_over_rest() {
    let server = MockServer::start().await;
    mount_directory(&server).await;
    let credentials = credentials_file("ya29.integration");
    let connector = connector(&server, &credentials);

    let output = SyncRunner::new(&connector, SyncContext::new())
        .run()
        .await
        .expect("sync");

    let users: Vec<String> = output
        .resources_of(&USER_RESOURCE_TYPE)
        .map(|r| r.display_name().to_owned())
        .collect();
    assert_eq!(
        users,
        ["alice@example.com", "bob@example.com", "carol@example.com"]
    );
    assert_eq!(output.resources.len(), 3 + 2 + 5);

    let mut grants: Vec<String> = output.grants.iter().map(|g| g.to_string()).collect();
    grants.sort();
    assert_eq!(
        grants,
        [
            "role:ADMIN:member:user:1",
            "role:ADMIN:member:user:3",
            "role:STANDARD:member:user:2",
        ]
    );

    let requests = server.received_requests().await.expect("recording enabled");
    assert!(requests.iter().all(|r| {
        r.headers
            .get("login-customer-id")
            .and_then(|v| v.to_str().ok())
            == Some(CUSTOMER_ID)
    }));
}

#[tokio::test]
async fn test_rotated_token_used_by_next_call() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/customers:listAccessibleCustomers"))
        .and(header("authorization", "Bearer ya29.rotated"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "resourceNames": ["customers/333"]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/customers:listAccessibleCustomers"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": { "code": 401, "message": "Request had invalid authentication credentials." }
        })))
        .with_priority(10)
        .mount(&server)
        .await;

    let credentials = credentials_file("ya29.expired");
    let connector = connector(&server, &credentials);
    let accounts = connector
        .resource_syncers()
        .into_iter()
        .find(|s| s.resource_type().id() == "account")
        .expect("account syncer");

    let err = accounts
        .list(&SyncContext::new(), None, &PageToken::start())
        .await
        .expect_err("expired token");
    assert_eq!(err.kind(), ErrorKind::Unauthorized);

    std::fs::write(
        credentials.path(),
        json!({ "type": "authorized_user", "access_token": "ya29.rotated" }).to_string(),
    )
    .expect("rotate token");

    let page = accounts
        .list(&SyncContext::new(), None, &PageToken::start())
        .await
        .expect("rotated token");
    assert_eq!(page.items[0].id().resource(), "customers/333");
}

#[tokio::test]
async fn test_missing_credentials_file_fails_sync() {
    let server = MockServer::start().await;
    let credentials = credentials_file("unused");
    let connector = connector(&server, &credentials);
    let missing = credentials.path().to_path_buf();
    drop(credentials);
    assert!(!missing.exists());

    let err = SyncRunner::new(&connector, SyncContext::new())
        .run()
        .await
        .expect_err("no credentials");

    assert_eq!(err.kind(), ErrorKind::Configuration);
    assert!(err.message().contains("fetching credentials"));
    assert!(
        server
            .received_requests()
            .await
            .expect("recording enabled")
            .is_empty()
    );
}
