//! Syncer behavior through the public connector API.

use googleads_connector::testing::MockAdsApi;
use googleads_connector::types::{ProfileValue, REQUEST_ID_ANNOTATION};
use googleads_connector::{
    ErrorKind, PageToken, Resource, ResourceId, ResourceSyncer, ResourceTrait, SyncContext,
    UserEmail, ROLE_RESOURCE_TYPE,
};

use crate::common::{self, CUSTOMER_ID};

fn syncer(connector: &googleads_connector::Connector, id: &str) -> Box<dyn ResourceSyncer> {
    connector
        .resource_syncers()
        .into_iter()
        .find(|s| s.resource_type().id() == id)
        .expect("syncer is registered")
}

fn role(key: &str) -> Resource {
    Resource::new(&ROLE_RESOURCE_TYPE, key, key.to_lowercase())
}

#[tokio::test]
async fn test_two_accounts_listed_once() {
    let api = common::populated_api();
    let connector = common::connector(&api);
    let accounts = syncer(&connector, "account");

    let page = accounts
        .list(&SyncContext::new(), None, &PageToken::start())
        .await
        .expect("list accounts");

    assert!(page.is_last());
    let ids: Vec<String> = page.items.iter().map(|r| r.id().to_string()).collect();
    assert_eq!(ids, ["account:customers/111", "account:customers/222"]);
    assert!(page.items.iter().all(|r| r.parent_id().is_none()));
    assert_eq!(page.items[0].display_name(), "customers/111");

    let metadata = api.recorded_metadata();
    assert!(!metadata.is_empty());
    assert!(
        metadata
            .iter()
            .all(|m| m.developer_token == "integration-dev-token"
                && m.login_customer_id.as_deref() == Some(CUSTOMER_ID))
    );
    assert_eq!(api.connect_count(), api.released_count());
}

#[tokio::test]
async fn test_users_carry_profile_and_email() {
    let api = common::populated_api();
    let connector = common::connector(&api);
    let users = syncer(&connector, "user");
    let parent = ResourceId::new("account", "customers/111");

    let page = users
        .list(&SyncContext::new(), Some(&parent), &PageToken::start())
        .await
        .expect("list users");

    assert_eq!(page.items.len(), 4);
    let alice = &page.items[0];
    assert_eq!(alice.id().to_string(), "user:1");
    assert_eq!(alice.display_name(), "alice@example.com");
    assert_eq!(alice.parent_id(), Some(&parent));
    assert_eq!(alice.profile().get("user_id"), Some(&ProfileValue::Integer(1)));
    assert_eq!(
        alice.profile().get("login").and_then(ProfileValue::as_str),
        Some("alice@example.com")
    );
    assert_eq!(
        alice.resource_trait(),
        Some(&ResourceTrait::User {
            emails: vec![UserEmail {
                address: "alice@example.com".into(),
                verified: true,
            }],
        })
    );

    let searches = api.searches();
    assert_eq!(searches.len(), 1);
    assert_eq!(searches[0].customer_id, CUSTOMER_ID);
}

#[tokio::test]
async fn test_admin_role_grants() {
    let api = common::populated_api();
    let connector = common::connector(&api);
    let roles = syncer(&connector, "role");

    let page = roles
        .grants(&SyncContext::new(), &role("ADMIN"), &PageToken::start())
        .await
        .expect("admin grants");

    let grants: Vec<String> = page.items.iter().map(|g| g.to_string()).collect();
    assert_eq!(grants, ["role:ADMIN:member:user:1", "role:ADMIN:member:user:2"]);

    let query = api.searches()[0].query.to_string();
    assert!(query.contains(r#"WHERE customer_user_access.access_role = "ADMIN""#));
}

#[tokio::test]
async fn test_role_without_members_has_no_grants() {
    let api = common::populated_api();
    let connector = common::connector(&api);

    let page = syncer(&connector, "role")
        .grants(&SyncContext::new(), &role("EMAIL_ONLY"), &PageToken::start())
        .await
        .expect("email-only grants");

    assert!(page.items.is_empty());
    assert!(page.is_last());
}

#[tokio::test]
async fn test_null_email_fails_the_page() {
    let api = MockAdsApi::new()
        .with_user(1, "alice@example.com", "ADMIN")
        .with_user(2, "", "ADMIN");
    let connector = common::connector(&api);

    let err = syncer(&connector, "user")
        .list(&SyncContext::new(), None, &PageToken::start())
        .await
        .expect_err("row without email");

    assert_eq!(err.kind(), ErrorKind::Mapping);
    assert!(err.message().contains("creating user resource"));
    assert_eq!(api.released_count(), api.connect_count());
}

#[tokio::test]
async fn test_user_pagination_terminates() {
    let api = common::populated_api().with_page_size(3);
    let connector = common::connector(&api);
    let users = syncer(&connector, "user");
    let ctx = SyncContext::new();

    let mut token = PageToken::start();
    let mut ids = Vec::new();
    let mut pages = 0;
    loop {
        let page = users.list(&ctx, None, &token).await.expect("page");
        pages += 1;
        ids.extend(page.items.iter().map(|r| r.id().resource().to_owned()));
        match page.next_page_token {
            Some(next) => token = next,
            None => break,
        }
    }

    assert_eq!(pages, 2);
    assert_eq!(ids, ["1", "2", "3", "4"]);
    assert_eq!(api.connect_count(), 2);
    assert_eq!(api.released_count(), 2);
}

#[tokio::test]
async fn test_request_id_reported_on_user_pages() {
    let api = common::populated_api().with_request_id("req-integration");
    let connector = common::connector(&api);

    let page = syncer(&connector, "user")
        .list(&SyncContext::new(), None, &PageToken::start())
        .await
        .expect("list users");

    assert_eq!(
        page.annotations.get_str(REQUEST_ID_ANNOTATION),
        Some("req-integration")
    );
}

#[tokio::test]
async fn test_missing_customer_id_never_connects() {
    let api = common::populated_api();
    let config = googleads_connector::ConnectorConfig::builder()
        .credentials_json_file_path("/etc/googleads/credentials.json")
        .developer_token("integration-dev-token")
        .build();
    let connector = googleads_connector::Connector::new(&config, api.clone());

    let err = syncer(&connector, "user")
        .list(&SyncContext::new(), None, &PageToken::start())
        .await
        .expect_err("no customer id");

    assert_eq!(err.kind(), ErrorKind::Configuration);
    assert_eq!(api.connect_count(), 0);

    // Accounts do not need a customer id.
    let page = syncer(&connector, "account")
        .list(&SyncContext::new(), None, &PageToken::start())
        .await
        .expect("list accounts");
    assert_eq!(page.items.len(), 2);
    assert_eq!(api.recorded_metadata()[0].login_customer_id, None);
}

#[tokio::test]
async fn test_upstream_failure_keeps_kind_and_context() {
    let api = common::populated_api();
    api.fail_next_search(googleads_connector::Error::unauthorized("token revoked"));
    let connector = common::connector(&api);

    let err = syncer(&connector, "user")
        .list(&SyncContext::new(), None, &PageToken::start())
        .await
        .expect_err("search fails");

    assert_eq!(err.kind(), ErrorKind::Unauthorized);
    assert!(err.message().contains("searching customer user access"));
    assert!(err.message().contains("token revoked"));
}

#[tokio::test]
async fn test_syncers_release_clients_after_every_call() {
    let api = common::populated_api();
    let connector = common::connector(&api);
    let ctx = SyncContext::new();

    for syncer in connector.resource_syncers() {
        let page = syncer
            .list(&ctx, None, &PageToken::start())
            .await
            .expect("list");
        for resource in &page.items {
            syncer
                .entitlements(&ctx, resource, &PageToken::start())
                .await
                .expect("entitlements");
            syncer
                .grants(&ctx, resource, &PageToken::start())
                .await
                .expect("grants");
        }
    }

    // user list, account list, five role grant searches
    assert_eq!(api.connect_count(), 7);
    assert_eq!(api.released_count(), 7);
}
