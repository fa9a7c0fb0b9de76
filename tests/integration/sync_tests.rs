//! Full sync passes through [`SyncRunner`].

use std::time::Duration;

use googleads_connector::{
    Error, ErrorKind, SyncContext, SyncRunner, ACCOUNT_RESOURCE_TYPE, ROLE_RESOURCE_TYPE,
    USER_RESOURCE_TYPE,
};

use crate::common;

#[tokio::test]
async fn test_full_sync_builds_identity_graph() {
    let api = common::populated_api().with_page_size(2);
    let connector = common::connector(&api);

    let output = SyncRunner::new(&connector, SyncContext::new())
        .run()
        .await
        .expect("sync");

    let type_ids: Vec<&str> = output.resource_types.iter().map(|t| t.id()).collect();
    assert_eq!(type_ids, ["user", "account", "role"]);

    assert_eq!(output.resources_of(&USER_RESOURCE_TYPE).count(), 4);
    assert_eq!(output.resources_of(&ACCOUNT_RESOURCE_TYPE).count(), 2);
    assert_eq!(output.resources_of(&ROLE_RESOURCE_TYPE).count(), 5);

    assert_eq!(output.entitlements.len(), 5);
    assert!(output.entitlements.iter().all(|e| e.slug() == "member"));

    let mut grants: Vec<String> = output.grants.iter().map(|g| g.to_string()).collect();
    grants.sort();
    assert_eq!(
        grants,
        [
            "role:ADMIN:member:user:1",
            "role:ADMIN:member:user:2",
            "role:READ_ONLY:member:user:4",
            "role:STANDARD:member:user:3",
        ]
    );

    assert_eq!(api.connect_count(), api.released_count());
}

#[tokio::test]
async fn test_every_grant_principal_is_a_synced_user() {
    let api = common::populated_api();
    let connector = common::connector(&api);

    let output = SyncRunner::new(&connector, SyncContext::new())
        .run()
        .await
        .expect("sync");

    let users: Vec<_> = output
        .resources_of(&USER_RESOURCE_TYPE)
        .map(|r| r.id().clone())
        .collect();
    for grant in &output.grants {
        assert!(users.contains(grant.principal()), "unknown principal {}", grant);
        assert!(
            output
                .entitlements
                .iter()
                .any(|e| &e.id() == grant.entitlement()),
            "grant {} has no entitlement",
            grant
        );
    }
}

#[tokio::test]
async fn test_sync_output_serializes_to_json() {
    let api = common::populated_api();
    let connector = common::connector(&api);

    let output = SyncRunner::new(&connector, SyncContext::new())
        .run()
        .await
        .expect("sync");
    let json = serde_json::to_value(&output).expect("serialize");

    assert_eq!(json["metadata"]["display_name"], "Google Ads connector");
    assert_eq!(json["resources"].as_array().map(Vec::len), Some(11));
    assert_eq!(json["grants"].as_array().map(Vec::len), Some(4));
    assert!(!json.to_string().contains("integration-dev-token"));
}

#[tokio::test]
async fn test_sync_fails_with_first_syncer_error() {
    let api = common::populated_api();
    api.fail_next_list(Error::unavailable("service down"));
    let connector = common::connector(&api);

    let err = SyncRunner::new(&connector, SyncContext::new())
        .run()
        .await
        .expect_err("account listing fails");

    assert_eq!(err.kind(), ErrorKind::Unavailable);
    assert!(err.message().contains("listing accounts"));
}

#[tokio::test]
async fn test_sync_stops_on_cancellation() {
    let api = common::populated_api();
    api.stall_searches();
    let connector = common::connector(&api);
    let ctx = SyncContext::new();

    let canceller = ctx.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(20)).await;
        canceller.cancel();
    });

    let err = SyncRunner::new(&connector, ctx)
        .run()
        .await
        .expect_err("cancelled");

    assert_eq!(err.kind(), ErrorKind::Cancelled);
    assert_eq!(api.connect_count(), api.released_count());
}

#[tokio::test(start_paused = true)]
async fn test_sync_honors_deadline() {
    let api = common::populated_api();
    api.stall_searches();
    let connector = common::connector(&api);

    let err = SyncRunner::new(
        &connector,
        SyncContext::new().with_timeout(Duration::from_secs(5)),
    )
    .run()
    .await
    .expect_err("deadline");

    assert_eq!(err.kind(), ErrorKind::Timeout);
}
