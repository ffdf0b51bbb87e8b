use jiff::SignedDuration;
use payloads::{ClientError, masters};
use query::lookup::{asset_classification, asset_parent_category, asset_sub_category};
use query::{
    AssetLookup, KeyScope, LookupConfig, LookupRequest, QueryClient, QueryOptions,
};
use test_helpers::mock::ASSET_MODULE;
use test_helpers::spawn_mdms;

fn fresh_for<T>(stale_time: SignedDuration) -> LookupConfig<T> {
    QueryOptions::default().stale_time(stale_time).into()
}

#[tokio::test]
async fn matching_type_fetches_over_http() -> anyhow::Result<()> {
    let mdms = spawn_mdms().await;
    let client = QueryClient::new();
    let request = LookupRequest::new("pb", ASSET_MODULE, masters::ASSET_CLASSIFICATION);

    let result =
        asset_classification(&client, &mdms.client, &request, &LookupConfig::default())
            .await
            .expect("classification lookup should run");

    let codes: Vec<_> = result.data.unwrap().into_iter().map(|c| c.code).collect();
    assert_eq!(codes, ["IMMOVABLE", "MOVABLE", "INFRASTRUCTURE"]);
    assert!(client.contains(&AssetLookup::Classification.cache_key()));
    assert_eq!(mdms.search_count(), 1);

    Ok(())
}

#[tokio::test]
async fn other_types_never_reach_mdms() {
    let mdms = spawn_mdms().await;
    let client = QueryClient::new();
    let request = LookupRequest::new("pb", ASSET_MODULE, "somethingElse");

    let config = LookupConfig::default();
    assert!(asset_classification(&client, &mdms.client, &request, &config).await.is_none());
    let config = LookupConfig::default();
    assert!(asset_parent_category(&client, &mdms.client, &request, &config).await.is_none());
    let config = LookupConfig::default();
    assert!(asset_sub_category(&client, &mdms.client, &request, &config).await.is_none());

    assert_eq!(mdms.search_count(), 0);
    assert!(client.is_empty());
}

#[tokio::test]
async fn fresh_entry_is_not_refetched() {
    let mdms = spawn_mdms().await;
    let client = QueryClient::new();
    let request = LookupRequest::new("pb", ASSET_MODULE, masters::ASSET_SUB_CATEGORY);
    let config = fresh_for(SignedDuration::from_mins(10));

    for _ in 0..3 {
        let result = asset_sub_category(&client, &mdms.client, &request, &config)
            .await
            .unwrap();
        assert_eq!(result.data.unwrap().len(), 9);
    }
    assert_eq!(mdms.search_count(), 1);

    client.time_source().advance(SignedDuration::from_mins(10));
    asset_sub_category(&client, &mdms.client, &request, &config).await;
    assert_eq!(mdms.search_count(), 2);
}

#[tokio::test]
async fn second_tenant_reads_first_tenants_entry_under_shared_key() {
    let mdms = spawn_mdms().await;
    let client = QueryClient::new();
    let config = fresh_for(SignedDuration::from_mins(10));

    let punjab = LookupRequest::new("pb", ASSET_MODULE, masters::ASSET_CLASSIFICATION);
    let maharashtra =
        LookupRequest::new("mh", ASSET_MODULE, masters::ASSET_CLASSIFICATION);

    asset_classification(&client, &mdms.client, &punjab, &config).await;
    let result = asset_classification(&client, &mdms.client, &maharashtra, &config)
        .await
        .unwrap();

    // Punjab's three classifications, not Maharashtra's one.
    assert_eq!(result.data.unwrap().len(), 3);
    assert_eq!(mdms.search_count(), 1);
}

#[tokio::test]
async fn per_request_scope_separates_tenants() {
    let mdms = spawn_mdms().await;
    let client = QueryClient::new();
    let config =
        fresh_for(SignedDuration::from_mins(10)).key_scope(KeyScope::PerRequest);

    let punjab = LookupRequest::new("pb", ASSET_MODULE, masters::ASSET_CLASSIFICATION);
    let maharashtra =
        LookupRequest::new("mh", ASSET_MODULE, masters::ASSET_CLASSIFICATION);

    asset_classification(&client, &mdms.client, &punjab, &config).await;
    let result = asset_classification(&client, &mdms.client, &maharashtra, &config)
        .await
        .unwrap();

    let data = result.data.unwrap();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0].name, "Immovable Property");
    assert_eq!(mdms.search_count(), 2);
    assert_eq!(client.len(), 2);
}

#[tokio::test]
async fn failure_is_reported_in_the_result() {
    let mdms = spawn_mdms().await;
    let client = QueryClient::new();
    let request =
        LookupRequest::new("pb", ASSET_MODULE, masters::ASSET_PARENT_CATEGORY);

    asset_parent_category(&client, &mdms.client, &request, &LookupConfig::default())
        .await;
    mdms.state.fail_with(Some(502));
    let result =
        asset_parent_category(&client, &mdms.client, &request, &LookupConfig::default())
            .await
            .unwrap();

    assert!(result.is_error());
    assert!(matches!(
        result.error.as_deref(),
        Some(ClientError::APIError(status, _)) if status.as_u16() == 502
    ));
    // Data from the earlier success is still there.
    assert_eq!(result.data.unwrap().len(), 5);
}
