use payloads::{AssetParentCategory, ClientError, masters};
use reqwest::StatusCode;
use test_helpers::mock::ASSET_MODULE;
use test_helpers::{assert_status_code, spawn_mdms};

#[tokio::test]
async fn endpoints_send_tenant_module_and_master() -> anyhow::Result<()> {
    let mdms = spawn_mdms().await;

    let categories = mdms
        .client
        .asset_type_parent("pb", ASSET_MODULE, masters::ASSET_PARENT_CATEGORY)
        .await?;

    let codes: Vec<_> = categories.iter().map(|c| c.code.as_str()).collect();
    assert_eq!(codes, ["LAND", "BUILDING", "VEHICLE", "FURNITURE", "ROAD"]);

    let requests = mdms.state.requests();
    let criteria = &requests[0].criteria;
    assert_eq!(criteria.tenant_id.0, "pb");
    assert_eq!(criteria.module_details[0].module_name.0, ASSET_MODULE);
    assert_eq!(
        criteria.module_details[0].master_details[0].name,
        masters::ASSET_PARENT_CATEGORY
    );
    assert_eq!(requests[0].request_info.api_id, "Rainmaker");

    Ok(())
}

#[tokio::test]
async fn city_tenant_reads_state_masters() -> anyhow::Result<()> {
    let mdms = spawn_mdms().await;

    let sub_categories = mdms
        .client
        .asset_parent_sub_type("pb.amritsar", ASSET_MODULE, masters::ASSET_SUB_CATEGORY)
        .await?;

    assert_eq!(sub_categories.len(), 9);
    let chair = sub_categories.iter().find(|s| s.code == "CHAIR").unwrap();
    assert!(!chair.active);
    assert_eq!(chair.asset_parent_category, "FURNITURE");

    Ok(())
}

#[tokio::test]
async fn unknown_master_is_empty_not_an_error() -> anyhow::Result<()> {
    let mdms = spawn_mdms().await;

    let categories: Vec<AssetParentCategory> =
        mdms.client.master("pb", "PT", "assetParentCategory").await?;

    assert!(categories.is_empty());
    Ok(())
}

#[tokio::test]
async fn missing_tenant_is_rejected() {
    let mdms = spawn_mdms().await;

    let result = mdms
        .client
        .asset_classification("", ASSET_MODULE, masters::ASSET_CLASSIFICATION)
        .await;

    assert_status_code(result, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn server_errors_carry_the_response_body() {
    let mdms = spawn_mdms().await;
    mdms.state.fail_with(Some(503));

    let result = mdms
        .client
        .asset_classification("pb", ASSET_MODULE, masters::ASSET_CLASSIFICATION)
        .await;

    match result {
        Err(ClientError::APIError(status, body)) => {
            assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
            assert!(body.contains("EG_MDMS_UNAVAILABLE"));
        }
        other => panic!("expected APIError, got {other:?}"),
    }
}

#[tokio::test]
async fn unreachable_service_is_a_network_error() {
    let client = payloads::MdmsClient::new("http://127.0.0.1:1");

    let result = client
        .asset_classification("pb", ASSET_MODULE, masters::ASSET_CLASSIFICATION)
        .await;

    assert!(matches!(result, Err(ClientError::Network(_))));
}

#[tokio::test]
async fn malformed_success_body_is_a_decode_error() {
    let mdms = spawn_mdms().await;
    mdms.state.garble_responses(true);

    let result = mdms
        .client
        .asset_classification("pb", ASSET_MODULE, masters::ASSET_CLASSIFICATION)
        .await;

    assert!(matches!(result, Err(ClientError::Decode(_))));
}
