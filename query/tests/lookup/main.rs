mod asset_lookup;
mod mdms_client;

use test_helpers::spawn_mdms;

#[tokio::test]
async fn search_round_trip() -> anyhow::Result<()> {
    let mdms = spawn_mdms().await;

    let criteria = payloads::requests::MdmsCriteria::single(
        "pb",
        test_helpers::mock::ASSET_MODULE,
        payloads::masters::ASSET_CLASSIFICATION,
    );
    let response = mdms.client.search(&criteria).await?;

    assert_eq!(
        response
            .records(
                test_helpers::mock::ASSET_MODULE,
                payloads::masters::ASSET_CLASSIFICATION
            )
            .len(),
        3
    );
    assert_eq!(mdms.search_count(), 1);

    Ok(())
}
