use payloads::{AssetClassification, MdmsClient};
use query::{AssetLookup, LookupConfig, LookupRequest, MdmsSource};
use yew::prelude::*;

use super::{QueryHookReturn, use_conditional_lookup};

/// Asset classifications, fetched only when `lookup_type` is
/// `assetClassification`. Cached under `A_CLASSIFICATION_TYPE`.
#[hook]
pub fn use_asset_classification(
    tenant_id: &str,
    module_code: &str,
    lookup_type: &str,
    config: LookupConfig<Vec<AssetClassification>>,
) -> Option<QueryHookReturn<Vec<AssetClassification>>> {
    use_conditional_lookup(
        AssetLookup::Classification,
        LookupRequest::new(tenant_id, module_code, lookup_type),
        config,
        <MdmsClient as MdmsSource>::asset_classification,
    )
}
