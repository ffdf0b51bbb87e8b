use payloads::{AssetParentCategory, MdmsClient};
use query::{AssetLookup, LookupConfig, LookupRequest, MdmsSource};
use yew::prelude::*;

use super::{QueryHookReturn, use_conditional_lookup};

/// Parent asset categories for `assetParentCategory`.
#[hook]
pub fn use_asset_type(
    tenant_id: &str,
    module_code: &str,
    lookup_type: &str,
    config: LookupConfig<Vec<AssetParentCategory>>,
) -> Option<QueryHookReturn<Vec<AssetParentCategory>>> {
    use_conditional_lookup(
        AssetLookup::ParentCategory,
        LookupRequest::new(tenant_id, module_code, lookup_type),
        config,
        <MdmsClient as MdmsSource>::asset_type_parent,
    )
}
