use payloads::{AssetSubCategory, MdmsClient};
use query::{AssetLookup, LookupConfig, LookupRequest, MdmsSource};
use yew::prelude::*;

use super::{QueryHookReturn, use_conditional_lookup};

#[hook]
pub fn use_asset_parent_sub_type(
    tenant_id: &str,
    module_code: &str,
    lookup_type: &str,
    config: LookupConfig<Vec<AssetSubCategory>>,
) -> Option<QueryHookReturn<Vec<AssetSubCategory>>> {
    use_conditional_lookup(
        AssetLookup::SubCategory,
        LookupRequest::new(tenant_id, module_code, lookup_type),
        config,
        <MdmsClient as MdmsSource>::asset_parent_sub_type,
    )
}
