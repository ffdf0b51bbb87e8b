use futures::future::LocalBoxFuture;
use payloads::{ClientError, MdmsClient};
use query::{AssetLookup, LookupConfig, LookupRequest};
use yew::prelude::*;

use super::{QueryHookReturn, use_query};
use crate::get_mdms_client;

/// An MDMS endpoint as exposed by [`query::MdmsSource`].
pub type Endpoint<T> =
    fn(&MdmsClient, &LookupRequest) -> LocalBoxFuture<'static, Result<T, ClientError>>;

/// Query `endpoint` through the cache when `request.lookup_type` selects
/// `variant`; otherwise `None`.
///
/// Hooks cannot be skipped conditionally, so the underlying query is always
/// mounted. On a mismatch it is disabled, which neither fetches nor creates
/// a cache entry.
#[hook]
pub fn use_conditional_lookup<T>(
    variant: AssetLookup,
    request: LookupRequest,
    config: LookupConfig<T>,
    endpoint: Endpoint<T>,
) -> Option<QueryHookReturn<T>>
where
    T: Clone + 'static,
{
    let matches = variant.matches(&request.lookup_type);
    let key = variant.query_key(&request, config.key_scope);
    let enabled = config.query.enabled && matches;
    let options = config.query.enabled(enabled);

    let result = use_query(
        key,
        move || endpoint(&get_mdms_client(), &request),
        options,
    );

    matches.then_some(result)
}
