//! Conditional asset master lookups.
//!
//! Each [`AssetLookup`] variant answers exactly one discriminator value. A
//! lookup whose `lookup_type` does not match returns `None` without touching
//! the cache or MDMS; a matching one goes through [`QueryClient::fetch_query`]
//! under the variant's cache key.
//!
//! The cache key of a variant is a fixed literal unless
//! [`KeyScope::PerRequest`] is chosen, so by default two requests for
//! different tenants or modules share one cache entry.

use derive_more::Display;
use futures::FutureExt;
use futures::future::LocalBoxFuture;
use payloads::{
    AssetClassification, AssetParentCategory, AssetSubCategory, ClientError,
    MdmsClient, masters,
};
use std::future::Future;

use crate::{QueryClient, QueryKey, QueryOptions, QueryResult};

pub type LookupResult<T> = QueryResult<T, ClientError>;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LookupRequest {
    pub tenant_id: String,
    pub module_code: String,
    /// Discriminator selecting the lookup variant.
    pub lookup_type: String,
}

impl LookupRequest {
    pub fn new(
        tenant_id: impl Into<String>,
        module_code: impl Into<String>,
        lookup_type: impl Into<String>,
    ) -> Self {
        Self {
            tenant_id: tenant_id.into(),
            module_code: module_code.into(),
            lookup_type: lookup_type.into(),
        }
    }
}

/// How a variant derives its cache key from a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyScope {
    /// The variant's fixed literal. Requests that differ only in tenant or
    /// module collide and may read each other's data.
    #[default]
    Shared,
    /// The literal followed by tenant, module and type.
    PerRequest,
}

/// Options for a lookup: cache options passed through untouched, plus the
/// key scope.
pub struct LookupConfig<T> {
    pub query: QueryOptions<T>,
    pub key_scope: KeyScope,
}

impl<T> LookupConfig<T> {
    pub fn key_scope(mut self, key_scope: KeyScope) -> Self {
        self.key_scope = key_scope;
        self
    }
}

impl<T> Default for LookupConfig<T> {
    fn default() -> Self {
        Self {
            query: QueryOptions::default(),
            key_scope: KeyScope::default(),
        }
    }
}

impl<T> Clone for LookupConfig<T> {
    fn clone(&self) -> Self {
        Self {
            query: self.query.clone(),
            key_scope: self.key_scope,
        }
    }
}

impl<T> PartialEq for LookupConfig<T> {
    fn eq(&self, other: &Self) -> bool {
        self.query == other.query && self.key_scope == other.key_scope
    }
}

impl<T> From<QueryOptions<T>> for LookupConfig<T> {
    fn from(query: QueryOptions<T>) -> Self {
        Self {
            query,
            key_scope: KeyScope::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum AssetLookup {
    #[display("{}", masters::ASSET_CLASSIFICATION)]
    Classification,
    #[display("{}", masters::ASSET_PARENT_CATEGORY)]
    ParentCategory,
    #[display("{}", masters::ASSET_SUB_CATEGORY)]
    SubCategory,
}

impl AssetLookup {
    pub const ALL: [AssetLookup; 3] = [
        AssetLookup::Classification,
        AssetLookup::ParentCategory,
        AssetLookup::SubCategory,
    ];

    /// The discriminator value this variant answers.
    pub const fn expected_type(self) -> &'static str {
        match self {
            AssetLookup::Classification => masters::ASSET_CLASSIFICATION,
            AssetLookup::ParentCategory => masters::ASSET_PARENT_CATEGORY,
            AssetLookup::SubCategory => masters::ASSET_SUB_CATEGORY,
        }
    }

    /// Fixed cache key literal of the variant.
    pub const fn cache_key(self) -> QueryKey {
        match self {
            AssetLookup::Classification => QueryKey::fixed("A_CLASSIFICATION_TYPE"),
            AssetLookup::ParentCategory => QueryKey::fixed("ASSET_PARENT_CATEGORY"),
            AssetLookup::SubCategory => QueryKey::fixed("AST_PARENT_SUB_TYPE"),
        }
    }

    pub fn from_type(lookup_type: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|variant| variant.matches(lookup_type))
    }

    pub fn matches(self, lookup_type: &str) -> bool {
        self.expected_type() == lookup_type
    }

    pub fn query_key(self, request: &LookupRequest, scope: KeyScope) -> QueryKey {
        match scope {
            KeyScope::Shared => self.cache_key(),
            KeyScope::PerRequest => QueryKey::scoped(
                self.cache_key().as_str(),
                [
                    request.tenant_id.as_str(),
                    request.module_code.as_str(),
                    request.lookup_type.as_str(),
                ],
            ),
        }
    }
}

/// The MDMS endpoints the lookups call, one per variant.
///
/// Returned futures must not borrow `self` or the request: the cache may hold
/// them past the call.
pub trait MdmsSource {
    fn asset_classification(
        &self,
        request: &LookupRequest,
    ) -> LocalBoxFuture<'static, Result<Vec<AssetClassification>, ClientError>>;

    fn asset_type_parent(
        &self,
        request: &LookupRequest,
    ) -> LocalBoxFuture<'static, Result<Vec<AssetParentCategory>, ClientError>>;

    fn asset_parent_sub_type(
        &self,
        request: &LookupRequest,
    ) -> LocalBoxFuture<'static, Result<Vec<AssetSubCategory>, ClientError>>;
}

impl MdmsSource for MdmsClient {
    fn asset_classification(
        &self,
        request: &LookupRequest,
    ) -> LocalBoxFuture<'static, Result<Vec<AssetClassification>, ClientError>> {
        let (client, request) = (self.clone(), request.clone());
        async move {
            client
                .asset_classification(
                    &request.tenant_id,
                    &request.module_code,
                    &request.lookup_type,
                )
                .await
        }
        .boxed_local()
    }

    fn asset_type_parent(
        &self,
        request: &LookupRequest,
    ) -> LocalBoxFuture<'static, Result<Vec<AssetParentCategory>, ClientError>> {
        let (client, request) = (self.clone(), request.clone());
        async move {
            client
                .asset_type_parent(
                    &request.tenant_id,
                    &request.module_code,
                    &request.lookup_type,
                )
                .await
        }
        .boxed_local()
    }

    fn asset_parent_sub_type(
        &self,
        request: &LookupRequest,
    ) -> LocalBoxFuture<'static, Result<Vec<AssetSubCategory>, ClientError>> {
        let (client, request) = (self.clone(), request.clone());
        async move {
            client
                .asset_parent_sub_type(
                    &request.tenant_id,
                    &request.module_code,
                    &request.lookup_type,
                )
                .await
        }
        .boxed_local()
    }
}

/// Run `fetch_fn` through the cache if `request.lookup_type` selects
/// `variant`, otherwise return `None` without any side effect.
///
/// `fetch_fn` receives the request and is only called when the cache has no
/// fresh entry and no fetch in flight for the key.
pub async fn conditional_lookup<T, F, Fut>(
    client: &QueryClient,
    variant: AssetLookup,
    request: &LookupRequest,
    config: &LookupConfig<T>,
    fetch_fn: F,
) -> Option<LookupResult<T>>
where
    T: Clone + 'static,
    F: FnOnce(LookupRequest) -> Fut,
    Fut: Future<Output = Result<T, ClientError>> + 'static,
{
    if !variant.matches(&request.lookup_type) {
        return None;
    }

    let key = variant.query_key(request, config.key_scope);
    let request = request.clone();
    let result = client
        .fetch_query(&key, move || fetch_fn(request), &config.query)
        .await;
    Some(result)
}

/// Asset classifications, when `request.lookup_type` is `assetClassification`.
pub async fn asset_classification(
    client: &QueryClient,
    source: &impl MdmsSource,
    request: &LookupRequest,
    config: &LookupConfig<Vec<AssetClassification>>,
) -> Option<LookupResult<Vec<AssetClassification>>> {
    conditional_lookup(client, AssetLookup::Classification, request, config, |request| {
        source.asset_classification(&request)
    })
    .await
}

/// Parent categories, when `request.lookup_type` is `assetParentCategory`.
pub async fn asset_parent_category(
    client: &QueryClient,
    source: &impl MdmsSource,
    request: &LookupRequest,
    config: &LookupConfig<Vec<AssetParentCategory>>,
) -> Option<LookupResult<Vec<AssetParentCategory>>> {
    conditional_lookup(client, AssetLookup::ParentCategory, request, config, |request| {
        source.asset_type_parent(&request)
    })
    .await
}

/// Sub categories, when `request.lookup_type` is `assetSubCategory`.
pub async fn asset_sub_category(
    client: &QueryClient,
    source: &impl MdmsSource,
    request: &LookupRequest,
    config: &LookupConfig<Vec<AssetSubCategory>>,
) -> Option<LookupResult<Vec<AssetSubCategory>>> {
    conditional_lookup(client, AssetLookup::SubCategory, request, config, |request| {
        source.asset_parent_sub_type(&request)
    })
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use jiff::SignedDuration;
    use reqwest::StatusCode;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Records every endpoint call and answers with records tagged by tenant.
    #[derive(Default)]
    struct FakeMdms {
        calls: Rc<RefCell<Vec<(&'static str, LookupRequest)>>>,
        fail_with: Option<StatusCode>,
    }

    impl FakeMdms {
        fn record(&self, endpoint: &'static str, request: &LookupRequest) {
            self.calls.borrow_mut().push((endpoint, request.clone()));
        }

        fn calls(&self) -> Vec<(&'static str, LookupRequest)> {
            self.calls.borrow().clone()
        }

        fn respond<T: 'static>(
            &self,
            record: T,
        ) -> LocalBoxFuture<'static, Result<Vec<T>, ClientError>> {
            let fail_with = self.fail_with;
            async move {
                match fail_with {
                    Some(status) => {
                        Err(ClientError::APIError(status, "MDMS unavailable".into()))
                    }
                    None => Ok(vec![record]),
                }
            }
            .boxed_local()
        }
    }

    impl MdmsSource for FakeMdms {
        fn asset_classification(
            &self,
            request: &LookupRequest,
        ) -> LocalBoxFuture<'static, Result<Vec<AssetClassification>, ClientError>>
        {
            self.record("asset_classification", request);
            self.respond(AssetClassification {
                code: format!("{}-IMMOVABLE", request.tenant_id),
                ..Default::default()
            })
        }

        fn asset_type_parent(
            &self,
            request: &LookupRequest,
        ) -> LocalBoxFuture<'static, Result<Vec<AssetParentCategory>, ClientError>>
        {
            self.record("asset_type_parent", request);
            self.respond(AssetParentCategory {
                code: format!("{}-LAND", request.tenant_id),
                ..Default::default()
            })
        }

        fn asset_parent_sub_type(
            &self,
            request: &LookupRequest,
        ) -> LocalBoxFuture<'static, Result<Vec<AssetSubCategory>, ClientError>> {
            self.record("asset_parent_sub_type", request);
            self.respond(AssetSubCategory {
                code: format!("{}-PARK", request.tenant_id),
                ..Default::default()
            })
        }
    }

    fn fresh_for_a_minute<T>() -> LookupConfig<T> {
        QueryOptions::default()
            .stale_time(SignedDuration::from_mins(1))
            .into()
    }

    /// Run the typed lookup of `variant`, reporting only whether it ran.
    async fn run(
        variant: AssetLookup,
        client: &QueryClient,
        source: &FakeMdms,
        request: &LookupRequest,
    ) -> bool {
        match variant {
            AssetLookup::Classification => {
                asset_classification(client, source, request, &LookupConfig::default())
                    .await
                    .is_some()
            }
            AssetLookup::ParentCategory => {
                asset_parent_category(client, source, request, &LookupConfig::default())
                    .await
                    .is_some()
            }
            AssetLookup::SubCategory => {
                asset_sub_category(client, source, request, &LookupConfig::default())
                    .await
                    .is_some()
            }
        }
    }

    #[tokio::test]
    async fn classification_lookup_fetches_under_fixed_key() {
        let client = QueryClient::new();
        let mdms = FakeMdms::default();
        let request = LookupRequest::new("pb", "asset", "assetClassification");

        let result = asset_classification(&client, &mdms, &request, &LookupConfig::default())
            .await
            .expect("type matches the variant");

        assert!(result.is_success());
        assert_eq!(result.data.unwrap()[0].code, "pb-IMMOVABLE");
        assert_eq!(mdms.calls(), vec![("asset_classification", request)]);
        assert!(client.contains(&QueryKey::fixed("A_CLASSIFICATION_TYPE")));
        assert_eq!(client.len(), 1);
    }

    #[tokio::test]
    async fn unmatched_type_is_inert_for_every_variant() {
        let client = QueryClient::new();
        let mdms = FakeMdms::default();
        let request = LookupRequest::new("pb", "asset", "somethingElse");

        for variant in AssetLookup::ALL {
            assert!(!run(variant, &client, &mdms, &request).await);
        }

        assert!(mdms.calls().is_empty());
        assert!(client.is_empty());
    }

    #[tokio::test]
    async fn each_variant_answers_only_its_own_type() {
        for variant in AssetLookup::ALL {
            let request = LookupRequest::new("pb", "asset", variant.expected_type());
            let client = QueryClient::new();
            let mdms = FakeMdms::default();

            for other in AssetLookup::ALL {
                assert_eq!(run(other, &client, &mdms, &request).await, other == variant);
            }

            let calls = mdms.calls();
            assert_eq!(calls.len(), 1);
            assert_eq!(calls[0].1, request);
            assert_eq!(client.len(), 1);
            assert!(client.contains(&variant.cache_key()));
        }
    }

    #[tokio::test]
    async fn variants_dispatch_to_their_endpoints() {
        let client = QueryClient::new();
        let mdms = FakeMdms::default();

        for variant in AssetLookup::ALL {
            let request = LookupRequest::new("pb", "asset", variant.expected_type());
            run(variant, &client, &mdms, &request).await;
        }

        let endpoints: Vec<_> = mdms.calls().into_iter().map(|(e, _)| e).collect();
        assert_eq!(
            endpoints,
            ["asset_classification", "asset_type_parent", "asset_parent_sub_type"]
        );
    }

    #[tokio::test]
    async fn repeated_lookup_within_stale_time_does_not_refetch() {
        let client = QueryClient::new();
        let mdms = FakeMdms::default();
        let request = LookupRequest::new("pb", "asset", "assetParentCategory");
        let config = fresh_for_a_minute();

        for _ in 0..3 {
            let result = asset_parent_category(&client, &mdms, &request, &config)
                .await
                .unwrap();
            assert_eq!(result.data.unwrap()[0].code, "pb-LAND");
        }

        assert_eq!(mdms.calls().len(), 1);
    }

    #[tokio::test]
    async fn shared_key_lets_tenants_read_each_others_data() {
        let client = QueryClient::new();
        let mdms = FakeMdms::default();
        let config = fresh_for_a_minute();

        let punjab = LookupRequest::new("pb", "asset", "assetSubCategory");
        let maharashtra = LookupRequest::new("mh", "asset", "assetSubCategory");
        asset_sub_category(&client, &mdms, &punjab, &config).await;
        let second = asset_sub_category(&client, &mdms, &maharashtra, &config)
            .await
            .unwrap();

        // Served from the entry written for `pb`.
        assert_eq!(second.data.unwrap()[0].code, "pb-PARK");
        assert_eq!(mdms.calls().len(), 1);
    }

    #[tokio::test]
    async fn per_request_keys_keep_tenants_apart() {
        let client = QueryClient::new();
        let mdms = FakeMdms::default();
        let config = fresh_for_a_minute().key_scope(KeyScope::PerRequest);

        let punjab = LookupRequest::new("pb", "asset", "assetSubCategory");
        let maharashtra = LookupRequest::new("mh", "asset", "assetSubCategory");
        asset_sub_category(&client, &mdms, &punjab, &config).await;
        let second = asset_sub_category(&client, &mdms, &maharashtra, &config)
            .await
            .unwrap();

        assert_eq!(second.data.unwrap()[0].code, "mh-PARK");
        assert_eq!(mdms.calls().len(), 2);
        assert!(client.contains(&QueryKey::fixed(
            "AST_PARENT_SUB_TYPE:mh:asset:assetSubCategory"
        )));
    }

    #[tokio::test]
    async fn mdms_errors_surface_unchanged() {
        let client = QueryClient::new();
        let mdms = FakeMdms {
            fail_with: Some(StatusCode::BAD_GATEWAY),
            ..Default::default()
        };
        let request = LookupRequest::new("pb", "asset", "assetClassification");

        let result = asset_classification(&client, &mdms, &request, &LookupConfig::default())
            .await
            .unwrap();

        assert!(result.is_error());
        match result.error.as_deref() {
            Some(ClientError::APIError(status, body)) => {
                assert_eq!(*status, StatusCode::BAD_GATEWAY);
                assert_eq!(body, "MDMS unavailable");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn disabled_config_skips_the_fetch_but_still_matches() {
        let client = QueryClient::new();
        let mdms = FakeMdms::default();
        let request = LookupRequest::new("pb", "asset", "assetClassification");
        let config: LookupConfig<_> = QueryOptions::default().enabled(false).into();

        let result = asset_classification(&client, &mdms, &request, &config)
            .await
            .unwrap();

        assert!(result.data.is_none());
        assert!(mdms.calls().is_empty());
        assert!(client.is_empty());
    }

    #[test]
    fn discriminators_map_to_variants() {
        assert_eq!(
            AssetLookup::from_type("assetParentCategory"),
            Some(AssetLookup::ParentCategory)
        );
        assert_eq!(AssetLookup::from_type("assetclassification"), None);
        assert_eq!(AssetLookup::SubCategory.to_string(), "assetSubCategory");
        assert_eq!(
            AssetLookup::ParentCategory.cache_key().as_str(),
            "ASSET_PARENT_CATEGORY"
        );
    }
}
