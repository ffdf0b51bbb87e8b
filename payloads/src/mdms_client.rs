use crate::{
    AssetClassification, AssetParentCategory, AssetSubCategory, ModuleName,
    TenantId, requests, responses,
};
use jiff::Timestamp;
use reqwest::StatusCode;
use serde::Serialize;

type ReqwestResult = Result<reqwest::Response, reqwest::Error>;

pub const SEARCH_PATH: &str = "egov-mdms-service/v1/_search";

/// A client for the MDMS search endpoint.
#[derive(Debug, Clone)]
pub struct MdmsClient {
    pub address: String,
    pub inner_client: reqwest::Client,
    /// Sent as `RequestInfo.authToken` when present.
    pub auth_token: Option<String>,
}

/// Helper methods for http actions
impl MdmsClient {
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            inner_client: reqwest::Client::new(),
            auth_token: None,
        }
    }

    fn format_url(&self, path: &str) -> String {
        format!("{}/{path}", self.address.trim_end_matches('/'))
    }

    async fn post(
        &self,
        path: &str,
        query: &[(&str, &str)],
        body: &impl Serialize,
    ) -> ReqwestResult {
        let request = self
            .inner_client
            .post(self.format_url(path))
            .query(query)
            .json(body);

        #[cfg(target_arch = "wasm32")]
        let request = request.fetch_credentials_include();

        request.send().await
    }

    fn request_info(&self) -> requests::RequestInfo {
        let info = requests::RequestInfo::new(Timestamp::now());
        match &self.auth_token {
            Some(token) => info.with_auth_token(token.clone()),
            None => info,
        }
    }
}

/// Methods on the MDMS API
impl MdmsClient {
    /// Search master data matching `criteria`.
    pub async fn search(
        &self,
        criteria: &requests::MdmsCriteria,
    ) -> Result<responses::MdmsResponse, ClientError> {
        let body = requests::MdmsSearch {
            request_info: self.request_info(),
            criteria: criteria.clone(),
        };
        let response = self
            .post(SEARCH_PATH, &[("tenantId", criteria.tenant_id.0.as_str())], &body)
            .await?;
        ok_body(response).await
    }

    /// Fetch one master of one module and decode its records.
    pub async fn master<T: serde::de::DeserializeOwned>(
        &self,
        tenant_id: &str,
        module_code: &str,
        master_name: &str,
    ) -> Result<Vec<T>, ClientError> {
        tracing::debug!(tenant_id, module_code, master_name, "MDMS search");
        let criteria = requests::MdmsCriteria::single(
            TenantId::from(tenant_id),
            ModuleName::from(module_code),
            master_name,
        );
        let response = self.search(&criteria).await?;
        Ok(response.masters(module_code, master_name)?)
    }

    /// Asset classifications of `module_code`, read from the master named
    /// by `lookup_type`.
    pub async fn asset_classification(
        &self,
        tenant_id: &str,
        module_code: &str,
        lookup_type: &str,
    ) -> Result<Vec<AssetClassification>, ClientError> {
        self.master(tenant_id, module_code, lookup_type).await
    }

    /// Parent categories of assets.
    pub async fn asset_type_parent(
        &self,
        tenant_id: &str,
        module_code: &str,
        lookup_type: &str,
    ) -> Result<Vec<AssetParentCategory>, ClientError> {
        self.master(tenant_id, module_code, lookup_type).await
    }

    /// Sub categories of assets.
    pub async fn asset_parent_sub_type(
        &self,
        tenant_id: &str,
        module_code: &str,
        lookup_type: &str,
    ) -> Result<Vec<AssetSubCategory>, ClientError> {
        self.master(tenant_id, module_code, lookup_type).await
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// An unhandled API error to display, containing response text.
    #[error("{1}")]
    APIError(StatusCode, String),
    #[error("Network error. Please check your connection.")]
    Network(#[from] reqwest::Error),
    #[error("Unexpected master data: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Deserialize a successful request into the desired type, or return an
/// appropriate error.
pub async fn ok_body<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, ClientError> {
    if !response.status().is_success() {
        return Err(ClientError::APIError(
            response.status(),
            response.text().await?,
        ));
    }
    let body = response.text().await?;
    Ok(serde_json::from_str(&body)?)
}
