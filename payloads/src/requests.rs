use crate::{ModuleName, TenantId};
use jiff::Timestamp;
use serde::{Deserialize, Serialize};

pub const DEFAULT_API_ID: &str = "Rainmaker";
pub const DEFAULT_LOCALE: &str = "en_IN";

/// Envelope metadata sent with every DIGIT-style request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestInfo {
    pub api_id: String,
    /// `<unix millis>|<locale>`
    pub msg_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_token: Option<String>,
}

impl RequestInfo {
    pub fn new(now: Timestamp) -> Self {
        Self {
            api_id: DEFAULT_API_ID.to_string(),
            msg_id: format!("{}|{DEFAULT_LOCALE}", now.as_millisecond()),
            auth_token: None,
        }
    }

    pub fn with_auth_token(mut self, token: impl Into<String>) -> Self {
        self.auth_token = Some(token.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MasterDetail {
    pub name: String,
    /// JSONPath filter applied server side, e.g. `[?(@.active==true)]`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
}

impl MasterDetail {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            filter: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleDetail {
    pub module_name: ModuleName,
    pub master_details: Vec<MasterDetail>,
}

/// Which masters of which modules to fetch for a tenant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MdmsCriteria {
    pub tenant_id: TenantId,
    pub module_details: Vec<ModuleDetail>,
}

impl MdmsCriteria {
    /// Criteria for a single master of a single module.
    pub fn single(
        tenant_id: impl Into<TenantId>,
        module_name: impl Into<ModuleName>,
        master_name: impl Into<String>,
    ) -> Self {
        Self {
            tenant_id: tenant_id.into(),
            module_details: vec![ModuleDetail {
                module_name: module_name.into(),
                master_details: vec![MasterDetail::new(master_name)],
            }],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MdmsSearch {
    #[serde(rename = "RequestInfo")]
    pub request_info: RequestInfo,
    #[serde(rename = "MdmsCriteria")]
    pub criteria: MdmsCriteria,
}
