use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Records of one master, as returned by MDMS. Shape is not validated.
pub type MasterRecords = Vec<serde_json::Value>;

/// `MdmsRes`: module name -> master name -> records.
pub type MdmsRes = BTreeMap<String, BTreeMap<String, MasterRecords>>;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResponseInfo {
    pub api_id: Option<String>,
    pub ver: Option<String>,
    pub ts: Option<i64>,
    pub res_msg_id: Option<String>,
    pub msg_id: Option<String>,
    pub status: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MdmsResponse {
    #[serde(rename = "ResponseInfo", default)]
    pub response_info: Option<ResponseInfo>,
    #[serde(rename = "MdmsRes", default)]
    pub mdms_res: MdmsRes,
}

impl MdmsResponse {
    /// Raw records of `module`.`master`, empty if MDMS returned neither.
    pub fn records(&self, module: &str, master: &str) -> &[serde_json::Value] {
        self.mdms_res
            .get(module)
            .and_then(|masters| masters.get(master))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Deserialize the records of `module`.`master` into `T`.
    pub fn masters<T: DeserializeOwned>(
        &self,
        module: &str,
        master: &str,
    ) -> Result<Vec<T>, serde_json::Error> {
        self.records(module, master)
            .iter()
            .cloned()
            .map(serde_json::from_value)
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Error body used by DIGIT services for rejected requests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    #[serde(rename = "ResponseInfo", default)]
    pub response_info: Option<ResponseInfo>,
    #[serde(rename = "Errors")]
    pub errors: Vec<ErrorDetail>,
}
