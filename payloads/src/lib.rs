//! Wire types for the master-data-management service (MDMS) and a client
//! for its search endpoint.

pub mod mdms_client;
pub mod requests;
pub mod responses;

pub use mdms_client::{ClientError, MdmsClient};

use derive_more::Display;
use serde::{Deserialize, Serialize};

/// Tenant (ULB / state) scope for a master data search, e.g. `pb` or
/// `pb.amritsar`.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Display, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct TenantId(pub String);

impl From<&str> for TenantId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for TenantId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl AsRef<str> for TenantId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// MDMS module name. Master data is grouped by module, e.g. `ASSET`.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Display, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ModuleName(pub String);

impl From<&str> for ModuleName {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for ModuleName {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Master names the asset lookups read.
pub mod masters {
    pub const ASSET_CLASSIFICATION: &str = "assetClassification";
    pub const ASSET_PARENT_CATEGORY: &str = "assetParentCategory";
    pub const ASSET_SUB_CATEGORY: &str = "assetSubCategory";
}

/// Asset classification master record (top of the asset hierarchy).
///
/// Records are read leniently: missing fields default and unknown fields are
/// kept in `extra`. No validation is done on master data.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AssetClassification {
    pub code: String,
    pub name: String,
    pub active: bool,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Parent category, linked to an [`AssetClassification`] by code.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AssetParentCategory {
    pub code: String,
    pub name: String,
    pub asset_classification: String,
    pub active: bool,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Sub category, linked to an [`AssetParentCategory`] by code.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AssetSubCategory {
    pub code: String,
    pub name: String,
    pub asset_parent_category: String,
    pub active: bool,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}
