//! Seed master data for the fake MDMS server.
//!
//! The dataset mirrors how asset masters are laid out in a state MDMS:
//! - Three levels: classification -> parent category -> sub category,
//!   linked by code
//! - Masters defined at state level (`pb`, `mh`); city tenants such as
//!   `pb.amritsar` fall back to their state
//! - A few inactive records, since MDMS returns those too

use payloads::masters;
use payloads::responses::{MasterRecords, MdmsRes};
use serde_json::{Value, json};
use std::collections::BTreeMap;

pub const ASSET_MODULE: &str = "ASSET";

#[derive(Debug, Clone, Default)]
pub struct MdmsDataset {
    tenants: BTreeMap<String, MdmsRes>,
}

impl MdmsDataset {
    pub fn insert(
        &mut self,
        tenant_id: &str,
        module: &str,
        master: &str,
        records: Vec<Value>,
    ) {
        self.tenants
            .entry(tenant_id.to_string())
            .or_default()
            .entry(module.to_string())
            .or_default()
            .insert(master.to_string(), records);
    }

    /// Records for a tenant, falling back to the state tenant (the part
    /// before the first `.`) when the city defines none.
    pub fn records(
        &self,
        tenant_id: &str,
        module: &str,
        master: &str,
    ) -> Option<&MasterRecords> {
        let lookup = |tenant: &str| {
            self.tenants.get(tenant)?.get(module)?.get(master)
        };
        lookup(tenant_id).or_else(|| {
            let (state, _) = tenant_id.split_once('.')?;
            lookup(state)
        })
    }

    /// The asset hierarchy for Punjab and a smaller one for Maharashtra.
    pub fn assets() -> Self {
        let mut dataset = Self::default();

        dataset.insert(
            "pb",
            ASSET_MODULE,
            masters::ASSET_CLASSIFICATION,
            vec![
                classification("IMMOVABLE", "Immovable", true),
                classification("MOVABLE", "Movable", true),
                classification("INFRASTRUCTURE", "Infrastructure", true),
            ],
        );
        dataset.insert(
            "pb",
            ASSET_MODULE,
            masters::ASSET_PARENT_CATEGORY,
            vec![
                parent_category("LAND", "Land", "IMMOVABLE"),
                parent_category("BUILDING", "Building", "IMMOVABLE"),
                parent_category("VEHICLE", "Vehicle", "MOVABLE"),
                parent_category("FURNITURE", "Furniture", "MOVABLE"),
                parent_category("ROAD", "Road", "INFRASTRUCTURE"),
            ],
        );
        dataset.insert(
            "pb",
            ASSET_MODULE,
            masters::ASSET_SUB_CATEGORY,
            vec![
                sub_category("PARK", "Park", "LAND", true),
                sub_category("PLAYGROUND", "Playground", "LAND", true),
                sub_category("OFFICE_BUILDING", "Office Building", "BUILDING", true),
                sub_category("COMMUNITY_HALL", "Community Hall", "BUILDING", true),
                sub_category("CAR", "Car", "VEHICLE", true),
                sub_category("TRUCK", "Truck", "VEHICLE", true),
                sub_category("TABLE", "Table", "FURNITURE", true),
                sub_category("CHAIR", "Chair", "FURNITURE", false),
                sub_category("FOOTPATH", "Footpath", "ROAD", true),
            ],
        );

        dataset.insert(
            "mh",
            ASSET_MODULE,
            masters::ASSET_CLASSIFICATION,
            vec![classification("IMMOVABLE", "Immovable Property", true)],
        );

        dataset
    }
}

fn classification(code: &str, name: &str, active: bool) -> Value {
    json!({ "code": code, "name": name, "active": active })
}

fn parent_category(code: &str, name: &str, classification: &str) -> Value {
    json!({
        "code": code,
        "name": name,
        "assetClassification": classification,
        "active": true
    })
}

fn sub_category(code: &str, name: &str, parent: &str, active: bool) -> Value {
    json!({
        "code": code,
        "name": name,
        "assetParentCategory": parent,
        "active": active
    })
}
