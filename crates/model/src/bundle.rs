//! FHIR Bundle resource (simplified)

use serde::{Deserialize, Serialize};

use crate::resource::Resource;
use crate::types::Meta;

/// FHIR Bundle types
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BundleType {
    Searchset,
    History,
    Collection,
    Document,
    Message,
    Transaction,
    TransactionResponse,
    Batch,
    BatchResponse,
}

/// Search metadata attached to a bundle entry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BundleSearch {
    pub mode: String,
    pub score: f64,
}

impl Default for BundleSearch {
    fn default() -> Self {
        Self {
            mode: "match".to_string(),
            score: 1.0,
        }
    }
}

/// A single entry in a bundle
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BundleEntry {
    pub full_url: String,

    pub resource: Resource,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<BundleSearch>,
}

/// FHIR Bundle resource
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FhirBundle {
    pub resource_type: String,

    pub id: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<Meta>,

    #[serde(rename = "type")]
    pub bundle_type: BundleType,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<u32>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub entry: Vec<BundleEntry>,
}
