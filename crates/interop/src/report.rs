//! Flattened validation reports for collaborators.
//!
//! Where [`crate::profiles::ProfileOutcome`] carries itemized issues for
//! one profile, a `ValidationReport` is the facade-level view: joined
//! messages plus a compliance snapshot across every supported profile.

use chrono::Utc;
use serde::Serialize;

use fhir_model::Resource;

use crate::profiles::{Profile, ProfileOutcome};

/// Per-profile validity of a single resource
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Compliance {
    pub ca_core: bool,
    pub us_core: bool,
}

/// The result of `validate()`: never an error, always a report
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    pub is_valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub compliance: Compliance,
    pub timestamp: String,
}

impl ValidationReport {
    pub(crate) fn from_outcome(resource: &Resource, outcome: ProfileOutcome) -> Self {
        let compliance = Compliance {
            ca_core: Profile::CaCore.validate(resource).valid,
            us_core: Profile::UsCore.validate(resource).valid,
        };

        Self {
            is_valid: outcome.valid,
            errors: outcome.error_messages(),
            warnings: outcome.warning_messages(),
            compliance,
            timestamp: Utc::now().to_rfc3339(),
        }
    }

    /// Report for input that could not be read as a FHIR resource at all.
    pub(crate) fn invalid_format() -> Self {
        Self {
            is_valid: false,
            errors: vec!["Invalid resource format".to_string()],
            warnings: Vec::new(),
            compliance: Compliance {
                ca_core: false,
                us_core: false,
            },
            timestamp: Utc::now().to_rfc3339(),
        }
    }
}
