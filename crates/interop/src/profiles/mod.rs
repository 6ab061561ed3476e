//! Implementation-guide profile validators.
//!
//! Each profile is a structural rule engine over [`Resource`] values: it
//! never fails, it reports. Terminology is checked against fixed in-process
//! sets only; there is no code-system registry behind this module.

mod rules;

pub mod ca_core;
pub mod us_core;

use serde::{Deserialize, Serialize};

use fhir_model::{FhirEncounter, FhirObservation, FhirPatient, Resource};

/// A supported implementation guide
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Profile {
    #[serde(rename = "CA_CORE")]
    CaCore,
    #[serde(rename = "US_CORE")]
    UsCore,
}

impl Profile {
    /// Short token used in reports and bundle metadata.
    pub fn token(&self) -> &'static str {
        match self {
            Profile::CaCore => "CA_CORE",
            Profile::UsCore => "US_CORE",
        }
    }

    /// Canonical base URL of the implementation guide.
    pub fn canonical_url(&self) -> &'static str {
        match self {
            Profile::CaCore => "http://hl7.org/fhir/ca/core",
            Profile::UsCore => "http://hl7.org/fhir/us/core",
        }
    }

    /// Canonical StructureDefinition URL claimed in `meta.profile` of a
    /// converted resource.
    pub fn structure_definition(&self, resource_type: &str) -> String {
        let name = resource_type.to_lowercase();
        match self {
            Profile::CaCore => {
                format!("{}/StructureDefinition/profile-{name}", self.canonical_url())
            }
            Profile::UsCore => {
                format!("{}/StructureDefinition/us-core-{name}", self.canonical_url())
            }
        }
    }

    /// Run this profile's validator over a resource.
    pub fn validate(&self, resource: &Resource) -> ProfileOutcome {
        match self {
            Profile::CaCore => ca_core::validate(resource),
            Profile::UsCore => us_core::validate(resource),
        }
    }

    /// Resource-specific entry points, used by the facade to gate freshly
    /// converted values without wrapping them first.
    pub fn validate_patient(&self, patient: &FhirPatient) -> ProfileOutcome {
        match self {
            Profile::CaCore => ca_core::validate_patient(patient),
            Profile::UsCore => us_core::validate_patient(patient),
        }
    }

    pub fn validate_encounter(&self, encounter: &FhirEncounter) -> ProfileOutcome {
        match self {
            Profile::CaCore => ca_core::validate_encounter(encounter),
            Profile::UsCore => us_core::validate_encounter(encounter),
        }
    }

    pub fn validate_observation(&self, observation: &FhirObservation) -> ProfileOutcome {
        match self {
            Profile::CaCore => ca_core::validate_observation(observation),
            Profile::UsCore => us_core::validate_observation(observation),
        }
    }
}

impl std::fmt::Display for Profile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.token())
    }
}

/// Kind of validation finding
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum IssueCode {
    Required,
    Value,
    Invalid,
    CodeInvalid,
    Structure,
}

/// A single validation finding, addressed by element path
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Issue {
    pub path: String,
    pub code: IssueCode,
    pub message: String,
}

impl Issue {
    pub fn new(path: &str, code: IssueCode, message: impl Into<String>) -> Self {
        Self {
            path: path.to_string(),
            code,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for Issue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// The result of validating one resource against one profile.
///
/// `valid` is true exactly when `errors` is empty; warnings never affect it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProfileOutcome {
    pub valid: bool,
    pub errors: Vec<Issue>,
    pub warnings: Vec<Issue>,
    pub profile: Profile,
}

impl ProfileOutcome {
    pub(crate) fn new(profile: Profile, errors: Vec<Issue>, warnings: Vec<Issue>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
            warnings,
            profile,
        }
    }

    /// Error messages in `path: message` form, for aggregate reporting.
    pub fn error_messages(&self) -> Vec<String> {
        self.errors.iter().map(|issue| issue.to_string()).collect()
    }

    /// Warning messages in `path: message` form.
    pub fn warning_messages(&self) -> Vec<String> {
        self.warnings.iter().map(|issue| issue.to_string()).collect()
    }
}
