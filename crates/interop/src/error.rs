//! Interop layer error types

use fhir_model::EncounterType;
use thiserror::Error;

use crate::profiles::Profile;

/// Errors raised by the conversion and bundle entry points.
///
/// Profile validators never produce these; they return itemized
/// [`crate::profiles::ProfileOutcome`] values instead. An `InteropError`
/// means no FHIR value was produced at all.
#[derive(Debug, Error)]
pub enum InteropError {
    /// The converted resource failed profile validation and was discarded.
    #[error("{profile} validation failed: {}", .errors.join("; "))]
    Validation {
        profile: Profile,
        errors: Vec<String>,
    },

    /// One bundle input failed validation; no bundle was assembled.
    #[error("bundle entry {index} failed {profile} validation: {}", .errors.join("; "))]
    BundleEntry {
        index: usize,
        profile: Profile,
        errors: Vec<String>,
    },

    /// The internal encounter type has no ActCode class mapping.
    #[error("no FHIR class mapping for encounter type '{0}'")]
    UnmappedEncounterType(EncounterType),

    /// A JSON value with a `resourceType` outside the supported set.
    #[error("unsupported resource type: {0}")]
    UnsupportedResourceType(String),

    /// A JSON value that is not a FHIR resource at all.
    #[error("invalid resource format: {0}")]
    InvalidResource(String),
}
