//! fhir-interop: conversion and validation between the internal clinical
//! model and FHIR R4.
//!
//! This is the only surface collaborators (patient management, session
//! export, portal sharing) import. Conversion entry points are fail-fast:
//! a resource that does not validate against the requested profile is never
//! returned. `validate`/`validate_json` are the reporting entry points and
//! never fail. Everything here is a synchronous pure function over
//! immutable inputs; the layer holds no state and does no I/O.

pub mod bundle;
pub mod convert;
pub mod error;
mod module;
pub mod profiles;
mod report;

pub use bundle::ClinicalData;
pub use error::InteropError;
pub use module::{
    InteropConfig, MODULE_VERSION, ModuleInfo, SUPPORTED_PROFILES, SUPPORTED_RESOURCES, is_ready,
    module_info,
};
pub use profiles::{Issue, IssueCode, Profile, ProfileOutcome};
pub use report::{Compliance, ValidationReport};

// Collaborators get the data model through this crate.
pub use fhir_model::{
    ClinicalRecord, FhirBundle, FhirEncounter, FhirObservation, FhirPatient, InternalEncounter,
    InternalObservation, InternalPatient, Resource,
};

use serde_json::Value as JsonValue;

fn gate(outcome: ProfileOutcome) -> Result<(), InteropError> {
    if outcome.valid {
        return Ok(());
    }
    tracing::debug!(
        profile = %outcome.profile,
        errors = outcome.errors.len(),
        "conversion rejected by validator"
    );
    Err(InteropError::Validation {
        profile: outcome.profile,
        errors: outcome.error_messages(),
    })
}

/// Convert an internal patient to a FHIR Patient valid under `profile`.
pub fn to_fhir_patient(
    patient: &InternalPatient,
    profile: Profile,
) -> Result<FhirPatient, InteropError> {
    let fhir = convert::patient_to_fhir(patient, profile);
    gate(profile.validate_patient(&fhir))?;
    Ok(fhir)
}

/// Convert an internal encounter to a FHIR Encounter valid under `profile`.
pub fn to_fhir_encounter(
    encounter: &InternalEncounter,
    profile: Profile,
) -> Result<FhirEncounter, InteropError> {
    let fhir = convert::encounter_to_fhir(encounter, profile)?;
    gate(profile.validate_encounter(&fhir))?;
    Ok(fhir)
}

/// Convert an internal observation to a FHIR Observation valid under
/// `profile`.
pub fn to_fhir_observation(
    observation: &InternalObservation,
    profile: Profile,
) -> Result<FhirObservation, InteropError> {
    let fhir = convert::observation_to_fhir(observation, profile);
    gate(profile.validate_observation(&fhir))?;
    Ok(fhir)
}

/// Convert any supported FHIR resource back to its internal counterpart.
///
/// Total: the `Resource` union admits only supported types, so there is no
/// failure path here.
pub fn from_fhir(resource: &Resource) -> ClinicalRecord {
    convert::resource_to_internal(resource)
}

/// Like [`from_fhir`], for raw JSON from an external system.
///
/// This is where an unsupported `resourceType` surfaces as an error.
pub fn from_fhir_json(value: &JsonValue) -> Result<ClinicalRecord, InteropError> {
    match serde_json::from_value::<Resource>(value.clone()) {
        Ok(resource) => Ok(convert::resource_to_internal(&resource)),
        Err(err) => {
            let named = value.get("resourceType").and_then(|v| v.as_str());
            match named {
                Some(name) if !SUPPORTED_RESOURCES.iter().any(|r| *r == name) => {
                    Err(InteropError::UnsupportedResourceType(name.to_string()))
                }
                _ => Err(InteropError::InvalidResource(err.to_string())),
            }
        }
    }
}

/// Validate a resource against `profile` and report compliance with every
/// supported profile. Never fails.
pub fn validate(resource: &Resource, profile: Profile) -> ValidationReport {
    ValidationReport::from_outcome(resource, profile.validate(resource))
}

/// Validate raw JSON. Input that cannot be read as a supported resource
/// (null, `{}`, wrong `resourceType`, malformed fields) yields an
/// "Invalid resource format" report; this function never fails.
pub fn validate_json(value: &JsonValue, profile: Profile) -> ValidationReport {
    match serde_json::from_value::<Resource>(value.clone()) {
        Ok(resource) => validate(&resource, profile),
        Err(_) => ValidationReport::invalid_format(),
    }
}

/// Assemble a collection bundle, validating each resource against
/// `profile` first. One invalid input voids the whole bundle.
pub fn make_bundle(resources: &[Resource], profile: Profile) -> Result<FhirBundle, InteropError> {
    bundle::make_bundle(resources, profile)
}

/// Recover internal records from a bundle; `None` for an incomplete one.
pub fn bundle_to_clinical_data(bundle: &FhirBundle) -> Option<ClinicalData> {
    bundle::bundle_to_clinical_data(bundle)
}
