//! Bidirectional adapters between internal records and FHIR resources.
//!
//! Forward conversion (internal → FHIR) is deterministic and defers every
//! data-quality question to the profile validators; the only conversion
//! error is an encounter type with no ActCode class mapping. Reverse
//! conversion (FHIR → internal) is total and tolerant of missing optional
//! elements.

mod from_fhir;
mod to_fhir;

pub use from_fhir::{
    encounter_to_internal, observation_to_internal, patient_to_internal, resource_to_internal,
};
pub use to_fhir::{encounter_to_fhir, observation_to_fhir, patient_to_fhir};

/// HL7 ActCode terminology system used for `Encounter.class`
pub const ACT_CODE_SYSTEM: &str = "http://terminology.hl7.org/CodeSystem/v3-ActCode";

/// Observation category terminology system
pub const OBSERVATION_CATEGORY_SYSTEM: &str =
    "http://terminology.hl7.org/CodeSystem/observation-category";

/// LOINC, the default code system for vital-sign observations
pub const LOINC_SYSTEM: &str = "http://loinc.org";

/// US SSN identifier namespace
pub const SSN_SYSTEM: &str = "http://hl7.org/fhir/sid/us-ssn";
