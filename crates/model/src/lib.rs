//! fhir-model: FHIR R4 resource types and the internal clinical model
//!
//! Pure data shapes shared across the interop layer: simplified FHIR R4
//! resources (Patient, Encounter, Observation, Bundle), their common
//! datatypes, and the internal clinical records they are converted from.
//! No validation or conversion logic lives here.

pub mod bundle;
pub mod encounter;
pub mod internal;
pub mod observation;
pub mod patient;
pub mod resource;
pub mod types;

pub use bundle::{BundleEntry, BundleSearch, BundleType, FhirBundle};
pub use encounter::{EncounterParticipant, EncounterStatus, FhirEncounter};
pub use internal::{
    ClinicalRecord, EncounterType, InternalAddress, InternalEncounter, InternalObservation,
    InternalPatient, ObservationType,
};
pub use observation::{FhirObservation, ObservationStatus, ObservationValue};
pub use patient::FhirPatient;
pub use resource::Resource;
pub use types::{
    Address, AdministrativeGender, CodeableConcept, Coding, ContactPoint, HumanName, Identifier,
    Meta, Period, Quantity, Range, Reference,
};
