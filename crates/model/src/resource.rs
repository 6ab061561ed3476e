//! The closed set of resources the interop layer exchanges.

use serde::{Deserialize, Serialize};

use crate::encounter::FhirEncounter;
use crate::observation::FhirObservation;
use crate::patient::FhirPatient;

/// A FHIR resource supported by this layer.
///
/// Serde carries the `resourceType` discriminant, so serialized values are
/// ordinary FHIR JSON and anything outside the closed set fails to parse.
/// Consumers match exhaustively instead of probing `resourceType` at
/// runtime.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "resourceType")]
pub enum Resource {
    Patient(FhirPatient),
    Encounter(FhirEncounter),
    Observation(FhirObservation),
}

impl Resource {
    /// Logical id of the wrapped resource.
    pub fn id(&self) -> &str {
        match self {
            Resource::Patient(p) => &p.id,
            Resource::Encounter(e) => &e.id,
            Resource::Observation(o) => &o.id,
        }
    }

    /// FHIR resource type name.
    pub fn type_name(&self) -> &'static str {
        match self {
            Resource::Patient(_) => "Patient",
            Resource::Encounter(_) => "Encounter",
            Resource::Observation(_) => "Observation",
        }
    }
}

impl From<FhirPatient> for Resource {
    fn from(patient: FhirPatient) -> Self {
        Resource::Patient(patient)
    }
}

impl From<FhirEncounter> for Resource {
    fn from(encounter: FhirEncounter) -> Self {
        Resource::Encounter(encounter)
    }
}

impl From<FhirObservation> for Resource {
    fn from(observation: FhirObservation) -> Self {
        Resource::Observation(observation)
    }
}
