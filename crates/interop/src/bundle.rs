//! Bundle assembly and decomposition.
//!
//! Assembly is atomic: every input is validated against the target profile
//! before any entry is built, and the first failure voids the whole bundle.

use fhir_model::{
    BundleEntry, BundleSearch, BundleType, FhirBundle, InternalEncounter, InternalObservation,
    InternalPatient, Meta, Resource,
};
use uuid::Uuid;

use crate::convert;
use crate::error::InteropError;
use crate::profiles::Profile;

/// The internal records recovered from a complete bundle
#[derive(Debug, Clone, PartialEq)]
pub struct ClinicalData {
    pub patient: InternalPatient,
    pub encounter: InternalEncounter,
    pub observations: Vec<InternalObservation>,
}

/// Assemble a collection bundle from validated resources.
///
/// Entry fullUrls are `urn:uuid:<resource id>`, so the same resource always
/// yields the same reference across calls; only the bundle's own id is
/// freshly generated.
pub fn make_bundle(resources: &[Resource], profile: Profile) -> Result<FhirBundle, InteropError> {
    // Validate everything before building anything.
    for (index, resource) in resources.iter().enumerate() {
        let outcome = profile.validate(resource);
        if !outcome.valid {
            tracing::debug!(
                index,
                profile = %profile,
                resource_type = resource.type_name(),
                errors = outcome.errors.len(),
                "bundle assembly aborted"
            );
            return Err(InteropError::BundleEntry {
                index,
                profile,
                errors: outcome.error_messages(),
            });
        }
    }

    let entry: Vec<BundleEntry> = resources
        .iter()
        .map(|resource| BundleEntry {
            full_url: format!("urn:uuid:{}", resource.id()),
            resource: resource.clone(),
            search: Some(BundleSearch::default()),
        })
        .collect();

    tracing::debug!(entries = entry.len(), profile = %profile, "assembled bundle");

    Ok(FhirBundle {
        resource_type: "Bundle".to_string(),
        id: Uuid::new_v4().to_string(),
        meta: Some(Meta {
            profile: vec![
                profile.canonical_url().to_string(),
                profile.token().to_string(),
            ],
        }),
        bundle_type: BundleType::Collection,
        total: Some(entry.len() as u32),
        entry,
    })
}

/// Recover internal records from a bundle.
///
/// A bundle without both a Patient and an Encounter is incomplete and
/// yields `None`; that is an expected shape, not an error.
pub fn bundle_to_clinical_data(bundle: &FhirBundle) -> Option<ClinicalData> {
    let mut patient = None;
    let mut encounter = None;
    let mut observations = Vec::new();

    for entry in &bundle.entry {
        match &entry.resource {
            Resource::Patient(p) => {
                if patient.is_none() {
                    patient = Some(convert::patient_to_internal(p));
                }
            }
            Resource::Encounter(e) => {
                if encounter.is_none() {
                    encounter = Some(convert::encounter_to_internal(e));
                }
            }
            Resource::Observation(o) => observations.push(convert::observation_to_internal(o)),
        }
    }

    Some(ClinicalData {
        patient: patient?,
        encounter: encounter?,
        observations,
    })
}
