//! US Core profile rules

use fhir_model::{FhirEncounter, FhirObservation, FhirPatient, Resource};

use super::rules;
use super::{Issue, IssueCode, Profile, ProfileOutcome};

/// ActCode class codes accepted by US Core
const ALLOWED_CLASS: [&str; 5] = ["EMER", "IMP", "AMB", "VR", "HH"];

const UNITED_STATES: [&str; 3] = ["US", "USA", "United States"];

pub fn validate(resource: &Resource) -> ProfileOutcome {
    match resource {
        Resource::Patient(patient) => validate_patient(patient),
        Resource::Encounter(encounter) => validate_encounter(encounter),
        Resource::Observation(observation) => validate_observation(observation),
    }
}

pub fn validate_patient(patient: &FhirPatient) -> ProfileOutcome {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    rules::check_patient_base(patient, &mut errors, &mut warnings);

    // US Core mandates birthDate where CA Core only recommends it.
    if patient.birth_date.is_none() {
        errors.push(Issue::new(
            "Patient.birthDate",
            IssueCode::Required,
            "birthDate is required",
        ));
    }

    rules::check_address_country(
        &patient.address,
        &UNITED_STATES,
        "address must use the US address format (country 'US', 'USA' or 'United States')",
        &mut errors,
    );

    ProfileOutcome::new(Profile::UsCore, errors, warnings)
}

pub fn validate_encounter(encounter: &FhirEncounter) -> ProfileOutcome {
    let mut errors = Vec::new();
    rules::check_encounter_base(encounter, &ALLOWED_CLASS, &mut errors);
    ProfileOutcome::new(Profile::UsCore, errors, Vec::new())
}

pub fn validate_observation(observation: &FhirObservation) -> ProfileOutcome {
    let mut errors = Vec::new();
    rules::check_observation_base(observation, &mut errors);
    ProfileOutcome::new(Profile::UsCore, errors, Vec::new())
}

#[cfg(test)]
mod tests {
    use super::*;
    use fhir_model::{
        AdministrativeGender, CodeableConcept, Coding, EncounterStatus, HumanName,
        ObservationStatus, ObservationValue, Quantity, Reference,
    };

    #[test]
    fn missing_birth_date_is_an_error() {
        let patient = FhirPatient {
            id: "p-1".into(),
            name: vec![HumanName {
                family: Some("Smith".into()),
                ..Default::default()
            }],
            gender: Some(AdministrativeGender::Female),
            ..Default::default()
        };

        let outcome = validate_patient(&patient);
        assert!(!outcome.valid);
        assert!(outcome.errors.iter().any(|e| e.path == "Patient.birthDate"));
    }

    #[test]
    fn out_class_is_ca_only() {
        let encounter = FhirEncounter {
            id: "e-1".into(),
            status: Some(EncounterStatus::Finished),
            class: Some(Coding::new(
                "http://terminology.hl7.org/CodeSystem/v3-ActCode",
                "OUT",
                "Outpatient",
            )),
            subject: Some(Reference::urn_uuid("p-1")),
            ..Default::default()
        };

        assert!(!validate_encounter(&encounter).valid);
        assert!(super::super::ca_core::validate_encounter(&encounter).valid);
    }

    #[test]
    fn vital_signs_require_loinc() {
        let mut observation = FhirObservation {
            id: "o-1".into(),
            status: Some(ObservationStatus::Final),
            category: vec![CodeableConcept::coded(Coding::new(
                "http://terminology.hl7.org/CodeSystem/observation-category",
                "vital-signs",
                "Vital Signs",
            ))],
            code: Some(CodeableConcept::coded(Coding::new(
                "http://snomed.info/sct",
                "364075005",
                "Heart rate",
            ))),
            subject: Some(Reference::urn_uuid("p-1")),
            value: Some(ObservationValue::Quantity(Quantity {
                value: Some(72.0),
                unit: Some("beats/min".into()),
                ..Default::default()
            })),
            ..Default::default()
        };

        let outcome = validate_observation(&observation);
        assert!(!outcome.valid);
        assert!(outcome.errors.iter().any(|e| e.code == IssueCode::CodeInvalid));

        observation.code = Some(CodeableConcept::coded(Coding::new(
            "http://loinc.org",
            "8867-4",
            "Heart rate",
        )));
        assert!(validate_observation(&observation).valid);
    }
}
