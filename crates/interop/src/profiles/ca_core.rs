//! CA Core (Canadian Baseline) profile rules

use fhir_model::{FhirEncounter, FhirObservation, FhirPatient, Resource};

use super::rules;
use super::{Issue, IssueCode, Profile, ProfileOutcome};

/// ActCode class codes accepted by CA Core. `OUT` is the CA-specific
/// addition; it is never produced by the forward adapters.
const ALLOWED_CLASS: [&str; 6] = ["EMER", "IMP", "AMB", "VR", "HH", "OUT"];

const CANADA: [&str; 2] = ["CA", "Canada"];

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
    rules::check_address_country(
        &patient.address,
        &CANADA,
        "address must use the Canadian address format (country 'CA' or 'Canada')",
        &mut errors,
    );

    if patient.birth_date.is_none() {
        warnings.push(Issue::new(
            "Patient.birthDate",
            IssueCode::Structure,
            "birthDate is recommended",
        ));
    }

    ProfileOutcome::new(Profile::CaCore, errors, warnings)
}

pub fn validate_encounter(encounter: &FhirEncounter) -> ProfileOutcome {
    let mut errors = Vec::new();
    rules::check_encounter_base(encounter, &ALLOWED_CLASS, &mut errors);
    ProfileOutcome::new(Profile::CaCore, errors, Vec::new())
}

pub fn validate_observation(observation: &FhirObservation) -> ProfileOutcome {
    let mut errors = Vec::new();
    rules::check_observation_base(observation, &mut errors);
    ProfileOutcome::new(Profile::CaCore, errors, Vec::new())
}

#[cfg(test)]
mod tests {
    use super::*;
    use fhir_model::{Address, AdministrativeGender, HumanName};

    fn patient() -> FhirPatient {
        FhirPatient {
            id: "p-1".into(),
            name: vec![HumanName {
                family: Some("Tremblay".into()),
                given: vec!["Luc".into()],
                ..Default::default()
            }],
            gender: Some(AdministrativeGender::Male),
            birth_date: Some("1980-04-12".into()),
            ..Default::default()
        }
    }

    #[test]
    fn accepts_canadian_address() {
        let mut p = patient();
        p.address = vec![Address {
            country: Some("Canada".into()),
            ..Default::default()
        }];
        assert!(validate_patient(&p).valid);
    }

    #[test]
    fn rejects_foreign_address() {
        let mut p = patient();
        p.address = vec![Address {
            country: Some("US".into()),
            ..Default::default()
        }];

        let outcome = validate_patient(&p);
        assert!(!outcome.valid);
        assert!(
            outcome.errors[0].message.contains("Canadian address format"),
            "unexpected message: {}",
            outcome.errors[0].message
        );
    }

    #[test]
    fn missing_birth_date_is_only_a_warning() {
        let mut p = patient();
        p.birth_date = None;

        let outcome = validate_patient(&p);
        assert!(outcome.valid);
        assert!(outcome.warnings.iter().any(|w| w.path == "Patient.birthDate"));
    }
}
