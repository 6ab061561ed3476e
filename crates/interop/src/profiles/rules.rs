//! Base structural rules shared by every profile.
//!
//! Profile modules layer their jurisdiction-specific constraints on top of
//! these checks.

use fhir_model::{Address, FhirEncounter, FhirObservation, FhirPatient, Reference};

use super::{Issue, IssueCode};

pub(super) const LOINC_SYSTEM: &str = "http://loinc.org";

/// Accepted subject reference forms. Resources assembled into bundles use
/// the URN form; persisted resources use relative references.
const REFERENCE_PREFIXES: [&str; 2] = ["Patient/", "urn:uuid:"];

pub(super) fn check_id(id: &str, resource_type: &str, errors: &mut Vec<Issue>) {
    if id.is_empty() {
        errors.push(Issue::new(
            &format!("{resource_type}.id"),
            IssueCode::Required,
            "resource id must be present",
        ));
    }
}

pub(super) fn check_patient_base(
    patient: &FhirPatient,
    errors: &mut Vec<Issue>,
    warnings: &mut Vec<Issue>,
) {
    check_id(&patient.id, "Patient", errors);

    match patient.name.first() {
        None => errors.push(Issue::new(
            "Patient.name",
            IssueCode::Required,
            "at least one name is required",
        )),
        Some(name) if name.family.is_none() && name.given.is_empty() => {
            errors.push(Issue::new(
                "Patient.name",
                IssueCode::Required,
                "name must carry a family or given part",
            ));
        }
        Some(_) => {}
    }

    if patient.gender.is_none() {
        errors.push(Issue::new(
            "Patient.gender",
            IssueCode::Required,
            "gender is required",
        ));
    }

    if patient.identifier.is_empty() {
        warnings.push(Issue::new(
            "Patient.identifier",
            IssueCode::Structure,
            "no identifier (e.g. medical record number) present",
        ));
    }
}

/// Address country rule. A present country that is not in `allowed` is an
/// error, not a warning.
pub(super) fn check_address_country(
    addresses: &[Address],
    allowed: &[&str],
    message: &str,
    errors: &mut Vec<Issue>,
) {
    for address in addresses {
        let Some(country) = address.country.as_deref() else {
            continue;
        };
        if !allowed.iter().any(|a| a.eq_ignore_ascii_case(country)) {
            errors.push(Issue::new(
                "Patient.address.country",
                IssueCode::Value,
                format!("{message} (got '{country}')"),
            ));
        }
    }
}

pub(super) fn check_encounter_base(
    encounter: &FhirEncounter,
    allowed_class: &[&str],
    errors: &mut Vec<Issue>,
) {
    check_id(&encounter.id, "Encounter", errors);

    if encounter.status.is_none() {
        errors.push(Issue::new(
            "Encounter.status",
            IssueCode::Required,
            "status is required",
        ));
    }

    match encounter.class.as_ref().and_then(|c| c.code.as_deref()) {
        None => errors.push(Issue::new(
            "Encounter.class",
            IssueCode::Required,
            "class with an ActCode coding is required",
        )),
        Some(code) if !allowed_class.contains(&code) => {
            errors.push(Issue::new(
                "Encounter.class.code",
                IssueCode::CodeInvalid,
                format!("class code '{code}' is not in the allowed set {allowed_class:?}"),
            ));
        }
        Some(_) => {}
    }

    check_subject(encounter.subject.as_ref(), "Encounter.subject", errors);
}

pub(super) fn check_observation_base(observation: &FhirObservation, errors: &mut Vec<Issue>) {
    check_id(&observation.id, "Observation", errors);

    if observation.status.is_none() {
        errors.push(Issue::new(
            "Observation.status",
            IssueCode::Required,
            "status is required",
        ));
    }

    match observation.code.as_ref() {
        None => errors.push(Issue::new(
            "Observation.code",
            IssueCode::Required,
            "code is required",
        )),
        Some(code) if code.coding.is_empty() => errors.push(Issue::new(
            "Observation.code.coding",
            IssueCode::Required,
            "code must carry at least one coding",
        )),
        Some(_) => {}
    }

    check_subject(observation.subject.as_ref(), "Observation.subject", errors);

    if observation.value.is_none() {
        errors.push(Issue::new(
            "Observation.value[x]",
            IssueCode::Required,
            "one value element is required",
        ));
    }

    if is_vital_signs(observation) && !has_loinc_code(observation) {
        errors.push(Issue::new(
            "Observation.code.coding",
            IssueCode::CodeInvalid,
            "vital signs observations must carry a LOINC-sourced coding",
        ));
    }
}

fn check_subject(subject: Option<&Reference>, path: &str, errors: &mut Vec<Issue>) {
    match subject.and_then(|s| s.reference.as_deref()) {
        None => errors.push(Issue::new(
            path,
            IssueCode::Required,
            "subject reference is required",
        )),
        Some(reference) if !REFERENCE_PREFIXES.iter().any(|p| reference.starts_with(p)) => {
            errors.push(Issue::new(
                path,
                IssueCode::Value,
                format!("subject must reference a patient ('Patient/' or 'urn:uuid:'), got '{reference}'"),
            ));
        }
        Some(_) => {}
    }
}

fn is_vital_signs(observation: &FhirObservation) -> bool {
    observation
        .category
        .iter()
        .flat_map(|concept| &concept.coding)
        .any(|coding| coding.code.as_deref() == Some("vital-signs"))
}

fn has_loinc_code(observation: &FhirObservation) -> bool {
    observation
        .code
        .iter()
        .flat_map(|concept| &concept.coding)
        .any(|coding| coding.system.as_deref() == Some(LOINC_SYSTEM))
}
