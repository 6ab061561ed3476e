//! FHIR → internal adapters.
//!
//! These are deliberately tolerant: missing optional elements become `None`
//! or empty strings, unknown class codes fall back to `ambulatory`. The
//! reverse class table is not the inverse of the forward one; AMB, VR and
//! HH all collapse to `ambulatory`.

use fhir_model::{
    ClinicalRecord, EncounterStatus, EncounterType, FhirEncounter, FhirObservation, FhirPatient,
    InternalAddress, InternalEncounter, InternalObservation, InternalPatient, ObservationType,
    ObservationValue, Reference, Resource,
};

/// Convert any supported resource to its internal counterpart.
pub fn resource_to_internal(resource: &Resource) -> ClinicalRecord {
    match resource {
        Resource::Patient(patient) => ClinicalRecord::Patient(patient_to_internal(patient)),
        Resource::Encounter(encounter) => {
            ClinicalRecord::Encounter(encounter_to_internal(encounter))
        }
        Resource::Observation(observation) => {
            ClinicalRecord::Observation(observation_to_internal(observation))
        }
    }
}

/// Strip the reference scheme and return the bare resource id.
fn reference_id(reference: Option<&Reference>) -> String {
    let Some(reference) = reference.and_then(|r| r.reference.as_deref()) else {
        return String::new();
    };
    if let Some(id) = reference.strip_prefix("urn:uuid:") {
        return id.to_string();
    }
    // Relative references like `Patient/123`
    reference
        .rsplit('/')
        .next()
        .unwrap_or(reference)
        .to_string()
}

pub fn patient_to_internal(patient: &FhirPatient) -> InternalPatient {
    let name = patient
        .name
        .iter()
        .find(|n| n.use_.as_deref() == Some("official"))
        .or_else(|| patient.name.first());

    let telecom_value = |system: &str| {
        patient
            .telecom
            .iter()
            .find(|t| t.system.as_deref() == Some(system))
            .and_then(|t| t.value.clone())
    };

    let address = patient
        .address
        .iter()
        .find(|a| a.use_.as_deref() == Some("home"))
        .or_else(|| patient.address.first())
        .map(|a| InternalAddress {
            street: a.line.first().cloned(),
            city: a.city.clone(),
            state: a.state.clone(),
            postal_code: a.postal_code.clone(),
            country: a.country.clone(),
        });

    let identifier_by_use = |use_: &str| {
        patient
            .identifier
            .iter()
            .find(|i| i.use_.as_deref() == Some(use_))
            .and_then(|i| i.value.clone())
    };
    let ssn = patient
        .identifier
        .iter()
        .find(|i| i.system.as_deref().is_some_and(|s| s.contains("us-ssn")))
        .and_then(|i| i.value.clone());

    InternalPatient {
        id: patient.id.clone(),
        first_name: name
            .and_then(|n| n.given.first().cloned())
            .unwrap_or_default(),
        last_name: name.and_then(|n| n.family.clone()).unwrap_or_default(),
        date_of_birth: patient.birth_date.clone().unwrap_or_default(),
        gender: patient.gender.unwrap_or(fhir_model::AdministrativeGender::Unknown),
        email: telecom_value("email"),
        phone: telecom_value("phone"),
        address,
        medical_record_number: identifier_by_use("official"),
        insurance_number: identifier_by_use("secondary"),
        ssn,
        is_active: patient.active,
    }
}

/// Reverse ActCode class table. Not injective in reverse: AMB serves both
/// `outpatient` and `ambulatory` on the forward path, and VR/HH also land
/// on `ambulatory` here.
fn class_to_type(code: &str) -> EncounterType {
    match code {
        "EMER" => EncounterType::Emergency,
        "IMP" => EncounterType::Inpatient,
        "OUT" => EncounterType::Outpatient,
        "FU" => EncounterType::FollowUp,
        "DIS" => EncounterType::Discharge,
        _ => EncounterType::Ambulatory,
    }
}

pub fn encounter_to_internal(encounter: &FhirEncounter) -> InternalEncounter {
    // An explicit Encounter.type takes precedence over the class code.
    let from_type = encounter.type_.first().and_then(|concept| {
        concept
            .coding
            .first()
            .and_then(|coding| coding.code.as_deref())
            .or(concept.text.as_deref())
            .and_then(EncounterType::from_token)
    });

    let encounter_type = from_type.unwrap_or_else(|| {
        encounter
            .class
            .as_ref()
            .and_then(|class| class.code.as_deref())
            .map(class_to_type)
            .unwrap_or(EncounterType::Ambulatory)
    });

    InternalEncounter {
        id: encounter.id.clone(),
        patient_id: reference_id(encounter.subject.as_ref()),
        start_date: encounter
            .period
            .as_ref()
            .and_then(|p| p.start.clone())
            .unwrap_or_default(),
        end_date: encounter.period.as_ref().and_then(|p| p.end.clone()),
        encounter_type,
        status: encounter.status.unwrap_or(EncounterStatus::Unknown),
        reason: encounter.reason_code.first().and_then(|concept| {
            concept
                .text
                .clone()
                .or_else(|| concept.coding.first().and_then(|c| c.display.clone()))
        }),
        provider_id: encounter
            .participant
            .first()
            .and_then(|p| p.individual.as_ref())
            .map(|individual| reference_id(Some(individual)))
            .filter(|id| !id.is_empty()),
    }
}

pub fn observation_to_internal(observation: &FhirObservation) -> InternalObservation {
    let mut value = None;
    let mut unit = None;
    let mut text_value = None;

    match &observation.value {
        Some(ObservationValue::Quantity(quantity)) => {
            value = quantity.value;
            unit = quantity.unit.clone();
        }
        // valueString feeds textValue, never the numeric value
        Some(ObservationValue::String(s)) => text_value = Some(s.clone()),
        Some(ObservationValue::Boolean(b)) => text_value = Some(b.to_string()),
        Some(ObservationValue::Integer(i)) => value = Some(*i as f64),
        Some(ObservationValue::CodeableConcept(concept)) => {
            text_value = concept
                .coding
                .first()
                .and_then(|c| c.display.clone())
                .or_else(|| concept.text.clone());
        }
        Some(ObservationValue::Range(range)) => {
            if let Some(low) = &range.low {
                value = low.value;
                unit = low.unit.clone();
            }
        }
        None => {}
    }

    let category = observation
        .category
        .first()
        .and_then(|concept| concept.coding.first())
        .and_then(|coding| coding.code.clone());

    let observation_type = match category.as_deref() {
        Some("vital-signs") => ObservationType::VitalSigns,
        Some("survey") => ObservationType::FunctionalAssessment,
        Some("exam") => ObservationType::ClinicalFinding,
        _ if matches!(observation.value, Some(ObservationValue::String(_))) => {
            ObservationType::Text
        }
        _ => ObservationType::ClinicalFinding,
    };

    let coding = observation
        .code
        .as_ref()
        .and_then(|concept| concept.coding.first());

    InternalObservation {
        id: observation.id.clone(),
        patient_id: reference_id(observation.subject.as_ref()),
        encounter_id: observation
            .encounter
            .as_ref()
            .map(|e| reference_id(Some(e)))
            .filter(|id| !id.is_empty()),
        observation_type,
        value,
        unit,
        text_value,
        body_site: observation.body_site.as_ref().and_then(|concept| {
            concept
                .text
                .clone()
                .or_else(|| concept.coding.first().and_then(|c| c.display.clone()))
        }),
        code: coding.and_then(|c| c.code.clone()),
        code_system: coding.and_then(|c| c.system.clone()),
        display_name: coding
            .and_then(|c| c.display.clone())
            .or_else(|| observation.code.as_ref().and_then(|c| c.text.clone())),
        category,
        status: observation.status,
        effective_date: observation.effective_date_time.clone(),
    }
}
