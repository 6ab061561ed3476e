//! Internal → FHIR adapters

use fhir_model::{
    Address, CodeableConcept, Coding, ContactPoint, EncounterParticipant, FhirEncounter,
    FhirObservation, FhirPatient, HumanName, Identifier, InternalEncounter, InternalObservation,
    InternalPatient, Meta, ObservationStatus, ObservationType, ObservationValue, Period, Quantity,
    Reference, EncounterType,
};

use super::{ACT_CODE_SYSTEM, LOINC_SYSTEM, OBSERVATION_CATEGORY_SYSTEM, SSN_SYSTEM};
use crate::error::InteropError;
use crate::profiles::Profile;

/// Internal encounter type → ActCode class table.
///
/// `initial` has no class mapping; `FU` and `DIS` are custom codes outside
/// the profile value sets, so encounters of those types convert but do not
/// validate.
fn class_coding(encounter_type: EncounterType) -> Option<Coding> {
    let (code, display) = match encounter_type {
        EncounterType::Emergency => ("EMER", "Emergency"),
        EncounterType::Inpatient => ("IMP", "Inpatient"),
        EncounterType::Outpatient | EncounterType::Ambulatory => ("AMB", "Ambulatory"),
        EncounterType::Home => ("HH", "Home Health"),
        EncounterType::Virtual => ("VR", "Virtual"),
        EncounterType::FollowUp => ("FU", "Follow-Up"),
        EncounterType::Discharge => ("DIS", "Discharge"),
        EncounterType::Initial => return None,
    };
    Some(Coding::new(ACT_CODE_SYSTEM, code, display))
}

fn profile_meta(profile: Profile, resource_type: &str) -> Meta {
    Meta {
        profile: vec![profile.structure_definition(resource_type)],
    }
}

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}

/// Map an internal patient record to a FHIR Patient claiming `profile`.
pub fn patient_to_fhir(patient: &InternalPatient, profile: Profile) -> FhirPatient {
    let mut identifier = Vec::new();
    if let Some(mrn) = &patient.medical_record_number {
        identifier.push(Identifier {
            use_: Some("official".into()),
            system: None,
            value: Some(mrn.clone()),
        });
    }
    if let Some(insurance) = &patient.insurance_number {
        identifier.push(Identifier {
            use_: Some("secondary".into()),
            system: None,
            value: Some(insurance.clone()),
        });
    }
    if let Some(ssn) = &patient.ssn {
        identifier.push(Identifier {
            use_: None,
            system: Some(SSN_SYSTEM.into()),
            value: Some(ssn.clone()),
        });
    }

    let mut telecom = Vec::new();
    if let Some(email) = &patient.email {
        telecom.push(ContactPoint {
            system: Some("email".into()),
            value: Some(email.clone()),
            use_: None,
        });
    }
    if let Some(phone) = &patient.phone {
        telecom.push(ContactPoint {
            system: Some("phone".into()),
            value: Some(phone.clone()),
            use_: Some("home".into()),
        });
    }

    let address = patient
        .address
        .as_ref()
        .map(|a| {
            vec![Address {
                use_: Some("home".into()),
                line: a.street.clone().into_iter().collect(),
                city: a.city.clone(),
                state: a.state.clone(),
                postal_code: a.postal_code.clone(),
                country: a.country.clone(),
            }]
        })
        .unwrap_or_default();

    FhirPatient {
        id: patient.id.clone(),
        meta: Some(profile_meta(profile, "Patient")),
        identifier,
        active: patient.is_active,
        name: vec![HumanName {
            use_: Some("official".into()),
            family: non_empty(&patient.last_name),
            given: non_empty(&patient.first_name).into_iter().collect(),
        }],
        telecom,
        gender: Some(patient.gender),
        birth_date: non_empty(&patient.date_of_birth),
        address,
    }
}

/// Map an internal encounter record to a FHIR Encounter claiming `profile`.
///
/// Fails only for an encounter type with no ActCode class mapping.
pub fn encounter_to_fhir(
    encounter: &InternalEncounter,
    profile: Profile,
) -> Result<FhirEncounter, InteropError> {
    let class = class_coding(encounter.encounter_type)
        .ok_or(InteropError::UnmappedEncounterType(encounter.encounter_type))?;

    let participant = encounter
        .provider_id
        .as_deref()
        .map(|provider| {
            vec![EncounterParticipant {
                individual: Some(Reference::urn_uuid(provider)),
            }]
        })
        .unwrap_or_default();

    Ok(FhirEncounter {
        id: encounter.id.clone(),
        meta: Some(profile_meta(profile, "Encounter")),
        status: Some(encounter.status),
        class: Some(class),
        type_: Vec::new(),
        subject: Some(Reference::urn_uuid(&encounter.patient_id)),
        participant,
        period: Some(Period {
            start: non_empty(&encounter.start_date),
            end: encounter.end_date.clone(),
        }),
        reason_code: encounter
            .reason
            .as_deref()
            .map(|reason| vec![CodeableConcept::text(reason)])
            .unwrap_or_default(),
    })
}

fn derived_category(observation_type: ObservationType) -> Option<(&'static str, &'static str)> {
    match observation_type {
        ObservationType::VitalSigns => Some(("vital-signs", "Vital Signs")),
        ObservationType::FunctionalAssessment => Some(("survey", "Survey")),
        ObservationType::ClinicalFinding => Some(("exam", "Exam")),
        ObservationType::Text => None,
    }
}

/// Map an internal observation record to a FHIR Observation claiming
/// `profile`.
///
/// Records without a code still convert (with a text-only concept); the
/// validators reject them afterwards, keeping data quality out of this
/// adapter.
pub fn observation_to_fhir(
    observation: &InternalObservation,
    profile: Profile,
) -> FhirObservation {
    let code = match &observation.code {
        Some(code) => {
            // Vital signs default to LOINC when the record does not name a
            // code system.
            let system = observation.code_system.clone().or_else(|| {
                (observation.observation_type == ObservationType::VitalSigns)
                    .then(|| LOINC_SYSTEM.to_string())
            });
            CodeableConcept {
                coding: vec![Coding {
                    system,
                    code: Some(code.clone()),
                    display: observation.display_name.clone(),
                }],
                text: observation.display_name.clone(),
            }
        }
        None => CodeableConcept::text(
            observation
                .display_name
                .as_deref()
                .unwrap_or(observation.observation_type.as_str()),
        ),
    };

    let category_code = observation
        .category
        .as_deref()
        .map(|c| (c.to_string(), c.to_string()))
        .or_else(|| {
            derived_category(observation.observation_type)
                .map(|(code, display)| (code.to_string(), display.to_string()))
        });

    let value = if let Some(value) = observation.value {
        Some(ObservationValue::Quantity(Quantity {
            value: Some(value),
            unit: observation.unit.clone(),
            system: None,
            code: None,
        }))
    } else {
        observation
            .text_value
            .clone()
            .map(ObservationValue::String)
    };

    FhirObservation {
        id: observation.id.clone(),
        meta: Some(profile_meta(profile, "Observation")),
        status: Some(observation.status.unwrap_or(ObservationStatus::Final)),
        category: category_code
            .map(|(code, display)| {
                vec![CodeableConcept::coded(Coding::new(
                    OBSERVATION_CATEGORY_SYSTEM,
                    &code,
                    &display,
                ))]
            })
            .unwrap_or_default(),
        code: Some(code),
        subject: Some(Reference::urn_uuid(&observation.patient_id)),
        encounter: observation
            .encounter_id
            .as_deref()
            .map(Reference::urn_uuid),
        effective_date_time: observation.effective_date.clone(),
        value,
        body_site: observation
            .body_site
            .as_deref()
            .map(CodeableConcept::text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fhir_model::EncounterStatus;
    use test_case::test_case;

    fn encounter(encounter_type: EncounterType) -> InternalEncounter {
        InternalEncounter {
            id: "enc-1".into(),
            patient_id: "pat-1".into(),
            start_date: "2026-05-01T09:30:00Z".into(),
            end_date: None,
            encounter_type,
            status: EncounterStatus::Finished,
            reason: None,
            provider_id: None,
        }
    }

    #[test_case(EncounterType::Emergency, "EMER", "Emergency")]
    #[test_case(EncounterType::Inpatient, "IMP", "Inpatient")]
    #[test_case(EncounterType::Outpatient, "AMB", "Ambulatory")]
    #[test_case(EncounterType::Ambulatory, "AMB", "Ambulatory")]
    #[test_case(EncounterType::Home, "HH", "Home Health")]
    #[test_case(EncounterType::Virtual, "VR", "Virtual")]
    #[test_case(EncounterType::FollowUp, "FU", "Follow-Up")]
    #[test_case(EncounterType::Discharge, "DIS", "Discharge")]
    fn class_table(encounter_type: EncounterType, code: &str, display: &str) {
        let fhir = encounter_to_fhir(&encounter(encounter_type), Profile::UsCore).unwrap();
        let class = fhir.class.unwrap();
        assert_eq!(class.system.as_deref(), Some(ACT_CODE_SYSTEM));
        assert_eq!(class.code.as_deref(), Some(code));
        assert_eq!(class.display.as_deref(), Some(display));
    }

    #[test]
    fn initial_has_no_class_mapping() {
        let err = encounter_to_fhir(&encounter(EncounterType::Initial), Profile::UsCore)
            .unwrap_err();
        assert!(matches!(err, InteropError::UnmappedEncounterType(_)));
    }

    #[test]
    fn references_use_urn_uuid_form() {
        let mut internal = encounter(EncounterType::Emergency);
        internal.provider_id = Some("prov-9".into());

        let fhir = encounter_to_fhir(&internal, Profile::CaCore).unwrap();
        assert_eq!(
            fhir.subject.unwrap().reference.as_deref(),
            Some("urn:uuid:pat-1")
        );
        assert_eq!(
            fhir.participant[0]
                .individual
                .as_ref()
                .unwrap()
                .reference
                .as_deref(),
            Some("urn:uuid:prov-9")
        );
    }

    #[test]
    fn vital_signs_default_to_loinc() {
        let observation = InternalObservation {
            id: "obs-1".into(),
            patient_id: "pat-1".into(),
            encounter_id: None,
            observation_type: ObservationType::VitalSigns,
            value: Some(72.0),
            unit: Some("beats/min".into()),
            text_value: None,
            body_site: None,
            code: Some("8867-4".into()),
            code_system: None,
            display_name: Some("Heart rate".into()),
            category: None,
            status: None,
            effective_date: None,
        };

        let fhir = observation_to_fhir(&observation, Profile::UsCore);
        let coding = &fhir.code.unwrap().coding[0];
        assert_eq!(coding.system.as_deref(), Some(LOINC_SYSTEM));
        assert_eq!(fhir.status, Some(ObservationStatus::Final));
        assert_eq!(
            fhir.category[0].coding[0].code.as_deref(),
            Some("vital-signs")
        );
    }
}
