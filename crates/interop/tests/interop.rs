//! End-to-end tests for the interop facade: conversion gates, validation
//! reports, bundle assembly, and the documented round-trip behavior.

use serde_json::json;
use test_case::test_case;

use fhir_interop::{
    ClinicalRecord, InteropError, Profile, Resource, bundle_to_clinical_data, from_fhir,
    from_fhir_json, is_ready, make_bundle, module_info, to_fhir_encounter, to_fhir_observation,
    to_fhir_patient, validate, validate_json,
};
use fhir_model::{
    AdministrativeGender, EncounterStatus, EncounterType, InternalAddress, InternalEncounter,
    InternalObservation, InternalPatient, ObservationStatus, ObservationType,
};

const ACT_CODE_SYSTEM: &str = "http://terminology.hl7.org/CodeSystem/v3-ActCode";

fn patient(country: &str) -> InternalPatient {
    InternalPatient {
        id: "pat-1".into(),
        first_name: "Alice".into(),
        last_name: "Martin".into(),
        date_of_birth: "1985-06-15".into(),
        gender: AdministrativeGender::Female,
        email: Some("alice@example.com".into()),
        phone: Some("555-0100".into()),
        address: Some(InternalAddress {
            street: Some("12 Main St".into()),
            city: Some("Springfield".into()),
            state: None,
            postal_code: Some("H0H 0H0".into()),
            country: Some(country.into()),
        }),
        medical_record_number: Some("MRN-0042".into()),
        insurance_number: Some("INS-777".into()),
        ssn: None,
        is_active: Some(true),
    }
}

fn encounter(encounter_type: EncounterType) -> InternalEncounter {
    InternalEncounter {
        id: "enc-1".into(),
        patient_id: "pat-1".into(),
        start_date: "2026-05-01T09:30:00Z".into(),
        end_date: Some("2026-05-01T10:00:00Z".into()),
        encounter_type,
        status: EncounterStatus::Finished,
        reason: Some("shortness of breath".into()),
        provider_id: Some("prov-9".into()),
    }
}

fn observation() -> InternalObservation {
    InternalObservation {
        id: "obs-1".into(),
        patient_id: "pat-1".into(),
        encounter_id: Some("enc-1".into()),
        observation_type: ObservationType::VitalSigns,
        value: Some(72.0),
        unit: Some("beats/min".into()),
        text_value: None,
        body_site: None,
        code: Some("8867-4".into()),
        code_system: None,
        display_name: Some("Heart rate".into()),
        category: None,
        status: Some(ObservationStatus::Final),
        effective_date: Some("2026-05-01T09:45:00Z".into()),
    }
}

#[test_case(Profile::CaCore, "CA")]
#[test_case(Profile::UsCore, "US")]
fn patient_round_trip_preserves_core_fields(profile: Profile, country: &str) {
    let internal = patient(country);
    let fhir = to_fhir_patient(&internal, profile).unwrap();
    let ClinicalRecord::Patient(back) = from_fhir(&Resource::Patient(fhir)) else {
        panic!("patient did not come back as a patient");
    };

    assert_eq!(back.id, internal.id);
    assert_eq!(back.first_name, internal.first_name);
    assert_eq!(back.last_name, internal.last_name);
    assert_eq!(back.date_of_birth, internal.date_of_birth);
    assert_eq!(back.gender, internal.gender);
    assert_eq!(back.email, internal.email);
    assert_eq!(back.phone, internal.phone);
    assert_eq!(
        back.address.as_ref().unwrap().city,
        internal.address.as_ref().unwrap().city
    );
    assert_eq!(
        back.address.as_ref().unwrap().country,
        internal.address.as_ref().unwrap().country
    );
    assert_eq!(back.medical_record_number, internal.medical_record_number);
}

#[test_case(EncounterType::Emergency, "EMER")]
#[test_case(EncounterType::Inpatient, "IMP")]
#[test_case(EncounterType::Outpatient, "AMB")]
#[test_case(EncounterType::Home, "HH")]
#[test_case(EncounterType::Virtual, "VR")]
fn encounter_class_is_deterministic_and_us_core_valid(
    encounter_type: EncounterType,
    code: &str,
) {
    let fhir = to_fhir_encounter(&encounter(encounter_type), Profile::UsCore).unwrap();
    assert_eq!(
        fhir.class.as_ref().unwrap().code.as_deref(),
        Some(code)
    );

    let report = validate(&Resource::Encounter(fhir.clone()), Profile::UsCore);
    assert!(report.is_valid, "errors: {:?}", report.errors);

    // Same input, same output.
    let again = to_fhir_encounter(&encounter(encounter_type), Profile::UsCore).unwrap();
    assert_eq!(fhir, again);
}

#[test]
fn emergency_scenario_produces_the_actcode_class() {
    let fhir = to_fhir_encounter(&encounter(EncounterType::Emergency), Profile::UsCore).unwrap();
    let class = fhir.class.unwrap();
    assert_eq!(class.system.as_deref(), Some(ACT_CODE_SYSTEM));
    assert_eq!(class.code.as_deref(), Some("EMER"));
    assert_eq!(class.display.as_deref(), Some("Emergency"));
}

#[test]
fn follow_up_converts_but_fails_profile_validation() {
    // FU is a custom class code outside both profile value sets.
    let err = to_fhir_encounter(&encounter(EncounterType::FollowUp), Profile::UsCore).unwrap_err();
    assert!(matches!(err, InteropError::Validation { .. }));
    assert!(err.to_string().contains("class"));
}

#[test]
fn encounter_reverse_class_collapses_to_ambulatory() {
    // Known lossy reverse path: home -> HH -> ambulatory.
    let fhir = to_fhir_encounter(&encounter(EncounterType::Home), Profile::UsCore).unwrap();
    let ClinicalRecord::Encounter(back) = from_fhir(&Resource::Encounter(fhir)) else {
        panic!("encounter did not come back as an encounter");
    };
    assert_eq!(back.encounter_type, EncounterType::Ambulatory);
    assert_eq!(back.patient_id, "pat-1");
    assert_eq!(back.status, EncounterStatus::Finished);
}

#[test]
fn validate_json_is_total_and_repeatable() {
    for garbled in [json!(null), json!({}), json!({"id": 17}), json!("Patient")] {
        let report = validate_json(&garbled, Profile::CaCore);
        assert!(!report.is_valid);
        assert_eq!(report.errors, vec!["Invalid resource format".to_string()]);
        assert!(!report.compliance.ca_core);
        assert!(!report.compliance.us_core);
    }

    let resource = json!({
        "resourceType": "Patient",
        "id": "p-1",
        "name": [{"family": "Roy", "given": ["Jean"]}],
        "gender": "male",
        "birthDate": "1970-02-03"
    });
    let first = validate_json(&resource, Profile::UsCore);
    let second = validate_json(&resource, Profile::UsCore);
    assert_eq!(first.is_valid, second.is_valid);
    assert_eq!(first.errors, second.errors);
    assert_eq!(first.warnings, second.warnings);
    assert_eq!(first.compliance, second.compliance);
    assert!(first.is_valid);
}

#[test]
fn ca_core_rejects_us_address_with_an_itemized_error() {
    let fhir = to_fhir_patient(&patient("US"), Profile::UsCore).unwrap();
    let report = validate(&Resource::Patient(fhir), Profile::CaCore);

    assert!(!report.is_valid);
    assert!(
        report
            .errors
            .iter()
            .any(|e| e.contains("Canadian address format")),
        "errors: {:?}",
        report.errors
    );
    assert!(!report.compliance.ca_core);
    assert!(report.compliance.us_core);
}

#[test]
fn make_bundle_is_atomic() {
    let valid_patient = Resource::Patient(to_fhir_patient(&patient("US"), Profile::UsCore).unwrap());

    // An encounter stripped of its subject fails validation.
    let mut broken = to_fhir_encounter(&encounter(EncounterType::Emergency), Profile::UsCore).unwrap();
    broken.subject = None;

    let err = make_bundle(
        &[valid_patient.clone(), Resource::Encounter(broken)],
        Profile::UsCore,
    )
    .unwrap_err();
    match err {
        InteropError::BundleEntry { index, .. } => assert_eq!(index, 1),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn make_bundle_links_valid_resources_deterministically() {
    let profile = Profile::UsCore;
    let resources = [
        Resource::Patient(to_fhir_patient(&patient("US"), profile).unwrap()),
        Resource::Encounter(to_fhir_encounter(&encounter(EncounterType::Emergency), profile).unwrap()),
        Resource::Observation(to_fhir_observation(&observation(), profile).unwrap()),
    ];

    let bundle = make_bundle(&resources, profile).unwrap();
    assert_eq!(bundle.entry.len(), 3);
    assert_eq!(bundle.total, Some(3));
    assert_eq!(bundle.entry[0].full_url, "urn:uuid:pat-1");
    assert_eq!(bundle.entry[1].full_url, "urn:uuid:enc-1");
    assert_eq!(bundle.entry[2].full_url, "urn:uuid:obs-1");
    assert_eq!(
        bundle.entry[2].resource.id(),
        "obs-1"
    );
    assert_eq!(
        bundle.entry[0].search.as_ref().unwrap().mode,
        "match"
    );

    let meta = bundle.meta.as_ref().unwrap();
    assert!(meta.profile.contains(&profile.canonical_url().to_string()));
    assert!(meta.profile.contains(&"US_CORE".to_string()));

    // fullUrls depend only on resource ids, not on this bundle.
    let again = make_bundle(&resources, profile).unwrap();
    assert_eq!(
        bundle.entry.iter().map(|e| &e.full_url).collect::<Vec<_>>(),
        again.entry.iter().map(|e| &e.full_url).collect::<Vec<_>>()
    );
}

#[test]
fn bundle_decomposes_into_clinical_data() {
    let profile = Profile::UsCore;
    let resources = [
        Resource::Patient(to_fhir_patient(&patient("US"), profile).unwrap()),
        Resource::Encounter(to_fhir_encounter(&encounter(EncounterType::Emergency), profile).unwrap()),
        Resource::Observation(to_fhir_observation(&observation(), profile).unwrap()),
    ];
    let bundle = make_bundle(&resources, profile).unwrap();

    let data = bundle_to_clinical_data(&bundle).unwrap();
    assert_eq!(data.patient.id, "pat-1");
    assert_eq!(data.encounter.patient_id, "pat-1");
    assert_eq!(data.observations.len(), 1);
    assert_eq!(data.observations[0].value, Some(72.0));

    // A bundle without an encounter is incomplete, not an error.
    let partial = make_bundle(&resources[..1], profile).unwrap();
    assert!(bundle_to_clinical_data(&partial).is_none());
}

#[test]
fn from_fhir_json_rejects_unsupported_resource_types() {
    let medication = json!({"resourceType": "Medication", "id": "m-1"});
    match from_fhir_json(&medication).unwrap_err() {
        InteropError::UnsupportedResourceType(name) => assert_eq!(name, "Medication"),
        other => panic!("unexpected error: {other}"),
    }

    let patient = json!({
        "resourceType": "Patient",
        "id": "p-9",
        "name": [{"use": "official", "family": "Ng", "given": ["Mai"]}],
        "gender": "female"
    });
    let ClinicalRecord::Patient(internal) = from_fhir_json(&patient).unwrap() else {
        panic!("patient JSON did not decode to a patient record");
    };
    assert_eq!(internal.id, "p-9");
    assert_eq!(internal.first_name, "Mai");
}

#[test]
fn module_queries_are_pure() {
    assert!(is_ready());

    let info = module_info();
    assert_eq!(info.status, "ready");
    assert_eq!(info.supported_resources, ["Patient", "Encounter", "Observation"]);
    assert_eq!(
        info.supported_profiles,
        [Profile::CaCore, Profile::UsCore]
    );
    assert_eq!(info.config.fhir_version, "4.0.1");
    assert!(!info.version.is_empty());

    let again = module_info();
    assert_eq!(info.supported_profiles, again.supported_profiles);
    assert_eq!(info.config, again.config);
}
