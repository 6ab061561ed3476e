//! Internal clinical records.
//!
//! These are the shapes the rest of the product (patient management,
//! sessions, export) produces and consumes. The interop layer treats them
//! as immutable inputs; it never mutates or stores them.

use serde::{Deserialize, Serialize};

use crate::encounter::EncounterStatus;
use crate::observation::ObservationStatus;
use crate::types::AdministrativeGender;

/// Kind of clinical encounter in the internal model.
///
/// Coarser than the FHIR ActCode class set; the forward mapping to class
/// codes lives in the interop crate and is not invertible.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum EncounterType {
    Initial,
    Emergency,
    Inpatient,
    Outpatient,
    Ambulatory,
    FollowUp,
    Discharge,
    Home,
    Virtual,
}

impl EncounterType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EncounterType::Initial => "initial",
            EncounterType::Emergency => "emergency",
            EncounterType::Inpatient => "inpatient",
            EncounterType::Outpatient => "outpatient",
            EncounterType::Ambulatory => "ambulatory",
            EncounterType::FollowUp => "follow_up",
            EncounterType::Discharge => "discharge",
            EncounterType::Home => "home",
            EncounterType::Virtual => "virtual",
        }
    }

    /// Parse an internal type token, e.g. from an `Encounter.type` coding.
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "initial" => Some(EncounterType::Initial),
            "emergency" => Some(EncounterType::Emergency),
            "inpatient" => Some(EncounterType::Inpatient),
            "outpatient" => Some(EncounterType::Outpatient),
            "ambulatory" => Some(EncounterType::Ambulatory),
            "follow_up" => Some(EncounterType::FollowUp),
            "discharge" => Some(EncounterType::Discharge),
            "home" => Some(EncounterType::Home),
            "virtual" => Some(EncounterType::Virtual),
            _ => None,
        }
    }
}

impl std::fmt::Display for EncounterType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of clinical observation in the internal model
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ObservationType {
    VitalSigns,
    FunctionalAssessment,
    ClinicalFinding,
    Text,
}

impl ObservationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ObservationType::VitalSigns => "vital_signs",
            ObservationType::FunctionalAssessment => "functional_assessment",
            ObservationType::ClinicalFinding => "clinical_finding",
            ObservationType::Text => "text",
        }
    }
}

/// Address fields on an internal patient record
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InternalAddress {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub street: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

/// A patient record as the product stores it
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InternalPatient {
    pub id: String,
    pub first_name: String,
    pub last_name: String,

    /// ISO date, `YYYY-MM-DD`
    pub date_of_birth: String,

    pub gender: AdministrativeGender,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<InternalAddress>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub medical_record_number: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub insurance_number: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub ssn: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

/// An encounter record as the product stores it.
///
/// `status` reuses the FHIR status enum, so illegal values (the old
/// `completed`) cannot be represented.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InternalEncounter {
    pub id: String,
    pub patient_id: String,

    pub start_date: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,

    #[serde(rename = "type")]
    pub encounter_type: EncounterType,

    pub status: EncounterStatus,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider_id: Option<String>,
}

/// An observation record as the product stores it
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InternalObservation {
    pub id: String,
    pub patient_id: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub encounter_id: Option<String>,

    #[serde(rename = "type")]
    pub observation_type: ObservationType,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_value: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub body_site: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub code_system: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ObservationStatus>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub effective_date: Option<String>,
}

/// The internal counterpart of a [`crate::Resource`]
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum ClinicalRecord {
    Patient(InternalPatient),
    Encounter(InternalEncounter),
    Observation(InternalObservation),
}
