//! FHIR Observation resource (simplified)

use serde::{Deserialize, Serialize};

use crate::types::{CodeableConcept, Meta, Quantity, Range, Reference};

/// FHIR R4 Observation status value set (closed)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum ObservationStatus {
    Registered,
    Preliminary,
    Final,
    Amended,
    Corrected,
    Cancelled,
    EnteredInError,
    Unknown,
}

impl ObservationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ObservationStatus::Registered => "registered",
            ObservationStatus::Preliminary => "preliminary",
            ObservationStatus::Final => "final",
            ObservationStatus::Amended => "amended",
            ObservationStatus::Corrected => "corrected",
            ObservationStatus::Cancelled => "cancelled",
            ObservationStatus::EnteredInError => "entered-in-error",
            ObservationStatus::Unknown => "unknown",
        }
    }
}

/// The `value[x]` choice element.
///
/// Externally tagged and flattened into [`FhirObservation`], so the wire
/// form is `{"valueQuantity": ...}`, `{"valueString": ...}` and so on, and
/// at most one value field can ever be present.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum ObservationValue {
    #[serde(rename = "valueQuantity")]
    Quantity(Quantity),
    #[serde(rename = "valueString")]
    String(String),
    #[serde(rename = "valueBoolean")]
    Boolean(bool),
    #[serde(rename = "valueInteger")]
    Integer(i64),
    #[serde(rename = "valueCodeableConcept")]
    CodeableConcept(CodeableConcept),
    #[serde(rename = "valueRange")]
    Range(Range),
}

/// FHIR R4 Observation resource
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FhirObservation {
    #[serde(default)]
    pub id: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<Meta>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ObservationStatus>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub category: Vec<CodeableConcept>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<CodeableConcept>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<Reference>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub encounter: Option<Reference>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub effective_date_time: Option<String>,

    #[serde(flatten)]
    pub value: Option<ObservationValue>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub body_site: Option<CodeableConcept>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_flattens_into_the_resource() {
        let obs = FhirObservation {
            id: "obs-1".into(),
            status: Some(ObservationStatus::Final),
            value: Some(ObservationValue::Quantity(Quantity {
                value: Some(72.0),
                unit: Some("beats/min".into()),
                ..Default::default()
            })),
            ..Default::default()
        };

        let json = serde_json::to_value(&obs).unwrap();
        assert_eq!(json["valueQuantity"]["value"], 72.0);
        assert!(json.get("value").is_none());
    }

    #[test]
    fn value_string_round_trips() {
        let json = serde_json::json!({
            "id": "obs-2",
            "status": "final",
            "valueString": "patient reports mild pain"
        });
        let obs: FhirObservation = serde_json::from_value(json).unwrap();
        assert_eq!(
            obs.value,
            Some(ObservationValue::String("patient reports mild pain".into()))
        );
    }
}
