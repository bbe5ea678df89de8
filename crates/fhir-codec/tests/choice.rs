//! Choice (`value[x]`) field behaviour in both formats.

use fhir_codec::model::{
    DataValue, DeceasedValue, MultipleBirthValue, Observation, ObservationValue, Parameters,
    ParametersParameter, Quantity,
};
use fhir_codec::{Choice, CodecError, ErrorKind, PrimitiveValue, Resource, json, xml};
use serde_json::{Value, json};

fn parameters(value: &Value) -> Parameters {
    match json::from_value(value.clone(), fhir_codec::default_registry()).unwrap() {
        Resource::Parameters(parameters) => *parameters,
        other => panic!("expected Parameters, got {}", other.resource_type()),
    }
}

#[test]
fn test_boolean_with_sidecar_identity() {
    let input = json!({
        "resourceType": "Parameters",
        "parameter": [{
            "name": "flag",
            "valueBoolean": true,
            "_valueBoolean": {"id": "a1"}
        }]
    });
    let decoded = parameters(&input);
    let parameter = decoded.get("flag").unwrap();
    let Some(DataValue::Boolean(value)) = &parameter.value else {
        panic!("expected a Boolean variant, got {:?}", parameter.value);
    };
    assert_eq!(value.value, Some(true));
    assert_eq!(value.id.as_deref(), Some("a1"));

    let encoded = json::to_value(&Resource::from(decoded)).unwrap();
    assert_eq!(encoded, input);
}

#[test]
fn test_two_candidates_conflict() {
    let input = json!({
        "resourceType": "Parameters",
        "parameter": [{
            "name": "x",
            "valueBoolean": true,
            "valueQuantity": {"value": 1}
        }]
    });
    let err = json::from_value(input, fhir_codec::default_registry()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ConflictingVariant);
    let CodecError::ConflictingVariant { field, variants } = err else {
        unreachable!()
    };
    assert_eq!(field, "value");
    assert_eq!(variants, vec!["valueBoolean", "valueQuantity"]);
}

#[test]
fn test_sidecar_of_other_candidate_conflicts() {
    let err = json::from_str(
        r#"{"resourceType": "Patient", "deceasedBoolean": false, "_deceasedDateTime": {"id": "d1"}}"#,
    )
    .unwrap_err();
    assert_eq!(
        err.to_string(),
        "choice field 'deceased' has more than one value: deceasedBoolean, deceasedDateTime"
    );
}

#[test]
fn test_sidecar_only_candidate_is_selected() {
    let resource =
        json::from_str(r#"{"resourceType": "Patient", "_deceasedDateTime": {"id": "d1"}}"#)
            .unwrap();
    let Resource::Patient(patient) = resource else {
        panic!("expected a Patient");
    };
    assert_eq!(
        patient.deceased,
        Some(DeceasedValue::DateTime(PrimitiveValue::empty().with_id("d1")))
    );
}

#[test]
fn test_no_candidate_leaves_field_unset() {
    let resource = json::from_str(r#"{"resourceType": "Patient", "deceased": true}"#).unwrap();
    let Resource::Patient(patient) = resource else {
        panic!("expected a Patient");
    };
    assert_eq!(patient.deceased, None);
}

#[test]
fn test_undeclared_suffix_is_not_a_candidate() {
    // `deceased[x]` allows Boolean and DateTime only; `deceasedString` is an
    // unknown member, not a third variant.
    let resource = json::from_str(
        r#"{"resourceType": "Patient", "deceasedString": "yes", "deceasedBoolean": true}"#,
    )
    .unwrap();
    let Resource::Patient(patient) = resource else {
        panic!("expected a Patient");
    };
    assert_eq!(
        patient.deceased,
        Some(DeceasedValue::Boolean(PrimitiveValue::new(true)))
    );
}

#[test]
fn test_encode_emits_one_key_set() {
    let observation = Observation {
        status: Some(PrimitiveValue::new("final".to_string())),
        value: Some(ObservationValue::Quantity(Quantity {
            value: Some(PrimitiveValue::new(185.0)),
            unit: Some(PrimitiveValue::new("lbs".to_string())),
            ..Quantity::default()
        })),
        ..Observation::default()
    };
    let value = json::to_value(&Resource::from(observation)).unwrap();
    let keys: Vec<&String> = value
        .as_object()
        .unwrap()
        .keys()
        .filter(|key| key.trim_start_matches('_').starts_with("value"))
        .collect();
    assert_eq!(keys, vec!["valueQuantity"]);
}

#[test]
fn test_xml_conflict() {
    let err = xml::from_str(
        r#"<Observation xmlns="http://hl7.org/fhir">
             <status value="final"/>
             <valueBoolean value="true"/>
             <valueString value="x"/>
           </Observation>"#,
    )
    .unwrap_err();
    assert!(matches!(
        err,
        CodecError::ConflictingVariant { ref variants, .. }
            if variants == &["valueString", "valueBoolean"]
    ));
}

#[test]
fn test_xml_composite_variant() {
    let resource = xml::from_str(
        r#"<Parameters xmlns="http://hl7.org/fhir">
             <parameter>
               <name value="weight"/>
               <valueQuantity><value value="72.5"/><unit value="kg"/></valueQuantity>
             </parameter>
           </Parameters>"#,
    )
    .unwrap();
    let Resource::Parameters(parameters) = &resource else {
        panic!("expected Parameters");
    };
    let parameter = parameters.get("weight").unwrap();
    let Some(DataValue::Quantity(quantity)) = &parameter.value else {
        panic!("expected a Quantity variant");
    };
    assert_eq!(quantity.value, Some(PrimitiveValue::new(72.5)));
    assert_eq!(
        json::to_string(&resource).unwrap(),
        r#"{"resourceType":"Parameters","parameter":[{"name":"weight","valueQuantity":{"value":72.5,"unit":"kg"}}]}"#
    );
}

#[test]
fn test_every_primitive_candidate_roundtrips() {
    let values = vec![
        DataValue::Base64Binary(PrimitiveValue::new("aGVsbG8=".to_string())),
        DataValue::Boolean(PrimitiveValue::new(false)),
        DataValue::Canonical(PrimitiveValue::new("http://example.org/sd".to_string())),
        DataValue::Code(PrimitiveValue::new("final".to_string())),
        DataValue::Date(PrimitiveValue::new("2024-02".to_string())),
        DataValue::Decimal(PrimitiveValue::new(-0.25)),
        DataValue::Integer(PrimitiveValue::new(-7)),
        DataValue::PositiveInt(PrimitiveValue::new(3)),
        DataValue::UnsignedInt(PrimitiveValue::new(0)),
        DataValue::Time(PrimitiveValue::new("12:30:00".to_string())),
        DataValue::Uuid(PrimitiveValue::new(
            "urn:uuid:c757873d-ec9a-4326-a141-556f43239520".to_string(),
        )),
    ];
    let resource = Resource::from(Parameters {
        parameter: values
            .iter()
            .map(|value| ParametersParameter::new(value.type_suffix()).with_value(value.clone()))
            .collect(),
        ..Parameters::default()
    });

    let from_json = json::from_str(&json::to_string(&resource).unwrap()).unwrap();
    assert_eq!(from_json, resource);
    let from_xml = xml::from_str(&xml::to_string(&resource).unwrap()).unwrap();
    assert_eq!(from_xml, resource);
}

#[test]
fn test_patient_multiple_birth_integer() {
    let resource = json::from_str(r#"{"resourceType": "Patient", "multipleBirthInteger": 2}"#)
        .unwrap();
    let Resource::Patient(patient) = resource else {
        panic!("expected a Patient");
    };
    assert_eq!(
        patient.multiple_birth,
        Some(MultipleBirthValue::Integer(PrimitiveValue::new(2)))
    );
}

#[test]
fn test_composite_candidate_has_no_sidecar() {
    let input = json!({
        "resourceType": "Parameters",
        "parameter": [{
            "name": "flag",
            "valueBoolean": true,
            "_valueQuantity": {"id": "q"}
        }]
    });
    let decoded = parameters(&input);
    assert_eq!(
        decoded.get("flag").unwrap().value,
        Some(DataValue::Boolean(PrimitiveValue::new(true)))
    );

    let err = json::from_value(
        json!({
            "resourceType": "Parameters",
            "parameter": [{"name": "x", "valueBoolean": true, "_valueDecimal": {"id": "d"}}]
        }),
        fhir_codec::default_registry(),
    )
    .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ConflictingVariant);
}
