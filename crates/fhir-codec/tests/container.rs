//! Resource containers: discriminator dispatch through the registry.

use fhir_codec::model::{
    Basic, Bundle, BundleEntry, CodeableConcept, Coding, Observation, ObservationValue,
    Parameters, ParametersParameter, Patient, Reference,
};
use fhir_codec::{CodecError, ErrorKind, PrimitiveValue, Resource, ResourceRegistry, json, xml};

fn observation() -> Observation {
    Observation {
        id: Some(PrimitiveValue::new("bp".to_string())),
        status: Some(PrimitiveValue::new("final".to_string())),
        code: Some(CodeableConcept::from_coding(Coding::new(
            "http://loinc.org",
            "8867-4",
        ))),
        subject: Some(Reference::to("Patient/example")),
        value: Some(ObservationValue::Integer(PrimitiveValue::new(44))),
        ..Observation::default()
    }
}

fn bundle() -> Resource {
    let mut bundle = Bundle::of_type("collection");
    bundle.total = Some(PrimitiveValue::new(2));
    bundle.entry = vec![
        BundleEntry::new(Resource::from(Patient {
            id: Some(PrimitiveValue::new("example".to_string())),
            ..Patient::default()
        }))
        .with_full_url("urn:uuid:1"),
        BundleEntry::new(Resource::from(observation())).with_full_url("urn:uuid:2"),
    ];
    Resource::from(bundle)
}

#[test]
fn test_unknown_discriminator_json() {
    let err = json::from_str(r#"{"resourceType": "NotARealKind", "id": "x"}"#).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnknownDiscriminator);
    assert_eq!(err.to_string(), "unknown resource type 'NotARealKind'");
}

#[test]
fn test_unknown_discriminator_xml() {
    let err = xml::from_str(r#"<NotARealKind xmlns="http://hl7.org/fhir"><id value="x"/></NotARealKind>"#)
        .unwrap_err();
    assert!(matches!(
        err,
        CodecError::UnknownDiscriminator { ref resource_type } if resource_type == "NotARealKind"
    ));
}

#[test]
fn test_discriminator_is_case_sensitive() {
    let err = json::from_str(r#"{"resourceType": "patient"}"#).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnknownDiscriminator);
}

#[test]
fn test_nested_unknown_discriminator() {
    let err = json::from_str(
        r#"{"resourceType": "Patient", "contained": [{"resourceType": "Basic"}, {"resourceType": "Medication"}]}"#,
    )
    .unwrap_err();
    assert!(matches!(
        err,
        CodecError::UnknownDiscriminator { ref resource_type } if resource_type == "Medication"
    ));
}

#[test]
fn test_missing_discriminator_is_malformed() {
    let err = json::from_str(r#"{"resourceType": "Bundle", "entry": [{"resource": {"id": "x"}}]}"#)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MalformedInput);
}

#[test]
fn test_bundle_roundtrip_json() {
    let resource = bundle();
    let text = json::to_string(&resource).unwrap();
    assert_eq!(
        text,
        concat!(
            r#"{"resourceType":"Bundle","type":"collection","total":2,"entry":["#,
            r#"{"fullUrl":"urn:uuid:1","resource":{"resourceType":"Patient","id":"example"}},"#,
            r#"{"fullUrl":"urn:uuid:2","resource":{"resourceType":"Observation","id":"bp","#,
            r#""status":"final","code":{"coding":[{"system":"http://loinc.org","code":"8867-4"}]},"#,
            r#""subject":{"reference":"Patient/example"},"valueInteger":44}}]}"#
        )
    );
    assert_eq!(json::from_str(&text).unwrap(), resource);
}

#[test]
fn test_bundle_roundtrip_xml() {
    let resource = bundle();
    let text = xml::to_string(&resource).unwrap();
    assert!(text.contains(r#"<resource><Patient><id value="example"/></Patient></resource>"#));
    assert_eq!(xml::from_str(&text).unwrap(), resource);

    let Resource::Bundle(bundle) = &resource else {
        unreachable!()
    };
    let kinds: Vec<&str> = bundle.resources().map(Resource::resource_type).collect();
    assert_eq!(kinds, vec!["Patient", "Observation"]);
}

#[test]
fn test_custom_registry_without_kind() {
    let mut registry = ResourceRegistry::new();
    registry.register::<Bundle>();
    registry.register::<Patient>();

    let text = json::to_string(&bundle()).unwrap();
    let err = json::from_str_with(&text, &registry).unwrap_err();
    assert!(matches!(
        err,
        CodecError::UnknownDiscriminator { ref resource_type } if resource_type == "Observation"
    ));

    let markup = xml::to_string(&bundle()).unwrap();
    let err = xml::from_str_with(&markup, &registry).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnknownDiscriminator);

    registry.register::<Observation>();
    assert_eq!(json::from_str_with(&text, &registry).unwrap(), bundle());
}

#[test]
fn test_contained_resources() {
    let resource = Resource::from(Patient {
        contained: vec![
            Resource::from(Basic {
                id: Some(PrimitiveValue::new("b1".to_string())),
                code: Some(CodeableConcept {
                    text: Some(PrimitiveValue::new("referral".to_string())),
                    ..CodeableConcept::default()
                }),
                ..Basic::default()
            }),
            Resource::from(observation()),
        ],
        ..Patient::default()
    });
    let text = json::to_string(&resource).unwrap();
    assert!(text.starts_with(
        r#"{"resourceType":"Patient","contained":[{"resourceType":"Basic","id":"b1","code":{"text":"referral"}},"#
    ));
    assert_eq!(json::from_str(&text).unwrap(), resource);
    assert_eq!(xml::from_str(&xml::to_string(&resource).unwrap()).unwrap(), resource);
}

#[test]
fn test_parameter_resource_and_parts() {
    let resource = Resource::from(Parameters {
        parameter: vec![
            ParametersParameter::new("patient").with_resource(Resource::from(Patient::default())),
            ParametersParameter::new("match")
                .with_part(ParametersParameter::new("score").with_value(
                    fhir_codec::model::DataValue::Decimal(PrimitiveValue::new(0.75)),
                ))
                .with_part(ParametersParameter::new("grade").with_value(
                    fhir_codec::model::DataValue::Code(PrimitiveValue::new("certain".to_string())),
                )),
        ],
        ..Parameters::default()
    });
    let value = json::to_value(&resource).unwrap();
    assert_eq!(
        value["parameter"][0]["resource"],
        serde_json::json!({"resourceType": "Patient"})
    );
    assert_eq!(value["parameter"][1]["part"][0]["valueDecimal"], 0.75);
    assert_eq!(
        json::from_value(value, fhir_codec::default_registry()).unwrap(),
        resource
    );
    assert_eq!(xml::from_str(&xml::to_string(&resource).unwrap()).unwrap(), resource);
}

#[test]
fn test_xml_wrapper_holds_one_resource() {
    let err = xml::from_str(
        r#"<Bundle xmlns="http://hl7.org/fhir"><entry><resource><Patient/><Basic/></resource></entry></Bundle>"#,
    )
    .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MalformedInput);

    let err = xml::from_str(
        r#"<Bundle xmlns="http://hl7.org/fhir"><entry><resource/></entry></Bundle>"#,
    )
    .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MalformedInput);
}
