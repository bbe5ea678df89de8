//! Repeated primitives: parallel bare and sidecar arrays.

use fhir_codec::model::{Extension, HumanName};
use fhir_codec::{PrimitiveValue, json, xml};
use serde_json::json;

fn given(values: Vec<PrimitiveValue<String>>) -> HumanName {
    HumanName {
        given: values,
        ..HumanName::default()
    }
}

#[test]
fn test_middle_element_metadata_keeps_alignment() {
    let name = given(vec![
        PrimitiveValue::new("Alice".to_string()),
        PrimitiveValue::new("Beth".to_string())
            .with_id("g2")
            .with_extension(Extension::string("http://example.org/nickname", "Bee")),
        PrimitiveValue::new("Carol".to_string()),
    ]);

    let value = json::encode_composite(&name).unwrap();
    assert_eq!(
        value,
        json!({
            "given": ["Alice", "Beth", "Carol"],
            "_given": [
                null,
                {
                    "id": "g2",
                    "extension": [{"url": "http://example.org/nickname", "valueString": "Bee"}]
                },
                null
            ]
        })
    );
    assert_eq!(value["_given"].as_array().unwrap().len(), 3);

    let decoded: HumanName = json::decode_composite(value).unwrap();
    assert_eq!(decoded, name);
    assert!(!decoded.given[0].has_sidecar());
    assert_eq!(decoded.given[1].id.as_deref(), Some("g2"));
    assert!(!decoded.given[2].has_sidecar());
}

#[test]
fn test_no_metadata_omits_sidecar_array() {
    let name = given(vec![
        PrimitiveValue::new("Alice".to_string()),
        PrimitiveValue::new("Beth".to_string()),
    ]);
    let value = json::encode_composite(&name).unwrap();
    assert_eq!(value, json!({"given": ["Alice", "Beth"]}));
}

#[test]
fn test_metadata_only_omits_bare_array() {
    let name = given(vec![
        PrimitiveValue::empty().with_id("g1"),
        PrimitiveValue::empty().with_id("g2"),
    ]);
    let value = json::encode_composite(&name).unwrap();
    assert_eq!(value, json!({"_given": [{"id": "g1"}, {"id": "g2"}]}));
    assert_eq!(json::decode_composite::<HumanName>(value).unwrap(), name);
}

#[test]
fn test_valueless_entry_is_null_in_bare_array() {
    let name = given(vec![
        PrimitiveValue::new("Alice".to_string()),
        PrimitiveValue::empty().with_id("g2"),
    ]);
    let value = json::encode_composite(&name).unwrap();
    assert_eq!(
        value,
        json!({"given": ["Alice", null], "_given": [null, {"id": "g2"}]})
    );
}

#[test]
fn test_all_empty_list_is_omitted() {
    let name = given(vec![PrimitiveValue::empty(), PrimitiveValue::empty()]);
    assert_eq!(json::encode_composite(&name).unwrap(), json!({}));
    let node = xml::encode_composite("name", &name).unwrap();
    assert!(node.children.is_empty());
}

#[test]
fn test_length_is_max_of_both_arrays() {
    let decoded: HumanName = json::decode_composite(json!({
        "given": ["Alice"],
        "_given": [null, null, {"id": "g3"}]
    }))
    .unwrap();
    assert_eq!(decoded.given.len(), 3);
    assert_eq!(decoded.given[0].value.as_deref(), Some("Alice"));
    assert!(decoded.given[1].is_empty());
    assert_eq!(decoded.given[2].value, None);
    assert_eq!(decoded.given[2].id.as_deref(), Some("g3"));

    let decoded: HumanName = json::decode_composite(json!({
        "given": ["Alice", "Beth", "Carol"],
        "_given": [{"id": "g1"}]
    }))
    .unwrap();
    assert_eq!(decoded.given.len(), 3);
    assert_eq!(decoded.given[0].id.as_deref(), Some("g1"));
    assert_eq!(decoded.given[2].value.as_deref(), Some("Carol"));
}

#[test]
fn test_wrong_entry_type_is_malformed() {
    let err = json::decode_composite::<HumanName>(json!({"given": ["Alice", 7]})).unwrap_err();
    assert_eq!(
        err.to_string(),
        "malformed JSON input: HumanName.given[1]: expected string, found number 7"
    );
}

#[test]
fn test_xml_sibling_elements() {
    let name = given(vec![
        PrimitiveValue::new("Alice".to_string()),
        PrimitiveValue::empty(),
        PrimitiveValue::empty().with_id("g3"),
    ]);
    let node = xml::encode_composite("name", &name).unwrap();
    let rendered: Vec<Vec<(String, String)>> = node
        .children
        .iter()
        .map(|child| child.attributes.clone())
        .collect();
    assert_eq!(
        rendered,
        vec![
            vec![("value".to_string(), "Alice".to_string())],
            vec![],
            vec![("id".to_string(), "g3".to_string())],
        ]
    );
    assert_eq!(xml::decode_composite::<HumanName>(node).unwrap(), name);
}
