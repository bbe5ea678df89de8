//! File-level tests for reading, converting and checking resources.

use std::fs;
use std::path::Path;

use fhir_cli::check::{CheckStatus, check_file, check_files};
use fhir_cli::input::{encode, read_resource};
use fhir_codec::{Resource, WireFormat};
use tempfile::TempDir;

const PATIENT_JSON: &str = r#"{
  "resourceType": "Patient",
  "id": "example",
  "active": true,
  "_birthDate": {"id": "b1"},
  "deceasedBoolean": false
}"#;

fn write(dir: &Path, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_read_detects_format_from_content() {
    let dir = TempDir::new().unwrap();
    let path = write(dir.path(), "patient.resource", PATIENT_JSON);
    let (format, resource) = read_resource(&path, None).unwrap();
    assert_eq!(format, WireFormat::Json);
    assert_eq!(resource.resource_type(), "Patient");
    assert_eq!(resource.id(), Some("example"));
}

#[test]
fn test_explicit_format_overrides_extension() {
    let dir = TempDir::new().unwrap();
    let path = write(dir.path(), "patient.xml", PATIENT_JSON);
    assert!(read_resource(&path, None).is_err());
    let (format, _) = read_resource(&path, Some(WireFormat::Json)).unwrap();
    assert_eq!(format, WireFormat::Json);
}

#[test]
fn test_convert_json_to_xml_and_back() {
    let dir = TempDir::new().unwrap();
    let source = write(dir.path(), "patient.json", PATIENT_JSON);
    let (_, resource) = read_resource(&source, None).unwrap();

    let markup = encode(&resource, WireFormat::Xml, true).unwrap();
    assert!(markup.starts_with("<?xml"));
    let target = write(dir.path(), "patient.xml", &markup);

    let (format, converted) = read_resource(&target, None).unwrap();
    assert_eq!(format, WireFormat::Xml);
    assert_eq!(converted, resource);
    let Resource::Patient(patient) = converted else {
        panic!("expected a Patient");
    };
    assert_eq!(patient.birth_date.and_then(|date| date.id).as_deref(), Some("b1"));
}

#[test]
fn test_read_error_names_the_file() {
    let dir = TempDir::new().unwrap();
    let path = write(dir.path(), "broken.json", r#"{"resourceType": "Nope"}"#);
    let error = read_resource(&path, None).unwrap_err();
    let message = format!("{error:#}");
    assert!(message.contains("broken.json"));
    assert!(message.ends_with("unknown resource type 'Nope'"));
}

#[test]
fn test_check_reports_each_file() {
    let dir = TempDir::new().unwrap();
    let good = write(dir.path(), "good.json", PATIENT_JSON);
    let conflict = write(
        dir.path(),
        "conflict.json",
        r#"{"resourceType": "Patient", "deceasedBoolean": true, "deceasedDateTime": "2020"}"#,
    );
    let namespace = write(dir.path(), "namespace.xml", "<Patient xmlns=\"urn:other\"/>");
    let missing = dir.path().join("missing.json");

    let report = check_files(&[good, conflict, namespace, missing]);
    assert!(report.has_failures());
    assert_eq!(report.failure_count(), 3);

    let kinds: Vec<Option<&str>> = report
        .outcomes
        .iter()
        .map(|outcome| outcome.error_kind.as_deref())
        .collect();
    assert_eq!(
        kinds,
        vec![
            None,
            Some("conflicting-variant"),
            Some("namespace-mismatch"),
            Some("io"),
        ]
    );
    assert_eq!(report.outcomes[0].resource_type.as_deref(), Some("Patient"));
    assert_eq!(report.outcomes[2].format.as_deref(), Some("XML"));
}

#[test]
fn test_check_outcome_serializes() {
    let dir = TempDir::new().unwrap();
    let path = write(dir.path(), "basic.xml", r#"<Basic xmlns="http://hl7.org/fhir"/>"#);
    let mut outcome = check_file(&path);
    assert_eq!(outcome.status, CheckStatus::Ok);
    outcome.file = "basic.xml".into();
    insta::assert_json_snapshot!(outcome, @r#"
    {
      "file": "basic.xml",
      "format": "XML",
      "resource_type": "Basic",
      "status": "ok"
    }
    "#);
}

#[test]
fn test_unknown_format_is_a_failure() {
    let dir = TempDir::new().unwrap();
    let path = write(dir.path(), "notes.txt", "just some text");
    let outcome = check_file(&path);
    assert_eq!(outcome.status, CheckStatus::Failed);
    assert_eq!(outcome.error_kind.as_deref(), Some("unknown-format"));
}
