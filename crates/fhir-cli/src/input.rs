//! Reading and writing resource files.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use fhir_codec::{JsonOptions, Resource, WireFormat, XmlOptions, json, xml};
use tracing::debug;

/// Pick the wire format for a file.
///
/// The extension wins (`.json` or `.xml`, any case); otherwise the first
/// non-whitespace character of the content decides.
pub fn detect_format(path: &Path, content: &str) -> Option<WireFormat> {
    let by_extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .and_then(|ext| match ext.to_ascii_lowercase().as_str() {
            "json" => Some(WireFormat::Json),
            "xml" => Some(WireFormat::Xml),
            _ => None,
        });
    by_extension.or_else(|| WireFormat::detect(content))
}

/// Decode `content` as `format` using the default registry.
pub fn decode(content: &str, format: WireFormat) -> fhir_codec::Result<Resource> {
    match format {
        WireFormat::Json => json::from_str(content),
        WireFormat::Xml => xml::from_str(content),
    }
}

/// Encode a resource in `format`.
pub fn encode(resource: &Resource, format: WireFormat, pretty: bool) -> fhir_codec::Result<String> {
    match format {
        WireFormat::Json => json::to_string_with(resource, &JsonOptions::new().with_pretty(pretty)),
        WireFormat::Xml => xml::to_string_with(
            resource,
            &XmlOptions::new()
                .with_pretty(pretty)
                .with_declaration(pretty),
        ),
    }
}

/// Read and decode one resource file.
///
/// `format` overrides detection when given.
pub fn read_resource(path: &Path, format: Option<WireFormat>) -> Result<(WireFormat, Resource)> {
    let content =
        fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let format = format
        .or_else(|| detect_format(path, &content))
        .ok_or_else(|| anyhow!("cannot tell whether {} is JSON or XML", path.display()))?;
    debug!(path = %path.display(), format = %format, "decoding resource");
    let resource =
        decode(&content, format).with_context(|| format!("decode {}", path.display()))?;
    Ok((format, resource))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_beats_content() {
        assert_eq!(
            detect_format(Path::new("patient.JSON"), "<Patient/>"),
            Some(WireFormat::Json)
        );
        assert_eq!(
            detect_format(Path::new("patient.xml"), "{}"),
            Some(WireFormat::Xml)
        );
    }

    #[test]
    fn test_content_sniffing_fallback() {
        assert_eq!(
            detect_format(Path::new("patient.fhir"), "  \n{\"resourceType\": \"Patient\"}"),
            Some(WireFormat::Json)
        );
        assert_eq!(
            detect_format(Path::new("patient"), "<Patient xmlns=\"http://hl7.org/fhir\"/>"),
            Some(WireFormat::Xml)
        );
        assert_eq!(detect_format(Path::new("patient.txt"), "Patient"), None);
    }

    #[test]
    fn test_encode_switches_format() {
        let resource = json::from_str(r#"{"resourceType": "Basic", "id": "b1"}"#).unwrap();
        assert_eq!(
            encode(&resource, WireFormat::Xml, false).unwrap(),
            r#"<Basic xmlns="http://hl7.org/fhir"><id value="b1"/></Basic>"#
        );
        assert_eq!(
            encode(&resource, WireFormat::Json, false).unwrap(),
            r#"{"resourceType":"Basic","id":"b1"}"#
        );
    }
}
