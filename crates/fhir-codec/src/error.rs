//! Error types for encode and decode operations.

use std::fmt;

use thiserror::Error;

/// The two wire notations understood by the codec.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WireFormat {
    /// Object notation (`application/fhir+json`).
    Json,
    /// Markup notation (`application/fhir+xml`).
    Xml,
}

impl WireFormat {
    /// Guess the notation from the first non-whitespace character.
    pub fn detect(input: &str) -> Option<Self> {
        match input.trim_start().as_bytes().first() {
            Some(b'{') => Some(Self::Json),
            Some(b'<') => Some(Self::Xml),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Json => "JSON",
            Self::Xml => "XML",
        }
    }
}

impl fmt::Display for WireFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether an unexpected markup node was an attribute or a child element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Attribute,
    Element,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Attribute => f.write_str("attribute"),
            Self::Element => f.write_str("element"),
        }
    }
}

/// Coarse classification of [`CodecError`], stable across message changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    MalformedInput,
    ConflictingVariant,
    UnknownDiscriminator,
    NamespaceMismatch,
    UnexpectedAttributeOrElement,
    Unrepresentable,
    Io,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MalformedInput => "malformed-input",
            Self::ConflictingVariant => "conflicting-variant",
            Self::UnknownDiscriminator => "unknown-discriminator",
            Self::NamespaceMismatch => "namespace-mismatch",
            Self::UnexpectedAttributeOrElement => "unexpected-node",
            Self::Unrepresentable => "unrepresentable",
            Self::Io => "io",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors that can occur while encoding or decoding a resource.
#[derive(Debug, Error)]
pub enum CodecError {
    /// The input is not well-formed in the target notation, or a member holds
    /// a value of the wrong shape.
    #[error("malformed {format} input: {message}")]
    MalformedInput { format: WireFormat, message: String },

    /// More than one candidate of a choice field is populated.
    #[error("choice field '{field}' has more than one value: {}", variants.join(", "))]
    ConflictingVariant { field: String, variants: Vec<String> },

    /// A polymorphic container names a kind absent from the registry.
    #[error("unknown resource type '{resource_type}'")]
    UnknownDiscriminator { resource_type: String },

    /// Markup element outside the expected namespace.
    #[error("element <{element}> is not in namespace {expected} (found {})", found.as_deref().unwrap_or("no namespace"))]
    NamespaceMismatch {
        element: String,
        expected: &'static str,
        found: Option<String>,
    },

    /// Markup attribute or element not declared by the enclosing composite.
    #[error("unexpected {node} '{name}' in <{parent}>")]
    UnexpectedNode {
        node: NodeKind,
        name: String,
        parent: String,
    },

    /// A value cannot be written in the target notation.
    #[error("cannot encode '{field}': {message}")]
    Unrepresentable { field: String, message: String },

    /// I/O error from the underlying writer.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for codec operations.
pub type Result<T> = std::result::Result<T, CodecError>;

impl CodecError {
    /// Create a MalformedInput error.
    pub fn malformed(format: WireFormat, message: impl Into<String>) -> Self {
        Self::MalformedInput {
            format,
            message: message.into(),
        }
    }

    /// Create a ConflictingVariant error.
    pub fn conflicting_variant(field: impl Into<String>, variants: Vec<String>) -> Self {
        Self::ConflictingVariant {
            field: field.into(),
            variants,
        }
    }

    /// Create an UnknownDiscriminator error.
    pub fn unknown_discriminator(resource_type: impl Into<String>) -> Self {
        Self::UnknownDiscriminator {
            resource_type: resource_type.into(),
        }
    }

    /// Create an UnexpectedNode error for an attribute.
    pub fn unexpected_attribute(name: impl Into<String>, parent: impl Into<String>) -> Self {
        Self::UnexpectedNode {
            node: NodeKind::Attribute,
            name: name.into(),
            parent: parent.into(),
        }
    }

    /// Create an UnexpectedNode error for a child element.
    pub fn unexpected_element(name: impl Into<String>, parent: impl Into<String>) -> Self {
        Self::UnexpectedNode {
            node: NodeKind::Element,
            name: name.into(),
            parent: parent.into(),
        }
    }

    /// Create an Unrepresentable error.
    pub fn unrepresentable(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Unrepresentable {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MalformedInput { .. } => ErrorKind::MalformedInput,
            Self::ConflictingVariant { .. } => ErrorKind::ConflictingVariant,
            Self::UnknownDiscriminator { .. } => ErrorKind::UnknownDiscriminator,
            Self::NamespaceMismatch { .. } => ErrorKind::NamespaceMismatch,
            Self::UnexpectedNode { .. } => ErrorKind::UnexpectedAttributeOrElement,
            Self::Unrepresentable { .. } => ErrorKind::Unrepresentable,
            Self::Io(_) => ErrorKind::Io,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CodecError::malformed(WireFormat::Json, "expected object");
        assert_eq!(format!("{err}"), "malformed JSON input: expected object");

        let err = CodecError::conflicting_variant(
            "value",
            vec!["valueBoolean".to_string(), "valueQuantity".to_string()],
        );
        assert_eq!(
            format!("{err}"),
            "choice field 'value' has more than one value: valueBoolean, valueQuantity"
        );

        let err = CodecError::unexpected_attribute("foo", "gender");
        assert_eq!(format!("{err}"), "unexpected attribute 'foo' in <gender>");
    }

    #[test]
    fn test_namespace_display() {
        let err = CodecError::NamespaceMismatch {
            element: "Patient".to_string(),
            expected: "http://hl7.org/fhir",
            found: None,
        };
        assert!(format!("{err}").contains("no namespace"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "test");
        let err: CodecError = io_err.into();
        assert_eq!(err.kind(), ErrorKind::Io);
    }

    #[test]
    fn test_detect_format() {
        assert_eq!(WireFormat::detect("  {\"a\":1}"), Some(WireFormat::Json));
        assert_eq!(WireFormat::detect("\n<Patient/>"), Some(WireFormat::Xml));
        assert_eq!(WireFormat::detect("Patient"), None);
        assert_eq!(WireFormat::detect(""), None);
    }
}
