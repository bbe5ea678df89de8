//! Output options for both wire formats.

/// Options for JSON output.
#[derive(Debug, Clone, Default)]
pub struct JsonOptions {
    /// Indent nested members.
    pub pretty: bool,
}

impl JsonOptions {
    /// Create new options with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }
}

/// Options for XML output.
#[derive(Debug, Clone)]
pub struct XmlOptions {
    /// Put each element on its own indented line.
    pub pretty: bool,
    /// Spaces per nesting level when `pretty` is set.
    pub indent: usize,
    /// Write the `<?xml version="1.0" encoding="UTF-8"?>` declaration.
    pub declaration: bool,
}

impl Default for XmlOptions {
    fn default() -> Self {
        Self {
            pretty: false,
            indent: 2,
            declaration: false,
        }
    }
}

impl XmlOptions {
    /// Create new options with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    #[must_use]
    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    #[must_use]
    pub fn with_declaration(mut self, declaration: bool) -> Self {
        self.declaration = declaration;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_xml_defaults() {
        let options = XmlOptions::default();
        assert!(!options.pretty);
        assert!(!options.declaration);
        assert_eq!(options.indent, 2);
    }

    #[test]
    fn test_builders() {
        let options = XmlOptions::new()
            .with_pretty(true)
            .with_indent(4)
            .with_declaration(true);
        assert!(options.pretty);
        assert_eq!(options.indent, 4);
        assert!(options.declaration);
        assert!(JsonOptions::new().with_pretty(true).pretty);
    }
}
