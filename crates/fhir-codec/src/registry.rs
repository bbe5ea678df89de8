//! Discriminator registry for resource containers.
//!
//! Maps each resource type name to the functions that decode it from either
//! wire format. Decoders look the discriminator up here before touching the
//! rest of the payload.
//!
//! # Thread Safety
//!
//! The registry is immutable once built. The default registry is cached in a
//! [`OnceLock`] and can be shared across threads without locking.
//!
//! # Example
//!
//! ```
//! use fhir_codec::model::Patient;
//! use fhir_codec::registry::{ResourceRegistry, default_registry};
//!
//! assert!(default_registry().contains("Patient"));
//!
//! let mut registry = ResourceRegistry::new();
//! registry.register::<Patient>();
//! assert_eq!(registry.resource_types(), vec!["Patient"]);
//! ```

use std::collections::HashMap;
use std::fmt;
use std::sync::OnceLock;

use crate::driver::ResourceKind;
use crate::error::Result;
use crate::json::JsonDecoder;
use crate::model::{Resource, register_resources};
use crate::xml::XmlDecoder;

/// Decodes one resource kind from a JSON object whose `resourceType` matched.
pub type JsonDecodeFn = for<'a, 'r> fn(&'a mut JsonDecoder<'r>) -> Result<Resource>;

/// Decodes one resource kind from an XML element whose tag matched.
pub type XmlDecodeFn = for<'a, 'r> fn(&'a mut XmlDecoder<'r>) -> Result<Resource>;

/// Decode functions registered for one discriminator.
#[derive(Clone, Copy)]
pub struct ResourceEntry {
    pub resource_type: &'static str,
    pub decode_json: JsonDecodeFn,
    pub decode_xml: XmlDecodeFn,
}

impl ResourceEntry {
    pub fn of<R: ResourceKind>() -> Self {
        Self {
            resource_type: R::TYPE_NAME,
            decode_json: decode_json::<R>,
            decode_xml: decode_xml::<R>,
        }
    }
}

impl fmt::Debug for ResourceEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceEntry")
            .field("resource_type", &self.resource_type)
            .finish_non_exhaustive()
    }
}

fn decode_json<R: ResourceKind>(dec: &mut JsonDecoder<'_>) -> Result<Resource> {
    R::decode_fields(dec).map(R::into_resource)
}

fn decode_xml<R: ResourceKind>(dec: &mut XmlDecoder<'_>) -> Result<Resource> {
    R::decode_fields(dec).map(R::into_resource)
}

/// Registry of resource decoders indexed by resource type.
///
/// Lookup is case-sensitive; there is no fallback kind.
#[derive(Debug, Default, Clone)]
pub struct ResourceRegistry {
    entries: HashMap<&'static str, ResourceEntry>,
}

impl ResourceRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a resource kind under its type name.
    ///
    /// If the kind is already registered, it is replaced.
    pub fn register<R: ResourceKind>(&mut self) {
        self.insert(ResourceEntry::of::<R>());
    }

    pub fn insert(&mut self, entry: ResourceEntry) {
        self.entries.insert(entry.resource_type, entry);
    }

    pub fn get(&self, resource_type: &str) -> Option<&ResourceEntry> {
        self.entries.get(resource_type)
    }

    pub fn contains(&self, resource_type: &str) -> bool {
        self.entries.contains_key(resource_type)
    }

    /// Registered type names, sorted.
    pub fn resource_types(&self) -> Vec<&'static str> {
        let mut types: Vec<_> = self.entries.keys().copied().collect();
        types.sort_unstable();
        types
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

static DEFAULT_REGISTRY: OnceLock<ResourceRegistry> = OnceLock::new();

/// Returns the registry with every resource kind in [`crate::model`].
///
/// Built on first access.
pub fn default_registry() -> &'static ResourceRegistry {
    DEFAULT_REGISTRY.get_or_init(build_default_registry)
}

fn build_default_registry() -> ResourceRegistry {
    let mut registry = ResourceRegistry::new();
    register_resources(&mut registry);
    registry
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Basic, Patient};

    #[test]
    fn default_registry_has_all_resources() {
        let registry = default_registry();
        assert_eq!(
            registry.resource_types(),
            vec!["Basic", "Bundle", "Observation", "Parameters", "Patient"]
        );
    }

    #[test]
    fn lookup_is_case_sensitive() {
        let registry = default_registry();
        assert!(registry.get("Patient").is_some());
        assert!(registry.get("patient").is_none());
        assert!(registry.get("PATIENT").is_none());
    }

    #[test]
    fn register_replaces_existing_entry() {
        let mut registry = ResourceRegistry::new();
        assert!(registry.is_empty());
        registry.register::<Patient>();
        registry.register::<Patient>();
        registry.register::<Basic>();
        assert_eq!(registry.len(), 2);
        assert_eq!(
            registry.get("Basic").map(|entry| entry.resource_type),
            Some("Basic")
        );
    }
}
