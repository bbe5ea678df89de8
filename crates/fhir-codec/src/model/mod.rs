//! Generated composite types.
//!
//! Every type here is a mechanical instantiation of the codec rules in
//! [`crate::driver`]: a struct with one field per schema element and a
//! [`Composite`] implementation that visits them in declared order. The set is
//! representative rather than complete; further kinds plug in the same way and
//! register through [`ResourceRegistry::register`].

mod basic;
mod bundle;
mod datatypes;
mod extension;
mod observation;
mod parameters;
mod patient;

pub use basic::Basic;
pub use bundle::{Bundle, BundleEntry};
pub use datatypes::{
    CodeableConcept, Coding, HumanName, Identifier, Meta, Period, Quantity, Reference,
};
pub use extension::{DataValue, Extension};
pub use observation::{EffectiveValue, Observation, ObservationComponent, ObservationValue};
pub use parameters::{Parameters, ParametersParameter};
pub use patient::{DeceasedValue, MultipleBirthValue, Patient};

use crate::driver::{Composite, FieldEncoder, ResourceKind};
use crate::error::Result;
use crate::registry::ResourceRegistry;

macro_rules! resources {
    ($($kind:ident),+ $(,)?) => {
        /// A polymorphic resource container.
        ///
        /// Holds exactly one resource of a registered kind. The variant is
        /// the discriminator: `resourceType` in JSON, the element tag in XML.
        /// Encoding delegates to the wrapped resource, which writes its own
        /// discriminator; decoding dispatches through a [`ResourceRegistry`].
        #[derive(Debug, Clone, PartialEq)]
        pub enum Resource {
            $( $kind(Box<$kind>), )+
        }

        impl Resource {
            /// The discriminator of the held resource.
            pub fn resource_type(&self) -> &'static str {
                match self {
                    $( Self::$kind(_) => <$kind as Composite>::TYPE_NAME, )+
                }
            }

            /// The logical id of the held resource, if it has a value.
            pub fn id(&self) -> Option<&str> {
                match self {
                    $( Self::$kind(resource) => resource.id.as_ref().and_then(|id| id.value.as_deref()), )+
                }
            }

            /// Walk the held resource's fields, discriminator first.
            pub fn encode_fields<E: FieldEncoder>(&self, enc: &mut E) -> Result<()> {
                match self {
                    $( Self::$kind(resource) => resource.encode_fields(enc), )+
                }
            }
        }

        $(
            impl ResourceKind for $kind {
                fn into_resource(self) -> Resource {
                    Resource::$kind(Box::new(self))
                }
            }

            impl From<$kind> for Resource {
                fn from(resource: $kind) -> Self {
                    resource.into_resource()
                }
            }
        )+

        /// Register every resource kind defined in this module.
        pub fn register_resources(registry: &mut ResourceRegistry) {
            $( registry.register::<$kind>(); )+
        }
    };
}

resources!(Basic, Bundle, Observation, Parameters, Patient);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitive::PrimitiveValue;

    #[test]
    fn test_resource_accessors() {
        let resource = Resource::from(Patient {
            id: Some(PrimitiveValue::new("p1".to_string())),
            ..Patient::default()
        });
        assert_eq!(resource.resource_type(), "Patient");
        assert_eq!(resource.id(), Some("p1"));

        let resource: Resource = Basic::default().into();
        assert_eq!(resource.resource_type(), "Basic");
        assert_eq!(resource.id(), None);
    }

    #[test]
    fn test_sidecar_only_id_has_no_value() {
        let resource = Resource::from(Observation {
            id: Some(PrimitiveValue::empty().with_id("x")),
            ..Observation::default()
        });
        assert_eq!(resource.id(), None);
    }
}
