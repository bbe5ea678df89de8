//! Choice (`value[x]`) fields.
//!
//! A choice field holds exactly one of a closed set of types. On the wire the
//! field name is suffixed with the populated type's name: `valueBoolean`,
//! `valueQuantity`, `deceasedDateTime`. Each field's candidate set is declared
//! once with [`choice_type!`](crate::choice_type), which produces a plain enum
//! and its [`Choice`] implementation.
//!
//! ```
//! use fhir_codec::choice_type;
//! use fhir_codec::model::Quantity;
//!
//! choice_type! {
//!     /// `Dosage.dose[x]`
//!     pub enum Dose {
//!         Quantity(composite Quantity),
//!         String(primitive String),
//!     }
//! }
//! ```

use crate::driver::{FieldDecoder, FieldEncoder};
use crate::error::{CodecError, Result};

/// A closed tagged union over the candidate types of one choice field.
pub trait Choice: Sized {
    /// Candidate type suffixes, in declaration order.
    const CANDIDATES: &'static [&'static str];

    /// Whether the candidate named `suffix` is a primitive, and so may also
    /// appear under a sidecar key.
    fn is_primitive(suffix: &str) -> bool;

    /// Suffix of the populated variant.
    fn type_suffix(&self) -> &'static str;

    /// Write the populated variant under `name` + suffix.
    fn encode_variant<E: FieldEncoder>(&self, name: &str, enc: &mut E) -> Result<()>;

    /// Read the variant identified by `suffix`, previously selected by
    /// [`select_variant`].
    fn decode_variant<D: FieldDecoder>(suffix: &str, name: &str, dec: &mut D)
    -> Result<Option<Self>>;
}

/// Wire name of one candidate: `value` + `Boolean` = `valueBoolean`.
pub fn choice_key(name: &str, suffix: &str) -> String {
    format!("{name}{suffix}")
}

/// Probe every candidate key and return the single populated suffix.
///
/// Primitive candidates are probed under both the bare and the sidecar key;
/// composite candidates under the bare key only.
/// Two or more populated candidates fail with
/// [`CodecError::ConflictingVariant`]; the decoder never picks one.
pub fn select_variant<C: Choice, D: FieldDecoder>(
    dec: &D,
    name: &str,
) -> Result<Option<&'static str>> {
    let present: Vec<&'static str> = C::CANDIDATES
        .iter()
        .copied()
        .filter(|suffix| {
            let key = choice_key(name, suffix);
            dec.has_field(&key) || (C::is_primitive(suffix) && dec.has_sidecar(&key))
        })
        .collect();
    match present.as_slice() {
        [] => Ok(None),
        [suffix] => Ok(Some(*suffix)),
        _ => Err(CodecError::conflicting_variant(
            name,
            present
                .iter()
                .map(|suffix| choice_key(name, suffix))
                .collect(),
        )),
    }
}

/// Declare a choice field's closed candidate set.
///
/// Each variant is named after the wire type suffix and marked either
/// `primitive T` (payload `PrimitiveValue<T>`) or `composite T`.
#[macro_export]
macro_rules! choice_type {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident ( $kind:ident $ty:ty ) ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq)]
        $vis enum $name {
            $( $(#[$vmeta])* $variant($crate::__choice_payload!($kind $ty)), )+
        }

        impl $crate::choice::Choice for $name {
            const CANDIDATES: &'static [&'static str] = &[$(stringify!($variant)),+];

            fn is_primitive(suffix: &str) -> bool {
                $(
                    if suffix == stringify!($variant) {
                        return $crate::__choice_is_primitive!($kind);
                    }
                )+
                false
            }

            fn type_suffix(&self) -> &'static str {
                match self {
                    $( Self::$variant(_) => stringify!($variant), )+
                }
            }

            fn encode_variant<E: $crate::driver::FieldEncoder>(
                &self,
                name: &str,
                enc: &mut E,
            ) -> $crate::Result<()> {
                let key = $crate::choice::choice_key(name, self.type_suffix());
                match self {
                    $( Self::$variant(value) => $crate::__choice_encode!($kind, enc, &key, value), )+
                }
            }

            fn decode_variant<D: $crate::driver::FieldDecoder>(
                suffix: &str,
                name: &str,
                dec: &mut D,
            ) -> $crate::Result<Option<Self>> {
                let key = $crate::choice::choice_key(name, suffix);
                $(
                    if suffix == stringify!($variant) {
                        return Ok($crate::__choice_decode!($kind, dec, &key)?.map(Self::$variant));
                    }
                )+
                Ok(None)
            }
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __choice_payload {
    (primitive $ty:ty) => { $crate::primitive::PrimitiveValue<$ty> };
    (composite $ty:ty) => { $ty };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __choice_is_primitive {
    (primitive) => {
        true
    };
    (composite) => {
        false
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __choice_encode {
    (primitive, $enc:ident, $key:expr, $value:ident) => {
        $enc.primitive($key, Some($value))
    };
    (composite, $enc:ident, $key:expr, $value:ident) => {
        $enc.composite($key, Some($value))
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __choice_decode {
    (primitive, $dec:ident, $key:expr) => {
        $dec.primitive($key)
    };
    (composite, $dec:ident, $key:expr) => {
        $dec.composite($key)
    };
}
