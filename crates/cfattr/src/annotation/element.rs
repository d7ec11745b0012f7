// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Annotation element values.
//!
//! # Layout
//!
//! ```text
//! element_value {
//!     u1 tag;
//!     union {
//!         u2 const_value_index;                        // B C D F I J S Z s
//!         { u2 type_name_index; u2 const_name_index; } // e
//!         u2 class_info_index;                         // c
//!         annotation annotation_value;                 // @
//!         { u2 num_values; element_value values[]; }   // [
//!     }
//! }
//! ```

use super::Annotation;
use crate::collection::LengthPrefixedCollection;
use crate::encodable::Encodable;
use crate::error::Result;
use crate::reference::Reference;
use crate::sink::ByteSink;

/// Primitive or string constant kinds, keyed by their tag byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstKind {
    Byte,
    Char,
    Double,
    Float,
    Int,
    Long,
    Short,
    Boolean,
    String,
}

impl ConstKind {
    pub const fn tag(self) -> u8 {
        match self {
            ConstKind::Byte => b'B',
            ConstKind::Char => b'C',
            ConstKind::Double => b'D',
            ConstKind::Float => b'F',
            ConstKind::Int => b'I',
            ConstKind::Long => b'J',
            ConstKind::Short => b'S',
            ConstKind::Boolean => b'Z',
            ConstKind::String => b's',
        }
    }
}

/// Value half of an annotation name/value pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ElementValue {
    Const {
        kind: ConstKind,
        value: Reference,
    },
    Enum {
        type_name: Reference,
        const_name: Reference,
    },
    Class(Reference),
    Annotation(Box<Annotation>),
    Array(LengthPrefixedCollection<ElementValue>),
}

impl ElementValue {
    pub fn constant(kind: ConstKind, value: Reference) -> Self {
        ElementValue::Const { kind, value }
    }

    pub fn string(value: Reference) -> Self {
        Self::constant(ConstKind::String, value)
    }

    pub fn int(value: Reference) -> Self {
        Self::constant(ConstKind::Int, value)
    }

    pub fn enumeration(type_name: Reference, const_name: Reference) -> Self {
        ElementValue::Enum {
            type_name,
            const_name,
        }
    }

    pub fn annotation(annotation: Annotation) -> Self {
        ElementValue::Annotation(Box::new(annotation))
    }

    /// Array value with a two-byte count.
    pub fn array<I>(values: I) -> Self
    where
        I: IntoIterator<Item = ElementValue>,
    {
        ElementValue::Array(values.into_iter().collect())
    }

    pub fn tag(&self) -> u8 {
        match self {
            ElementValue::Const { kind, .. } => kind.tag(),
            ElementValue::Enum { .. } => b'e',
            ElementValue::Class(_) => b'c',
            ElementValue::Annotation(_) => b'@',
            ElementValue::Array(_) => b'[',
        }
    }
}

impl Encodable for ElementValue {
    fn length(&self) -> u64 {
        1 + match self {
            ElementValue::Const { .. } | ElementValue::Class(_) => 2,
            ElementValue::Enum { .. } => 4,
            ElementValue::Annotation(annotation) => annotation.length(),
            ElementValue::Array(values) => values.length(),
        }
    }

    fn write(&self, sink: &mut dyn ByteSink) -> Result<()> {
        sink.write_u8(self.tag())?;
        match self {
            ElementValue::Const { value: index, .. } | ElementValue::Class(index) => {
                index.write(sink)
            }
            ElementValue::Enum {
                type_name,
                const_name,
            } => {
                type_name.write(sink)?;
                const_name.write(sink)
            }
            ElementValue::Annotation(annotation) => annotation.write(sink),
            ElementValue::Array(values) => values.write(sink),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotation::Visibility;

    fn r(index: u16) -> Reference {
        Reference::new(index)
    }

    #[test]
    fn test_const_value_layout() {
        let value = ElementValue::int(r(0x0010));
        assert_eq!(value.length(), 3);
        assert_eq!(value.encode_to_vec().expect("write"), [b'I', 0x00, 0x10]);
    }

    #[test]
    fn test_enum_value_layout() {
        let value = ElementValue::enumeration(r(1), r(2));
        assert_eq!(value.length(), 5);
        assert_eq!(
            value.encode_to_vec().expect("write"),
            [b'e', 0x00, 0x01, 0x00, 0x02]
        );
    }

    #[test]
    fn test_array_value_layout() {
        let value = ElementValue::array([ElementValue::Class(r(4)), ElementValue::string(r(5))]);
        // tag + count + 2 * (tag + index)
        assert_eq!(value.length(), 1 + 2 + 6);
        assert_eq!(
            value.encode_to_vec().expect("write"),
            [b'[', 0x00, 0x02, b'c', 0x00, 0x04, b's', 0x00, 0x05]
        );
    }

    #[test]
    fn test_nested_annotation_value() {
        let inner = Annotation::new(r(9), Visibility::Visible);
        let value = ElementValue::annotation(inner);
        assert_eq!(value.length(), 5);
        assert_eq!(
            value.encode_to_vec().expect("write"),
            [b'@', 0x00, 0x09, 0x00, 0x00]
        );
    }

    #[test]
    fn test_const_kind_tags() {
        let tags: Vec<u8> = [
            ConstKind::Byte,
            ConstKind::Char,
            ConstKind::Double,
            ConstKind::Float,
            ConstKind::Int,
            ConstKind::Long,
            ConstKind::Short,
            ConstKind::Boolean,
            ConstKind::String,
        ]
        .iter()
        .map(|k| k.tag())
        .collect();
        assert_eq!(tags, b"BCDFIJSZs");
    }
}
