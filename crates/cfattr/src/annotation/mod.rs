// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Annotation records.
//!
//! # Layout
//!
//! ```text
//! annotation {
//!     u2 type_index;
//!     u2 num_element_value_pairs;
//!     { u2 element_name_index; element_value value; } pairs[num_element_value_pairs];
//! }
//! ```
//!
//! # Module Organization
//!
//! - [`element`] - element values (constants, enums, classes, nested annotations, arrays)
//! - [`type_annotation`] - type annotations (target type, target info, type path)

pub mod element;
pub mod type_annotation;

pub use element::{ConstKind, ElementValue};
pub use type_annotation::{
    LocalVarTarget, TargetInfo, TargetType, TypeAnnotation, TypePath, TypePathEntry, TypePathKind,
};

use crate::collection::PrefixWidth;
use crate::encodable::Encodable;
use crate::error::Result;
use crate::reference::Reference;
use crate::sink::ByteSink;

/// Fixed part of an annotation: type index + pair count.
const ANNOTATION_HEADER_LEN: u64 = 4;

const PAIRS: &str = "annotation pairs";

/// Whether an annotation is retained for runtime reflection.
///
/// Selects between the `RuntimeVisible*` and `RuntimeInvisible*` attribute
/// that ends up carrying the annotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Visibility {
    Visible,
    Invisible,
}

/// One `element_name_index` + `element_value` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameValuePair {
    pub name: Reference,
    pub value: ElementValue,
}

impl NameValuePair {
    pub fn new(name: Reference, value: ElementValue) -> Self {
        Self { name, value }
    }
}

impl Encodable for NameValuePair {
    fn length(&self) -> u64 {
        2 + self.value.length()
    }

    fn write(&self, sink: &mut dyn ByteSink) -> Result<()> {
        self.name.write(sink)?;
        self.value.write(sink)
    }
}

/// A single annotation occurrence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Annotation {
    type_ref: Reference,
    visibility: Visibility,
    pairs: Vec<NameValuePair>,
    pairs_length: u64,
}

impl Annotation {
    pub fn new(type_ref: Reference, visibility: Visibility) -> Self {
        Self {
            type_ref,
            visibility,
            pairs: Vec::new(),
            pairs_length: 0,
        }
    }

    /// Append a pair, keeping the running length current.
    pub fn add(&mut self, pair: NameValuePair) {
        self.pairs_length += pair.length();
        self.pairs.push(pair);
    }

    /// Builder-style [`add`](Self::add).
    pub fn with_pair(mut self, name: Reference, value: ElementValue) -> Self {
        self.add(NameValuePair::new(name, value));
        self
    }

    pub fn type_ref(&self) -> Reference {
        self.type_ref
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    pub fn is_visible(&self) -> bool {
        self.visibility == Visibility::Visible
    }

    pub fn pairs(&self) -> &[NameValuePair] {
        &self.pairs
    }
}

impl Encodable for Annotation {
    fn length(&self) -> u64 {
        ANNOTATION_HEADER_LEN + self.pairs_length
    }

    fn write(&self, sink: &mut dyn ByteSink) -> Result<()> {
        PrefixWidth::U2.check_count(PAIRS, self.pairs.len())?;
        self.type_ref.write(sink)?;
        PrefixWidth::U2.write_count(PAIRS, self.pairs.len(), sink)?;
        for pair in &self.pairs {
            pair.write(sink)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EncodeError;

    fn r(index: u16) -> Reference {
        Reference::new(index)
    }

    #[test]
    fn test_empty_annotation() {
        let annotation = Annotation::new(r(0x0C), Visibility::Invisible);
        assert_eq!(annotation.length(), 4);
        assert_eq!(
            annotation.encode_to_vec().expect("write"),
            [0x00, 0x0C, 0x00, 0x00]
        );
        assert!(!annotation.is_visible());
    }

    #[test]
    fn test_pairs_are_written_in_order() {
        let annotation = Annotation::new(r(1), Visibility::Visible)
            .with_pair(r(2), ElementValue::int(r(3)))
            .with_pair(r(4), ElementValue::Class(r(5)));
        assert_eq!(annotation.length(), 4 + 5 + 5);
        assert_eq!(
            annotation.encode_to_vec().expect("write"),
            [
                0x00, 0x01, 0x00, 0x02, // type, count
                0x00, 0x02, b'I', 0x00, 0x03, // pair 0
                0x00, 0x04, b'c', 0x00, 0x05, // pair 1
            ]
        );
    }

    #[test]
    fn test_nested_length_composes() {
        let innermost =
            Annotation::new(r(1), Visibility::Visible).with_pair(r(2), ElementValue::int(r(3)));
        let middle = Annotation::new(r(4), Visibility::Visible)
            .with_pair(r(5), ElementValue::array([ElementValue::annotation(innermost.clone())]));
        let outer = Annotation::new(r(6), Visibility::Visible)
            .with_pair(r(7), ElementValue::annotation(middle.clone()));

        assert_eq!(innermost.length(), 9);
        // 4 + name(2) + tag(1) + count(2) + tag(1) + innermost
        assert_eq!(middle.length(), 4 + 2 + 1 + 2 + 1 + 9);
        assert_eq!(outer.length(), 4 + 2 + 1 + middle.length());
        let bytes = outer.encode_to_vec().expect("write");
        assert_eq!(bytes.len() as u64, outer.length());
    }

    #[test]
    fn test_pair_count_overflow_is_reported() {
        let mut annotation = Annotation::new(r(1), Visibility::Visible);
        for _ in 0..=u16::MAX as usize {
            annotation.add(NameValuePair::new(r(2), ElementValue::int(r(3))));
        }
        let mut buf = Vec::new();
        let err = annotation.write(&mut buf).expect_err("65536 pairs");
        assert!(matches!(err, EncodeError::CountOverflow { count: 65536, .. }));
        assert!(buf.is_empty());
    }
}
