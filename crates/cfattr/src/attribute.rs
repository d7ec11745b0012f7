// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Named attribute records.
//!
//! # Layout
//!
//! ```text
//! attribute_info {
//!     u2 attribute_name_index;
//!     u4 attribute_length;
//!     u1 info[attribute_length];
//! }
//! ```
//!
//! Readers skip unknown attributes using `attribute_length` alone, so the
//! declared payload length must match the payload bytes exactly. The header
//! writer counts what the payload emits and fails on any drift.
//!
//! # Attribute kinds
//!
//! [`AttributeRecord`] is generic over its payload. [`Attribute`] closes the
//! set of payload shapes the encoder knows about; [`Attribute::Custom`] keeps
//! it open for callers with their own [`Encodable`] payloads.

use crate::annotation::{Annotation, ElementValue, TypeAnnotation, Visibility};
use crate::collection::{LengthPrefixedCollection, PrefixWidth};
use crate::encodable::{Encodable, RawBytes};
use crate::error::{EncodeError, Result};
use crate::reference::{Reference, SymbolResolver};
use crate::sink::{ByteSink, CountingSink};
use tracing::trace;

/// `u2 name_index` + `u4 attribute_length`.
pub const ATTRIBUTE_HEADER_LEN: u64 = 6;

/// Attribute names the encoder builds payloads for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttributeName {
    SourceFile,
    Signature,
    ConstantValue,
    NestHost,
    Synthetic,
    Deprecated,
    NestMembers,
    PermittedSubclasses,
    Exceptions,
    InnerClasses,
    RuntimeVisibleAnnotations,
    RuntimeInvisibleAnnotations,
    RuntimeVisibleParameterAnnotations,
    RuntimeInvisibleParameterAnnotations,
    RuntimeVisibleTypeAnnotations,
    RuntimeInvisibleTypeAnnotations,
    AnnotationDefault,
}

impl AttributeName {
    pub const fn as_str(self) -> &'static str {
        match self {
            AttributeName::SourceFile => "SourceFile",
            AttributeName::Signature => "Signature",
            AttributeName::ConstantValue => "ConstantValue",
            AttributeName::NestHost => "NestHost",
            AttributeName::Synthetic => "Synthetic",
            AttributeName::Deprecated => "Deprecated",
            AttributeName::NestMembers => "NestMembers",
            AttributeName::PermittedSubclasses => "PermittedSubclasses",
            AttributeName::Exceptions => "Exceptions",
            AttributeName::InnerClasses => "InnerClasses",
            AttributeName::RuntimeVisibleAnnotations => "RuntimeVisibleAnnotations",
            AttributeName::RuntimeInvisibleAnnotations => "RuntimeInvisibleAnnotations",
            AttributeName::RuntimeVisibleParameterAnnotations => {
                "RuntimeVisibleParameterAnnotations"
            }
            AttributeName::RuntimeInvisibleParameterAnnotations => {
                "RuntimeInvisibleParameterAnnotations"
            }
            AttributeName::RuntimeVisibleTypeAnnotations => "RuntimeVisibleTypeAnnotations",
            AttributeName::RuntimeInvisibleTypeAnnotations => "RuntimeInvisibleTypeAnnotations",
            AttributeName::AnnotationDefault => "AnnotationDefault",
        }
    }

    pub const fn annotations(visibility: Visibility) -> Self {
        match visibility {
            Visibility::Visible => AttributeName::RuntimeVisibleAnnotations,
            Visibility::Invisible => AttributeName::RuntimeInvisibleAnnotations,
        }
    }

    pub const fn parameter_annotations(visibility: Visibility) -> Self {
        match visibility {
            Visibility::Visible => AttributeName::RuntimeVisibleParameterAnnotations,
            Visibility::Invisible => AttributeName::RuntimeInvisibleParameterAnnotations,
        }
    }

    pub const fn type_annotations(visibility: Visibility) -> Self {
        match visibility {
            Visibility::Visible => AttributeName::RuntimeVisibleTypeAnnotations,
            Visibility::Invisible => AttributeName::RuntimeInvisibleTypeAnnotations,
        }
    }
}

/// Attribute header plus a payload of type `P`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeRecord<P> {
    name: Reference,
    payload: P,
}

impl<P: Encodable> AttributeRecord<P> {
    /// Resolve `name` once through the constant pool and wrap `payload`.
    pub fn new(name: &str, resolver: &mut dyn SymbolResolver, payload: P) -> Result<Self> {
        Ok(Self {
            name: resolver.resolve_utf8(name)?,
            payload,
        })
    }

    pub fn with_name_ref(name: Reference, payload: P) -> Self {
        Self { name, payload }
    }

    pub fn name(&self) -> Reference {
        self.name
    }

    pub fn payload(&self) -> &P {
        &self.payload
    }

    /// Bytes following the header.
    pub fn payload_length(&self) -> u64 {
        self.payload.length()
    }
}

impl<P: Encodable> Encodable for AttributeRecord<P> {
    fn length(&self) -> u64 {
        ATTRIBUTE_HEADER_LEN + self.payload_length()
    }

    fn write(&self, sink: &mut dyn ByteSink) -> Result<()> {
        let declared = self.payload_length();
        let field = u32::try_from(declared)
            .map_err(|_| EncodeError::PayloadTooLarge { length: declared })?;
        trace!(name = self.name.index(), payload_len = declared, "writing attribute");

        self.name.write(sink)?;
        sink.write_u32(field)?;

        let mut counter = CountingSink::new(sink);
        self.payload.write(&mut counter)?;
        let written = counter.count();
        if written != declared {
            return Err(EncodeError::LengthMismatch { declared, written });
        }
        Ok(())
    }
}

/// Attribute whose payload is a count-prefixed list.
pub type AttributeCollection<T> = AttributeRecord<LengthPrefixedCollection<T>>;

impl<T: Encodable> AttributeCollection<T> {
    /// Empty collection attribute with the given count width.
    pub fn collection(
        name: &str,
        resolver: &mut dyn SymbolResolver,
        width: PrefixWidth,
    ) -> Result<Self> {
        Self::new(name, resolver, LengthPrefixedCollection::new(width))
    }

    pub fn add(&mut self, element: T) {
        self.payload.append(element);
    }

    pub fn len(&self) -> usize {
        self.payload.len()
    }

    pub fn is_empty(&self) -> bool {
        self.payload.is_empty()
    }
}

/// One `InnerClasses` table row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InnerClass {
    pub inner_class: Reference,
    /// `None` for local and anonymous classes (written as index 0).
    pub outer_class: Option<Reference>,
    /// `None` for anonymous classes (written as index 0).
    pub inner_name: Option<Reference>,
    pub access_flags: u16,
}

impl Encodable for InnerClass {
    fn length(&self) -> u64 {
        8
    }

    fn write(&self, sink: &mut dyn ByteSink) -> Result<()> {
        self.inner_class.write(sink)?;
        sink.write_u16(self.outer_class.map_or(0, Reference::index))?;
        sink.write_u16(self.inner_name.map_or(0, Reference::index))?;
        sink.write_u16(self.access_flags)?;
        Ok(())
    }
}

/// Per-parameter annotation lists: u1 parameter count, each list u2-prefixed.
pub type ParameterAnnotations = LengthPrefixedCollection<LengthPrefixedCollection<Annotation>>;

/// `AnnotationDefault` payload: exactly one element value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DefaultValue {
    value: Option<ElementValue>,
}

impl DefaultValue {
    pub fn new(value: ElementValue) -> Self {
        Self { value: Some(value) }
    }

    /// Placeholder filled in later with [`set`](Self::set).
    pub fn pending() -> Self {
        Self { value: None }
    }

    pub fn set(&mut self, value: ElementValue) {
        self.value = Some(value);
    }

    pub fn value(&self) -> Option<&ElementValue> {
        self.value.as_ref()
    }
}

impl Encodable for DefaultValue {
    fn length(&self) -> u64 {
        self.value.as_ref().map_or(0, Encodable::length)
    }

    fn write(&self, sink: &mut dyn ByteSink) -> Result<()> {
        match &self.value {
            Some(value) => value.write(sink),
            None => Err(EncodeError::MissingField("AnnotationDefault value")),
        }
    }
}

/// Every attribute shape the encoder can emit.
pub enum Attribute {
    /// Single constant-pool index (SourceFile, Signature, ConstantValue, NestHost).
    ConstantIndex(AttributeRecord<Reference>),
    /// Verbatim bytes (Synthetic, Deprecated, unknown attributes).
    Raw(AttributeRecord<RawBytes>),
    /// u2-counted class references (NestMembers, PermittedSubclasses, Exceptions).
    ClassList(AttributeCollection<Reference>),
    InnerClasses(AttributeCollection<InnerClass>),
    Annotations(AttributeCollection<Annotation>),
    ParameterAnnotations(AttributeRecord<ParameterAnnotations>),
    TypeAnnotations(AttributeCollection<TypeAnnotation>),
    AnnotationDefault(AttributeRecord<DefaultValue>),
    Custom(AttributeRecord<Box<dyn Encodable>>),
}

impl Attribute {
    pub fn constant_index(
        name: AttributeName,
        resolver: &mut dyn SymbolResolver,
        value: Reference,
    ) -> Result<Self> {
        AttributeRecord::new(name.as_str(), resolver, value).map(Attribute::ConstantIndex)
    }

    /// Attribute with no payload (Synthetic, Deprecated).
    pub fn marker(name: AttributeName, resolver: &mut dyn SymbolResolver) -> Result<Self> {
        AttributeRecord::new(name.as_str(), resolver, RawBytes::empty()).map(Attribute::Raw)
    }

    /// Attribute under an arbitrary name with an opaque payload.
    pub fn raw(name: &str, resolver: &mut dyn SymbolResolver, bytes: Vec<u8>) -> Result<Self> {
        AttributeRecord::new(name, resolver, RawBytes(bytes)).map(Attribute::Raw)
    }

    pub fn class_list<I>(
        name: AttributeName,
        resolver: &mut dyn SymbolResolver,
        classes: I,
    ) -> Result<Self>
    where
        I: IntoIterator<Item = Reference>,
    {
        let classes: LengthPrefixedCollection<Reference> = classes.into_iter().collect();
        AttributeRecord::new(name.as_str(), resolver, classes).map(Attribute::ClassList)
    }

    pub fn inner_classes<I>(resolver: &mut dyn SymbolResolver, entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = InnerClass>,
    {
        let entries: LengthPrefixedCollection<InnerClass> = entries.into_iter().collect();
        AttributeRecord::new(AttributeName::InnerClasses.as_str(), resolver, entries)
            .map(Attribute::InnerClasses)
    }

    /// `Runtime(In)VisibleAnnotations`, named after `visibility`.
    ///
    /// An annotation of the other visibility fails with
    /// [`EncodeError::VisibilityMismatch`] before the name is resolved.
    pub fn annotations<I>(
        visibility: Visibility,
        resolver: &mut dyn SymbolResolver,
        annotations: I,
    ) -> Result<Self>
    where
        I: IntoIterator<Item = Annotation>,
    {
        let name = AttributeName::annotations(visibility);
        let mut payload = LengthPrefixedCollection::u2();
        for annotation in annotations {
            check_visibility(name, visibility, annotation.visibility())?;
            payload.append(annotation);
        }
        AttributeRecord::new(name.as_str(), resolver, payload).map(Attribute::Annotations)
    }

    /// `Runtime(In)VisibleParameterAnnotations`, one inner list per parameter.
    pub fn parameter_annotations<I>(
        visibility: Visibility,
        resolver: &mut dyn SymbolResolver,
        parameters: I,
    ) -> Result<Self>
    where
        I: IntoIterator<Item = Vec<Annotation>>,
    {
        let name = AttributeName::parameter_annotations(visibility);
        let mut table = ParameterAnnotations::u1();
        for parameter in parameters {
            let mut list = LengthPrefixedCollection::u2();
            for annotation in parameter {
                check_visibility(name, visibility, annotation.visibility())?;
                list.append(annotation);
            }
            table.append(list);
        }
        AttributeRecord::new(name.as_str(), resolver, table).map(Attribute::ParameterAnnotations)
    }

    /// `Runtime(In)VisibleTypeAnnotations`, named after `visibility`.
    ///
    /// Rejects type annotations of the other visibility like
    /// [`annotations`](Self::annotations).
    pub fn type_annotations<I>(
        visibility: Visibility,
        resolver: &mut dyn SymbolResolver,
        annotations: I,
    ) -> Result<Self>
    where
        I: IntoIterator<Item = TypeAnnotation>,
    {
        let name = AttributeName::type_annotations(visibility);
        let mut payload = LengthPrefixedCollection::u2();
        for annotation in annotations {
            check_visibility(name, visibility, annotation.visibility())?;
            payload.append(annotation);
        }
        AttributeRecord::new(name.as_str(), resolver, payload).map(Attribute::TypeAnnotations)
    }

    pub fn annotation_default(
        resolver: &mut dyn SymbolResolver,
        value: DefaultValue,
    ) -> Result<Self> {
        AttributeRecord::new(AttributeName::AnnotationDefault.as_str(), resolver, value)
            .map(Attribute::AnnotationDefault)
    }

    pub fn custom(
        name: &str,
        resolver: &mut dyn SymbolResolver,
        payload: Box<dyn Encodable>,
    ) -> Result<Self> {
        AttributeRecord::new(name, resolver, payload).map(Attribute::Custom)
    }

    /// Resolved name index.
    pub fn name(&self) -> Reference {
        match self {
            Attribute::ConstantIndex(a) => a.name(),
            Attribute::Raw(a) => a.name(),
            Attribute::ClassList(a) => a.name(),
            Attribute::InnerClasses(a) => a.name(),
            Attribute::Annotations(a) => a.name(),
            Attribute::ParameterAnnotations(a) => a.name(),
            Attribute::TypeAnnotations(a) => a.name(),
            Attribute::AnnotationDefault(a) => a.name(),
            Attribute::Custom(a) => a.name(),
        }
    }

    fn as_encodable(&self) -> &dyn Encodable {
        match self {
            Attribute::ConstantIndex(a) => a,
            Attribute::Raw(a) => a,
            Attribute::ClassList(a) => a,
            Attribute::InnerClasses(a) => a,
            Attribute::Annotations(a) => a,
            Attribute::ParameterAnnotations(a) => a,
            Attribute::TypeAnnotations(a) => a,
            Attribute::AnnotationDefault(a) => a,
            Attribute::Custom(a) => a,
        }
    }
}

impl Encodable for Attribute {
    fn length(&self) -> u64 {
        self.as_encodable().length()
    }

    fn write(&self, sink: &mut dyn ByteSink) -> Result<()> {
        self.as_encodable().write(sink)
    }
}

impl From<AttributeCollection<Reference>> for Attribute {
    fn from(attr: AttributeCollection<Reference>) -> Self {
        Attribute::ClassList(attr)
    }
}

impl From<AttributeRecord<Reference>> for Attribute {
    fn from(attr: AttributeRecord<Reference>) -> Self {
        Attribute::ConstantIndex(attr)
    }
}

fn check_visibility(name: AttributeName, expected: Visibility, found: Visibility) -> Result<()> {
    if found == expected {
        Ok(())
    } else {
        Err(EncodeError::VisibilityMismatch {
            attribute: name.as_str(),
            found,
        })
    }
}

/// `u2 attributes_count` + attributes, as attached to a class, field or method.
pub type AttributeTable = LengthPrefixedCollection<Attribute>;
