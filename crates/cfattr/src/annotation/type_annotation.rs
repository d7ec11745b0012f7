// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Type annotations.
//!
//! # Layout
//!
//! ```text
//! type_annotation {
//!     u1 target_type;
//!     target_info;                                   // shape chosen by target_type
//!     type_path { u1 path_length; { u1 type_path_kind; u1 type_argument_index; } path[]; }
//!     u2 type_index;                                 // } inherited annotation
//!     u2 num_element_value_pairs;                    // }
//!     element_value_pairs[];                         // }
//! }
//! ```
//!
//! The field order is fixed by the container format.

use super::{Annotation, ElementValue, NameValuePair, Visibility};
use crate::collection::{LengthPrefixedCollection, PrefixWidth};
use crate::encodable::Encodable;
use crate::error::{EncodeError, Result};
use crate::reference::Reference;
use crate::sink::ByteSink;

/// Program location a type annotation applies to (`target_type` byte).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum TargetType {
    ClassTypeParameter = 0x00,
    MethodTypeParameter = 0x01,
    ClassExtends = 0x10,
    ClassTypeParameterBound = 0x11,
    MethodTypeParameterBound = 0x12,
    Field = 0x13,
    MethodReturn = 0x14,
    MethodReceiver = 0x15,
    MethodFormalParameter = 0x16,
    Throws = 0x17,
    LocalVariable = 0x40,
    ResourceVariable = 0x41,
    ExceptionParameter = 0x42,
    InstanceOf = 0x43,
    New = 0x44,
    ConstructorReference = 0x45,
    MethodReference = 0x46,
    Cast = 0x47,
    ConstructorInvocationTypeArgument = 0x48,
    MethodInvocationTypeArgument = 0x49,
    ConstructorReferenceTypeArgument = 0x4A,
    MethodReferenceTypeArgument = 0x4B,
}

impl TargetType {
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Name of the `target_info` shape this target type requires.
    pub const fn shape(self) -> &'static str {
        match self {
            TargetType::ClassTypeParameter | TargetType::MethodTypeParameter => "type_parameter",
            TargetType::ClassExtends => "supertype",
            TargetType::ClassTypeParameterBound | TargetType::MethodTypeParameterBound => {
                "type_parameter_bound"
            }
            TargetType::Field | TargetType::MethodReturn | TargetType::MethodReceiver => "empty",
            TargetType::MethodFormalParameter => "formal_parameter",
            TargetType::Throws => "throws",
            TargetType::LocalVariable | TargetType::ResourceVariable => "localvar",
            TargetType::ExceptionParameter => "catch",
            TargetType::InstanceOf
            | TargetType::New
            | TargetType::ConstructorReference
            | TargetType::MethodReference => "offset",
            TargetType::Cast
            | TargetType::ConstructorInvocationTypeArgument
            | TargetType::MethodInvocationTypeArgument
            | TargetType::ConstructorReferenceTypeArgument
            | TargetType::MethodReferenceTypeArgument => "type_argument",
        }
    }
}

/// One `localvar_target` table row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocalVarTarget {
    pub start_pc: u16,
    pub length: u16,
    pub index: u16,
}

impl Encodable for LocalVarTarget {
    fn length(&self) -> u64 {
        6
    }

    fn write(&self, sink: &mut dyn ByteSink) -> Result<()> {
        sink.write_u16(self.start_pc)?;
        sink.write_u16(self.length)?;
        sink.write_u16(self.index)?;
        Ok(())
    }
}

/// `target_info` payload; the tag byte is written by [`TypeAnnotation`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetInfo {
    TypeParameter {
        index: u8,
    },
    Supertype {
        index: u16,
    },
    TypeParameterBound {
        type_parameter_index: u8,
        bound_index: u8,
    },
    Empty,
    FormalParameter {
        index: u8,
    },
    Throws {
        type_index: u16,
    },
    LocalVariable(LengthPrefixedCollection<LocalVarTarget>),
    Catch {
        exception_table_index: u16,
    },
    Offset {
        offset: u16,
    },
    TypeArgument {
        offset: u16,
        type_argument_index: u8,
    },
}

impl TargetInfo {
    /// Empty local variable table with a two-byte count.
    pub fn local_variables() -> Self {
        TargetInfo::LocalVariable(LengthPrefixedCollection::u2())
    }

    pub const fn shape(&self) -> &'static str {
        match self {
            TargetInfo::TypeParameter { .. } => "type_parameter",
            TargetInfo::Supertype { .. } => "supertype",
            TargetInfo::TypeParameterBound { .. } => "type_parameter_bound",
            TargetInfo::Empty => "empty",
            TargetInfo::FormalParameter { .. } => "formal_parameter",
            TargetInfo::Throws { .. } => "throws",
            TargetInfo::LocalVariable(_) => "localvar",
            TargetInfo::Catch { .. } => "catch",
            TargetInfo::Offset { .. } => "offset",
            TargetInfo::TypeArgument { .. } => "type_argument",
        }
    }
}

impl Encodable for TargetInfo {
    fn length(&self) -> u64 {
        match self {
            TargetInfo::Empty => 0,
            TargetInfo::TypeParameter { .. } | TargetInfo::FormalParameter { .. } => 1,
            TargetInfo::Supertype { .. }
            | TargetInfo::TypeParameterBound { .. }
            | TargetInfo::Throws { .. }
            | TargetInfo::Catch { .. }
            | TargetInfo::Offset { .. } => 2,
            TargetInfo::TypeArgument { .. } => 3,
            TargetInfo::LocalVariable(table) => table.length(),
        }
    }

    fn write(&self, sink: &mut dyn ByteSink) -> Result<()> {
        match self {
            TargetInfo::Empty => {}
            TargetInfo::TypeParameter { index } | TargetInfo::FormalParameter { index } => {
                sink.write_u8(*index)?;
            }
            TargetInfo::TypeParameterBound {
                type_parameter_index,
                bound_index,
            } => {
                sink.write_u8(*type_parameter_index)?;
                sink.write_u8(*bound_index)?;
            }
            TargetInfo::Supertype { index: value }
            | TargetInfo::Throws { type_index: value }
            | TargetInfo::Catch {
                exception_table_index: value,
            }
            | TargetInfo::Offset { offset: value } => {
                sink.write_u16(*value)?;
            }
            TargetInfo::TypeArgument {
                offset,
                type_argument_index,
            } => {
                sink.write_u16(*offset)?;
                sink.write_u8(*type_argument_index)?;
            }
            TargetInfo::LocalVariable(table) => table.write(sink)?,
        }
        Ok(())
    }
}

/// Step kind within a type path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum TypePathKind {
    /// Deeper in an array type.
    Array = 0,
    /// Deeper in a nested type.
    Nested = 1,
    /// On the bound of a wildcard type argument.
    WildcardBound = 2,
    /// On a type argument of a parameterized type.
    TypeArgument = 3,
}

/// One `{ type_path_kind, type_argument_index }` step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypePathEntry {
    pub kind: TypePathKind,
    pub type_argument_index: u8,
}

impl TypePathEntry {
    pub fn new(kind: TypePathKind, type_argument_index: u8) -> Self {
        Self {
            kind,
            type_argument_index,
        }
    }
}

impl Encodable for TypePathEntry {
    fn length(&self) -> u64 {
        2
    }

    fn write(&self, sink: &mut dyn ByteSink) -> Result<()> {
        sink.write_u8(self.kind as u8)?;
        sink.write_u8(self.type_argument_index)?;
        Ok(())
    }
}

/// Count-prefixed list of path steps.
pub type TypePath = LengthPrefixedCollection<TypePathEntry>;

/// An annotation on a use of a type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeAnnotation {
    target_type: TargetType,
    target_info: TargetInfo,
    type_path: TypePath,
    annotation: Annotation,
}

impl TypeAnnotation {
    /// Create a type annotation with an empty one-byte-count type path.
    ///
    /// Fails when `target_info` is not the shape `target_type` requires.
    pub fn new(
        target_type: TargetType,
        target_info: TargetInfo,
        type_ref: Reference,
        visibility: Visibility,
    ) -> Result<Self> {
        if target_type.shape() != target_info.shape() {
            return Err(EncodeError::TargetMismatch {
                target_type: target_type.code(),
                shape: target_info.shape(),
            });
        }
        Ok(Self {
            target_type,
            target_info,
            type_path: TypePath::new(PrefixWidth::U1),
            annotation: Annotation::new(type_ref, visibility),
        })
    }

    /// Replace the type path with a prebuilt one (any prefix width).
    pub fn with_type_path(mut self, type_path: TypePath) -> Self {
        self.type_path = type_path;
        self
    }

    pub fn add_path_step(&mut self, entry: TypePathEntry) {
        self.type_path.append(entry);
    }

    /// Append a pair to the inherited annotation payload.
    pub fn add(&mut self, pair: NameValuePair) {
        self.annotation.add(pair);
    }

    /// Builder-style [`add`](Self::add).
    pub fn with_pair(mut self, name: Reference, value: ElementValue) -> Self {
        self.add(NameValuePair::new(name, value));
        self
    }

    pub fn target_type(&self) -> TargetType {
        self.target_type
    }

    pub fn target_info(&self) -> &TargetInfo {
        &self.target_info
    }

    pub fn type_path(&self) -> &TypePath {
        &self.type_path
    }

    /// The inherited annotation (type ref, visibility, pairs).
    pub fn annotation(&self) -> &Annotation {
        &self.annotation
    }

    pub fn visibility(&self) -> Visibility {
        self.annotation.visibility()
    }
}

impl Encodable for TypeAnnotation {
    fn length(&self) -> u64 {
        1 + self.target_info.length() + self.type_path.length() + self.annotation.length()
    }

    fn write(&self, sink: &mut dyn ByteSink) -> Result<()> {
        sink.write_u8(self.target_type.code())?;
        self.target_info.write(sink)?;
        self.type_path.write(sink)?;
        self.annotation.write(sink)
    }
}
