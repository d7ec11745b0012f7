// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! # cfattr - class-file attribute encoder
//!
//! Write-only encoder for the attribute section of a class-file-like
//! container: named, length-prefixed attribute records, count-prefixed
//! collections, annotations and type annotations.
//!
//! Every record knows its serialized length before any byte is written, so
//! enclosing records emit correct `attribute_length` and count prefixes in a
//! single top-down pass, with no buffering or backpatching.
//!
//! ## Quick Start
//!
//! ```rust
//! use cfattr::{
//!     Annotation, Attribute, AttributeTable, ElementValue, Emitter, InternTable, Reference,
//!     Visibility,
//! };
//!
//! # fn main() -> cfattr::Result<()> {
//! let mut pool = InternTable::new();
//! let deprecated = Annotation::new(Reference::new(20), Visibility::Visible)
//!     .with_pair(Reference::new(21), ElementValue::string(Reference::new(22)));
//!
//! let mut table = AttributeTable::u2();
//! table.append(Attribute::annotations(Visibility::Visible, &mut pool, [deprecated])?);
//!
//! let mut out = Vec::new();
//! let written = Emitter::default().emit(&table, &mut out)?;
//! assert_eq!(written as usize, out.len());
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules Overview
//!
//! - [`encodable`] - the length/write contract
//! - [`sink`] - big-endian byte sinks
//! - [`collection`] - count-prefixed collections
//! - [`attribute`] - attribute records and the closed attribute set
//! - [`annotation`] - annotations, element values, type annotations
//! - [`version`] - class-file version with default/freeze semantics
//! - [`config`] / [`emitter`] - configuration and emission entry point

pub mod annotation;
pub mod attribute;
pub mod collection;
pub mod config;
pub mod emitter;
pub mod encodable;
pub mod error;
pub mod reference;
pub mod sink;
pub mod version;

pub use annotation::{
    Annotation, ConstKind, ElementValue, LocalVarTarget, NameValuePair, TargetInfo, TargetType,
    TypeAnnotation, TypePath, TypePathEntry, TypePathKind, Visibility,
};
pub use attribute::{
    Attribute, AttributeCollection, AttributeName, AttributeRecord, AttributeTable, DefaultValue,
    InnerClass, ParameterAnnotations,
};
pub use collection::{LengthPrefixedCollection, PrefixWidth};
pub use config::{ConfigError, EncoderConfig, EncoderConfigBuilder, VersionSetting};
pub use emitter::Emitter;
pub use encodable::{write_verified, Encodable, RawBytes};
pub use error::{EncodeError, Result};
pub use reference::{InternTable, Reference, SymbolResolver};
pub use sink::{ByteSink, CountingSink, StreamSink};
pub use version::{CfVersion, VersionProfile};
