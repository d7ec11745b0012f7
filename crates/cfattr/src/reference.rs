// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Constant-pool references.
//!
//! The encoder does not own a constant pool. It receives resolved indices as
//! [`Reference`] handles and, for attribute names, asks a [`SymbolResolver`]
//! supplied by the caller.

use crate::encodable::Encodable;
use crate::error::{EncodeError, Result};
use crate::sink::ByteSink;
use std::collections::HashMap;
use std::fmt;

/// Resolved two-byte index into the constant pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Reference(u16);

impl Reference {
    pub const fn new(index: u16) -> Self {
        Self(index)
    }

    pub const fn index(self) -> u16 {
        self.0
    }
}

impl From<u16> for Reference {
    fn from(index: u16) -> Self {
        Self(index)
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl Encodable for Reference {
    fn length(&self) -> u64 {
        2
    }

    fn write(&self, sink: &mut dyn ByteSink) -> Result<()> {
        sink.write_u16(self.0)?;
        Ok(())
    }
}

/// Constant-pool collaborator used to resolve attribute names.
///
/// Implementations must be idempotent within one compilation unit: the same
/// string always yields the same reference.
pub trait SymbolResolver {
    /// Resolve (interning if needed) a UTF-8 constant.
    ///
    /// Fails when the pool has no index left for a new entry.
    fn resolve_utf8(&mut self, value: &str) -> Result<Reference>;
}

/// In-memory interning resolver.
///
/// Hands out indexes from 1 in first-seen order, for callers that encode
/// attributes without a full constant pool.
#[derive(Debug, Default, Clone)]
pub struct InternTable {
    entries: HashMap<String, Reference>,
    names: Vec<String>,
}

impl InternTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Reference already assigned to `value`, if any.
    pub fn get(&self, value: &str) -> Option<Reference> {
        self.entries.get(value).copied()
    }

    /// String interned under `reference`.
    pub fn name_of(&self, reference: Reference) -> Option<&str> {
        let slot = usize::from(reference.index()).checked_sub(1)?;
        self.names.get(slot).map(String::as_str)
    }
}

impl SymbolResolver for InternTable {
    fn resolve_utf8(&mut self, value: &str) -> Result<Reference> {
        if let Some(existing) = self.get(value) {
            return Ok(existing);
        }
        let count = self.names.len() + 1;
        let index = u16::try_from(count).map_err(|_| EncodeError::CountOverflow {
            what: "constant pool entries",
            count,
            max: usize::from(u16::MAX),
        })?;

        let reference = Reference::new(index);
        self.entries.insert(value.to_string(), reference);
        self.names.push(value.to_string());
        Ok(reference)
    }
}
