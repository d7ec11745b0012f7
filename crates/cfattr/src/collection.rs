// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Count-prefixed collections.
//!
//! # Layout
//!
//! ```text
//! +----------------------+-----------+-----------+-----+
//! | count (u1 or u2, BE) | element 0 | element 1 | ... |
//! +----------------------+-----------+-----------+-----+
//! ```
//!
//! The collection keeps a running total of its elements' lengths so that
//! `length()` stays O(1) while enclosing records query it during assembly.
//! Elements cannot be mutated once appended, which keeps the total exact.

use crate::encodable::Encodable;
use crate::error::{EncodeError, Result};
use crate::sink::ByteSink;

/// Width of a collection's element-count prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrefixWidth {
    /// One byte, at most 255 elements.
    U1,
    /// Two bytes, at most 65535 elements.
    U2,
}

impl PrefixWidth {
    pub const fn bytes(self) -> u64 {
        match self {
            PrefixWidth::U1 => 1,
            PrefixWidth::U2 => 2,
        }
    }

    /// Largest count the prefix can encode.
    pub const fn max_count(self) -> usize {
        match self {
            PrefixWidth::U1 => u8::MAX as usize,
            PrefixWidth::U2 => u16::MAX as usize,
        }
    }

    /// Fail with `CountOverflow` when `count` does not fit this width.
    pub(crate) fn check_count(self, what: &'static str, count: usize) -> Result<()> {
        let max = self.max_count();
        if count > max {
            return Err(EncodeError::CountOverflow { what, count, max });
        }
        Ok(())
    }

    /// Write `count` in this width, failing rather than truncating.
    pub(crate) fn write_count(
        self,
        what: &'static str,
        count: usize,
        sink: &mut dyn ByteSink,
    ) -> Result<()> {
        self.check_count(what, count)?;
        match self {
            PrefixWidth::U1 => sink.write_u8(count as u8)?,
            PrefixWidth::U2 => sink.write_u16(count as u16)?,
        }
        Ok(())
    }
}

/// Ordered, append-only sequence serialized as `count` + elements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LengthPrefixedCollection<T> {
    width: PrefixWidth,
    items: Vec<T>,
    payload_length: u64,
}

impl<T: Encodable> LengthPrefixedCollection<T> {
    pub fn new(width: PrefixWidth) -> Self {
        Self {
            width,
            items: Vec::new(),
            payload_length: 0,
        }
    }

    /// Collection with a one-byte count.
    pub fn u1() -> Self {
        Self::new(PrefixWidth::U1)
    }

    /// Collection with a two-byte count.
    pub fn u2() -> Self {
        Self::new(PrefixWidth::U2)
    }

    /// Append an element. Never fails; an oversized count is reported by `write`.
    pub fn append(&mut self, element: T) {
        self.payload_length += element.length();
        self.items.push(element);
    }

    /// Alias for [`append`](Self::append).
    pub fn push(&mut self, element: T) {
        self.append(element);
    }

    /// Builder-style [`append`](Self::append).
    pub fn with(mut self, element: T) -> Self {
        self.append(element);
        self
    }

    pub fn width(&self) -> PrefixWidth {
        self.width
    }

    /// Sum of element lengths, excluding the count prefix.
    pub fn payload_length(&self) -> u64 {
        self.payload_length
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn first(&self) -> Option<&T> {
        self.items.first()
    }
}

impl<T: Encodable> Encodable for LengthPrefixedCollection<T> {
    fn length(&self) -> u64 {
        self.width.bytes() + self.payload_length
    }

    fn write(&self, sink: &mut dyn ByteSink) -> Result<()> {
        self.width.write_count("collection", self.items.len(), sink)?;
        for item in &self.items {
            item.write(sink)?;
        }
        Ok(())
    }
}

impl<T: Encodable> Default for LengthPrefixedCollection<T> {
    fn default() -> Self {
        Self::u2()
    }
}

impl<T: Encodable> Extend<T> for LengthPrefixedCollection<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.append(item);
        }
    }
}

/// Collects into a two-byte-count collection.
impl<T: Encodable> FromIterator<T> for LengthPrefixedCollection<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut collection = Self::u2();
        collection.extend(iter);
        collection
    }
}

impl<'a, T> IntoIterator for &'a LengthPrefixedCollection<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
