// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! The length/write contract shared by every record.
//!
//! # Contract
//!
//! - [`Encodable::length`] is pure and never touches a sink.
//! - [`Encodable::write`] emits exactly `length()` bytes, in the field order
//!   fixed by the owning record's layout.
//!
//! Enclosing records rely on the first property to emit their own length
//! prefixes before any child byte is written. Nothing in the output format
//! detects a broken second property, so [`write_verified`] and the attribute
//! header both cross-check it at runtime.

use crate::error::{EncodeError, Result};
use crate::sink::{ByteSink, CountingSink};

/// A record that can report its serialized size and write itself.
pub trait Encodable {
    /// Serialized size in bytes.
    fn length(&self) -> u64;

    /// Serialize into `sink`.
    fn write(&self, sink: &mut dyn ByteSink) -> Result<()>;

    /// Serialize into a fresh buffer sized from [`Encodable::length`].
    fn encode_to_vec(&self) -> Result<Vec<u8>> {
        let mut buf = Vec::with_capacity(usize::try_from(self.length()).unwrap_or(0));
        self.write(&mut buf)?;
        Ok(buf)
    }
}

/// Write `record` and check that the byte count matches its declared length.
///
/// Returns the number of bytes written.
pub fn write_verified<E>(record: &E, sink: &mut dyn ByteSink) -> Result<u64>
where
    E: Encodable + ?Sized,
{
    let declared = record.length();
    let mut counter = CountingSink::new(sink);
    record.write(&mut counter)?;
    let written = counter.count();
    if written != declared {
        return Err(EncodeError::LengthMismatch { declared, written });
    }
    Ok(written)
}

impl Encodable for u8 {
    fn length(&self) -> u64 {
        1
    }

    fn write(&self, sink: &mut dyn ByteSink) -> Result<()> {
        sink.write_u8(*self)?;
        Ok(())
    }
}

impl Encodable for u16 {
    fn length(&self) -> u64 {
        2
    }

    fn write(&self, sink: &mut dyn ByteSink) -> Result<()> {
        sink.write_u16(*self)?;
        Ok(())
    }
}

impl<E: Encodable + ?Sized> Encodable for Box<E> {
    fn length(&self) -> u64 {
        (**self).length()
    }

    fn write(&self, sink: &mut dyn ByteSink) -> Result<()> {
        (**self).write(sink)
    }
}

/// Opaque byte payload written verbatim (unknown or marker attributes).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawBytes(pub Vec<u8>);

impl RawBytes {
    pub fn empty() -> Self {
        Self(Vec::new())
    }
}

impl From<Vec<u8>> for RawBytes {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

impl Encodable for RawBytes {
    fn length(&self) -> u64 {
        self.0.len() as u64
    }

    fn write(&self, sink: &mut dyn ByteSink) -> Result<()> {
        sink.write_bytes(&self.0)?;
        Ok(())
    }
}
