// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Byte sinks for big-endian class-file output.
//!
//! The encoder never buffers a record to learn its size: every record knows
//! its length up front and streams itself into a [`ByteSink`] in one pass.
//!
//! # Implementations
//!
//! - `Vec<u8>` - in-memory output, infallible in practice
//! - [`StreamSink`] - any `io::Write` (file, socket, `BufWriter`)
//! - [`CountingSink`] - wraps another sink and counts bytes passing through

use byteorder::{BigEndian, WriteBytesExt};
use std::io::{self, Write};

/// Sequential big-endian binary writer.
///
/// Every method either writes all of its bytes or fails with an I/O error.
pub trait ByteSink {
    fn write_u8(&mut self, value: u8) -> io::Result<()>;
    fn write_u16(&mut self, value: u16) -> io::Result<()>;
    fn write_u32(&mut self, value: u32) -> io::Result<()>;
    fn write_u64(&mut self, value: u64) -> io::Result<()>;
    fn write_bytes(&mut self, data: &[u8]) -> io::Result<()>;

    /// Write a string as `u2 byte_length` followed by its UTF-8 bytes.
    ///
    /// Strings longer than 65535 bytes are rejected with `InvalidInput`.
    fn write_utf8(&mut self, value: &str) -> io::Result<()> {
        let len = u16::try_from(value.len()).map_err(|_| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("string of {} bytes exceeds u2 length", value.len()),
            )
        })?;
        self.write_u16(len)?;
        self.write_bytes(value.as_bytes())
    }
}

/// Generate big-endian write methods for `Vec<u8>` (eliminates duplication)
macro_rules! impl_write_be {
    ($name:ident, $type:ty) => {
        fn $name(&mut self, value: $type) -> io::Result<()> {
            self.extend_from_slice(&value.to_be_bytes());
            Ok(())
        }
    };
}

impl ByteSink for Vec<u8> {
    fn write_u8(&mut self, value: u8) -> io::Result<()> {
        self.push(value);
        Ok(())
    }

    impl_write_be!(write_u16, u16);
    impl_write_be!(write_u32, u32);
    impl_write_be!(write_u64, u64);

    fn write_bytes(&mut self, data: &[u8]) -> io::Result<()> {
        self.extend_from_slice(data);
        Ok(())
    }
}

/// Adapts any `io::Write` into a [`ByteSink`].
pub struct StreamSink<W: Write> {
    inner: W,
}

impl<W: Write> StreamSink<W> {
    pub fn new(inner: W) -> Self {
        Self { inner }
    }

    pub fn get_ref(&self) -> &W {
        &self.inner
    }

    /// Flush the underlying writer.
    pub fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write> ByteSink for StreamSink<W> {
    fn write_u8(&mut self, value: u8) -> io::Result<()> {
        self.inner.write_u8(value)
    }

    fn write_u16(&mut self, value: u16) -> io::Result<()> {
        self.inner.write_u16::<BigEndian>(value)
    }

    fn write_u32(&mut self, value: u32) -> io::Result<()> {
        self.inner.write_u32::<BigEndian>(value)
    }

    fn write_u64(&mut self, value: u64) -> io::Result<()> {
        self.inner.write_u64::<BigEndian>(value)
    }

    fn write_bytes(&mut self, data: &[u8]) -> io::Result<()> {
        self.inner.write_all(data)
    }
}

/// Counts bytes forwarded to an inner sink.
///
/// Used to cross-check a record's declared length against what it actually
/// wrote. A failed write is not counted.
pub struct CountingSink<'a> {
    inner: &'a mut dyn ByteSink,
    count: u64,
}

impl<'a> CountingSink<'a> {
    pub fn new(inner: &'a mut dyn ByteSink) -> Self {
        Self { inner, count: 0 }
    }

    /// Bytes successfully written so far.
    pub fn count(&self) -> u64 {
        self.count
    }
}

impl ByteSink for CountingSink<'_> {
    fn write_u8(&mut self, value: u8) -> io::Result<()> {
        self.inner.write_u8(value)?;
        self.count += 1;
        Ok(())
    }

    fn write_u16(&mut self, value: u16) -> io::Result<()> {
        self.inner.write_u16(value)?;
        self.count += 2;
        Ok(())
    }

    fn write_u32(&mut self, value: u32) -> io::Result<()> {
        self.inner.write_u32(value)?;
        self.count += 4;
        Ok(())
    }

    fn write_u64(&mut self, value: u64) -> io::Result<()> {
        self.inner.write_u64(value)?;
        self.count += 8;
        Ok(())
    }

    fn write_bytes(&mut self, data: &[u8]) -> io::Result<()> {
        self.inner.write_bytes(data)?;
        self.count += data.len() as u64;
        Ok(())
    }
}
