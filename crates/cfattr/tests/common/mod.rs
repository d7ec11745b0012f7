// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Shared helpers for cfattr integration tests.

#![allow(dead_code)]

use cfattr::{ByteSink, Encodable, Reference};
use std::io;

pub use cfattr::InternTable;

/// Sink that discards bytes and only counts them.
#[derive(Default)]
pub struct TallySink {
    pub bytes: u64,
}

impl ByteSink for TallySink {
    fn write_u8(&mut self, _: u8) -> io::Result<()> {
        self.bytes += 1;
        Ok(())
    }

    fn write_u16(&mut self, _: u16) -> io::Result<()> {
        self.bytes += 2;
        Ok(())
    }

    fn write_u32(&mut self, _: u32) -> io::Result<()> {
        self.bytes += 4;
        Ok(())
    }

    fn write_u64(&mut self, _: u64) -> io::Result<()> {
        self.bytes += 8;
        Ok(())
    }

    fn write_bytes(&mut self, data: &[u8]) -> io::Result<()> {
        self.bytes += data.len() as u64;
        Ok(())
    }
}

/// Sink that fails once `capacity` bytes have been accepted.
pub struct FailingSink {
    pub capacity: usize,
    pub written: Vec<u8>,
}

impl FailingSink {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            written: Vec::new(),
        }
    }

    fn take(&mut self, data: &[u8]) -> io::Result<()> {
        if self.written.len() + data.len() > self.capacity {
            return Err(io::Error::new(io::ErrorKind::WriteZero, "sink full"));
        }
        self.written.extend_from_slice(data);
        Ok(())
    }
}

impl ByteSink for FailingSink {
    fn write_u8(&mut self, value: u8) -> io::Result<()> {
        self.take(&[value])
    }

    fn write_u16(&mut self, value: u16) -> io::Result<()> {
        self.take(&value.to_be_bytes())
    }

    fn write_u32(&mut self, value: u32) -> io::Result<()> {
        self.take(&value.to_be_bytes())
    }

    fn write_u64(&mut self, value: u64) -> io::Result<()> {
        self.take(&value.to_be_bytes())
    }

    fn write_bytes(&mut self, data: &[u8]) -> io::Result<()> {
        self.take(data)
    }
}

/// Write `record` into a counting sink and return the byte count.
pub fn tally<E: Encodable + ?Sized>(record: &E) -> u64 {
    let mut sink = TallySink::default();
    record.write(&mut sink).expect("tally write");
    sink.bytes
}

pub fn r(index: u16) -> Reference {
    Reference::new(index)
}
