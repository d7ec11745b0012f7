// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Encoding errors.

use crate::annotation::Visibility;
use std::io;
use thiserror::Error;

/// Errors raised while writing a record tree.
///
/// Any error aborts the whole traversal. Bytes already handed to the sink
/// are not rolled back; the caller must discard the partial output.
#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{what}: {count} elements exceed the count prefix maximum of {max}")]
    CountOverflow {
        what: &'static str,
        count: usize,
        max: usize,
    },

    #[error("attribute payload of {length} bytes does not fit the u4 length field")]
    PayloadTooLarge { length: u64 },

    #[error("missing required field: {0}")]
    MissingField(&'static str),

    #[error("length mismatch: declared {declared} bytes, wrote {written}")]
    LengthMismatch { declared: u64, written: u64 },

    #[error("target info shape {shape} does not match target type {target_type:#04x}")]
    TargetMismatch {
        target_type: u8,
        shape: &'static str,
    },

    #[error("{found:?} annotation cannot be stored in {attribute}")]
    VisibilityMismatch {
        attribute: &'static str,
        found: Visibility,
    },
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, EncodeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_error_display_variants() {
        let err = EncodeError::CountOverflow {
            what: "collection",
            count: 256,
            max: 255,
        };
        assert_eq!(
            err.to_string(),
            "collection: 256 elements exceed the count prefix maximum of 255"
        );

        let err = EncodeError::LengthMismatch {
            declared: 10,
            written: 9,
        };
        assert_eq!(err.to_string(), "length mismatch: declared 10 bytes, wrote 9");

        let err = EncodeError::TargetMismatch {
            target_type: 0x47,
            shape: "empty",
        };
        assert_eq!(
            err.to_string(),
            "target info shape empty does not match target type 0x47"
        );

        let err = EncodeError::VisibilityMismatch {
            attribute: "RuntimeVisibleAnnotations",
            found: Visibility::Invisible,
        };
        assert_eq!(
            err.to_string(),
            "Invisible annotation cannot be stored in RuntimeVisibleAnnotations"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::BrokenPipe, "closed");
        let err: EncodeError = io_err.into();
        assert!(matches!(err, EncodeError::Io(_)));
        assert_eq!(err.to_string(), "I/O error: closed");
    }
}
