// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Emission entry point.
//!
//! An [`Emitter`] writes finished attribute tables and carries the format
//! version of the compilation unit they belong to. Attribute bytes do not
//! depend on the version; the caller reads [`Emitter::version`] when it
//! writes the `minor_version`/`major_version` header fields.
//!
//! A successful emit finalizes the version: profile defaults fill in
//! anything left unset and, with `freeze_on_emit`, the version stops
//! accepting assignments. A failed emit leaves the version untouched.

use crate::attribute::AttributeTable;
use crate::config::EncoderConfig;
use crate::encodable::{write_verified, Encodable};
use crate::error::Result;
use crate::sink::ByteSink;
use crate::version::CfVersion;
use tracing::{debug, warn};

pub struct Emitter {
    config: EncoderConfig,
    version: CfVersion,
    tables_emitted: u64,
}

impl Emitter {
    pub fn new(config: EncoderConfig) -> Self {
        let version = config.initial_version();
        Self {
            config,
            version,
            tables_emitted: 0,
        }
    }

    pub fn config(&self) -> &EncoderConfig {
        &self.config
    }

    /// Version for the class-file header written by the caller.
    pub fn version(&self) -> &CfVersion {
        &self.version
    }

    /// Version being assembled; assignments are ignored once frozen.
    pub fn version_mut(&mut self) -> &mut CfVersion {
        &mut self.version
    }

    /// Number of tables written so far.
    pub fn tables_emitted(&self) -> u64 {
        self.tables_emitted
    }

    /// Write `table`, then finalize the version. Returns bytes written.
    pub fn emit(&mut self, table: &AttributeTable, sink: &mut dyn ByteSink) -> Result<u64> {
        let result = if self.config.verify_table_length {
            write_verified(table, sink)
        } else {
            table.write(sink).map(|()| table.length())
        };
        let written = match result {
            Ok(written) => written,
            Err(err) => {
                warn!(attributes = table.len(), error = %err, "attribute table emit failed");
                return Err(err);
            }
        };

        self.version.init_defaults(self.config.version_profile);
        if self.config.freeze_on_emit {
            self.version.freeze();
        }
        self.tables_emitted += 1;
        debug!(
            version = %self.version,
            attributes = table.len(),
            length = written,
            "emitted attribute table"
        );
        Ok(written)
    }
}

impl Default for Emitter {
    fn default() -> Self {
        Self::new(EncoderConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attribute::{Attribute, AttributeName};
    use crate::error::EncodeError;
    use crate::reference::{InternTable, Reference};
    use crate::version::VersionProfile;

    struct Short;

    impl Encodable for Short {
        fn length(&self) -> u64 {
            4
        }

        fn write(&self, sink: &mut dyn ByteSink) -> Result<()> {
            sink.write_u8(0)?;
            Ok(())
        }
    }

    #[test]
    fn test_emit_freezes_default_version() {
        let mut pool = InternTable::new();
        let mut table = AttributeTable::u2();
        table.append(
            Attribute::constant_index(AttributeName::SourceFile, &mut pool, Reference::new(2))
                .expect("attribute"),
        );

        let mut emitter = Emitter::default();
        let mut out = Vec::new();
        let written = emitter.emit(&table, &mut out).expect("emit");

        assert_eq!(written, 10);
        assert_eq!(out.len(), 10);
        assert_eq!(emitter.version().to_string(), "45:3");
        assert!(emitter.version().is_frozen());

        emitter.version_mut().set_major(61);
        assert_eq!(emitter.version().major(), 45);
        assert_eq!(emitter.tables_emitted(), 1);
    }

    #[test]
    fn test_explicit_version_wins_over_profile() {
        let config = EncoderConfig::builder()
            .version_profile(VersionProfile::Module)
            .freeze_on_emit(false)
            .build();
        let mut emitter = Emitter::new(config);
        emitter.version_mut().set_major(52);
        emitter.version_mut().set_minor(0);

        let mut out = Vec::new();
        emitter.emit(&AttributeTable::u2(), &mut out).expect("emit");
        assert_eq!(out, [0x00, 0x00]);
        assert_eq!(emitter.version().to_string(), "52:0");
        assert!(!emitter.version().is_frozen());
    }

    #[test]
    fn test_module_profile_default() {
        let config = EncoderConfig::builder()
            .version_profile(VersionProfile::Module)
            .verify_table_length(false)
            .build();
        let mut emitter = Emitter::new(config);
        let mut out = Vec::new();
        assert_eq!(emitter.emit(&AttributeTable::u2(), &mut out).expect("emit"), 2);
        assert_eq!(emitter.version().to_string(), "53:0");
    }

    #[test]
    fn test_failed_emit_leaves_version_open() {
        let config = EncoderConfig::builder().verify_table_length(false).build();
        let mut emitter = Emitter::new(config);
        let mut pool = InternTable::new();
        let mut table = AttributeTable::u2();
        table.append(Attribute::custom("Broken", &mut pool, Box::new(Short)).expect("attribute"));

        // Payload checks run even without the table-level check.
        let mut out = Vec::new();
        let err = emitter.emit(&table, &mut out).expect_err("drift");
        assert!(matches!(
            err,
            EncodeError::LengthMismatch {
                declared: 4,
                written: 1
            }
        ));

        assert!(!emitter.version().is_set());
        assert!(!emitter.version().is_frozen());
        assert_eq!(emitter.tables_emitted(), 0);

        emitter.version_mut().set_major(61);
        emitter.version_mut().set_minor(0);
        emitter.emit(&AttributeTable::u2(), &mut out).expect("retry");
        assert_eq!(emitter.version().to_string(), "61:0");
        assert!(emitter.version().is_frozen());
    }
}
