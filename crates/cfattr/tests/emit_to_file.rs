// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! End-to-end emission through a file-backed sink.

mod common;

use cfattr::{
    Attribute, AttributeName, AttributeTable, ElementValue, Emitter, Encodable, EncoderConfig,
    StreamSink, TargetInfo, TargetType, TypeAnnotation, VersionProfile, Visibility,
};
use common::{r, InternTable};
use std::fs::{self, File};
use std::io::BufWriter;
use tempfile::tempdir;

fn sample_table(pool: &mut InternTable) -> AttributeTable {
    let ta = TypeAnnotation::new(
        TargetType::ClassExtends,
        TargetInfo::Supertype { index: 0xFFFF },
        r(40),
        Visibility::Visible,
    )
    .expect("supertype")
    .with_pair(r(41), ElementValue::string(r(42)));

    let mut table = AttributeTable::u2();
    table.append(
        Attribute::constant_index(AttributeName::SourceFile, pool, r(10)).expect("source"),
    );
    table.append(
        Attribute::class_list(AttributeName::NestMembers, pool, [r(11), r(12)]).expect("nest"),
    );
    table.append(Attribute::type_annotations(Visibility::Visible, pool, [ta]).expect("types"));
    table
}

#[test]
fn test_file_output_matches_memory_output() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("attributes.bin");

    let mut pool = InternTable::default();
    let table = sample_table(&mut pool);
    assert_eq!(pool.len(), 3);

    let mut emitter = Emitter::default();
    {
        let file = File::create(&path).expect("create");
        let mut sink = StreamSink::new(BufWriter::new(file));
        let written = emitter.emit(&table, &mut sink).expect("emit");
        assert_eq!(written, table.length());
        sink.flush().expect("flush");
    }

    let on_disk = fs::read(&path).expect("read back");
    assert_eq!(on_disk, table.encode_to_vec().expect("memory"));
    assert_eq!(&on_disk[..2], [0x00, 0x03]);
}

#[test]
fn test_emitter_from_config_file() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("encoder.json");
    fs::write(
        &path,
        r#"{ "version_profile": "module", "verify_table_length": true, "freeze_on_emit": true }"#,
    )
    .expect("write config");

    let config = EncoderConfig::from_file(&path).expect("load");
    assert_eq!(config.version_profile, VersionProfile::Module);

    let mut emitter = Emitter::new(config);
    let mut pool = InternTable::default();
    let mut out = Vec::new();
    emitter
        .emit(&sample_table(&mut pool), &mut out)
        .expect("emit");

    assert_eq!(emitter.version().to_string(), "53:0");
    emitter.version_mut().set_minor(7);
    assert_eq!(emitter.version().minor(), 0);
}

#[test]
fn test_missing_config_file_is_io_error() {
    let dir = tempdir().expect("tempdir");
    let err = EncoderConfig::from_file(dir.path().join("absent.json")).expect_err("missing");
    assert!(matches!(err, cfattr::ConfigError::Io(_)));
}
